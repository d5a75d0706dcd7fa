pub mod app;
pub mod controls_panel;
pub mod end_overlay;
pub mod game_view;
pub mod hud_panel;
