use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudPanelProps {
    pub score: u32,
    pub time_left: u32,
    pub target: u32,
    pub best: Option<u32>,
}

#[function_component(HudPanel)]
pub fn hud_panel(props: &HudPanelProps) -> Html {
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:160px; display:flex; flex-direction:column; gap:6px;">
            <div style="font-size:20px; font-weight:600;">{ format!("Score: {}", props.score) }</div>
            <div>{ format!("Time: {}s", props.time_left) }</div>
            <div>{ format!("Target: {}", props.target) }</div>
            { if let Some(best) = props.best {
                html! { <div style="font-size:11px; opacity:0.7;">{ format!("Best: {}", best) }</div> }
            } else {
                html! {}
            } }
        </div>
    }
}
