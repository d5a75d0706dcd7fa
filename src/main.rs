mod audio;
mod components;
mod model;
mod util;

#[cfg(test)]
mod tests;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
