use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::model::Difficulty;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub running: bool,
    pub difficulty: Difficulty,
    pub on_start: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_set_difficulty: Callback<Difficulty>,
}

#[function_component(ControlsPanel)]
pub fn controls_panel(props: &ControlsPanelProps) -> Html {
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let difficulty_cb = {
        let cb = props.on_set_difficulty.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<HtmlSelectElement>() {
                if let Some(d) = Difficulty::from_key(&sel.value()) {
                    cb.emit(d);
                }
            }
        })
    };
    html! {
        <div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:180px; display:flex; flex-direction:column; gap:6px;">
            <button onclick={start_cb} disabled={props.running}>{"Start"}</button>
            <button onclick={reset_cb}>{"Reset"}</button>
            // The reducer also rejects mid-round changes; disabling is just UI.
            <select onchange={difficulty_cb} disabled={props.running}>
                { for Difficulty::ALL.iter().map(|d| html! {
                    <option value={d.key()} selected={*d == props.difficulty}>{ d.label() }</option>
                }) }
            </select>
        </div>
    }
}
