use yew::prelude::*;

use crate::model::RoundOutcome;

#[derive(Properties, PartialEq, Clone)]
pub struct EndOverlayProps {
    pub outcome: Option<RoundOutcome>,
    pub target: u32,
    pub on_play_again: Callback<()>,
    pub on_share: Callback<()>,
    pub on_donate: Callback<()>,
}

#[function_component(EndOverlay)]
pub fn end_overlay(props: &EndOverlayProps) -> Html {
    let Some(outcome) = props.outcome else {
        return html! {};
    };
    let play_again = {
        let cb = props.on_play_again.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let share = {
        let cb = props.on_share.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let donate = {
        let cb = props.on_donate.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let (border, headline) = if outcome.won {
        ("#4FCB53", format!("🎉 Winner! You scored {}!", outcome.score))
    } else {
        (
            "#f85149",
            format!("Try again! Score at least {} to win.", props.target),
        )
    };
    html! {
        <div style={format!("position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid {}; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;", border)}>
            <h2 style="margin:0 0 12px 0;">{ headline }</h2>
            <p style="margin:4px 0;">{ format!("Final score: {}", outcome.score) }</p>
            <p style="margin:12px 0; font-size:13px; opacity:0.8; max-width:360px;">{ outcome.fact }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={play_again}>{"Play Again"}</button>
                <button onclick={share}>{"Share"}</button>
                <button onclick={donate}>{"Donate"}</button>
            </div>
        </div>
    }
}
