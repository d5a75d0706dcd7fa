use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::{
    controls_panel::ControlsPanel, end_overlay::EndOverlay, game_view::GameView,
    hud_panel::HudPanel,
};
use crate::audio;
use crate::model::{Difficulty, Phase, RoundAction, RoundState};
use crate::util::{clog, open_external};

/// Sim tick cadence in ms; drop motion and spawning both derive from it.
const SIM_TICK_MS: u32 = 50;

const STORE_DIFFICULTY: &str = "dc_difficulty";
const STORE_BEST: &str = "dc_best_scores";
const DONATE_URL: &str = "https://www.charitywater.org/donate";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn load_difficulty() -> Difficulty {
    local_storage()
        .and_then(|s| s.get_item(STORE_DIFFICULTY).ok().flatten())
        .and_then(|v| Difficulty::from_key(&v))
        .unwrap_or(Difficulty::Normal)
}

fn load_best_scores() -> HashMap<String, u32> {
    local_storage()
        .and_then(|s| s.get_item(STORE_BEST).ok().flatten())
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

#[function_component(App)]
pub fn app() -> Html {
    let round = use_reducer(|| {
        let seed = js_sys::Date::now() as u64;
        RoundState::new(load_difficulty(), seed)
    });
    let best_scores = use_state(load_best_scores);
    let last_cue_seq = use_mut_ref(|| 0u64);

    // Permanent tickers: 1s countdown + sim tick. The reducer ignores fires
    // that arrive outside a running round.
    {
        let round = round.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let countdown = {
                let round = round.clone();
                Closure::wrap(Box::new(move || {
                    round.dispatch(RoundAction::CountdownTick);
                }) as Box<dyn FnMut()>)
            };
            let countdown_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    countdown.as_ref().unchecked_ref(),
                    1000,
                )
                .unwrap();
            let sim = {
                let round = round.clone();
                Closure::wrap(Box::new(move || {
                    round.dispatch(RoundAction::SimTick { dt_ms: SIM_TICK_MS });
                }) as Box<dyn FnMut()>)
            };
            let sim_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    sim.as_ref().unchecked_ref(),
                    SIM_TICK_MS as i32,
                )
                .unwrap();
            move || {
                window.clear_interval_with_handle(countdown_id);
                window.clear_interval_with_handle(sim_id);
                drop(countdown);
                drop(sim);
            }
        });
    }

    // Play audio cues the reducer queued since the last render.
    {
        let round = round.clone();
        let last_cue_seq = last_cue_seq.clone();
        use_effect_with(round.version, move |_| {
            let mut last = last_cue_seq.borrow_mut();
            for &(seq, cue) in &round.cues {
                if seq > *last {
                    *last = seq;
                    audio::play_cue(cue);
                }
            }
            || ()
        });
    }

    // Persist difficulty selection.
    {
        let difficulty = round.difficulty;
        use_effect_with(difficulty, move |_| {
            if let Some(store) = local_storage() {
                let _ = store.set_item(STORE_DIFFICULTY, difficulty.key());
            }
            || ()
        });
    }

    // Record & persist best score when a round lands.
    {
        let best_scores = best_scores.clone();
        let difficulty = round.difficulty;
        use_effect_with(round.outcome, move |outcome| {
            if let Some(o) = outcome {
                clog(&format!(
                    "round over ({}): score {} — {}",
                    difficulty.key(),
                    o.score,
                    if o.won { "win" } else { "loss" }
                ));
                let key = difficulty.key().to_string();
                let prev = best_scores.get(&key).copied().unwrap_or(0);
                if o.score > prev {
                    let mut next = (*best_scores).clone();
                    next.insert(key, o.score);
                    if let Some(store) = local_storage() {
                        if let Ok(raw) = serde_json::to_string(&next) {
                            let _ = store.set_item(STORE_BEST, &raw);
                        }
                    }
                    best_scores.set(next);
                }
            }
            || ()
        });
    }

    let on_start = {
        let round = round.clone();
        Callback::from(move |_| round.dispatch(RoundAction::Start))
    };
    let on_reset = {
        let round = round.clone();
        Callback::from(move |_| round.dispatch(RoundAction::Reset))
    };
    let on_play_again = {
        let round = round.clone();
        Callback::from(move |_| {
            round.dispatch(RoundAction::Reset);
            round.dispatch(RoundAction::Start);
        })
    };
    let on_set_difficulty = {
        let round = round.clone();
        Callback::from(move |d: Difficulty| round.dispatch(RoundAction::SetDifficulty(d)))
    };
    let on_share = {
        let score = round.outcome.map(|o| o.score).unwrap_or(round.score);
        Callback::from(move |_| {
            let text = format!("I caught {} drops in Drop Catch! Can you beat me?", score);
            let encoded = js_sys::encode_uri_component(&text);
            open_external(&format!(
                "https://twitter.com/intent/tweet?text={}",
                String::from(encoded)
            ));
        })
    };
    let on_donate = Callback::from(move |_| open_external(DONATE_URL));

    let best = best_scores.get(round.difficulty.key()).copied();

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            <GameView round={round.clone()} />
            <HudPanel
                score={round.score}
                time_left={round.time_left_secs}
                target={round.config.target}
                best={best}
            />
            <ControlsPanel
                running={round.phase == Phase::Running}
                difficulty={round.difficulty}
                on_start={on_start}
                on_reset={on_reset}
                on_set_difficulty={on_set_difficulty}
            />
            <EndOverlay
                outcome={round.outcome}
                target={round.config.target}
                on_play_again={on_play_again}
                on_share={on_share}
                on_donate={on_donate}
            />
        </div>
    }
}
