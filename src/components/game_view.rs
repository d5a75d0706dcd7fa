use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::model::{DropKind, DropSpec, Phase, RoundAction, RoundState, DROP_POP_MS};

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub round: UseReducerHandle<RoundState>,
}

fn drop_style(d: &DropSpec, arena_height: f64) -> String {
    let top = d.top_px(arena_height);
    let (color, edge) = match d.kind {
        DropKind::Good => ("#2E9DF7", "#1769aa"),
        DropKind::Bad => ("#F5402C", "#8f1b10"),
    };
    if d.resolved {
        // Pop: scale up and fade over the remaining pop window.
        let t = 1.0 - (d.pop_ms_left / DROP_POP_MS).clamp(0.0, 1.0);
        format!(
            "position:absolute; left:{:.1}px; top:{:.1}px; width:{:.1}px; height:{:.1}px; \
             border-radius:50% 50% 50% 50% / 60% 60% 40% 40%; background:{}; border:2px solid {}; \
             transform:scale({:.2}); opacity:{:.2}; pointer-events:none;",
            d.x_px,
            top,
            d.size_px,
            d.size_px,
            color,
            edge,
            1.0 + 0.6 * t,
            1.0 - t,
        )
    } else {
        format!(
            "position:absolute; left:{:.1}px; top:{:.1}px; width:{:.1}px; height:{:.1}px; \
             border-radius:50% 50% 50% 50% / 60% 60% 40% 40%; background:{}; border:2px solid {}; \
             cursor:pointer;",
            d.x_px, top, d.size_px, d.size_px, color, edge,
        )
    }
}

/// The arena: falling drops, burst particles, confetti and milestone toasts.
/// All motion comes from the model's sim tick; this component just projects
/// state into absolutely-positioned divs.
#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let arena_ref = use_node_ref();

    // Measure the arena on mount and whenever the window resizes.
    {
        let arena_ref = arena_ref.clone();
        let round = props.round.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let measure = {
                let arena_ref = arena_ref.clone();
                let round = round.clone();
                move || {
                    if let Some(el) = arena_ref.cast::<HtmlElement>() {
                        round.dispatch(RoundAction::SetArenaSize {
                            width: el.client_width() as f64,
                            height: el.client_height() as f64,
                        });
                    }
                }
            };
            measure();
            let resize_cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
                measure();
            }) as Box<dyn FnMut(_)>);
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();
            move || {
                let _ = window
                    .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                drop(resize_cb);
            }
        });
    }

    let rs = (*props.round).clone();
    let arena_h = rs.arena_height;

    let drops = rs.drops.iter().map(|d| {
        let onclick = {
            let round = props.round.clone();
            let id = d.id;
            Callback::from(move |_: MouseEvent| {
                round.dispatch(RoundAction::ClickDrop { id });
            })
        };
        html! {
            <div key={d.id.to_string()} style={drop_style(d, arena_h)} onclick={onclick}></div>
        }
    });

    let particles = rs.particles.iter().map(|p| {
        html! {
            <div style={format!(
                "position:absolute; left:{:.1}px; top:{:.1}px; width:8px; height:8px; \
                 border-radius:50%; background:{}; pointer-events:none;",
                p.x, p.y, p.color,
            )}></div>
        }
    });

    let confetti = rs.confetti.iter().map(|c| {
        html! {
            <div style={format!(
                "position:absolute; left:{:.1}px; top:{:.1}px; width:12px; height:6px; \
                 background:{}; pointer-events:none;",
                c.x, c.y, c.color,
            )}></div>
        }
    });

    let toasts = rs.toasts.iter().enumerate().map(|(i, t)| {
        html! {
            <div style={format!(
                "position:absolute; top:{}px; left:50%; transform:translateX(-50%); \
                 background:rgba(22,27,34,0.95); border:1px solid #FFC907; border-radius:8px; \
                 padding:6px 14px; font-weight:600; pointer-events:none;",
                64 + i * 40,
            )}>{ t.message }</div>
        }
    });

    html! {
        <div
            ref={arena_ref}
            style="position:absolute; inset:0; overflow:hidden; background:linear-gradient(#0e1116, #10263a);"
        >
            { for drops }
            { for particles }
            { for confetti }
            { for toasts }
            { if rs.phase == Phase::Idle && rs.outcome.is_none() {
                html! {
                    <div style="position:absolute; top:45%; left:50%; transform:translate(-50%,-50%); opacity:0.7; font-size:18px;">
                        { "Press Start and click the blue drops — avoid the red ones!" }
                    </div>
                }
            } else {
                html! {}
            } }
        </div>
    }
}
