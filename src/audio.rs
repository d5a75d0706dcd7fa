//! WebAudio beeps for game feedback. Everything here is best-effort: if the
//! browser refuses to build or start a node the cue is simply skipped, never
//! surfaced to round logic.

use std::cell::RefCell;
use web_sys::{AudioContext, OscillatorType};

use crate::model::Cue;

thread_local! {
    static AUDIO_CTX: RefCell<Option<AudioContext>> = RefCell::new(None);
}

fn with_context(f: impl FnOnce(&AudioContext)) {
    AUDIO_CTX.with(|cell| {
        let mut ctx = cell.borrow_mut();
        if ctx.is_none() {
            *ctx = AudioContext::new().ok();
        }
        if let Some(ctx) = ctx.as_ref() {
            f(ctx);
        }
    });
}

/// One enveloped oscillator tone starting `delay_secs` from now.
fn play_tone(ctx: &AudioContext, freq: f32, shape: OscillatorType, delay_secs: f64, duration_secs: f64, gain: f32) {
    let Ok(osc) = ctx.create_oscillator() else {
        return;
    };
    let Ok(g) = ctx.create_gain() else {
        return;
    };
    osc.set_type(shape);
    osc.frequency().set_value(freq);
    if osc.connect_with_audio_node(&g).is_err() {
        return;
    }
    if g.connect_with_audio_node(&ctx.destination()).is_err() {
        return;
    }
    let start = ctx.current_time() + delay_secs;
    let _ = g.gain().set_value_at_time(0.0001, start);
    let _ = g.gain().exponential_ramp_to_value_at_time(gain, start + 0.01);
    let _ = g.gain().exponential_ramp_to_value_at_time(0.0001, start + duration_secs);
    let _ = osc.start_with_when(start);
    let _ = osc.stop_with_when(start + duration_secs + 0.02);
}

/// Play the layered tones for a cue. Mirrors the original effect timings.
pub fn play_cue(cue: Cue) {
    with_context(|ctx| match cue {
        Cue::Start => {
            play_tone(ctx, 440.0, OscillatorType::Sine, 0.0, 0.12, 0.08);
            play_tone(ctx, 660.0, OscillatorType::Sine, 0.08, 0.09, 0.06);
        }
        Cue::Success => {
            play_tone(ctx, 1000.0, OscillatorType::Sine, 0.0, 0.12, 0.09);
            play_tone(ctx, 1400.0, OscillatorType::Triangle, 0.03, 0.08, 0.06);
        }
        Cue::Fail => {
            play_tone(ctx, 220.0, OscillatorType::Sawtooth, 0.0, 0.18, 0.12);
            play_tone(ctx, 160.0, OscillatorType::Sine, 0.05, 0.14, 0.08);
        }
        Cue::Win => {
            play_tone(ctx, 880.0, OscillatorType::Triangle, 0.0, 0.18, 0.12);
            play_tone(ctx, 660.0, OscillatorType::Sine, 0.09, 0.12, 0.08);
        }
        Cue::Lose => {
            play_tone(ctx, 200.0, OscillatorType::Sawtooth, 0.0, 0.2, 0.12);
        }
    });
}
