//! Tests for the round state machine, spawner, drop resolution, milestones
//! and end-of-round classification. Everything drives the reducer directly;
//! no browser is involved.

use std::rc::Rc;
use yew::Reducible;

use crate::model::{
    Difficulty, DropKind, Phase, RoundAction, RoundState, MILESTONES,
};

const ARENA_W: f64 = 800.0;
const ARENA_H: f64 = 600.0;

/// Fresh state with a measured arena, still Idle.
fn ready(difficulty: Difficulty, seed: u64) -> Rc<RoundState> {
    let s = Rc::new(RoundState::new(difficulty, seed));
    s.reduce(RoundAction::SetArenaSize {
        width: ARENA_W,
        height: ARENA_H,
    })
}

fn started(difficulty: Difficulty, seed: u64) -> Rc<RoundState> {
    ready(difficulty, seed).reduce(RoundAction::Start)
}

/// Advance the sim by exactly one spawn interval.
fn tick_one_interval(s: Rc<RoundState>) -> Rc<RoundState> {
    let dt = s.config.spawn_interval_ms;
    s.reduce(RoundAction::SimTick { dt_ms: dt })
}

fn first_unresolved(s: &RoundState, kind: DropKind) -> Option<u64> {
    s.drops
        .iter()
        .find(|d| !d.resolved && d.kind == kind)
        .map(|d| d.id)
}

/// Click good drops until `n` have been caught, spawning as needed.
fn catch_goods(mut s: Rc<RoundState>, n: u32) -> Rc<RoundState> {
    let goal = s.score + n;
    for _ in 0..10_000 {
        if s.score >= goal {
            return s;
        }
        if let Some(id) = first_unresolved(&s, DropKind::Good) {
            s = s.reduce(RoundAction::ClickDrop { id });
        } else {
            s = tick_one_interval(s);
        }
    }
    panic!("failed to catch {} good drops", n);
}

/// Run the countdown until the round ends.
fn run_out_clock(mut s: Rc<RoundState>) -> Rc<RoundState> {
    for _ in 0..=s.config.time_secs {
        if s.phase == Phase::Ended {
            return s;
        }
        s = s.reduce(RoundAction::CountdownTick);
    }
    assert_eq!(s.phase, Phase::Ended, "countdown never ended the round");
    s
}

// ---- Round lifecycle ----

#[test]
fn start_initializes_round() {
    let s = started(Difficulty::Normal, 1);
    assert_eq!(s.phase, Phase::Running);
    assert_eq!(s.score, 0);
    assert_eq!(s.time_left_secs, s.config.time_secs);
    assert!(s.drops.is_empty());
    assert!(s.outcome.is_none());
    assert!(s.shown_milestones.iter().all(|shown| !shown));
}

#[test]
fn start_while_running_is_noop() {
    let s = started(Difficulty::Normal, 1);
    let s2 = s.clone().reduce(RoundAction::Start);
    assert!(Rc::ptr_eq(&s, &s2));
}

#[test]
fn countdown_decrements_once_per_tick() {
    let mut s = started(Difficulty::Normal, 1);
    let total = s.config.time_secs;
    for expected in (0..total).rev() {
        s = s.reduce(RoundAction::CountdownTick);
        assert_eq!(s.time_left_secs, expected);
    }
    assert_eq!(s.phase, Phase::Ended);
}

#[test]
fn countdown_ends_round_exactly_once() {
    let s = run_out_clock(started(Difficulty::Hard, 7));
    assert!(s.outcome.is_some());
    // Further ticks after the round ended are no-ops.
    let s2 = s.clone().reduce(RoundAction::CountdownTick);
    assert!(Rc::ptr_eq(&s, &s2));
}

#[test]
fn countdown_while_idle_is_noop() {
    let s = ready(Difficulty::Normal, 1);
    let s2 = s.clone().reduce(RoundAction::CountdownTick);
    assert!(Rc::ptr_eq(&s, &s2));
}

#[test]
fn reset_restores_initial_state() {
    let s = catch_goods(started(Difficulty::Normal, 11), 6);
    assert!(s.score >= 6);
    let s = s.reduce(RoundAction::Reset);
    assert_eq!(s.phase, Phase::Idle);
    assert_eq!(s.score, 0);
    assert_eq!(s.time_left_secs, s.config.time_secs);
    assert!(s.drops.is_empty());
    assert!(s.toasts.is_empty());
    assert!(s.outcome.is_none());
    assert!(s.shown_milestones.iter().all(|shown| !shown));
}

#[test]
fn reset_after_end_restores_initial_state() {
    let s = run_out_clock(started(Difficulty::Normal, 3));
    let s = s.reduce(RoundAction::Reset);
    assert_eq!(s.phase, Phase::Idle);
    assert!(s.outcome.is_none());
    assert!(s.confetti.is_empty());
}

// ---- Difficulty ----

#[test]
fn difficulty_change_rejected_while_running() {
    let s = started(Difficulty::Normal, 1);
    let s2 = s
        .clone()
        .reduce(RoundAction::SetDifficulty(Difficulty::Hard));
    assert!(Rc::ptr_eq(&s, &s2));
    assert_eq!(s2.difficulty, Difficulty::Normal);
}

#[test]
fn difficulty_change_while_idle_reseeds_clock() {
    let s = ready(Difficulty::Normal, 1);
    let s = s.reduce(RoundAction::SetDifficulty(Difficulty::Easy));
    assert_eq!(s.difficulty, Difficulty::Easy);
    assert_eq!(s.config.target, 10);
    assert_eq!(s.time_left_secs, 45);
}

// ---- Spawner ----

#[test]
fn spawner_emits_one_drop_per_interval() {
    let s = started(Difficulty::Normal, 5);
    let interval = s.config.spawn_interval_ms;
    // Less than one interval: nothing spawns.
    let s = s.reduce(RoundAction::SimTick {
        dt_ms: interval - 1,
    });
    assert!(s.drops.is_empty());
    let s = s.reduce(RoundAction::SimTick { dt_ms: 1 });
    assert_eq!(s.drops.len(), 1);
    // A large dt catches up with one drop per elapsed interval.
    let s = s.reduce(RoundAction::SimTick {
        dt_ms: interval * 3,
    });
    assert_eq!(s.drops.len(), 4);
}

#[test]
fn spawner_stops_at_round_end() {
    let mut s = started(Difficulty::Normal, 5);
    s = tick_one_interval(s);
    assert!(!s.drops.is_empty());
    s = run_out_clock(s);
    assert!(s.drops.is_empty(), "end discards pending drops");
    // A pending spawn fire arriving after the end spawns nothing.
    let after = tick_one_interval(s);
    assert!(after.drops.is_empty());
}

#[test]
fn spawned_drops_fit_the_arena() {
    let mut s = started(Difficulty::Hard, 9);
    for _ in 0..50 {
        s = tick_one_interval(s);
    }
    for d in s.drops.iter() {
        assert!(d.x_px >= 0.0);
        assert!(d.x_px + d.size_px <= ARENA_W);
        assert!(d.size_px >= 30.0 && d.size_px < 78.0);
    }
}

#[test]
fn narrow_arena_clamps_spawn_position() {
    let s = Rc::new(RoundState::new(Difficulty::Normal, 2));
    let s = s.reduce(RoundAction::SetArenaSize {
        width: 10.0,
        height: 600.0,
    });
    let mut s = s.reduce(RoundAction::Start);
    s = tick_one_interval(s);
    assert_eq!(s.drops[0].x_px, 0.0);
}

// ---- Drop resolution ----

#[test]
fn good_click_scores_and_bursts() {
    let mut s = started(Difficulty::Normal, 11);
    let id = loop {
        if let Some(id) = first_unresolved(&s, DropKind::Good) {
            break id;
        }
        s = tick_one_interval(s);
    };
    let s = s.reduce(RoundAction::ClickDrop { id });
    assert_eq!(s.score, 1);
    assert!(!s.particles.is_empty());
}

#[test]
fn bad_click_penalizes_without_going_negative() {
    let mut s = started(Difficulty::Hard, 13);
    let id = loop {
        if let Some(id) = first_unresolved(&s, DropKind::Bad) {
            break id;
        }
        s = tick_one_interval(s);
    };
    assert_eq!(s.score, 0);
    let s = s.reduce(RoundAction::ClickDrop { id });
    assert_eq!(s.score, 0, "penalty at zero saturates");
}

#[test]
fn double_click_resolves_once() {
    let mut s = started(Difficulty::Normal, 11);
    let id = loop {
        if let Some(id) = first_unresolved(&s, DropKind::Good) {
            break id;
        }
        s = tick_one_interval(s);
    };
    let s = s.reduce(RoundAction::ClickDrop { id });
    assert_eq!(s.score, 1);
    let s2 = s.clone().reduce(RoundAction::ClickDrop { id });
    assert!(Rc::ptr_eq(&s, &s2));
    assert_eq!(s2.score, 1);
}

#[test]
fn unclicked_drop_expires_silently() {
    let mut s = started(Difficulty::Normal, 5);
    s = tick_one_interval(s);
    assert_eq!(s.drops.len(), 1);
    let id = s.drops[0].id;
    let lifetime = s.drops[0].lifetime_ms;
    // Age it past its lifetime; later spawns are irrelevant here.
    let mut remaining = lifetime;
    while remaining > 0 {
        let dt = remaining.min(s.config.spawn_interval_ms);
        s = s.reduce(RoundAction::SimTick { dt_ms: dt });
        remaining -= dt;
    }
    assert!(s.drops.iter().all(|d| d.id != id), "expired drop is swept");
    assert_eq!(s.score, 0);
    // A stale click for the expired drop resolves to nothing.
    let s2 = s.clone().reduce(RoundAction::ClickDrop { id });
    assert!(Rc::ptr_eq(&s, &s2));
}

#[test]
fn clicks_ignored_after_round_end() {
    let mut s = started(Difficulty::Normal, 5);
    s = tick_one_interval(s);
    let id = s.drops[0].id;
    s = run_out_clock(s);
    let s2 = s.clone().reduce(RoundAction::ClickDrop { id });
    assert!(Rc::ptr_eq(&s, &s2));
}

// ---- Milestones ----

#[test]
fn milestones_fire_once_in_ascending_order() {
    let mut s = started(Difficulty::Normal, 21);
    let mut fired: Vec<&'static str> = Vec::new();
    for _ in 0..10_000 {
        if s.score >= 20 {
            break;
        }
        if let Some(id) = first_unresolved(&s, DropKind::Good) {
            let before = s.toasts.len();
            s = s.reduce(RoundAction::ClickDrop { id });
            for t in s.toasts.iter().skip(before) {
                fired.push(t.message);
            }
        } else {
            s = tick_one_interval(s);
        }
    }
    assert_eq!(s.score, 20);
    let expected: Vec<&'static str> = MILESTONES
        .iter()
        .filter(|m| m.threshold <= 20)
        .map(|m| m.message)
        .collect();
    assert_eq!(expected.len(), 5);
    assert_eq!(fired, expected, "each milestone exactly once, ascending");
}

#[test]
fn milestone_not_rearmed_after_penalty() {
    // Reach the first threshold, fall back below it, climb again: the
    // notification must not repeat.
    let mut s = started(Difficulty::Hard, 13);
    s = catch_goods(s, 1);
    assert!(s.shown_milestones[0]);
    let bad = loop {
        if let Some(id) = first_unresolved(&s, DropKind::Bad) {
            break id;
        }
        s = tick_one_interval(s);
    };
    s = s.reduce(RoundAction::ClickDrop { id: bad });
    assert_eq!(s.score, 0);
    let toasts_before = s.toasts.len();
    s = catch_goods(s, 1);
    assert_eq!(s.score, 1);
    assert!(
        s.toasts.len() <= toasts_before,
        "re-crossing a shown threshold fires nothing"
    );
}

// ---- End-of-round resolver ----

#[test]
fn reaching_target_wins() {
    let s = catch_goods(started(Difficulty::Normal, 17), 20);
    let s = run_out_clock(s);
    let outcome = s.outcome.expect("round must resolve");
    assert!(outcome.won);
    assert_eq!(outcome.score, 20);
    assert!(!s.confetti.is_empty());
    assert!(crate::model::WATER_FACTS.contains(&outcome.fact));
}

#[test]
fn one_below_target_loses() {
    let s = catch_goods(started(Difficulty::Normal, 17), 19);
    let s = run_out_clock(s);
    let outcome = s.outcome.expect("round must resolve");
    assert!(!outcome.won);
    assert_eq!(outcome.score, 19);
    assert!(s.confetti.is_empty());
}

#[test]
fn play_again_restarts_cleanly() {
    let s = run_out_clock(started(Difficulty::Normal, 17));
    let s = s.reduce(RoundAction::Reset).reduce(RoundAction::Start);
    assert_eq!(s.phase, Phase::Running);
    assert_eq!(s.score, 0);
    assert_eq!(s.time_left_secs, s.config.time_secs);
    assert!(s.outcome.is_none());
}

// ---- Determinism ----

#[test]
fn same_seed_same_round() {
    let mut a = started(Difficulty::Normal, 12345);
    let mut b = started(Difficulty::Normal, 12345);
    for step in 0..200u32 {
        a = a.reduce(RoundAction::SimTick { dt_ms: 50 });
        b = b.reduce(RoundAction::SimTick { dt_ms: 50 });
        if step % 7 == 0 {
            if let Some(id) = first_unresolved(&a, DropKind::Good) {
                a = a.reduce(RoundAction::ClickDrop { id });
                b = b.reduce(RoundAction::ClickDrop { id });
            }
        }
    }
    assert_eq!(a.score, b.score);
    assert_eq!(a.drops, b.drops);
    assert_eq!(a.particles, b.particles);
    assert_eq!(a.toasts, b.toasts);
    assert_eq!(a.cues, b.cues);
}

#[test]
fn different_seeds_diverge() {
    let mut a = started(Difficulty::Normal, 111);
    let mut b = started(Difficulty::Normal, 222);
    let mut kinds_a = Vec::new();
    let mut kinds_b = Vec::new();
    for _ in 0..60 {
        a = tick_one_interval(a);
        b = tick_one_interval(b);
    }
    for d in a.drops.iter() {
        kinds_a.push((d.kind, d.x_px.round() as i64));
    }
    for d in b.drops.iter() {
        kinds_b.push((d.kind, d.x_px.round() as i64));
    }
    assert_ne!(kinds_a, kinds_b, "different seeds should diverge");
}
