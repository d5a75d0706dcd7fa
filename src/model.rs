//! Core game model for Drop Catch.
//! Round lifecycle, spawning, scoring and feedback effects all live in one
//! reducer so the whole game is drivable (and testable) without a browser.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Base drop diameter in px before the random size multiplier.
pub const DROP_BASE_SIZE_PX: f64 = 60.0;
/// How long a resolved drop lingers so its pop animation can play.
pub const DROP_POP_MS: f64 = 700.0;
/// Particles spawned per good click.
pub const BURST_PARTICLE_COUNT: usize = 8;
/// Confetti pieces spawned on a win.
pub const CONFETTI_COUNT: usize = 40;

const TOAST_TTL_MS: f64 = 2200.0;
const PARTICLE_TTL_MS: f64 = 800.0;
const CONFETTI_TTL_MS: f64 = 1500.0;

/// Palette for click-burst particles (brand colors).
pub const PARTICLE_COLORS: &[&str] = &["#FFC907", "#2E9DF7", "#8BD1CB", "#4FCB53", "#FF902A"];

/// Wider palette for win confetti.
pub const CONFETTI_COLORS: &[&str] = &[
    "#FFC907", "#2E9DF7", "#8BD1CB", "#4FCB53", "#FF902A", "#F5402C", "#159A48", "#F16061",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_key(key: &str) -> Option<Difficulty> {
        Difficulty::ALL.into_iter().find(|d| d.key() == key)
    }

    /// Round parameters for this difficulty. Values match the original game.
    pub fn config(self) -> RoundConfig {
        match self {
            Difficulty::Easy => RoundConfig {
                target: 10,
                time_secs: 45,
                spawn_interval_ms: 800,
                fall_duration_ms: 4500,
                bad_chance: 0.12,
            },
            Difficulty::Normal => RoundConfig {
                target: 20,
                time_secs: 30,
                spawn_interval_ms: 500,
                fall_duration_ms: 4000,
                bad_chance: 0.25,
            },
            Difficulty::Hard => RoundConfig {
                target: 30,
                time_secs: 20,
                spawn_interval_ms: 300,
                fall_duration_ms: 3200,
                bad_chance: 0.35,
            },
        }
    }
}

/// Immutable per-round parameters, selected by difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RoundConfig {
    pub target: u32,
    pub time_secs: u32,
    pub spawn_interval_ms: u32,
    pub fall_duration_ms: u32,
    pub bad_chance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropKind {
    Good,
    Bad,
}

/// A single falling drop. Ages via sim ticks; the view derives its fall
/// position from `progress()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropSpec {
    pub id: u64,
    pub kind: DropKind,
    /// Diameter in px.
    pub size_px: f64,
    /// Left edge in px within the arena.
    pub x_px: f64,
    /// Fall time from above the arena to below it.
    pub lifetime_ms: u32,
    pub age_ms: f64,
    /// Set on first click; later clicks are no-ops.
    pub resolved: bool,
    /// Remaining pop-animation time once resolved.
    pub pop_ms_left: f64,
}

impl DropSpec {
    /// Fall progress in [0, 1].
    pub fn progress(&self) -> f64 {
        (self.age_ms / self.lifetime_ms as f64).clamp(0.0, 1.0)
    }

    /// Top edge in px: enters fully above the arena, leaves fully below.
    pub fn top_px(&self, arena_height: f64) -> f64 {
        self.progress() * (arena_height + self.size_px) - self.size_px
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub color: &'static str,
    pub ttl_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Confetti {
    pub x: f64,
    pub y: f64,
    pub drift_x: f64,
    pub fall_speed: f64,
    pub color: &'static str,
    pub ttl_ms: f64,
}

/// One-time score notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Toast {
    pub message: &'static str,
    pub ttl_ms: f64,
}

/// Score thresholds for one-time toasts. Keep ascending.
pub struct Milestone {
    pub threshold: u32,
    pub message: &'static str,
}

pub const MILESTONES: &[Milestone] = &[
    Milestone {
        threshold: 1,
        message: "First drop caught!",
    },
    Milestone {
        threshold: 5,
        message: "5 drops — keep going!",
    },
    Milestone {
        threshold: 10,
        message: "10 drops! You're on a roll",
    },
    Milestone {
        threshold: 15,
        message: "15 drops — unstoppable!",
    },
    Milestone {
        threshold: 20,
        message: "20 drops! Amazing catch",
    },
    Milestone {
        threshold: 30,
        message: "30 drops — legendary!",
    },
];

/// Shown with the end-of-round message, picked uniformly at random.
pub const WATER_FACTS: &[&str] = &[
    "771 million people lack access to clean water.",
    "Every $1 invested in clean water can yield $4-$12 in economic returns.",
    "Women and girls spend 200 million hours every day collecting water.",
    "Access to clean water can improve school attendance, especially for girls.",
    "Diseases from dirty water kill more people every year than all forms of violence.",
    "Clean water projects can give families hours back every single day.",
];

/// Named audio cues emitted by the reducer and played by the view layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Start,
    Success,
    Fail,
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub won: bool,
    pub score: u32,
    pub fact: &'static str,
}

/// Whole game state, owned by a single `use_reducer` handle and mutated only
/// through `RoundAction`s.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub difficulty: Difficulty,
    pub config: RoundConfig,
    pub phase: Phase,
    pub score: u32,
    pub time_left_secs: u32,
    pub drops: Vec<DropSpec>,
    pub particles: Vec<Particle>,
    pub confetti: Vec<Confetti>,
    pub toasts: Vec<Toast>,
    /// Parallel to `MILESTONES`; true once the toast has fired this round.
    pub shown_milestones: Vec<bool>,
    pub outcome: Option<RoundOutcome>,
    /// Recent audio cues tagged with a monotonically increasing sequence
    /// number; the view tracks the last sequence it played.
    pub cues: Vec<(u64, Cue)>,
    pub arena_width: f64,
    pub arena_height: f64,
    /// Bumped on every start/reset; drop ids never repeat across rounds, so
    /// callbacks left over from a previous round resolve to nothing.
    pub generation: u64,
    /// Bumped on every state change; backs PartialEq and effect deps.
    pub version: u64,
    spawn_accum_ms: f64,
    next_drop_id: u64,
    cue_seq: u64,
    rng: ChaCha8Rng,
}

// Equality is only used for prop diffing; the version counter is bumped on
// every reduce that changes anything.
impl PartialEq for RoundState {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.generation == other.generation
    }
}

impl RoundState {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let config = difficulty.config();
        Self {
            difficulty,
            config,
            phase: Phase::Idle,
            score: 0,
            time_left_secs: config.time_secs,
            drops: Vec::new(),
            particles: Vec::new(),
            confetti: Vec::new(),
            toasts: Vec::new(),
            shown_milestones: vec![false; MILESTONES.len()],
            outcome: None,
            cues: Vec::new(),
            arena_width: 0.0,
            arena_height: 0.0,
            generation: 0,
            version: 0,
            spawn_accum_ms: 0.0,
            next_drop_id: 0,
            cue_seq: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// True while any transient effect still needs animating.
    fn has_live_fx(&self) -> bool {
        !self.particles.is_empty()
            || !self.confetti.is_empty()
            || !self.toasts.is_empty()
            || !self.drops.is_empty()
    }

    fn push_cue(&mut self, cue: Cue) {
        self.cue_seq += 1;
        self.cues.push((self.cue_seq, cue));
        // Keep the queue short; the view only cares about unseen entries.
        if self.cues.len() > 8 {
            let excess = self.cues.len() - 8;
            self.cues.drain(..excess);
        }
    }
}

// ---------------- Reducer & Actions -----------------

#[derive(Clone, Debug, PartialEq)]
pub enum RoundAction {
    /// Rejected while a round is running.
    SetDifficulty(Difficulty),
    Start,
    Reset,
    /// Once per second while running.
    CountdownTick,
    /// Spawning, drop aging and effect motion; ~50ms cadence.
    SimTick { dt_ms: u32 },
    ClickDrop { id: u64 },
    SetArenaSize { width: f64, height: f64 },
}

impl Reducible for RoundState {
    type Action = RoundAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use RoundAction::*;
        let mut new = (*self).clone();
        match action {
            SetDifficulty(d) => {
                // Mid-round difficulty changes are rejected.
                if new.phase == Phase::Running || new.difficulty == d {
                    return self;
                }
                new.difficulty = d;
                new.config = d.config();
                new.time_left_secs = new.config.time_secs;
            }
            Start => {
                if new.phase == Phase::Running {
                    return self;
                }
                begin_round(&mut new);
            }
            Reset => {
                clear_round(&mut new);
            }
            CountdownTick => {
                if new.phase != Phase::Running {
                    return self;
                }
                new.time_left_secs = new.time_left_secs.saturating_sub(1);
                if new.time_left_secs == 0 {
                    end_round(&mut new);
                }
            }
            SimTick { dt_ms } => {
                if new.phase != Phase::Running && !new.has_live_fx() {
                    return self;
                }
                let dt = dt_ms as f64;
                if new.phase == Phase::Running {
                    step_spawner(&mut new, dt);
                }
                step_drops(&mut new, dt);
                step_fx(&mut new, dt);
            }
            ClickDrop { id } => {
                if new.phase != Phase::Running {
                    return self;
                }
                let Some(idx) = new.drops.iter().position(|d| d.id == id) else {
                    // Already swept, or a click from a previous round.
                    return self;
                };
                if new.drops[idx].resolved {
                    return self;
                }
                resolve_click(&mut new, idx);
            }
            SetArenaSize { width, height } => {
                if new.arena_width == width && new.arena_height == height {
                    return self;
                }
                new.arena_width = width;
                new.arena_height = height;
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

fn begin_round(new: &mut RoundState) {
    new.generation += 1;
    new.phase = Phase::Running;
    new.score = 0;
    new.time_left_secs = new.config.time_secs;
    new.drops.clear();
    new.particles.clear();
    new.confetti.clear();
    new.toasts.clear();
    new.shown_milestones = vec![false; MILESTONES.len()];
    new.outcome = None;
    new.spawn_accum_ms = 0.0;
    new.push_cue(Cue::Start);
}

fn clear_round(new: &mut RoundState) {
    new.generation += 1;
    new.phase = Phase::Idle;
    new.score = 0;
    new.time_left_secs = new.config.time_secs;
    new.drops.clear();
    new.particles.clear();
    new.confetti.clear();
    new.toasts.clear();
    new.shown_milestones = vec![false; MILESTONES.len()];
    new.outcome = None;
    new.spawn_accum_ms = 0.0;
}

/// Only reachable from Running; evaluates the win condition and stops the
/// round. Pending drops are discarded so a stale spawn or click does nothing.
fn end_round(new: &mut RoundState) {
    new.phase = Phase::Ended;
    new.drops.clear();
    new.spawn_accum_ms = 0.0;
    let won = new.score >= new.config.target;
    let fact = WATER_FACTS[new.rng.gen_range(0..WATER_FACTS.len())];
    new.outcome = Some(RoundOutcome {
        won,
        score: new.score,
        fact,
    });
    if won {
        spawn_confetti(new);
        new.push_cue(Cue::Win);
    } else {
        new.push_cue(Cue::Lose);
    }
}

/// Fixed-cadence spawner: one drop per elapsed spawn interval. A large dt
/// spawns several; an interval fire after the round ended spawns none (the
/// caller checks the phase).
fn step_spawner(new: &mut RoundState, dt: f64) {
    new.spawn_accum_ms += dt;
    let interval = new.config.spawn_interval_ms as f64;
    while new.spawn_accum_ms >= interval {
        new.spawn_accum_ms -= interval;
        spawn_drop(new);
    }
}

fn spawn_drop(new: &mut RoundState) {
    let kind = if new.rng.gen_bool(new.config.bad_chance) {
        DropKind::Bad
    } else {
        DropKind::Good
    };
    let size = DROP_BASE_SIZE_PX * new.rng.gen_range(0.5..1.3);
    let span = (new.arena_width - size).max(0.0);
    let x = if span > 0.0 {
        new.rng.gen_range(0.0..span)
    } else {
        0.0
    };
    let id = new.next_drop_id;
    new.next_drop_id += 1;
    new.drops.push(DropSpec {
        id,
        kind,
        size_px: size,
        x_px: x,
        lifetime_ms: new.config.fall_duration_ms,
        age_ms: 0.0,
        resolved: false,
        pop_ms_left: 0.0,
    });
}

/// Age unresolved drops; sweep expired ones (no score change) and resolved
/// ones whose pop animation finished.
fn step_drops(new: &mut RoundState, dt: f64) {
    for d in &mut new.drops {
        if d.resolved {
            d.pop_ms_left -= dt;
        } else {
            d.age_ms += dt;
        }
    }
    new.drops.retain(|d| {
        if d.resolved {
            d.pop_ms_left > 0.0
        } else {
            d.age_ms < d.lifetime_ms as f64
        }
    });
}

fn step_fx(new: &mut RoundState, dt: f64) {
    let dt_s = dt / 1000.0;
    for p in &mut new.particles {
        p.x += p.dx * dt_s;
        p.y += p.dy * dt_s;
        p.ttl_ms -= dt;
    }
    new.particles.retain(|p| p.ttl_ms > 0.0);
    for c in &mut new.confetti {
        c.x += c.drift_x * dt_s;
        c.y += c.fall_speed * dt_s;
        c.ttl_ms -= dt;
    }
    new.confetti.retain(|c| c.ttl_ms > 0.0);
    for t in &mut new.toasts {
        t.ttl_ms -= dt;
    }
    new.toasts.retain(|t| t.ttl_ms > 0.0);
}

fn resolve_click(new: &mut RoundState, idx: usize) {
    let drop = new.drops[idx];
    new.drops[idx].resolved = true;
    new.drops[idx].pop_ms_left = DROP_POP_MS;
    match drop.kind {
        DropKind::Bad => {
            new.score = new.score.saturating_sub(1);
            new.push_cue(Cue::Fail);
        }
        DropKind::Good => {
            new.score += 1;
            new.push_cue(Cue::Success);
            let cx = drop.x_px + drop.size_px / 2.0;
            let cy = drop.top_px(new.arena_height) + drop.size_px / 2.0;
            spawn_burst(new, cx, cy);
            // Milestones only re-check on the score-increase path; a bad-drop
            // penalty never re-arms a threshold already shown.
            check_milestones(new);
        }
    }
}

fn check_milestones(new: &mut RoundState) {
    for (i, m) in MILESTONES.iter().enumerate() {
        if !new.shown_milestones[i] && new.score >= m.threshold {
            new.shown_milestones[i] = true;
            new.toasts.push(Toast {
                message: m.message,
                ttl_ms: TOAST_TTL_MS,
            });
        }
    }
}

fn spawn_burst(new: &mut RoundState, cx: f64, cy: f64) {
    for _ in 0..BURST_PARTICLE_COUNT {
        let angle = new.rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = new.rng.gen_range(30.0..75.0);
        let color = PARTICLE_COLORS[new.rng.gen_range(0..PARTICLE_COLORS.len())];
        new.particles.push(Particle {
            x: cx + new.rng.gen_range(-4.0..4.0),
            y: cy + new.rng.gen_range(-4.0..4.0),
            dx: angle.cos() * speed,
            dy: -angle.sin() * speed,
            color,
            ttl_ms: PARTICLE_TTL_MS,
        });
    }
}

fn spawn_confetti(new: &mut RoundState) {
    let span = (new.arena_width - 12.0).max(1.0);
    for _ in 0..CONFETTI_COUNT {
        let color = CONFETTI_COLORS[new.rng.gen_range(0..CONFETTI_COLORS.len())];
        new.confetti.push(Confetti {
            x: new.rng.gen_range(0.0..span),
            y: -30.0,
            drift_x: new.rng.gen_range(-20.0..20.0),
            fall_speed: new.rng.gen_range(140.0..320.0),
            color,
            ttl_ms: CONFETTI_TTL_MS,
        });
    }
}
