//! Run state and core simulation types
//!
//! One `RunState` instance owns all mutable gameplay state for a single play
//! session. The host is the single writer: it calls `tick` on a fixed cadence
//! and the intent methods (`throw`, `pause`, `resume`, `retry`) from the same
//! logical queue. Nothing here blocks, suspends, or touches the platform.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level;
use crate::normalize_deg;
use crate::progress::Skin;
use crate::tuning::Tuning;

/// Current phase of a run
///
/// `Intro -> Running <-> Paused -> Won | Lost`. The terminal phases only
/// leave via `retry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the intro overlay, nothing simulates
    Intro,
    /// Active gameplay
    Running,
    /// Frozen mid-run; an airborne flight keeps its elapsed time
    Paused,
    /// Run ended by reaching the target score
    Won,
    /// Run ended by a bounced carrot
    Lost,
}

impl GamePhase {
    #[inline]
    pub fn is_running(self) -> bool {
        self == GamePhase::Running
    }

    #[inline]
    pub fn is_game_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }

    #[inline]
    pub fn is_win(self) -> bool {
        self == GamePhase::Won
    }

    #[inline]
    pub fn show_intro(self) -> bool {
        self == GamePhase::Intro
    }
}

/// Pickup kinds riding the basket rim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    BoostX2,
    BoostX5,
}

/// A carrot pinned to the basket, or a permanent obstacle stick.
/// The angle is basket-relative; world angle = `angle + basket.angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub angle: f32,
}

/// A transient coin or boost pickup riding the basket rim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitingItem {
    /// Unique within a run
    pub id: u32,
    /// Basket-relative, like `Pin`
    pub angle: f32,
    pub kind: ItemKind,
}

/// Score multiplier from a collected boost. At most one active; a newly
/// collected boost overwrites the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBoost {
    pub multiplier: u32,
    pub remaining_ms: i64,
    pub total_ms: i64,
}

/// The in-air carrot between launch and resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    /// Monotonically increasing; also restarts flight-bound animations
    pub id: u32,
    pub elapsed_ms: i64,
    /// Set once a hazard collision forces the deflection animation
    pub bouncing: bool,
}

/// The rotating turntable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basket {
    /// Degrees, normalized to [0, 360)
    pub angle: f32,
    /// Signed degrees/second; sign is direction
    pub speed: f32,
    /// Speed the engine smoothly interpolates toward
    pub target_speed: f32,
}

impl Basket {
    fn with_speed(speed: f32) -> Self {
        Self {
            angle: 0.0,
            speed,
            target_speed: speed,
        }
    }

    /// World angle of a basket-relative offset
    #[inline]
    pub fn world_angle(&self, offset: f32) -> f32 {
        normalize_deg(offset + self.angle)
    }
}

/// Fire-and-forget gameplay notifications, drained once per frame by the
/// host and forwarded to audio/haptics. Purely observational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected,
    BoostCollected,
    GameOver,
    GameWin,
}

/// Final outcome of a run, handed to the progress collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub score: u32,
    pub coins: u32,
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Per-run RNG (level layout and speed variation)
    pub rng: Pcg32,
    /// Balance knobs for this variant
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    pub coins: u32,
    /// Non-decreasing within a run; excludes any boost factor
    pub multiplier: u32,
    /// Win threshold, computed from the generated layout
    pub target_score: u32,
    pub basket: Basket,
    /// Carrots pinned so far this run
    pub pins: Vec<Pin>,
    /// Non-scoring permanent hazards
    pub obstacle_sticks: Vec<Pin>,
    pub orbiting_items: Vec<OrbitingItem>,
    pub active_boost: Option<ActiveBoost>,
    pub flight: Option<Flight>,
    /// Cosmetic only; threaded through untouched for the renderer
    pub skin: Skin,
    /// Countdown until the next target-speed re-roll
    pub speed_change_ms: i64,
    next_throw_id: u32,
    events: Vec<GameEvent>,
}

impl RunState {
    /// Create a session in the intro phase with the default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let basket = Basket::with_speed(tuning.nominal_speed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Intro,
            score: 0,
            coins: 0,
            multiplier: 1,
            target_score: 0,
            basket,
            pins: Vec::new(),
            obstacle_sticks: Vec::new(),
            orbiting_items: Vec::new(),
            active_boost: None,
            flight: None,
            skin: Skin::default(),
            speed_change_ms: 0,
            next_throw_id: 0,
            events: Vec::new(),
        }
    }

    pub fn set_skin(&mut self, skin: Skin) {
        self.skin = skin;
    }

    /// Reset to the intro overlay, keeping skin, tuning, and RNG position
    pub fn reset_to_intro(&mut self) {
        let skin = self.skin;
        let rng = self.rng.clone();
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(self.seed, tuning);
        self.skin = skin;
        self.rng = rng;
    }

    /// Begin a fresh run: regenerate the layout and reset run-scoped fields
    pub fn start(&mut self) {
        self.begin_run();
    }

    /// Restart after a win or loss. Same reset path as `start`.
    pub fn retry(&mut self) {
        self.begin_run();
    }

    fn begin_run(&mut self) {
        let layout = level::generate(&mut self.rng, &self.tuning);
        self.obstacle_sticks = layout.obstacle_sticks;
        self.orbiting_items = layout.orbiting_items;
        self.target_score = layout.target_score;
        self.pins.clear();
        self.score = 0;
        self.coins = 0;
        self.multiplier = 1;
        self.active_boost = None;
        self.flight = None;
        self.basket = Basket::with_speed(self.tuning.nominal_speed);
        self.speed_change_ms = super::tick::roll_speed_change_interval(self);
        self.phase = GamePhase::Running;
    }

    /// Launch a carrot. Refused (returning false) while not running, while
    /// paused, after game over, or while another flight is airborne.
    pub fn throw(&mut self) -> bool {
        if self.phase != GamePhase::Running || self.flight.is_some() {
            return false;
        }
        self.next_throw_id += 1;
        self.flight = Some(Flight {
            id: self.next_throw_id,
            elapsed_ms: 0,
            bouncing: false,
        });
        true
    }

    /// Only effective while running. An airborne flight freezes implicitly
    /// because `tick` is a no-op while paused.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Final `(score, coins)` for the progress collaborator
    pub fn result(&self) -> RunResult {
        RunResult {
            score: self.score,
            coins: self.coins,
        }
    }

    /// Take all events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
