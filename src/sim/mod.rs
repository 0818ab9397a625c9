//! Deterministic run simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies
//!
//! The host owns the cadence and the intent queue; the engine is a
//! single-writer state machine with no internal concurrency.

pub mod level;
pub mod state;
pub mod tick;

pub use level::{Layout, generate};
pub use state::{
    ActiveBoost, Basket, Flight, GameEvent, GamePhase, ItemKind, OrbitingItem, Pin, RunResult,
    RunState,
};
pub use tick::{resolve_impact, tick};
