//! Carrot Toss - run simulation engine for a spinning-basket arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (basket rotation, flights, scoring)
//! - `tuning`: Data-driven game balance
//! - `progress`: Durable player progress (coins, best score, skins)
//! - `settings`: Audio/haptics preferences
//!
//! The engine owns all mutable gameplay state for one play session. The host
//! drives it with `tick(delta_ms)` on a fixed cadence, sends discrete intents
//! (throw, pause, resume, retry), reads the state snapshot each frame, and
//! drains gameplay events for audio/haptics. Rendering, playback, and storage
//! live outside this crate.

pub mod progress;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use progress::{PlayerProgress, Skin};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Intended tick cadence (~60 Hz)
    pub const TICK_MS: i64 = 16;

    /// World-space angle of the collection slot (degrees)
    pub const TARGET_ANGLE: f32 = 90.0;
    /// Hazard collision arc half-width (degrees)
    pub const COLLISION_THRESHOLD: f32 = 5.0;
    /// Pickup collection arc half-width. Double the hazard window on purpose:
    /// pickups are easier to hit than hazards are to avoid.
    pub const PICKUP_THRESHOLD: f32 = COLLISION_THRESHOLD * 2.0;

    /// Carrot travel time from launch to impact
    pub const FLIGHT_DURATION_MS: i64 = 110;
    /// Deflection animation time before a bounced carrot falls
    pub const BOUNCE_DURATION_MS: i64 = 420;

    /// Basket rotation defaults (degrees/second)
    pub const NOMINAL_SPEED: f32 = 55.0;
    /// Smallest rotation magnitude the basket ever settles at
    pub const MIN_SPEED: f32 = 12.0;
    pub const MAX_SPEED: f32 = 140.0;
    /// Exponential approach factor toward the target speed, per tick
    pub const SPEED_SMOOTHING: f32 = 0.05;
    /// Difficulty ramp added to rotation magnitude per successful pin
    pub const SPEED_RAMP: f32 = 3.0;
    /// Target-speed re-roll interval bounds
    pub const SPEED_CHANGE_MIN_MS: i64 = 1500;
    pub const SPEED_CHANGE_MAX_MS: i64 = 3000;

    /// Obstacle generation
    pub const MAX_STICKS: u32 = 3;
    /// Minimum angular spacing between sticks (best effort)
    pub const STICK_SPACING: f32 = COLLISION_THRESHOLD * 1.5;
    pub const STICK_PLACEMENT_RETRIES: u32 = 10;

    /// Pickup generation
    pub const COIN_SLOTS: [f32; 4] = [30.0, 120.0, 210.0, 300.0];
    pub const BOOST_SLOTS: [f32; 2] = [60.0, 240.0];
    pub const BOOST_CHANCE: f64 = 0.5;

    /// Scoring
    pub const COIN_VALUE: u32 = 5;
    /// Coin bonus on every score that is a multiple of this
    pub const COIN_BONUS_PERIOD: u32 = 5;
    pub const BOOST_DURATION_MS: i64 = 5000;
    /// floor(360 / COLLISION_THRESHOLD * 0.75)
    pub const BASE_TARGET_SCORE: u32 = 54;
    /// Target score reduction per placed obstacle stick
    pub const STICK_SCORE_PENALTY: u32 = 8;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_deg(angle: f32) -> f32 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// Shortest circular arc between two angles, in [0, 180]
#[inline]
pub fn circular_distance(a: f32, b: f32) -> f32 {
    let diff = (normalize_deg(a) - normalize_deg(b)).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Convert polar (r, degrees) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, deg: f32) -> Vec2 {
    let theta = deg.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_deg_basics() {
        assert_eq!(normalize_deg(0.0), 0.0);
        assert_eq!(normalize_deg(360.0), 0.0);
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(450.0), 90.0);
    }

    #[test]
    fn test_circular_distance_wraps() {
        assert_eq!(circular_distance(10.0, 350.0), 20.0);
        assert_eq!(circular_distance(0.0, 180.0), 180.0);
        assert_eq!(circular_distance(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(1.0, 90.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_normalize_in_range(a in -3600.0f32..3600.0) {
            let n = normalize_deg(a);
            prop_assert!((0.0..360.0).contains(&n));
        }

        #[test]
        fn prop_normalize_idempotent(a in -3600.0f32..3600.0) {
            let n = normalize_deg(a);
            prop_assert!((normalize_deg(n) - n).abs() < 1e-3);
        }

        #[test]
        fn prop_distance_symmetric(a in 0.0f32..360.0, b in 0.0f32..360.0) {
            let d1 = circular_distance(a, b);
            let d2 = circular_distance(b, a);
            prop_assert!((d1 - d2).abs() < 1e-3);
            prop_assert!((0.0..=180.0).contains(&d1));
        }

        #[test]
        fn prop_distance_to_self_zero(a in 0.0f32..360.0) {
            prop_assert!(circular_distance(a, a) < 1e-3);
        }
    }
}
