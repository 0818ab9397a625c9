//! Data-driven game balance
//!
//! Every balance knob the simulation reads lives here, so a sibling game
//! variant is a different `Tuning` value rather than a different engine.
//! Defaults match the shipped carrot-toss balance in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Score threshold -> multiplier step. Checked highest threshold first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierTier {
    pub min_score: u32,
    pub multiplier: u32,
}

/// Balance knobs for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// World-space angle of the collection slot (degrees)
    pub target_angle: f32,
    /// Hazard collision arc half-width (degrees)
    pub collision_threshold: f32,
    /// Pickup collection arc half-width (degrees)
    pub pickup_threshold: f32,

    /// Carrot travel time from launch to impact
    pub flight_duration_ms: i64,
    /// Deflection time before a bounced carrot falls
    pub bounce_duration_ms: i64,

    /// Rotation speeds, degrees/second
    pub nominal_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_smoothing: f32,
    pub speed_ramp: f32,
    pub speed_change_min_ms: i64,
    pub speed_change_max_ms: i64,

    /// Obstacle generation
    pub max_sticks: u32,
    pub stick_spacing: f32,

    /// Pickup generation
    pub coin_slots: Vec<f32>,
    pub boost_slots: Vec<f32>,
    pub boost_chance: f64,

    /// Scoring
    pub coin_value: u32,
    pub coin_bonus_period: u32,
    pub boost_duration_ms: i64,
    pub base_target_score: u32,
    pub stick_score_penalty: u32,
    pub multiplier_tiers: Vec<MultiplierTier>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            target_angle: TARGET_ANGLE,
            collision_threshold: COLLISION_THRESHOLD,
            pickup_threshold: PICKUP_THRESHOLD,
            flight_duration_ms: FLIGHT_DURATION_MS,
            bounce_duration_ms: BOUNCE_DURATION_MS,
            nominal_speed: NOMINAL_SPEED,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            speed_smoothing: SPEED_SMOOTHING,
            speed_ramp: SPEED_RAMP,
            speed_change_min_ms: SPEED_CHANGE_MIN_MS,
            speed_change_max_ms: SPEED_CHANGE_MAX_MS,
            max_sticks: MAX_STICKS,
            stick_spacing: STICK_SPACING,
            coin_slots: COIN_SLOTS.to_vec(),
            boost_slots: BOOST_SLOTS.to_vec(),
            boost_chance: BOOST_CHANCE,
            coin_value: COIN_VALUE,
            coin_bonus_period: COIN_BONUS_PERIOD,
            boost_duration_ms: BOOST_DURATION_MS,
            base_target_score: BASE_TARGET_SCORE,
            stick_score_penalty: STICK_SCORE_PENALTY,
            multiplier_tiers: vec![
                MultiplierTier { min_score: 40, multiplier: 6 },
                MultiplierTier { min_score: 24, multiplier: 3 },
                MultiplierTier { min_score: 12, multiplier: 2 },
            ],
        }
    }
}

impl Tuning {
    /// Multiplier step earned at the given score
    pub fn gained_multiplier(&self, score: u32) -> u32 {
        self.multiplier_tiers
            .iter()
            .filter(|tier| score >= tier.min_score)
            .map(|tier| tier.multiplier)
            .max()
            .unwrap_or(1)
    }

    /// Run target for a layout with the given obstacle stick count
    pub fn target_score_for(&self, stick_count: u32) -> u32 {
        self.base_target_score
            .saturating_sub(stick_count * self.stick_score_penalty)
            .max(1)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
