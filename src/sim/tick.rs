//! Fixed timestep simulation tick
//!
//! Core loop that advances the run deterministically: speed variation,
//! rotation smoothing, boost countdown, and flight progression. Impact
//! resolution lives here too because both the tick timeout and the host's
//! animation-finished callback funnel into it.

use rand::Rng;

use super::state::{ActiveBoost, Flight, GameEvent, GamePhase, ItemKind, Pin, RunState};
use crate::{circular_distance, normalize_deg};

/// Advance the run by `delta_ms`. No-op unless running; non-positive and
/// out-of-order deltas are defensively ignored.
pub fn tick(state: &mut RunState, delta_ms: i64) {
    if delta_ms <= 0 || state.phase != GamePhase::Running {
        return;
    }
    let dt = delta_ms as f32 / 1000.0;

    // Periodic target-speed re-roll keeps the rotation unpredictable
    state.speed_change_ms -= delta_ms;
    if state.speed_change_ms <= 0 {
        reroll_target_speed(state);
        state.speed_change_ms = roll_speed_change_interval(state);
    }

    // Exponential approach toward the target, never an instant snap
    let basket = &mut state.basket;
    basket.speed += (basket.target_speed - basket.speed) * state.tuning.speed_smoothing;
    basket.speed = basket.speed.clamp(-state.tuning.max_speed, state.tuning.max_speed);
    basket.angle = normalize_deg(basket.angle + basket.speed * dt);

    if let Some(boost) = &mut state.active_boost {
        boost.remaining_ms -= delta_ms;
        if boost.remaining_ms <= 0 {
            log::debug!("boost x{} expired", boost.multiplier);
            state.active_boost = None;
        }
    }

    let Some(mut flight) = state.flight else {
        return;
    };
    flight.elapsed_ms += delta_ms;

    if flight.bouncing {
        if flight.elapsed_ms >= state.tuning.bounce_duration_ms {
            // Deflection played out; the bounced carrot falls
            state.flight = None;
            finalize_loss(state);
        } else {
            state.flight = Some(flight);
        }
    } else if flight.elapsed_ms >= state.tuning.flight_duration_ms {
        state.flight = Some(flight);
        resolve_impact(state);
    } else {
        state.flight = Some(flight);
    }
}

/// Draw the next interval until the basket's target speed changes
pub(crate) fn roll_speed_change_interval(state: &mut RunState) -> i64 {
    let min = state.tuning.speed_change_min_ms;
    let max = state.tuning.speed_change_max_ms;
    state.rng.random_range(min..max)
}

/// Weighted re-roll: 10% crawl, 15% reverse at 70%, 15% surge to 160%,
/// 60% back to cruising speed. Magnitude always lands in
/// [min_speed, max_speed] so the basket never fully stops.
fn reroll_target_speed(state: &mut RunState) {
    let min_speed = state.tuning.min_speed;
    let max_speed = state.tuning.max_speed;
    let nominal = state.tuning.nominal_speed;

    let magnitude = state.basket.speed.abs().max(min_speed);
    let dir = if state.basket.speed < 0.0 { -1.0 } else { 1.0 };

    let roll = state.rng.random_range(0..100u32);
    let target = if roll < 10 {
        dir * min_speed
    } else if roll < 25 {
        -dir * magnitude * 0.7
    } else if roll < 40 {
        dir * magnitude * 1.6
    } else {
        dir * nominal
    };

    state.basket.target_speed = clamp_speed(target, min_speed, max_speed);
    log::debug!(
        "speed re-roll: {:.1} -> {:.1} deg/s",
        state.basket.speed,
        state.basket.target_speed
    );
}

/// Clamp a signed speed so its magnitude stays within [min, max]
fn clamp_speed(speed: f32, min: f32, max: f32) -> f32 {
    let magnitude = speed.abs().clamp(min, max);
    if speed < 0.0 { -magnitude } else { magnitude }
}

/// Resolve the airborne carrot against the basket. Reached from the tick
/// timeout and from the host's flight-animation callback; the flight guard
/// makes the two paths resolve exactly once.
pub fn resolve_impact(state: &mut RunState) {
    if state.phase != GamePhase::Running {
        return;
    }
    let Some(flight) = state.flight else {
        return;
    };
    if flight.bouncing {
        return;
    }

    let target_angle = state.tuning.target_angle;
    let basket_angle = state.basket.angle;
    let pinned_angle = normalize_deg(target_angle - basket_angle);

    // Pickups first, in stored order, with the wider collection window
    let pickup_threshold = state.tuning.pickup_threshold;
    let hit = state.orbiting_items.iter().position(|item| {
        circular_distance(state.basket.world_angle(item.angle), target_angle) < pickup_threshold
    });
    if let Some(idx) = hit {
        let item = state.orbiting_items.remove(idx);
        // The carrot is consumed either way
        state.pins.push(Pin { angle: pinned_angle });
        match item.kind {
            ItemKind::Coin => {
                state.coins += state.tuning.coin_value;
                state.push_event(GameEvent::CoinCollected);
            }
            ItemKind::BoostX2 => install_boost(state, 2),
            ItemKind::BoostX5 => install_boost(state, 5),
        }
        state.flight = None;
        return;
    }

    // Existing carrots and obstacle sticks share the narrow hazard window.
    // A hit switches into the bounce animation; the loss lands when the
    // bounce timer elapses in `tick`.
    let collision_threshold = state.tuning.collision_threshold;
    let collided = state
        .pins
        .iter()
        .chain(state.obstacle_sticks.iter())
        .any(|pin| {
            circular_distance(state.basket.world_angle(pin.angle), target_angle)
                < collision_threshold
        });
    if collided {
        state.flight = Some(Flight {
            bouncing: true,
            elapsed_ms: 0,
            ..flight
        });
        return;
    }

    // Clean landing
    state.pins.push(Pin { angle: pinned_angle });
    let gained = state.tuning.gained_multiplier(state.score);
    state.multiplier = state.multiplier.max(gained);
    let boost = state.active_boost.map(|b| b.multiplier).unwrap_or(1);
    let step = state.multiplier * boost;
    state.score += step;
    if state.score % state.tuning.coin_bonus_period == 0 {
        state.coins += step;
    }
    // Difficulty ramp: each landing spins the basket a little faster
    let ramped = state.basket.speed.abs() + state.tuning.speed_ramp;
    let dir = if state.basket.speed < 0.0 { -1.0 } else { 1.0 };
    state.basket.speed = dir * ramped.min(state.tuning.max_speed);
    state.push_event(GameEvent::CoinCollected);
    state.flight = None;

    if state.score >= state.target_score {
        finalize_win(state);
    }
}

fn install_boost(state: &mut RunState, multiplier: u32) {
    let duration = state.tuning.boost_duration_ms;
    // No stacking: a fresh boost replaces whatever was running
    state.active_boost = Some(ActiveBoost {
        multiplier,
        remaining_ms: duration,
        total_ms: duration,
    });
    state.push_event(GameEvent::BoostCollected);
}

fn finalize_win(state: &mut RunState) {
    log::info!(
        "run won: score {} / target {}, {} coins",
        state.score,
        state.target_score,
        state.coins
    );
    state.phase = GamePhase::Won;
    state.flight = None;
    state.push_event(GameEvent::GameWin);
}

fn finalize_loss(state: &mut RunState) {
    log::info!(
        "run lost: score {} / target {}, {} coins",
        state.score,
        state.target_score,
        state.coins
    );
    state.phase = GamePhase::Lost;
    state.push_event(GameEvent::GameOver);
}
