//! Speed curve
//!
//! Forward speed is a step function of distance run, capped at a maximum.
//! Distance in turn advances by the previous tick's speed, so the two feed
//! each other one tick apart.

use crate::tuning::SpeedTuning;

/// Forward speed (pixels per tick) after running `distance` metres
#[inline]
pub fn speed_at(distance: f64, tuning: &SpeedTuning) -> f32 {
    let steps = (distance / f64::from(tuning.step_distance)).floor() as f32;
    (tuning.base_speed + steps * tuning.acceleration_per_step).min(tuning.max_speed)
}

/// Advance distance by one tick at `speed`, returning the new `(distance, speed)`
#[inline]
pub fn advance(distance: f64, speed: f32, tuning: &SpeedTuning) -> (f64, f32) {
    let distance = distance + f64::from(speed) * f64::from(tuning.distance_per_pixel);
    (distance, speed_at(distance, tuning))
}
