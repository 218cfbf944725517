//! Autopilot jump timing
//!
//! A reactive per-tick heuristic that approximates a skilled player: jump
//! when the nearest obstacle comes within a speed-dependent threshold, pulling
//! the threshold in when obstacles are packed close together and at high
//! speed. The tier bounds and multipliers are tuned feel, reproduced exactly
//! from [`AutopilotTuning`].

use serde::{Deserialize, Serialize};

use super::state::{Actor, Obstacle};
use crate::tuning::AutopilotTuning;

/// Autopilot state for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JumpState {
    /// Ticks before another autopilot jump is allowed
    pub cooldown: u32,
    /// Gap between the two nearest obstacles at the last decision that saw two
    pub last_jump_gap: f32,
    /// Autopilot switched on
    pub enabled: bool,
}

/// How far ahead of the nearest obstacle the autopilot commits to a jump.
///
/// `gap` is the distance between the nearest obstacle and the one after it,
/// when there is one.
pub fn jump_threshold(
    distance_to_nearest: f32,
    gap: Option<f32>,
    speed: f32,
    base_speed: f32,
    tuning: &AutopilotTuning,
) -> f32 {
    let excess = speed - base_speed;
    let speed_factor = excess / tuning.speed_normalizer;
    let mut threshold = tuning.base_jump_distance + excess * tuning.speed_compensation;

    let Some(gap) = gap else {
        return threshold;
    };

    // Never commit before the first obstacle is reachable
    let reach_limit = distance_to_nearest + tuning.reach_margin;
    let very_tight = gap < tuning.very_tight_gap;
    if very_tight {
        threshold = threshold.min(reach_limit);
    } else if gap < tuning.tight_gap {
        threshold *= tuning.tight_shrink;
    }

    if speed_factor > tuning.high_speed_factor {
        if gap < tuning.high_speed_tight_gap {
            threshold *= tuning.high_speed_tight_shrink;
        } else if gap < tuning.high_speed_loose_gap {
            threshold *= tuning.high_speed_loose_shrink;
        }
    }

    if very_tight {
        threshold = threshold.min(reach_limit);
    }
    threshold
}

impl JumpState {
    /// Flip the autopilot switch, returning the new setting
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Decide whether the actor should jump this tick.
    ///
    /// Does nothing (cooldown included) while the autopilot is off, the queue
    /// is empty or the actor is already in the air.
    pub fn should_jump(
        &mut self,
        actor: &Actor,
        obstacles: &[Obstacle],
        base_speed: f32,
        tuning: &AutopilotTuning,
    ) -> bool {
        if !self.enabled || actor.airborne {
            return false;
        }
        let Some(nearest) = obstacles.first() else {
            return false;
        };

        let distance = nearest.x() - actor.right();
        let gap = obstacles.get(1).map(|next| next.x() - nearest.x());
        if let Some(gap) = gap {
            self.last_jump_gap = gap;
        }
        let threshold = jump_threshold(distance, gap, actor.speed, base_speed, tuning);

        if distance > 0.0 && distance < threshold && self.cooldown == 0 {
            self.cooldown = if self.last_jump_gap < tuning.quick_cooldown_gap {
                tuning.quick_cooldown_ticks
            } else {
                tuning.cooldown_ticks
            };
            return true;
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
        false
    }

    /// Back to a fresh run, keeping the on/off switch
    pub fn reset(&mut self) {
        *self = Self {
            enabled: self.enabled,
            ..Self::default()
        };
    }
}
