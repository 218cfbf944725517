//! Obstacle spawn eligibility
//!
//! Decides whether a new obstacle may appear this tick. Whether one actually
//! does is a separate coin flip made by the tick.

use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Anti-clustering bookkeeping, reset on every restart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnState {
    /// Closely packed checks in a row, saturating at `max_consecutive`
    pub consecutive_count: u32,
    /// x of the last obstacle at the previous eligible check
    pub last_obstacle_x: f32,
}

/// Minimum clearance from the right edge before another obstacle may spawn.
/// Grows with speed so reaction time never shrinks below a safe bound.
pub fn min_gap(speed: f32, tuning: &Tuning) -> f32 {
    tuning.spawn.base_gap + (speed - tuning.speed.base_speed) * tuning.spawn.gap_speed_coefficient
}

impl SpawnState {
    /// Whether a new obstacle may be introduced this tick
    pub fn is_eligible(&mut self, obstacles: &[Obstacle], speed: f32, tuning: &Tuning) -> bool {
        let min_gap = min_gap(speed, tuning);

        let Some(last) = obstacles.last() else {
            self.consecutive_count = 0;
            return true;
        };

        // Not enough clearance behind the newest obstacle yet
        if last.x() >= tuning.world.window_width - min_gap {
            return false;
        }

        let gap = last.x() - self.last_obstacle_x;
        if gap < min_gap * tuning.spawn.cluster_ratio {
            self.consecutive_count = (self.consecutive_count + 1).min(tuning.spawn.max_consecutive);
        } else {
            self.consecutive_count = 0;
        }

        if self.consecutive_count >= tuning.spawn.max_consecutive {
            return false;
        }

        self.last_obstacle_x = last.x();
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
