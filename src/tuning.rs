//! Data-driven game balance
//!
//! Every number that shapes the felt difficulty curve lives here. Defaults
//! reproduce the shipped game exactly; a JSON file may override any subset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(String),
}

/// Playfield geometry and scenery pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub window_width: f32,
    pub window_height: f32,
    /// Obstacle top edge, measured up from the bottom of the window
    pub obstacle_ground_offset: f32,
    /// Metres between terrain switches
    pub terrain_interval: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            obstacle_ground_offset: OBSTACLE_GROUND_OFFSET,
            terrain_interval: TERRAIN_INTERVAL,
        }
    }
}

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Actor top edge when grounded, measured up from the bottom of the window
    pub ground_offset: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_velocity: f32,
    pub gravity: f32,
    pub run_anim_speed: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            x: ACTOR_X,
            width: ACTOR_WIDTH,
            height: ACTOR_HEIGHT,
            ground_offset: ACTOR_GROUND_OFFSET,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            run_anim_speed: RUN_ANIM_SPEED,
        }
    }
}

/// Speed curve over distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTuning {
    pub base_speed: f32,
    pub max_speed: f32,
    pub acceleration_per_step: f32,
    pub step_distance: f32,
    pub distance_per_pixel: f32,
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            acceleration_per_step: ACCELERATION_PER_STEP,
            step_distance: SPEED_STEP_DISTANCE,
            distance_per_pixel: DISTANCE_PER_PIXEL,
        }
    }
}

/// Obstacle pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Minimum clearance from the right edge at base speed
    pub base_gap: f32,
    /// Extra clearance per unit of speed above base
    pub gap_speed_coefficient: f32,
    /// A gap below `cluster_ratio * min_gap` counts toward a cluster
    pub cluster_ratio: f32,
    /// Spawning stops once this many clustered obstacles are queued in a row
    pub max_consecutive: u32,
    /// Per-tick chance of spawning once eligible
    pub spawn_probability: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_gap: 400.0,
            gap_speed_coefficient: 15.0,
            cluster_ratio: 0.7,
            max_consecutive: 2,
            spawn_probability: 0.02,
        }
    }
}

/// Autopilot jump-timing heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotTuning {
    /// Jump threshold at base speed
    pub base_jump_distance: f32,
    /// Threshold growth per unit of speed above base
    pub speed_compensation: f32,
    /// Divisor turning excess speed into a dimensionless factor
    pub speed_normalizer: f32,
    pub very_tight_gap: f32,
    /// Threshold never exceeds distance-to-nearest plus this when the gap is very tight
    pub reach_margin: f32,
    pub tight_gap: f32,
    pub tight_shrink: f32,
    pub high_speed_factor: f32,
    pub high_speed_tight_gap: f32,
    pub high_speed_tight_shrink: f32,
    pub high_speed_loose_gap: f32,
    pub high_speed_loose_shrink: f32,
    /// Gaps below this get the short cooldown
    pub quick_cooldown_gap: f32,
    pub quick_cooldown_ticks: u32,
    pub cooldown_ticks: u32,
}

impl Default for AutopilotTuning {
    fn default() -> Self {
        Self {
            base_jump_distance: 90.0,
            speed_compensation: 6.0,
            speed_normalizer: 5.0,
            very_tight_gap: 180.0,
            reach_margin: 30.0,
            tight_gap: 250.0,
            tight_shrink: 0.9,
            high_speed_factor: 0.6,
            high_speed_tight_gap: 200.0,
            high_speed_tight_shrink: 0.85,
            high_speed_loose_gap: 300.0,
            high_speed_loose_shrink: 0.95,
            quick_cooldown_gap: 200.0,
            quick_cooldown_ticks: 3,
            cooldown_ticks: 4,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub actor: ActorTuning,
    pub speed: SpeedTuning,
    pub spawn: SpawnTuning,
    pub autopilot: AutopilotTuning,
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let w = &self.world;
        let a = &self.actor;
        let s = &self.speed;
        let sp = &self.spawn;
        let ap = &self.autopilot;

        let fields = [
            ("world.window_width", w.window_width),
            ("world.window_height", w.window_height),
            ("world.obstacle_ground_offset", w.obstacle_ground_offset),
            ("world.terrain_interval", w.terrain_interval),
            ("actor.x", a.x),
            ("actor.width", a.width),
            ("actor.height", a.height),
            ("actor.ground_offset", a.ground_offset),
            ("actor.jump_velocity", a.jump_velocity),
            ("actor.gravity", a.gravity),
            ("actor.run_anim_speed", a.run_anim_speed),
            ("speed.base_speed", s.base_speed),
            ("speed.max_speed", s.max_speed),
            ("speed.acceleration_per_step", s.acceleration_per_step),
            ("speed.step_distance", s.step_distance),
            ("speed.distance_per_pixel", s.distance_per_pixel),
            ("spawn.base_gap", sp.base_gap),
            ("spawn.gap_speed_coefficient", sp.gap_speed_coefficient),
            ("spawn.cluster_ratio", sp.cluster_ratio),
            ("spawn.spawn_probability", sp.spawn_probability),
            ("autopilot.base_jump_distance", ap.base_jump_distance),
            ("autopilot.speed_compensation", ap.speed_compensation),
            ("autopilot.speed_normalizer", ap.speed_normalizer),
            ("autopilot.very_tight_gap", ap.very_tight_gap),
            ("autopilot.reach_margin", ap.reach_margin),
            ("autopilot.tight_gap", ap.tight_gap),
            ("autopilot.tight_shrink", ap.tight_shrink),
            ("autopilot.high_speed_factor", ap.high_speed_factor),
            ("autopilot.high_speed_tight_gap", ap.high_speed_tight_gap),
            ("autopilot.high_speed_tight_shrink", ap.high_speed_tight_shrink),
            ("autopilot.high_speed_loose_gap", ap.high_speed_loose_gap),
            ("autopilot.high_speed_loose_shrink", ap.high_speed_loose_shrink),
            ("autopilot.quick_cooldown_gap", ap.quick_cooldown_gap),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::Invalid(format!("{name} must be finite")));
        }

        if w.window_width <= 0.0 || w.window_height <= 0.0 {
            return Err(TuningError::Invalid("window must have positive size".into()));
        }
        if a.width <= 0.0 || a.height <= 0.0 {
            return Err(TuningError::Invalid("actor must have positive size".into()));
        }
        if a.gravity <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "actor.gravity ({}) must be positive or the actor never lands",
                a.gravity
            )));
        }
        if w.terrain_interval <= 0.0 || s.step_distance <= 0.0 {
            return Err(TuningError::Invalid(
                "terrain_interval and step_distance must be positive".into(),
            ));
        }
        if s.base_speed <= 0.0 || s.max_speed < s.base_speed {
            return Err(TuningError::Invalid(format!(
                "max_speed ({}) must be >= base_speed ({}) > 0",
                s.max_speed, s.base_speed
            )));
        }
        if s.acceleration_per_step < 0.0 {
            return Err(TuningError::Invalid("acceleration_per_step must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&sp.spawn_probability) {
            return Err(TuningError::Invalid(format!(
                "spawn_probability {} outside [0, 1]",
                sp.spawn_probability
            )));
        }
        if ap.speed_normalizer == 0.0 {
            return Err(TuningError::Invalid("speed_normalizer must not be zero".into()));
        }
        Ok(())
    }

    /// Actor top edge while standing on the ground
    pub fn actor_ground_y(&self) -> f32 {
        self.world.window_height - self.actor.ground_offset
    }

    /// Obstacle top edge
    pub fn obstacle_y(&self) -> f32 {
        self.world.window_height - self.world.obstacle_ground_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.actor_ground_y(), 300.0);
        assert_eq!(tuning.obstacle_y(), 310.0);
        assert_eq!(tuning.spawn.spawn_probability, 0.02);
        assert_eq!(tuning.autopilot.cooldown_ticks, 4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning =
            Tuning::from_json_str(r#"{ "spawn": { "spawn_probability": 0.5 } }"#).unwrap();
        assert_eq!(tuning.spawn.spawn_probability, 0.5);
        assert_eq!(tuning.spawn.base_gap, 400.0);
        assert_eq!(tuning.speed, SpeedTuning::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json_str(r#"{ "spawn": { "spawn_probability": 1.5 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json_str(r#"{ "speed": { "max_speed": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_non_positive_gravity_rejected() {
        for gravity in ["0.0", "-0.8"] {
            let json = format!(r#"{{ "actor": {{ "gravity": {gravity} }} }}"#);
            let err = Tuning::from_json_str(&json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(ref msg) if msg.contains("gravity")));
        }
        assert!(Tuning::from_json_str(r#"{ "actor": { "gravity": 0.5 } }"#).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_load_round_trip_file() {
        let path = std::env::temp_dir().join(format!("dino_run_tuning_{}.json", std::process::id()));
        let mut tuning = Tuning::default();
        tuning.autopilot.reach_margin = 25.0;
        std::fs::write(&path, serde_json::to_string_pretty(&tuning).unwrap()).unwrap();

        let loaded = Tuning::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, tuning);
    }
}
