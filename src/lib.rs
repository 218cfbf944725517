//! Dino Run - A side-scrolling jump-over-the-obstacles arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (speed curve, obstacle pacing, autopilot, collisions)
//! - `tuning`: Data-driven game balance
//!
//! Rendering and input devices live outside this crate. A frontend feeds
//! [`sim::TickInput`] into [`sim::tick`] and draws [`sim::Snapshot`]s.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one update per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 400.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 44.0;
    /// Actor top edge sits this far above the bottom of the window when grounded
    pub const ACTOR_GROUND_OFFSET: f32 = 100.0;
    pub const JUMP_VELOCITY: f32 = -15.0;
    pub const GRAVITY: f32 = 0.8;
    /// Running animation: frames advanced per tick, and frame count
    pub const RUN_ANIM_SPEED: f32 = 0.2;
    pub const RUN_ANIM_FRAMES: u8 = 2;

    /// Obstacle top edge sits this far above the bottom of the window
    pub const OBSTACLE_GROUND_OFFSET: f32 = 90.0;

    /// Speed curve
    pub const BASE_SPEED: f32 = 5.0;
    pub const MAX_SPEED: f32 = 12.0;
    /// Speed gained every `SPEED_STEP_DISTANCE` metres
    pub const ACCELERATION_PER_STEP: f32 = 0.2;
    pub const SPEED_STEP_DISTANCE: f32 = 100.0;
    /// Metres gained per pixel of scroll
    pub const DISTANCE_PER_PIXEL: f32 = 0.01;

    /// Terrain switches every this many metres
    pub const TERRAIN_INTERVAL: f32 = 100.0;
}
