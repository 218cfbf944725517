//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Obstacles kept in spatial order (front is nearest)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod speed;
pub mod state;
pub mod terrain;
pub mod tick;

pub use autopilot::{JumpState, jump_threshold};
pub use collision::{Aabb, CollisionResult, actor_obstacle_collision};
pub use snapshot::{ActorSnapshot, ObstacleSnapshot, Snapshot};
pub use spawn::{SpawnState, min_gap};
pub use speed::speed_at;
pub use state::{Actor, ActorPose, GameEvent, GamePhase, GameState, Obstacle, RngState};
pub use terrain::{TerrainKind, TerrainState};
pub use tick::{InputEvent, TickInput, tick};
