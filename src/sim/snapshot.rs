//! Read-only view of a session for the renderer and HUD

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{ActorPose, GamePhase, GameState};
use super::terrain::TerrainKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub pos: Vec2,
    pub size: Vec2,
    pub pose: ActorPose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    pub id: u32,
    pub kind: TerrainKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub actor: ActorSnapshot,
    pub obstacles: Vec<ObstacleSnapshot>,
    pub terrain: TerrainKind,
    pub distance: f64,
    /// Whole metres run
    pub score: u64,
    pub speed: f32,
    pub autopilot: bool,
    pub game_over: bool,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            actor: ActorSnapshot {
                pos: self.actor.pos,
                size: self.actor.size,
                pose: self.actor.pose(),
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleSnapshot {
                    id: o.id,
                    kind: o.kind,
                    pos: o.pos,
                    size: o.size,
                })
                .collect(),
            terrain: self.terrain.kind,
            distance: self.actor.distance,
            score: self.score(),
            speed: self.actor.speed,
            autopilot: self.autopilot.enabled,
            game_over: self.phase == GamePhase::GameOver,
        }
    }
}
