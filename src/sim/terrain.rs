//! Terrain kinds and the distance-driven terrain cycle
//!
//! The terrain decides which obstacle the spawner places next, so it is part
//! of the simulation even though its scenery is drawn elsewhere.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::WorldTuning;

/// Closed set of terrain themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Grassland, rocks as obstacles
    #[default]
    Plains,
    /// Rocky highlands, cacti as obstacles
    Mountain,
    /// Woods, birds as obstacles
    Forest,
}

impl TerrainKind {
    /// The terrain that follows this one in the cycle
    pub fn next(self) -> Self {
        match self {
            TerrainKind::Plains => TerrainKind::Mountain,
            TerrainKind::Mountain => TerrainKind::Forest,
            TerrainKind::Forest => TerrainKind::Plains,
        }
    }

    /// Bounding box of the obstacle this terrain spawns
    pub fn obstacle_size(self) -> Vec2 {
        match self {
            TerrainKind::Plains => Vec2::new(40.0, 40.0),
            TerrainKind::Mountain => Vec2::new(30.0, 40.0),
            TerrainKind::Forest => Vec2::new(40.0, 40.0),
        }
    }

    /// Name of the obstacle this terrain spawns
    pub fn obstacle_name(self) -> &'static str {
        match self {
            TerrainKind::Plains => "rock",
            TerrainKind::Mountain => "cactus",
            TerrainKind::Forest => "bird",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TerrainKind::Plains => "plains",
            TerrainKind::Mountain => "mountain",
            TerrainKind::Forest => "forest",
        }
    }
}

/// Current terrain and the distance at which it next changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainState {
    pub kind: TerrainKind,
    pub next_change: f64,
}

impl TerrainState {
    pub fn new(world: &WorldTuning) -> Self {
        Self {
            kind: TerrainKind::Plains,
            next_change: f64::from(world.terrain_interval),
        }
    }

    /// Switch terrain once `distance` reaches the next change point.
    /// Returns the new kind when a switch happened.
    pub fn update(&mut self, distance: f64, world: &WorldTuning) -> Option<TerrainKind> {
        if distance < self.next_change {
            return None;
        }
        self.kind = self.kind.next();
        self.next_change += f64::from(world.terrain_interval);
        Some(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut kind = TerrainKind::Plains;
        for expected in [TerrainKind::Mountain, TerrainKind::Forest, TerrainKind::Plains] {
            kind = kind.next();
            assert_eq!(kind, expected);
        }
    }

    #[test]
    fn test_obstacle_dimensions() {
        assert_eq!(TerrainKind::Plains.obstacle_size(), Vec2::new(40.0, 40.0));
        assert_eq!(TerrainKind::Mountain.obstacle_size(), Vec2::new(30.0, 40.0));
        assert_eq!(TerrainKind::Forest.obstacle_size(), Vec2::new(40.0, 40.0));
        assert_eq!(TerrainKind::Mountain.obstacle_name(), "cactus");
    }

    #[test]
    fn test_changes_every_interval() {
        let world = WorldTuning::default();
        let mut terrain = TerrainState::new(&world);

        assert_eq!(terrain.update(99.9, &world), None);
        assert_eq!(terrain.update(100.0, &world), Some(TerrainKind::Mountain));
        assert_eq!(terrain.next_change, 200.0);
        assert_eq!(terrain.update(150.0, &world), None);
        assert_eq!(terrain.update(200.5, &world), Some(TerrainKind::Forest));
        assert_eq!(terrain.update(300.0, &world), Some(TerrainKind::Plains));
    }
}
