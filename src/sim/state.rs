//! Game state and core simulation types
//!
//! One `GameState` is one play session. Restarting replaces it wholesale.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::autopilot::JumpState;
use super::collision::Aabb;
use super::spawn::SpawnState;
use super::speed;
use super::terrain::{TerrainKind, TerrainState};
use crate::consts::RUN_ANIM_FRAMES;
use crate::tuning::{ActorTuning, SpeedTuning, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only input handling continues
    GameOver,
}

/// Sprite state of the actor, for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorPose {
    /// On the ground, showing running frame `frame`
    Running { frame: u8 },
    /// In the air
    Jumping,
}

/// Something the frontend may want to react to (sound, HUD flash, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { by_autopilot: bool },
    ObstacleSpawned(TerrainKind),
    TerrainChanged(TerrainKind),
    Collided,
    Restarted,
    AutopilotToggled(bool),
    QuitRequested,
}

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub airborne: bool,
    /// Metres run this session
    pub distance: f64,
    /// Forward speed, pixels per tick
    pub speed: f32,
    /// Running animation phase in `[0, RUN_ANIM_FRAMES)`
    pub anim_frame: f32,
    /// Top edge when standing on the ground
    ground_y: f32,
}

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.actor_ground_y();
        Self {
            pos: Vec2::new(tuning.actor.x, ground_y),
            size: Vec2::new(tuning.actor.width, tuning.actor.height),
            vel_y: 0.0,
            airborne: false,
            distance: 0.0,
            speed: tuning.speed.base_speed,
            anim_frame: 0.0,
            ground_y,
        }
    }

    /// Start a jump. Returns false (and does nothing) when already airborne.
    pub fn jump(&mut self, tuning: &ActorTuning) -> bool {
        if self.airborne {
            return false;
        }
        self.vel_y = tuning.jump_velocity;
        self.airborne = true;
        true
    }

    /// Gravity while airborne, running animation while grounded
    pub fn update_physics(&mut self, tuning: &ActorTuning) {
        if self.airborne {
            self.pos.y += self.vel_y;
            self.vel_y += tuning.gravity;

            if self.pos.y >= self.ground_y {
                self.pos.y = self.ground_y;
                self.vel_y = 0.0;
                self.airborne = false;
                self.anim_frame = 0.0;
            }
        } else {
            self.anim_frame += tuning.run_anim_speed;
            if self.anim_frame >= RUN_ANIM_FRAMES as f32 {
                self.anim_frame = 0.0;
            }
        }
    }

    /// Run one tick's worth of distance, then pick up the speed for it
    pub fn advance_distance(&mut self, tuning: &SpeedTuning) {
        let (distance, speed) = speed::advance(self.distance, self.speed, tuning);
        self.distance = distance;
        self.speed = speed;
    }

    /// Right edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn pose(&self) -> ActorPose {
        if self.airborne {
            ActorPose::Jumping
        } else {
            ActorPose::Running {
                frame: self.anim_frame as u8,
            }
        }
    }
}

/// An obstacle scrolling toward the actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: TerrainKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: TerrainKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, y),
            size: kind.obstacle_size(),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    /// Scroll left by `speed`
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// Fully past the left edge of the screen
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// Seed and stream of the session RNG. Each restart gets its own stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation ticks of the current run
    pub time_ticks: u64,
    /// Restarts so far in this session
    pub runs: u32,
    pub actor: Actor,
    /// Obstacles by ascending x; the front is the nearest upcoming one
    pub obstacles: Vec<Obstacle>,
    pub spawn: SpawnState,
    pub autopilot: JumpState,
    pub terrain: TerrainState,
    /// Set once a quit was requested; the frontend ends the loop
    pub quit_requested: bool,
    events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            seed,
            rng_state,
            actor: Actor::new(&tuning),
            terrain: TerrainState::new(&tuning.world),
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            runs: 0,
            obstacles: Vec::new(),
            spawn: SpawnState::default(),
            autopilot: JumpState::default(),
            quit_requested: false,
            events: Vec::new(),
            rng: rng_state.to_rng(),
            next_id: 1,
        }
    }

    /// Throw away the current run and start a fresh one.
    ///
    /// Actor, obstacle queue, spawn state, jump state and terrain all start
    /// over. The autopilot switch, tuning and pending events carry across.
    pub fn restart(&mut self) {
        let runs = self.runs + 1;
        let mut next = Self::with_tuning(self.seed, self.tuning.clone());
        next.runs = runs;
        next.rng_state.stream = runs as u64;
        next.rng = next.rng_state.to_rng();
        next.autopilot.enabled = self.autopilot.enabled;
        next.events = std::mem::take(&mut self.events);
        next.push_event(GameEvent::Restarted);

        log::info!("Run {} starting (autopilot {})", runs + 1, on_off(next.autopilot.enabled));
        *self = next;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a new obstacle of the current terrain's kind at the right edge
    pub fn spawn_obstacle(&mut self) -> &Obstacle {
        let id = self.next_entity_id();
        let obstacle = Obstacle::new(
            id,
            self.terrain.kind,
            self.tuning.world.window_width,
            self.tuning.obstacle_y(),
        );
        log::debug!("Spawned {} #{} at x={}", self.terrain.kind.obstacle_name(), id, obstacle.x());
        self.obstacles.push(obstacle);
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Per-tick spawn coin flip
    pub fn roll_spawn(&mut self) -> bool {
        self.rng.random::<f32>() < self.tuning.spawn.spawn_probability
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Distance in whole metres
    pub fn score(&self) -> u64 {
        self.actor.distance.max(0.0).floor() as u64
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

pub(crate) fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
