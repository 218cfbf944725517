//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session one frame deterministically.

use super::collision::actor_obstacle_collision;
use super::state::{GameEvent, GamePhase, GameState, on_off};

/// Discrete input events from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Restart,
    ToggleAutopilot,
    Quit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Player asked to jump (space/up/w)
    pub jump: bool,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
    /// Flip the autopilot switch
    pub toggle_autopilot: bool,
    /// Leave the game
    pub quit: bool,
}

impl TickInput {
    /// Fold a frame's worth of input events into one tick's commands
    pub fn from_events(events: &[InputEvent]) -> Self {
        let mut input = Self::default();
        for event in events {
            input.apply(*event);
        }
        input
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Jump => self.jump = true,
            InputEvent::Restart => self.restart = true,
            // Two presses in one frame cancel out
            InputEvent::ToggleAutopilot => self.toggle_autopilot = !self.toggle_autopilot,
            InputEvent::Quit => self.quit = true,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.quit {
        if !state.quit_requested {
            state.quit_requested = true;
            state.push_event(GameEvent::QuitRequested);
            log::info!("Quit requested at {} m", state.score());
        }
        return;
    }

    if input.toggle_autopilot {
        let enabled = state.autopilot.toggle();
        state.push_event(GameEvent::AutopilotToggled(enabled));
        log::info!("Autopilot {}", on_off(enabled));
    }

    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
    }

    if input.jump && state.phase == GamePhase::Playing && state.actor.jump(&state.tuning.actor) {
        state.push_event(GameEvent::Jumped { by_autopilot: false });
    }

    // Game over freezes everything but input handling
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Actor physics, then distance and speed
    state.actor.update_physics(&state.tuning.actor);
    state.actor.advance_distance(&state.tuning.speed);

    // Autopilot
    let autopilot_jump = state.autopilot.should_jump(
        &state.actor,
        &state.obstacles,
        state.tuning.speed.base_speed,
        &state.tuning.autopilot,
    ) && state.actor.jump(&state.tuning.actor);
    if autopilot_jump {
        state.push_event(GameEvent::Jumped { by_autopilot: true });
    }

    // Spawning: eligibility first, then the coin flip
    let speed = state.actor.speed;
    if state.spawn.is_eligible(&state.obstacles, speed, &state.tuning) && state.roll_spawn() {
        let kind = state.spawn_obstacle().kind;
        state.push_event(GameEvent::ObstacleSpawned(kind));
    }

    // Scroll obstacles toward the actor
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed);
    }

    let collision = actor_obstacle_collision(&state.actor, &state.obstacles);
    state.obstacles.retain(|o| !o.is_off_screen());

    if collision.hit {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::Collided);
        log::info!(
            "Game over: hit obstacle #{} at {} m (speed {:.1}, overlap {:.0}x{:.0})",
            collision.obstacle_id.unwrap_or_default(),
            state.score(),
            speed,
            collision.penetration.x,
            collision.penetration.y
        );
    }

    // Terrain follows distance
    if let Some(kind) = state.terrain.update(state.actor.distance, &state.tuning.world) {
        state.push_event(GameEvent::TerrainChanged(kind));
        log::info!("Terrain changed to {} at {} m", kind.as_str(), state.score());
    }
}
