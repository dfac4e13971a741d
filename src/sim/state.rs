//! Game state and core simulation types
//!
//! The whole session lives in one [`GameState`] owned by the driving loop;
//! there are no ambient globals. Deferred phase changes (respawn, next-level
//! generation) are plain data here, fired by the tick when the sim clock
//! passes them.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::telemetry::{Profile, Telemetry};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the begin action (space); level already generated
    Start,
    /// Active gameplay
    Playing,
    /// Lethal contact happened; respawn is scheduled
    Dead,
    /// Exit reached below the final level; regeneration is scheduled
    Transition,
    /// Session over, profile revealed. Terminal.
    Reveal,
}

/// The player square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    /// Scalar speed in pixels per reference frame
    pub speed: f32,
    /// Velocity for the current frame, derived from input intent
    pub vel: Vec2,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            vel: Vec2::ZERO,
        }
    }

    /// Put the player back at the spawn corner (layout untouched)
    pub fn reset_position(&mut self) {
        self.pos = Vec2::new(PLAYER_START.0, PLAYER_START.1);
        self.vel = Vec2::ZERO;
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos.x, self.pos.y, self.size)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangular region a patrol hazard may not leave
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatrolBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Hazard oscillating along one axis between fixed bounds.
///
/// `base_vel` keeps its sign across adaptation changes; the effective
/// velocity each frame is `base_vel * speed_multiplier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatrolHazard {
    pub rect: Rect,
    pub base_vel: Vec2,
    pub bounds: PatrolBounds,
}

/// Hazard steering toward an extrapolated future player position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictiveHazard {
    pub rect: Rect,
    /// Scalar base speed in pixels per reference frame
    pub speed: f32,
}

/// Camera offset, recomputed every frame from the player and viewport
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

/// A scheduled phase change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Reset player to spawn and return to Start (layout preserved)
    Respawn,
    /// Regenerate everything for the given level index
    GenerateLevel(u32),
}

/// A deferred action with its fire time on the sim clock.
///
/// No cancellation: once scheduled it always fires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Deferred {
    pub fire_at_ms: f64,
    pub action: DeferredAction,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed; each level derives its own RNG stream from it
    pub seed: u64,
    /// Current level index (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Playable area extent (width, height)
    pub bounds: Vec2,
    pub player: Player,
    pub camera: Camera,
    /// Static collidable walls, including the four borders
    pub walls: Vec<Rect>,
    /// Lethal static traps (generated + idle-spawned)
    pub traps: Vec<Rect>,
    pub patrols: Vec<PatrolHazard>,
    pub chasers: Vec<PredictiveHazard>,
    pub exit: Rect,
    /// Rounded offset from player center to exit center, for the HUD
    pub exit_delta: Option<IVec2>,
    pub telemetry: Telemetry,
    /// Derived exactly once on entering Reveal
    pub profile: Option<Profile>,
    /// Simulation clock (ms), advanced by each tick's dt
    pub clock_ms: f64,
    /// Pending scheduled transitions
    pub deferred: Vec<Deferred>,
}

impl GameState {
    /// Create a session: generate level 1, then wait in Start for the
    /// begin action.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            level: 1,
            phase: GamePhase::Start,
            bounds: Vec2::splat(LEVEL_BASE_EXTENT),
            player: Player::new(),
            camera: Camera::default(),
            walls: Vec::new(),
            traps: Vec::new(),
            patrols: Vec::new(),
            chasers: Vec::new(),
            exit: Rect::square(0.0, 0.0, EXIT_SIZE),
            exit_delta: None,
            telemetry: Telemetry::new(),
            profile: None,
            clock_ms: 0.0,
            deferred: Vec::new(),
        };

        super::level::generate_level(&mut state, 1);
        state.phase = GamePhase::Start;
        state
    }

    /// RNG stream for a level, reproducible from the session seed
    pub fn level_rng(&self, level: u32) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed.wrapping_add((level as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    /// Schedule an action `delay_ms` from now on the sim clock
    pub fn schedule(&mut self, action: DeferredAction, delay_ms: f64) {
        self.deferred.push(Deferred {
            fire_at_ms: self.clock_ms + delay_ms,
            action,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_waiting_on_level_one() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.level, 1);
        assert_eq!(state.bounds, Vec2::splat(LEVEL_BASE_EXTENT));
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        assert!(state.profile.is_none());
        assert!(state.deferred.is_empty());
    }

    #[test]
    fn test_level_rng_streams_are_stable_and_distinct() {
        use rand::RngCore;
        let state = GameState::new(42);
        let a = state.level_rng(1).next_u64();
        let b = state.level_rng(1).next_u64();
        let c = state.level_rng(2).next_u64();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_schedule_uses_sim_clock() {
        let mut state = GameState::new(1);
        state.clock_ms = 1000.0;
        state.schedule(DeferredAction::Respawn, RESPAWN_DELAY_MS);
        assert_eq!(state.deferred.len(), 1);
        assert_eq!(state.deferred[0].fire_at_ms, 1500.0);
    }
}
