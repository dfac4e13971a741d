//! Uplink Maze - a top-down procedural avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, telemetry)
//! - `scene`: World-space frame description consumed by the renderer
//! - `hud`: Text strings for the DOM overlay

pub mod hud;
pub mod scene;
pub mod sim;

pub use sim::{GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Reference frame duration (ms). `dt / BASE_FRAME_MS` is the per-frame
    /// time scale; speeds below are in pixels per reference frame.
    pub const BASE_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Number of levels before the profile reveal
    pub const MAX_LEVELS: u32 = 7;
    /// Level 1 playfield extent (square); grows by LEVEL_GROWTH per level
    pub const LEVEL_BASE_EXTENT: f32 = 2000.0;
    pub const LEVEL_GROWTH: f32 = 1.3;
    /// Border wall thickness
    pub const BORDER_THICKNESS: f32 = 20.0;

    /// Player square size and movement speed
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Fixed spawn corner
    pub const PLAYER_START: (f32, f32) = (100.0, 100.0);

    /// Exit square: inset from the far corner, side length
    pub const EXIT_INSET: f32 = 150.0;
    pub const EXIT_SIZE: f32 = 80.0;

    /// Obstacle-free zones anchored at the start and exit corners
    pub const SAFE_ZONE_EXTENT: f32 = 400.0;
    /// Attempts before a rejection-sampled obstacle is dropped
    pub const PLACEMENT_ATTEMPTS: u32 = 100;

    /// Obstacle counts at scale 1.0 (multiplied by the level scale)
    pub const WALL_COUNT_BASE: f32 = 30.0;
    pub const TRAP_COUNT_BASE: f32 = 40.0;
    pub const PATROL_COUNT_BASE: f32 = 15.0;
    pub const CHASER_COUNT_BASE: f32 = 5.0;

    /// Interior wall dimensions (long x short, orientation random)
    pub const WALL_LONG: f32 = 400.0;
    pub const WALL_SHORT: f32 = 40.0;
    /// Static trap side length range [min, min + span)
    pub const TRAP_SIDE_MIN: f32 = 40.0;
    pub const TRAP_SIDE_SPAN: f32 = 60.0;

    /// Patrol hazard size, base speed, and patrol-bound inset from the edges
    pub const PATROL_SIZE: f32 = 40.0;
    pub const PATROL_SPEED: f32 = 4.0;
    pub const PATROL_BOUND_INSET: f32 = 100.0;
    pub const PATROL_SPAWN_INSET: f32 = 150.0;

    /// Predictive hazard size, base speed, and lookahead (simulation steps)
    pub const CHASER_SIZE: f32 = 30.0;
    pub const CHASER_SPEED: f32 = 3.0;
    pub const CHASER_LEAD_STEPS: f32 = 15.0;
    /// Predictive hazards spawn within this fraction of the map, centered
    pub const CHASER_SPAWN_SPREAD: f32 = 0.8;

    /// Difficulty adaptation: multiplier = max(floor, base - step * deaths)
    pub const ADAPT_BASE: f32 = 1.2;
    pub const ADAPT_STEP: f32 = 0.05;
    pub const ADAPT_FLOOR: f32 = 0.6;

    /// Standing still this long spawns a trap under the player
    pub const IDLE_TRAP_MS: f64 = 3000.0;
    pub const IDLE_TRAP_SIZE: f32 = 40.0;

    /// Delay before respawn after death / next-level generation (ms)
    pub const RESPAWN_DELAY_MS: f64 = 500.0;
    pub const TRANSITION_DELAY_MS: f64 = 500.0;

    /// Exit pulse animation period divisor and amplitude (renderer styling)
    pub const EXIT_PULSE_PERIOD_MS: f64 = 400.0;
    pub const EXIT_PULSE_AMPLITUDE: f32 = 12.0;
}
