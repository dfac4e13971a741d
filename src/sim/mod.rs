//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit `dt` fed by the driving loop, neutral scale on the first frame
//! - Seeded RNG only (one Pcg32 stream per level)
//! - Scheduled transitions are data on the state, fired by the tick itself
//! - No rendering or platform dependencies

pub mod level;
pub mod rect;
pub mod state;
pub mod telemetry;
pub mod tick;

pub use level::generate_level;
pub use rect::Rect;
pub use state::{
    Camera, Deferred, DeferredAction, GamePhase, GameState, PatrolHazard, Player, PredictiveHazard,
};
pub use telemetry::{Profile, Telemetry, speed_multiplier};
pub use tick::{TickInput, tick};
