//! Session telemetry and the behavioral profile
//!
//! Tracks deaths and movement/idle time across the whole session. The level
//! generator resets the level-scoped fields; the reveal screen derives a
//! categorical profile from the aggregate once at session end. The same
//! counters drive the per-frame difficulty adaptation.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Behavioral counters for the whole session.
///
/// `total_*` fields live for the session; `level_deaths` and `idle_ms` are
/// zeroed on every level generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Telemetry {
    /// Deaths across all levels
    pub total_deaths: u32,
    /// Deaths since the current level was generated
    pub level_deaths: u32,
    /// Continuous stationary time since the last movement input (ms)
    pub idle_ms: f64,
    /// Cumulative time with movement input held (ms)
    pub moving_ms: f64,
    /// Cumulative time with no movement input (ms)
    pub stationary_ms: f64,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lethal contact (called once per death)
    pub fn record_death(&mut self) {
        self.total_deaths += 1;
        self.level_deaths += 1;
    }

    /// Add elapsed time while movement input is held. Any movement resets
    /// the idle accumulator.
    pub fn accumulate_moving(&mut self, dt_ms: f64) {
        self.moving_ms += dt_ms;
        self.idle_ms = 0.0;
    }

    /// Add elapsed time while stationary
    pub fn accumulate_stationary(&mut self, dt_ms: f64) {
        self.stationary_ms += dt_ms;
        self.idle_ms += dt_ms;
    }

    /// Zero the level-scoped fields (called on level generation)
    pub fn reset_level_scope(&mut self) {
        self.level_deaths = 0;
        self.idle_ms = 0.0;
    }

    /// Fraction of elapsed time spent moving. The denominator is floored at
    /// 1 ms so a session with no elapsed time divides cleanly.
    pub fn move_ratio(&self) -> f64 {
        self.moving_ms / (self.moving_ms + self.stationary_ms).max(1.0)
    }

    /// Derive the final categorical profile. First matching rule wins.
    pub fn derive_profile(&self) -> Profile {
        let move_ratio = self.move_ratio();

        let label = if self.total_deaths > 30 {
            "Struggling but Persistent"
        } else if move_ratio > 0.8 && self.total_deaths > 15 {
            "Recklessly Aggressive"
        } else if move_ratio < 0.4 {
            "Overly Cautious"
        } else if self.total_deaths < 10 {
            "Adept & Calculating"
        } else {
            "Balanced Survivor"
        };

        Profile {
            label: label.to_string(),
            total_deaths: self.total_deaths,
            stationary_secs: (self.stationary_ms / 1000.0).round() as u64,
        }
    }
}

/// The derived end-of-session profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Categorical trait label
    pub label: String,
    pub total_deaths: u32,
    /// Total stationary time, whole seconds
    pub stationary_secs: u64,
}

/// Hazard speed multiplier for the current level-scoped death count.
///
/// Starts at 1.2 with no deaths, loses 0.05 per death, floored at 0.6.
/// Applied to every patrol and predictive hazard; never to the player.
pub fn speed_multiplier(level_deaths: u32) -> f32 {
    (ADAPT_BASE - ADAPT_STEP * level_deaths as f32).max(ADAPT_FLOOR)
}
