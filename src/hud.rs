//! UI text boundary
//!
//! Strings for the DOM overlay: level title, the dynamic status line, and
//! the end-of-session reveal. Pure functions of sim state; the overlay
//! code decides when and where to show them.

use crate::consts::MAX_LEVELS;
use crate::sim::{GameState, Profile};

/// Level heading; the last level is announced instead of numbered
pub fn level_title(level: u32) -> String {
    if level >= MAX_LEVELS {
        "Final Level".to_string()
    } else {
        format!("Level {level}")
    }
}

/// Status line under the title: the exit readout once the sim has
/// published one, a connecting message before that
pub fn status_line(state: &GameState) -> String {
    match state.exit_delta {
        Some(delta) => format!(
            "Relative Exit Coordinates: X [{}]  Y [{}]",
            delta.x, delta.y
        ),
        None => "Establishing Uplink...".to_string(),
    }
}

/// Reveal headline
pub fn reveal_trait(profile: &Profile) -> String {
    format!("You are {}.", profile.label)
}

/// Reveal body with the session numbers embedded
pub fn reveal_description(profile: &Profile) -> String {
    format!(
        "You died {} times and spent {} seconds standing still. \
         The environment continuously shifted its speed and geometry to your behavior. \
         The simulation recognizes your approach.",
        profile.total_deaths, profile.stationary_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "Level 1");
        assert_eq!(level_title(6), "Level 6");
        assert_eq!(level_title(7), "Final Level");
    }

    #[test]
    fn test_status_line_before_and_after_readout() {
        let mut state = GameState::new(1);
        assert_eq!(status_line(&state), "Establishing Uplink...");

        state.exit_delta = Some(IVec2::new(1740, -250));
        assert_eq!(
            status_line(&state),
            "Relative Exit Coordinates: X [1740]  Y [-250]"
        );
    }

    #[test]
    fn test_reveal_strings() {
        let profile = Profile {
            label: "Balanced Survivor".to_string(),
            total_deaths: 20,
            stationary_secs: 45,
        };
        assert_eq!(reveal_trait(&profile), "You are Balanced Survivor.");
        let desc = reveal_description(&profile);
        assert!(desc.contains("died 20 times"));
        assert!(desc.contains("45 seconds standing still"));
    }
}
