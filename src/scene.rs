//! Rendering boundary
//!
//! A [`Frame`] is the world-space snapshot handed to the renderer each
//! display refresh: camera offset, collidable geometry, player and exit
//! rectangles, and the exit pulse phase. The renderer owns the
//! camera-relative transform; [`Frame::visible`] is the culling test.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameState, PatrolHazard, PredictiveHazard, Rect};

/// World-space geometry for one rendered frame
pub struct Frame<'a> {
    pub camera: Vec2,
    pub viewport: Vec2,
    pub walls: &'a [Rect],
    pub traps: &'a [Rect],
    pub patrols: &'a [PatrolHazard],
    pub chasers: &'a [PredictiveHazard],
    pub player: Rect,
    pub exit: Rect,
    /// Inset (px) for the pulsing exit style, from wall time
    pub exit_pulse: f32,
}

impl<'a> Frame<'a> {
    pub fn new(state: &'a GameState, viewport: Vec2, time_ms: f64) -> Self {
        let exit_pulse =
            ((time_ms / EXIT_PULSE_PERIOD_MS).sin().abs() as f32) * EXIT_PULSE_AMPLITUDE;
        Self {
            camera: state.camera.offset,
            viewport,
            walls: &state.walls,
            traps: &state.traps,
            patrols: &state.patrols,
            chasers: &state.chasers,
            player: state.player.rect(),
            exit: state.exit,
            exit_pulse,
        }
    }

    /// True iff any part of `rect` lands inside the viewport after the
    /// camera transform
    pub fn visible(&self, rect: &Rect) -> bool {
        let x = rect.x - self.camera.x;
        let y = rect.y - self.camera.y;
        x + rect.w > 0.0 && x < self.viewport.x && y + rect.h > 0.0 && y < self.viewport.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(camera: Vec2) -> GameState {
        let mut state = GameState::new(1);
        state.camera.offset = camera;
        state
    }

    #[test]
    fn test_visible_inside_and_outside_viewport() {
        let state = frame_at(Vec2::new(1000.0, 1000.0));
        let frame = Frame::new(&state, Vec2::new(800.0, 600.0), 0.0);

        assert!(frame.visible(&Rect::new(1100.0, 1100.0, 50.0, 50.0)));
        // Entirely left of the camera
        assert!(!frame.visible(&Rect::new(900.0, 1100.0, 50.0, 50.0)));
        // Entirely below the viewport
        assert!(!frame.visible(&Rect::new(1100.0, 1700.0, 50.0, 50.0)));
        // Straddling the viewport edge still draws
        assert!(frame.visible(&Rect::new(960.0, 1100.0, 50.0, 50.0)));
    }

    #[test]
    fn test_exit_pulse_stays_in_range() {
        let state = GameState::new(1);
        for step in 0..50 {
            let frame = Frame::new(&state, Vec2::new(800.0, 600.0), step as f64 * 37.0);
            assert!(frame.exit_pulse >= 0.0);
            assert!(frame.exit_pulse <= EXIT_PULSE_AMPLITUDE);
        }
    }
}
