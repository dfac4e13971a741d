//! Procedural level generation
//!
//! Each level discards the previous layout wholesale and rebuilds it:
//! scaled bounds, border walls, rejection-sampled interior obstacles, and
//! a fresh hazard population. Placement keeps two safe zones clear around
//! the spawn and exit corners. Generation never fails: a candidate that
//! cannot be placed within the attempt budget is silently dropped.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{GamePhase, GameState, PatrolBounds, PatrolHazard, PredictiveHazard};
use crate::consts::*;

/// Rejection-sample a candidate rectangle that clears both safe zones.
/// Returns `None` if the attempt budget runs out.
fn place_clear(
    rng: &mut Pcg32,
    safe_zones: &[Rect; 2],
    mut sample: impl FnMut(&mut Pcg32) -> Rect,
) -> Option<Rect> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = sample(rng);
        if !safe_zones.iter().any(|zone| candidate.overlaps(zone)) {
            return Some(candidate);
        }
    }
    None
}

/// Build the layout for `level` (1-based) and enter Playing.
///
/// Resets the player to the spawn corner and zeroes the level-scoped
/// telemetry; session-scoped counters are untouched.
pub fn generate_level(state: &mut GameState, level: u32) {
    let scale = LEVEL_GROWTH.powi(level as i32 - 1);
    let bounds = Vec2::splat(LEVEL_BASE_EXTENT * scale);

    state.level = level;
    state.bounds = bounds;
    state.player.reset_position();
    state.exit = Rect::square(bounds.x - EXIT_INSET, bounds.y - EXIT_INSET, EXIT_SIZE);
    state.exit_delta = None;

    state.walls.clear();
    state.traps.clear();
    state.patrols.clear();
    state.chasers.clear();

    // Border walls framing the full bounds
    state
        .walls
        .push(Rect::new(0.0, 0.0, bounds.x, BORDER_THICKNESS));
    state.walls.push(Rect::new(
        0.0,
        bounds.y - BORDER_THICKNESS,
        bounds.x,
        BORDER_THICKNESS,
    ));
    state
        .walls
        .push(Rect::new(0.0, 0.0, BORDER_THICKNESS, bounds.y));
    state.walls.push(Rect::new(
        bounds.x - BORDER_THICKNESS,
        0.0,
        BORDER_THICKNESS,
        bounds.y,
    ));

    let safe_zones = [
        Rect::square(0.0, 0.0, SAFE_ZONE_EXTENT),
        Rect::square(
            bounds.x - SAFE_ZONE_EXTENT,
            bounds.y - SAFE_ZONE_EXTENT,
            SAFE_ZONE_EXTENT,
        ),
    ];

    let wall_count = (WALL_COUNT_BASE * scale).floor() as u32;
    let trap_count = (TRAP_COUNT_BASE * scale).floor() as u32;
    let patrol_count = (PATROL_COUNT_BASE * scale).floor() as u32;
    let chaser_count = (CHASER_COUNT_BASE * scale).floor() as u32;

    let mut rng = state.level_rng(level);

    // Interior walls: long-horizontal or long-vertical, one coin flip each
    for _ in 0..wall_count {
        let placed = place_clear(&mut rng, &safe_zones, |rng| {
            let x = rng.random_range(100.0..bounds.x - 100.0);
            let y = rng.random_range(100.0..bounds.y - 100.0);
            if rng.random_bool(0.5) {
                Rect::new(x, y, WALL_LONG, WALL_SHORT)
            } else {
                Rect::new(x, y, WALL_SHORT, WALL_LONG)
            }
        });
        if let Some(wall) = placed {
            state.walls.push(wall);
        }
    }

    // Static traps: squares with a random side length
    for _ in 0..trap_count {
        let placed = place_clear(&mut rng, &safe_zones, |rng| {
            let x = rng.random_range(100.0..bounds.x - 100.0);
            let y = rng.random_range(100.0..bounds.y - 100.0);
            let side = rng.random_range(TRAP_SIDE_MIN..TRAP_SIDE_MIN + TRAP_SIDE_SPAN);
            Rect::square(x, y, side)
        });
        if let Some(trap) = placed {
            state.traps.push(trap);
        }
    }

    // Patrol hazards: one axis each, random initial direction
    let patrol_bounds = PatrolBounds {
        left: PATROL_BOUND_INSET,
        right: bounds.x - PATROL_BOUND_INSET,
        top: PATROL_BOUND_INSET,
        bottom: bounds.y - PATROL_BOUND_INSET,
    };
    for _ in 0..patrol_count {
        let horizontal = rng.random_bool(0.5);
        let placed = place_clear(&mut rng, &safe_zones, |rng| {
            Rect::square(
                rng.random_range(PATROL_SPAWN_INSET..bounds.x - PATROL_SPAWN_INSET),
                rng.random_range(PATROL_SPAWN_INSET..bounds.y - PATROL_SPAWN_INSET),
                PATROL_SIZE,
            )
        });
        if let Some(rect) = placed {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let base_vel = if horizontal {
                Vec2::new(PATROL_SPEED * sign, 0.0)
            } else {
                Vec2::new(0.0, PATROL_SPEED * sign)
            };
            state.patrols.push(PatrolHazard {
                rect,
                base_vel,
                bounds: patrol_bounds,
            });
        }
    }

    // Predictive hazards: central spread, exempt from safe-zone rejection
    for _ in 0..chaser_count {
        let x = bounds.x / 2.0 + (rng.random_range(0.0f32..1.0) - 0.5) * bounds.x * CHASER_SPAWN_SPREAD;
        let y = bounds.y / 2.0 + (rng.random_range(0.0f32..1.0) - 0.5) * bounds.y * CHASER_SPAWN_SPREAD;
        state.chasers.push(PredictiveHazard {
            rect: Rect::square(x, y, CHASER_SIZE),
            speed: CHASER_SPEED,
        });
    }

    state.telemetry.reset_level_scope();
    state.phase = GamePhase::Playing;

    log::info!(
        "Level {} generated: {}x{} bounds, {} walls, {} traps, {} patrols, {} chasers",
        level,
        bounds.x,
        bounds.y,
        state.walls.len(),
        state.traps.len(),
        state.patrols.len(),
        state.chasers.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_scale_geometrically() {
        let mut state = GameState::new(1);
        let mut previous = 0.0f32;
        for level in 1..=MAX_LEVELS {
            generate_level(&mut state, level);
            let expected = LEVEL_BASE_EXTENT * LEVEL_GROWTH.powi(level as i32 - 1);
            assert!((state.bounds.x - expected).abs() < 1e-2);
            assert_eq!(state.bounds.x, state.bounds.y);
            assert!(state.bounds.x > previous);
            previous = state.bounds.x;
        }
    }

    #[test]
    fn test_exit_and_player_placement() {
        let mut state = GameState::new(3);
        generate_level(&mut state, 4);
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.exit.x, state.bounds.x - EXIT_INSET);
        assert_eq!(state.exit.y, state.bounds.y - EXIT_INSET);
        assert_eq!(state.exit.w, EXIT_SIZE);
    }

    #[test]
    fn test_border_walls_frame_the_bounds() {
        let state = GameState::new(9);
        let b = state.bounds;
        assert!(state.walls.len() >= 4);
        assert_eq!(state.walls[0], Rect::new(0.0, 0.0, b.x, BORDER_THICKNESS));
        assert_eq!(
            state.walls[1],
            Rect::new(0.0, b.y - BORDER_THICKNESS, b.x, BORDER_THICKNESS)
        );
        assert_eq!(state.walls[2], Rect::new(0.0, 0.0, BORDER_THICKNESS, b.y));
        assert_eq!(
            state.walls[3],
            Rect::new(b.x - BORDER_THICKNESS, 0.0, BORDER_THICKNESS, b.y)
        );
    }

    #[test]
    fn test_placed_obstacles_respect_safe_zones() {
        for seed in 0..8u64 {
            let mut state = GameState::new(seed);
            for level in 1..=3 {
                generate_level(&mut state, level);
                let safe_start = Rect::square(0.0, 0.0, SAFE_ZONE_EXTENT);
                let safe_exit = Rect::square(
                    state.bounds.x - SAFE_ZONE_EXTENT,
                    state.bounds.y - SAFE_ZONE_EXTENT,
                    SAFE_ZONE_EXTENT,
                );
                // Skip the four borders; they frame the whole map by design
                for wall in &state.walls[4..] {
                    assert!(!wall.overlaps(&safe_start), "wall in start zone: {wall:?}");
                    assert!(!wall.overlaps(&safe_exit), "wall in exit zone: {wall:?}");
                }
                for trap in &state.traps {
                    assert!(!trap.overlaps(&safe_start));
                    assert!(!trap.overlaps(&safe_exit));
                }
                for patrol in &state.patrols {
                    assert!(!patrol.rect.overlaps(&safe_start));
                    assert!(!patrol.rect.overlaps(&safe_exit));
                }
            }
        }
    }

    #[test]
    fn test_obstacle_counts_match_scale() {
        let mut state = GameState::new(11);
        generate_level(&mut state, 2);
        let scale = LEVEL_GROWTH;
        assert!(state.walls.len() <= 4 + (WALL_COUNT_BASE * scale).floor() as usize);
        assert!(state.traps.len() <= (TRAP_COUNT_BASE * scale).floor() as usize);
        assert!(state.patrols.len() <= (PATROL_COUNT_BASE * scale).floor() as usize);
        // Predictive hazards never fail placement
        assert_eq!(
            state.chasers.len(),
            (CHASER_COUNT_BASE * scale).floor() as usize
        );
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(1234);
        let b = GameState::new(1234);
        assert_eq!(a.walls, b.walls);
        assert_eq!(a.traps, b.traps);
        assert_eq!(
            serde_json::to_string(&a.patrols).unwrap(),
            serde_json::to_string(&b.patrols).unwrap()
        );
    }

    #[test]
    fn test_generation_resets_level_scope_and_enters_playing() {
        let mut state = GameState::new(5);
        state.telemetry.level_deaths = 7;
        state.telemetry.idle_ms = 2000.0;
        state.telemetry.total_deaths = 7;
        generate_level(&mut state, 2);
        assert_eq!(state.telemetry.level_deaths, 0);
        assert_eq!(state.telemetry.idle_ms, 0.0);
        assert_eq!(state.telemetry.total_deaths, 7);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_patrol_bounds_use_shared_inset() {
        let state = GameState::new(2);
        for patrol in &state.patrols {
            assert_eq!(patrol.bounds.left, PATROL_BOUND_INSET);
            assert_eq!(patrol.bounds.top, PATROL_BOUND_INSET);
            assert_eq!(patrol.bounds.right, state.bounds.x - PATROL_BOUND_INSET);
            assert_eq!(patrol.bounds.bottom, state.bounds.y - PATROL_BOUND_INSET);
            // Exactly one axis moves
            assert!(patrol.base_vel.x == 0.0 || patrol.base_vel.y == 0.0);
            assert_eq!(patrol.base_vel.length(), PATROL_SPEED);
        }
    }
}
