//! Per-frame simulation step
//!
//! Advances the session by one frame: input intent, player movement with
//! wall resolution, camera follow, hazard updates, lethal/exit contacts,
//! and firing of any scheduled transitions that have come due.

use glam::{IVec2, Vec2};

use super::level::generate_level;
use super::rect::Rect;
use super::state::{DeferredAction, GamePhase, GameState};
use super::telemetry::speed_multiplier;
use crate::consts::*;

/// Input intent for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Begin/confirm action; only honored in the Start phase
    pub begin: bool,
}

impl TickInput {
    /// Unit-length movement vector, or zero. Diagonals are normalized so
    /// diagonal speed equals axial speed.
    pub fn intent(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if v != Vec2::ZERO { v.normalize() } else { v }
    }
}

/// Advance the session by one frame.
///
/// `dt_ms` is wall-clock time since the previous frame; the driving loop
/// passes 0 when there is no previous frame, which yields a neutral time
/// scale of 1. `viewport` is the visible area for camera centering.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64, viewport: Vec2) {
    state.clock_ms += dt_ms;
    fire_due_transitions(state);

    if state.phase == GamePhase::Start && input.begin {
        state.phase = GamePhase::Playing;
        state.telemetry.idle_ms = 0.0;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    // Movement intent and telemetry accounting
    let intent = input.intent();
    if intent != Vec2::ZERO {
        state.telemetry.accumulate_moving(dt_ms);
    } else {
        state.telemetry.accumulate_stationary(dt_ms);
    }
    state.player.vel = intent * state.player.speed;

    // Standing still too long plants a trap under the player. Fires again
    // after every further full idle window, wherever the player stands.
    if state.telemetry.idle_ms > IDLE_TRAP_MS {
        state.traps.push(Rect::square(
            state.player.pos.x - 10.0,
            state.player.pos.y - 10.0,
            IDLE_TRAP_SIZE,
        ));
        state.telemetry.idle_ms = 0.0;
        log::debug!("idle trap spawned at {:?}", state.player.pos);
    }

    // Frame time scale against the 60 fps reference; neutral on the first
    // frame when no delta exists yet
    let time_scale = if dt_ms > 0.0 {
        (dt_ms / BASE_FRAME_MS) as f32
    } else {
        1.0
    };

    // Player movement, one axis at a time: move and resolve X fully, then Y
    // on the updated position. A fast diagonal entry into a corner formed by
    // two walls can clip the corner before the second pass pushes out.
    state.player.pos.x += state.player.vel.x * time_scale;
    state.player.pos.x = state
        .player
        .pos
        .x
        .clamp(0.0, state.bounds.x - state.player.size);
    for wall in &state.walls {
        if state.player.rect().overlaps(wall) {
            if state.player.vel.x > 0.0 {
                state.player.pos.x = wall.x - state.player.size;
            } else if state.player.vel.x < 0.0 {
                state.player.pos.x = wall.x + wall.w;
            }
        }
    }

    state.player.pos.y += state.player.vel.y * time_scale;
    state.player.pos.y = state
        .player
        .pos
        .y
        .clamp(0.0, state.bounds.y - state.player.size);
    for wall in &state.walls {
        if state.player.rect().overlaps(wall) {
            if state.player.vel.y > 0.0 {
                state.player.pos.y = wall.y - state.player.size;
            } else if state.player.vel.y < 0.0 {
                state.player.pos.y = wall.y + wall.h;
            }
        }
    }

    // Camera: center on the player, clamped to the level; a viewport larger
    // than the level pins to the origin on that axis
    let player_center = state.player.rect().center();
    let mut cam = player_center - viewport / 2.0;
    cam = cam.max(Vec2::ZERO);
    if cam.x + viewport.x > state.bounds.x {
        cam.x = (state.bounds.x - viewport.x).max(0.0);
    }
    if cam.y + viewport.y > state.bounds.y {
        cam.y = (state.bounds.y - viewport.y).max(0.0);
    }
    state.camera.offset = cam;

    // Hazards run at the adapted speed for the current death count
    let mult = speed_multiplier(state.telemetry.level_deaths);
    let mut lethal = false;

    for patrol in &mut state.patrols {
        let vel = patrol.base_vel * mult;
        patrol.rect.x += vel.x * time_scale;
        patrol.rect.y += vel.y * time_scale;

        // Invert the stored base velocity on boundary contact so direction
        // survives adaptation changes; clamp back inside the patrol bounds
        if patrol.rect.x < patrol.bounds.left {
            patrol.rect.x = patrol.bounds.left;
            patrol.base_vel.x = -patrol.base_vel.x;
        } else if patrol.rect.x + patrol.rect.w > patrol.bounds.right {
            patrol.rect.x = patrol.bounds.right - patrol.rect.w;
            patrol.base_vel.x = -patrol.base_vel.x;
        }
        if patrol.rect.y < patrol.bounds.top {
            patrol.rect.y = patrol.bounds.top;
            patrol.base_vel.y = -patrol.base_vel.y;
        } else if patrol.rect.y + patrol.rect.h > patrol.bounds.bottom {
            patrol.rect.y = patrol.bounds.bottom - patrol.rect.h;
            patrol.base_vel.y = -patrol.base_vel.y;
        }

        if patrol.rect.overlaps(&state.player.rect()) {
            lethal = true;
        }
    }

    // Predictive hazards steer toward where the player is headed
    let lead_target = state.player.pos + state.player.vel * CHASER_LEAD_STEPS;
    for chaser in &mut state.chasers {
        let dir = (lead_target - Vec2::new(chaser.rect.x, chaser.rect.y)).normalize_or_zero();
        let step = dir * chaser.speed * mult * time_scale;
        chaser.rect.x += step.x;
        chaser.rect.y += step.y;

        if chaser.rect.overlaps(&state.player.rect()) {
            lethal = true;
        }
    }

    let player_rect = state.player.rect();
    for trap in &state.traps {
        if trap.overlaps(&player_rect) {
            lethal = true;
        }
    }

    if lethal {
        die(state);
    } else if player_rect.overlaps(&state.exit) {
        complete_level(state);
    } else {
        // Publish the exit readout for the HUD
        let delta = state.exit.center() - player_rect.center();
        state.exit_delta = Some(IVec2::new(delta.x.round() as i32, delta.y.round() as i32));
    }
}

/// Lethal contact. Idempotent: a second hit while already dead is a no-op.
fn die(state: &mut GameState) {
    if state.phase == GamePhase::Dead {
        return;
    }
    state.phase = GamePhase::Dead;
    state.telemetry.record_death();
    state.schedule(DeferredAction::Respawn, RESPAWN_DELAY_MS);
    log::info!(
        "death #{} (level {}, {} this level)",
        state.telemetry.total_deaths,
        state.level,
        state.telemetry.level_deaths
    );
}

/// Exit contact: advance, or reveal the profile after the final level
fn complete_level(state: &mut GameState) {
    let next = state.level + 1;
    if next > MAX_LEVELS {
        state.phase = GamePhase::Reveal;
        if state.profile.is_none() {
            let profile = state.telemetry.derive_profile();
            log::info!("session complete: {}", profile.label);
            state.profile = Some(profile);
        }
    } else {
        state.phase = GamePhase::Transition;
        state.schedule(DeferredAction::GenerateLevel(next), TRANSITION_DELAY_MS);
        log::info!("level {} complete", state.level);
    }
}

/// Apply every scheduled transition whose fire time has passed. No
/// cancellation: a scheduled action always runs; it simply applies its
/// state when it fires.
fn fire_due_transitions(state: &mut GameState) {
    let now = state.clock_ms;
    let mut due = Vec::new();
    state.deferred.retain(|d| {
        if d.fire_at_ms <= now {
            due.push(d.action);
            false
        } else {
            true
        }
    });

    for action in due {
        match action {
            DeferredAction::Respawn => {
                state.player.reset_position();
                state.telemetry.idle_ms = 0.0;
                state.phase = GamePhase::Start;
            }
            DeferredAction::GenerateLevel(level) => generate_level(state, level),
        }
    }
}
