//! Per-frame simulation step
//!
//! Advances the game by exactly one frame. Rendering is separate; this only
//! mutates [`GameState`].

use super::collision::{
    fell_through, find_brick_hit, paddle_collision, reflect_off_brick, side_wall_collision,
    top_wall_collision,
};
use super::grid::{Brick, BrickGrid};
use super::state::{GamePhase, GameState, PhaseEvent};
use crate::consts::*;
use crate::settings::Settings;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, grid: &BrickGrid, settings: &Settings) {
    state.frame_count += 1;

    // The face keeps turning in every phase
    state.face.advance(settings.rotation_speed);

    let animation_secs = match state.phase() {
        GamePhase::Playing => None,
        GamePhase::Won => Some(WIN_ANIMATION_SECS),
        GamePhase::Lost => Some(LOSS_ANIMATION_SECS),
    };
    if let Some(secs) = animation_secs {
        if state.tick_sub_animation() < settings.frames_for(secs) {
            return;
        }
        // The reset frame shows the fresh board; play resumes next frame
        state.transition(PhaseEvent::AnimationDone);
        return;
    }

    step_playing(state, grid, settings);
}

/// One frame of play: paddle AI, ball motion, collisions, then win/loss checks
fn step_playing(state: &mut GameState, grid: &BrickGrid, settings: &Settings) {
    let front = state.face.front_sections(grid);

    state.paddle.track(state.ball.theta, &state.face, settings.paddle_speed);
    state.ball.advance();

    // Walls
    side_wall_collision(&mut state.ball, &state.face);
    top_wall_collision(&mut state.ball);

    // Paddle
    let ball_speed = state.ball_speed();
    if let Some(offset) = paddle_collision(&mut state.ball, &state.paddle, ball_speed) {
        log::debug!("Paddle hit at {:+.3} rad from center", offset);
    }

    // Bricks
    if state.brick_cooldown > 0 {
        state.brick_cooldown -= 1;
    } else if let Some(hit) = find_brick_hit(&state.ball, &state.bricks, grid, &front) {
        let brick = &mut state.bricks[hit.index];
        brick.active = false;
        let (section, band) = (brick.section, brick.band);
        reflect_off_brick(&mut state.ball, hit.edge);
        state.brick_cooldown = BRICK_HIT_COOLDOWN;
        log::debug!(
            "Brick ({}, {}) destroyed, {:?} edge, {} left",
            section,
            band,
            hit.edge,
            state.active_bricks()
        );
    }

    // Fall-through
    if fell_through(&state.ball) {
        let lives = state.lose_life();
        log::debug!("Ball lost, {} lives left", lives);
        if lives == 0 {
            state.transition(PhaseEvent::OutOfLives);
            return;
        }
        state.relaunch_ball();
    }

    if face_cleared(&state.bricks, &front) {
        state.transition(PhaseEvent::FaceCleared);
    }
}

/// True when the front face holds bricks and every one of them is broken.
///
/// A face with no bricks at all is not a win; the rotation will bring some
/// into view.
fn face_cleared(bricks: &[Brick], front: &[bool]) -> bool {
    let mut any_front = false;
    for brick in bricks.iter().filter(|b| front[b.section as usize]) {
        if brick.active {
            return false;
        }
        any_front = true;
    }
    any_front
}
