//! Game state to per-light colors

use super::color::Rgb;
use super::effects::{rainbow_wave, white_wash};
use crate::angular_distance;
use crate::consts::*;
use crate::geometry::LightPoint;
use crate::settings::Settings;
use crate::sim::grid::{BrickColor, BrickGrid};
use crate::sim::state::{GamePhase, GameState};

/// Draw the current frame into `buf`, indexed by light.
///
/// Reads the state only. Lights whose index falls outside `buf` are skipped.
pub fn render(state: &GameState, lights: &[LightPoint], grid: &BrickGrid, settings: &Settings, buf: &mut [Rgb]) {
    match state.phase() {
        GamePhase::Playing => render_board(state, lights, grid, buf),
        GamePhase::Won => {
            let frame = state.sub_animation_frame();
            let progress = animation_progress(frame, settings.frames_for(WIN_ANIMATION_SECS));
            rainbow_wave(lights, frame, progress, buf);
        }
        GamePhase::Lost => {
            let progress = animation_progress(state.sub_animation_frame(), settings.frames_for(LOSS_ANIMATION_SECS));
            white_wash(lights, progress, buf);
        }
    }
}

fn animation_progress(frame: u32, duration: u32) -> f32 {
    frame as f32 / duration.max(1) as f32
}

/// Bricks, then paddle, then ball, each layer overwriting the last
fn render_board(state: &GameState, lights: &[LightPoint], grid: &BrickGrid, buf: &mut [Rgb]) {
    buf.fill(BACKGROUND);

    let front = state.face.front_sections(grid);
    for brick in state.bricks().iter().filter(|b| b.active) {
        let color = brick_color(brick.color, front[brick.section as usize]);
        for &index in &brick.members {
            if let Some(pixel) = buf.get_mut(index) {
                *pixel = color;
            }
        }
    }

    let paddle = &state.paddle;
    let ball = &state.ball;
    for light in lights {
        if !state.face.is_front(light.theta()) {
            continue;
        }
        let Some(pixel) = buf.get_mut(light.index) else {
            continue;
        };

        let paddle_gap = angular_distance(light.theta(), paddle.theta).abs();
        if paddle_gap < paddle.half_width() && (light.height() - PADDLE_HEIGHT).abs() < PADDLE_THICKNESS {
            *pixel = PADDLE_COLOR;
        }

        // Ellipse, wider in angle than in height
        let theta_ratio = angular_distance(light.theta(), ball.theta) / BALL_RADIUS_THETA;
        let height_ratio = (light.height() - ball.height) / BALL_RADIUS_HEIGHT;
        if theta_ratio * theta_ratio + height_ratio * height_ratio < 1.0 {
            *pixel = BALL_COLOR;
        }
    }
}

fn brick_color(color: BrickColor, front: bool) -> Rgb {
    match (color, front) {
        (BrickColor::Red, true) => BRICK_RED,
        (BrickColor::Green, true) => BRICK_GREEN,
        (BrickColor::Red, false) => BRICK_RED_DIM,
        (BrickColor::Green, false) => BRICK_GREEN_DIM,
    }
}
