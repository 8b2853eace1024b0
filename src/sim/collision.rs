//! Collision detection and response in (angle, height) space
//!
//! Distances around the tree always go through [`angular_distance`], so a
//! ball sitting on the ±π seam behaves exactly like one anywhere else.

use super::face::Face;
use super::grid::{Brick, BrickGrid};
use super::state::{Ball, Paddle};
use crate::angular_distance;
use crate::consts::*;

/// Which side of a brick the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickEdge {
    /// Top or bottom face: height velocity flips
    Horizontal,
    /// Left or right face: angular velocity flips
    Vertical,
}

/// Result of a brick collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickHit {
    /// Index into the brick list
    pub index: usize,
    pub edge: BrickEdge,
    /// Absolute angular distance from ball to brick center
    pub theta_gap: f32,
    /// Absolute height distance from ball to brick center
    pub height_gap: f32,
}

/// Bounce off the left/right edge of the face.
///
/// Returns true when the ball was pushed back inside.
pub fn side_wall_collision(ball: &mut Ball, face: &Face) -> bool {
    let offset = face.offset_of(ball.theta);
    let limit = FACE_HALF_WIDTH - BALL_RADIUS_THETA;

    if offset.abs() > limit {
        ball.theta_velocity = -ball.theta_velocity;
        ball.theta = crate::normalize_angle(face.viewing_angle + limit.copysign(offset));
        return true;
    }
    false
}

/// Bounce off the top of the play area
pub fn top_wall_collision(ball: &mut Ball) -> bool {
    if ball.height > PLAY_HEIGHT_MAX {
        ball.height_velocity = -ball.height_velocity.abs();
        ball.height = PLAY_HEIGHT_MAX;
        return true;
    }
    false
}

/// Bounce off the paddle, adding spin from the hit position.
///
/// Returns the hit offset from the paddle center (radians) on contact. Edge
/// hits send the ball sideways at up to the full ball speed; center hits send
/// it straight up.
pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle, ball_speed: f32) -> Option<f32> {
    let offset = angular_distance(ball.theta, paddle.theta);
    let in_band = ball.height <= PADDLE_HEIGHT + PADDLE_THICKNESS
        && ball.height >= PADDLE_HEIGHT - BALL_RADIUS_HEIGHT;

    if !in_band || offset.abs() >= paddle.half_width() {
        return None;
    }

    ball.height_velocity = ball.height_velocity.abs();
    ball.theta_velocity = offset / paddle.half_width() * ball_speed;
    ball.height = PADDLE_HEIGHT + PADDLE_THICKNESS + 0.01;
    Some(offset)
}

/// Find the first active front brick the ball overlaps.
///
/// Bricks are checked in list order (row-major section, band) and the first
/// overlap wins, so two overlapping bricks never both break on one frame.
/// `front` is indexed by section.
pub fn find_brick_hit(ball: &Ball, bricks: &[Brick], grid: &BrickGrid, front: &[bool]) -> Option<BrickHit> {
    let theta_threshold = grid.section_width / 2.0 + BALL_RADIUS_THETA;
    let height_threshold = grid.band_height / 2.0 + BALL_RADIUS_HEIGHT;
    let aspect = grid.band_height / grid.section_width;

    bricks.iter().enumerate().find_map(|(index, brick)| {
        if !brick.active || !front.get(brick.section as usize).copied().unwrap_or(false) {
            return None;
        }

        let theta_gap = angular_distance(ball.theta, brick.center_theta).abs();
        let height_gap = (ball.height - brick.center_height).abs();
        if theta_gap >= theta_threshold || height_gap >= height_threshold {
            return None;
        }

        let edge = if height_gap > theta_gap * aspect {
            BrickEdge::Horizontal
        } else {
            BrickEdge::Vertical
        };
        Some(BrickHit {
            index,
            edge,
            theta_gap,
            height_gap,
        })
    })
}

/// Reflect the velocity component matching the struck edge
pub fn reflect_off_brick(ball: &mut Ball, edge: BrickEdge) {
    match edge {
        BrickEdge::Horizontal => ball.height_velocity = -ball.height_velocity,
        BrickEdge::Vertical => ball.theta_velocity = -ball.theta_velocity,
    }
}

/// Whether the ball has dropped below the paddle band
#[inline]
pub fn fell_through(ball: &Ball) -> bool {
    ball.height < FALL_HEIGHT
}
