//! Game state and core simulation types
//!
//! The phase only changes through [`GameState::transition`], which owns the
//! transition table and the reset that comes with re-entering play.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::face::Face;
use super::grid::{Brick, BrickGrid};
use crate::consts::*;
use crate::settings::Settings;
use crate::{angular_distance, normalize_angle};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play
    Playing,
    /// Face cleared, rainbow wave running
    Won,
    /// Out of lives, white wash running
    Lost,
}

/// Events that drive phase changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Last life lost
    OutOfLives,
    /// No active bricks left on the front face
    FaceCleared,
    /// Win/loss sub-animation finished
    AnimationDone,
}

/// The ball, in (angle, height) space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Angle around the tree, in (-π, π]
    pub theta: f32,
    /// Normalized height
    pub height: f32,
    /// Radians per frame
    pub theta_velocity: f32,
    /// Normalized height per frame
    pub height_velocity: f32,
}

impl Ball {
    /// Opening serve: center of the face, drifting right and rising
    pub fn serve(ball_speed: f32) -> Self {
        Self {
            theta: 0.0,
            height: BALL_START_HEIGHT,
            theta_velocity: ball_speed * BALL_SERVE_SPIN,
            height_velocity: ball_speed,
        }
    }

    /// Relaunch above the paddle, rising, in a random horizontal direction
    pub fn relaunch(paddle: &Paddle, ball_speed: f32, rng: &mut Pcg32) -> Self {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            theta: paddle.theta,
            height: PADDLE_HEIGHT + BALL_RELAUNCH_OFFSET,
            theta_velocity: ball_speed * BALL_RELAUNCH_SPIN * direction,
            height_velocity: ball_speed.abs(),
        }
    }

    /// Advance one frame along the current velocity
    pub fn advance(&mut self) {
        self.theta = normalize_angle(self.theta + self.theta_velocity);
        self.height += self.height_velocity;
    }
}

/// The AI paddle at the foot of the tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Center angle (radians)
    pub theta: f32,
    /// Angular width (radians)
    pub width: f32,
}

impl Paddle {
    pub fn new(theta: f32, width: f32) -> Self {
        Self {
            theta: normalize_angle(theta),
            width,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Step toward the ball at a fixed rate, then clamp inside the face.
    ///
    /// Errors inside the deadband are ignored so the paddle does not jitter.
    pub fn track(&mut self, ball_theta: f32, face: &Face, speed: f32) {
        let error = angular_distance(ball_theta, self.theta);
        if error.abs() > PADDLE_DEADBAND {
            self.theta += speed.copysign(error);
        }

        let max_offset = (FACE_HALF_WIDTH - self.half_width()).max(0.0);
        let offset = face.offset_of(self.theta);
        if offset > max_offset {
            self.theta = face.viewing_angle + max_offset;
        } else if offset < -max_offset {
            self.theta = face.viewing_angle - max_offset;
        }
        self.theta = normalize_angle(self.theta);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    /// Lives left in this game
    lives: u8,
    /// Frames spent in the current Won/Lost animation
    sub_animation_frame: u32,
    /// Frames left before brick hits are evaluated again
    pub(crate) brick_cooldown: u32,
    /// Games finished since construction
    games_played: u32,
    /// Frames rendered since construction
    pub(crate) frame_count: u64,
    /// Playable face
    pub face: Face,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Bricks in row-major (section, band) order, mirroring the grid
    pub(crate) bricks: Vec<Brick>,
    ball_speed: f32,
    rng: Pcg32,
}

impl GameState {
    /// Fresh game on a fully built board
    pub fn new(grid: &BrickGrid, settings: &Settings) -> Self {
        let face = Face::new(0.0);
        Self {
            phase: GamePhase::Playing,
            lives: STARTING_LIVES,
            sub_animation_frame: 0,
            brick_cooldown: 0,
            games_played: 0,
            frame_count: 0,
            face,
            ball: Ball::serve(settings.ball_speed),
            paddle: Paddle::new(face.viewing_angle, settings.paddle_width),
            bricks: grid.fresh_bricks(),
            ball_speed: settings.ball_speed,
            rng: Pcg32::seed_from_u64(settings.seed),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn sub_animation_frame(&self) -> u32 {
        self.sub_animation_frame
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn active_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// Phase reached from `phase` on `event`, if the table allows it
    fn next_phase(phase: GamePhase, event: PhaseEvent) -> Option<GamePhase> {
        match (phase, event) {
            (GamePhase::Playing, PhaseEvent::OutOfLives) => Some(GamePhase::Lost),
            (GamePhase::Playing, PhaseEvent::FaceCleared) => Some(GamePhase::Won),
            (GamePhase::Won, PhaseEvent::AnimationDone) => Some(GamePhase::Playing),
            (GamePhase::Lost, PhaseEvent::AnimationDone) => Some(GamePhase::Playing),
            _ => None,
        }
    }

    /// Apply an event. Returns false (and changes nothing) when the current
    /// phase has no transition for it.
    pub fn transition(&mut self, event: PhaseEvent) -> bool {
        let Some(next) = Self::next_phase(self.phase, event) else {
            return false;
        };
        let from = self.phase;
        self.phase = next;

        match next {
            GamePhase::Won | GamePhase::Lost => {
                self.sub_animation_frame = 0;
                log::info!(
                    "Game {} {:?} with {} lives and {} bricks left",
                    self.games_played + 1,
                    next,
                    self.lives,
                    self.active_bricks()
                );
            }
            GamePhase::Playing => {
                self.reset_game();
                log::info!(
                    "{:?} animation done, game {} starts facing {:.1}°",
                    from,
                    self.games_played + 1,
                    self.face.viewing_angle.to_degrees()
                );
            }
        }
        true
    }

    /// Count one frame of the running sub-animation
    pub(crate) fn tick_sub_animation(&mut self) -> u32 {
        self.sub_animation_frame += 1;
        self.sub_animation_frame
    }

    /// Take a life after a fall-through. Returns the lives left.
    ///
    /// Only counts while playing.
    pub(crate) fn lose_life(&mut self) -> u8 {
        if self.phase == GamePhase::Playing {
            self.lives = self.lives.saturating_sub(1);
        }
        self.lives
    }

    /// Put a new ball in play above the paddle
    pub(crate) fn relaunch_ball(&mut self) {
        self.ball = Ball::relaunch(&self.paddle, self.ball_speed, &mut self.rng);
    }

    pub(crate) fn ball_speed(&self) -> f32 {
        self.ball_speed
    }

    /// Full reset for a new game. The face keeps its current angle.
    fn reset_game(&mut self) {
        for brick in &mut self.bricks {
            brick.active = true;
        }
        self.games_played += 1;
        self.lives = STARTING_LIVES;
        self.sub_animation_frame = 0;
        self.brick_cooldown = 0;
        self.paddle.theta = self.face.viewing_angle;
        self.relaunch_ball();
    }

    #[cfg(test)]
    pub(crate) fn set_lives(&mut self, lives: u8) {
        self.lives = lives;
    }
}
