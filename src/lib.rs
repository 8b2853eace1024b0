//! Tree Breaker - a self-playing brick breaker for a 500-light conical tree
//!
//! Core modules:
//! - `geometry`: 3D light table to cylindrical coordinates
//! - `sim`: Deterministic simulation (grid, face rotation, physics, game state)
//! - `renderer`: Game state to per-light RGB buffer
//! - `animation`: Frame-driven host entry point
//! - `settings`: Validated configuration block

pub mod animation;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use animation::{Animation, BrickBreaker};
pub use error::{Error, Result};
pub use renderer::Rgb;
pub use settings::Settings;

/// Game configuration constants
///
/// Heights are normalized to the tree (0 = lowest light, 1 = highest light),
/// angles are in radians.
pub mod consts {
    use std::f32::consts::PI;

    /// Number of lights on the installation
    pub const NUM_LIGHTS: usize = 500;

    /// Half-width of the playable face (±72°, 144° total)
    pub const FACE_HALF_WIDTH: f32 = PI * 0.4;

    /// Lower edge of the play area; the ball is lost below `PLAY_HEIGHT_MIN - 0.1`
    pub const PLAY_HEIGHT_MIN: f32 = 0.1;
    /// Top wall
    pub const PLAY_HEIGHT_MAX: f32 = 0.98;
    /// Height at which the ball counts as fallen through
    pub const FALL_HEIGHT: f32 = PLAY_HEIGHT_MIN - 0.1;

    /// Default lower bound of the brick area (upper 2/3 of the tree)
    pub const BRICK_FLOOR: f32 = 0.33;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 0.15;
    pub const PADDLE_THICKNESS: f32 = 0.08;
    /// Paddle AI ignores angular errors smaller than this
    pub const PADDLE_DEADBAND: f32 = 0.05;

    /// Ball collision radii (elliptical: wider in angle than in height)
    pub const BALL_RADIUS_THETA: f32 = 0.15;
    pub const BALL_RADIUS_HEIGHT: f32 = 0.04;
    /// Initial serve height
    pub const BALL_START_HEIGHT: f32 = 0.25;
    /// Relaunch height above the paddle after a reset
    pub const BALL_RELAUNCH_OFFSET: f32 = 0.15;
    /// Initial serve angular speed as a fraction of ball speed
    pub const BALL_SERVE_SPIN: f32 = 0.7;
    /// Relaunch angular speed as a fraction of ball speed
    pub const BALL_RELAUNCH_SPIN: f32 = 0.5;

    /// Frames during which no further brick hits are evaluated
    pub const BRICK_HIT_COOLDOWN: u32 = 5;

    /// Lives per game
    pub const STARTING_LIVES: u8 = 3;

    /// Sub-animation lengths (seconds)
    pub const WIN_ANIMATION_SECS: u32 = 3;
    pub const LOSS_ANIMATION_SECS: u32 = 4;
    /// Frame rate assumed when the host runs unthrottled
    pub const DEFAULT_FPS: u32 = 30;
    /// Highest accepted host frame rate
    pub const MAX_FPS: u32 = 1000;

    /// Largest accepted `num_sections * num_bands`
    pub const MAX_GRID_CELLS: u32 = 65_536;

    // === Colors ===
    use crate::renderer::Rgb;

    pub const BACKGROUND: Rgb = Rgb::new(5, 5, 15);
    pub const BRICK_RED: Rgb = Rgb::new(255, 0, 0);
    pub const BRICK_GREEN: Rgb = Rgb::new(0, 255, 0);
    /// Back-face bricks, dimmed so the tree's shape still reads
    pub const BRICK_RED_DIM: Rgb = Rgb::new(60, 0, 0);
    pub const BRICK_GREEN_DIM: Rgb = Rgb::new(0, 60, 0);
    pub const PADDLE_COLOR: Rgb = Rgb::new(255, 255, 255);
    pub const BALL_COLOR: Rgb = Rgb::new(255, 255, 0);

    // === Effects ===
    /// Rainbow hue rotation over a whole win animation (turns)
    pub const RAINBOW_HUE_DRIFT: f32 = 0.5;
    /// Rainbow bands follow `sin(height * wavenumber - frame * speed)`, so
    /// crests climb the tree
    pub const RAINBOW_BAND_WAVENUMBER: f32 = 10.0;
    pub const RAINBOW_BAND_SPEED: f32 = 0.1;
    /// Hue swing across one band (turns)
    pub const RAINBOW_HUE_BAND_DEPTH: f32 = 0.15;
    /// Brightness `base + depth * band`, 0.7 to 1.0
    pub const RAINBOW_PULSE_BASE: f32 = 0.85;
    pub const RAINBOW_PULSE_DEPTH: f32 = 0.15;
    /// Distance the wash front travels over a loss animation (tree heights)
    pub const WASH_TRAVEL: f32 = 1.15;
    /// Length of the fading trail behind the wash front
    pub const WASH_FALLOFF: f32 = 0.15;
}

/// Normalize an angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { PI } else { wrapped }
}

/// Signed shortest angular distance from `to` to `from`, in (-π, π]
///
/// Positive when `from` lies counter-clockwise of `to`. Every consumer of
/// wraparound arithmetic (paddle AI, brick hits, face visibility, side walls)
/// goes through this so the ±π seam resolves the same way everywhere.
#[inline]
pub fn angular_distance(from: f32, to: f32) -> f32 {
    normalize_angle(from - to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_seam() {
        assert_eq!(normalize_angle(PI), PI);
        assert_eq!(normalize_angle(-PI), PI);
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_angular_distance_wraps() {
        // 170° and -170° are 20° apart, not 340°
        let a = 170.0_f32.to_radians();
        let b = -170.0_f32.to_radians();
        assert!((angular_distance(a, b) - (-20.0_f32).to_radians()).abs() < 1e-4);
        assert!((angular_distance(b, a) - 20.0_f32.to_radians()).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn normalized_angle_in_half_open_range(angle in -1000.0f32..1000.0) {
            let n = normalize_angle(angle);
            prop_assert!(n > -PI && n <= PI);
        }

        #[test]
        fn angular_distance_is_antisymmetric(a in -PI..PI, b in -PI..PI) {
            let d1 = angular_distance(a, b);
            let d2 = angular_distance(b, a);
            // Equal magnitude except exactly at the seam, where both resolve to +π
            prop_assert!((d1.abs() - d2.abs()).abs() < 1e-4);
        }
    }
}
