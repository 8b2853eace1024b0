//! Full-tree sub-animations shown after a game ends
//!
//! Both effects take their position in the animation as `progress` in [0, 1)
//! and paint every light, ignoring bricks and the face.

use std::f32::consts::{PI, TAU};

use super::color::Rgb;
use crate::consts::*;
use crate::geometry::LightPoint;

/// Rainbow wave for a won game.
///
/// Hue follows the light's angle around the tree and drifts as the animation
/// runs. On top of that, sinusoidal bands offset by height swing the hue and
/// brightness, and their crests climb the tree frame by frame.
pub fn rainbow_wave(lights: &[LightPoint], frame: u32, progress: f32, buf: &mut [Rgb]) {
    let drift = progress * RAINBOW_HUE_DRIFT;
    for light in lights {
        let Some(pixel) = buf.get_mut(light.index) else {
            continue;
        };
        let band = rainbow_band(light.height(), frame);
        let hue = (light.theta() + PI) / TAU + drift + RAINBOW_HUE_BAND_DEPTH * band;
        let pulse = RAINBOW_PULSE_BASE + RAINBOW_PULSE_DEPTH * band;
        *pixel = Rgb::from_hue(hue, pulse);
    }
}

/// Band value in [-1, 1] at `height` on `frame`
#[inline]
fn rainbow_band(height: f32, frame: u32) -> f32 {
    (height * RAINBOW_BAND_WAVENUMBER - frame as f32 * RAINBOW_BAND_SPEED).sin()
}

/// White wash for a lost game.
///
/// The tree starts dark. A bright front sweeps from the top of the tree to
/// below the bottom, leaving a trail that fades out over [`WASH_FALLOFF`];
/// lights below the front stay dark until it reaches them.
pub fn white_wash(lights: &[LightPoint], progress: f32, buf: &mut [Rgb]) {
    let front = progress * WASH_TRAVEL;
    for light in lights {
        let Some(pixel) = buf.get_mut(light.index) else {
            continue;
        };
        let depth = 1.0 - light.height();
        *pixel = if depth > front {
            Rgb::BLACK
        } else {
            Rgb::WHITE.scaled(1.0 - (front - depth) / WASH_FALLOFF)
        };
    }
}
