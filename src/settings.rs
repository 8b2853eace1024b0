//! Animation settings
//!
//! The configuration block handed to the constructor. Every field has a
//! default; JSON input may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BRICK_FLOOR, DEFAULT_FPS, FACE_HALF_WIDTH, MAX_FPS, MAX_GRID_CELLS};
use crate::error::{Error, Result};

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 0x7EE_B41C;

/// Brick breaker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // === Timing ===
    /// Host frame rate; `None` means unthrottled
    pub fps: Option<u32>,

    // === Motion ===
    /// Ball speed (radians per frame around the tree, normalized height per frame)
    pub ball_speed: f32,
    /// Paddle AI step (radians per frame)
    pub paddle_speed: f32,
    /// Paddle width (radians)
    pub paddle_width: f32,
    /// Face rotation per frame (radians)
    pub rotation_speed: f32,

    // === Grid ===
    /// Angular divisions of the full circle
    pub num_sections: u32,
    /// Height divisions of the brick area
    pub num_bands: u32,
    /// Lower edge of the brick area (normalized height)
    pub brick_floor: f32,

    // === Determinism ===
    /// Seed for the relaunch direction RNG
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: Some(DEFAULT_FPS),

            ball_speed: 0.02,
            paddle_speed: 0.025,
            paddle_width: 0.8, // ~45 degrees
            rotation_speed: 0.002,

            num_sections: 8,
            num_bands: 8,
            brick_floor: BRICK_FLOOR,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every field against its valid range
    pub fn validate(&self) -> Result<()> {
        if let Some(fps) = self.fps {
            if !(1..=MAX_FPS).contains(&fps) {
                return Err(Error::InvalidSetting {
                    name: "fps",
                    reason: format!("must be between 1 and {} when set, got {}", MAX_FPS, fps),
                });
            }
        }
        positive("ball_speed", self.ball_speed)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("paddle_width", self.paddle_width)?;
        positive("rotation_speed", self.rotation_speed)?;
        if self.paddle_width > 2.0 * FACE_HALF_WIDTH {
            return Err(invalid("paddle_width", "must fit on the 144° face"));
        }
        if self.num_sections == 0 {
            return Err(invalid("num_sections", "must be at least 1"));
        }
        if self.num_bands == 0 {
            return Err(invalid("num_bands", "must be at least 1"));
        }
        match self.num_sections.checked_mul(self.num_bands) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(Error::InvalidSetting {
                    name: "num_bands",
                    reason: format!(
                        "{} sections x {} bands exceeds {} cells",
                        self.num_sections, self.num_bands, MAX_GRID_CELLS
                    ),
                });
            }
        }
        if !(0.0..1.0).contains(&self.brick_floor) {
            return Err(invalid("brick_floor", "must be in [0, 1)"));
        }
        Ok(())
    }

    /// Frame rate used for timing sub-animations
    pub fn effective_fps(&self) -> u32 {
        self.fps.unwrap_or(DEFAULT_FPS)
    }

    /// Number of frames spanning `seconds` at the effective frame rate
    pub fn frames_for(&self, seconds: u32) -> u32 {
        seconds.saturating_mul(self.effective_fps())
    }
}

fn invalid(name: &'static str, reason: &str) -> Error {
    Error::InvalidSetting {
        name,
        reason: reason.to_string(),
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSetting {
            name,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}
