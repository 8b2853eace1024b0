//! Light geometry
//!
//! Converts the installation's fixed 3D light table into cylindrical
//! coordinates around the tree's vertical axis. Runs once at construction.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize_angle;

/// Cylindrical position of a light relative to the tree axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylindrical {
    /// Distance from the vertical axis
    pub radius: f32,
    /// Angle around the tree, in (-π, π]
    pub theta: f32,
    /// Height normalized to [0, 1] over the table's z-range
    pub height: f32,
}

/// One physical light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightPoint {
    pub index: usize,
    pub cartesian: Vec3,
    pub cylindrical: Cylindrical,
}

impl LightPoint {
    #[inline]
    pub fn theta(&self) -> f32 {
        self.cylindrical.theta
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.cylindrical.height
    }
}

/// Map a light table to cylindrical coordinates.
///
/// The table is centered on its x/y mean first so angles are measured around
/// the tree's own axis rather than the table origin. A table with no height
/// extent maps every light to height 0.
pub fn map_points(points: &[Vec3]) -> Vec<LightPoint> {
    if points.is_empty() {
        return Vec::new();
    }

    let axis = points.iter().map(|p| p.truncate()).sum::<Vec2>() / points.len() as f32;
    let (z_min, z_max) = points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.z), hi.max(p.z)));
    let z_range = z_max - z_min;

    points
        .iter()
        .enumerate()
        .map(|(index, &cartesian)| {
            let offset = cartesian.truncate() - axis;
            let height = if z_range > 0.0 {
                ((cartesian.z - z_min) / z_range).clamp(0.0, 1.0)
            } else {
                0.0
            };
            LightPoint {
                index,
                cartesian,
                cylindrical: Cylindrical {
                    radius: offset.length(),
                    theta: normalize_angle(offset.y.atan2(offset.x)),
                    height,
                },
            }
        })
        .collect()
}

/// Parse a light table from JSON: `[[x, y, z], ...]`
pub fn parse_points_json(json: &str) -> Result<Vec<Vec3>> {
    Ok(serde_json::from_str(json)?)
}

/// Generate a conical spiral light table.
///
/// Lights wind upward around a cone that narrows to a point, the same shape
/// as a string of lights wrapped around a tree. Deterministic, so it can
/// stand in for the surveyed table in tests and demos.
pub fn spiral_cone(count: usize) -> Vec<Vec3> {
    const TURNS: f32 = 14.5;
    const BASE_RADIUS: f32 = 1.0;
    const HEIGHT: f32 = 2.5;

    (0..count)
        .map(|i| {
            let t = if count > 1 { i as f32 / (count - 1) as f32 } else { 0.0 };
            let angle = t * TURNS * std::f32::consts::TAU;
            // Slight radial jitter from the index keeps the cone from being a perfect helix
            let jitter = 1.0 + 0.06 * ((i as f32 * 1.618).sin());
            let radius = BASE_RADIUS * (1.0 - t) * jitter + 0.02;
            Vec3::new(radius * angle.cos(), radius * angle.sin(), t * HEIGHT)
        })
        .collect()
}
