//! Face rotation and visibility
//!
//! The playable face is a ±72° window centered on a viewing angle that creeps
//! around the tree every frame, whatever the game phase. Each new game
//! therefore starts on a different side of the tree.

use serde::{Deserialize, Serialize};

use super::grid::BrickGrid;
use crate::consts::FACE_HALF_WIDTH;
use crate::{angular_distance, normalize_angle};

/// Current viewing direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Center of the playable face, in (-π, π]
    pub viewing_angle: f32,
}

impl Face {
    pub fn new(viewing_angle: f32) -> Self {
        Self {
            viewing_angle: normalize_angle(viewing_angle),
        }
    }

    /// Advance the viewing angle by one frame of rotation
    pub fn advance(&mut self, rotation_speed: f32) {
        self.viewing_angle = normalize_angle(self.viewing_angle + rotation_speed);
    }

    /// Signed offset of `theta` from the face center
    #[inline]
    pub fn offset_of(&self, theta: f32) -> f32 {
        angular_distance(theta, self.viewing_angle)
    }

    /// Whether an angle lies on the front face
    #[inline]
    pub fn is_front(&self, theta: f32) -> bool {
        self.offset_of(theta).abs() <= FACE_HALF_WIDTH
    }

    /// Whether a grid section's center lies on the front face
    pub fn is_section_front(&self, grid: &BrickGrid, section: u32) -> bool {
        self.is_front(grid.section_center(section))
    }

    /// Front flag for every section, indexed by section
    pub fn front_sections(&self, grid: &BrickGrid) -> Vec<bool> {
        (0..grid.num_sections)
            .map(|section| self.is_section_front(grid, section))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{map_points, spiral_cone};
    use std::f32::consts::PI;

    #[test]
    fn test_advance_wraps() {
        let mut face = Face::new(PI - 0.001);
        face.advance(0.002);
        assert!(face.viewing_angle < 0.0);
        assert!((face.viewing_angle - (-PI + 0.001)).abs() < 1e-5);
    }

    #[test]
    fn test_front_window_across_seam() {
        let face = Face::new(PI);
        assert!(face.is_front(-PI + 0.5));
        assert!(face.is_front(PI - 0.5));
        assert!(!face.is_front(0.0));
        assert!(Face::new(0.0).is_front(FACE_HALF_WIDTH - 1e-4));
        assert!(!Face::new(0.0).is_front(FACE_HALF_WIDTH + 1e-4));
    }

    #[test]
    fn test_front_sections_default_grid() {
        let grid = BrickGrid::build(&map_points(&spiral_cone(500)), 8, 8, 0.33);
        // Section centers sit at -157.5°, -112.5°, ..., 157.5°; facing 0° sees
        // -67.5°, -22.5°, 22.5° and 67.5°
        let front = Face::new(0.0).front_sections(&grid);
        assert_eq!(front, vec![false, false, true, true, true, true, false, false]);
    }
}
