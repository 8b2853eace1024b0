//! Brick grid
//!
//! Splits the tree into `num_sections` angular slices and `num_bands` height
//! bands over the brick area. Every light in the brick area lands in exactly
//! one (section, band) cell; each non-empty cell becomes a brick.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::geometry::LightPoint;

/// Checkerboard brick color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Red,
    Green,
}

impl BrickColor {
    /// Red on even `section + band`, green on odd
    pub fn for_cell(section: u32, band: u32) -> Self {
        if (section + band) % 2 == 0 {
            BrickColor::Red
        } else {
            BrickColor::Green
        }
    }
}

/// A brick covering one grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub section: u32,
    pub band: u32,
    /// Light indices inside this cell
    pub members: Vec<usize>,
    /// False once hit; restored on game reset
    pub active: bool,
    /// Circular mean of member angles
    pub center_theta: f32,
    /// Mean member height
    pub center_height: f32,
    pub color: BrickColor,
}

/// Dense section x band grid of bricks
#[derive(Debug, Clone)]
pub struct BrickGrid {
    pub num_sections: u32,
    pub num_bands: u32,
    /// Lower edge of the brick area (normalized height)
    pub floor: f32,
    /// Angular width of one section (radians)
    pub section_width: f32,
    /// Height of one band (normalized)
    pub band_height: f32,
    /// `cells[section * num_bands + band]`; `None` marks an empty cell
    cells: Vec<Option<usize>>,
    /// Bricks in row-major (section, band) order
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Assign lights to cells and build one brick per non-empty cell.
    ///
    /// `num_sections` and `num_bands` must be at least 1, their product no
    /// more than [`MAX_GRID_CELLS`](crate::consts::MAX_GRID_CELLS), and
    /// `floor` below 1; settings validation guarantees all three.
    pub fn build(lights: &[LightPoint], num_sections: u32, num_bands: u32, floor: f32) -> Self {
        let section_width = TAU / num_sections as f32;
        let band_height = (1.0 - floor) / num_bands as f32;

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); num_sections as usize * num_bands as usize];
        for light in lights {
            if let Some((section, band)) = cell_of(light, num_sections, num_bands, floor) {
                members[slot(section, band, num_bands)].push(light.index);
            }
        }

        let mut cells = vec![None; members.len()];
        let mut bricks = Vec::new();
        for section in 0..num_sections {
            for band in 0..num_bands {
                let cell = slot(section, band, num_bands);
                let indices = std::mem::take(&mut members[cell]);
                if indices.is_empty() {
                    continue;
                }

                let (sin_sum, cos_sum, height_sum) =
                    indices.iter().fold((0.0f32, 0.0f32, 0.0f32), |(s, c, h), &i| {
                        let light = &lights[i];
                        (s + light.theta().sin(), c + light.theta().cos(), h + light.height())
                    });

                cells[cell] = Some(bricks.len());
                bricks.push(Brick {
                    section,
                    band,
                    active: true,
                    center_theta: crate::normalize_angle(sin_sum.atan2(cos_sum)),
                    center_height: height_sum / indices.len() as f32,
                    color: BrickColor::for_cell(section, band),
                    members: indices,
                });
            }
        }

        log::info!(
            "Grid setup complete: {} bricks ({} sections of {:.1}°, {} bands of {:.3})",
            bricks.len(),
            num_sections,
            section_width.to_degrees(),
            num_bands,
            band_height
        );

        Self {
            num_sections,
            num_bands,
            floor,
            section_width,
            band_height,
            cells,
            bricks,
        }
    }

    /// Bricks in row-major (section, band) order
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    /// Brick index for a cell, if the cell is non-empty
    pub fn brick_at(&self, section: u32, band: u32) -> Option<usize> {
        if section >= self.num_sections || band >= self.num_bands {
            return None;
        }
        self.cells[slot(section, band, self.num_bands)]
    }

    /// Center angle of a section
    #[inline]
    pub fn section_center(&self, section: u32) -> f32 {
        -PI + (section as f32 + 0.5) * self.section_width
    }

    /// Fresh copy of all bricks, every one active
    pub fn fresh_bricks(&self) -> Vec<Brick> {
        self.bricks.clone()
    }

    /// Number of bricks a full board has
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn average_members(&self) -> f32 {
        if self.bricks.is_empty() {
            return 0.0;
        }
        let total: usize = self.bricks.iter().map(|b| b.members.len()).sum();
        total as f32 / self.bricks.len() as f32
    }
}

/// Row-major index of a cell
#[inline]
fn slot(section: u32, band: u32, num_bands: u32) -> usize {
    section as usize * num_bands as usize + band as usize
}

/// Cell of a light, or `None` below the brick area
fn cell_of(light: &LightPoint, num_sections: u32, num_bands: u32, floor: f32) -> Option<(u32, u32)> {
    let height = light.height();
    if height < floor {
        return None;
    }

    let turn = (light.theta() + PI) / TAU;
    let section = ((turn * num_sections as f32).floor() as u32) % num_sections;

    let band = ((height - floor) / (1.0 - floor) * num_bands as f32).floor() as u32;
    Some((section, band.min(num_bands - 1)))
}
