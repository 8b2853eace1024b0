//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (row-major section, band)
//! - No rendering dependencies

pub mod collision;
pub mod face;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{BrickEdge, BrickHit, find_brick_hit};
pub use face::Face;
pub use grid::{Brick, BrickColor, BrickGrid};
pub use state::{Ball, GamePhase, GameState, Paddle, PhaseEvent};
pub use tick::tick;
