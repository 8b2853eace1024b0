//! Light buffer rendering
//!
//! Turns a [`GameState`](crate::sim::GameState) into one color per light.
//! Display backends consume the buffer; nothing here talks to hardware.

pub mod color;
pub mod compositor;
pub mod effects;

pub use color::{Rgb, as_bytes, from_bytes_mut};
pub use compositor::render;
pub use effects::{rainbow_wave, white_wash};
