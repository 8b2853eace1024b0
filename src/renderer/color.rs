//! Per-light color type for the output buffer

use bytemuck::{Pod, Zeroable};
use palette::{FromColor, Hsv, Srgb};

/// One light's color, laid out as three bytes so a whole frame can be handed
/// to a display backend as a flat `[u8]`
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated color from a hue in turns (wraps) and a value in [0, 1]
    pub fn from_hue(hue: f32, value: f32) -> Self {
        let hsv: Hsv = Hsv::new(hue.rem_euclid(1.0) * 360.0, 1.0, value.clamp(0.0, 1.0));
        let rgb: Srgb = Srgb::from_color(hsv);
        let rgb: Srgb<u8> = rgb.into_format();
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    /// Every channel multiplied by `factor`, clamped to [0, 1]
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// View a frame as raw bytes (`r, g, b` per light)
pub fn as_bytes(frame: &[Rgb]) -> &[u8] {
    bytemuck::cast_slice(frame)
}

/// View a flat byte buffer as a frame. `None` when the length is not a
/// multiple of three.
pub fn from_bytes_mut(bytes: &mut [u8]) -> Option<&mut [Rgb]> {
    bytemuck::try_cast_slice_mut(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_three_bytes() {
        assert_eq!(std::mem::size_of::<Rgb>(), 3);
        let frame = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)];
        assert_eq!(as_bytes(&frame), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_bytes_mut() {
        let mut bytes = [0u8; 6];
        let frame = from_bytes_mut(&mut bytes).expect("six bytes is two lights");
        frame[1] = Rgb::new(9, 8, 7);
        assert_eq!(bytes, [0, 0, 0, 9, 8, 7]);

        let mut ragged = [0u8; 5];
        assert!(from_bytes_mut(&mut ragged).is_none());
    }

    #[test]
    fn test_from_hue_primaries() {
        assert_eq!(Rgb::from_hue(0.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hue(1.0 / 3.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hue(2.0 / 3.0, 1.0), Rgb::new(0, 0, 255));
        // Hue wraps
        assert_eq!(Rgb::from_hue(1.0, 1.0), Rgb::from_hue(0.0, 1.0));
        assert_eq!(Rgb::from_hue(0.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn test_scaled() {
        assert_eq!(Rgb::WHITE.scaled(1.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.scaled(0.0), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.scaled(0.5), Rgb::new(127, 127, 127));
        assert_eq!(Rgb::WHITE.scaled(3.0), Rgb::WHITE);
    }
}
