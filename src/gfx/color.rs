//! User-facing colour values
//!
//! Colours are edited in the 0–255 range the control panels expose and only
//! converted to the 0.0–1.0 range the shading stage expects at upload time.

/// An RGB triple stored in the 0–255 range.
///
/// Components are `f32` so colour pickers can edit them in place, but they
/// are conceptually byte-ranged. No clamping is applied anywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb255(pub [f32; 3]);

impl Rgb255 {
    pub const BLACK: Rgb255 = Rgb255([0.0, 0.0, 0.0]);
    pub const WHITE: Rgb255 = Rgb255([255.0, 255.0, 255.0]);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// Uniform grey, `v` on every channel
    pub const fn splat(v: f32) -> Self {
        Self([v, v, v])
    }

    /// Converts to the 0.0–1.0 range, `channel / 255.0` per channel.
    ///
    /// Out-of-range inputs pass straight through the division.
    pub fn normalized(&self) -> [f32; 3] {
        [
            normalize_channel(self.0[0]),
            normalize_channel(self.0[1]),
            normalize_channel(self.0[2]),
        ]
    }

    /// Colour picker view (0.0–1.0) used by the imgui panels
    pub fn to_picker(&self) -> [f32; 3] {
        self.normalized()
    }

    /// Inverse of [`Rgb255::to_picker`]
    pub fn from_picker(picker: [f32; 3]) -> Self {
        Self([picker[0] * 255.0, picker[1] * 255.0, picker[2] * 255.0])
    }
}

impl From<[f32; 3]> for Rgb255 {
    fn from(value: [f32; 3]) -> Self {
        Self(value)
    }
}

#[inline]
pub fn normalize_channel(channel: f32) -> f32 {
    channel / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extremes() {
        assert_eq!(normalize_channel(255.0), 1.0);
        assert_eq!(normalize_channel(0.0), 0.0);
    }

    #[test]
    fn test_normalize_midpoint_per_channel() {
        let n = Rgb255::new(128.0, 0.0, 255.0).normalized();
        assert!((n[0] - 0.501_96).abs() < 1e-4);
        assert_eq!(n[1], 0.0);
        assert_eq!(n[2], 1.0);
    }

    #[test]
    fn test_no_clamping() {
        let n = Rgb255::new(510.0, -255.0, 0.0).normalized();
        assert_eq!(n, [2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_picker_round_trip() {
        let c = Rgb255::new(93.0, 255.0, 0.0);
        let back = Rgb255::from_picker(c.to_picker());
        for i in 0..3 {
            assert!((back.0[i] - c.0[i]).abs() < 1e-3);
        }
    }
}
