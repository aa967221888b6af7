//! Phong material parameters
//!
//! A single [`Material`] applies to whichever primitive is selected. The floor
//! always uses [`FLOOR_MATERIAL`] and never reads the editable one.

use super::color::Rgb255;

/// Surface reflectance in the 0–255 colour range.
///
/// `shininess` is kept non-negative by the panel's slider range only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ka: Rgb255,
    pub kd: Rgb255,
    pub ks: Rgb255,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(
            Rgb255::new(93.0, 255.0, 0.0),
            Rgb255::new(0.0, 255.0, 30.0),
            Rgb255::WHITE,
            12.0,
        )
    }
}

/// Hard-coded green material used for the ground plane
pub const FLOOR_MATERIAL: Material = Material::new(
    Rgb255::new(0.0, 100.0, 0.0),
    Rgb255::new(0.0, 160.0, 0.0),
    Rgb255::new(40.0, 40.0, 40.0),
    50.0,
);

impl Material {
    pub const fn new(ka: Rgb255, kd: Rgb255, ks: Rgb255, shininess: f32) -> Self {
        Self {
            ka,
            kd,
            ks,
            shininess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_differs_from_default() {
        let object = Material::default();
        assert_ne!(object, FLOOR_MATERIAL);
        assert_eq!(object.shininess, 12.0);
        assert_eq!(FLOOR_MATERIAL.shininess, 50.0);
        assert_eq!(FLOOR_MATERIAL.kd.normalized()[1], 160.0 / 255.0);
    }
}
