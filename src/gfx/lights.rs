//! Light registry
//!
//! A flat, append-only store of up to [`MAX_LIGHTS`] lights. Slot order is
//! insertion order and is load-bearing: the shading stage addresses lights by
//! positional index, so light `N` is always uploaded to array slot `N`.
//! Lights are never removed or reordered, and inactive lights keep their slot.

use cgmath::{Point3, Vector3};

use super::color::Rgb255;

/// Capacity of the registry and of the shading stage's light array
pub const MAX_LIGHTS: usize = 8;

/// A point or directional light.
///
/// For directional lights `position` is interpreted as the direction the
/// light comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    pub ambient: Rgb255,
    pub diffuse: Rgb255,
    pub specular: Rgb255,
    pub is_directional: bool,
    pub is_active: bool,
}

impl Default for Light {
    /// The light created by the "Add a new light" control
    fn default() -> Self {
        Self {
            position: Point3::new(3.0, 5.0, 0.0),
            ambient: Rgb255::splat(10.0),
            diffuse: Rgb255::WHITE,
            specular: Rgb255::WHITE,
            is_directional: false,
            is_active: true,
        }
    }
}

impl Light {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set ambient intensity
    pub fn with_ambient(mut self, ambient: Rgb255) -> Self {
        self.ambient = ambient;
        self
    }

    /// Builder pattern: Set diffuse intensity
    pub fn with_diffuse(mut self, diffuse: Rgb255) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Builder pattern: Set specular intensity
    pub fn with_specular(mut self, specular: Rgb255) -> Self {
        self.specular = specular;
        self
    }

    /// Builder pattern: Mark as directional
    pub fn with_directional(mut self, directional: bool) -> Self {
        self.is_directional = directional;
        self
    }

    /// Builder pattern: Set active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

/// Fixed-capacity light storage with an explicit count.
///
/// Index arguments must be `< len()`; anything else is a caller bug and panics.
#[derive(Debug, Clone)]
pub struct LightRegistry {
    slots: [Light; MAX_LIGHTS],
    count: usize,
}

impl Default for LightRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LightRegistry {
    pub fn new() -> Self {
        Self {
            slots: [Light::default(); MAX_LIGHTS],
            count: 0,
        }
    }

    /// Appends a light if there is room.
    ///
    /// Returns `false` and leaves the registry untouched when it is already
    /// at [`MAX_LIGHTS`].
    pub fn add(&mut self, light: Light) -> bool {
        if self.count >= MAX_LIGHTS {
            return false;
        }
        self.slots[self.count] = light;
        self.count += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == MAX_LIGHTS
    }

    pub fn get(&self, index: usize) -> &Light {
        &self.as_slice()[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Light {
        let count = self.count;
        &mut self.slots[..count][index]
    }

    pub fn toggle_active(&mut self, index: usize) {
        let light = self.get_mut(index);
        light.is_active = !light.is_active;
    }

    pub fn set_active(&mut self, index: usize, active: bool) {
        self.get_mut(index).is_active = active;
    }

    pub fn set_directional(&mut self, index: usize, directional: bool) {
        self.get_mut(index).is_directional = directional;
    }

    pub fn set_position(&mut self, index: usize, position: Point3<f32>) {
        self.get_mut(index).position = position;
    }

    /// Moves a light by `delta`, used by the per-axis position controls
    pub fn offset_position(&mut self, index: usize, delta: Vector3<f32>) {
        let light = self.get_mut(index);
        light.position += delta;
    }

    pub fn set_ambient(&mut self, index: usize, ambient: Rgb255) {
        self.get_mut(index).ambient = ambient;
    }

    pub fn set_diffuse(&mut self, index: usize, diffuse: Rgb255) {
        self.get_mut(index).diffuse = diffuse;
    }

    pub fn set_specular(&mut self, index: usize, specular: Rgb255) {
        self.get_mut(index).specular = specular;
    }

    /// Occupied slots in upload order
    pub fn as_slice(&self) -> &[Light] {
        &self.slots[..self.count]
    }

    /// Lights paired with their upload slot, in insertion order
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &Light)> {
        self.as_slice().iter().enumerate()
    }

    /// Calls `f` for every light with its slot index, in insertion order
    pub fn for_each_indexed<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Light),
    {
        for (index, light) in self.iter_indexed() {
            f(index, light);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_until_capacity() {
        let mut registry = LightRegistry::new();
        for i in 0..MAX_LIGHTS {
            assert!(registry.add(Light::new(Point3::new(i as f32, 0.0, 0.0))));
        }
        assert_eq!(registry.len(), MAX_LIGHTS);
        assert!(registry.is_full());

        let before = registry.as_slice().to_vec();
        assert!(!registry.add(Light::default()));
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.as_slice(), &before[..]);
    }

    #[test]
    fn test_insertion_order_is_slot_order() {
        let mut registry = LightRegistry::new();
        registry.add(Light::new(Point3::new(1.0, 0.0, 0.0)));
        registry.add(Light::new(Point3::new(2.0, 0.0, 0.0)));
        registry.add(Light::new(Point3::new(3.0, 0.0, 0.0)));

        let mut seen = Vec::new();
        registry.for_each_indexed(|i, light| seen.push((i, light.position.x)));
        assert_eq!(seen, vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
    }

    #[test]
    fn test_deactivated_light_keeps_its_slot() {
        let mut registry = LightRegistry::new();
        for _ in 0..3 {
            registry.add(Light::default());
        }
        registry.toggle_active(1);

        assert_eq!(registry.len(), 3);
        assert!(registry.get(0).is_active);
        assert!(!registry.get(1).is_active);
        assert!(registry.get(2).is_active);

        registry.toggle_active(1);
        assert!(registry.get(1).is_active);
    }

    #[test]
    fn test_edit_accessors() {
        let mut registry = LightRegistry::new();
        registry.add(Light::default());
        registry.set_directional(0, true);
        registry.set_position(0, Point3::new(-1.0, 2.0, 0.5));
        registry.offset_position(0, Vector3::new(1.0, 0.0, 0.0));
        registry.set_ambient(0, Rgb255::splat(20.0));
        registry.set_diffuse(0, Rgb255::new(255.0, 0.0, 0.0));
        registry.set_specular(0, Rgb255::BLACK);

        let light = registry.get(0);
        assert!(light.is_directional);
        assert_eq!(light.position, Point3::new(0.0, 2.0, 0.5));
        assert_eq!(light.ambient, Rgb255::splat(20.0));
        assert_eq!(light.diffuse, Rgb255::new(255.0, 0.0, 0.0));
        assert_eq!(light.specular, Rgb255::BLACK);
    }

    #[test]
    #[should_panic]
    fn test_index_past_count_panics() {
        let mut registry = LightRegistry::new();
        registry.add(Light::default());
        registry.toggle_active(1);
    }
}
