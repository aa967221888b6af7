//! Primitive selection and draw modes

use std::fmt;

/// The primitive meshes the viewer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    Cube,
    #[default]
    Sphere,
    Cylinder,
    Pyramid,
    Torus,
}

impl Shape {
    /// Order used by the object panel's combo box
    pub const ALL: [Shape; 5] = [
        Shape::Cube,
        Shape::Sphere,
        Shape::Cylinder,
        Shape::Pyramid,
        Shape::Torus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Cube => "cube",
            Shape::Sphere => "sphere",
            Shape::Cylinder => "cylinder",
            Shape::Pyramid => "pyramid",
            Shape::Torus => "torus",
        }
    }

    /// Position of this shape in [`Shape::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a mesh is rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Edges only
    Wireframe,
    #[default]
    Filled,
}

impl DrawMode {
    pub fn from_wireframe(wireframe: bool) -> Self {
        if wireframe {
            DrawMode::Wireframe
        } else {
            DrawMode::Filled
        }
    }

    pub fn is_wireframe(&self) -> bool {
        matches!(self, DrawMode::Wireframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_index_matches_all() {
        for (i, shape) in Shape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
        }
        assert_eq!(Shape::default(), Shape::Sphere);
    }

    #[test]
    fn test_draw_mode_from_wireframe() {
        assert!(DrawMode::from_wireframe(true).is_wireframe());
        assert_eq!(DrawMode::from_wireframe(false), DrawMode::Filled);
    }
}
