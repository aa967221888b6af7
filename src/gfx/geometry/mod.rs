//! # Procedural Geometry Generation
//!
//! Generates the primitive meshes the viewer can display. Every primitive is
//! centred on the origin; all but the torus span exactly one unit in Y.
//!
//! ## Supported Primitives
//!
//! - **Cube**: edge length 1
//! - **Sphere**: UV sphere, radius 0.5
//! - **Cylinder**: radius 0.5, axis along Y
//! - **Pyramid**: square base of side 1, apex on +Y
//! - **Torus**: ring in the XZ plane, radii 0.5 and 0.2
//!
//! ## Usage
//!
//! ```rust
//! use shadeview::gfx::geometry::{generate_cube, generate_sphere};
//!
//! let cube = generate_cube();
//! let sphere = generate_sphere(32, 16);
//! let lines = sphere.edge_indices();
//! assert!(!lines.is_empty());
//! ```

pub mod primitives;

pub use primitives::*;

use std::collections::HashSet;

use crate::gfx::{rendering::vertex::Vertex3D, scene::Shape};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry for one of the selectable primitives
    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Cube => generate_cube(),
            Shape::Sphere => generate_sphere(32, 16),
            Shape::Cylinder => generate_cylinder(0.5, 1.0, 32),
            Shape::Pyramid => generate_pyramid(),
            Shape::Torus => generate_torus(0.5, 0.2, 32, 16),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique triangle edges as a line list, for wireframe drawing
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();

        for triangle in self.indices.chunks_exact(3) {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                if a == b {
                    continue;
                }
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    lines.push(key.0);
                    lines.push(key.1);
                }
            }
        }

        lines
    }

    /// Interleaves positions and normals into GPU vertices
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
