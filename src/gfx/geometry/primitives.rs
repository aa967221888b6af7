//! # Primitive Shape Generation
//!
//! This module contains functions to generate the viewer's primitive shapes.
//! All shapes are Y-up, centred on the origin and carry outward normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has its own four vertices so normals stay flat.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // (normal, u axis, v axis)
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    for (normal, u, v) in faces {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            data.vertices.push([
                normal[0] * 0.5 + u[0] * su + v[0] * sv,
                normal[1] * 0.5 + u[1] * su + v[1] * sv,
                normal[2] * 0.5 + u[2] * su + v[2] * sv,
            ]);
            data.normals.push(normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 0.5 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x * 0.5, y * 0.5, z * 0.5]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a capped cylinder along the Y axis
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height of the cylinder (along Y)
/// * `segments` - Number of circular segments
///
/// Returns a cylinder extending from -height/2 to height/2 in Y.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side vertices, bottom/top pairs
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();

        data.vertices.push([radius * cos_a, -half_height, radius * sin_a]);
        data.normals.push([cos_a, 0.0, sin_a]);
        data.vertices.push([radius * cos_a, half_height, radius * sin_a]);
        data.normals.push([cos_a, 0.0, sin_a]);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let bottom_next = bottom + 2;
        let top_next = bottom + 3;

        data.indices.extend_from_slice(&[bottom, top, bottom_next]);
        data.indices.extend_from_slice(&[top, top_next, bottom_next]);
    }

    // Caps get their own rim vertices so their normals stay flat
    for (y, ny) in [(-half_height, -1.0), (half_height, 1.0)] {
        let center = data.vertices.len() as u32;
        data.vertices.push([0.0, y, 0.0]);
        data.normals.push([0.0, ny, 0.0]);

        let rim = data.vertices.len() as u32;
        for i in 0..=segs {
            let angle = i as f32 * 2.0 * PI / segs as f32;
            let (sin_a, cos_a) = angle.sin_cos();
            data.vertices.push([radius * cos_a, y, radius * sin_a]);
            data.normals.push([0.0, ny, 0.0]);
        }

        for i in 0..segs {
            if ny > 0.0 {
                data.indices
                    .extend_from_slice(&[center, rim + i + 1, rim + i]);
            } else {
                data.indices
                    .extend_from_slice(&[center, rim + i, rim + i + 1]);
            }
        }
    }

    data
}

/// Generate a square pyramid with a unit base and unit height
///
/// The base sits at y = -0.5 and the apex at y = 0.5.
pub fn generate_pyramid() -> GeometryData {
    let mut data = GeometryData::new();

    let apex = [0.0, 0.5, 0.0];
    let corners = [
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, -0.5, -0.5],
        [-0.5, -0.5, -0.5],
    ];

    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let normal = face_normal(a, b, apex);

        let base = data.vertices.len() as u32;
        data.vertices.extend_from_slice(&[a, b, apex]);
        data.normals.extend_from_slice(&[normal, normal, normal]);
        data.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    let base = data.vertices.len() as u32;
    for corner in corners {
        data.vertices.push(corner);
        data.normals.push([0.0, -1.0, 0.0]);
    }
    data.indices
        .extend_from_slice(&[base, base + 3, base + 2, base + 2, base + 1, base]);

    data
}

/// Generate a torus lying in the XZ plane
///
/// # Arguments
/// * `major_radius` - Distance from the centre to the middle of the tube
/// * `minor_radius` - Radius of the tube
/// * `ring_segments` - Segments around the ring
/// * `tube_segments` - Segments around the tube
pub fn generate_torus(
    major_radius: f32,
    minor_radius: f32,
    ring_segments: u32,
    tube_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let ring_segs = ring_segments.max(3);
    let tube_segs = tube_segments.max(3);

    for ring in 0..=ring_segs {
        let u = ring as f32 * 2.0 * PI / ring_segs as f32;
        let (sin_u, cos_u) = u.sin_cos();

        for tube in 0..=tube_segs {
            let v = tube as f32 * 2.0 * PI / tube_segs as f32;
            let (sin_v, cos_v) = v.sin_cos();

            let r = major_radius + minor_radius * cos_v;
            data.vertices
                .push([r * cos_u, minor_radius * sin_v, r * sin_u]);
            data.normals.push([cos_v * cos_u, sin_v, cos_v * sin_u]);
        }
    }

    for ring in 0..ring_segs {
        for tube in 0..tube_segs {
            let first = ring * (tube_segs + 1) + tube;
            let second = first + tube_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 0.0 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 1.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Shape;

    fn height(data: &GeometryData) -> (f32, f32) {
        let min = data.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        let max = data.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        (min, max)
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube
            .vertices
            .iter()
            .flatten()
            .all(|c| (c.abs() - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let cube = generate_cube();
        for tri in cube.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|i| cube.vertices[tri[i] as usize]);
            let n = face_normal(a, b, c);
            let expected = cube.normals[tri[0] as usize];
            let dot = n[0] * expected[0] + n[1] * expected[1] + n[2] * expected[2];
            assert!(dot > 0.99, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn test_shapes_are_centred_with_expected_height() {
        for shape in Shape::ALL {
            let data = GeometryData::for_shape(shape);
            let (min, max) = height(&data);
            let half = if shape == Shape::Torus { 0.2 } else { 0.5 };
            assert!((min + half).abs() < 1e-5, "{shape} bottom at {min}");
            assert!((max - half).abs() < 1e-5, "{shape} top at {max}");
            assert_eq!(data.vertices.len(), data.normals.len());
            assert!(data.indices.iter().all(|&i| (i as usize) < data.vertices.len()));
        }
    }

    #[test]
    fn test_pyramid_generation() {
        let pyramid = generate_pyramid();
        assert_eq!(pyramid.triangle_count(), 6);
        // Side normals tilt upward and outward.
        assert!(pyramid.normals[0][1] > 0.0);
        assert!(pyramid.normals[0][2] > 0.0);
    }

    #[test]
    fn test_edge_indices_are_unique() {
        let cube = generate_cube();
        let lines = cube.edge_indices();
        assert_eq!(lines.len() % 2, 0);
        // 6 faces * (4 sides + 1 diagonal), no shared vertices between faces
        assert_eq!(lines.len() / 2, 30);
    }
}
