//! GPU-resident primitive meshes
//!
//! Every [`Shape`] is uploaded once when the render engine starts. Each mesh
//! carries two index buffers: triangles for filled drawing and unique edges
//! for wireframe drawing.

use wgpu::util::DeviceExt;

use crate::gfx::{
    geometry::GeometryData,
    scene::{DrawMode, Shape},
};

pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    triangle_indices: wgpu::Buffer,
    triangle_index_count: u32,
    edge_indices: wgpu::Buffer,
    edge_index_count: u32,
}

impl GpuMesh {
    pub fn from_geometry(device: &wgpu::Device, label: &str, geometry: &GeometryData) -> Self {
        let vertices = geometry.to_vertices();
        let edges = geometry.edge_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangle_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Triangle Indices")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Edge Indices")),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            triangle_indices,
            triangle_index_count: geometry.indices.len() as u32,
            edge_indices,
            edge_index_count: edges.len() as u32,
        }
    }

    /// Binds the buffers for `mode` and issues an indexed draw
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, mode: DrawMode) {
        let (indices, count) = match mode {
            DrawMode::Filled => (&self.triangle_indices, self.triangle_index_count),
            DrawMode::Wireframe => (&self.edge_indices, self.edge_index_count),
        };
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..count, 0, 0..1);
    }
}

/// One uploaded mesh per selectable shape
pub struct MeshLibrary {
    meshes: Vec<GpuMesh>,
}

impl MeshLibrary {
    pub fn new(device: &wgpu::Device) -> Self {
        let meshes = Shape::ALL
            .iter()
            .map(|shape| {
                let geometry = GeometryData::for_shape(*shape);
                log::debug!(
                    "uploading {} mesh: {} vertices, {} triangles",
                    shape,
                    geometry.vertex_count(),
                    geometry.triangle_count()
                );
                GpuMesh::from_geometry(device, shape.label(), &geometry)
            })
            .collect();
        Self { meshes }
    }

    pub fn get(&self, shape: Shape) -> &GpuMesh {
        &self.meshes[shape.index()]
    }
}
