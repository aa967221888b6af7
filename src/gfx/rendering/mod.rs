// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! The wgpu backend behind the shading protocol: uniform mirroring, pipeline
//! variants, primitive meshes and frame submission.

pub mod mesh;
pub mod pipeline_manager;
pub mod render_engine;
pub mod uniforms;
pub mod vertex;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineKey, PipelineManager};
pub use render_engine::RenderEngine;
