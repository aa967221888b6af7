// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Typed uniform buffers and binding-type shorthands used by the render engine.

pub mod binding_types;
pub mod uniform_buffer;

pub use binding_types::*;
pub use uniform_buffer::{aligned_stride, DynamicUniformBuffer, UniformBuffer};
