// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Textures owned by the render engine.

pub mod texture_resource;

pub use texture_resource::TextureResource;
