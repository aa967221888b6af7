// src/lib.rs
//! shadeview
//!
//! An interactive 3D primitive viewer built on wgpu and winit: one selectable
//! primitive on a floor, up to eight Phong lights, a hierarchical transform
//! stack and ImGui control panels.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod settings;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};

/// Creates a viewer with the default configuration
pub fn default() -> Result<ViewerApp> {
    ViewerApp::new(ViewerConfig::default())
}
