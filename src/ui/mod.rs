//! # User Interface Module
//!
//! Dear ImGui overlay for the viewer.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu: input capture,
//!   frame building and rendering on top of the 3D scene
//! - [`panel`] - The "Settings" panel (options, camera, lights) and the
//!   "Object" panel (shape, material)
//!
//! Panels only publish [`SettingChange`](crate::settings::SettingChange)s;
//! keyboard shortcuts are ignored while ImGui has keyboard focus.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{object_panel, settings_panel};
