//! Mutable scene data model
//!
//! Everything the control panels and keyboard can change lives here, owned
//! by the frame driver. Input handlers never write to it directly; they
//! publish [`SettingChange`](crate::settings::SettingChange)s that the driver
//! applies at the start of the next frame.

use crate::gfx::{camera::Camera, lights::LightRegistry, material::Material};

use super::shape::{DrawMode, Shape};

/// Toggles from the "options" folder plus the animation pause flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub wireframe: bool,
    pub backface_culling: bool,
    pub depth_test: bool,
    pub show_lights: bool,
    /// Pause toggle; nothing in the scene animates yet
    pub animation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wireframe: false,
            backface_culling: true,
            depth_test: true,
            show_lights: true,
            animation: true,
        }
    }
}

impl RenderOptions {
    pub fn draw_mode(&self) -> DrawMode {
        DrawMode::from_wireframe(self.wireframe)
    }
}

/// The complete viewer state read by each frame
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub lights: LightRegistry,
    pub material: Material,
    pub shape: Shape,
    pub options: RenderOptions,
}

impl SceneState {
    pub fn new(camera: Camera, material: Material, options: RenderOptions) -> Self {
        Self {
            camera,
            lights: LightRegistry::new(),
            material,
            shape: Shape::default(),
            options,
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(
            Camera::default(),
            Material::default(),
            RenderOptions::default(),
        )
    }
}
