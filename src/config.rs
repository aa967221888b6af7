//! Viewer configuration
//!
//! Start-up values for the window, camera, material, lights and render
//! options. Nothing here is persisted; it only seeds the initial state.

use crate::gfx::{
    camera::Camera,
    lights::Light,
    material::Material,
    scene::{RenderOptions, SceneLayout},
};

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial logical window size
    pub window_size: (u32, u32),
    pub camera: Camera,
    pub material: Material,
    /// Light created at start-up and by every "add light" action
    pub light_template: Light,
    pub initial_lights: usize,
    pub layout: SceneLayout,
    pub clear_color: [f64; 4],
    pub options: RenderOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "shadeview".to_string(),
            window_size: (1200, 800),
            camera: Camera::default(),
            material: Material::default(),
            light_template: Light::default(),
            initial_lights: 1,
            layout: SceneLayout::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            options: RenderOptions::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_light_template(mut self, light: Light) -> Self {
        self.light_template = light;
        self
    }

    pub fn with_initial_lights(mut self, count: usize) -> Self {
        self.initial_lights = count;
        self
    }

    /// Sets floor thickness, keeping the rest of the layout
    pub fn with_floor_height(mut self, height: f32) -> Self {
        self.layout.floor_height = height;
        self
    }

    pub fn with_layout(mut self, layout: SceneLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_clear_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.clear_color = [r, g, b, 1.0];
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}
