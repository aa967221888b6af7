//! Typed settings changes
//!
//! Controls (panels, keyboard, window events) never mutate the scene. Each
//! publishes a [`SettingChange`] through a [`SettingsPublisher`]; the frame
//! driver owns the [`SettingsBus`] and applies everything pending at the start
//! of the next frame, before camera matrices are computed.

use std::sync::mpsc::{self, Receiver, Sender};

use cgmath::{Point3, Vector3};

use crate::gfx::{color::Rgb255, lights::Light, scene::Shape, scene::SceneState};

/// A single edit to the viewer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    // Camera
    Fovy(f32),
    Near(f32),
    Far(f32),
    Eye(Point3<f32>),
    At(Point3<f32>),
    Up(Vector3<f32>),
    Resize { width: u32, height: u32 },

    // Options
    Wireframe(bool),
    BackfaceCulling(bool),
    DepthTest(bool),
    ShowLights(bool),
    ToggleAnimation,

    // Object
    Shape(Shape),
    MaterialKa(Rgb255),
    MaterialKd(Rgb255),
    MaterialKs(Rgb255),
    Shininess(f32),

    // Lights
    AddLight,
    LightPosition { index: usize, position: Point3<f32> },
    LightAmbient { index: usize, color: Rgb255 },
    LightDiffuse { index: usize, color: Rgb255 },
    LightSpecular { index: usize, color: Rgb255 },
    LightDirectional { index: usize, directional: bool },
    LightActive { index: usize, active: bool },
}

impl SettingChange {
    /// Applies the change to `scene`.
    ///
    /// `light_template` is the light created by [`SettingChange::AddLight`].
    /// Light indices must refer to existing lights.
    pub fn apply_to(self, scene: &mut SceneState, light_template: &Light) {
        match self {
            SettingChange::Fovy(fovy) => scene.camera.set_fovy(fovy),
            SettingChange::Near(near) => scene.camera.set_near(near),
            SettingChange::Far(far) => scene.camera.set_far(far),
            SettingChange::Eye(eye) => scene.camera.eye = eye,
            SettingChange::At(at) => scene.camera.at = at,
            SettingChange::Up(up) => scene.camera.up = up,
            SettingChange::Resize { width, height } => {
                log::debug!("resize to {width}x{height}");
                scene.camera.resize_projection(width, height);
            }

            SettingChange::Wireframe(wireframe) => {
                log::debug!("wireframe mode: {wireframe}");
                scene.options.wireframe = wireframe;
            }
            SettingChange::BackfaceCulling(on) => scene.options.backface_culling = on,
            SettingChange::DepthTest(on) => scene.options.depth_test = on,
            SettingChange::ShowLights(on) => scene.options.show_lights = on,
            SettingChange::ToggleAnimation => {
                scene.options.animation = !scene.options.animation;
                log::debug!("animation: {}", scene.options.animation);
            }

            SettingChange::Shape(shape) => {
                if scene.shape != shape {
                    log::info!("shape changed from {} to {}", scene.shape, shape);
                }
                scene.shape = shape;
            }
            SettingChange::MaterialKa(c) => scene.material.ka = c,
            SettingChange::MaterialKd(c) => scene.material.kd = c,
            SettingChange::MaterialKs(c) => scene.material.ks = c,
            SettingChange::Shininess(s) => scene.material.shininess = s,

            SettingChange::AddLight => {
                if scene.lights.add(*light_template) {
                    log::info!("added light {}", scene.lights.len());
                } else {
                    log::warn!("light not added: registry is full");
                }
            }
            SettingChange::LightPosition { index, position } => {
                scene.lights.set_position(index, position)
            }
            SettingChange::LightAmbient { index, color } => scene.lights.set_ambient(index, color),
            SettingChange::LightDiffuse { index, color } => scene.lights.set_diffuse(index, color),
            SettingChange::LightSpecular { index, color } => {
                scene.lights.set_specular(index, color)
            }
            SettingChange::LightDirectional { index, directional } => {
                scene.lights.set_directional(index, directional)
            }
            SettingChange::LightActive { index, active } => scene.lights.set_active(index, active),
        }
    }
}

/// Publishing half handed to controls
#[derive(Debug, Clone)]
pub struct SettingsPublisher {
    sender: Sender<SettingChange>,
}

impl SettingsPublisher {
    pub fn publish(&self, change: SettingChange) {
        if self.sender.send(change).is_err() {
            log::warn!("settings change {change:?} dropped: no subscriber");
        }
    }
}

/// Subscriber side, owned by the frame driver
#[derive(Debug)]
pub struct SettingsBus {
    sender: Sender<SettingChange>,
    receiver: Receiver<SettingChange>,
}

impl Default for SettingsBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn publisher(&self) -> SettingsPublisher {
        SettingsPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Pending changes in publication order
    pub fn drain(&self) -> impl Iterator<Item = SettingChange> + '_ {
        self.receiver.try_iter()
    }
}
