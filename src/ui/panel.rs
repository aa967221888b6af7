// src/ui/panel.rs
//! Control panels
//!
//! Panels read the current [`SceneState`] and never write to it. Every edit
//! is published as a [`SettingChange`] and lands at the start of the next
//! frame.

use std::borrow::Cow;

use cgmath::{Point3, Vector3};
use imgui::{Condition, Drag, SliderFlags, TreeNodeFlags, Ui};

use crate::{
    gfx::{
        camera::{FOVY_RANGE, MIN_NEAR},
        color::Rgb255,
        lights::Light,
        scene::SceneState,
        scene::Shape,
    },
    settings::{SettingChange, SettingsPublisher},
};

const STEP: f32 = 0.05;

/// Options, camera and lights
pub fn settings_panel(ui: &Ui, scene: &SceneState, publisher: &SettingsPublisher) {
    ui.window("Settings")
        .size([340.0, 620.0], Condition::FirstUseEver)
        .position([10.0, 10.0], Condition::FirstUseEver)
        .build(|| {
            if ui.collapsing_header("options", TreeNodeFlags::DEFAULT_OPEN) {
                options_section(ui, scene, publisher);
            }
            if ui.collapsing_header("camera", TreeNodeFlags::empty()) {
                camera_section(ui, scene, publisher);
            }
            if ui.collapsing_header("lights", TreeNodeFlags::DEFAULT_OPEN) {
                lights_section(ui, scene, publisher);
            }
        });
}

/// Primitive selection and material
pub fn object_panel(ui: &Ui, scene: &SceneState, publisher: &SettingsPublisher) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Object")
        .size([320.0, 260.0], Condition::FirstUseEver)
        .position([display_size[0] - 330.0, 10.0], Condition::FirstUseEver)
        .build(|| {
            let mut selected = scene.shape.index();
            if ui.combo("shape", &mut selected, &Shape::ALL, |shape| {
                Cow::Borrowed(shape.label())
            }) {
                publisher.publish(SettingChange::Shape(Shape::ALL[selected]));
            }

            ui.separator();
            ui.text("material");

            if let Some(c) = color_edit(ui, "Ka", scene.material.ka) {
                publisher.publish(SettingChange::MaterialKa(c));
            }
            if let Some(c) = color_edit(ui, "Kd", scene.material.kd) {
                publisher.publish(SettingChange::MaterialKd(c));
            }
            if let Some(c) = color_edit(ui, "Ks", scene.material.ks) {
                publisher.publish(SettingChange::MaterialKs(c));
            }

            let mut shininess = scene.material.shininess;
            if Drag::new("shininess")
                .speed(STEP)
                .range(0.0, 1000.0)
                .flags(SliderFlags::ALWAYS_CLAMP)
                .build(ui, &mut shininess)
            {
                publisher.publish(SettingChange::Shininess(shininess));
            }
        });
}

fn options_section(ui: &Ui, scene: &SceneState, publisher: &SettingsPublisher) {
    let mut options = scene.options;

    if ui.checkbox("wireframe", &mut options.wireframe) {
        publisher.publish(SettingChange::Wireframe(options.wireframe));
    }
    if ui.checkbox("backface culling", &mut options.backface_culling) {
        publisher.publish(SettingChange::BackfaceCulling(options.backface_culling));
    }
    if ui.checkbox("depth test", &mut options.depth_test) {
        publisher.publish(SettingChange::DepthTest(options.depth_test));
    }
    if ui.checkbox("show lights", &mut options.show_lights) {
        publisher.publish(SettingChange::ShowLights(options.show_lights));
    }
}

fn camera_section(ui: &Ui, scene: &SceneState, publisher: &SettingsPublisher) {
    let camera = &scene.camera;

    let mut fovy = camera.fovy();
    if Drag::new("fovy")
        .speed(0.5)
        .range(FOVY_RANGE.0, FOVY_RANGE.1)
        .flags(SliderFlags::ALWAYS_CLAMP)
        .build(ui, &mut fovy)
    {
        publisher.publish(SettingChange::Fovy(fovy));
    }
    ui.text(format!("aspect: {:.3}", camera.aspect));

    let mut near = camera.near();
    if ui
        .slider_config("near", MIN_NEAR, 20.0)
        .flags(SliderFlags::ALWAYS_CLAMP)
        .build(&mut near)
    {
        publisher.publish(SettingChange::Near(near));
    }
    let mut far = camera.far();
    if ui
        .slider_config("far", MIN_NEAR, 20.0)
        .flags(SliderFlags::ALWAYS_CLAMP)
        .build(&mut far)
    {
        publisher.publish(SettingChange::Far(far));
    }

    let mut eye: [f32; 3] = camera.eye.into();
    if Drag::new("eye").speed(STEP).build_array(ui, &mut eye) {
        publisher.publish(SettingChange::Eye(Point3::from(eye)));
    }
    let mut at: [f32; 3] = camera.at.into();
    if Drag::new("at").speed(STEP).build_array(ui, &mut at) {
        publisher.publish(SettingChange::At(Point3::from(at)));
    }
    let mut up: [f32; 3] = camera.up.into();
    if Drag::new("up").speed(STEP).build_array(ui, &mut up) {
        publisher.publish(SettingChange::Up(Vector3::from(up)));
    }
}

fn lights_section(ui: &Ui, scene: &SceneState, publisher: &SettingsPublisher) {
    let lights = &scene.lights;

    {
        let _disabled = ui.begin_disabled(lights.is_full());
        if ui.button("Add a new light") {
            publisher.publish(SettingChange::AddLight);
        }
    }
    ui.same_line();
    ui.text(format!("{} in use", lights.len()));

    for (index, light) in lights.iter_indexed() {
        let _id = ui.push_id_usize(index);
        if ui.collapsing_header(format!("Light{}", index + 1), TreeNodeFlags::empty()) {
            light_controls(ui, index, light, publisher);
        }
    }
}

fn light_controls(ui: &Ui, index: usize, light: &Light, publisher: &SettingsPublisher) {
    let mut position: [f32; 3] = light.position.into();
    if Drag::new("pos").speed(STEP).build_array(ui, &mut position) {
        publisher.publish(SettingChange::LightPosition {
            index,
            position: Point3::from(position),
        });
    }

    if let Some(color) = color_edit(ui, "ambient", light.ambient) {
        publisher.publish(SettingChange::LightAmbient { index, color });
    }
    if let Some(color) = color_edit(ui, "diffuse", light.diffuse) {
        publisher.publish(SettingChange::LightDiffuse { index, color });
    }
    if let Some(color) = color_edit(ui, "specular", light.specular) {
        publisher.publish(SettingChange::LightSpecular { index, color });
    }

    let mut directional = light.is_directional;
    if ui.checkbox("directional", &mut directional) {
        publisher.publish(SettingChange::LightDirectional { index, directional });
    }
    let mut active = light.is_active;
    if ui.checkbox("active", &mut active) {
        publisher.publish(SettingChange::LightActive { index, active });
    }
}

/// Colour picker over a 0-255 colour; returns the new colour when edited
fn color_edit(ui: &Ui, label: &str, color: Rgb255) -> Option<Rgb255> {
    let mut picker = color.to_picker();
    ui.color_edit3(label, &mut picker)
        .then(|| Rgb255::from_picker(picker))
}
