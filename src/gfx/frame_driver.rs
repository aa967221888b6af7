//! Per-frame loop
//!
//! The driver owns the scene state and every shared per-frame resource (the
//! transform stack and the upload sequence). The host's redraw callback calls
//! [`FrameDriver::render_frame`] once per display refresh; input handlers
//! only publish settings changes, which are applied at the start of the next
//! frame.

use crate::{
    config::ViewerConfig,
    gfx::{
        lights::Light,
        scene::{RenderContext, SceneComposer, SceneState},
        shading::{uploader::CameraMatrices, ShadingError, ShadingUploader},
        transform_stack::TransformStack,
    },
    settings::{SettingsBus, SettingsPublisher},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    /// Frames are produced on every scheduler callback
    Rendering,
}

pub struct FrameDriver {
    state: FrameState,
    scene: SceneState,
    light_template: Light,
    stack: TransformStack,
    uploader: ShadingUploader,
    composer: SceneComposer,
    bus: SettingsBus,
    frames_rendered: u64,
}

impl FrameDriver {
    /// Builds the initial scene from `config`, including its start-up lights
    pub fn new(config: &ViewerConfig) -> Self {
        let mut scene = SceneState::new(config.camera, config.material, config.options);
        for _ in 0..config.initial_lights {
            if !scene.lights.add(config.light_template) {
                log::warn!(
                    "config asks for {} initial lights, registry holds {}",
                    config.initial_lights,
                    scene.lights.len()
                );
                break;
            }
        }

        Self {
            state: FrameState::Idle,
            scene,
            light_template: config.light_template,
            stack: TransformStack::new(),
            uploader: ShadingUploader::new(),
            composer: SceneComposer::new(config.layout),
            bus: SettingsBus::new(),
            frames_rendered: 0,
        }
    }

    pub fn publisher(&self) -> SettingsPublisher {
        self.bus.publisher()
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn start(&mut self) {
        if self.state == FrameState::Idle {
            log::info!("frame driver started");
            self.state = FrameState::Rendering;
        }
    }

    pub fn stop(&mut self) {
        if self.state == FrameState::Rendering {
            log::info!("frame driver stopped after {} frames", self.frames_rendered);
            self.state = FrameState::Idle;
        }
    }

    /// Applies every published change; returns how many were applied
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        for change in self.bus.drain() {
            change.apply_to(&mut self.scene, &self.light_template);
            applied += 1;
        }
        applied
    }

    /// Produces one frame on `ctx`.
    ///
    /// Returns `false` without touching `ctx` while idle. Shading errors are
    /// logged and the frame is still counted; output degrades, it never halts.
    pub fn render_frame<C>(&mut self, ctx: &mut C) -> bool
    where
        C: RenderContext + ?Sized,
    {
        if self.state != FrameState::Rendering {
            return false;
        }

        self.apply_pending();

        ctx.configure(&self.scene.options);
        ctx.clear();
        self.stack.reset();

        let camera = CameraMatrices::from_camera(&self.scene.camera);
        if let Err(e) = self.draw(ctx, &camera) {
            log::error!("frame {}: {}", self.frames_rendered, e);
        }

        self.frames_rendered += 1;
        true
    }

    fn draw<C>(&mut self, ctx: &mut C, camera: &CameraMatrices) -> Result<(), ShadingError>
    where
        C: RenderContext + ?Sized,
    {
        self.uploader
            .upload_frame(ctx, camera, &self.scene.material, &self.scene.lights)?;
        self.composer
            .compose(ctx, &mut self.stack, &self.uploader, &self.scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gfx::{
            color::Rgb255,
            material::FLOOR_MATERIAL,
            scene::{DrawMode, Shape},
            shading::{names, UniformValue},
            testing::{Recorded, RecordingContext},
        },
        settings::SettingChange,
    };

    fn running(config: &ViewerConfig) -> FrameDriver {
        let mut driver = FrameDriver::new(config);
        driver.start();
        driver
    }

    #[test]
    fn test_idle_driver_does_nothing() {
        let mut driver = FrameDriver::new(&ViewerConfig::default());
        let mut ctx = RecordingContext::new();
        assert!(!driver.render_frame(&mut ctx));
        assert!(ctx.records().is_empty());

        driver.start();
        assert!(driver.render_frame(&mut ctx));
        driver.stop();
        assert_eq!(driver.state(), FrameState::Idle);
        assert_eq!(driver.frames_rendered(), 1);
    }

    #[test]
    fn test_frame_starts_with_clear_then_projection() {
        let mut driver = running(&ViewerConfig::default());
        let mut ctx = RecordingContext::new();
        driver.render_frame(&mut ctx);

        assert_eq!(ctx.records()[0], Recorded::Clear);
        assert!(matches!(
            &ctx.records()[1],
            Recorded::Uniform(name, _) if name == names::PROJECTION
        ));
    }

    #[test]
    fn test_initial_lights_from_config() {
        let driver = FrameDriver::new(&ViewerConfig::default().with_initial_lights(3));
        assert_eq!(driver.scene().lights.len(), 3);

        let driver = FrameDriver::new(&ViewerConfig::default().with_initial_lights(20));
        assert_eq!(driver.scene().lights.len(), 8);
    }

    #[test]
    fn test_only_selected_shape_is_drawn() {
        let mut driver = running(&ViewerConfig::default());
        let publisher = driver.publisher();
        let mut ctx = RecordingContext::new();

        publisher.publish(SettingChange::Shape(Shape::Torus));
        driver.render_frame(&mut ctx);
        assert_eq!(ctx.draw_count(Shape::Torus, DrawMode::Filled), 1);

        publisher.publish(SettingChange::Shape(Shape::Cube));
        ctx.clear_records();
        driver.render_frame(&mut ctx);
        driver.render_frame(&mut ctx);

        assert_eq!(ctx.draw_count(Shape::Torus, DrawMode::Filled), 0);
        assert_eq!(ctx.draws().iter().filter(|d| d.shape == Shape::Torus).count(), 0);
        // Primary cube plus floor cube, two frames.
        assert_eq!(ctx.draw_count(Shape::Cube, DrawMode::Filled), 4);
    }

    #[test]
    fn test_deactivated_light_scenario() {
        let mut driver = running(&ViewerConfig::default().with_initial_lights(0));
        let publisher = driver.publisher();
        for _ in 0..3 {
            publisher.publish(SettingChange::AddLight);
        }
        publisher.publish(SettingChange::LightActive {
            index: 1,
            active: false,
        });

        let mut ctx = RecordingContext::new();
        driver.render_frame(&mut ctx);

        assert_eq!(ctx.last(names::LIGHT_COUNT), Some(UniformValue::Int(3)));
        assert_eq!(
            ctx.last("uLight[1].isActive"),
            Some(UniformValue::BoolAsFloat(false))
        );
        assert_eq!(ctx.last("uLight[1].pos"), ctx.last("uLight[0].pos"));
        assert_eq!(ctx.last("uLight[1].Ia"), ctx.last("uLight[0].Ia"));
        assert_eq!(ctx.last("uLight[1].Is"), ctx.last("uLight[2].Is"));
    }

    #[test]
    fn test_every_frame_reuploads_everything() {
        let mut driver = running(&ViewerConfig::default());
        let mut ctx = RecordingContext::new();

        driver.render_frame(&mut ctx);
        let first: Vec<Recorded> = ctx.records().to_vec();
        ctx.clear_records();
        driver.render_frame(&mut ctx);

        assert_eq!(ctx.records(), &first[..]);
    }

    #[test]
    fn test_changes_apply_before_matrices() {
        let mut driver = running(&ViewerConfig::default());
        let publisher = driver.publisher();
        let mut ctx = RecordingContext::new();

        publisher.publish(SettingChange::Resize {
            width: 1600,
            height: 800,
        });
        driver.render_frame(&mut ctx);

        let expected = driver.scene().camera.build_projection_matrix();
        assert!((driver.scene().camera.aspect - 2.0).abs() < 1e-6);
        assert_eq!(ctx.last(names::PROJECTION), Some(UniformValue::Mat4(expected)));
    }

    #[test]
    fn test_material_edit_reaches_primary_only() {
        let mut driver = running(&ViewerConfig::default());
        let publisher = driver.publisher();
        publisher.publish(SettingChange::MaterialKd(Rgb255::new(128.0, 0.0, 0.0)));
        publisher.publish(SettingChange::Shininess(30.0));

        let mut ctx = RecordingContext::new();
        driver.render_frame(&mut ctx);

        let draws = ctx.draws();
        let primary = draws[0];
        assert!((primary.kd[0] - 128.0 / 255.0).abs() < 1e-5);
        assert_eq!(&primary.kd[1..], &[0.0, 0.0]);
        assert_eq!(primary.shininess, 30.0);

        let floor = draws[1];
        assert_eq!(floor.kd, FLOOR_MATERIAL.kd.normalized());
        assert_eq!(floor.shininess, 50.0);
    }

    #[test]
    fn test_shading_error_does_not_halt() {
        let mut driver = running(&ViewerConfig::default());
        let mut ctx = RecordingContext::new().rejecting(names::MODEL_VIEW);

        assert!(driver.render_frame(&mut ctx));
        assert!(driver.render_frame(&mut ctx));
        assert_eq!(driver.frames_rendered(), 2);
        assert!(ctx.draws().is_empty());
    }
}
