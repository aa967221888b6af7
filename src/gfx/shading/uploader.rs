//! Per-frame and per-draw parameter upload
//!
//! Upload order within a frame is fixed: projection, view, the initial
//! model matrices, material, light count, then every light slot in index
//! order. All parameters of light `i` are sent before light `i + 1` begins.

use cgmath::{Matrix4, SquareMatrix};

use super::{
    names::{self, LightField},
    ShadingError, ShadingStage, UniformValue,
};
use crate::gfx::{
    camera::{normal_matrix, Camera},
    color::Rgb255,
    lights::{Light, LightRegistry},
    material::Material,
};

/// Camera matrices computed once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
}

impl CameraMatrices {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            projection: camera.build_projection_matrix(),
            view: camera.build_view_matrix(),
        }
    }
}

/// Translates the scene's data model into shading parameters.
///
/// Holds the frame's view matrix so per-draw model matrices can be turned
/// into model-view matrices as the scene is composed.
#[derive(Debug, Clone)]
pub struct ShadingUploader {
    view: Matrix4<f32>,
}

impl Default for ShadingUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadingUploader {
    pub fn new() -> Self {
        Self {
            view: Matrix4::identity(),
        }
    }

    /// Uploads every per-frame parameter.
    ///
    /// Must run after the camera matrices are recomputed and before any draw.
    pub fn upload_frame<S>(
        &mut self,
        stage: &mut S,
        camera: &CameraMatrices,
        material: &Material,
        lights: &LightRegistry,
    ) -> Result<(), ShadingError>
    where
        S: ShadingStage + ?Sized,
    {
        self.view = camera.view;

        stage.set_uniform(names::PROJECTION, UniformValue::Mat4(camera.projection))?;
        stage.set_uniform(names::VIEW, UniformValue::Mat4(camera.view))?;
        self.upload_model(stage, &Matrix4::identity())?;
        self.upload_material(stage, material)?;

        stage.set_uniform(names::LIGHT_COUNT, UniformValue::Int(lights.len() as i32))?;
        for (index, light) in lights.iter_indexed() {
            upload_light(stage, index, light)?;
        }

        stage.set_uniform(names::HAS_COLOR, UniformValue::BoolAsFloat(false))
    }

    /// Uploads the model matrix of the next draw and everything derived from it
    pub fn upload_model<S>(&self, stage: &mut S, model: &Matrix4<f32>) -> Result<(), ShadingError>
    where
        S: ShadingStage + ?Sized,
    {
        let model_view = self.view * model;
        let model_view_normals = normal_matrix(&model_view);

        stage.set_uniform(names::MODEL, UniformValue::Mat4(*model))?;
        stage.set_uniform(names::MODEL_VIEW, UniformValue::Mat4(model_view))?;
        stage.set_uniform(names::NORMALS, UniformValue::Mat4(model_view_normals))?;
        stage.set_uniform(names::MODEL_NORMALS, UniformValue::Mat4(normal_matrix(model)))?;
        stage.set_uniform(
            names::MODEL_VIEW_NORMALS,
            UniformValue::Mat4(model_view_normals),
        )
    }

    pub fn upload_material<S>(&self, stage: &mut S, material: &Material) -> Result<(), ShadingError>
    where
        S: ShadingStage + ?Sized,
    {
        stage.set_uniform(names::MATERIAL_KA, UniformValue::Vec3(material.ka.normalized()))?;
        stage.set_uniform(names::MATERIAL_KD, UniformValue::Vec3(material.kd.normalized()))?;
        stage.set_uniform(names::MATERIAL_KS, UniformValue::Vec3(material.ks.normalized()))?;
        stage.set_uniform(
            names::MATERIAL_SHININESS,
            UniformValue::Float(material.shininess),
        )
    }

    /// Switches the stage to flat tinting with `color`, used for light markers
    pub fn upload_tint<S>(&self, stage: &mut S, color: Rgb255) -> Result<(), ShadingError>
    where
        S: ShadingStage + ?Sized,
    {
        stage.set_uniform(names::COLOR, UniformValue::Vec3(color.normalized()))?;
        stage.set_uniform(names::HAS_COLOR, UniformValue::BoolAsFloat(true))
    }

    pub fn view(&self) -> &Matrix4<f32> {
        &self.view
    }
}

fn upload_light<S>(stage: &mut S, index: usize, light: &Light) -> Result<(), ShadingError>
where
    S: ShadingStage + ?Sized,
{
    for field in LightField::ALL {
        let value = match field {
            LightField::Position => UniformValue::Vec3(light.position.into()),
            LightField::Ambient => UniformValue::Vec3(light.ambient.normalized()),
            LightField::Diffuse => UniformValue::Vec3(light.diffuse.normalized()),
            LightField::Specular => UniformValue::Vec3(light.specular.normalized()),
            LightField::IsDirectional => UniformValue::BoolAsFloat(light.is_directional),
            LightField::IsActive => UniformValue::BoolAsFloat(light.is_active),
        };
        stage.set_uniform(&names::light(index, field), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::testing::{Recorded, RecordingContext};
    use cgmath::{vec3, Point3};

    fn three_lights() -> LightRegistry {
        let mut lights = LightRegistry::new();
        for i in 0..3 {
            lights.add(Light::new(Point3::new(i as f32, 5.0, 0.0)));
        }
        lights
    }

    fn upload(lights: &LightRegistry) -> RecordingContext {
        let mut ctx = RecordingContext::new();
        let mut uploader = ShadingUploader::new();
        uploader
            .upload_frame(
                &mut ctx,
                &CameraMatrices::from_camera(&Camera::default()),
                &Material::default(),
                lights,
            )
            .unwrap();
        ctx
    }

    #[test]
    fn test_frame_upload_order() {
        let ctx = upload(&three_lights());
        let order: Vec<&str> = ctx.uniform_names().collect();

        let pos = |name: &str| order.iter().position(|n| *n == name).unwrap();
        assert_eq!(pos(names::PROJECTION), 0);
        assert!(pos(names::MODEL_VIEW) < pos(names::NORMALS));
        assert!(pos(names::MODEL_VIEW_NORMALS) < pos(names::MATERIAL_KA));
        assert!(pos(names::MATERIAL_SHININESS) < pos(names::LIGHT_COUNT));
        assert!(pos(names::LIGHT_COUNT) < pos("uLight[0].pos"));

        // Every field of slot i precedes every field of slot i + 1.
        for i in 0..2 {
            let last_of_i = LightField::ALL
                .iter()
                .map(|f| pos(&names::light(i, *f)))
                .max()
                .unwrap();
            let first_of_next = LightField::ALL
                .iter()
                .map(|f| pos(&names::light(i + 1, *f)))
                .min()
                .unwrap();
            assert!(last_of_i < first_of_next);
        }
    }

    #[test]
    fn test_inactive_light_still_uploaded() {
        let mut lights = three_lights();
        lights.toggle_active(1);
        let ctx = upload(&lights);

        assert_eq!(ctx.last(names::LIGHT_COUNT), Some(UniformValue::Int(3)));
        assert_eq!(
            ctx.last("uLight[1].isActive"),
            Some(UniformValue::BoolAsFloat(false))
        );
        assert_eq!(
            ctx.last("uLight[1].pos"),
            Some(UniformValue::Vec3([1.0, 5.0, 0.0]))
        );
        assert_eq!(
            ctx.last("uLight[1].Id"),
            Some(UniformValue::Vec3([1.0, 1.0, 1.0]))
        );
        assert_eq!(
            ctx.last("uLight[1].isDirectional"),
            Some(UniformValue::BoolAsFloat(false))
        );
        assert_eq!(
            ctx.last("uLight[0].isActive"),
            Some(UniformValue::BoolAsFloat(true))
        );
    }

    #[test]
    fn test_material_is_normalized() {
        let ctx = upload(&LightRegistry::new());
        let Some(UniformValue::Vec3(ka)) = ctx.last(names::MATERIAL_KA) else {
            panic!("Ka not uploaded as vec3");
        };
        assert!((ka[0] - 93.0 / 255.0).abs() < 1e-6);
        assert_eq!(ka[1], 1.0);
        assert_eq!(ka[2], 0.0);
        assert_eq!(
            ctx.last(names::MATERIAL_SHININESS),
            Some(UniformValue::Float(12.0))
        );
    }

    #[test]
    fn test_empty_registry_uploads_zero_count() {
        let ctx = upload(&LightRegistry::new());
        assert_eq!(ctx.last(names::LIGHT_COUNT), Some(UniformValue::Int(0)));
        assert!(ctx.uniform_names().all(|n| !n.starts_with("uLight[")));
    }

    #[test]
    fn test_model_view_composes_view_and_model() {
        let mut ctx = RecordingContext::new();
        let mut uploader = ShadingUploader::new();
        let camera = CameraMatrices::from_camera(&Camera::default());
        uploader
            .upload_frame(&mut ctx, &camera, &Material::default(), &LightRegistry::new())
            .unwrap();

        let model = Matrix4::from_translation(vec3(0.0, 1.0, 0.0));
        uploader.upload_model(&mut ctx, &model).unwrap();

        assert_eq!(ctx.last(names::MODEL), Some(UniformValue::Mat4(model)));
        assert_eq!(
            ctx.last(names::MODEL_VIEW),
            Some(UniformValue::Mat4(camera.view * model))
        );
    }

    #[test]
    fn test_tint_sets_color_and_flag() {
        let mut ctx = RecordingContext::new();
        let uploader = ShadingUploader::new();
        uploader
            .upload_tint(&mut ctx, Rgb255::new(255.0, 0.0, 0.0))
            .unwrap();

        assert_eq!(
            ctx.records(),
            &[
                Recorded::Uniform(names::COLOR.into(), UniformValue::Vec3([1.0, 0.0, 0.0])),
                Recorded::Uniform(names::HAS_COLOR.into(), UniformValue::BoolAsFloat(true)),
            ]
        );
    }

    #[test]
    fn test_stage_error_is_propagated() {
        let mut ctx = RecordingContext::new().rejecting(names::LIGHT_COUNT);
        let mut uploader = ShadingUploader::new();
        let err = uploader
            .upload_frame(
                &mut ctx,
                &CameraMatrices::from_camera(&Camera::default()),
                &Material::default(),
                &three_lights(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ShadingError::UnknownParameter(names::LIGHT_COUNT.to_string())
        );
        assert!(ctx.uniform_names().all(|n| !n.starts_with("uLight[")));
    }
}
