//! CPU mirror of the shader's uniform blocks
//!
//! Named shading parameters land here before they reach the GPU. Per-frame
//! parameters go into [`FrameUniforms`] (bind group 0); per-draw parameters
//! go into [`ObjectUniforms`], which is snapshotted into a dynamic-offset
//! slot on every draw (bind group 1).
//!
//! Layouts follow WGSL uniform rules: every `vec3` is padded to 16 bytes and
//! the padding slot carries a scalar where one fits.

use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::{
    camera::convert_matrix4_to_array,
    lights::MAX_LIGHTS,
    shading::{
        names::{self, LightField},
        ShadingError, UniformValue,
    },
};

type Mat4 = [[f32; 4]; 4];

/// One light slot, 64 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub is_directional: f32,
    pub ambient: [f32; 3],
    pub is_active: f32,
    pub diffuse: [f32; 3],
    _pad0: f32,
    pub specular: [f32; 3],
    _pad1: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub n_lights: i32,
    _pad: [i32; 3],
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        let identity = convert_matrix4_to_array(Matrix4::identity());
        Self {
            projection: identity,
            view: identity,
            n_lights: 0,
            _pad: [0; 3],
            lights: [LightUniform::default(); MAX_LIGHTS],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    pub model_view: Mat4,
    pub normals: Mat4,
    pub model_normals: Mat4,
    pub model_view_normals: Mat4,
    /// Material colours are stored as `vec4` with `w = 1`
    pub ka: [f32; 4],
    pub kd: [f32; 4],
    pub ks: [f32; 4],
    pub color: [f32; 4],
    pub shininess: f32,
    pub has_color: f32,
    _pad: [f32; 2],
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        let identity = convert_matrix4_to_array(Matrix4::identity());
        Self {
            model: identity,
            model_view: identity,
            normals: identity,
            model_normals: identity,
            model_view_normals: identity,
            ka: [0.0, 0.0, 0.0, 1.0],
            kd: [0.0, 0.0, 0.0, 1.0],
            ks: [0.0, 0.0, 0.0, 1.0],
            color: [1.0, 1.0, 1.0, 1.0],
            shininess: 1.0,
            has_color: 0.0,
            _pad: [0.0; 2],
        }
    }
}

/// Both uniform blocks plus the name-to-field routing
#[derive(Debug, Clone, Default)]
pub struct UniformMirror {
    pub frame: FrameUniforms,
    pub object: ObjectUniforms,
}

impl UniformMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one named parameter in the matching block field
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<(), ShadingError> {
        match name {
            names::PROJECTION => self.frame.projection = mat4(name, value)?,
            names::VIEW => self.frame.view = mat4(name, value)?,
            names::LIGHT_COUNT => self.frame.n_lights = int(name, value)?,

            names::MODEL => self.object.model = mat4(name, value)?,
            names::MODEL_VIEW => self.object.model_view = mat4(name, value)?,
            names::NORMALS => self.object.normals = mat4(name, value)?,
            names::MODEL_NORMALS => self.object.model_normals = mat4(name, value)?,
            names::MODEL_VIEW_NORMALS => self.object.model_view_normals = mat4(name, value)?,

            names::MATERIAL_KA => self.object.ka = color4(name, value)?,
            names::MATERIAL_KD => self.object.kd = color4(name, value)?,
            names::MATERIAL_KS => self.object.ks = color4(name, value)?,
            names::MATERIAL_SHININESS => self.object.shininess = scalar(name, value)?,
            names::COLOR => self.object.color = color4(name, value)?,
            names::HAS_COLOR => self.object.has_color = scalar(name, value)?,

            _ => {
                let (index, field) = names::parse_light(name)
                    .ok_or_else(|| ShadingError::UnknownParameter(name.to_string()))?;
                if index >= MAX_LIGHTS {
                    return Err(ShadingError::LightSlotOutOfRange {
                        index,
                        capacity: MAX_LIGHTS,
                    });
                }
                let slot = &mut self.frame.lights[index];
                match field {
                    LightField::Position => slot.position = vec3(name, value)?,
                    LightField::Ambient => slot.ambient = vec3(name, value)?,
                    LightField::Diffuse => slot.diffuse = vec3(name, value)?,
                    LightField::Specular => slot.specular = vec3(name, value)?,
                    LightField::IsDirectional => slot.is_directional = scalar(name, value)?,
                    LightField::IsActive => slot.is_active = scalar(name, value)?,
                }
            }
        }
        Ok(())
    }
}

fn mismatch(name: &str, expected: &'static str, value: UniformValue) -> ShadingError {
    ShadingError::TypeMismatch {
        name: name.to_string(),
        expected,
        got: value.kind(),
    }
}

fn mat4(name: &str, value: UniformValue) -> Result<Mat4, ShadingError> {
    match value {
        UniformValue::Mat4(m) => Ok(convert_matrix4_to_array(m)),
        other => Err(mismatch(name, "mat4", other)),
    }
}

fn vec3(name: &str, value: UniformValue) -> Result<[f32; 3], ShadingError> {
    match value {
        UniformValue::Vec3(v) => Ok(v),
        UniformValue::Vec4([x, y, z, _]) => Ok([x, y, z]),
        other => Err(mismatch(name, "vec3", other)),
    }
}

fn color4(name: &str, value: UniformValue) -> Result<[f32; 4], ShadingError> {
    match value {
        UniformValue::Vec3([r, g, b]) => Ok([r, g, b, 1.0]),
        UniformValue::Vec4(v) => Ok(v),
        other => Err(mismatch(name, "vec3", other)),
    }
}

fn scalar(name: &str, value: UniformValue) -> Result<f32, ShadingError> {
    value.as_float().ok_or_else(|| mismatch(name, "float", value))
}

fn int(name: &str, value: UniformValue) -> Result<i32, ShadingError> {
    match value {
        UniformValue::Int(i) => Ok(i),
        other => Err(mismatch(name, "int", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Matrix4;
    use std::mem::size_of;

    #[test]
    fn test_block_sizes_match_wgsl() {
        assert_eq!(size_of::<LightUniform>(), 64);
        assert_eq!(size_of::<FrameUniforms>(), 128 + 16 + 64 * MAX_LIGHTS);
        assert_eq!(size_of::<ObjectUniforms>(), 5 * 64 + 4 * 16 + 16);
    }

    #[test]
    fn test_light_fields_route_to_slots() {
        let mut mirror = UniformMirror::new();
        mirror
            .set("uLight[2].Id", UniformValue::Vec3([0.5, 0.25, 1.0]))
            .unwrap();
        mirror
            .set("uLight[2].isActive", UniformValue::BoolAsFloat(true))
            .unwrap();

        assert_eq!(mirror.frame.lights[2].diffuse, [0.5, 0.25, 1.0]);
        assert_eq!(mirror.frame.lights[2].is_active, 1.0);
        assert_eq!(mirror.frame.lights[1], LightUniform::default());
    }

    #[test]
    fn test_material_colours_get_opaque_alpha() {
        let mut mirror = UniformMirror::new();
        mirror
            .set(names::MATERIAL_KD, UniformValue::Vec3([0.0, 1.0, 0.0]))
            .unwrap();
        assert_eq!(mirror.object.kd, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_matrices_are_column_major() {
        let mut mirror = UniformMirror::new();
        let m = Matrix4::from_translation(cgmath::vec3(1.0, 2.0, 3.0));
        mirror.set(names::MODEL, UniformValue::Mat4(m)).unwrap();
        assert_eq!(mirror.object.model[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_rejects_bad_names_and_types() {
        let mut mirror = UniformMirror::new();
        assert_eq!(
            mirror.set("uFog", UniformValue::Float(1.0)),
            Err(ShadingError::UnknownParameter("uFog".into()))
        );
        assert_eq!(
            mirror.set("uLight[8].pos", UniformValue::Vec3([0.0; 3])),
            Err(ShadingError::LightSlotOutOfRange {
                index: 8,
                capacity: MAX_LIGHTS
            })
        );
        assert!(matches!(
            mirror.set(names::LIGHT_COUNT, UniformValue::Float(2.0)),
            Err(ShadingError::TypeMismatch { expected: "int", .. })
        ));
    }
}
