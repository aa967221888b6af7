//! # Shading Stage Protocol
//!
//! The shading stage is driven through a generic "set parameter by name" call
//! with type-tagged values, the same shape as a classic uniform API. The
//! [`ShadingUploader`] translates lights, material and camera matrices into
//! that protocol each frame; any backend (the wgpu [`RenderEngine`] or the
//! recording context used in tests) implements [`ShadingStage`].
//!
//! ## Parameter names
//!
//! | Name | Type |
//! |------|------|
//! | `mProjection`, `mView`, `mModel`, `mModelView` | 4x4 matrix |
//! | `mNormals`, `mModelNormals`, `mModelViewNormals` | 4x4 matrix |
//! | `uMaterial.Ka`, `uMaterial.Kd`, `uMaterial.Ks` | 3-vector |
//! | `uMaterial.shininess` | scalar |
//! | `uNLights` | integer |
//! | `uLight[i].pos`, `uLight[i].Ia`, `uLight[i].Id`, `uLight[i].Is` | 3-vector |
//! | `uLight[i].isDirectional`, `uLight[i].isActive` | boolean-as-float |
//! | `fColor` | 3-vector |
//! | `hasColor` | boolean-as-float |
//!
//! [`RenderEngine`]: crate::gfx::rendering::RenderEngine

pub mod names;
pub mod uploader;

use cgmath::Matrix4;
use thiserror::Error;

pub use uploader::ShadingUploader;

/// A type-tagged shading parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4(Matrix4<f32>),
    /// Booleans travel as `0.0` / `1.0`
    BoolAsFloat(bool),
}

impl UniformValue {
    pub fn kind(&self) -> &'static str {
        match self {
            UniformValue::Float(_) => "float",
            UniformValue::Int(_) => "int",
            UniformValue::Vec3(_) => "vec3",
            UniformValue::Vec4(_) => "vec4",
            UniformValue::Mat4(_) => "mat4",
            UniformValue::BoolAsFloat(_) => "bool",
        }
    }

    /// Scalar view of `Float` and `BoolAsFloat` values
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            UniformValue::Float(v) => Some(v),
            UniformValue::BoolAsFloat(b) => Some(if b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

/// Errors raised by a shading stage when a parameter cannot be applied
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShadingError {
    #[error("unknown shading parameter `{0}`")]
    UnknownParameter(String),

    #[error("shading parameter `{name}` expects {expected}, got {got}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("light slot {index} is out of range (capacity {capacity})")]
    LightSlotOutOfRange { index: usize, capacity: usize },
}

/// The external shading stage: accepts named, type-tagged parameters.
///
/// The stage is stateless between frames from the uploader's point of view;
/// every parameter is re-sent each frame.
pub trait ShadingStage {
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), ShadingError>;
}
