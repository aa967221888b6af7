//! In-memory render context that records every call, for tests

use cgmath::{Matrix4, SquareMatrix};

use super::{
    scene::{DrawMode, RenderContext, Shape},
    shading::{names, ShadingError, ShadingStage, UniformValue},
};

/// A draw call together with the stage state it was issued under
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    pub shape: Shape,
    pub mode: DrawMode,
    pub model: Matrix4<f32>,
    /// `fColor` when `hasColor` was set
    pub tint: Option<[f32; 3]>,
    pub kd: [f32; 3],
    pub shininess: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Clear,
    Uniform(String, UniformValue),
    Draw(DrawRecord),
}

#[derive(Debug)]
pub struct RecordingContext {
    records: Vec<Recorded>,
    model: Matrix4<f32>,
    color: [f32; 3],
    has_color: bool,
    kd: [f32; 3],
    shininess: f32,
    rejected: Vec<String>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            model: Matrix4::identity(),
            color: [0.0; 3],
            has_color: false,
            kd: [0.0; 3],
            shininess: 0.0,
            rejected: Vec::new(),
        }
    }

    /// Makes `set_uniform` fail for `name`
    pub fn rejecting(mut self, name: &str) -> Self {
        self.rejected.push(name.to_string());
        self
    }

    pub fn records(&self) -> &[Recorded] {
        &self.records
    }

    pub fn clear_records(&mut self) {
        self.records.clear();
    }

    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            Recorded::Uniform(name, _) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Most recent value uploaded under `name`
    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.records.iter().rev().find_map(|r| match r {
            Recorded::Uniform(n, v) if n == name => Some(*v),
            _ => None,
        })
    }

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.records
            .iter()
            .filter_map(|r| match r {
                Recorded::Draw(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self, shape: Shape, mode: DrawMode) -> usize {
        self.draws()
            .iter()
            .filter(|d| d.shape == shape && d.mode == mode)
            .count()
    }
}

impl ShadingStage for RecordingContext {
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), ShadingError> {
        if self.rejected.iter().any(|r| r == name) {
            return Err(ShadingError::UnknownParameter(name.to_string()));
        }

        match (name, value) {
            (names::MODEL, UniformValue::Mat4(m)) => self.model = m,
            (names::COLOR, UniformValue::Vec3(c)) => self.color = c,
            (names::HAS_COLOR, UniformValue::BoolAsFloat(b)) => self.has_color = b,
            (names::MATERIAL_KD, UniformValue::Vec3(kd)) => self.kd = kd,
            (names::MATERIAL_SHININESS, UniformValue::Float(s)) => self.shininess = s,
            _ => {}
        }

        self.records.push(Recorded::Uniform(name.to_string(), value));
        Ok(())
    }
}

impl RenderContext for RecordingContext {
    fn clear(&mut self) {
        self.records.push(Recorded::Clear);
    }

    fn draw(&mut self, shape: Shape, mode: DrawMode) {
        self.records.push(Recorded::Draw(DrawRecord {
            shape,
            mode,
            model: self.model,
            tint: self.has_color.then_some(self.color),
            kd: self.kd,
            shininess: self.shininess,
        }));
    }
}
