//! # Scene Module
//!
//! The viewer's scene is fixed in shape: one selectable primitive resting on
//! a floor slab, plus a wireframe marker for each light. This module holds
//! the data model for that scene and the composer that lays it out with the
//! transform stack.
//!
//! ## Key Components
//!
//! - [`SceneState`] - Camera, lights, material, shape and render options
//! - [`SceneComposer`] - Positions and draws the floor, primitive and markers
//! - [`RenderContext`] - The draw-call seam implemented by GPU backends
//!
//! ## Usage
//!
//! ```no_run
//! use shadeview::gfx::{
//!     scene::{SceneComposer, SceneState},
//!     shading::ShadingUploader,
//!     transform_stack::TransformStack,
//! };
//!
//! // The frame driver owns all of these and calls, once per frame:
//! // composer.compose(&mut render_engine, &mut stack, &uploader, &scene)?;
//! ```

pub mod composer;
pub mod shape;
pub mod state;

// Re-export main types
pub use composer::{SceneComposer, SceneLayout, FLOOR_HEIGHT, UNIT_HEIGHT};
pub use shape::{DrawMode, Shape};
pub use state::{RenderOptions, SceneState};

use crate::gfx::shading::ShadingStage;

/// A target that can be cleared and that draws primitive meshes.
///
/// Each [`Shape`] maps to one mesh collaborator set up once when the backend
/// is created; `draw` binds that mesh and issues the draw with the shading
/// parameters currently set on the stage.
pub trait RenderContext: ShadingStage {
    /// Applies frame-wide raster state (culling, depth test) before drawing
    fn configure(&mut self, _options: &RenderOptions) {}

    /// Clears colour and depth for a new frame
    fn clear(&mut self);

    fn draw(&mut self, shape: Shape, mode: DrawMode);
}
