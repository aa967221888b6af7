//! # Graphics Module
//!
//! Everything between the scene data model and the GPU.
//!
//! ## Architecture Overview
//!
//! - **Data model** ([`lights`], [`material`], [`color`], [`camera`]) - Lights,
//!   material coefficients on a 0-255 scale, the perspective camera
//! - **Transform stack** ([`transform_stack`]) - Current model matrix with
//!   scoped save/restore
//! - **Scene** ([`scene`]) - Scene state and the composer that lays out the
//!   primitive, floor and light markers
//! - **Shading** ([`shading`]) - Named-parameter protocol and the uploader
//!   that feeds it
//! - **Frame driver** ([`frame_driver`]) - Applies settings changes and runs
//!   one frame per display refresh
//! - **Rendering** ([`rendering`], [`geometry`], [`resources`]) - The wgpu
//!   backend, procedural meshes and the depth buffer
//!
//! ## Usage
//!
//! ```no_run
//! use shadeview::{config::ViewerConfig, gfx::frame_driver::FrameDriver};
//!
//! let mut driver = FrameDriver::new(&ViewerConfig::default());
//! driver.start();
//! // Once per display refresh, with the render engine:
//! // driver.render_frame(&mut render_engine);
//! ```

pub mod camera;
pub mod color;
pub mod frame_driver;
pub mod geometry;
pub mod lights;
pub mod material;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shading;
pub mod transform_stack;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use camera::Camera;
pub use frame_driver::FrameDriver;
pub use rendering::RenderEngine;
pub use transform_stack::TransformStack;
