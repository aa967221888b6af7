pub mod camera_utils;
pub mod perspective_camera;

// Re-export main types
pub use camera_utils::{convert_matrix4_to_array, normal_matrix};
pub use perspective_camera::{Camera, CLIP_MARGIN, FOVY_RANGE, MIN_NEAR, OPENGL_TO_WGPU_MATRIX};
