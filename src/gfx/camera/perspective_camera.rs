use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Minimum gap kept between the near and far clip planes
pub const CLIP_MARGIN: f32 = 0.5;

/// Closest the near plane may come to the eye
pub const MIN_NEAR: f32 = 0.1;

/// Accepted vertical field of view, in degrees
pub const FOVY_RANGE: (f32, f32) = (1.0, 100.0);

/// Look-at perspective camera.
///
/// `fovy`, `near` and `far` are private so every edit goes through the
/// clamping setters and the projection stays well defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub at: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees
    fovy: f32,
    pub aspect: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Point3::new(3.67, 4.06, 2.73),
            at: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fovy: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 20.0,
        }
    }
}

impl Camera {
    pub fn new(eye: Point3<f32>, at: Point3<f32>, up: Vector3<f32>, aspect: f32) -> Self {
        Self {
            eye,
            at,
            up,
            aspect,
            ..Default::default()
        }
    }

    /// Builder pattern: Set near/far planes, clamped like the setters
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.far = far.max(MIN_NEAR + CLIP_MARGIN);
        self.set_near(near);
        self
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    /// Sets the vertical field of view, clamped to [`FOVY_RANGE`].
    /// Non-finite values are ignored.
    pub fn set_fovy(&mut self, fovy: f32) {
        if !fovy.is_finite() {
            log::warn!("ignoring field of view {fovy}");
            return;
        }
        let clamped = fovy.clamp(FOVY_RANGE.0, FOVY_RANGE.1);
        if clamped != fovy {
            log::debug!("field of view {fovy} clamped to {clamped}");
        }
        self.fovy = clamped;
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Sets the near plane, clamped to `MIN_NEAR..=far - CLIP_MARGIN`
    pub fn set_near(&mut self, near: f32) {
        let clamped = near.max(MIN_NEAR).min(self.far - CLIP_MARGIN);
        if clamped != near {
            log::debug!("near plane {near} clamped to {clamped}");
        }
        self.near = clamped;
    }

    /// Sets the far plane, clamped to at least `near + CLIP_MARGIN`
    pub fn set_far(&mut self, far: f32) {
        let clamped = far.max(self.near + CLIP_MARGIN);
        if clamped != far {
            log::debug!("far plane {far} clamped to {clamped}");
        }
        self.far = clamped;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.at, self.up)
    }

    /// Perspective projection mapped to wgpu's 0..1 clip depth
    pub fn build_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Deg(self.fovy), self.aspect, self.near, self.far)
    }
}
