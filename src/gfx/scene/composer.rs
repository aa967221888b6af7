//! Scene composition
//!
//! Positions the primary primitive, the floor and the light markers with the
//! transform stack and issues their draws. Every subtree is bracketed by a
//! [`TransformScope`](crate::gfx::transform_stack::TransformScope), so a
//! failed upload part-way through still leaves the stack balanced.

use cgmath::{vec3, EuclideanSpace};

use super::{
    shape::{DrawMode, Shape},
    state::SceneState,
    RenderContext,
};
use crate::gfx::{
    material::FLOOR_MATERIAL,
    shading::{ShadingError, ShadingUploader},
    transform_stack::TransformStack,
};

/// Thickness of the floor slab
pub const FLOOR_HEIGHT: f32 = 0.5;

/// Height of every primitive mesh in local units
pub const UNIT_HEIGHT: f32 = 1.0;

/// Dimensions used to lay out the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    /// Vertical offset of the primary object from the origin
    pub object_lift: f32,
    pub floor_height: f32,
    /// Edge length of the square floor
    pub floor_extent: f32,
    /// Uniform scale applied to light marker spheres
    pub marker_scale: f32,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            object_lift: 1.0,
            floor_height: FLOOR_HEIGHT,
            floor_extent: 5.0,
            marker_scale: 0.1,
        }
    }
}

impl SceneLayout {
    /// Offset of the floor centre from the primary object's origin
    pub fn floor_offset(&self) -> f32 {
        -(UNIT_HEIGHT / 2.0 + self.floor_height / 2.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneComposer {
    layout: SceneLayout,
}

impl SceneComposer {
    pub fn new(layout: SceneLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// Draws the frame's geometry.
    ///
    /// The primary object draws under the material uploaded with the frame
    /// parameters; the floor switches to [`FLOOR_MATERIAL`] afterwards.
    pub fn compose<C>(
        &self,
        ctx: &mut C,
        stack: &mut TransformStack,
        uploader: &ShadingUploader,
        scene: &SceneState,
    ) -> Result<(), ShadingError>
    where
        C: RenderContext + ?Sized,
    {
        let mode = scene.options.draw_mode();

        {
            let mut object = stack.scope();
            object.translate(vec3(0.0, self.layout.object_lift, 0.0));

            {
                let primary = object.scope();
                uploader.upload_model(ctx, primary.current())?;
                ctx.draw(scene.shape, mode);
            }

            object.translate(vec3(0.0, self.layout.floor_offset(), 0.0));
            object.scale(vec3(
                self.layout.floor_extent,
                self.layout.floor_height,
                self.layout.floor_extent,
            ));
            uploader.upload_material(ctx, &FLOOR_MATERIAL)?;
            uploader.upload_model(ctx, object.current())?;
            ctx.draw(Shape::Cube, mode);
        }

        if scene.options.show_lights {
            self.draw_light_markers(ctx, stack, uploader, scene)?;
        }

        Ok(())
    }

    fn draw_light_markers<C>(
        &self,
        ctx: &mut C,
        stack: &mut TransformStack,
        uploader: &ShadingUploader,
        scene: &SceneState,
    ) -> Result<(), ShadingError>
    where
        C: RenderContext + ?Sized,
    {
        let s = self.layout.marker_scale;

        for (_, light) in scene.lights.iter_indexed() {
            let mut marker = stack.scope();
            marker.translate(light.position.to_vec());
            marker.scale(vec3(s, s, s));

            uploader.upload_tint(ctx, light.diffuse)?;
            uploader.upload_model(ctx, marker.current())?;
            ctx.draw(Shape::Sphere, DrawMode::Wireframe);
        }

        Ok(())
    }
}
