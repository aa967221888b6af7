//! Hierarchical transform stack
//!
//! Keeps one mutable "current" model transform plus a vector of saved
//! snapshots. Every scene subtree is bracketed by a save and a restore so
//! siblings never inherit each other's local transforms. The preferred way
//! to bracket is [`TransformStack::scope`], which returns a guard that
//! restores the saved transform when dropped.

use std::ops::{Deref, DerefMut};

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};

/// A composed affine transform (translation/rotation/scale)
pub type Transform = Matrix4<f32>;

#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Transform::identity(),
            saved: Vec::new(),
        }
    }

    /// Resets the current transform to identity.
    ///
    /// Called once per frame before the scene is composed. Saved snapshots
    /// left over from an unbalanced frame are discarded and reported.
    pub fn reset(&mut self) {
        if !self.saved.is_empty() {
            log::error!(
                "transform stack reset with {} unmatched push(es)",
                self.saved.len()
            );
            self.saved.clear();
        }
        self.current = Transform::identity();
    }

    /// Saves a copy of the current transform
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the most recently saved transform.
    ///
    /// # Panics
    /// Panics if there is no matching [`push`](Self::push).
    pub fn pop(&mut self) {
        self.current = self
            .saved
            .pop()
            .expect("TransformStack::pop called without a matching push");
    }

    /// Saves the current transform and returns a guard that restores it on drop
    pub fn scope(&mut self) -> TransformScope<'_> {
        self.push();
        TransformScope { stack: self }
    }

    /// Right-multiplies a translation
    pub fn translate(&mut self, v: Vector3<f32>) {
        self.current = self.current * Matrix4::from_translation(v);
    }

    /// Right-multiplies a rotation of `angle_degrees` around `axis`
    pub fn rotate(&mut self, axis: Vector3<f32>, angle_degrees: f32) {
        self.current =
            self.current * Matrix4::from_axis_angle(axis.normalize(), Deg(angle_degrees));
    }

    /// Right-multiplies a non-uniform scale
    pub fn scale(&mut self, v: Vector3<f32>) {
        self.current = self.current * Matrix4::from_nonuniform_scale(v.x, v.y, v.z);
    }

    pub fn current(&self) -> &Transform {
        &self.current
    }

    /// Number of saved snapshots not yet restored
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// Scoped save/restore of a [`TransformStack`].
///
/// Derefs to the stack so local transforms and nested scopes can be applied
/// through the guard; the saved transform is restored when it goes out of scope.
pub struct TransformScope<'a> {
    stack: &'a mut TransformStack,
}

impl Deref for TransformScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec3, Vector4};

    fn approx_eq(a: &Transform, b: &Transform) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_starts_at_identity() {
        let stack = TransformStack::new();
        assert_eq!(*stack.current(), Transform::identity());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_balanced_push_pop_restores_transform() {
        let mut stack = TransformStack::new();
        stack.translate(vec3(1.0, 2.0, 3.0));
        let before = *stack.current();

        stack.push();
        stack.translate(vec3(0.0, -0.75, 0.0));
        stack.scale(vec3(5.0, 0.5, 5.0));
        stack.push();
        stack.rotate(vec3(0.0, 1.0, 0.0), 45.0);
        stack.pop();
        stack.scale(vec3(0.1, 0.1, 0.1));
        stack.pop();

        assert!(approx_eq(stack.current(), &before));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_scope_guard_restores_on_drop() {
        let mut stack = TransformStack::new();
        {
            let mut scope = stack.scope();
            scope.translate(vec3(0.0, 1.0, 0.0));
            {
                let mut inner = scope.scope();
                inner.scale(vec3(2.0, 2.0, 2.0));
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(scope.depth(), 1);
            assert!(approx_eq(
                scope.current(),
                &Matrix4::from_translation(vec3(0.0, 1.0, 0.0))
            ));
        }
        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), Transform::identity());
    }

    #[test]
    fn test_translate_then_scale_scales_in_local_space() {
        let mut stack = TransformStack::new();
        stack.translate(vec3(0.0, 1.0, 0.0));
        stack.scale(vec3(2.0, 2.0, 2.0));

        // A local point at y = 0.5 is scaled first, then translated.
        let p = *stack.current() * Vector4::new(0.0, 0.5, 0.0, 1.0);
        assert!((p.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_uses_degrees() {
        let mut stack = TransformStack::new();
        stack.rotate(vec3(0.0, 0.0, 1.0), 90.0);
        let p = *stack.current() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_discards_unmatched_pushes() {
        let mut stack = TransformStack::new();
        stack.push();
        stack.translate(vec3(3.0, 0.0, 0.0));
        stack.reset();
        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), Transform::identity());
    }

    #[test]
    #[should_panic(expected = "without a matching push")]
    fn test_pop_on_empty_stack_panics() {
        let mut stack = TransformStack::new();
        stack.pop();
    }
}
