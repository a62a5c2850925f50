//! Scoped model-matrix composition

use arachne_math::{mat4, Mat4, Vec3};

/// A stack of model matrices for composing per-draw transforms
///
/// [`MatrixStack::push`] returns a guard that pops on drop, so a pushed
/// frame cannot leak past its scope no matter how the block exits. Guard
/// methods post-multiply onto the top matrix, so calls read in the usual
/// order: translate, then rotate, then scale.
///
/// ```
/// use arachne_render::MatrixStack;
/// use arachne_math::Vec3;
///
/// let mut stack = MatrixStack::new();
/// let model = {
///     let mut frame = stack.push();
///     frame.translate(Vec3::new(0.0, 1.0, -5.0));
///     frame.rotate_y(std::f32::consts::FRAC_PI_2);
///     frame.scale_uniform(0.5);
///     frame.top()
/// };
/// // frame dropped: the stack is back to identity
/// assert_eq!(stack.top(), arachne_math::mat4::IDENTITY);
/// # let _ = model;
/// ```
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    /// Create a stack holding a single identity matrix
    pub fn new() -> Self {
        Self {
            stack: vec![mat4::IDENTITY],
        }
    }

    /// The current top matrix
    pub fn top(&self) -> Mat4 {
        // Invariant: the base identity is never popped
        *self.stack.last().expect("matrix stack base missing")
    }

    /// Current stack depth (1 = just the base identity)
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a copy of the top matrix, returning a guard that pops on drop
    pub fn push(&mut self) -> StackFrame<'_> {
        let top = self.top();
        self.stack.push(top);
        StackFrame { stack: self }
    }

    fn apply(&mut self, m: Mat4) {
        let top = self.stack.last_mut().expect("matrix stack base missing");
        *top = mat4::mul(*top, m);
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

/// A pushed stack frame; pops its matrix when dropped
pub struct StackFrame<'a> {
    stack: &'a mut MatrixStack,
}

impl StackFrame<'_> {
    /// Replace the top matrix with identity
    pub fn load_identity(&mut self) {
        *self.stack.stack.last_mut().expect("matrix stack base missing") = mat4::IDENTITY;
    }

    /// Post-multiply a translation onto the top matrix
    pub fn translate(&mut self, offset: Vec3) {
        self.stack.apply(mat4::translation(offset));
    }

    /// Post-multiply a rotation about X
    pub fn rotate_x(&mut self, angle: f32) {
        self.stack.apply(mat4::rotation_x(angle));
    }

    /// Post-multiply a rotation about Y
    pub fn rotate_y(&mut self, angle: f32) {
        self.stack.apply(mat4::rotation_y(angle));
    }

    /// Post-multiply a rotation about Z
    pub fn rotate_z(&mut self, angle: f32) {
        self.stack.apply(mat4::rotation_z(angle));
    }

    /// Post-multiply a non-uniform scale
    pub fn scale(&mut self, scale: Vec3) {
        self.stack.apply(mat4::scaling(scale));
    }

    /// Post-multiply a uniform scale
    pub fn scale_uniform(&mut self, scale: f32) {
        self.stack.apply(mat4::scaling_uniform(scale));
    }

    /// The composed top matrix
    pub fn top(&self) -> Mat4 {
        self.stack.top()
    }
}

impl Drop for StackFrame<'_> {
    fn drop(&mut self) {
        self.stack.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arachne_math::mat4::transform_point;

    #[test]
    fn test_push_pops_on_drop() {
        let mut stack = MatrixStack::new();
        assert_eq!(stack.depth(), 1);
        {
            let mut frame = stack.push();
            frame.translate(Vec3::X);
        }
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), mat4::IDENTITY);
    }

    #[test]
    fn test_pops_on_early_exit() {
        let mut stack = MatrixStack::new();
        // Simulate an early-return branch: the guard still pops
        let compose = |stack: &mut MatrixStack, bail: bool| -> Option<Mat4> {
            let mut frame = stack.push();
            frame.translate(Vec3::Y);
            if bail {
                return None;
            }
            Some(frame.top())
        };
        assert!(compose(&mut stack, true).is_none());
        assert_eq!(stack.depth(), 1);
        assert!(compose(&mut stack, false).is_some());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_translate_then_scale_order() {
        let mut stack = MatrixStack::new();
        let mut frame = stack.push();
        frame.translate(Vec3::new(0.0, 0.0, -5.0));
        frame.scale_uniform(0.5);
        // Scale applies in local space, translation is unscaled
        let p = transform_point(frame.top(), Vec3::new(2.0, 0.0, 0.0));
        assert!(p.max_abs_diff(Vec3::new(1.0, 0.0, -5.0)) < 1e-5);
    }

    #[test]
    fn test_sibling_frames_independent() {
        let mut stack = MatrixStack::new();
        let first = {
            let mut frame = stack.push();
            frame.translate(Vec3::X);
            frame.top()
        };
        let second = {
            let mut frame = stack.push();
            frame.translate(Vec3::Y);
            frame.top()
        };
        // The second frame starts from identity, not from the first's state
        assert!(transform_point(first, Vec3::ZERO).max_abs_diff(Vec3::X) < 1e-6);
        assert!(transform_point(second, Vec3::ZERO).max_abs_diff(Vec3::Y) < 1e-6);
    }

    #[test]
    fn test_nested_frames_compose() {
        let mut stack = MatrixStack::new();
        let mut outer = stack.push();
        outer.translate(Vec3::new(0.0, 0.0, -5.0));
        let outer_top = outer.top();
        drop(outer);

        // A new frame after a rotation-bearing one must not inherit it
        let inner_top = {
            let frame = stack.push();
            frame.top()
        };
        assert_ne!(outer_top, inner_top);
        assert_eq!(inner_top, mat4::IDENTITY);
    }

    #[test]
    fn test_load_identity_resets_top_only() {
        let mut stack = MatrixStack::new();
        let mut frame = stack.push();
        frame.translate(Vec3::X);
        frame.load_identity();
        assert_eq!(frame.top(), mat4::IDENTITY);
    }
}
