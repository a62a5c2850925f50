//! Column-major 4x4 matrix helpers
//!
//! Matrices are `[[f32; 4]; 4]` with each inner array holding one column,
//! matching the layout WGSL expects for `mat4x4<f32>` uniforms. Transform
//! composition follows the usual convention: `mul(a, b)` applies `b` first,
//! then `a`.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two matrices: `mul(a, b)` transforms by `b`, then by `a`
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for c in 0..4 {
        for r in 0..4 {
            result[c][r] =
                a[0][r] * b[c][0] + a[1][r] * b[c][1] + a[2][r] * b[c][2] + a[3][r] * b[c][3];
        }
    }
    result
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3] = [offset.x, offset.y, offset.z, 1.0];
    m
}

/// Rotation about the X axis by `angle` radians
pub fn rotation_x(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[1][1] = cs;
    m[1][2] = sn;
    m[2][1] = -sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Y axis by `angle` radians
pub fn rotation_y(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][2] = -sn;
    m[2][0] = sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Z axis by `angle` radians
pub fn rotation_z(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][1] = sn;
    m[1][0] = -sn;
    m[1][1] = cs;
    m
}

/// Non-uniform scale matrix
pub fn scaling(scale: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = scale.x;
    m[1][1] = scale.y;
    m[2][2] = scale.z;
    m
}

/// Uniform scale matrix
pub fn scaling_uniform(scale: f32) -> Mat4 {
    scaling(Vec3::splat(scale))
}

/// Transform a point by a matrix (w = 1)
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Perspective projection matrix
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn assert_vec3_close(a: Vec3, b: Vec3) {
        assert!(a.max_abs_diff(b) < 1e-5, "expected {:?}, got {:?}", b, a);
    }

    #[test]
    fn test_identity_transform() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(transform_point(IDENTITY, p), p);
    }

    #[test]
    fn test_translation() {
        let m = translation(Vec3::new(1.0, 2.0, 3.0));
        let p = transform_point(m, Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        // Rotating +Y about X by 90 degrees gives +Z
        let m = rotation_x(FRAC_PI_2);
        assert_vec3_close(transform_point(m, Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        // Rotating +Z about Y by 90 degrees gives +X
        let m = rotation_y(FRAC_PI_2);
        assert_vec3_close(transform_point(m, Vec3::Z), Vec3::X);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        // Rotating +X about Z by 90 degrees gives +Y
        let m = rotation_z(FRAC_PI_2);
        assert_vec3_close(transform_point(m, Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_scaling() {
        let m = scaling(Vec3::new(2.0, 3.0, 4.0));
        let p = transform_point(m, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_mul_applies_right_first() {
        // Translate then rotate vs rotate then translate differ
        let t = translation(Vec3::new(1.0, 0.0, 0.0));
        let r = rotation_z(FRAC_PI_2);

        // mul(r, t): translate first, then rotate -> (1,0,0) -> (0,1,0)
        let p = transform_point(mul(r, t), Vec3::ZERO);
        assert_vec3_close(p, Vec3::Y);

        // mul(t, r): rotate first (no-op at origin), then translate
        let p = transform_point(mul(t, r), Vec3::ZERO);
        assert_vec3_close(p, Vec3::X);
    }

    #[test]
    fn test_mul_identity() {
        let m = mul(rotation_x(0.3), translation(Vec3::new(1.0, 2.0, 3.0)));
        let left = mul(IDENTITY, m);
        let right = mul(m, IDENTITY);
        assert_eq!(left, m);
        assert_eq!(right, m);
    }

    #[test]
    fn test_perspective_not_degenerate() {
        let proj = perspective(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
        assert!(proj[0][0] != 0.0);
        assert!(proj[1][1] != 0.0);
        assert_eq!(proj[2][3], -1.0);
    }

    #[test]
    fn test_look_at_origin_view() {
        // Camera at origin looking down -Z is the identity view
        let m = look_at(Vec3::ZERO, -Vec3::Z, Vec3::Y);
        let p = transform_point(m, Vec3::new(0.0, 0.0, -5.0));
        assert_vec3_close(p, Vec3::new(0.0, 0.0, -5.0));
    }
}
