//! Column-major 4x4 matrix helpers
//!
//! Matrices are stored as `m[column][row]`, the layout wgpu uniforms expect.
//! Rotations follow the classic fixed-function convention: degrees, right-handed,
//! about an arbitrary axis that is normalized before use.

use crate::types::Vec3;

/// A column-major 4x4 matrix
pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 column-major matrices (`a * b`)
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }
    result
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Rotation of `angle_degrees` about `axis`.
///
/// A zero-length axis yields the identity.
pub fn axis_angle(angle_degrees: f32, axis: Vec3) -> Mat4 {
    let n = axis.normalized();
    if n == Vec3::ZERO {
        return IDENTITY;
    }

    let (s, c) = angle_degrees.to_radians().sin_cos();
    let t = 1.0 - c;
    let (x, y, z) = (n.x, n.y, n.z);

    [
        [x * x * t + c, y * x * t + z * s, x * z * t - y * s, 0.0],
        [x * y * t - z * s, y * y * t + c, y * z * t + x * s, 0.0],
        [x * z * t + y * s, y * z * t - x * s, z * z * t + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Transform a point (w = 1)
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// OpenGL-style perspective projection (`fov_y` in degrees)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y.to_radians() / 2.0).tan();
    let depth = far - near;

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, -(far + near) / depth, -1.0],
        [0.0, 0.0, -(2.0 * far * near) / depth, 0.0],
    ]
}
