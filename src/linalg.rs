//! The handful of transform helpers a vertex shader pipeline needs. Storage types are
//! cgmath's; what lives here is validation and the exact conventions the scene relies on
//! (right handed view space, OpenGL clip space, column major upload).
use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use crate::error::{GasketError, Result};

/// Linear interpolation between two points, `(1 - t) * p + t * q` per component.
///
/// At `t = 0.5` this is bit identical to `(p + q) / 2` since halving is exact in IEEE 754.
#[inline]
pub fn mix(p: Point3<f32>, q: Point3<f32>, t: f32) -> Point3<f32> {
    let s = 1.0 - t;
    Point3::new(s * p.x + t * q.x, s * p.y + t * q.y, s * p.z + t * q.z)
}

/// View matrix placing `eye` at the origin looking down -Z towards `target`.
pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Result<Matrix4<f32>> {
    if !finite_point(eye) || !finite_point(target) || !finite_vector(up) {
        return Err(GasketError::DegenerateCamera("non-finite camera input"));
    }

    let dir = target - eye;
    if dir.x == 0.0 && dir.y == 0.0 && dir.z == 0.0 {
        return Err(GasketError::DegenerateCamera("eye and look-at target coincide"));
    }
    let forward = unit(dir)
        .ok_or(GasketError::DegenerateCamera("eye and look-at target are too far apart"))?;

    let up = unit(up).ok_or(GasketError::DegenerateCamera("up is the zero vector"))?;
    let right = unit(forward.cross(up))
        .ok_or(GasketError::DegenerateCamera("up is parallel to the view direction"))?;
    let true_up = right.cross(forward);

    let eye = eye.to_vec();

    #[rustfmt::skip]
    let view = Matrix4::new(
        right.x, true_up.x, -forward.x, 0.0,
        right.y, true_up.y, -forward.y, 0.0,
        right.z, true_up.z, -forward.z, 0.0,
        -right.dot(eye), -true_up.dot(eye), forward.dot(eye), 1.0,
    );

    if !finite_matrix(&view) {
        return Err(GasketError::DegenerateCamera("eye is too far from the origin"));
    }

    Ok(view)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Counter clockwise rotation about one of the coordinate axes.
pub fn rotate(axis: Axis, angle: Deg<f32>) -> Matrix4<f32> {
    match axis {
        Axis::X => Matrix4::from_angle_x(angle),
        Axis::Y => Matrix4::from_angle_y(angle),
        Axis::Z => Matrix4::from_angle_z(angle),
    }
}

/// Symmetric frustum projection. `fovy` is the full vertical field of view.
pub fn perspective(fovy: Deg<f32>, aspect: f32, near: f32, far: f32) -> Result<Matrix4<f32>> {
    let degenerate = |reason| GasketError::DegenerateProjection {
        reason,
        fovy: fovy.0,
        aspect,
        near,
        far,
    };

    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(degenerate("aspect ratio must be finite and positive"));
    }
    if !(near.is_finite() && near > 0.0) {
        return Err(degenerate("near plane must be positive"));
    }
    if !(far.is_finite() && far > near) {
        return Err(degenerate("far plane must lie beyond the near plane"));
    }
    if !(fovy.0 > 0.0 && fovy.0 < 180.0) {
        return Err(degenerate("field of view must lie strictly between 0 and 180 degrees"));
    }

    // Inputs can each be fine and still overflow or flush a term to zero. The determinant
    // is x.x * y.y * w.z, so those must survive as well.
    let m = cgmath::perspective(fovy, aspect, near, far);
    if !finite_matrix(&m) || m.x.x == 0.0 || m.y.y == 0.0 || m.w.z == 0.0 {
        return Err(degenerate("planes are too far apart to represent"));
    }

    Ok(m)
}

/// Composition, `lhs` applied after `rhs`.
#[inline]
pub fn mult(lhs: &Matrix4<f32>, rhs: &Matrix4<f32>) -> Matrix4<f32> {
    *lhs * *rhs
}

/// Column major copy ready for a uniform upload without transposition.
#[inline]
pub fn flatten(m: &Matrix4<f32>) -> [f32; 16] {
    let flat: &[f32; 16] = m.as_ref();
    *flat
}

/// `v` scaled to unit length, or `None` when it is zero or cannot be normalized. Dividing
/// by the largest component first keeps the squared length from overflowing or
/// underflowing.
fn unit(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let largest = v.x.abs().max(v.y.abs()).max(v.z.abs());
    if !largest.is_finite() || largest == 0.0 {
        return None;
    }
    let n = (v / largest).normalize();
    if finite_vector(n) {
        Some(n)
    } else {
        None
    }
}

fn finite_matrix(m: &Matrix4<f32>) -> bool {
    let flat: &[f32; 16] = m.as_ref();
    flat.iter().all(|v| v.is_finite())
}

fn finite_point(p: Point3<f32>) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

fn finite_vector(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
