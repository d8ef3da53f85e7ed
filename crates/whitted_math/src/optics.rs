//! Reflection and refraction of direction vectors.

use crate::Vec3;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector `i` through a surface with unit normal `n`.
///
/// `eta` is the ratio of indices of refraction (incident over transmitted).
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(i: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let n_dot_i = n.dot(i);
    let k = 1.0 - eta * eta * (1.0 - n_dot_i * n_dot_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * i - (eta * n_dot_i + k.sqrt()) * n)
}
