//! Quadrilateral plane primitive.

use crate::primitive::Primitive;
use whitted_math::{Ray, Vec3};

/// Rays this close to parallel with the plane are treated as a miss.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Hits closer than this to the ray origin are ignored.
const PLANE_SELF_HIT_EPSILON: f32 = 1e-4;

/// A planar quadrilateral bounded by four coplanar corners `a, b, c, d`
/// given in winding order. The normal is `(c - b) × (a - b)`, normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    corners: [Vec3; 4],
    normal: Vec3,
}

impl Plane {
    /// Create a new plane from its corners.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        let normal = (c - b).cross(a - b).normalize();
        Self {
            corners: [a, b, c, d],
            normal,
        }
    }

    pub fn corners(&self) -> &[Vec3; 4] {
        &self.corners
    }

    /// True if `q`, a point on the plane, lies inside the quadrilateral.
    ///
    /// Each edge's cross product with the vector to `q` must point the same
    /// way along the normal for all four edges.
    pub fn contains(&self, q: Vec3) -> bool {
        let mut positive = 0;
        let mut negative = 0;

        for i in 0..4 {
            let start = self.corners[i];
            let end = self.corners[(i + 1) % 4];
            let k = (end - start).cross(q - start).dot(self.normal);
            if k > 0.0 {
                positive += 1;
            } else if k < 0.0 {
                negative += 1;
            }
        }

        positive == 4 || negative == 4
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.corners[0] - ray.origin()).dot(self.normal) / denom;
        if t < PLANE_SELF_HIT_EPSILON {
            return None;
        }

        self.contains(ray.at(t)).then_some(t)
    }

    fn normal(&self, _point: Vec3) -> Vec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(
            Vec3::new(-60.0, -10.0, -20.0),
            Vec3::new(60.0, -10.0, -20.0),
            Vec3::new(60.0, -10.0, -200.0),
            Vec3::new(-60.0, -10.0, -200.0),
        )
    }

    #[test]
    fn test_floor_normal_points_up() {
        assert!((floor().normal(Vec3::ZERO) - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_plane_hit_inside_bounds() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -10.0, -50.0));
        let t = floor().intersect(&ray).unwrap();
        let p = ray.at(t);
        assert!((p.y + 10.0).abs() < 1e-4);
        assert!((p.z + 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_plane_miss_outside_bounds() {
        // Hits the infinite plane at z = -10, in front of the quad's near edge
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -10.0, -10.0));
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_parallel_and_behind() {
        let parallel = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(floor().intersect(&parallel).is_none());

        let away = Ray::new(Vec3::new(0.0, 0.0, -50.0), Vec3::Y);
        assert!(floor().intersect(&away).is_none());
    }

    #[test]
    fn test_hit_from_below() {
        let ray = Ray::new(Vec3::new(0.0, -20.0, -50.0), Vec3::Y);
        let t = floor().intersect(&ray).unwrap();
        assert!((t - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_contains() {
        let plane = floor();
        assert!(plane.contains(Vec3::new(0.0, -10.0, -100.0)));
        assert!(!plane.contains(Vec3::new(70.0, -10.0, -100.0)));
        assert!(!plane.contains(Vec3::new(0.0, -10.0, -250.0)));
    }
}
