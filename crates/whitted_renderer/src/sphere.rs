//! Sphere primitive for ray tracing.

use crate::primitive::{solve_quadratic, Primitive, SELF_HIT_EPSILON};
use whitted_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        // Direction is unit length, so the leading coefficient is 1
        let oc = ray.origin() - self.center;
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let (t1, t2) = solve_quadratic(1.0, b, c)?;

        // Nearest root in front of the origin
        [t1, t2].into_iter().find(|&t| t > SELF_HIT_EPSILON)
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}
