//! Shared capability interface of the geometric primitives.

use whitted_core::ShapeDescription;
use whitted_math::{Ray, Vec3};

use crate::{Cone, Cylinder, Plane, Sphere};

/// Roots closer than this to the ray origin are ignored, so a ray leaving a
/// surface does not immediately re-hit it.
pub const SELF_HIT_EPSILON: f32 = 1e-3;

/// Quadratic discriminants this close to zero are treated as a miss.
pub const TANGENT_EPSILON: f32 = 1e-6;

/// Trait for geometric primitives that can be hit by rays.
pub trait Primitive: Send + Sync {
    /// Distance along `ray` to the nearest valid intersection.
    ///
    /// `None` means no valid intersection exists: the ray misses, grazes the
    /// surface tangentially, or hits it outside its bounded region.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Outward unit normal at `point`, which must lie on the surface.
    fn normal(&self, point: Vec3) -> Vec3;

    /// Whether diffuse lighting should treat both sides of the surface as
    /// facing the light. Used where the analytic normal may point away from
    /// a light that actually illuminates the visible side.
    fn two_sided_lighting(&self) -> bool {
        false
    }
}

/// The closed set of primitives a scene object can be made of.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Cylinder(Cylinder),
    Cone(Cone),
}

impl Shape {
    fn primitive(&self) -> &dyn Primitive {
        match self {
            Shape::Sphere(s) => s,
            Shape::Plane(p) => p,
            Shape::Cylinder(c) => c,
            Shape::Cone(c) => c,
        }
    }

    /// Short lowercase name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Cylinder(_) => "cylinder",
            Shape::Cone(_) => "cone",
        }
    }
}

impl Primitive for Shape {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.primitive().intersect(ray)
    }

    #[inline]
    fn normal(&self, point: Vec3) -> Vec3 {
        self.primitive().normal(point)
    }

    fn two_sided_lighting(&self) -> bool {
        self.primitive().two_sided_lighting()
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Plane> for Shape {
    fn from(p: Plane) -> Self {
        Shape::Plane(p)
    }
}

impl From<Cylinder> for Shape {
    fn from(c: Cylinder) -> Self {
        Shape::Cylinder(c)
    }
}

impl From<Cone> for Shape {
    fn from(c: Cone) -> Self {
        Shape::Cone(c)
    }
}

impl From<&ShapeDescription> for Shape {
    fn from(desc: &ShapeDescription) -> Self {
        match *desc {
            ShapeDescription::Sphere { center, radius } => Sphere::new(center, radius).into(),
            ShapeDescription::Plane { corners } => {
                let [a, b, c, d] = corners;
                Plane::new(a, b, c, d).into()
            }
            ShapeDescription::Cylinder {
                base,
                radius,
                height,
            } => Cylinder::new(base, radius, height).into(),
            ShapeDescription::Cone {
                base,
                radius,
                height,
            } => Cone::new(base, radius, height).into(),
        }
    }
}

/// Roots of `a·t² + b·t + c = 0` in ascending order.
///
/// Returns `None` for a negative or near-zero discriminant and for a
/// degenerate (near-zero) leading coefficient.
pub(crate) fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a.abs() < TANGENT_EPSILON {
        return None;
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || discriminant.abs() < TANGENT_EPSILON {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);
    Some(if t1 <= t2 { (t1, t2) } else { (t2, t1) })
}
