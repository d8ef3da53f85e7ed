//! Finite vertical cylinder primitive.

use std::f32::consts::PI;

use crate::primitive::{solve_quadratic, Primitive, SELF_HIT_EPSILON, TANGENT_EPSILON};
use whitted_math::{Interval, Ray, Vec2, Vec3};

/// A capped cylinder around the vertical axis through `base`, spanning
/// `base.y < y < base.y + height`.
///
/// The side wall is tested first. The cap disks are only consulted when the
/// ray has no valid side hit, which covers rays running along the axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    base: Vec3,
    radius: f32,
    height: f32,
}

impl Cylinder {
    pub fn new(base: Vec3, radius: f32, height: f32) -> Self {
        Self {
            base,
            radius,
            height,
        }
    }

    pub fn base(&self) -> Vec3 {
        self.base
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn height_range(&self) -> Interval {
        Interval::from_start(self.base.y, self.height)
    }

    fn top(&self) -> f32 {
        self.base.y + self.height
    }

    /// Nearest valid root of the side wall, falling back to the farther one.
    fn side_hit(&self, ray: &Ray) -> Option<f32> {
        let o = ray.origin() - self.base;
        let d = ray.direction();

        // Quadratic in x/z only, y is handled by the height check
        let a = d.x * d.x + d.z * d.z;
        let b = 2.0 * (d.x * o.x + d.z * o.z);
        let c = o.x * o.x + o.z * o.z - self.radius * self.radius;

        let (t1, t2) = solve_quadratic(a, b, c)?;
        let range = self.height_range();

        [t1, t2]
            .into_iter()
            .find(|&t| t > SELF_HIT_EPSILON && range.surrounds(ray.at(t).y))
    }

    /// Nearest hit on the top or bottom disk.
    fn cap_hit(&self, ray: &Ray) -> Option<f32> {
        let o = ray.origin();
        let d = ray.direction();
        if d.y.abs() < TANGENT_EPSILON {
            return None;
        }

        let r2 = self.radius * self.radius;
        [self.top(), self.base.y]
            .into_iter()
            .map(|y| (y - o.y) / d.y)
            .filter(|&t| {
                let p = ray.at(t) - self.base;
                t > SELF_HIT_EPSILON && p.x * p.x + p.z * p.z <= r2
            })
            .min_by(f32::total_cmp)
    }

    /// Texture coordinates of a point on the side surface.
    ///
    /// `s` is the angle around the axis as a fraction of a full turn, in
    /// (-1/4, 1/4) because the arctangent folds opposite sides together;
    /// `t` is the height fraction in [0, 1].
    pub fn texture_coords(&self, p: Vec3) -> Vec2 {
        let s = ((p.z - self.base.z) / (self.base.x - p.x)).atan() / (2.0 * PI);
        let t = (p.y - self.base.y) / self.height;
        Vec2::new(s, t)
    }
}

impl Primitive for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.side_hit(ray).or_else(|| self.cap_hit(ray))
    }

    /// Outward normal of whichever surface `p` lies closest to: the side
    /// wall or one of the caps.
    fn normal(&self, p: Vec3) -> Vec3 {
        let radial = Vec2::new(p.x - self.base.x, p.z - self.base.z);
        let side_gap = (radial.length() - self.radius).abs();

        let top_gap = (p.y - self.top()).abs();
        let bottom_gap = (p.y - self.base.y).abs();
        let (cap_gap, cap_normal) = if top_gap <= bottom_gap {
            (top_gap, Vec3::Y)
        } else {
            (bottom_gap, -Vec3::Y)
        };

        if cap_gap < side_gap {
            cap_normal
        } else {
            Vec3::new(radial.x / self.radius, 0.0, radial.y / self.radius)
        }
    }

    fn two_sided_lighting(&self) -> bool {
        true
    }
}
