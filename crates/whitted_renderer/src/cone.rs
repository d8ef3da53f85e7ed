//! Finite apex-up cone primitive.

use crate::primitive::{solve_quadratic, Primitive, SELF_HIT_EPSILON};
use whitted_math::{Interval, Ray, Vec3};

/// A cone whose base circle of `radius` is centered on `base` and whose
/// apex sits `height` above it. Only the lateral surface is intersected.
#[derive(Clone, Debug, PartialEq)]
pub struct Cone {
    base: Vec3,
    radius: f32,
    height: f32,
}

impl Cone {
    pub fn new(base: Vec3, radius: f32, height: f32) -> Self {
        Self {
            base,
            radius,
            height,
        }
    }

    pub fn apex(&self) -> Vec3 {
        self.base + Vec3::Y * self.height
    }

    fn height_range(&self) -> Interval {
        Interval::from_start(self.base.y, self.height)
    }
}

impl Primitive for Cone {
    /// Only the nearer root of the double cone is considered. When it falls
    /// outside the height range (or behind the ray) the ray misses, even if
    /// the farther root would be a valid hit; rays starting inside the cone
    /// therefore never see its wall.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let o = ray.origin() - self.base;
        let d = ray.direction();
        let k = (self.radius * self.radius) / (self.height * self.height);
        let gap = self.height - o.y;

        let a = d.x * d.x + d.z * d.z - k * d.y * d.y;
        let b = 2.0 * (d.x * o.x + d.z * o.z + k * d.y * gap);
        let c = o.x * o.x + o.z * o.z - k * gap * gap;

        let (t, _) = solve_quadratic(a, b, c)?;
        (t > SELF_HIT_EPSILON && self.height_range().surrounds(ray.at(t).y)).then_some(t)
    }

    fn normal(&self, p: Vec3) -> Vec3 {
        let around = (p.x - self.base.x).atan2(p.z - self.base.z);
        let slope = (self.radius / self.height).atan();
        Vec3::new(
            around.sin() * slope.cos(),
            slope.sin(),
            around.cos() * slope.cos(),
        )
    }

    fn two_sided_lighting(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cone() -> Cone {
        Cone::new(Vec3::ZERO, 1.0, 1.0)
    }

    #[test]
    fn test_horizontal_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), -Vec3::Z);
        let t = unit_cone().intersect(&ray).unwrap();
        assert!((t - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_upper_nappe_is_rejected() {
        // Above the apex the double cone widens again; those hits are outside
        // the height range.
        let ray = Ray::new(Vec3::new(0.0, 1.5, 5.0), -Vec3::Z);
        assert!(unit_cone().intersect(&ray).is_none());
    }

    #[test]
    fn test_below_base_misses() {
        let ray = Ray::new(Vec3::new(0.0, -0.5, 5.0), -Vec3::Z);
        assert!(unit_cone().intersect(&ray).is_none());
    }

    #[test]
    fn test_no_fallback_to_farther_root() {
        // Known limitation: from inside the cone the nearer root is behind the
        // origin and the valid farther root is not used.
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), -Vec3::Z);
        assert!(unit_cone().intersect(&ray).is_none());
    }

    #[test]
    fn test_scaled_cone() {
        let cone = Cone::new(Vec3::new(0.0, -10.0, -60.0), 2.0, 4.0);
        // Half way up the radius is 1
        let ray = Ray::new(Vec3::new(0.0, -8.0, 0.0), -Vec3::Z);
        let t = cone.intersect(&ray).unwrap();
        assert!((t - 59.0).abs() < 1e-3);
        assert_eq!(cone.apex(), Vec3::new(0.0, -6.0, -60.0));
    }

    #[test]
    fn test_normal_points_outward_and_up() {
        let cone = unit_cone();
        let s = std::f32::consts::FRAC_1_SQRT_2;

        let front = cone.normal(Vec3::new(0.0, 0.5, 0.5));
        assert!((front - Vec3::new(0.0, s, s)).length() < 1e-5);

        let back = cone.normal(Vec3::new(0.0, 0.5, -0.5));
        assert!((back - Vec3::new(0.0, s, -s)).length() < 1e-5);

        let side = cone.normal(Vec3::new(1.0, 0.0, 0.0));
        assert!((side - Vec3::new(s, s, 0.0)).length() < 1e-5);
        assert!((side.length() - 1.0).abs() < 1e-5);
    }
}
