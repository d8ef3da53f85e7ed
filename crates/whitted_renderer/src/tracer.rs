//! Recursive Whitted-style tracing.
//!
//! Each call shades the nearest hit with two-light Phong lighting, resolves
//! shadows per light, then adds reflection, transparency and refraction
//! contributions by recursing on secondary rays until the depth limit.

use whitted_math::{reflect, refract, Color, Ray, Vec3};

use crate::scene::Hit;
use crate::{RenderConfig, Scene, SceneObject};

/// Default bound on recursion depth.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Brightening applied to surfaces shadowed only by translucent objects.
pub const TRANSLUCENT_SHADOW_BOOST: f32 = 1.46;

/// Weight of the summed single-light colors when both lights are blocked by
/// a translucent object.
pub const DOUBLE_SHADOW_BLEND: f32 = 0.45;

/// Counters collected while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of `trace` invocations (primary and secondary rays)
    pub rays: u64,
    /// Deepest recursion level reached
    pub deepest: u32,
}

impl TraceStats {
    #[inline]
    fn record(&mut self, depth: u32) {
        self.rays += 1;
        self.deepest = self.deepest.max(depth);
    }

    /// Accumulate counters from another tracing run.
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays += other.rays;
        self.deepest = self.deepest.max(other.deepest);
    }
}

/// Compute the color seen along `ray`.
///
/// `depth` starts at 1 for primary rays. Secondary rays are only cast while
/// `depth < config.max_depth`, which bounds the recursion.
pub fn trace(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Color {
    stats.record(depth);

    let Some(hit) = scene.closest_hit(ray) else {
        return config.background;
    };

    let object = hit.object;
    let material = object.material();
    let lights = scene.lights;
    let view = -ray.direction();
    let surface = object.surface_color(hit.point);

    let mut color = object.double_lighting(surface, lights.left, lights.right, view, hit.point);

    if object.receives_shadows {
        let left = shadow_blocker(scene, &hit, lights.left);
        let right = shadow_blocker(scene, &hit, lights.right);

        color = match (left, right) {
            (None, None) => color,
            (Some(_), Some(right_blocker)) => {
                if right_blocker.material().is_translucent() {
                    let right_lit = object.lighting(surface, lights.right, view, hit.point);
                    let left_lit = object.lighting(surface, lights.left, view, hit.point);
                    (right_lit + left_lit) * TRANSLUCENT_SHADOW_BOOST * DOUBLE_SHADOW_BLEND
                } else {
                    object.shadow(surface)
                }
            }
            (Some(blocker), None) => {
                let lit = object.lighting(surface, lights.right, view, hit.point);
                through_blocker(lit, blocker)
            }
            (None, Some(blocker)) => {
                let lit = object.lighting(surface, lights.left, view, hit.point);
                through_blocker(lit, blocker)
            }
        };
    }

    if depth >= config.max_depth {
        return color;
    }

    if let Some(rho) = material.reflection {
        let normal = object.normal(hit.point);
        let reflected = Ray::new(hit.point, reflect(ray.direction(), normal));
        color += rho * trace(&reflected, scene, depth + 1, config, stats);
    }

    if let Some(coeff) = material.transparency {
        let continued = Ray::new(hit.point, ray.direction());
        let behind = trace(&continued, scene, depth + 1, config, stats);
        color = (1.0 - coeff) * color + coeff * behind;
    }

    if material.is_refractive() {
        if let Some(refracted) = refracted_color(ray, &hit, scene, depth, config, stats) {
            color = refracted;
        }
    }

    color
}

/// The object blocking `light` from `hit`, if any.
///
/// A shadow ray is cast from the hit point towards the light. It is blocked
/// when the nearest shadow-casting object lies strictly closer than the
/// light and is not the surface being shaded.
pub fn shadow_blocker<'a>(scene: &'a Scene, hit: &Hit<'_>, light: Vec3) -> Option<&'a SceneObject> {
    let to_light = light - hit.point;
    let shadow_ray = Ray::new(hit.point, to_light);
    let blocker = scene.closest_hit_where(&shadow_ray, |o| o.casts_shadows)?;

    (blocker.distance < to_light.length() && blocker.index != hit.index).then_some(blocker.object)
}

/// Single-light color of a partially shadowed point, brightened when the
/// blocker lets light through.
fn through_blocker(lit: Color, blocker: &SceneObject) -> Color {
    if blocker.material().is_translucent() {
        (lit * TRANSLUCENT_SHADOW_BOOST).min(Color::ONE)
    } else {
        lit
    }
}

/// Color seen through a refractive object.
///
/// The ray bends into the object, leaves it at the next surface hit, bends
/// back out and is traced onwards. The exit is whatever the inward ray hits
/// first, so refractive objects must be convex and must not overlap other
/// objects. Returns `None` on total internal reflection or when the inward
/// ray finds no exit.
fn refracted_color(
    ray: &Ray,
    hit: &Hit<'_>,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Option<Color> {
    let object = hit.object;
    let eta = object.material().refractive_index();

    let entry_normal = object.normal(hit.point);
    let inward = Ray::new(hit.point, refract(ray.direction(), entry_normal, eta)?);

    let Some(exit) = scene.closest_hit(&inward) else {
        log::trace!("Refracted ray into {} found no exit", object.name);
        return None;
    };

    let exit_normal = object.normal(exit.point);
    let outward = Ray::new(
        exit.point,
        refract(inward.direction(), -exit_normal, 1.0 / eta)?,
    );

    Some(trace(&outward, scene, depth + 1, config, stats))
}
