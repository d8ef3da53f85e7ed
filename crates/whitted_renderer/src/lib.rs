//! Whitted - recursive CPU ray tracer
//!
//! Casts supersampled primary rays from a pinhole camera and shades each hit
//! with two point lights, hard shadows and recursive reflection,
//! transparency and refraction. Scenes are small object lists searched by a
//! linear closest-hit scan.

mod primitive;
mod sphere;
mod plane;
mod cylinder;
mod cone;
mod shading;
mod object;
mod scene;
mod tracer;
mod camera;
mod renderer;
mod bucket;

pub use primitive::{Primitive, Shape, SELF_HIT_EPSILON, TANGENT_EPSILON};
pub use sphere::Sphere;
pub use plane::Plane;
pub use cylinder::Cylinder;
pub use cone::Cone;
pub use shading::Shading;
pub use object::{SceneObject, AMBIENT};
pub use scene::{Hit, Lights, Scene, SceneError};
pub use tracer::{
    shadow_blocker, trace, TraceStats, DEFAULT_MAX_DEPTH, DOUBLE_SHADOW_BLEND,
    TRANSLUCENT_SHADOW_BOOST,
};
pub use camera::Camera;
pub use renderer::{color_to_rgba, render, render_pixel, ImageBuffer, RenderConfig};
pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};

/// Re-export common math types from whitted_math
pub use whitted_math::{Color, Interval, Ray, Vec2, Vec3};
