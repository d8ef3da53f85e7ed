//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon, then stitched back into one image.

use std::time::Instant;

use rayon::prelude::*;
use whitted_math::Color;

use crate::renderer::render_pixel;
use crate::tracer::TraceStats;
use crate::{Camera, ImageBuffer, RenderConfig, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Tile a `width`x`height` image into square buckets of `bucket_size`
/// pixels (smaller along the right and bottom edges), ordered from the
/// image center outwards. Each bucket's `index` is its render order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let step = size as usize;

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step)
        .flat_map(|y| {
            (0..width)
                .step_by(step)
                .map(move |x| Bucket::new(x, y, size.min(width - x), size.min(height - y), 0))
        })
        .collect();

    let center = (width as f32 / 2.0, height as f32 / 2.0);
    buckets.sort_by(|a, b| center_distance(a, center).total_cmp(&center_distance(b, center)));

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Squared distance from the bucket's center to `center`.
fn center_distance(bucket: &Bucket, center: (f32, f32)) -> f32 {
    let bx = bucket.x as f32 + bucket.width as f32 / 2.0;
    let by = bucket.y as f32 + bucket.height as f32 / 2.0;
    (bx - center.0).powi(2) + (by - center.1).powi(2)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    /// Tracing counters for this bucket
    pub stats: TraceStats,
}

impl BucketResult {
    /// Copy this bucket's pixels into `image`.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let mut pixels = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(color) = pixels.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, *color);
                }
            }
        }
    }
}

/// Render a single bucket. Pixels are returned in row-major order within
/// the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> BucketResult {
    let mut stats = TraceStats::default();
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                scene,
                bucket.x + local_x,
                bucket.y + local_y,
                config,
                &mut stats,
            );
            pixels.push(color);
        }
    }

    log::debug!(
        "Bucket {} at ({}, {}) done, {} rays",
        bucket.index,
        bucket.x,
        bucket.y,
        stats.rays
    );

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

/// Render the scene across the rayon thread pool.
///
/// Produces the same image as [`crate::render`] since tracing only reads
/// the scene.
pub fn render_parallel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    bucket_size: u32,
) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(camera.image_width, camera.image_height, bucket_size);
    log::info!(
        "Rendering {}x{} in {} buckets on {} threads",
        camera.image_width,
        camera.image_height,
        buckets.len(),
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, config))
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let mut stats = TraceStats::default();
    for result in &results {
        result.write_into(&mut image);
        stats.merge(&result.stats);
    }

    log::info!(
        "Rendered {}x{} in {:.2?} ({} rays, depth {})",
        image.width,
        image.height,
        start.elapsed(),
        stats.rays,
        stats.deepest
    );

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, Cone, Plane, SceneObject, Sphere};
    use whitted_core::Material;
    use whitted_math::Vec3;

    #[test]
    fn test_buckets_cover_image_once_from_center() {
        let (width, height) = (100, 70);
        let buckets = generate_buckets(width, height, 32);
        assert_eq!(buckets.len(), 4 * 3);

        let mut coverage = vec![0u8; (width * height) as usize];
        for bucket in &buckets {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    coverage[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(coverage.iter().all(|&c| c == 1));

        // The bucket holding the center pixel is rendered first
        let first = &buckets[0];
        assert!((first.x..first.x + first.width).contains(&(width / 2)));
        assert!((first.y..first.y + first.height).contains(&(height / 2)));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_write_into_places_pixels() {
        let bucket = Bucket::new(1, 1, 2, 1, 0);
        let result = BucketResult {
            bucket,
            pixels: vec![Color::X, Color::Y],
            stats: TraceStats::default(),
        };
        let mut image = ImageBuffer::new(4, 3);
        result.write_into(&mut image);

        assert_eq!(image.get(1, 1), Color::X);
        assert_eq!(image.get(2, 1), Color::Y);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_parallel_matches_single_threaded() {
        let mut scene = Scene::default();
        scene.add(SceneObject::new(
            Plane::new(
                Vec3::new(-50.0, -10.0, 0.0),
                Vec3::new(50.0, -10.0, 0.0),
                Vec3::new(50.0, -10.0, -100.0),
                Vec3::new(-50.0, -10.0, -100.0),
            ),
            Material::new(Color::splat(0.6)),
        ));
        scene.add(SceneObject::new(
            Sphere::new(Vec3::new(0.0, 0.0, -60.0), 6.0),
            Material::new(Color::new(0.2, 0.3, 0.9)).with_reflection(0.5),
        ));
        scene.add(SceneObject::new(
            Cone::new(Vec3::new(-5.0, -10.0, -50.0), 2.0, 4.0),
            Material::new(Color::new(0.4, 0.4, 0.0)),
        ));

        let camera = Camera::new().with_resolution(24, 18);
        let config = RenderConfig::default();

        let single = render(&camera, &scene, &config);
        let parallel = render_parallel(&camera, &scene, &config, 7);
        assert_eq!(single, parallel);
    }
}
