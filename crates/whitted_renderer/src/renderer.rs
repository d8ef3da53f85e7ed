//! Supersampled image rendering.

use std::time::Instant;

use whitted_math::{Color, Interval};

use crate::tracer::{trace, TraceStats, DEFAULT_MAX_DEPTH};
use crate::{Camera, Scene};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Sub-pixel grid size; each pixel averages `supersampling²` rays
    pub supersampling: u32,
    /// Maximum recursion depth for secondary rays
    pub max_depth: u32,
    /// Color returned when a ray hits nothing
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            supersampling: 2,
            max_depth: DEFAULT_MAX_DEPTH,
            background: Color::ZERO,
        }
    }
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// Render a single pixel by averaging its sub-pixel rays.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Color {
    let n = config.supersampling.max(1);
    let mut pixel_color = Color::ZERO;

    for k in 0..n {
        for h in 0..n {
            let ray = camera.sub_pixel_ray(x, y, k, h, n);
            pixel_color += trace(&ray, scene, 1, config, stats);
        }
    }

    pixel_color / (n * n) as f32
}

/// Image buffer of unclamped linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes, row 0 first.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

/// Render the entire scene on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let mut stats = TraceStats::default();

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, x, y, config, &mut stats);
            image.set(x, y, color);
        }
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
    use crate::{SceneObject, Sphere};
    use whitted_core::Material;
    use whitted_math::Vec3;

    fn red_ball_scene() -> Scene {
        let mut scene = Scene::default();
        scene.add(SceneObject::new(
            Sphere::new(Vec3::new(0.0, 0.0, -60.0), 5.0),
            Material::new(Color::new(1.0, 0.0, 0.0)).without_specular(),
        ));
        scene
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(1.7, -0.3, 0.5)), [255, 0, 127, 255]);
    }

    #[test]
    fn test_render_pixel_averages_sub_samples() {
        let camera = Camera::new().with_resolution(10, 10);
        let scene = red_ball_scene();
        let config = RenderConfig::default();

        // Corner pixel misses everything
        let mut stats = TraceStats::default();
        let corner = render_pixel(&camera, &scene, 0, 0, &config, &mut stats);
        assert_eq!(corner, config.background);
        assert_eq!(stats.rays, 4);

        // Pixel next to the center sees the ball
        let center = render_pixel(&camera, &scene, 5, 5, &config, &mut stats);
        assert!(center.x > 0.0);
        assert_eq!(center.y, 0.0);
        assert_eq!(stats.rays, 8);
    }

    #[test]
    fn test_supersampling_factor() {
        let camera = Camera::new().with_resolution(4, 4);
        let scene = Scene::default();
        let config = RenderConfig {
            supersampling: 3,
            background: Color::new(0.2, 0.4, 0.6),
            ..Default::default()
        };

        let mut stats = TraceStats::default();
        let color = render_pixel(&camera, &scene, 1, 2, &config, &mut stats);
        assert_eq!(stats.rays, 9);
        assert!((color - config.background).length() < 1e-6);
    }

    #[test]
    fn test_render_fills_buffer() {
        let camera = Camera::new().with_resolution(8, 8);
        let image = render(&camera, &red_ball_scene(), &RenderConfig::default());

        assert_eq!(image.pixels.len(), 64);
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert!(image.get(4, 4).x > 0.0);
        assert_eq!(image.to_rgba().len(), 64 * 4);
    }

    #[test]
    fn test_image_buffer_set_get() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(0.5, 0.25, 1.0));
        assert_eq!(image.get(2, 1), Color::new(0.5, 0.25, 1.0));
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(&image.to_rgba()[20..24], &[127, 63, 255, 255]);
    }
}
