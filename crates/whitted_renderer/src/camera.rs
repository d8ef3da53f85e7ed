//! Pinhole camera for ray generation.

use whitted_math::{Ray, Vec2, Vec3};

/// Fixed-plane pinhole camera looking down -Z.
///
/// Rays start at the eye and pass through an image plane at distance
/// `near`, spanning `[-view_width/2, view_width/2]` horizontally and
/// `[-view_height/2, view_height/2]` vertically. Pixel row 0 is the top of
/// the image.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Image plane
    eye: Vec3,
    view_width: f32,
    view_height: f32,
    near: f32,
}

impl Camera {
    /// Create a camera with the museum defaults: 800x800 pixels over a
    /// 20x20 plane at distance 40.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 800,
            eye: Vec3::ZERO,
            view_width: 20.0,
            view_height: 20.0,
            near: 40.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the extent of the image plane and its distance from the eye.
    pub fn with_view(mut self, view_width: f32, view_height: f32, near: f32) -> Self {
        self.view_width = view_width;
        self.view_height = view_height;
        self.near = near;
        self
    }

    /// Set eye position.
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Size of one pixel on the image plane.
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.view_width / self.image_width as f32,
            self.view_height / self.image_height as f32,
        )
    }

    /// Ray through the center of sub-cell `(k, h)` of pixel `(x, y)` split
    /// into an `n`x`n` grid. `k` runs left to right, `h` bottom to top.
    pub fn sub_pixel_ray(&self, x: u32, y: u32, k: u32, h: u32, n: u32) -> Ray {
        let cell = self.cell_size();
        let sub = cell / n.max(1) as f32;

        let left = -0.5 * self.view_width + x as f32 * cell.x;
        let bottom = 0.5 * self.view_height - (y + 1) as f32 * cell.y;

        let direction = Vec3::new(
            left + (k as f32 + 0.5) * sub.x,
            bottom + (h as f32 + 0.5) * sub.y,
            -self.near,
        );

        Ray::new(self.eye, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::new();
        assert_eq!(camera.image_width, 800);
        assert_eq!(camera.image_height, 800);
        assert_eq!(camera.eye(), Vec3::ZERO);
        assert!((camera.cell_size() - Vec2::splat(0.025)).length() < 1e-6);
    }

    #[test]
    fn test_single_sample_hits_pixel_center() {
        let camera = Camera::new()
            .with_resolution(2, 2)
            .with_view(2.0, 2.0, 1.0);

        // Top-left pixel center is (-0.5, 0.5) on the plane
        let ray = camera.sub_pixel_ray(0, 0, 0, 0, 1);
        let expected = Vec3::new(-0.5, 0.5, -1.0).normalize();
        assert!((ray.direction() - expected).length() < 1e-6);

        // Bottom-right pixel center is (0.5, -0.5)
        let ray = camera.sub_pixel_ray(1, 1, 0, 0, 1);
        let expected = Vec3::new(0.5, -0.5, -1.0).normalize();
        assert!((ray.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_sub_cells_split_the_pixel() {
        let camera = Camera::new()
            .with_resolution(1, 1)
            .with_view(4.0, 4.0, 2.0);

        // Sub-cell centers of the single pixel at n = 2
        let cases = [
            (0, 0, Vec3::new(-1.0, -1.0, -2.0)),
            (1, 0, Vec3::new(1.0, -1.0, -2.0)),
            (0, 1, Vec3::new(-1.0, 1.0, -2.0)),
            (1, 1, Vec3::new(1.0, 1.0, -2.0)),
        ];
        for (k, h, target) in cases {
            let ray = camera.sub_pixel_ray(0, 0, k, h, 2);
            assert!((ray.direction() - target.normalize()).length() < 1e-6);
        }
    }

    #[test]
    fn test_eye_offsets_origin() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let camera = Camera::new().with_eye(eye);
        let ray = camera.sub_pixel_ray(400, 400, 0, 0, 2);
        assert_eq!(ray.origin(), eye);
        assert!(ray.direction().z < 0.0);
    }
}
