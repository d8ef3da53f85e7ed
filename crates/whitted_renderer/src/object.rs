//! Scene objects: a primitive plus its material, shading and shadow flags,
//! together with the local Phong lighting model.

use whitted_core::Material;
use whitted_math::{reflect, Color, Ray, Vec3};

use crate::primitive::Primitive;
use crate::{Shading, Shape};

/// Ambient coefficient applied to the surface color.
pub const AMBIENT: f32 = 0.2;

/// One renderable object.
#[derive(Clone, Debug)]
pub struct SceneObject {
    /// Display name (for logging)
    pub name: String,
    pub shape: Shape,
    pub material: Material,
    pub shading: Shading,
    /// Whether this object can block light from reaching other surfaces
    pub casts_shadows: bool,
    /// Whether shadow rays are tested when shading this object
    pub receives_shadows: bool,
}

impl SceneObject {
    pub fn new(shape: impl Into<Shape>, material: Material) -> Self {
        let shape = shape.into();
        Self {
            name: shape.kind().to_string(),
            shape,
            material,
            shading: Shading::Solid,
            casts_shadows: true,
            receives_shadows: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn without_cast_shadows(mut self) -> Self {
        self.casts_shadows = false;
        self
    }

    pub fn without_received_shadows(mut self) -> Self {
        self.receives_shadows = false;
        self
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.shape.intersect(ray)
    }

    #[inline]
    pub fn normal(&self, point: Vec3) -> Vec3 {
        self.shape.normal(point)
    }

    /// Surface color at `point` according to this object's shading strategy.
    pub fn surface_color(&self, point: Vec3) -> Color {
        self.shading
            .surface_color(&self.shape, self.material.color, point)
    }

    /// Phong shading for a single light.
    ///
    /// Channels are clamped below at zero only; the caller may scale the
    /// result further.
    pub fn lighting(&self, color: Color, light_pos: Vec3, view: Vec3, hit: Vec3) -> Color {
        let normal = self.normal(hit);
        let light_dir = (light_pos - hit).normalize();
        let l_dot_n = light_dir.dot(normal);
        let specular = self.specular_term(light_dir, normal, view);

        let sum = AMBIENT * color + l_dot_n * color + specular * Color::ONE;
        sum.max(Color::ZERO)
    }

    /// Phong shading for two lights with a single ambient term, clamped to
    /// [0, 1] per channel.
    ///
    /// On two-sided primitives a light behind the analytic normal is treated
    /// as lighting the surface from the front.
    pub fn double_lighting(
        &self,
        color: Color,
        light_pos1: Vec3,
        light_pos2: Vec3,
        view: Vec3,
        hit: Vec3,
    ) -> Color {
        let normal = self.normal(hit);
        let two_sided = self.shape.two_sided_lighting();

        let contribution = |light_pos: Vec3| {
            let light_dir = (light_pos - hit).normalize();
            let mut l_dot_n = light_dir.dot(normal);
            if two_sided && l_dot_n < 0.0 {
                l_dot_n = light_dir.dot(-normal);
            }
            l_dot_n * color + self.specular_term(light_dir, normal, view) * Color::ONE
        };

        let sum = AMBIENT * color + contribution(light_pos1) + contribution(light_pos2);
        sum.clamp(Color::ZERO, Color::ONE)
    }

    /// Ambient-only color, used when no light reaches the surface.
    pub fn shadow(&self, color: Color) -> Color {
        AMBIENT * color
    }

    fn specular_term(&self, light_dir: Vec3, normal: Vec3, view: Vec3) -> f32 {
        let Some(shininess) = self.material.shininess else {
            return 0.0;
        };
        let r_dot_v = reflect(-light_dir, normal).dot(view);
        if r_dot_v > 0.0 {
            r_dot_v.powf(shininess)
        } else {
            0.0
        }
    }
}
