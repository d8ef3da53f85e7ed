//! Surface material definition.
//!
//! Each optional field pairs a feature flag with its coefficient: `None`
//! disables the feature, `Some(c)` enables it with coefficient `c`.

use serde::{Deserialize, Serialize};
use whitted_math::Color;

/// Default Phong shininess exponent.
pub const DEFAULT_SHININESS: f32 = 50.0;

/// Default relative refractive index used when refraction is enabled.
pub const DEFAULT_ETA: f32 = 0.992;

/// Refraction parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Refraction {
    /// Relative index of refraction (outside over inside)
    pub eta: f32,

    /// Refraction coefficient
    #[serde(default)]
    pub coefficient: f32,
}

impl Default for Refraction {
    fn default() -> Self {
        Self {
            eta: DEFAULT_ETA,
            coefficient: 0.0,
        }
    }
}

/// A Phong material with optional secondary-ray contributions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base surface color (RGB, 0-1)
    pub color: Color,

    /// Specular highlight exponent, `None` for a purely diffuse surface
    pub shininess: Option<f32>,

    /// Reflection coefficient
    pub reflection: Option<f32>,

    /// Transparency coefficient
    pub transparency: Option<f32>,

    /// Refraction parameters
    pub refraction: Option<Refraction>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            shininess: Some(DEFAULT_SHININESS),
            reflection: None,
            transparency: None,
            refraction: None,
        }
    }
}

impl Material {
    /// Create a specular material with the given base color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_specular(mut self, shininess: f32) -> Self {
        self.shininess = Some(shininess);
        self
    }

    pub fn without_specular(mut self) -> Self {
        self.shininess = None;
        self
    }

    pub fn with_reflection(mut self, coefficient: f32) -> Self {
        self.reflection = Some(coefficient);
        self
    }

    pub fn with_transparency(mut self, coefficient: f32) -> Self {
        self.transparency = Some(coefficient);
        self
    }

    pub fn with_refraction(mut self, eta: f32, coefficient: f32) -> Self {
        self.refraction = Some(Refraction { eta, coefficient });
        self
    }

    pub fn is_specular(&self) -> bool {
        self.shininess.is_some()
    }

    pub fn shininess(&self) -> f32 {
        self.shininess.unwrap_or(DEFAULT_SHININESS)
    }

    pub fn is_reflective(&self) -> bool {
        self.reflection.is_some()
    }

    pub fn reflection_coeff(&self) -> f32 {
        self.reflection.unwrap_or(0.0)
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency.is_some()
    }

    pub fn transparency_coeff(&self) -> f32 {
        self.transparency.unwrap_or(0.0)
    }

    pub fn is_refractive(&self) -> bool {
        self.refraction.is_some()
    }

    pub fn refraction_coeff(&self) -> f32 {
        self.refraction.map_or(0.0, |r| r.coefficient)
    }

    pub fn refractive_index(&self) -> f32 {
        self.refraction.map_or(DEFAULT_ETA, |r| r.eta)
    }

    /// True if light passes through this material (refractive or transparent).
    pub fn is_translucent(&self) -> bool {
        self.is_refractive() || self.is_transparent()
    }
}
