//! Per-object surface color strategies.
//!
//! A strategy is attached to each scene object when the scene is built and
//! turns a hit point into the surface color fed to the lighting model. The
//! result is returned, never stored on the object, so concurrent traces can
//! share the scene freely.

use std::sync::Arc;

use whitted_core::{ProceduralPattern, Texture};
use whitted_math::{Color, Vec2, Vec3};

use crate::Shape;

/// How the surface color of an object is computed.
#[derive(Clone, Debug, Default)]
pub enum Shading {
    /// The material's base color.
    #[default]
    Solid,

    /// Checkerboard of `size`-unit squares in the XZ plane.
    Checker { size: f32, even: Color, odd: Color },

    /// Texture tiled over the XY plane.
    PlanarTexture {
        texture: Arc<Texture>,
        offset: Vec2,
        repeat: f32,
        tint: f32,
    },

    /// Texture wrapped around a cylinder.
    CylinderTexture {
        texture: Arc<Texture>,
        wraps: f32,
        tint: f32,
    },

    /// Procedural pattern stretched over a square of the XY plane.
    SinePattern {
        pattern: Arc<ProceduralPattern>,
        origin: Vec2,
        extent: f32,
        tint: f32,
    },
}

impl Shading {
    /// Surface color of `shape` at point `p`, given the material's base color.
    pub fn surface_color(&self, shape: &Shape, base: Color, p: Vec3) -> Color {
        match self {
            Shading::Solid => base,
            Shading::Checker { size, even, odd } => {
                let ix = (p.x / size).floor() as i64;
                let iz = (p.z / size).floor() as i64;
                if (ix + iz).rem_euclid(2) == 0 {
                    *even
                } else {
                    *odd
                }
            }
            Shading::PlanarTexture {
                texture,
                offset,
                repeat,
                tint,
            } => {
                let s = (p.x + offset.x) / repeat;
                let t = (p.y + offset.y) / repeat;
                texture.sample(s, t) * *tint
            }
            Shading::CylinderTexture {
                texture,
                wraps,
                tint,
            } => match shape {
                Shape::Cylinder(cylinder) => {
                    let uv = cylinder.texture_coords(p);
                    let s = (uv.x * wraps).rem_euclid(1.0);
                    texture.sample(s, uv.y) * *tint
                }
                _ => base,
            },
            Shading::SinePattern {
                pattern,
                origin,
                extent,
                tint,
            } => {
                let s = (p.x - origin.x) / extent;
                let t = (p.y - origin.y) / extent;
                pattern.sample(s, t) * *tint
            }
        }
    }
}
