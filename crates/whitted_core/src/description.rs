//! Serializable scene descriptions.
//!
//! A scene description is the plain-data input to the renderer: a list of
//! primitive descriptors with their materials and shading strategies, plus
//! the two point lights. Descriptions are read from JSON or built in code
//! and are immutable for the duration of a render.

use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use whitted_math::{Color, Vec2, Vec3};

use crate::material::{Material, DEFAULT_ETA};

/// Errors that can occur while reading or writing a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Geometric parameters of a primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Quadrilateral given by four coplanar corners in winding order.
    Plane {
        corners: [Vec3; 4],
    },
    /// Vertical open tube standing on `base`.
    Cylinder {
        base: Vec3,
        radius: f32,
        height: f32,
    },
    /// Apex-up cone whose base circle is centered on `base`.
    Cone {
        base: Vec3,
        radius: f32,
        height: f32,
    },
}

/// How the surface color of an object is computed at a hit point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShadingDescription {
    /// The material's base color.
    #[default]
    Solid,
    /// Two-color checkerboard in the XZ plane.
    Checker { size: f32, even: Color, odd: Color },
    /// Image repeated over the XY plane every `repeat` units.
    PlanarTexture {
        path: String,
        offset: Vec2,
        repeat: f32,
        #[serde(default = "unit_tint")]
        tint: f32,
    },
    /// Image wrapped around a cylinder `wraps` times per revolution.
    CylinderTexture {
        path: String,
        wraps: f32,
        #[serde(default = "unit_tint")]
        tint: f32,
    },
    /// The sine band pattern stretched over an `extent`-sized square in XY.
    SinePattern {
        origin: Vec2,
        extent: f32,
        #[serde(default = "unit_tint")]
        tint: f32,
    },
}

fn unit_tint() -> f32 {
    1.0
}

fn enabled() -> bool {
    true
}

/// One object of the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    #[serde(default)]
    pub name: String,

    pub shape: ShapeDescription,

    #[serde(default)]
    pub material: Material,

    #[serde(default)]
    pub shading: ShadingDescription,

    /// Whether this object can block light from reaching other surfaces
    #[serde(default = "enabled")]
    pub casts_shadows: bool,

    /// Whether shadow rays are cast from this object's surface at all
    #[serde(default = "enabled")]
    pub receives_shadows: bool,
}

impl ObjectDescription {
    pub fn new(name: impl Into<String>, shape: ShapeDescription, material: Material) -> Self {
        Self {
            name: name.into(),
            shape,
            material,
            shading: ShadingDescription::Solid,
            casts_shadows: true,
            receives_shadows: true,
        }
    }

    pub fn with_shading(mut self, shading: ShadingDescription) -> Self {
        self.shading = shading;
        self
    }

    pub fn without_received_shadows(mut self) -> Self {
        self.receives_shadows = false;
        self
    }

    pub fn without_cast_shadows(mut self) -> Self {
        self.casts_shadows = false;
        self
    }
}

/// A complete scene: two point lights, a background and the object list.
///
/// Object order is preserved; it defines the index reported by hit queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Left and right point light positions
    pub lights: [Vec3; 2],

    #[serde(default)]
    pub background: Color,

    pub objects: Vec<ObjectDescription>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            lights: [Vec3::new(-15.0, 30.0, 10.0), Vec3::new(15.0, 30.0, 10.0)],
            background: Color::ZERO,
            objects: Vec::new(),
        }
    }
}

impl SceneDescription {
    pub fn from_json_str(json: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DescriptionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let desc = Self::from_json_str(&json)?;
        log::info!(
            "Loaded scene description {} ({} objects)",
            path.display(),
            desc.objects.len()
        );
        Ok(desc)
    }

    pub fn to_json_string(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The built-in museum scene: a checkered floor, a textured back wall,
    /// a small box with a patterned front face, a reflective see-through
    /// sphere, a refractive sphere, a textured cylinder and a cone.
    pub fn museum() -> Self {
        const NEAR: f32 = 40.0;
        const FAR: f32 = 200.0;

        let mut objects = Vec::new();

        objects.push(
            ObjectDescription::new(
                "floor",
                ShapeDescription::Plane {
                    corners: [
                        Vec3::new(-60.0, -10.0, -NEAR + 20.0),
                        Vec3::new(60.0, -10.0, -NEAR + 20.0),
                        Vec3::new(60.0, -10.0, -FAR),
                        Vec3::new(-60.0, -10.0, -FAR),
                    ],
                },
                Material::default().without_specular(),
            )
            .with_shading(ShadingDescription::Checker {
                size: 5.0,
                even: Color::new(0.0, 1.0, 1.0),
                odd: Color::new(1.0, 1.0, 0.0),
            }),
        );

        objects.push(
            ObjectDescription::new(
                "wall",
                ShapeDescription::Plane {
                    corners: [
                        Vec3::new(-60.0, -10.0, -FAR),
                        Vec3::new(60.0, -10.0, -FAR),
                        Vec3::new(60.0, 70.0, -FAR),
                        Vec3::new(-60.0, 70.0, -FAR),
                    ],
                },
                Material::default().without_specular(),
            )
            .with_shading(ShadingDescription::PlanarTexture {
                path: "Wall.bmp".to_string(),
                offset: Vec2::new(60.0, 60.0),
                repeat: 15.0,
                tint: 1.0,
            }),
        );

        objects.extend(box_faces(-10.0, -10.0, -60.0, 4.0));

        objects.push(ObjectDescription::new(
            "glass ball",
            ShapeDescription::Sphere {
                center: Vec3::new(0.5, 5.0, -80.0),
                radius: 10.0,
            },
            Material::new(Color::ONE)
                .with_reflection(0.8)
                .with_transparency(0.8),
        ));

        objects.push(ObjectDescription::new(
            "lens",
            ShapeDescription::Sphere {
                center: Vec3::new(7.0, -2.0, -60.0),
                radius: 3.0,
            },
            Material::new(Color::new(0.0, 100.0 / 255.0, 100.0 / 255.0))
                .with_refraction(DEFAULT_ETA, 0.0),
        ));

        objects.push(
            ObjectDescription::new(
                "vase",
                ShapeDescription::Cylinder {
                    base: Vec3::new(10.0, -10.0, -60.0),
                    radius: 2.0,
                    height: 3.0,
                },
                Material::new(Color::ONE),
            )
            .with_shading(ShadingDescription::CylinderTexture {
                path: "VaseTexture.bmp".to_string(),
                wraps: 4.0 * PI / 3.0,
                tint: 0.6,
            }),
        );

        objects.push(ObjectDescription::new(
            "cone",
            ShapeDescription::Cone {
                base: Vec3::new(0.0, -10.0, -60.0),
                radius: 2.0,
                height: 4.0,
            },
            Material::new(Color::new(100.0 / 255.0, 100.0 / 255.0, 0.0)),
        ));

        Self {
            objects,
            ..Default::default()
        }
    }
}

/// Five faces (no bottom) of an axis-aligned cube with its lower-left-front
/// corner at (left, down, front), extending towards -Z.
fn box_faces(left: f32, down: f32, front: f32, side: f32) -> Vec<ObjectDescription> {
    let right = left + side;
    let up = down + side;
    let back = front - side;

    let face = |name: &str, corners: [Vec3; 4], color: Color| {
        ObjectDescription::new(
            name,
            ShapeDescription::Plane { corners },
            Material::new(color).without_specular(),
        )
        .without_received_shadows()
    };

    vec![
        face(
            "box top",
            [
                Vec3::new(left, up, front),
                Vec3::new(right, up, front),
                Vec3::new(right, up, back),
                Vec3::new(left, up, back),
            ],
            Color::new(1.0, 0.0, 0.0),
        ),
        face(
            "box front",
            [
                Vec3::new(left, down, front),
                Vec3::new(right, down, front),
                Vec3::new(right, up, front),
                Vec3::new(left, up, front),
            ],
            Color::new(0.0, 1.0, 0.0),
        )
        .with_shading(ShadingDescription::SinePattern {
            origin: Vec2::new(left, down),
            extent: side,
            tint: 0.6,
        }),
        face(
            "box left",
            [
                Vec3::new(left, down, back),
                Vec3::new(left, down, front),
                Vec3::new(left, up, front),
                Vec3::new(left, up, back),
            ],
            Color::new(0.0, 1.0, 0.0),
        ),
        face(
            "box back",
            [
                Vec3::new(right, down, back),
                Vec3::new(left, down, back),
                Vec3::new(left, up, back),
                Vec3::new(right, up, back),
            ],
            Color::new(1.0, 1.0, 0.0),
        ),
        face(
            "box right",
            [
                Vec3::new(right, down, front),
                Vec3::new(right, down, back),
                Vec3::new(right, up, back),
                Vec3::new(right, up, front),
            ],
            Color::new(0.0, 1.0, 0.0),
        ),
    ]
}
