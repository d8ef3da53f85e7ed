//! Scene container and the closest-hit query.

use std::sync::Arc;

use thiserror::Error;
use whitted_core::{ProceduralPattern, SceneDescription, ShadingDescription, TextureCache};
use whitted_math::{Ray, Vec3};

use crate::{SceneObject, Shading, Shape};

/// Errors that can occur while building a scene from a description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Object {index} ({name}): cylinder texture mapping on a {kind}")]
    ShadingMismatch {
        index: usize,
        name: String,
        kind: &'static str,
    },
}

/// The two point lights of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub left: Vec3,
    pub right: Vec3,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            left: Vec3::new(-15.0, 30.0, 10.0),
            right: Vec3::new(15.0, 30.0, 10.0),
        }
    }
}

/// Result of a closest-hit query.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Distance along the ray
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Position of the hit object in the scene's object list
    pub index: usize,
    /// The hit object
    pub object: &'a SceneObject,
}

/// An ordered list of scene objects lit by two point lights.
///
/// The object order is the index identity reported by [`Hit::index`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    pub lights: Lights,
}

impl Scene {
    /// Create an empty scene with the given lights.
    pub fn new(lights: Lights) -> Self {
        Self {
            objects: Vec::new(),
            lights,
        }
    }

    /// Add an object, returning its index.
    pub fn add(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest intersection of `ray` with any object.
    ///
    /// Linear scan over the object list; ties keep the earlier object.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.closest_hit_where(ray, |_| true)
    }

    /// Nearest intersection of `ray` with the objects accepted by `filter`.
    pub fn closest_hit_where(
        &self,
        ray: &Ray,
        filter: impl Fn(&SceneObject) -> bool,
    ) -> Option<Hit<'_>> {
        let mut closest: Option<(usize, f32)> = None;

        for (index, object) in self.objects.iter().enumerate() {
            if !filter(object) {
                continue;
            }
            let Some(t) = object.intersect(ray) else {
                continue;
            };
            if t < 0.0 {
                continue;
            }
            if closest.map_or(true, |(_, best)| t < best) {
                closest = Some((index, t));
            }
        }

        closest.map(|(index, distance)| Hit {
            distance,
            point: ray.at(distance),
            index,
            object: &self.objects[index],
        })
    }

    /// Build a scene from a description, loading textures through `textures`.
    ///
    /// Textures that fail to load are reported and the object falls back to
    /// solid shading with its base color.
    pub fn from_description(
        desc: &SceneDescription,
        textures: &mut TextureCache,
    ) -> Result<Self, SceneError> {
        let [left, right] = desc.lights;
        let mut scene = Scene::new(Lights { left, right });
        let mut pattern: Option<Arc<ProceduralPattern>> = None;

        for (index, object_desc) in desc.objects.iter().enumerate() {
            let shape = Shape::from(&object_desc.shape);

            let shading = match &object_desc.shading {
                ShadingDescription::Solid => Shading::Solid,
                ShadingDescription::Checker { size, even, odd } => Shading::Checker {
                    size: *size,
                    even: *even,
                    odd: *odd,
                },
                ShadingDescription::PlanarTexture {
                    path,
                    offset,
                    repeat,
                    tint,
                } => match textures.load(path) {
                    Ok(texture) => Shading::PlanarTexture {
                        texture,
                        offset: *offset,
                        repeat: *repeat,
                        tint: *tint,
                    },
                    Err(e) => {
                        log::warn!("{}: {}; using base color", object_desc.name, e);
                        Shading::Solid
                    }
                },
                ShadingDescription::CylinderTexture { path, wraps, tint } => {
                    if !matches!(shape, Shape::Cylinder(_)) {
                        return Err(SceneError::ShadingMismatch {
                            index,
                            name: object_desc.name.clone(),
                            kind: shape.kind(),
                        });
                    }
                    match textures.load(path) {
                        Ok(texture) => Shading::CylinderTexture {
                            texture,
                            wraps: *wraps,
                            tint: *tint,
                        },
                        Err(e) => {
                            log::warn!("{}: {}; using base color", object_desc.name, e);
                            Shading::Solid
                        }
                    }
                }
                ShadingDescription::SinePattern {
                    origin,
                    extent,
                    tint,
                } => Shading::SinePattern {
                    pattern: pattern
                        .get_or_insert_with(|| Arc::new(ProceduralPattern::default()))
                        .clone(),
                    origin: *origin,
                    extent: *extent,
                    tint: *tint,
                },
            };

            let mut object = SceneObject::new(shape, object_desc.material)
                .with_shading(shading);
            if !object_desc.name.is_empty() {
                object.name = object_desc.name.clone();
            }
            object.casts_shadows = object_desc.casts_shadows;
            object.receives_shadows = object_desc.receives_shadows;
            scene.add(object);
        }

        log::info!(
            "Built scene with {} objects ({} textures)",
            scene.len(),
            textures.len()
        );

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;
    use whitted_core::{Material, ObjectDescription, ShapeDescription, Texture};
    use whitted_math::{Color, Vec2};

    fn two_spheres() -> Scene {
        let mut scene = Scene::default();
        scene.add(SceneObject::new(
            Sphere::new(Vec3::new(0.0, 0.0, -30.0), 3.0),
            Material::default(),
        ));
        scene.add(SceneObject::new(
            Sphere::new(Vec3::new(0.0, 0.0, -20.0), 3.0),
            Material::default(),
        ));
        scene
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let scene = two_spheres();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.distance - 17.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, -17.0)).length() < 1e-4);
        assert!(std::ptr::eq(hit.object, &scene.objects()[1]));
    }

    #[test]
    fn test_closest_hit_miss() {
        let scene = two_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.closest_hit(&ray).is_none());
        assert!(Scene::default().closest_hit(&ray).is_none());
    }

    #[test]
    fn test_closest_hit_where_skips_filtered() {
        let scene = two_spheres();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let hit = scene.closest_hit_where(&ray, |o| o.shape != scene.objects()[1].shape);
        assert_eq!(hit.unwrap().index, 0);
    }

    #[test]
    fn test_from_description_museum() {
        let mut textures = TextureCache::new();
        textures.insert("Wall.bmp", Texture::solid_color(Color::ONE));
        textures.insert("VaseTexture.bmp", Texture::solid_color(Color::ONE));

        let scene = Scene::from_description(&SceneDescription::museum(), &mut textures).unwrap();
        assert_eq!(scene.len(), 11);
        assert_eq!(scene.lights, Lights::default());
        assert_eq!(scene.objects()[0].name, "floor");
        assert!(matches!(scene.objects()[0].shading, Shading::Checker { .. }));
        assert!(matches!(scene.objects()[1].shading, Shading::PlanarTexture { .. }));
        assert!(scene
            .objects()
            .iter()
            .any(|o| matches!(o.shading, Shading::SinePattern { .. })));
        assert!(scene
            .objects()
            .iter()
            .any(|o| matches!(o.shading, Shading::CylinderTexture { .. })));
    }

    #[test]
    fn test_museum_floor_cells() {
        let scene =
            Scene::from_description(&SceneDescription::museum(), &mut TextureCache::new()).unwrap();
        let floor = &scene.objects()[0];
        let yellow = Color::new(1.0, 1.0, 0.0);
        let cyan = Color::new(0.0, 1.0, 1.0);

        assert_eq!(floor.surface_color(Vec3::new(1.0, -10.0, -21.0)), yellow);
        assert_eq!(floor.surface_color(Vec3::new(-1.0, -10.0, -21.0)), cyan);
        assert_eq!(floor.surface_color(Vec3::new(1.0, -10.0, -26.0)), cyan);
        assert_eq!(floor.surface_color(Vec3::new(-6.0, -10.0, -21.0)), yellow);
    }

    #[test]
    fn test_missing_texture_falls_back_to_solid() {
        let mut textures = TextureCache::with_base_dir("/nonexistent-texture-dir");
        let scene = Scene::from_description(&SceneDescription::museum(), &mut textures).unwrap();
        assert!(matches!(scene.objects()[1].shading, Shading::Solid));
    }

    #[test]
    fn test_cylinder_texture_on_plane_is_rejected() {
        let mut desc = SceneDescription::default();
        desc.objects.push(
            ObjectDescription::new(
                "poster",
                ShapeDescription::Plane {
                    corners: [
                        Vec3::new(0.0, 0.0, 0.0),
                        Vec3::new(1.0, 0.0, 0.0),
                        Vec3::new(1.0, 1.0, 0.0),
                        Vec3::new(0.0, 1.0, 0.0),
                    ],
                },
                Material::default(),
            )
            .with_shading(ShadingDescription::CylinderTexture {
                path: "poster.png".to_string(),
                wraps: 1.0,
                tint: 1.0,
            }),
        );

        let err = Scene::from_description(&desc, &mut TextureCache::new()).unwrap_err();
        assert!(matches!(err, SceneError::ShadingMismatch { index: 0, .. }));
    }

    #[test]
    fn test_description_flags_carry_over() {
        let mut desc = SceneDescription::default();
        desc.objects.push(
            ObjectDescription::new(
                "",
                ShapeDescription::Sphere {
                    center: Vec3::ZERO,
                    radius: 1.0,
                },
                Material::default(),
            )
            .without_cast_shadows()
            .with_shading(ShadingDescription::SinePattern {
                origin: Vec2::ZERO,
                extent: 1.0,
                tint: 1.0,
            }),
        );

        let scene = Scene::from_description(&desc, &mut TextureCache::new()).unwrap();
        let object = &scene.objects()[0];
        assert_eq!(object.name, "sphere");
        assert!(!object.casts_shadows);
        assert!(object.receives_shadows);
        assert!(matches!(object.shape, Shape::Sphere(_)));
    }
}
