//! Whitted Core - renderer-agnostic scene data for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Materials**: Phong parameters plus reflection, transparency and
//!   refraction flags with their coefficients
//! - **Textures**: image-backed samplers and a path-keyed cache
//! - **Procedural patterns**: precomputed color grids sampled during shading
//! - **Scene descriptions**: serde-backed JSON scene configuration and the
//!   built-in museum scene
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::SceneDescription;
//!
//! let desc = SceneDescription::from_json_file("scene.json")?;
//! println!("Loaded {} objects", desc.objects.len());
//! ```

pub mod description;
pub mod material;
pub mod pattern;
pub mod texture;

// Re-export commonly used types
pub use description::{
    DescriptionError, ObjectDescription, SceneDescription, ShadingDescription, ShapeDescription,
};
pub use material::{Material, Refraction};
pub use pattern::ProceduralPattern;
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
