// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::{reflect, refract};
pub use ray::Ray;

/// RGB color, channels nominally in [0, 1] but never clamped at storage time.
pub type Color = Vec3;
