//! Procedural color patterns.
//!
//! A pattern is generated once before rendering into a flat color grid and
//! sampled read-only by the shading of patterned surfaces.

use std::f32::consts::PI;

use whitted_math::Color;

/// Default pattern resolution (both axes).
pub const DEFAULT_PATTERN_SIZE: usize = 500;

const BACKGROUND: Color = Color::new(0.5, 0.5, 0.5);
const BAND: Color = Color::new(1.0, 164.0 / 255.0, 0.0);

/// A precomputed 2D color grid, row-major with row 0 at the bottom.
#[derive(Clone, Debug)]
pub struct ProceduralPattern {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl ProceduralPattern {
    /// Create a pattern filled with a single color.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            cells: vec![color; width * height],
        }
    }

    /// Generate the sinusoidal band pattern.
    ///
    /// For each column one period of a sine wave (phase shifted by pi) picks a
    /// target row; the cells between that row and the horizontal midline are
    /// painted orange over a gray background.
    pub fn sine_band(width: usize, height: usize) -> Self {
        let mut pattern = Self::filled(width, height, BACKGROUND);
        let half_width = width as f32 * 0.5;
        let half_height = height as f32 * 0.5;

        for column in 0..width {
            let angle = 2.0 * PI * column as f32 / width as f32;
            let s = (angle + PI).sin();

            let target = if s > 0.0 {
                (half_height - s * half_width) as i64
            } else {
                (s.abs() * half_width + half_height) as i64
            };

            let midline = half_width as i64;
            let (low, high) = if target <= midline {
                (target, midline)
            } else {
                (midline, target)
            };

            for row in low.max(0)..high.min(height as i64) {
                pattern.set(column, row as usize, BAND);
            }
        }

        log::debug!("Generated {}x{} sine band pattern", width, height);
        pattern
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at integer grid coordinates, clamped to the grid edges.
    pub fn at(&self, x: i64, y: i64) -> Color {
        if self.cells.is_empty() {
            return Color::ZERO;
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.cells[y * self.width + x]
    }

    /// Color at normalized coordinates, where [0, 1) spans the grid.
    pub fn sample(&self, s: f32, t: f32) -> Color {
        let x = (s * self.width as f32) as i64;
        let y = (t * self.height as f32) as i64;
        self.at(x, y)
    }

    fn set(&mut self, x: usize, y: usize, color: Color) {
        self.cells[y * self.width + x] = color;
    }
}

impl Default for ProceduralPattern {
    fn default() -> Self {
        Self::sine_band(DEFAULT_PATTERN_SIZE, DEFAULT_PATTERN_SIZE)
    }
}
