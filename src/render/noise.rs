use rand::Rng;

use crate::{foundation::core::Rgba8, render::canvas::Canvas};

/// Random dots and translucent lines scattered over the whole canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseInjector {
    /// Number of single-pixel opaque dots.
    pub dots: usize,
    /// Number of line segments.
    pub lines: usize,
}

impl Default for NoiseInjector {
    fn default() -> Self {
        Self {
            dots: 100,
            lines: 5,
        }
    }
}

impl NoiseInjector {
    /// Mutate `canvas` in place: dots first, then lines.
    pub fn apply<R: Rng>(&self, canvas: &mut Canvas, rng: &mut R) {
        let w = i32::try_from(canvas.width()).unwrap_or(i32::MAX);
        let h = i32::try_from(canvas.height()).unwrap_or(i32::MAX);
        if w == 0 || h == 0 {
            return;
        }

        for _ in 0..self.dots {
            let x = rng.random_range(0..w);
            let y = rng.random_range(0..h);
            let color = Rgba8::opaque(rng.random(), rng.random(), rng.random());
            canvas.set_pixel(x, y, color);
        }

        for _ in 0..self.lines {
            let from = (rng.random_range(0..w), rng.random_range(0..h));
            let to = (rng.random_range(0..w), rng.random_range(0..h));
            let color = Rgba8::new(
                rng.random(),
                rng.random(),
                rng.random(),
                rng.random_range(100..200),
            );
            draw_line(canvas, from, to, color);
        }
    }
}

/// Integer Bresenham segment from `from` to `to`, both endpoints included.
///
/// Every visited pixel is bounds-checked; off-canvas pixels are skipped.
pub fn draw_line(canvas: &mut Canvas, from: (i32, i32), to: (i32, i32), color: Rgba8) {
    let (mut x, mut y) = from;
    let (x2, y2) = to;
    let dx = (x2 - x).abs();
    let dy = (y2 - y).abs();
    let sx = if x < x2 { 1 } else { -1 };
    let sy = if y < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        canvas.set_pixel(x, y, color);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/noise.rs"]
mod tests;
