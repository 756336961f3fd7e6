use crate::{foundation::core::Rgba8, render::canvas::Canvas};

/// Row shift applied to column `x` by the vertical pass.
pub fn vertical_offset(x: u32) -> i32 {
    let x = f64::from(x);
    (3.0 * (0.08 * x).sin() + 2.0 * (0.15 * x + 1.5).sin()).round() as i32
}

/// Column shift applied to row `y` by the horizontal pass.
pub fn horizontal_offset(y: u32) -> i32 {
    (2.0 * (0.1 * f64::from(y)).sin()).round() as i32
}

/// Two-pass sinusoidal warp with nearest-neighbor backward sampling.
///
/// Samples falling off the source canvas take the background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveDistorter {
    background: Rgba8,
}

impl WaveDistorter {
    /// Warp that fills exposed pixels with `background`.
    pub fn new(background: Rgba8) -> Self {
        Self { background }
    }

    /// Vertical pass, then horizontal pass. Consumes the input canvas.
    pub fn apply(&self, canvas: Canvas) -> Canvas {
        let vertical = self.vertical_pass(&canvas);
        drop(canvas);
        self.horizontal_pass(&vertical)
    }

    /// Shift each column by [`vertical_offset`].
    pub fn vertical_pass(&self, src: &Canvas) -> Canvas {
        let mut dst = Canvas::new(src.width(), src.height(), self.background);
        for x in 0..src.width() {
            let offset = vertical_offset(x);
            for y in 0..src.height() {
                let (dx, dy) = (x as i32, y as i32);
                let px = src
                    .get_pixel(dx, dy.saturating_add(offset))
                    .unwrap_or(self.background);
                dst.set_pixel(dx, dy, px);
            }
        }
        dst
    }

    /// Shift each row by [`horizontal_offset`].
    pub fn horizontal_pass(&self, src: &Canvas) -> Canvas {
        let mut dst = Canvas::new(src.width(), src.height(), self.background);
        for y in 0..src.height() {
            let offset = horizontal_offset(y);
            for x in 0..src.width() {
                let (dx, dy) = (x as i32, y as i32);
                let px = src
                    .get_pixel(dx.saturating_add(offset), dy)
                    .unwrap_or(self.background);
                dst.set_pixel(dx, dy, px);
            }
        }
        dst
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/warp.rs"]
mod tests;
