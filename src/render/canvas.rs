use crate::foundation::core::Rgba8;

/// Owned RGBA8 pixel grid (straight alpha, row-major).
///
/// Writes outside the grid are ignored, never clamped onto the edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a `width × height` canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        let len = (width as usize) * (height as usize) * 4;
        let mut canvas = Self {
            width,
            height,
            data: vec![0u8; len],
        };
        canvas.fill(fill);
        canvas
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_array();
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    /// Whether `(x, y)` addresses a pixel of this canvas.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Write one pixel. Returns `false` (and writes nothing) when out of range.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) -> bool {
        let Some(idx) = self.index_of(x, y) else {
            return false;
        };
        self.data[idx..idx + 4].copy_from_slice(&color.to_array());
        true
    }

    /// Read one pixel, `None` when out of range.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        let idx = self.index_of(x, y)?;
        let px: [u8; 4] = self.data.get(idx..idx + 4)?.try_into().ok()?;
        Some(Rgba8::from_array(px))
    }

    /// Raw RGBA8 bytes, `width * height * 4` long.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.data
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
