use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale};
use anyhow::Context as _;

use crate::{
    config::MAX_POINT_SIZE,
    foundation::error::{CaptchaError, CaptchaResult},
};

/// Coverage raster of one character, positioned relative to the pen on the baseline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Horizontal offset of the bitmap's left edge from the pen.
    pub left: i32,
    /// Vertical offset of the bitmap's top edge from the baseline (negative is above).
    pub top: i32,
    /// Row-major coverage, `0` = empty, `255` = fully covered.
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Coverage at `(x, y)` inside the bitmap, `0` outside.
    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Whether no pixel carries coverage.
    pub fn is_blank(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0)
    }
}

/// Rasterizes single characters for the compositor.
///
/// Implementations must be deterministic: the same character and size always yield the same
/// bitmap.
pub trait GlyphSource: Send + Sync {
    /// Rasterize `ch` at `point_size`.
    fn rasterize(&self, ch: char, point_size: f32) -> CaptchaResult<GlyphBitmap>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn rasterize(&self, ch: char, point_size: f32) -> CaptchaResult<GlyphBitmap> {
        (**self).rasterize(ch, point_size)
    }
}

impl<T: GlyphSource + ?Sized> GlyphSource for std::sync::Arc<T> {
    fn rasterize(&self, ch: char, point_size: f32) -> CaptchaResult<GlyphBitmap> {
        (**self).rasterize(ch, point_size)
    }
}

/// [`GlyphSource`] backed by an OpenType/TrueType font.
///
/// Point sizes are interpreted at 72 DPI, so one point is one pixel per em.
#[derive(Clone)]
pub struct FontGlyphSource {
    font: FontArc,
}

impl std::fmt::Debug for FontGlyphSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontGlyphSource")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl FontGlyphSource {
    /// Parse font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> CaptchaResult<Self> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| CaptchaError::rasterization(format!("invalid font data: {e}")))?;
        Ok(Self { font })
    }

    /// Read and parse a font file.
    pub fn from_path(path: impl AsRef<Path>) -> CaptchaResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    fn scale_for(&self, point_size: f32) -> CaptchaResult<PxScale> {
        if !point_size.is_finite() || point_size <= 0.0 || point_size > MAX_POINT_SIZE {
            return Err(CaptchaError::rasterization(format!(
                "point size must be finite and in (0, {MAX_POINT_SIZE}], got {point_size}"
            )));
        }
        let units_per_em = self
            .font
            .units_per_em()
            .ok_or_else(|| CaptchaError::rasterization("font has no units-per-em"))?;
        Ok(PxScale::from(
            point_size * self.font.height_unscaled() / units_per_em,
        ))
    }
}

impl GlyphSource for FontGlyphSource {
    fn rasterize(&self, ch: char, point_size: f32) -> CaptchaResult<GlyphBitmap> {
        let scale = self.scale_for(point_size)?;
        let glyph = self
            .font
            .glyph_id(ch)
            .with_scale_and_position(scale, ab_glyph::point(0.0, 0.0));

        let Some(outlined) = self.font.outline_glyph(glyph) else {
            return Ok(GlyphBitmap::default());
        };

        let bounds = outlined.px_bounds();
        let width = bounds.width().max(0.0) as u32;
        let height = bounds.height().max(0.0) as u32;
        let mut coverage = vec![0u8; (width as usize) * (height as usize)];
        outlined.draw(|x, y, c| {
            if x < width && y < height {
                let idx = (y as usize) * (width as usize) + (x as usize);
                coverage[idx] = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        });

        Ok(GlyphBitmap {
            width,
            height,
            left: bounds.min.x as i32,
            top: bounds.min.y as i32,
            coverage,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/source.rs"]
mod tests;
