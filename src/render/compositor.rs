use rand::Rng;

use crate::{
    foundation::{core::Rgba8, error::CaptchaResult},
    glyph::{cell::render_cell, source::GlyphSource},
    layout::plan::{LayoutPlan, MAX_ROTATION_DEG, SpacingState},
    render::canvas::Canvas,
};

/// Band along every canvas edge that glyph pixels never touch.
pub const SAFETY_MARGIN: i32 = 2;

/// Random pose of one glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// Rotation in degrees, within `±MAX_ROTATION_DEG`.
    pub angle_deg: f64,
    /// Vertical offset from the center line, within `±MAX_JITTER`.
    pub jitter: i32,
}

impl GlyphPlacement {
    /// Largest vertical jitter in pixels.
    pub const MAX_JITTER: i32 = 5;

    /// Draw an independent rotation and jitter.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        let angle_deg = rng.random_range(-MAX_ROTATION_DEG..=MAX_ROTATION_DEG);
        let jitter = rng.random_range(-Self::MAX_JITTER..=Self::MAX_JITTER);
        Self { angle_deg, jitter }
    }
}

/// Rasterizes, rotates and stamps each character of a code onto a canvas.
pub struct GlyphCompositor<'a, G: GlyphSource + ?Sized> {
    glyphs: &'a G,
    plan: &'a LayoutPlan,
    text_color: Rgba8,
    point_size: f32,
}

impl<'a, G: GlyphSource + ?Sized> GlyphCompositor<'a, G> {
    /// Bind a glyph source to a layout plan.
    pub fn new(glyphs: &'a G, plan: &'a LayoutPlan, text_color: Rgba8, point_size: f32) -> Self {
        Self {
            glyphs,
            plan,
            text_color,
            point_size,
        }
    }

    /// Draw every character of `code`, left to right.
    ///
    /// Stops at the first rasterization failure; the canvas is then partially drawn and must
    /// be discarded by the caller.
    pub fn compose<R: Rng>(&self, canvas: &mut Canvas, code: &str, rng: &mut R) -> CaptchaResult<()> {
        let plan = self.plan;
        let count = code.chars().count();
        let mut spacing = SpacingState::new(plan);

        for (index, ch) in code.chars().enumerate() {
            let bitmap = self.glyphs.rasterize(ch, self.point_size)?;
            let cell = render_cell(&bitmap, self.text_color, self.point_size);

            let placement = GlyphPlacement::draw(rng);
            let pos_x = plan.glyph_x(index, spacing.spacing());
            let pos_y = plan.center_y.saturating_add(placement.jitter);
            let written = stamp_rotated(
                canvas,
                &cell,
                pos_x.saturating_add(plan.cell_width / 2),
                pos_y,
                placement.angle_deg.to_radians(),
            );
            tracing::trace!(
                index,
                pos_x,
                pos_y,
                angle_deg = placement.angle_deg,
                written,
                "placed glyph"
            );

            spacing.advance(plan, pos_x, index + 1 < count, rng);
        }
        Ok(())
    }
}

/// Forward-map every visible cell pixel through a rotation about the cell center.
///
/// `(origin_x, origin_y)` is where the cell center lands. Destinations inside the safety band
/// are dropped. Returns the number of pixels written.
pub fn stamp_rotated(
    canvas: &mut Canvas,
    cell: &Canvas,
    origin_x: i32,
    origin_y: i32,
    angle_rad: f64,
) -> usize {
    let (sin, cos) = angle_rad.sin_cos();
    let half_w = (cell.width() / 2) as i32;
    let half_h = (cell.height() / 2) as i32;
    let mut written = 0usize;

    for y in 0..cell.height() as i32 {
        for x in 0..cell.width() as i32 {
            let Some(px) = cell.get_pixel(x, y) else {
                continue;
            };
            if px.a == 0 {
                continue;
            }

            let rel_x = f64::from(x - half_w);
            let rel_y = f64::from(y - half_h);
            let rot_x = rel_x * cos - rel_y * sin;
            let rot_y = rel_x * sin + rel_y * cos;

            let dst_x = (rot_x as i32).saturating_add(origin_x);
            let dst_y = (rot_y as i32).saturating_add(origin_y);
            if inside_safety_margin(canvas, dst_x, dst_y) && canvas.set_pixel(dst_x, dst_y, px) {
                written += 1;
            }
        }
    }
    written
}

/// Whether `(x, y)` lies at least [`SAFETY_MARGIN`] pixels from every edge.
pub fn inside_safety_margin(canvas: &Canvas, x: i32, y: i32) -> bool {
    let w = i64::from(canvas.width());
    let h = i64::from(canvas.height());
    let (x, y) = (i64::from(x), i64::from(y));
    let m = i64::from(SAFETY_MARGIN);
    x >= m && x < w - m && y >= m && y < h - m
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
