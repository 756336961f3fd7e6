use crate::{
    foundation::core::Rgba8,
    glyph::source::GlyphBitmap,
    layout::plan::{CELL_HEIGHT, CELL_WIDTH},
    render::canvas::Canvas,
};

/// Pen x inside the cell.
pub const CELL_INSET_X: i32 = 8;

/// Baseline y inside the cell for `point_size`.
pub fn cell_baseline_y(point_size: f32) -> i32 {
    CELL_HEIGHT / 2 + (point_size as i32) / 2
}

/// Draw `bitmap` into a fresh transparent cell in `color`.
///
/// Coverage scales the text alpha. Pixels landing outside the cell are dropped.
pub fn render_cell(bitmap: &GlyphBitmap, color: Rgba8, point_size: f32) -> Canvas {
    let mut cell = Canvas::new(CELL_WIDTH as u32, CELL_HEIGHT as u32, Rgba8::TRANSPARENT);
    let pen_x = CELL_INSET_X.saturating_add(bitmap.left);
    let pen_y = cell_baseline_y(point_size).saturating_add(bitmap.top);

    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            let coverage = bitmap.coverage_at(x, y);
            let alpha = mul_div255(color.a, coverage);
            if alpha == 0 {
                continue;
            }
            let dx = pen_x.saturating_add(x as i32);
            let dy = pen_y.saturating_add(y as i32);
            cell.set_pixel(dx, dy, color.with_alpha(alpha));
        }
    }
    cell
}

fn mul_div255(x: u8, y: u8) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/cell.rs"]
mod tests;
