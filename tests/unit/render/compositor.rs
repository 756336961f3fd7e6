use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::{
    CaptchaError,
    glyph::source::GlyphBitmap,
    layout::plan::{CELL_HEIGHT, CELL_WIDTH},
};

const BG: Rgba8 = Rgba8::WHITE;
const INK: Rgba8 = Rgba8::opaque(20, 30, 40);

struct Blocks;

impl GlyphSource for Blocks {
    fn rasterize(&self, _ch: char, point_size: f32) -> CaptchaResult<GlyphBitmap> {
        let h = point_size as u32;
        let w = h * 2 / 3;
        Ok(GlyphBitmap {
            width: w,
            height: h,
            left: 0,
            top: -(h as i32),
            coverage: vec![255; (w * h) as usize],
        })
    }
}

struct Broken;

impl GlyphSource for Broken {
    fn rasterize(&self, ch: char, _point_size: f32) -> CaptchaResult<GlyphBitmap> {
        Err(CaptchaError::rasterization(format!("no glyph for {ch:?}")))
    }
}

fn border_is_background(canvas: &Canvas) -> bool {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for y in 0..h {
        for x in 0..w {
            if inside_safety_margin(canvas, x, y) {
                continue;
            }
            if canvas.get_pixel(x, y) != Some(BG) {
                return false;
            }
        }
    }
    true
}

fn solid_cell() -> Canvas {
    Canvas::new(CELL_WIDTH as u32, CELL_HEIGHT as u32, INK)
}

#[test]
fn placements_stay_in_bounds_and_vary() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let draws: Vec<_> = (0..500).map(|_| GlyphPlacement::draw(&mut rng)).collect();
    assert!(draws.iter().all(|p| (-20.0..=20.0).contains(&p.angle_deg)));
    assert!(draws.iter().all(|p| (-5..=5).contains(&p.jitter)));
    assert!(draws.iter().any(|p| p.jitter != draws[0].jitter));
    assert!(draws.iter().any(|p| p.angle_deg != draws[0].angle_deg));
}

#[test]
fn zero_angle_maps_cell_center_to_origin() {
    let mut cell = Canvas::new(CELL_WIDTH as u32, CELL_HEIGHT as u32, Rgba8::TRANSPARENT);
    cell.set_pixel(CELL_WIDTH / 2, CELL_HEIGHT / 2, INK);
    cell.set_pixel(CELL_WIDTH / 2 + 3, CELL_HEIGHT / 2 - 4, INK);

    let mut canvas = Canvas::new(100, 80, BG);
    let written = stamp_rotated(&mut canvas, &cell, 50, 40, 0.0);
    assert_eq!(written, 2);
    assert_eq!(canvas.get_pixel(50, 40), Some(INK));
    assert_eq!(canvas.get_pixel(53, 36), Some(INK));
}

#[test]
fn quarter_turn_rotates_about_cell_center() {
    let mut cell = Canvas::new(CELL_WIDTH as u32, CELL_HEIGHT as u32, Rgba8::TRANSPARENT);
    cell.set_pixel(CELL_WIDTH / 2 + 4, CELL_HEIGHT / 2, INK);

    let mut canvas = Canvas::new(100, 80, BG);
    stamp_rotated(&mut canvas, &cell, 50, 40, std::f64::consts::FRAC_PI_2);
    // (4, 0) rotates to (~0, 4); truncation keeps it on the pixel grid.
    let hits: Vec<_> = (0..80)
        .flat_map(|y| (0..100).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.get_pixel(x, y) == Some(INK))
        .collect();
    assert_eq!(hits.len(), 1);
    let (x, y) = hits[0];
    assert!((x - 50).abs() <= 1);
    assert_eq!(y, 44);
}

#[test]
fn transparent_cell_pixels_are_skipped() {
    let cell = Canvas::new(CELL_WIDTH as u32, CELL_HEIGHT as u32, Rgba8::TRANSPARENT);
    let mut canvas = Canvas::new(100, 80, BG);
    assert_eq!(stamp_rotated(&mut canvas, &cell, 50, 40, 0.3), 0);
    assert!(canvas.as_rgba8().chunks_exact(4).all(|px| px == BG.to_array()));
}

#[test]
fn stamping_never_touches_the_safety_band() {
    let cell = solid_cell();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for (ox, oy) in [(0, 0), (39, 24), (-10, 12), (20, 30), (60, 60)] {
        for _ in 0..8 {
            let mut canvas = Canvas::new(40, 25, BG);
            let angle = rng.random_range(-1.0..=1.0);
            stamp_rotated(&mut canvas, &cell, ox, oy, angle);
            assert!(border_is_background(&canvas));
        }
    }
}

#[test]
fn compose_draws_every_glyph_inside_the_band() {
    let plan = LayoutPlan::compute(250, 100, 4);
    let compositor = GlyphCompositor::new(&Blocks, &plan, INK, 24.0);
    let mut canvas = Canvas::new(250, 100, BG);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    compositor.compose(&mut canvas, "ABCD", &mut rng).unwrap();

    let inked = canvas
        .as_rgba8()
        .chunks_exact(4)
        .filter(|px| *px == INK.to_array())
        .count();
    assert!(inked > 4 * 100);
    assert!(border_is_background(&canvas));
}

#[test]
fn single_glyph_on_minimal_canvas_leaves_border_clean() {
    let plan = LayoutPlan::compute(40, 25, 1);
    let compositor = GlyphCompositor::new(&Blocks, &plan, INK, 12.0);
    for seed in 0..16 {
        let mut canvas = Canvas::new(40, 25, BG);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        compositor.compose(&mut canvas, "A", &mut rng).unwrap();
        assert!(border_is_background(&canvas));
    }
}

#[test]
fn compose_is_reproducible_for_a_seed() {
    let plan = LayoutPlan::compute(200, 80, 6);
    let compositor = GlyphCompositor::new(&Blocks, &plan, INK, 24.0);

    let render = |seed| {
        let mut canvas = Canvas::new(200, 80, BG);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        compositor.compose(&mut canvas, "XYZ789", &mut rng).unwrap();
        canvas
    };
    assert_eq!(render(42), render(42));
    assert_ne!(render(42), render(43));
}

#[test]
fn rasterization_failure_aborts_compose() {
    let plan = LayoutPlan::compute(250, 100, 3);
    let compositor = GlyphCompositor::new(&Broken, &plan, INK, 24.0);
    let mut canvas = Canvas::new(250, 100, BG);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let err = compositor
        .compose(&mut canvas, "abc", &mut rng)
        .unwrap_err();
    assert!(matches!(err, CaptchaError::Rasterization(_)));
    assert!(err.to_string().contains("'a'"));
}
