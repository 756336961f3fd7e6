use super::*;

struct Dot;

impl GlyphSource for Dot {
    fn rasterize(&self, _ch: char, _point_size: f32) -> CaptchaResult<GlyphBitmap> {
        Ok(GlyphBitmap {
            width: 1,
            height: 1,
            left: 0,
            top: -1,
            coverage: vec![255],
        })
    }
}

#[test]
fn invalid_font_bytes_are_a_rasterization_error() {
    let err = FontGlyphSource::from_bytes(b"not a font".to_vec()).unwrap_err();
    assert!(matches!(err, CaptchaError::Rasterization(_)));
}

#[test]
fn missing_font_file_reports_path() {
    let err = FontGlyphSource::from_path("target/definitely/missing.ttf").unwrap_err();
    assert!(matches!(err, CaptchaError::Other(_)));
    assert!(err.to_string().contains("missing.ttf"));
}

#[test]
fn coverage_lookup_is_bounds_checked() {
    let bmp = GlyphBitmap {
        width: 2,
        height: 1,
        left: 0,
        top: 0,
        coverage: vec![0, 200],
    };
    assert_eq!(bmp.coverage_at(1, 0), 200);
    assert_eq!(bmp.coverage_at(2, 0), 0);
    assert_eq!(bmp.coverage_at(0, 1), 0);
    assert!(!bmp.is_blank());
    assert!(GlyphBitmap::default().is_blank());
}

#[test]
fn references_and_arcs_forward_to_the_source() {
    fn via<G: GlyphSource>(source: G) -> GlyphBitmap {
        source.rasterize('a', 12.0).unwrap()
    }

    let dot = Dot;
    assert_eq!(via(&dot).width, 1);
    assert_eq!(via(std::sync::Arc::new(Dot)).top, -1);
}

fn dejavu() -> FontGlyphSource {
    FontGlyphSource::from_path("tests/data/fonts/DejaVuSans.ttf").unwrap()
}

#[test]
fn font_glyphs_sit_above_the_baseline() {
    let bmp = dejavu().rasterize('A', 28.0).unwrap();
    assert!(!bmp.is_blank());
    assert!(bmp.top < 0);
    assert!(bmp.height > 10 && bmp.height < 40);
    assert_eq!(bmp.coverage.len(), (bmp.width * bmp.height) as usize);
}

#[test]
fn whitespace_rasterizes_to_an_empty_bitmap() {
    assert!(dejavu().rasterize(' ', 28.0).unwrap().is_blank());
}

#[test]
fn larger_sizes_give_taller_glyphs() {
    let font = dejavu();
    let small = font.rasterize('H', 12.0).unwrap();
    let large = font.rasterize('H', 48.0).unwrap();
    assert!(large.height > small.height);
}

#[test]
fn non_positive_point_size_is_rejected() {
    let font = dejavu();
    for size in [0.0, -3.0, f32::NAN] {
        let err = font.rasterize('A', size).unwrap_err();
        assert!(matches!(err, CaptchaError::Rasterization(_)));
    }
}

#[test]
fn huge_point_size_is_rejected_without_rasterizing() {
    let err = dejavu().rasterize('W', 1.0e6).unwrap_err();
    assert!(matches!(err, CaptchaError::Rasterization(_)));
    dejavu().rasterize('W', MAX_POINT_SIZE).unwrap();
}
