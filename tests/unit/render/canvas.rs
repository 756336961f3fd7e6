use super::*;

#[test]
fn new_fills_every_pixel() {
    let bg = Rgba8::opaque(240, 240, 240);
    let c = Canvas::new(3, 2, bg);
    assert_eq!(c.as_rgba8().len(), 3 * 2 * 4);
    assert!(c.as_rgba8().chunks_exact(4).all(|px| px == bg.to_array()));
}

#[test]
fn set_then_get_roundtrips_inside_bounds() {
    let mut c = Canvas::new(4, 4, Rgba8::WHITE);
    let red = Rgba8::opaque(255, 0, 0);
    assert!(c.set_pixel(3, 1, red));
    assert_eq!(c.get_pixel(3, 1), Some(red));
    assert_eq!(c.get_pixel(1, 3), Some(Rgba8::WHITE));
}

#[test]
fn out_of_range_access_is_ignored() {
    let mut c = Canvas::new(4, 4, Rgba8::WHITE);
    let before = c.clone();
    for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MAX, i32::MIN)] {
        assert!(!c.set_pixel(x, y, Rgba8::BLACK));
        assert_eq!(c.get_pixel(x, y), None);
    }
    assert_eq!(c, before);
}

#[test]
fn zero_sized_canvas_is_empty_and_total() {
    let mut c = Canvas::new(0, 5, Rgba8::WHITE);
    assert!(c.as_rgba8().is_empty());
    assert!(!c.set_pixel(0, 0, Rgba8::BLACK));
    c.fill(Rgba8::BLACK);
    assert_eq!(c.get_pixel(0, 0), None);
}

#[test]
fn pixels_read_back_channel_order() {
    let mut c = Canvas::new(2, 2, Rgba8::TRANSPARENT);
    c.set_pixel(1, 1, Rgba8::new(1, 2, 3, 4));
    assert_eq!(&c.as_rgba8()[12..16], &[1, 2, 3, 4]);
    assert_eq!(c.get_pixel(1, 1), Some(Rgba8::from_array([1, 2, 3, 4])));
}
