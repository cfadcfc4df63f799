use super::*;

#[test]
fn zero_sized_surfaces_are_rejected() {
    assert!(Surface::new(Size::new(0, 10)).is_err());
    assert!(Surface::from_premul(Size::new(2, 2), vec![0; 15]).is_err());
}

#[test]
fn composite_clips_to_destination() {
    let mut dst = Surface::solid(Size::new(4, 4), Rgba8::rgb(0, 0, 0)).unwrap();
    let src = Surface::solid(Size::new(3, 3), Rgba8::rgb(255, 0, 0)).unwrap();
    dst.composite_at(&src, 2, -1, 1.0);
    assert_eq!(dst.pixel(2, 0), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(3, 1), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(4, 0), None);
}

#[test]
fn composite_fully_outside_is_noop() {
    let mut dst = Surface::solid(Size::new(2, 2), Rgba8::rgb(9, 9, 9)).unwrap();
    let before = dst.clone();
    let src = Surface::solid(Size::new(2, 2), Rgba8::rgb(255, 255, 255)).unwrap();
    dst.composite_at(&src, 5, 5, 1.0);
    dst.composite_at(&src, -2, 0, 1.0);
    assert_eq!(dst, before);
}

#[test]
fn rounded_corners_clear_corner_pixels_only() {
    let mut s = Surface::solid(Size::new(40, 40), Rgba8::rgb(200, 100, 50)).unwrap();
    s.round_corners(10.0);
    assert_eq!(s.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(s.pixel(39, 39).unwrap()[3], 0);
    assert_eq!(s.pixel(20, 0).unwrap()[3], 255);
    assert_eq!(s.pixel(0, 20).unwrap()[3], 255);
    assert_eq!(s.pixel(20, 20).unwrap(), [200, 100, 50, 255]);
}

#[test]
fn zero_radius_keeps_pixels() {
    let mut s = Surface::solid(Size::new(3, 3), Rgba8::rgb(1, 2, 3)).unwrap();
    let before = s.clone();
    s.round_corners(0.0);
    assert_eq!(s, before);
}

#[test]
fn png_round_trip_demultiplies() {
    let color = Rgba8 {
        r: 100,
        g: 50,
        b: 200,
        a: 255,
    };
    let s = Surface::solid(Size::new(3, 2), color).unwrap();
    let bytes = s.encode_png().unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(1, 1).0, [100, 50, 200, 255]);
}

#[test]
fn save_png_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/deeper/card.png");
    Surface::solid(Size::new(2, 2), Rgba8::rgb(0, 0, 0))
        .unwrap()
        .save_png(&out)
        .unwrap();
    assert!(out.is_file());
}
