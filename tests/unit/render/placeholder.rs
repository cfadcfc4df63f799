use super::*;

fn no_fonts() -> Arc<usvg::fontdb::Database> {
    Arc::new(usvg::fontdb::Database::new())
}

#[test]
fn color_precedence() {
    let red = Rgba8::rgb(255, 0, 0);
    assert_eq!(portrait_color(Some(red), Some(Category::Item)), red);
    assert_eq!(
        portrait_color(None, Some(Category::Location)),
        Rgba8::rgb(0x2e, 0x8b, 0x57)
    );
    assert_eq!(portrait_color(None, None), NEUTRAL);
}

#[test]
fn portrait_is_default_size_and_opaque() {
    let s = placeholder_portrait(PORTRAIT_SIZE, Rgba8 { r: 10, g: 20, b: 30, a: 0 }).unwrap();
    assert_eq!(s.size(), Size::new(512, 716));
    assert_eq!(s.pixel(511, 715), Some([10, 20, 30, 255]));
}

#[test]
fn texture_runs_accent_to_light() {
    let s = placeholder_texture(Category::Npc, Size::new(100, 100), no_fonts()).unwrap();
    let top_left = s.pixel(0, 0).unwrap();
    let bottom_right = s.pixel(99, 99).unwrap();
    assert_eq!(top_left[3], 255);
    // #8b4513 toward #d2691e: red channel climbs across the diagonal.
    assert!(top_left[0] < bottom_right[0]);
    assert!((0x8b..=0x90).contains(&top_left[0]), "{top_left:?}");
}
