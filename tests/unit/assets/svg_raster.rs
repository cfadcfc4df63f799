use super::*;

fn empty_db() -> Arc<usvg::fontdb::Database> {
    Arc::new(usvg::fontdb::Database::new())
}

#[test]
fn solid_rect_rasterizes_premultiplied() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="3"><rect width="4" height="3" fill="#ff0000" opacity="0.5"/></svg>"##;
    let s = rasterize_svg(svg, empty_db()).unwrap();
    assert_eq!(s.size(), Size::new(4, 3));
    let px = s.pixel(1, 1).unwrap();
    assert!((127..=128).contains(&px[3]), "{px:?}");
    assert_eq!(px[0], px[3]);
    assert_eq!(px[1], 0);
}

#[test]
fn uncovered_area_stays_transparent() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="5" height="10" fill="white"/></svg>"#;
    let s = rasterize_svg(svg, empty_db()).unwrap();
    assert_eq!(s.pixel(2, 5), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(8, 5), Some([0, 0, 0, 0]));
}

#[test]
fn tree_scales_to_requested_size() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="1" height="2" fill="black"/></svg>"#;
    let tree = parse_svg(svg, empty_db()).unwrap();
    let s = rasterize_tree(&tree, Size::new(8, 8)).unwrap();
    assert_eq!(s.pixel(1, 4).unwrap()[3], 255);
    assert_eq!(s.pixel(6, 4).unwrap()[3], 0);
}

#[test]
fn malformed_svg_is_an_error() {
    assert!(rasterize_svg("<svg", empty_db()).is_err());
}
