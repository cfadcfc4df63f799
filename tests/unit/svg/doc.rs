use super::*;
use crate::foundation::core::rect_px;

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(
        escape_xml(r#"Thornwick's <Emporium> & "Sons""#),
        "Thornwick&apos;s &lt;Emporium&gt; &amp; &quot;Sons&quot;"
    );
    assert_eq!(escape_xml("plain"), "plain");
}

#[test]
fn numbers_are_compact() {
    assert_eq!(fmt_num(90.0f64), "90");
    assert_eq!(fmt_num(413.5f64), "413.5");
    assert_eq!(fmt_num(1.0f32 / 3.0), "0.33");
    assert_eq!(fmt_num(f64::NAN), "0");
}

#[test]
fn rect_emits_opacity_and_radius_only_when_needed() {
    let mut doc = SvgDoc::new(Size::new(100, 100));
    doc.rect(rect_px(0, 90, 100, 10), Rgba8::rgb(0xe8, 0xd4, 0xa8), 1.0);
    doc.rounded_rect(rect_px(10, 10, 20, 20), 4.0, Paint::gradient("c"), 0.15);
    let svg = doc.finish();
    assert!(svg.contains(r##"<rect x="0" y="90" width="100" height="10" fill="#e8d4a8"/>"##));
    assert!(svg.contains(r#"rx="4" fill="url(#c)" opacity="0.15""#));
}

#[test]
fn empty_rects_are_skipped() {
    let mut doc = SvgDoc::new(Size::new(10, 10));
    doc.rect(rect_px(0, 0, 10, 0), Rgba8::rgb(0, 0, 0), 1.0);
    assert!(!doc.finish().contains("<rect"));
}

#[test]
fn translucent_colors_use_fill_opacity() {
    let mut doc = SvgDoc::new(Size::new(10, 10));
    doc.rect(rect_px(0, 0, 10, 10), Rgba8 { r: 0, g: 0, b: 0, a: 153 }, 1.0);
    assert!(doc.finish().contains(r##"fill="#000000" fill-opacity="0.6""##));
}

#[test]
fn text_is_escaped_at_emit_time() {
    let mut doc = SvgDoc::new(Size::new(827, 1417));
    let style = TextStyle::new(FontFamily::Serif, 52.0, Rgba8::rgb(0xf4, 0xe4, 0xc1))
        .bold()
        .anchor(Anchor::Middle);
    doc.text(413.5, 62.0, &style, "Salt & <Stone>");
    let svg = doc.finish();
    assert!(svg.contains("Salt &amp; &lt;Stone&gt;"));
    assert!(svg.contains(r#"font-weight="bold""#));
    assert!(svg.contains(r#"text-anchor="middle""#));
}

#[test]
fn spans_style_individual_runs() {
    let mut doc = SvgDoc::new(Size::new(100, 40));
    let style = TextStyle::new(FontFamily::Serif, 20.0, Rgba8::rgb(0x2a, 0x20, 0x16));
    doc.spans(
        0.0,
        20.0,
        &style,
        &[
            Span {
                text: "Role:",
                fill: Some(Rgba8::rgb(0x8b, 0x45, 0x13)),
                bold: true,
            },
            Span {
                text: " tinkerer",
                fill: None,
                bold: false,
            },
        ],
    );
    let svg = doc.finish();
    assert!(svg.contains(r##"<tspan fill="#8b4513" font-weight="bold">Role:</tspan> tinkerer"##));
}

#[test]
fn finished_document_parses() {
    let mut doc = SvgDoc::new(Size::new(200, 120));
    doc.linear_gradient("bg", Rgba8::rgb(0xf4, 0xe4, 0xc1), Rgba8::rgb(0xe8, 0xd4, 0xa8))
        .rect(rect_px(0, 0, 200, 120), Paint::gradient("bg"), 1.0)
        .line((10.0, 60.0), (190.0, 60.0), Rgba8::rgb(0x8b, 0x45, 0x13), 3.0)
        .icon(
            r#"<circle cx="12" cy="8" r="5"/>"#,
            4.0,
            4.0,
            32.0,
            Rgba8 { r: 255, g: 255, b: 255, a: 178 },
        );
    let tree = usvg::Tree::from_str(&doc.finish(), &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 200.0);
    assert!(tree.root().has_children());
}

#[test]
fn vertical_gradient_writes_every_stop() {
    let mut doc = SvgDoc::new(Size::new(10, 10));
    doc.vertical_gradient(
        "fade",
        &[
            (0.0, Rgba8 { r: 0, g: 0, b: 0, a: 0 }),
            (0.3, Rgba8 { r: 0, g: 0, b: 0, a: 179 }),
            (1.0, Rgba8::rgb(0, 0, 0)),
        ],
    );
    let svg = doc.finish();
    assert!(svg.contains(r#"<linearGradient id="fade" x1="0%" y1="0%" x2="0%" y2="100%">"#));
    assert!(svg.contains(r##"<stop offset="0%" stop-color="#000000" stop-opacity="0"/>"##));
    assert!(svg.contains(r##"<stop offset="30%" stop-color="#000000" stop-opacity="0.7"/>"##));
    assert!(svg.contains(r##"<stop offset="100%" stop-color="#000000"/>"##));
}

#[test]
fn diagonal_gradient_keeps_two_stops() {
    let mut doc = SvgDoc::new(Size::new(10, 10));
    doc.linear_gradient("c", Rgba8::rgb(0x8b, 0x45, 0x13), Rgba8::rgb(0xd2, 0x69, 0x1e));
    let svg = doc.finish();
    assert!(svg.contains(r#"x2="100%" y2="100%""#));
    assert_eq!(svg.matches("<stop ").count(), 2);
}
