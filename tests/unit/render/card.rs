use super::*;

use crate::{
    layout::regions::{Arrangement, TitlePosition},
    model::category::Category,
};

fn renderer() -> CardRenderer {
    CardRenderer::new(Arc::new(usvg::fontdb::Database::new()), MeasureMode::Approx)
}

fn grimble() -> Card {
    Card::new(
        "Grimble Thornwick",
        "A wiry gnome tinkerer with soot on his spectacles.",
        "Riverside Market",
    )
    .with_category(Category::Npc)
}

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
}

#[test]
fn tarot_card_without_portrait_uses_placeholder() {
    let out = renderer()
        .render_card(&grimble(), &RenderOptions::default(), None, None)
        .unwrap();
    assert_eq!(out.size(), Size::new(827, 1417));
    assert!(out.report.portrait_placeholder);
    assert_eq!(out.report.lines_available, 11);
    assert_eq!(out.report.lines_used, 2);
    assert_eq!(out.report.lines_dropped, 0);
    assert!(!out.report.overflows());
    assert_eq!(out.report.title.lines, vec!["Grimble Thornwick".to_owned()]);
    assert_eq!(out.surface.pixel(0, 0).unwrap()[3], 255);
}

#[test]
fn portrait_fills_its_slot() {
    let portrait = solid_image(100, 140, [255, 0, 0, 255]);
    let out = renderer()
        .render_card(&grimble(), &RenderOptions::default(), Some(&portrait), None)
        .unwrap();
    assert!(!out.report.portrait_placeholder);
    let px = out.surface.pixel(413, 503).unwrap();
    assert!(px[0] >= 250 && px[1] <= 5 && px[2] <= 5, "{px:?}");
}

#[test]
fn portrait_border_keeps_frame_visible() {
    let portrait = solid_image(64, 64, [255, 0, 0, 255]);
    let options = RenderOptions {
        portrait_border: 40,
        frame_band: true,
        ..RenderOptions::default()
    };
    let out = renderer()
        .render_card(&grimble(), &options, Some(&portrait), None)
        .unwrap();
    // Inside the 40px inset the band shows the npc gradient, not the red portrait.
    let band = out.surface.pixel(10, 503).unwrap();
    assert!(band[0] < 250 || band[1] > 5, "{band:?}");
    let inner = out.surface.pixel(413, 503).unwrap();
    assert!(inner[0] >= 250 && inner[1] <= 5, "{inner:?}");
}

#[test]
fn long_text_overflows_and_drops_lines() {
    let card = Card::new(
        "Grimble Thornwick",
        "lorem ipsum ".repeat(80),
        "Riverside Market",
    );
    let out = renderer()
        .render_card(&card, &RenderOptions::default(), None, None)
        .unwrap();
    assert!(out.report.overflows());
    assert_eq!(out.report.lines_available, 11);
    assert!(out.report.lines_used > 11);
    assert_eq!(
        out.report.lines_dropped,
        out.report.lines_used - out.report.lines_available
    );
}

#[test]
fn details_count_as_body_lines() {
    let mut card = grimble();
    card.details.insert("Role".to_owned(), "Tinkerer".to_owned());
    card.details.insert("Home".to_owned(), "Riverside".to_owned());
    let out = renderer()
        .render_card(&card, &RenderOptions::default(), None, None)
        .unwrap();
    assert_eq!(out.report.lines_used, 4);
}

#[test]
fn details_follow_description_in_insertion_order() {
    let mut card = grimble();
    card.details.insert("Wants".to_owned(), "Rare gears".to_owned());
    card.details.insert("Fears".to_owned(), "Water".to_owned());
    let options = RenderOptions::default();
    let regions = Regions::compute(&options.layout, TitlePosition::Top, 0).unwrap();
    let body = renderer().layout_body(&card, &options, &options.layout, &regions);
    let details: Vec<&BodyLine> = body
        .lines
        .iter()
        .filter(|l| matches!(l, BodyLine::Detail(..)))
        .collect();
    assert_eq!(
        details,
        [
            &BodyLine::Detail("Wants".to_owned(), "Rare gears".to_owned()),
            &BodyLine::Detail("Fears".to_owned(), "Water".to_owned()),
        ]
    );
    assert!(matches!(body.lines.last(), Some(BodyLine::Detail(k, _)) if k == "Fears"));
}

#[test]
fn hidden_footer_gives_the_body_more_room() {
    let options = RenderOptions {
        footer: FooterMode::Hidden,
        ..RenderOptions::default()
    };
    let out = renderer()
        .render_card(&grimble(), &options, None, None)
        .unwrap();
    // 1417 - 90 - 827 = 500px body, (500 - 44) / 36 = 12 lines.
    assert_eq!(out.report.lines_available, 12);
}

#[test]
fn texture_theme_requires_a_texture() {
    let options = RenderOptions {
        theme: Theme::Texture,
        ..RenderOptions::default()
    };
    let err = renderer()
        .render_card(&grimble(), &options, None, None)
        .unwrap_err();
    assert!(matches!(err, CardError::MissingInput(_)), "{err}");
}

#[test]
fn texture_shows_through_plain_body() {
    let texture = solid_image(32, 32, [0, 0, 255, 255]);
    let options = RenderOptions {
        theme: Theme::Texture,
        ..RenderOptions::default()
    };
    let out = renderer()
        .render_card(&grimble(), &options, None, Some(&texture))
        .unwrap();
    let px = out.surface.pixel(5, 1000).unwrap();
    assert!(px[2] >= 250 && px[0] <= 5, "{px:?}");
}

#[test]
fn poker_layout_sets_card_size() {
    let options = RenderOptions::with_layout(LayoutConfig::poker());
    let out = renderer()
        .render_card(&grimble(), &options, None, None)
        .unwrap();
    assert_eq!(out.size(), Size::new(750, 1050));
    // 1050 - 80 - 750 - 36 = 184px body, (184 - 36) / 34 = 4 lines.
    assert_eq!(out.report.lines_available, 4);
}

#[test]
fn title_below_portrait_still_renders() {
    let options = RenderOptions {
        title_position: TitlePosition::BelowPortrait,
        icons: IconPlacement::Badge,
        footer: FooterMode::OverPortrait,
        ..RenderOptions::default()
    };
    let out = renderer()
        .render_card(&grimble(), &options, None, None)
        .unwrap();
    assert_eq!(out.report.lines_available, 12);
}

fn arranged(arrangement: Arrangement) -> RenderOptions {
    RenderOptions {
        arrangement,
        ..RenderOptions::default()
    }
}

fn is_red(px: [u8; 4]) -> bool {
    px[0] >= 250 && px[1] <= 5 && px[2] <= 5
}

#[test]
fn text_over_portrait_darkens_the_lower_portrait() {
    let portrait = solid_image(64, 64, [255, 0, 0, 255]);
    let out = renderer()
        .render_card(
            &grimble(),
            &arranged(Arrangement::TextOverPortrait),
            Some(&portrait),
            None,
        )
        .unwrap();
    assert!(is_red(out.surface.pixel(413, 400).unwrap()));
    // Inside the body the fade shades the portrait.
    let faded = out.surface.pixel(5, 900).unwrap();
    assert!(faded[0] < 200, "{faded:?}");
    // (667 - 44) / 36 = 17 lines.
    assert_eq!(out.report.lines_available, 17);
}

#[test]
fn name_over_portrait_starts_the_portrait_at_the_top() {
    let portrait = solid_image(64, 64, [255, 0, 0, 255]);
    let out = renderer()
        .render_card(
            &grimble(),
            &arranged(Arrangement::NameOverPortrait),
            Some(&portrait),
            None,
        )
        .unwrap();
    assert!(is_red(out.surface.pixel(413, 5).unwrap()));
    // The name strip darkens the bottom of the portrait.
    let strip = out.surface.pixel(5, 870).unwrap();
    assert!(strip[0] < 100, "{strip:?}");
    assert_eq!(out.report.lines_available, 11);
}

#[test]
fn accent_bar_replaces_the_header_band() {
    let portrait = solid_image(64, 64, [255, 0, 0, 255]);
    let out = renderer()
        .render_card(
            &grimble(),
            &arranged(Arrangement::AccentBar),
            Some(&portrait),
            None,
        )
        .unwrap();
    let bar = out.surface.pixel(413, 3).unwrap();
    assert_eq!(&bar[..3], &[0x8b, 0x45, 0x13]);
    assert!(is_red(out.surface.pixel(413, 20).unwrap()));
    // No header fill: the parchment background shows beside the title.
    let header = out.surface.pixel(3, 830).unwrap();
    assert!(header[0] > 200 && header[1] > 180, "{header:?}");
}

#[test]
fn full_bleed_shows_portrait_around_the_floating_box() {
    let portrait = solid_image(64, 64, [255, 0, 0, 255]);
    let out = renderer()
        .render_card(
            &grimble(),
            &arranged(Arrangement::FullBleed),
            Some(&portrait),
            None,
        )
        .unwrap();
    assert!(is_red(out.surface.pixel(413, 5).unwrap()));
    assert!(is_red(out.surface.pixel(5, 1100).unwrap()));
    let panel = out.surface.pixel(413, 1300).unwrap();
    assert!(panel[1] > 150, "{panel:?}");
    assert_eq!(out.report.lines_available, 11);
}

#[test]
fn empty_name_is_rejected() {
    let card = Card::new("  ", "text", "footer");
    let err = renderer()
        .render_card(&card, &RenderOptions::default(), None, None)
        .unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
}

#[test]
fn frame_strips_cover_the_ring() {
    let outer = Rect::new(0.0, 0.0, 100.0, 200.0);
    let inner = Rect::new(10.0, 10.0, 90.0, 190.0);
    let area: f64 = frame_strips(outer, inner).iter().map(|r| r.area()).sum();
    assert_eq!(area, outer.area() - inner.area());
}
