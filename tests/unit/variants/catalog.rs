use super::*;

use std::collections::BTreeSet;

use crate::{
    layout::regions::{Arrangement, Regions},
    text::wrap::wrap_chars,
    variants::spec::validate_variants,
};

#[test]
fn exploration_catalog_is_valid() {
    let variants = exploration_variants();
    assert_eq!(variants.len(), 20);
    validate_variants(&variants).unwrap();
    for v in &variants {
        Regions::compute(
            &v.options.layout,
            v.options.title_position,
            v.options.full_frame,
        )
        .unwrap_or_else(|e| panic!("{}: {e}", v.id));
    }
    assert_eq!(variants[0].id, "01-border-40px");
    assert_eq!(variants[19].id, "20-italic-desc");
}

#[test]
fn each_exploration_changes_the_base() {
    let variants = exploration_variants();
    let base = &variants[0].options;
    for v in &variants[1..] {
        assert_ne!(&v.options, base, "{} is identical to the base", v.id);
    }
    let no_icons = variants.iter().find(|v| v.id == "09-no-icons").unwrap();
    assert_eq!(no_icons.options.icons, IconPlacement::None);
    assert_eq!(base.icons, IconPlacement::Flanking);
}

#[test]
fn full_frame_variant_uses_the_inner_card() {
    let v = exploration_variants()
        .into_iter()
        .find(|v| v.id == "04-fullframe")
        .unwrap();
    let r = Regions::compute(&v.options.layout, TitlePosition::Top, v.options.full_frame).unwrap();
    assert_eq!(r.header.y0, 30.0);
    assert_eq!(r.body_height(), 551);
}

fn arranged_regions(v: &VariantSpec) -> Regions {
    Regions::compute_arranged(
        &v.options.layout,
        v.options.title_position,
        v.options.arrangement,
        v.options.full_frame,
    )
    .unwrap_or_else(|e| panic!("{}: {e}", v.id))
}

#[test]
fn experimental_layouts_cover_every_arrangement() {
    let layouts = experimental_layouts();
    validate_variants(&layouts).unwrap();
    let ids: Vec<_> = layouts.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(
        ids,
        ["layout-A", "layout-B", "layout-C", "layout-D", "layout-E", "layout-F"]
    );
    let arrangements: BTreeSet<_> = layouts
        .iter()
        .map(|v| format!("{:?}", v.options.arrangement))
        .collect();
    assert_eq!(arrangements.len(), 5);
    for v in &layouts {
        assert_eq!(v.options.layout.size, Size::POKER, "{}", v.id);
    }
}

#[test]
fn experimental_layouts_place_regions() {
    let layouts = experimental_layouts();
    let find = |id: &str| layouts.iter().find(|v| v.id == id).unwrap();

    let b = arranged_regions(find("layout-B"));
    assert_eq!((b.body.y0, b.body.y1), (685.0, 1010.0));

    let c = arranged_regions(find("layout-C"));
    assert_eq!((c.header.y0, c.header.y1), (650.0, 730.0));

    let d = arranged_regions(find("layout-D"));
    assert_eq!((d.portrait_frame.y0, d.portrait_frame.y1), (0.0, 720.0));
    assert_eq!((d.header.y0, d.header.y1), (620.0, 720.0));

    let e = arranged_regions(find("layout-E"));
    assert_eq!((e.portrait_frame.y0, e.portrait_frame.y1), (8.0, 648.0));
    assert_eq!(e.body_height(), 292);

    let f = find("layout-F");
    assert_eq!(f.options.arrangement, Arrangement::FullBleed);
    let box_area = arranged_regions(f).float_box();
    assert_eq!((box_area.y0, box_area.y1), (740.0, 1020.0));
    assert_eq!((box_area.x0, box_area.x1), (30.0, 720.0));
}

#[test]
fn layout_cases_cover_categories() {
    let cases = layout_cases();
    assert_eq!(cases.len(), 7);
    let ids: BTreeSet<_> = cases.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 7);
    let cats: BTreeSet<_> = cases.iter().map(|c| c.card.category().name()).collect();
    assert_eq!(cats, BTreeSet::from(["item", "location", "npc"]));
    assert_eq!(cases[0].file_name(), "test-npc-short.png");
    assert_eq!(wrap_chars(&cases[0].card.description, 46).len(), 1);
}

#[test]
fn size_sets_parse_and_validate() {
    assert_eq!("Tradeoff".parse::<SizeSet>().unwrap(), SizeSet::Tradeoff);
    assert!("huge".parse::<SizeSet>().is_err());

    let counts: Vec<usize> = SizeSet::ALL.iter().map(|s| s.studies().len()).collect();
    assert_eq!(counts, vec![5, 5, 4]);

    for set in SizeSet::ALL {
        for s in set.studies() {
            s.layout.validate().unwrap_or_else(|e| panic!("{}: {e}", s.id));
        }
    }
}

#[test]
fn tradeoff_lines_match_labels() {
    let lines: Vec<usize> = SizeSet::Tradeoff
        .studies()
        .iter()
        .map(|s| s.layout.lines_available())
        .collect();
    assert_eq!(lines, vec![5, 6, 6, 12]);
}

#[test]
fn sample_card_fits_tarot() {
    let card = sample_card();
    let lines = wrap_chars(&card.description, 46).len();
    assert!(lines <= LayoutConfig::tarot().lines_available());
}
