use std::{fmt, path::PathBuf, str::FromStr};

use crate::{
    foundation::{
        core::{CropGravity, Size},
        error::{CardError, CardResult},
    },
    layout::{
        config::{BodyText, LayoutConfig, TitleText},
        regions::{Arrangement, TitlePosition},
    },
    model::{card::Card, category::Category},
    text::measure::FontFamily,
    variants::spec::{
        FooterMode, IconPlacement, RenderOptions, SizeStudy, TextAlign, TextBox, Theme,
        VariantSpec,
    },
};

/// Default output directory for the exploration commands.
pub const DEFAULT_OUT_DIR: &str = "campaigns/example/cards/exploration";

/// Square portrait the exploration and size commands read from the output directory.
pub const PORTRAIT_FILE: &str = "portrait.png";
/// 4:3 portrait used by the size studies.
pub const PORTRAIT_4X3_FILE: &str = "portrait-4x3.png";
/// Texture read by texture-theme variants.
pub const TEXTURE_FILE: &str = "texture.png";

const GRIMBLE: &str = "Grimble Thornwick";
const EMPORIUM: &str = "Thornwick's Emporium";
const GRIMBLE_SHORT: &str = "A tinkering gnome inventor with perpetually soot-stained fingers and an infectious enthusiasm for clockwork contraptions.";
const GRIMBLE_MEDIUM: &str = "A tinkering gnome inventor with perpetually soot-stained fingers and an infectious enthusiasm for clockwork contraptions. His workshop is legendary for both its ingenious devices and occasional explosions.";
const GRIMBLE_LONG: &str = "A tinkering gnome inventor with perpetually soot-stained fingers and an infectious enthusiasm for clockwork contraptions. His workshop is legendary for both its ingenious devices and occasional explosions. Villagers seek him for repairs but keep their distance during experiments.";

/// Card drawn by every exploration variant.
pub fn exploration_card() -> Card {
    Card::new(GRIMBLE, GRIMBLE_SHORT, EMPORIUM).with_category(Category::Npc)
}

/// Card drawn by the size studies.
pub fn study_card() -> Card {
    Card::new(GRIMBLE, GRIMBLE_MEDIUM, EMPORIUM).with_category(Category::Npc)
}

/// The tarot sample card.
pub fn sample_card() -> Card {
    Card::new(GRIMBLE, GRIMBLE_LONG, EMPORIUM).with_category(Category::Npc)
}

/// Portrait prompt for the tarot sample (ink wash).
pub const SAMPLE_PROMPT: &str = "head and shoulders portrait, centered composition, facing slightly left, gnome inventor with brass goggles, wild white hair, soot-stained cheeks, cheerful expression, ink drawing with watercolor wash, pen and ink linework, warm workshop lighting";

fn framed() -> RenderOptions {
    RenderOptions {
        portrait_border: 40,
        frame_band: true,
        ..RenderOptions::default()
    }
}

fn variant(id: &str, description: &str, options: RenderOptions) -> VariantSpec {
    VariantSpec {
        id: id.to_owned(),
        description: description.to_owned(),
        options,
    }
}

fn tarot_with(f: impl FnOnce(&mut LayoutConfig)) -> LayoutConfig {
    let mut layout = LayoutConfig::tarot();
    f(&mut layout);
    layout
}

/// The twenty layout explorations, in gallery order.
///
/// All start from the framed tarot card (40px category band around the portrait) and change
/// one thing.
pub fn exploration_variants() -> Vec<VariantSpec> {
    let base = framed();
    vec![
        variant(
            "01-border-40px",
            "Current: 40px category border around portrait",
            base.clone(),
        ),
        variant(
            "02-border-20px",
            "Thinner border: 20px (more portrait visible)",
            RenderOptions {
                portrait_border: 20,
                ..base.clone()
            },
        ),
        variant(
            "03-border-none",
            "No border: edge-to-edge portrait",
            RenderOptions {
                portrait_border: 0,
                frame_band: false,
                ..base.clone()
            },
        ),
        variant(
            "04-fullframe",
            "Full frame: category border around entire card",
            RenderOptions {
                layout: tarot_with(|l| {
                    l.header_height = 70;
                    l.portrait_height = 700;
                    l.footer_height = 36;
                    l.padding = 24;
                    l.body = BodyText {
                        font_size: 24.0,
                        line_height: 32.0,
                        top_offset: 36.0,
                        max_chars: Some(42),
                    };
                    l.footer_font_size = 20.0;
                    l.title.sizes = vec![44.0, 36.0, 30.0, 24.0];
                }),
                portrait_border: 0,
                frame_band: false,
                full_frame: 30,
                text_box: TextBox::Solid,
                ..base.clone()
            },
        ),
        variant(
            "05-tinted-textbox",
            "Tinted text box: light category color behind text",
            RenderOptions {
                text_box: TextBox::Tinted,
                ..base.clone()
            },
        ),
        variant(
            "06-solid-textbox",
            "Solid text box: same color as header",
            RenderOptions {
                text_box: TextBox::Solid,
                ..base.clone()
            },
        ),
        variant(
            "07-smaller-portrait",
            "Smaller portrait (650px): more text space",
            RenderOptions {
                layout: tarot_with(|l| l.portrait_height = 650),
                ..base.clone()
            },
        ),
        variant(
            "08-larger-portrait",
            "Larger portrait (900px): less text space",
            RenderOptions {
                layout: tarot_with(|l| l.portrait_height = 900),
                ..base.clone()
            },
        ),
        variant(
            "09-no-icons",
            "No category icons in header",
            RenderOptions {
                icons: IconPlacement::None,
                ..base.clone()
            },
        ),
        variant(
            "10-larger-header",
            "Larger header (120px) with bigger title",
            RenderOptions {
                layout: tarot_with(|l| {
                    l.header_height = 120;
                    l.portrait_height = 800;
                    l.title.sizes = vec![64.0, 52.0, 42.0, 34.0];
                }),
                ..base.clone()
            },
        ),
        variant(
            "11-name-below-portrait",
            "Name below portrait (reversed layout)",
            RenderOptions {
                title_position: TitlePosition::BelowPortrait,
                ..base.clone()
            },
        ),
        variant(
            "12-rounded-portrait",
            "Rounded corners on portrait area",
            RenderOptions {
                corner_radius: 20,
                ..base.clone()
            },
        ),
        variant(
            "13-divider-line",
            "Divider line between portrait and text",
            RenderOptions {
                divider: true,
                ..base.clone()
            },
        ),
        variant(
            "14-dark-theme",
            "Dark theme: dark background, light text",
            RenderOptions {
                theme: Theme::Dark,
                ..base.clone()
            },
        ),
        variant(
            "15-category-badge",
            "Category badge in corner instead of icons",
            RenderOptions {
                icons: IconPlacement::Badge,
                ..base.clone()
            },
        ),
        variant(
            "16-no-footer",
            "No footer: more text space",
            RenderOptions {
                footer: FooterMode::Hidden,
                ..base.clone()
            },
        ),
        variant(
            "17-footer-in-portrait",
            "Footer overlaid on portrait bottom",
            RenderOptions {
                footer: FooterMode::OverPortrait,
                ..base.clone()
            },
        ),
        variant(
            "18-sans-serif",
            "Sans-serif font throughout",
            RenderOptions {
                layout: tarot_with(|l| {
                    l.body = BodyText {
                        font_size: 24.0,
                        line_height: 34.0,
                        top_offset: 44.0,
                        max_chars: Some(48),
                    };
                    l.footer_font_size = 20.0;
                    l.title.sizes = vec![48.0, 40.0, 32.0, 26.0];
                }),
                font: FontFamily::SansSerif,
                ..base.clone()
            },
        ),
        variant(
            "19-centered-text",
            "Center-aligned description text",
            RenderOptions {
                align: TextAlign::Middle,
                ..base.clone()
            },
        ),
        variant(
            "20-italic-desc",
            "Italic description text",
            RenderOptions {
                italic: true,
                ..base
            },
        ),
    ]
}

fn poker_with(f: impl FnOnce(&mut LayoutConfig)) -> LayoutConfig {
    let mut layout = LayoutConfig::poker();
    f(&mut layout);
    layout
}

fn arranged(layout: LayoutConfig, arrangement: Arrangement) -> RenderOptions {
    RenderOptions {
        arrangement,
        ..RenderOptions::with_layout(layout)
    }
}

/// Six poker-size arrangements of header, portrait and text, rendered by
/// `cardgen variants --layouts`.
///
/// `layout-A` is the stacked baseline; the rest move text onto or around the portrait.
pub fn experimental_layouts() -> Vec<VariantSpec> {
    vec![
        variant(
            "layout-A",
            "Current design (header, portrait, text)",
            arranged(
                poker_with(|l| {
                    l.header_height = 95;
                    l.portrait_height = 620;
                    l.footer_height = 40;
                }),
                Arrangement::Stacked,
            ),
        ),
        variant(
            "layout-B",
            "Text overlay on portrait (gradient fade)",
            arranged(
                poker_with(|l| {
                    l.header_height = 85;
                    l.portrait_height = 800;
                    l.footer_height = 40;
                }),
                Arrangement::TextOverPortrait,
            ),
        ),
        variant(
            "layout-C",
            "Portrait first, name bar below",
            RenderOptions {
                title_position: TitlePosition::BelowPortrait,
                ..arranged(
                    poker_with(|l| {
                        l.header_height = 80;
                        l.portrait_height = 650;
                        l.footer_height = 40;
                    }),
                    Arrangement::Stacked,
                )
            },
        ),
        variant(
            "layout-D",
            "Name overlay at bottom of portrait",
            arranged(
                poker_with(|l| {
                    l.header_height = 100;
                    l.portrait_height = 620;
                    l.footer_height = 40;
                }),
                Arrangement::NameOverPortrait,
            ),
        ),
        variant(
            "layout-E",
            "Minimal (thin accent, no header band)",
            arranged(
                poker_with(|l| {
                    l.header_height = 70;
                    l.portrait_height = 648;
                    l.footer_height = 40;
                }),
                Arrangement::AccentBar,
            ),
        ),
        variant(
            "layout-F",
            "Full bleed portrait with floating box",
            RenderOptions {
                icons: IconPlacement::None,
                ..arranged(
                    poker_with(|l| {
                        l.header_height = 50;
                        l.portrait_height = 770;
                        l.footer_height = 30;
                        l.padding = 20;
                        l.body = BodyText {
                            font_size: 24.0,
                            line_height: 30.0,
                            top_offset: 30.0,
                            max_chars: Some(38),
                        };
                        l.footer_font_size = 16.0;
                        l.title.sizes = vec![32.0, 28.0, 24.0];
                    }),
                    Arrangement::FullBleed,
                )
            },
        ),
    ]
}

/// One content case of the layout test.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCase {
    /// Case id; the PNG is `test-<id>.png`.
    pub id: &'static str,
    /// Card under test.
    pub card: Card,
}

impl LayoutCase {
    /// Output file name.
    pub fn file_name(&self) -> String {
        format!("test-{}.png", self.id)
    }
}

fn case(
    id: &'static str,
    category: Category,
    name: &str,
    description: &str,
    footer: &str,
) -> LayoutCase {
    LayoutCase {
        id,
        card: Card::new(name, description, footer).with_category(category),
    }
}

/// Short, medium and long descriptions across categories, plus a long name.
pub fn layout_cases() -> Vec<LayoutCase> {
    vec![
        case(
            "npc-short",
            Category::Npc,
            "Brix",
            "A quiet halfling barmaid. Observant.",
            "The Rusty Anchor",
        ),
        case(
            "npc-medium",
            Category::Npc,
            GRIMBLE,
            GRIMBLE_MEDIUM,
            EMPORIUM,
        ),
        case(
            "npc-long",
            Category::Npc,
            "Lord Aldric Vance",
            "The Duke of Westmarch, a calculating politician whose warm smile conceals ruthless ambition. He rose from minor nobility through strategic marriages and convenient deaths. Now controls the grain trade across three provinces. Secretly funds the Thieves' Guild in exchange for information. His wife suspects nothing, but his eldest son has begun asking questions. Weaknesses: pride, his daughter, aged Dwarven whiskey.",
            "Vance Manor, Westmarch",
        ),
        case(
            "location-short",
            Category::Location,
            "The Rusty Anchor",
            "A dockside tavern. Cheap ale, cheaper rooms.",
            "Harbor District",
        ),
        case(
            "location-long",
            Category::Location,
            "The Whispering Archives",
            "An ancient library built into a hollowed mountain. The stacks extend for miles into the darkness, organized by a cataloging system no living scholar understands. Magical silence pervades most sections, but in the deepest vaults, visitors report hearing whispered conversations in dead languages. The head librarian is a lich who traded his phylactery for complete knowledge of the collection.",
            "Northern Peaks",
        ),
        case(
            "item-medium",
            Category::Item,
            "Blade of the Fallen Star",
            "A longsword forged from meteoric iron, its edge perpetually cold to the touch. Glows faintly blue in the presence of undead. Once belonged to a paladin who fell defending a village from a vampire lord. The blade remembers.",
            "Rare, requires attunement",
        ),
        case(
            "npc-long-name",
            Category::Npc,
            "Bartholomew Fitzgerald III",
            "A pompous merchant prince who insists on his full title at all times.",
            "Fitzgerald Trading Company",
        ),
    ]
}

/// Which family of size studies to render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizeSet {
    /// Card sizes against square and 4:3 portraits.
    #[default]
    Explore,
    /// Five candidate designs aiming at six lines and little crop.
    Comparison,
    /// Poker and tarot crop/line trade-offs on the square portrait.
    Tradeoff,
}

impl SizeSet {
    /// All sets.
    pub const ALL: [SizeSet; 3] = [SizeSet::Explore, SizeSet::Comparison, SizeSet::Tradeoff];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            SizeSet::Explore => "explore",
            SizeSet::Comparison => "comparison",
            SizeSet::Tradeoff => "tradeoff",
        }
    }

    /// Markdown page written next to the PNGs.
    pub fn report_file(self) -> &'static str {
        match self {
            SizeSet::Explore => "SIZE-COMPARISON.md",
            SizeSet::Comparison => "CARD-COMPARISON.md",
            SizeSet::Tradeoff => "TRADEOFF-COMPARISON.md",
        }
    }

    /// Page heading.
    pub fn heading(self) -> &'static str {
        match self {
            SizeSet::Explore => "Card Size Exploration",
            SizeSet::Comparison => "Card Design Comparison",
            SizeSet::Tradeoff => "Card Size/Crop Trade-offs",
        }
    }

    /// Line under the heading.
    pub fn intro(self) -> &'static str {
        match self {
            SizeSet::Explore => "Same content, different card sizes and image aspect ratios.",
            SizeSet::Comparison => {
                "All options show the same content. Goal: 6 lines of text, ≤5% crop ideal."
            }
            SizeSet::Tradeoff => "Same content, same image. Which trade-off do you prefer?",
        }
    }

    /// Studies in this set.
    pub fn studies(self) -> Vec<SizeStudy> {
        match self {
            SizeSet::Explore => explore_sizes(),
            SizeSet::Comparison => comparison_sizes(),
            SizeSet::Tradeoff => tradeoff_sizes(),
        }
    }
}

impl fmt::Display for SizeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeSet {
    type Err = CardError;

    fn from_str(s: &str) -> CardResult<Self> {
        SizeSet::ALL
            .into_iter()
            .find(|set| set.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CardError::validation(format!(
                    "unknown size set \"{s}\" (expected explore, comparison or tradeoff)"
                ))
            })
    }
}

/// Geometry knobs shared by the size studies.
struct StudyGeometry {
    size: Size,
    header: u32,
    portrait: u32,
    footer: u32,
    padding: u32,
    font_size: f32,
    line_height: f32,
    max_chars: usize,
    footer_font: f32,
    title: f32,
}

impl StudyGeometry {
    fn layout(&self) -> LayoutConfig {
        let t = self.title;
        LayoutConfig {
            size: self.size,
            header_height: self.header,
            portrait_height: self.portrait,
            footer_height: self.footer,
            padding: self.padding,
            body: BodyText {
                font_size: self.font_size,
                line_height: self.line_height,
                top_offset: 36.0,
                max_chars: Some(self.max_chars),
            },
            footer_font_size: self.footer_font,
            title: TitleText {
                sizes: vec![t, (t * 0.82).round(), (t * 0.66).round(), (t * 0.54).round()],
                line_height: 1.1,
            },
        }
    }
}

fn study(
    id: &str,
    label: &str,
    geometry: StudyGeometry,
    portrait: &str,
    crop: CropGravity,
) -> SizeStudy {
    SizeStudy {
        id: id.to_owned(),
        label: label.to_owned(),
        layout: geometry.layout(),
        portrait: PathBuf::from(portrait),
        crop,
    }
}

fn poker(header: u32, portrait: u32) -> StudyGeometry {
    StudyGeometry {
        size: Size::POKER,
        header,
        portrait,
        footer: 36,
        padding: 36,
        font_size: 28.0,
        line_height: 34.0,
        max_chars: 42,
        footer_font: 20.0,
        title: 48.0,
    }
}

fn explore_sizes() -> Vec<SizeStudy> {
    let explore = |size: Size, header: u32, portrait: u32| StudyGeometry {
        size,
        header,
        portrait,
        footer: 36,
        padding: 36,
        font_size: 26.0,
        line_height: 32.0,
        max_chars: 42,
        footer_font: 18.0,
        title: 42.0,
    };
    vec![
        study(
            "size-poker-square",
            "Poker (750×1050) + Square image",
            explore(Size::POKER, 80, 750),
            PORTRAIT_FILE,
            CropGravity::Center,
        ),
        study(
            "size-poker-4x3-center",
            "Poker (750×1050) + 4:3 image, center crop",
            explore(Size::POKER, 85, 650),
            PORTRAIT_4X3_FILE,
            CropGravity::Center,
        ),
        study(
            "size-poker-4x3-top",
            "Poker (750×1050) + 4:3 image, top crop (keep face)",
            explore(Size::POKER, 85, 650),
            PORTRAIT_4X3_FILE,
            CropGravity::Top,
        ),
        study(
            "size-tall-4x3",
            "Tall card (750×1200) + 4:3 image, minimal crop",
            explore(Size::new(750, 1200), 85, 900),
            PORTRAIT_4X3_FILE,
            CropGravity::Center,
        ),
        study(
            "size-poker-4x3-full",
            "Poker (750×1050) + 4:3 full height, crop sides",
            explore(Size::POKER, 80, 750),
            PORTRAIT_4X3_FILE,
            CropGravity::Center,
        ),
    ]
}

fn comparison_sizes() -> Vec<SizeStudy> {
    vec![
        study(
            "opt1-square-tall",
            "Square image + Tall card (6 lines)",
            StudyGeometry {
                size: Size::new(750, 1110),
                ..poker(80, 750)
            },
            PORTRAIT_FILE,
            CropGravity::Center,
        ),
        study(
            "opt2-square-poker-smalltext",
            "Square image + Poker + Smaller text (6 lines)",
            StudyGeometry {
                font_size: 24.0,
                line_height: 28.0,
                max_chars: 48,
                ..poker(80, 750)
            },
            PORTRAIT_FILE,
            CropGravity::Center,
        ),
        study(
            "opt3-43-tall-5crop",
            "4:3 image + Tall card (~10% crop)",
            StudyGeometry {
                size: Size::new(750, 1200),
                ..poker(80, 900)
            },
            PORTRAIT_4X3_FILE,
            CropGravity::Center,
        ),
        study(
            "opt4-43-poker-25crop",
            "4:3 image + Poker (25% crop)",
            poker(80, 750),
            PORTRAIT_4X3_FILE,
            CropGravity::Center,
        ),
        study(
            "opt5-43-poker-topcrop",
            "4:3 image + Poker + Top crop (keep head)",
            poker(80, 750),
            PORTRAIT_4X3_FILE,
            CropGravity::Top,
        ),
    ]
}

fn tradeoff_sizes() -> Vec<SizeStudy> {
    vec![
        study(
            "tradeoff-A-5pct-5lines",
            "Poker, 5% crop, 5 lines",
            poker(80, 713),
            PORTRAIT_FILE,
            CropGravity::Center,
        ),
        study(
            "tradeoff-B-7pct-6lines",
            "Poker, 7.5% crop, 6 lines",
            poker(80, 694),
            PORTRAIT_FILE,
            CropGravity::Center,
        ),
        study(
            "tradeoff-C-5pct-6lines-small",
            "Poker, 5% crop, 6 lines (smaller text)",
            StudyGeometry {
                font_size: 24.0,
                line_height: 28.0,
                max_chars: 48,
                ..poker(80, 713)
            },
            PORTRAIT_FILE,
            CropGravity::Center,
        ),
        study(
            "tradeoff-D-tarot-full",
            "Tarot, minimal crop, 8+ lines",
            StudyGeometry {
                size: Size::new(827, 1430),
                footer: 40,
                max_chars: 46,
                ..poker(90, 827)
            },
            PORTRAIT_FILE,
            CropGravity::Center,
        ),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/variants/catalog.rs"]
mod tests;
