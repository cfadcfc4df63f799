use std::sync::Arc;

use image::DynamicImage;
use serde::Serialize;

use crate::{
    assets::{decode::cover_resize, svg_raster::rasterize_svg},
    foundation::{
        core::{CropGravity, Rect, Rgba8, Size},
        error::{CardError, CardResult},
    },
    layout::{
        config::{LayoutConfig, lines_that_fit},
        regions::{ACCENT_BAR_HEIGHT, Arrangement, Regions},
    },
    model::{card::Card, category::CategoryStyle},
    render::surface::Surface,
    svg::doc::{Anchor, Paint, Span, SvgDoc, TextStyle},
    text::{
        fit::{FittedTitle, fit_title},
        measure::{FontFamily, FontSpec, MeasureMode, Measurer},
        wrap::{wrap_chars, wrap_text},
    },
    variants::spec::{FooterMode, IconPlacement, RenderOptions, TextAlign, TextBox, Theme},
};

const PARCHMENT: Rgba8 = Rgba8::rgb(0xf4, 0xe4, 0xc1);
const PARCHMENT_DEEP: Rgba8 = Rgba8::rgb(0xe8, 0xd4, 0xa8);
const INK: Rgba8 = Rgba8::rgb(0x2a, 0x20, 0x16);
const FOOTER_RULE: Rgba8 = Rgba8::rgb(0xc4, 0xa8, 0x82);
const FOOTER_INK: Rgba8 = Rgba8::rgb(0x5a, 0x4a, 0x36);
const TINTED_FOOTER_INK: Rgba8 = Rgba8::rgb(0x3a, 0x2a, 0x16);
const NIGHT: Rgba8 = Rgba8::rgb(0x1a, 0x1a, 0x1a);
const NIGHT_DEEP: Rgba8 = Rgba8::rgb(0x0d, 0x0d, 0x0d);
const NIGHT_INK: Rgba8 = Rgba8::rgb(0xe0, 0xe0, 0xe0);
const NIGHT_FOOTER: Rgba8 = Rgba8::rgb(0x11, 0x11, 0x11);
const NIGHT_RULE: Rgba8 = Rgba8::rgb(0x33, 0x33, 0x33);
const NIGHT_FOOTER_INK: Rgba8 = Rgba8::rgb(0x66, 0x66, 0x66);
const ICON_TINT: Rgba8 = Rgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 179,
};
const SHADE: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 153,
};
const BADGE_SHADE: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 128,
};
const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
const NAME_STRIP: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 179,
};
/// Transparent at the top of the body, dark where the text sits.
const FADE_STOPS: [(f32, Rgba8); 3] = [
    (0.0, Rgba8 { r: 0, g: 0, b: 0, a: 0 }),
    (0.3, Rgba8 { r: 0, g: 0, b: 0, a: 179 }),
    (1.0, Rgba8 { r: 0, g: 0, b: 0, a: 217 }),
];
const FLOAT_RADIUS: f64 = 8.0;
const FLOAT_OPACITY: f32 = 0.92;

/// Extra drop of the first body baseline when a divider is drawn.
const DIVIDER_SHIFT: f32 = 10.0;
/// Icon edge as a fraction of the header height.
const ICON_SCALE: f64 = 32.0 / 90.0;
/// Gap between header edge and icon, and between icon and title.
const ICON_GAP: f64 = 24.0;
/// Height of the footer strip drawn over the portrait.
const OVERLAY_FOOTER_HEIGHT: f64 = 40.0;
/// Baseline offset below the vertical center, as a fraction of the font size.
const BASELINE_DROP: f32 = 0.34;

/// What happened while laying out one card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderReport {
    /// Title as drawn.
    pub title: FittedTitle,
    /// Body lines the text needed (description plus details).
    pub lines_used: usize,
    /// Body lines the layout has room for.
    pub lines_available: usize,
    /// Lines cut because they did not fit.
    pub lines_dropped: usize,
    /// Whether the portrait area shows a placeholder.
    pub portrait_placeholder: bool,
}

impl RenderReport {
    /// Whether the body text did not fit.
    pub fn overflows(&self) -> bool {
        self.lines_used > self.lines_available
    }
}

/// A rendered card and its layout report.
#[derive(Debug)]
pub struct RenderedCard {
    /// Final premultiplied pixels.
    pub surface: Surface,
    /// Layout facts.
    pub report: RenderReport,
}

impl RenderedCard {
    /// Pixel size of the card.
    pub fn size(&self) -> Size {
        self.surface.size()
    }
}

/// Draws cards: SVG overlays for everything vector, image compositing for the portrait and
/// texture.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
    measurer: Measurer,
}

impl CardRenderer {
    /// Renderer rasterizing with `fontdb` and measuring text according to `mode`.
    pub fn new(fontdb: Arc<usvg::fontdb::Database>, mode: MeasureMode) -> Self {
        let measurer = Measurer::for_mode(mode, fontdb.clone());
        Self { fontdb, measurer }
    }

    /// Font database used for rasterization.
    pub fn fontdb(&self) -> &Arc<usvg::fontdb::Database> {
        &self.fontdb
    }

    /// Text measurement in use.
    pub fn measurer(&self) -> &Measurer {
        &self.measurer
    }

    /// Render `card` with `options`.
    ///
    /// Without a `portrait` the portrait area shows a tinted placeholder. The texture theme
    /// requires `texture`.
    #[tracing::instrument(skip_all, fields(card = %card.name))]
    pub fn render_card(
        &self,
        card: &Card,
        options: &RenderOptions,
        portrait: Option<&DynamicImage>,
        texture: Option<&DynamicImage>,
    ) -> CardResult<RenderedCard> {
        card.validate()?;

        let mut layout = options.layout.clone();
        if options.footer != FooterMode::Band {
            layout.footer_height = 0;
        }
        let regions = Regions::compute_arranged(
            &layout,
            options.title_position,
            options.arrangement,
            options.full_frame,
        )?;
        let size = layout.size;

        let title = self.fit_header_title(card, options, &layout, &regions);
        let body = self.layout_body(card, options, &layout, &regions);
        let scene = Scene {
            card,
            options,
            layout: &layout,
            regions,
            style: card.category().style(),
            title,
            body,
        };

        let mut canvas = match options.theme {
            Theme::Texture => {
                let texture = texture.ok_or_else(|| {
                    CardError::missing_input("texture image for the texture theme")
                })?;
                cover_resize(texture, size, CropGravity::Center)?
            }
            Theme::Parchment | Theme::Dark => Surface::new(size)?,
        };

        let under = underlay_svg(&scene);
        canvas.composite_at(&rasterize_svg(&under, self.fontdb.clone())?, 0, 0, 1.0);

        let slot = portrait_slot(&regions, options.portrait_border);
        if let Some(img) = portrait {
            let slot_size = rect_size(slot);
            if !slot_size.is_empty() {
                let mut pixels = cover_resize(img, slot_size, options.crop)?;
                pixels.round_corners(options.corner_radius as f32);
                canvas.composite_at(&pixels, slot.x0 as i64, slot.y0 as i64, 1.0);
            }
        }

        let over = overlay_svg(&scene, slot, portrait.is_none());
        canvas.composite_at(&rasterize_svg(&over, self.fontdb.clone())?, 0, 0, 1.0);

        let Scene { title, body, .. } = scene;
        let report = RenderReport {
            title,
            lines_used: body.needed,
            lines_available: body.available,
            lines_dropped: body.needed.saturating_sub(body.lines.len()),
            portrait_placeholder: portrait.is_none(),
        };
        if report.lines_dropped > 0 {
            tracing::warn!(
                card = %card.name,
                used = report.lines_used,
                available = report.lines_available,
                "body text overflows, dropping lines"
            );
        }
        tracing::debug!(
            title_size = report.title.font_size,
            lines = report.lines_used,
            arrangement = ?options.arrangement,
            "rendered card"
        );

        Ok(RenderedCard {
            surface: canvas,
            report,
        })
    }

    fn fit_header_title(
        &self,
        card: &Card,
        options: &RenderOptions,
        layout: &LayoutConfig,
        regions: &Regions,
    ) -> FittedTitle {
        let header_w = regions.header.width();
        let reserved = match options.icons {
            IconPlacement::Flanking => 2.0 * (ICON_GAP + icon_edge(regions) + ICON_GAP / 2.0),
            IconPlacement::Badge | IconPlacement::None => 2.0 * f64::from(layout.padding),
        };
        let max_width = (header_w - reserved).max(0.0) as f32;
        let face = self.measurer.face(FontSpec::bold(options.font));
        fit_title(&card.name, &layout.title_fit(max_width), &*face)
    }

    fn layout_body(
        &self,
        card: &Card,
        options: &RenderOptions,
        layout: &LayoutConfig,
        regions: &Regions,
    ) -> BodyLines {
        let text = &layout.body;
        let mut lines: Vec<BodyLine> = match text.max_chars {
            Some(n) => wrap_chars(&card.description, n),
            None => {
                let width = (regions.body.width() - 2.0 * f64::from(layout.padding)) as f32;
                let face = self.measurer.face(FontSpec {
                    family: options.font,
                    bold: false,
                    italic: options.italic,
                });
                wrap_text(&card.description, width, text.font_size, &*face)
            }
        }
        .into_iter()
        .map(BodyLine::Text)
        .collect();
        lines.extend(
            card.details
                .iter()
                .map(|(k, v)| BodyLine::Detail(k.clone(), v.clone())),
        );

        let shift = if options.divider { DIVIDER_SHIFT } else { 0.0 };
        let available = lines_that_fit(
            regions.body.height() as f32,
            text.top_offset + shift,
            text.line_height,
        );
        let needed = lines.len();
        lines.truncate(available);
        BodyLines {
            lines,
            needed,
            available,
            first_baseline: regions.body.y0 as f32 + text.top_offset + shift,
        }
    }
}

/// Everything the SVG layers need for one card.
struct Scene<'a> {
    card: &'a Card,
    options: &'a RenderOptions,
    layout: &'a LayoutConfig,
    regions: Regions,
    style: CategoryStyle,
    title: FittedTitle,
    body: BodyLines,
}

impl Scene<'_> {
    fn arrangement(&self) -> Arrangement {
        self.options.arrangement
    }
}

/// Layer drawn before the portrait.
fn underlay_svg(s: &Scene<'_>) -> String {
    let (options, regions, style) = (s.options, &s.regions, &s.style);
    let mut doc = SvgDoc::new(s.layout.size);
    let (bg_from, bg_to) = match options.theme {
        Theme::Dark => (NIGHT, NIGHT_DEEP),
        Theme::Parchment | Theme::Texture => (PARCHMENT, PARCHMENT_DEEP),
    };
    doc.linear_gradient("bg", bg_from, bg_to)
        .linear_gradient("c", style.accent, style.light);

    if options.theme != Theme::Texture {
        doc.rect(regions.card, Paint::gradient("bg"), 1.0);
    }
    if options.full_frame > 0 {
        for strip in frame_strips(regions.card, regions.content) {
            doc.rect(strip, Paint::gradient("c"), 1.0);
        }
    }
    if options.text_box == TextBox::Solid {
        doc.rect(regions.content, Paint::gradient("c"), 1.0);
    }
    if options.frame_band {
        doc.rect(regions.portrait_frame, Paint::gradient("c"), 1.0);
    }
    if s.arrangement() == Arrangement::AccentBar {
        let p = regions.portrait_frame;
        let bar = Rect::new(p.x0, p.y0 - ACCENT_BAR_HEIGHT, p.x1, p.y0);
        doc.rect(bar, style.accent, 1.0);
    }

    if !s.arrangement().header_over_portrait() {
        draw_header(&mut doc, s);
    }
    if !s.arrangement().body_over_portrait() {
        draw_body(&mut doc, s);
    }
    if !s.arrangement().footer_over_portrait() {
        draw_footer(&mut doc, s);
    }
    doc.finish()
}

/// Layer drawn after the portrait.
fn overlay_svg(s: &Scene<'_>, slot: Rect, placeholder: bool) -> String {
    let (card, options, regions, style) = (s.card, s.options, &s.regions, &s.style);
    let mut doc = SvgDoc::new(s.layout.size);
    doc.linear_gradient("c", style.accent, style.light);

    if placeholder {
        doc.rounded_rect(slot, f64::from(options.corner_radius), style.accent, 0.2);
        let caption = TextStyle::new(options.font, 32.0, FOOTER_INK).anchor(Anchor::Middle);
        let c = slot.center();
        doc.text(
            c.x,
            c.y,
            &caption,
            &format!("[{} image]", card.category().name()),
        );
    }

    match s.arrangement() {
        Arrangement::TextOverPortrait => {
            doc.vertical_gradient("fade", &FADE_STOPS)
                .rect(regions.body, Paint::gradient("fade"), 1.0);
        }
        Arrangement::FullBleed => {
            doc.rounded_rect(regions.float_box(), FLOAT_RADIUS, PARCHMENT, FLOAT_OPACITY);
        }
        Arrangement::Stacked | Arrangement::NameOverPortrait | Arrangement::AccentBar => {}
    }
    if s.arrangement().header_over_portrait() {
        draw_header(&mut doc, s);
    }
    if s.arrangement().body_over_portrait() {
        draw_body(&mut doc, s);
    }
    if s.arrangement().footer_over_portrait() {
        draw_footer(&mut doc, s);
    }

    if options.icons == IconPlacement::Badge {
        let badge = Rect::new(
            regions.content.x1 - 100.0,
            regions.portrait_frame.y0 + 10.0,
            regions.content.x1 - 10.0,
            regions.portrait_frame.y0 + 40.0,
        );
        let label = TextStyle::new(FontFamily::SansSerif, 16.0, WHITE).anchor(Anchor::Middle);
        doc.rounded_rect(badge, 4.0, BADGE_SHADE, 1.0).text(
            badge.center().x,
            badge.y0 + 21.0,
            &label,
            style.label,
        );
    }

    if options.footer == FooterMode::OverPortrait {
        let frame = regions.portrait_frame;
        let strip = Rect::new(
            frame.x0,
            frame.y1 - OVERLAY_FOOTER_HEIGHT,
            frame.x1,
            frame.y1,
        );
        let caption = TextStyle::new(options.font, s.layout.footer_font_size, WHITE)
            .anchor(Anchor::Middle);
        doc.rect(strip, SHADE, 1.0).text(
            strip.center().x,
            strip.y0 + 27.0,
            &caption,
            &card.footer,
        );
    }

    doc.finish()
}

/// Header fill, title ink and icon tint for an arrangement.
fn header_look(
    arrangement: Arrangement,
    style: &CategoryStyle,
) -> (Option<Paint>, Rgba8, Rgba8) {
    match arrangement {
        Arrangement::Stacked | Arrangement::TextOverPortrait => {
            (Some(Paint::gradient("c")), PARCHMENT, ICON_TINT)
        }
        Arrangement::NameOverPortrait => (Some(NAME_STRIP.into()), WHITE, style.light),
        Arrangement::AccentBar => (None, style.dark, style.accent),
        Arrangement::FullBleed => (Some(style.accent.into()), WHITE, ICON_TINT),
    }
}

fn draw_header(doc: &mut SvgDoc, s: &Scene<'_>) {
    let (options, regions, title) = (s.options, &s.regions, &s.title);
    let header = regions.header;
    let (fill, ink, icon_tint) = header_look(s.arrangement(), &s.style);
    if let Some(fill) = fill {
        doc.rect(header, fill, 1.0);
    }

    if options.icons == IconPlacement::Flanking {
        let edge = icon_edge(regions);
        let y = header.y0 + (header.height() - edge) / 2.0;
        doc.icon(s.style.icon, header.x0 + ICON_GAP, y, edge, icon_tint)
            .icon(s.style.icon, header.x1 - ICON_GAP - edge, y, edge, icon_tint);
    }

    let title_style = TextStyle::new(options.font, title.font_size, ink)
        .bold()
        .anchor(Anchor::Middle);
    let cx = header.center().x;
    let line_h = title.font_size * s.layout.title.line_height;
    let center_y = header.center().y as f32;
    let first = center_y - (title.lines.len() as f32 - 1.0) * line_h / 2.0
        + title.font_size * BASELINE_DROP;
    for (i, line) in title.lines.iter().enumerate() {
        doc.text(cx, f64::from(first + i as f32 * line_h), &title_style, line);
    }
}

fn draw_body(doc: &mut SvgDoc, s: &Scene<'_>) {
    let (options, layout, style) = (s.options, s.layout, &s.style);
    let area = s.regions.body;

    match options.text_box {
        TextBox::Solid => {
            doc.rect(area, PARCHMENT, 1.0);
        }
        TextBox::Tinted => {
            doc.rect(area, Paint::gradient("c"), 0.15);
        }
        TextBox::Plain => {}
    }

    if options.divider {
        let y = area.y0 + f64::from(DIVIDER_SHIFT);
        let inset = f64::from(layout.padding) + 20.0;
        doc.line((area.x0 + inset, y), (area.x1 - inset, y), style.accent, 3.0);
    }

    let ink = match (s.arrangement(), options.theme, options.text_box) {
        (Arrangement::TextOverPortrait, _, _) => PARCHMENT,
        (Arrangement::FullBleed, _, _) => INK,
        (_, Theme::Dark, TextBox::Plain | TextBox::Tinted) => NIGHT_INK,
        _ => INK,
    };
    let (x, anchor) = match options.align {
        TextAlign::Start => (area.x0 + f64::from(layout.padding), Anchor::Start),
        TextAlign::Middle => (area.center().x, Anchor::Middle),
    };
    let body_style = TextStyle::new(options.font, layout.body.font_size, ink)
        .italic(options.italic)
        .anchor(anchor);
    let key_color = if ink == INK { style.accent } else { style.light };
    for (i, line) in s.body.lines.iter().enumerate() {
        let y = f64::from(s.body.first_baseline + i as f32 * layout.body.line_height);
        match line {
            BodyLine::Text(text) => {
                doc.text(x, y, &body_style, text);
            }
            BodyLine::Detail(key, value) => {
                let label = format!("{key}:");
                let rest = format!(" {value}");
                doc.spans(
                    x,
                    y,
                    &body_style,
                    &[
                        Span {
                            text: &label,
                            fill: Some(key_color),
                            bold: true,
                        },
                        Span {
                            text: &rest,
                            fill: None,
                            bold: false,
                        },
                    ],
                );
            }
        }
    }
}

fn draw_footer(doc: &mut SvgDoc, s: &Scene<'_>) {
    let (options, layout) = (s.options, s.layout);
    let f = s.regions.footer;
    if options.footer != FooterMode::Band || f.height() <= 0.0 {
        return;
    }

    let look = (s.arrangement(), options.theme, options.text_box);
    let band: Option<(Paint, f32, Rgba8)> = match look {
        (Arrangement::FullBleed, _, _) => None,
        (Arrangement::TextOverPortrait, _, _)
        | (_, Theme::Dark, TextBox::Plain | TextBox::Solid) => {
            Some((NIGHT_FOOTER.into(), 1.0, NIGHT_RULE))
        }
        (_, _, TextBox::Tinted) => Some((Paint::gradient("c"), 0.3, FOOTER_RULE)),
        _ => Some((PARCHMENT_DEEP.into(), 1.0, FOOTER_RULE)),
    };
    let ink = match look {
        (Arrangement::FullBleed, _, _) => FOOTER_INK,
        (_, _, TextBox::Tinted) => TINTED_FOOTER_INK,
        (Arrangement::TextOverPortrait, _, _) | (_, Theme::Dark, _) => NIGHT_FOOTER_INK,
        _ => FOOTER_INK,
    };
    if let Some((fill, opacity, rule)) = band {
        doc.rect(f, fill, opacity)
            .line((f.x0, f.y0), (f.x1, f.y0), rule, 2.0);
    }
    let footer_style =
        TextStyle::new(options.font, layout.footer_font_size, ink).anchor(Anchor::Middle);
    let y = f.center().y as f32 + layout.footer_font_size * 0.32;
    doc.text(f.center().x, f64::from(y), &footer_style, &s.card.footer);
}

#[derive(Clone, Debug, PartialEq)]
enum BodyLine {
    Text(String),
    Detail(String, String),
}

#[derive(Clone, Debug)]
struct BodyLines {
    lines: Vec<BodyLine>,
    needed: usize,
    available: usize,
    first_baseline: f32,
}

fn icon_edge(regions: &Regions) -> f64 {
    (regions.header.height() * ICON_SCALE).round()
}

/// Portrait image rectangle: the frame band inset by `border` on every side.
fn portrait_slot(regions: &Regions, border: u32) -> Rect {
    let b = f64::from(border);
    let f = regions.portrait_frame;
    let x1 = (f.x1 - b).max(f.x0 + b);
    let y1 = (f.y1 - b).max(f.y0 + b);
    Rect::new(f.x0 + b, f.y0 + b, x1, y1)
}

fn rect_size(r: Rect) -> Size {
    Size::new(
        r.width().max(0.0).round() as u32,
        r.height().max(0.0).round() as u32,
    )
}

/// The four bands between `outer` and `inner`.
fn frame_strips(outer: Rect, inner: Rect) -> [Rect; 4] {
    [
        Rect::new(outer.x0, outer.y0, outer.x1, inner.y0),
        Rect::new(outer.x0, inner.y1, outer.x1, outer.y1),
        Rect::new(outer.x0, inner.y0, inner.x0, inner.y1),
        Rect::new(inner.x1, inner.y0, outer.x1, inner.y1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
