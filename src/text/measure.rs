use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::svg::doc::escape_xml;

/// Width of a run of text at a given font size.
///
/// Units are whatever the caller budgets in: pixels for shaped/approximate measures,
/// characters for [`CharCount`]. Implementations must be monotone: adding characters or
/// growing the font size never shrinks the result.
pub trait TextMeasure {
    /// Width of `text` rendered at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32) -> f32,
{
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}

/// Character-count budget. Ignores font size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharCount;

impl TextMeasure for CharCount {
    fn measure(&self, text: &str, _font_size: f32) -> f32 {
        text.chars().count() as f32
    }
}

/// Generic font family used in the SVG overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    /// `serif`
    #[default]
    Serif,
    /// `sans-serif`
    SansSerif,
}

impl FontFamily {
    /// CSS generic family name.
    pub fn css(self) -> &'static str {
        match self {
            FontFamily::Serif => "serif",
            FontFamily::SansSerif => "sans-serif",
        }
    }
}

/// Face selection for a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Generic family.
    pub family: FontFamily,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

impl FontSpec {
    /// Regular weight, upright.
    pub fn regular(family: FontFamily) -> Self {
        Self {
            family,
            bold: false,
            italic: false,
        }
    }

    /// Bold weight, upright.
    pub fn bold(family: FontFamily) -> Self {
        Self {
            family,
            bold: true,
            italic: false,
        }
    }
}

/// Font-free width estimate from a per-character advance table (em units).
///
/// Deterministic on every machine, so it is what tests and font-less environments use.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApproxGlyphs {
    /// Face the estimate is tuned for.
    pub font: FontSpec,
}

impl ApproxGlyphs {
    /// Estimate for the given face.
    pub fn new(font: FontSpec) -> Self {
        Self { font }
    }

    fn advance_em(c: char) -> f32 {
        match c {
            ' ' => 0.25,
            'i' | 'j' | 'l' | '\'' | '.' | ',' | ';' | ':' | '!' | '|' => 0.28,
            'f' | 't' | 'r' | 'I' | '-' | '(' | ')' => 0.35,
            'm' | 'w' => 0.78,
            'M' | 'W' => 0.9,
            c if c.is_ascii_uppercase() => 0.68,
            c if c.is_ascii_digit() => 0.5,
            c if c.is_ascii_lowercase() => 0.5,
            '\u{2026}' => 1.0,
            _ => 0.6,
        }
    }
}

impl TextMeasure for ApproxGlyphs {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let mut em: f32 = text.chars().map(Self::advance_em).sum();
        if self.font.bold {
            em *= 1.07;
        }
        if self.font.family == FontFamily::SansSerif {
            em *= 1.03;
        }
        em * font_size
    }
}

/// Measures text by shaping it with usvg against a font database.
///
/// Falls back to [`ApproxGlyphs`] when no face in the database resolves for the run.
#[derive(Clone)]
pub struct FontMeasure {
    fontdb: Arc<usvg::fontdb::Database>,
    font: FontSpec,
    fallback: ApproxGlyphs,
}

impl std::fmt::Debug for FontMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMeasure")
            .field("faces", &self.fontdb.len())
            .field("font", &self.font)
            .finish()
    }
}

impl FontMeasure {
    /// Measure with `font` against the faces in `fontdb`.
    pub fn new(fontdb: Arc<usvg::fontdb::Database>, font: FontSpec) -> Self {
        Self {
            fontdb,
            font,
            fallback: ApproxGlyphs::new(font),
        }
    }

    fn shaped_width(&self, text: &str, font_size: f32) -> Option<f32> {
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="16384" height="{h}"><text x="0" y="{y}" font-family="{family}" font-size="{font_size}" font-weight="{weight}" font-style="{style}" xml:space="preserve">{text}</text></svg>"#,
            h = (font_size * 2.0).ceil().max(1.0),
            y = font_size,
            family = self.font.family.css(),
            weight = if self.font.bold { "bold" } else { "normal" },
            style = if self.font.italic { "italic" } else { "normal" },
            text = escape_xml(text),
        );
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).ok()?;
        if !tree.root().has_children() {
            return None;
        }
        width_from_origin(tree.root().bounding_box())
    }
}

/// Extent from the text origin (x = 0) to the right edge of the ink, so side bearings of the
/// first glyph count toward the width.
fn width_from_origin(bbox: usvg::Rect) -> Option<f32> {
    let right = bbox.right();
    right.is_finite().then_some(right.max(0.0))
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        if text.trim().is_empty() {
            return self.fallback.measure(text, font_size);
        }
        match self.shaped_width(text, font_size) {
            Some(w) => w,
            None => {
                tracing::debug!(text, "no font face resolved, using approximate widths");
                self.fallback.measure(text, font_size)
            }
        }
    }
}

/// How card text is measured for wrapping and title fitting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureMode {
    /// Shape with system fonts (falls back to approximate widths per run).
    #[default]
    Font,
    /// Font-free approximate widths.
    Approx,
}

/// Builds measures for the faces a card uses.
#[derive(Clone, Debug)]
pub enum Measurer {
    /// Shaped measures backed by a font database.
    Font(Arc<usvg::fontdb::Database>),
    /// Approximate measures.
    Approx,
}

impl Measurer {
    /// Measurer for `mode`, using `fontdb` when shaping.
    pub fn for_mode(mode: MeasureMode, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        match mode {
            MeasureMode::Font => Measurer::Font(fontdb),
            MeasureMode::Approx => Measurer::Approx,
        }
    }

    /// Measure for one face.
    pub fn face(&self, font: FontSpec) -> Box<dyn TextMeasure> {
        match self {
            Measurer::Font(db) => Box::new(FontMeasure::new(db.clone(), font)),
            Measurer::Approx => Box::new(ApproxGlyphs::new(font)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
