use std::fmt::Write as _;

use crate::{
    foundation::core::{Rect, Rgba8, Size},
    text::measure::{FontFamily, FontSpec},
};

/// Escape text for use in SVG character data and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Fill for shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Flat color; alpha becomes `fill-opacity`.
    Color(Rgba8),
    /// Reference to a gradient declared with [`SvgDoc::linear_gradient`].
    Gradient(String),
}

impl Paint {
    /// Reference a gradient by id.
    pub fn gradient(id: &str) -> Self {
        Paint::Gradient(id.to_owned())
    }

    fn write_attrs(&self, out: &mut String, attr: &str) {
        match self {
            Paint::Color(c) => {
                let _ = write!(out, r#" {attr}="{}""#, c.to_hex());
                if c.a != 255 {
                    let _ = write!(out, r#" {attr}-opacity="{}""#, fmt_num(c.opacity()));
                }
            }
            Paint::Gradient(id) => {
                let _ = write!(out, r#" {attr}="url(#{})""#, escape_xml(id));
            }
        }
    }
}

impl From<Rgba8> for Paint {
    fn from(c: Rgba8) -> Self {
        Paint::Color(c)
    }
}

/// Horizontal anchoring of a text run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Left edge at `x`.
    #[default]
    Start,
    /// Centered on `x`.
    Middle,
    /// Right edge at `x`.
    End,
}

impl Anchor {
    fn css(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Presentation attributes for a `<text>` element.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Face selection.
    pub font: FontSpec,
    /// Font size in pixels.
    pub size: f32,
    /// Text color.
    pub fill: Rgba8,
    /// Horizontal anchoring.
    pub anchor: Anchor,
    /// Extra spacing between letters, in pixels.
    pub letter_spacing: Option<f32>,
}

impl TextStyle {
    /// Regular upright text with start anchoring.
    pub fn new(family: FontFamily, size: f32, fill: Rgba8) -> Self {
        Self {
            font: FontSpec::regular(family),
            size,
            fill,
            anchor: Anchor::Start,
            letter_spacing: None,
        }
    }

    /// Bold variant.
    pub fn bold(mut self) -> Self {
        self.font.bold = true;
        self
    }

    /// Italic variant.
    pub fn italic(mut self, on: bool) -> Self {
        self.font.italic = on;
        self
    }

    /// Anchoring override.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn write_attrs(&self, out: &mut String) {
        let _ = write!(
            out,
            r#" font-family="{}" font-size="{}""#,
            self.font.family.css(),
            fmt_num(self.size)
        );
        if self.font.bold {
            out.push_str(r#" font-weight="bold""#);
        }
        if self.font.italic {
            out.push_str(r#" font-style="italic""#);
        }
        Paint::Color(self.fill).write_attrs(out, "fill");
        if self.anchor != Anchor::Start {
            let _ = write!(out, r#" text-anchor="{}""#, self.anchor.css());
        }
        if let Some(ls) = self.letter_spacing {
            let _ = write!(out, r#" letter-spacing="{}""#, fmt_num(ls));
        }
    }
}

/// A styled piece of a multi-run text line.
#[derive(Clone, Debug, PartialEq)]
pub struct Span<'a> {
    /// Raw (unescaped) text.
    pub text: &'a str,
    /// Color override.
    pub fill: Option<Rgba8>,
    /// Bold override.
    pub bold: bool,
}

/// Incremental writer for a single SVG document.
///
/// Every method appends one element in paint order. Text passed in is raw; escaping happens
/// here so callers can measure and wrap the same strings they hand over.
#[derive(Clone, Debug)]
pub struct SvgDoc {
    size: Size,
    defs: String,
    body: String,
}

impl SvgDoc {
    /// Empty document with the given pixel size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            defs: String::new(),
            body: String::new(),
        }
    }

    /// Document size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Declare a top-left to bottom-right linear gradient.
    pub fn linear_gradient(&mut self, id: &str, from: Rgba8, to: Rgba8) -> &mut Self {
        self.gradient(id, "100%", &[(0.0, from), (1.0, to)])
    }

    /// Top-to-bottom gradient through `stops` (offset in `0..=1`, color).
    pub fn vertical_gradient(&mut self, id: &str, stops: &[(f32, Rgba8)]) -> &mut Self {
        self.gradient(id, "0%", stops)
    }

    fn gradient(&mut self, id: &str, x2: &str, stops: &[(f32, Rgba8)]) -> &mut Self {
        let _ = write!(
            self.defs,
            r#"<linearGradient id="{}" x1="0%" y1="0%" x2="{x2}" y2="100%">"#,
            escape_xml(id)
        );
        for &(offset, stop) in stops {
            let _ = write!(
                self.defs,
                r#"<stop offset="{}%" stop-color="{}""#,
                fmt_num(offset.clamp(0.0, 1.0) * 100.0),
                stop.to_hex()
            );
            if stop.a != 255 {
                let _ = write!(self.defs, r#" stop-opacity="{}""#, fmt_num(stop.opacity()));
            }
            self.defs.push_str("/>");
        }
        self.defs.push_str("</linearGradient>");
        self
    }

    /// Axis-aligned rectangle.
    pub fn rect(&mut self, rect: Rect, fill: impl Into<Paint>, opacity: f32) -> &mut Self {
        self.rounded_rect(rect, 0.0, fill, opacity)
    }

    /// Rectangle with rounded corners of radius `rx`.
    pub fn rounded_rect(
        &mut self,
        rect: Rect,
        rx: f64,
        fill: impl Into<Paint>,
        opacity: f32,
    ) -> &mut Self {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return self;
        }
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            fmt_num(rect.x0),
            fmt_num(rect.y0),
            fmt_num(rect.width()),
            fmt_num(rect.height())
        );
        if rx > 0.0 {
            let _ = write!(self.body, r#" rx="{}""#, fmt_num(rx));
        }
        fill.into().write_attrs(&mut self.body, "fill");
        if opacity < 1.0 {
            let _ = write!(self.body, r#" opacity="{}""#, fmt_num(opacity.max(0.0)));
        }
        self.body.push_str("/>");
        self
    }

    /// Straight stroked line.
    pub fn line(
        &mut self,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        stroke: Rgba8,
        width: f32,
    ) -> &mut Self {
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2)
        );
        Paint::Color(stroke).write_attrs(&mut self.body, "stroke");
        let _ = write!(self.body, r#" stroke-width="{}"/>"#, fmt_num(width));
        self
    }

    /// One line of text with its baseline at `y`.
    pub fn text(&mut self, x: f64, y: f64, style: &TextStyle, text: &str) -> &mut Self {
        self.spans(
            x,
            y,
            style,
            &[Span {
                text,
                fill: None,
                bold: false,
            }],
        )
    }

    /// One line made of differently styled runs.
    pub fn spans(&mut self, x: f64, y: f64, style: &TextStyle, spans: &[Span<'_>]) -> &mut Self {
        if spans.iter().all(|s| s.text.is_empty()) {
            return self;
        }
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}""#,
            fmt_num(x),
            fmt_num(y)
        );
        style.write_attrs(&mut self.body);
        self.body.push_str(r#" xml:space="preserve">"#);
        for span in spans {
            if span.fill.is_none() && !span.bold {
                self.body.push_str(&escape_xml(span.text));
                continue;
            }
            self.body.push_str("<tspan");
            if let Some(fill) = span.fill {
                Paint::Color(fill).write_attrs(&mut self.body, "fill");
            }
            if span.bold {
                self.body.push_str(r#" font-weight="bold""#);
            }
            let _ = write!(self.body, ">{}</tspan>", escape_xml(span.text));
        }
        self.body.push_str("</text>");
        self
    }

    /// Icon markup authored in a 24x24 box, placed at `(x, y)` and scaled to `size` pixels.
    pub fn icon(&mut self, markup: &str, x: f64, y: f64, size: f64, fill: Rgba8) -> &mut Self {
        let _ = write!(
            self.body,
            r#"<g transform="translate({}, {}) scale({})""#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(size / 24.0)
        );
        Paint::Color(fill).write_attrs(&mut self.body, "fill");
        let _ = write!(self.body, ">{markup}</g>");
        self
    }

    /// Append trusted markup verbatim.
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.body.push_str(markup);
        self
    }

    /// Serialize the document.
    pub fn finish(&self) -> String {
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 160);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.size.width,
            h = self.size.height
        );
        if !self.defs.is_empty() {
            let _ = write!(out, "<defs>{}</defs>", self.defs);
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }
}

/// Compact number formatting for attributes: integers without a fraction, others rounded to
/// two decimals.
fn fmt_num(v: impl Into<f64>) -> String {
    let v: f64 = v.into();
    if !v.is_finite() {
        return "0".to_owned();
    }
    let r = (v * 100.0).round() / 100.0;
    if r.fract() == 0.0 {
        format!("{}", r as i64)
    } else {
        let s = format!("{r:.2}");
        s.trim_end_matches('0').to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/doc.rs"]
mod tests;
