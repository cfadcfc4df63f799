use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::Size,
        error::{CardError, CardResult},
    },
    text::fit::TitleFitOpts,
};

/// Body text settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyText {
    /// Font size in pixels.
    pub font_size: f32,
    /// Distance between baselines in pixels.
    pub line_height: f32,
    /// Baseline of the first line, measured from the top of the body region.
    pub top_offset: f32,
    /// Character budget per line. `None` wraps by measured width inside the padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,
}

/// Title settings for the header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleText {
    /// Candidate font sizes, largest first.
    pub sizes: Vec<f32>,
    /// Line height as a multiple of the font size.
    #[serde(default = "default_title_line_height")]
    pub line_height: f32,
}

fn default_title_line_height() -> f32 {
    1.1
}

/// Pixel geometry of a card.
///
/// Regions stack top to bottom: header, portrait frame, body, footer. The body takes whatever
/// height is left, so [`LayoutConfig::validate`] rejects configurations where the fixed
/// regions do not fit the card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Card size in pixels.
    pub size: Size,
    /// Header band height.
    pub header_height: u32,
    /// Portrait frame height.
    pub portrait_height: u32,
    /// Footer band height.
    pub footer_height: u32,
    /// Horizontal padding of body text.
    pub padding: u32,
    /// Body text settings.
    pub body: BodyText,
    /// Footer caption size in pixels.
    pub footer_font_size: f32,
    /// Title settings.
    pub title: TitleText,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::tarot()
    }
}

impl LayoutConfig {
    /// Tarot stock (827x1417).
    pub fn tarot() -> Self {
        Self {
            size: Size::TAROT,
            header_height: 90,
            portrait_height: 827,
            footer_height: 40,
            padding: 40,
            body: BodyText {
                font_size: 28.0,
                line_height: 36.0,
                top_offset: 44.0,
                max_chars: Some(46),
            },
            footer_font_size: 22.0,
            title: TitleText {
                sizes: vec![52.0, 42.0, 34.0, 28.0],
                line_height: default_title_line_height(),
            },
        }
    }

    /// Poker stock (750x1050).
    pub fn poker() -> Self {
        Self {
            size: Size::POKER,
            header_height: 80,
            portrait_height: 750,
            footer_height: 36,
            padding: 36,
            body: BodyText {
                font_size: 28.0,
                line_height: 34.0,
                top_offset: 36.0,
                max_chars: Some(42),
            },
            footer_font_size: 20.0,
            title: TitleText {
                sizes: vec![46.0, 38.0, 30.0, 24.0],
                line_height: default_title_line_height(),
            },
        }
    }

    /// Preset by name (`tarot` or `poker`).
    pub fn preset(name: &str) -> CardResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tarot" => Ok(Self::tarot()),
            "poker" => Ok(Self::poker()),
            other => Err(CardError::validation(format!(
                "unknown layout preset \"{other}\" (expected tarot or poker)"
            ))),
        }
    }

    /// Load a layout from a JSON file and validate it.
    pub fn load(path: &Path) -> CardResult<Self> {
        if !path.is_file() {
            return Err(CardError::missing_input(format!(
                "layout file '{}'",
                path.display()
            )));
        }
        let f = File::open(path).with_context(|| format!("open layout '{}'", path.display()))?;
        let layout: LayoutConfig = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| CardError::serde(format!("parse layout '{}': {e}", path.display())))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Body region height. Negative when the fixed regions overflow the card.
    pub fn body_height(&self) -> i64 {
        i64::from(self.size.height)
            - i64::from(self.header_height)
            - i64::from(self.portrait_height)
            - i64::from(self.footer_height)
    }

    /// How many body lines fit below the top offset.
    pub fn lines_available(&self) -> usize {
        self.lines_available_with_offset(self.body.top_offset)
    }

    /// [`LayoutConfig::lines_available`] with an explicit first-baseline offset.
    pub fn lines_available_with_offset(&self, top_offset: f32) -> usize {
        lines_that_fit(self.body_height() as f32, top_offset, self.body.line_height)
    }

    /// Title constraints for a header of `max_width` pixels of free width.
    pub fn title_fit(&self, max_width: f32) -> TitleFitOpts {
        TitleFitOpts {
            sizes: self.title.sizes.clone(),
            max_width,
            max_height: self.header_height.saturating_sub(8) as f32,
            line_height: self.title.line_height,
        }
    }

    /// Reject layouts whose regions would overlap or have non-positive sizes.
    pub fn validate(&self) -> CardResult<()> {
        if self.size.is_empty() {
            return Err(CardError::validation("card size must be non-zero"));
        }
        if self.body_height() < 0 {
            return Err(CardError::validation(format!(
                "regions overlap: header {} + portrait {} + footer {} exceed card height {}",
                self.header_height, self.portrait_height, self.footer_height, self.size.height
            )));
        }
        if u64::from(self.padding) * 2 >= u64::from(self.size.width) {
            return Err(CardError::validation(format!(
                "padding {} leaves no room for text on a {}px wide card",
                self.padding, self.size.width
            )));
        }
        if !(self.body.font_size > 0.0 && self.body.line_height > 0.0) {
            return Err(CardError::validation(
                "body font size and line height must be positive",
            ));
        }
        if self.body.top_offset < 0.0 {
            return Err(CardError::validation("body top offset must not be negative"));
        }
        if self.body.max_chars == Some(0) {
            return Err(CardError::validation("body max_chars must be positive"));
        }
        if self.footer_font_size <= 0.0 || self.title.line_height <= 0.0 {
            return Err(CardError::validation(
                "footer font size and title line height must be positive",
            ));
        }
        if self.title.sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(CardError::validation("title sizes must be positive"));
        }
        Ok(())
    }
}

/// Whole lines of `line_height` that fit in `body_height` below a first baseline at
/// `top_offset`.
pub fn lines_that_fit(body_height: f32, top_offset: f32, line_height: f32) -> usize {
    let free = body_height - top_offset;
    if free <= 0.0 || line_height <= 0.0 {
        return 0;
    }
    (free / line_height).floor() as usize
}
