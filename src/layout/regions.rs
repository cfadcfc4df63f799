use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Rect, Size},
        error::{CardError, CardResult},
    },
    layout::config::LayoutConfig,
};

/// Where the title band sits relative to the portrait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePosition {
    /// Header band at the top of the card.
    #[default]
    Top,
    /// Portrait first, title band right below it.
    BelowPortrait,
}

/// How the header, body and footer relate to the portrait.
///
/// Every arrangement except [`Arrangement::Stacked`] ignores [`TitlePosition`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Header, portrait, body and footer as separate bands.
    #[default]
    Stacked,
    /// Body text over the bottom of the portrait on a dark fade.
    TextOverPortrait,
    /// Portrait from the top edge with the title on a dark strip across its bottom.
    NameOverPortrait,
    /// Thin accent bar above the portrait, title on the background below it.
    AccentBar,
    /// Portrait covers the card; header, body and footer float in a box over it.
    FullBleed,
}

impl Arrangement {
    /// Whether the title band is drawn on top of the portrait.
    pub fn header_over_portrait(self) -> bool {
        matches!(self, Self::NameOverPortrait | Self::FullBleed)
    }

    /// Whether body text is drawn on top of the portrait.
    pub fn body_over_portrait(self) -> bool {
        matches!(self, Self::TextOverPortrait | Self::FullBleed)
    }

    /// Whether the footer is drawn on top of the portrait.
    pub fn footer_over_portrait(self) -> bool {
        self == Self::FullBleed
    }
}

/// Share of the portrait height covered by the text fade.
pub const TEXT_FADE_FRACTION: f64 = 0.25;
/// Height of the accent bar above the portrait.
pub const ACCENT_BAR_HEIGHT: f64 = 8.0;
/// Gap between the floating box and the card edge.
pub const FLOAT_MARGIN: f64 = 30.0;

/// Card regions in card pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Regions {
    /// Whole card.
    pub card: Rect,
    /// Card minus the full-card frame.
    pub content: Rect,
    /// Title band.
    pub header: Rect,
    /// Band holding the portrait (before any inset border).
    pub portrait_frame: Rect,
    /// Description text area.
    pub body: Rect,
    /// Caption band.
    pub footer: Rect,
}

impl Regions {
    /// Lay out `layout` inside a frame of `frame` pixels on every side.
    pub fn compute(layout: &LayoutConfig, position: TitlePosition, frame: u32) -> CardResult<Self> {
        layout.validate()?;

        let w = f64::from(layout.size.width);
        let h = f64::from(layout.size.height);
        let b = f64::from(frame);
        let card = Rect::new(0.0, 0.0, w, h);
        let content = Rect::new(b, b, w - b, h - b);
        if content.width() <= 0.0 || content.height() <= 0.0 {
            return Err(CardError::validation(format!(
                "frame of {frame}px leaves no room on a {}x{} card",
                layout.size.width, layout.size.height
            )));
        }

        let header_h = f64::from(layout.header_height);
        let portrait_h = f64::from(layout.portrait_height);
        let footer_h = f64::from(layout.footer_height);

        let (header, portrait_frame) = match position {
            TitlePosition::Top => {
                let header = band(content, content.y0, header_h);
                let portrait = band(content, header.y1, portrait_h);
                (header, portrait)
            }
            TitlePosition::BelowPortrait => {
                let portrait = band(content, content.y0, portrait_h);
                let header = band(content, portrait.y1, header_h);
                (header, portrait)
            }
        };
        let body_top = header.y1.max(portrait_frame.y1);
        let footer = band(content, content.y1 - footer_h, footer_h);
        let body = Rect::new(content.x0, body_top, content.x1, footer.y0);

        let regions = Self {
            card,
            content,
            header,
            portrait_frame,
            body,
            footer,
        };
        regions.validate()?;
        Ok(regions)
    }

    /// [`Regions::compute`] followed by the re-mapping `arrangement` asks for.
    ///
    /// Overlap is checked on the stacked bands; arrangements then move regions over the
    /// portrait on purpose.
    pub fn compute_arranged(
        layout: &LayoutConfig,
        position: TitlePosition,
        arrangement: Arrangement,
        frame: u32,
    ) -> CardResult<Self> {
        let position = match arrangement {
            Arrangement::Stacked => position,
            Arrangement::AccentBar => TitlePosition::BelowPortrait,
            _ => TitlePosition::Top,
        };
        let stacked = Self::compute(layout, position, frame)?;
        Ok(stacked.arrange(arrangement))
    }

    fn arrange(self, arrangement: Arrangement) -> Self {
        let c = self.content;
        match arrangement {
            Arrangement::Stacked => self,
            Arrangement::TextOverPortrait => {
                let frame = self.portrait_frame;
                let fade = (frame.height() * TEXT_FADE_FRACTION).round();
                Self {
                    body: Rect::new(c.x0, frame.y1 - fade, c.x1, self.footer.y0),
                    ..self
                }
            }
            Arrangement::NameOverPortrait => {
                let portrait = Rect::new(c.x0, c.y0, c.x1, self.portrait_frame.y1);
                let strip = self.header.height();
                Self {
                    header: Rect::new(c.x0, portrait.y1 - strip, c.x1, portrait.y1),
                    portrait_frame: portrait,
                    ..self
                }
            }
            Arrangement::AccentBar => {
                let frame = self.portrait_frame;
                let top = (frame.y0 + ACCENT_BAR_HEIGHT).min(frame.y1);
                Self {
                    portrait_frame: Rect::new(frame.x0, top, frame.x1, frame.y1),
                    ..self
                }
            }
            Arrangement::FullBleed => {
                let stacked_box =
                    self.header.height() + self.body.height() + self.footer.height();
                let box_h = stacked_box.min((c.height() - 2.0 * FLOAT_MARGIN).max(0.0));
                let x0 = c.x0 + FLOAT_MARGIN;
                let x1 = (c.x1 - FLOAT_MARGIN).max(x0);
                let y1 = c.y1 - FLOAT_MARGIN;
                let y0 = (y1 - box_h).max(c.y0);
                let header_y1 = (y0 + self.header.height()).min(y1);
                let footer_y0 = (y1 - self.footer.height()).max(header_y1);
                Self {
                    header: Rect::new(x0, y0, x1, header_y1),
                    portrait_frame: c,
                    body: Rect::new(x0, header_y1, x1, footer_y0),
                    footer: Rect::new(x0, footer_y0, x1, y1),
                    ..self
                }
            }
        }
    }

    /// Area of the floating box (header through footer) in the full-bleed arrangement.
    pub fn float_box(&self) -> Rect {
        Rect::new(self.header.x0, self.header.y0, self.header.x1, self.footer.y1)
    }

    /// Body height in whole pixels (zero when collapsed).
    pub fn body_height(&self) -> u32 {
        self.body.height().max(0.0).round() as u32
    }

    /// Check that no region has a negative size and no two regions overlap.
    pub fn validate(&self) -> CardResult<()> {
        let named = [
            ("header", self.header),
            ("portrait", self.portrait_frame),
            ("body", self.body),
            ("footer", self.footer),
        ];
        for (name, r) in named {
            if r.width() < 0.0 || r.height() < 0.0 {
                return Err(CardError::validation(format!(
                    "{name} region has negative size {}x{}",
                    r.width(),
                    r.height()
                )));
            }
            if r.y0 < self.content.y0 || r.y1 > self.content.y1 {
                return Err(CardError::validation(format!(
                    "{name} region spills outside the card"
                )));
            }
        }
        for (i, (a_name, a)) in named.iter().enumerate() {
            for (b_name, b) in &named[i + 1..] {
                if a.intersect(*b).area() > 0.0 {
                    return Err(CardError::validation(format!(
                        "{a_name} and {b_name} regions overlap"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn band(content: Rect, y: f64, height: f64) -> Rect {
    Rect::new(content.x0, y, content.x1, y + height)
}

/// How a cover-resized portrait loses pixels when fitted to a region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CropStats {
    /// Image height after scaling to the region width.
    pub scaled_height: u32,
    /// Pixels cut from that height.
    pub crop_px: u32,
    /// `crop_px` as a percentage of `scaled_height`.
    pub crop_percent: f32,
    /// Height of the body region.
    pub body_height: u32,
    /// Body lines that fit.
    pub lines_available: usize,
}

impl CropStats {
    /// Statistics for an `image` fitted to the portrait region of `layout`.
    pub fn compute(image: Size, layout: &LayoutConfig) -> CardResult<Self> {
        if image.is_empty() {
            return Err(CardError::validation("portrait image has no pixels"));
        }
        let scaled = f64::from(image.height) * f64::from(layout.size.width)
            / f64::from(image.width);
        let scaled_height = scaled.round() as u32;
        let crop_px = scaled_height.saturating_sub(layout.portrait_height);
        let crop_percent = if scaled_height == 0 {
            0.0
        } else {
            (f64::from(crop_px) / f64::from(scaled_height) * 100.0) as f32
        };
        Ok(Self {
            scaled_height,
            crop_px,
            crop_percent,
            body_height: layout.body_height().max(0) as u32,
            lines_available: layout.lines_available(),
        })
    }
}
