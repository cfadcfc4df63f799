use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::CropGravity,
        error::{CardError, CardResult},
    },
    layout::{
        config::LayoutConfig,
        regions::{Arrangement, TitlePosition},
    },
    text::measure::FontFamily,
};

/// Card background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Warm parchment gradient with dark text.
    #[default]
    Parchment,
    /// Near-black gradient with light text.
    Dark,
    /// A texture image covering the card.
    Texture,
}

/// Where the category mark goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconPlacement {
    /// An icon on each side of the title.
    #[default]
    Flanking,
    /// A labelled badge in the portrait's top-right corner.
    Badge,
    /// No category mark.
    None,
}

/// Treatment of the body region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBox {
    /// Text directly on the background.
    #[default]
    Plain,
    /// Faint category tint behind the text and footer.
    Tinted,
    /// Category color everywhere except a parchment text panel.
    Solid,
}

/// Footer caption treatment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FooterMode {
    /// Caption band at the bottom of the card.
    #[default]
    Band,
    /// No caption; its band goes to the body.
    Hidden,
    /// Translucent caption strip across the bottom of the portrait.
    OverPortrait,
}

/// Horizontal alignment of body text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Flush left at the padding.
    #[default]
    Start,
    /// Centered on the card.
    Middle,
}

/// Everything that shapes how a card is drawn, apart from its text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Region geometry and text metrics.
    pub layout: LayoutConfig,
    /// Background.
    pub theme: Theme,
    /// Inset between the portrait frame band and the portrait image.
    pub portrait_border: u32,
    /// Fill the portrait frame band with the category gradient.
    pub frame_band: bool,
    /// Width of a category-colored frame around the whole card (0 = none).
    pub full_frame: u32,
    /// Category mark placement.
    pub icons: IconPlacement,
    /// Body region treatment.
    pub text_box: TextBox,
    /// Rule between portrait and body text.
    pub divider: bool,
    /// Footer caption treatment.
    pub footer: FooterMode,
    /// Title band position.
    pub title_position: TitlePosition,
    /// How header, body and footer sit relative to the portrait.
    pub arrangement: Arrangement,
    /// Family for every text run.
    pub font: FontFamily,
    /// Body text alignment.
    pub align: TextAlign,
    /// Italic body text.
    pub italic: bool,
    /// Portrait corner radius in pixels.
    pub corner_radius: u32,
    /// Which part of the portrait survives cropping.
    pub crop: CropGravity,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::tarot(),
            theme: Theme::Parchment,
            portrait_border: 0,
            frame_band: false,
            full_frame: 0,
            icons: IconPlacement::Flanking,
            text_box: TextBox::Plain,
            divider: false,
            footer: FooterMode::Band,
            title_position: TitlePosition::Top,
            arrangement: Arrangement::Stacked,
            font: FontFamily::Serif,
            align: TextAlign::Start,
            italic: false,
            corner_radius: 0,
            crop: CropGravity::Center,
        }
    }
}

impl RenderOptions {
    /// Defaults on a given layout.
    pub fn with_layout(layout: LayoutConfig) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }
}

/// One named rendering configuration in a comparison run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSpec {
    /// File stem of the output PNG, e.g. `01-border-40px`.
    pub id: String,
    /// One-line summary shown in the gallery.
    pub description: String,
    /// How to draw it.
    #[serde(default)]
    pub options: RenderOptions,
}

impl VariantSpec {
    /// Output file name.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.id)
    }

    /// Heading derived from the id: leading number dropped, dashes to spaces.
    pub fn title(&self) -> String {
        let spaced = self.id.replace('-', " ");
        match spaced.split_once(' ') {
            Some((head, rest)) if head.chars().all(|c| c.is_ascii_digit()) => rest.to_owned(),
            _ => spaced,
        }
    }
}

/// A JSON list of variants, as accepted by `cardgen variants --spec`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantFile {
    /// Variants in render order.
    pub variants: Vec<VariantSpec>,
}

impl VariantFile {
    /// Load and validate a variant file.
    pub fn load(path: &Path) -> CardResult<Vec<VariantSpec>> {
        if !path.is_file() {
            return Err(CardError::missing_input(format!(
                "variant file '{}'",
                path.display()
            )));
        }
        let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
        let file: VariantFile = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| CardError::serde(format!("parse variants '{}': {e}", path.display())))?;
        validate_variants(&file.variants)?;
        Ok(file.variants)
    }
}

/// Ids must be usable file stems and unique.
pub fn validate_variants(variants: &[VariantSpec]) -> CardResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for v in variants {
        let ok = !v.id.is_empty()
            && v.id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !ok {
            return Err(CardError::validation(format!(
                "variant id \"{}\" must be non-empty ascii letters, digits, '-' or '_'",
                v.id
            )));
        }
        if !seen.insert(v.id.as_str()) {
            return Err(CardError::validation(format!("duplicate variant id \"{}\"", v.id)));
        }
        v.options.layout.validate()?;
    }
    Ok(())
}

/// A card size and portrait pairing whose crop and text capacity get compared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeStudy {
    /// File stem of the output PNG.
    pub id: String,
    /// Human label.
    pub label: String,
    /// Card geometry.
    pub layout: LayoutConfig,
    /// Portrait file, relative to the output directory.
    pub portrait: PathBuf,
    /// Crop gravity for the portrait.
    pub crop: CropGravity,
}

impl SizeStudy {
    /// Output file name.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.id)
    }

    /// Render options for this study.
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            crop: self.crop,
            ..RenderOptions::with_layout(self.layout.clone())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/variants/spec.rs"]
mod tests;
