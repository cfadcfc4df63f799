use serde::Serialize;

use crate::model::category::{Category, TextureStyle};

/// Appended to category/style texture prompts.
pub const TILEABLE_SUFFIX: &str =
    "seamless tileable texture, high detail, no text, no symbols, abstract background pattern";
/// Appended to every texture prompt, custom ones included.
pub const QUALITY_SUFFIX: &str = "4k quality, photorealistic texture detail";

/// Framing shared by the art-style portraits.
pub const PORTRAIT_FRAMING: &str = "head and shoulders portrait, centered composition, facing slightly left";
/// Subject shared by the art-style portraits.
pub const PORTRAIT_SUBJECT: &str =
    "gnome inventor with brass goggles, wild white hair, soot-stained cheeks, cheerful expression";

/// Full texture prompt.
///
/// A `custom` prompt replaces the category and style parts but still gets the quality
/// suffix. Without a `style` the category default is used.
pub fn texture_prompt(
    category: Category,
    style: Option<TextureStyle>,
    custom: Option<&str>,
) -> String {
    let base = match custom.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.to_owned(),
        None => {
            let cs = category.style();
            let style = style.unwrap_or(cs.default_texture);
            format!(
                "{}, {}, {TILEABLE_SUFFIX}",
                cs.texture_prompt,
                style.description()
            )
        }
    };
    format!("{base}, {QUALITY_SUFFIX}")
}

/// A portrait art style offered for comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ArtStyle {
    /// File-safe id; the PNGs are `style-<id>.png` and `card-<id>.png`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Style half of the prompt.
    pub style: &'static str,
}

impl ArtStyle {
    /// Prompt: framing, subject, style.
    pub fn prompt(&self) -> String {
        format!("{PORTRAIT_FRAMING}, {PORTRAIT_SUBJECT}, {}", self.style)
    }

    /// Output file name.
    pub fn file_name(&self) -> String {
        format!("style-{}.png", self.id)
    }

    /// File name of the complete card drawn with this style's portrait.
    pub fn card_file_name(&self) -> String {
        format!("card-{}.png", self.id)
    }
}

/// The eight portrait styles.
pub static ART_STYLES: [ArtStyle; 8] = [
    ArtStyle {
        id: "classic-dnd",
        name: "Classic D&D Illustration",
        style: "in the style of Larry Elmore and Jeff Easley, 1980s fantasy illustration, detailed realistic painting, warm colors",
    },
    ArtStyle {
        id: "oil-painting",
        name: "Oil Painting",
        style: "oil painting, visible brushstrokes, rich colors, classical portrait technique, museum quality",
    },
    ArtStyle {
        id: "watercolor",
        name: "Watercolor",
        style: "watercolor painting, soft edges, flowing colors, delicate washes, fantasy book illustration",
    },
    ArtStyle {
        id: "ink-wash",
        name: "Ink and Wash",
        style: "ink drawing with watercolor wash, pen and ink linework, subtle color, storybook illustration",
    },
    ArtStyle {
        id: "digital-painterly",
        name: "Digital Painterly",
        style: "digital painting, painterly style, soft lighting, fantasy concept art, artstation quality",
    },
    ArtStyle {
        id: "storybook",
        name: "Storybook Illustration",
        style: "childrens book illustration, whimsical, warm and inviting, soft lighting, Brian Froud inspired",
    },
    ArtStyle {
        id: "graphic-novel",
        name: "Graphic Novel",
        style: "graphic novel art, bold lines, flat colors, comic book style, dynamic illustration",
    },
    ArtStyle {
        id: "renaissance",
        name: "Renaissance Portrait",
        style: "renaissance portrait painting, chiaroscuro lighting, dark background, classical composition, old master style",
    },
];

/// Look up an art style by id.
pub fn art_style(id: &str) -> Option<&'static ArtStyle> {
    ART_STYLES.iter().find(|s| s.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
#[path = "../../tests/unit/imagegen/prompts.rs"]
mod tests;
