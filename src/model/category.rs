use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgba8,
    error::{CardError, CardResult},
};

/// Kind of game entity a card describes. Drives colors, icon and texture prompts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Non-player character.
    #[default]
    Npc,
    /// Place or landmark.
    Location,
    /// Object, weapon, artifact.
    Item,
    /// Organization or allegiance.
    Faction,
    /// Hook, task or objective.
    Quest,
    /// Unknowns and secrets.
    Mystery,
}

/// Immutable per-category styling, returned by [`Category::style`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Primary category color (header gradient start, frame band).
    pub accent: Rgba8,
    /// Lighter companion color (gradient end, highlights).
    pub light: Rgba8,
    /// Darker companion color (minimal-title text, dark backgrounds).
    pub dark: Rgba8,
    /// Icon markup drawn in a 24x24 box.
    pub icon: &'static str,
    /// Upper-case label used by badges.
    pub label: &'static str,
    /// Subject half of the texture generation prompt.
    pub texture_prompt: &'static str,
    /// Texture style used when none is requested.
    pub default_texture: TextureStyle,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Npc,
        Category::Location,
        Category::Item,
        Category::Faction,
        Category::Quest,
        Category::Mystery,
    ];

    /// Lower-case name used in files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Category::Npc => "npc",
            Category::Location => "location",
            Category::Item => "item",
            Category::Faction => "faction",
            Category::Quest => "quest",
            Category::Mystery => "mystery",
        }
    }

    /// Parse a category name, falling back to [`Category::Npc`] for unknown values.
    pub fn from_name_lossy(name: &str) -> Category {
        match name.parse() {
            Ok(c) => c,
            Err(_) => {
                tracing::warn!(category = name, "unknown category, using npc");
                Category::default()
            }
        }
    }

    /// Styling for this category.
    pub fn style(self) -> CategoryStyle {
        match self {
            Category::Npc => CategoryStyle {
                accent: Rgba8::rgb(0x8b, 0x45, 0x13),
                light: Rgba8::rgb(0xd2, 0x69, 0x1e),
                dark: Rgba8::rgb(0x5d, 0x2e, 0x0c),
                icon: r#"<circle cx="12" cy="8" r="5"/><path d="M4 22c0-6 4-9 8-9s8 3 8 9"/>"#,
                label: "NPC",
                texture_prompt: "extreme close-up macro photograph of brown leather surface, studio product photography, soft diffused lighting, warm cognac tones, visible natural grain, full frame composition filling entire image, 8k texture detail",
                default_texture: TextureStyle::Leather,
            },
            Category::Location => CategoryStyle {
                accent: Rgba8::rgb(0x2e, 0x8b, 0x57),
                light: Rgba8::rgb(0x3c, 0xb3, 0x71),
                dark: Rgba8::rgb(0x1d, 0x5a, 0x38),
                icon: r#"<path d="M4 22V10l8-8 8 8v12H4zm6-8h4v8h-4z"/>"#,
                label: "LOCATION",
                texture_prompt: "aged green-tinted parchment texture, weathered map paper, subtle compass rose watermark",
                default_texture: TextureStyle::Parchment,
            },
            Category::Item => CategoryStyle {
                accent: Rgba8::rgb(0x41, 0x69, 0xe1),
                light: Rgba8::rgb(0x64, 0x95, 0xed),
                dark: Rgba8::rgb(0x2b, 0x45, 0x94),
                icon: r#"<path d="M12 2l10 10-10 10L2 12z"/>"#,
                label: "ITEM",
                texture_prompt: "deep blue velvet texture with subtle silver thread pattern, treasure chest lining",
                default_texture: TextureStyle::Velvet,
            },
            Category::Faction => CategoryStyle {
                accent: Rgba8::rgb(0x8b, 0x00, 0x8b),
                light: Rgba8::rgb(0xba, 0x55, 0xd3),
                dark: Rgba8::rgb(0x5c, 0x00, 0x5c),
                icon: r#"<path d="M12 2l8 6v8l-8 6-8-6V8z"/>"#,
                label: "FACTION",
                texture_prompt: "rich purple fabric texture, medieval banner material, subtle heraldic pattern",
                default_texture: TextureStyle::Banner,
            },
            Category::Quest => CategoryStyle {
                accent: Rgba8::rgb(0xb8, 0x86, 0x0b),
                light: Rgba8::rgb(0xda, 0xa5, 0x20),
                dark: Rgba8::rgb(0x7a, 0x59, 0x07),
                icon: r#"<path d="M12 2l3 6 6 1-4 4 1 6-6-3-6 3 1-6-4-4 6-1z"/>"#,
                label: "QUEST",
                texture_prompt: "golden aged scroll texture, wax-sealed document paper, adventure map feel",
                default_texture: TextureStyle::Scroll,
            },
            Category::Mystery => CategoryStyle {
                accent: Rgba8::rgb(0x4a, 0x4a, 0x4a),
                light: Rgba8::rgb(0x6a, 0x6a, 0x6a),
                dark: Rgba8::rgb(0x2a, 0x2a, 0x2a),
                icon: r#"<circle cx="12" cy="12" r="10"/><circle cx="12" cy="12" r="4" fill="white"/>"#,
                label: "MYSTERY",
                texture_prompt: "dark smoky texture, mysterious fog, subtle arcane symbols in shadow",
                default_texture: TextureStyle::Shadow,
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CardError;

    fn from_str(s: &str) -> CardResult<Self> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CardError::validation(format!("unknown category \"{s}\"")))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Category::from_name_lossy(&s))
    }
}

/// Material look requested for generated background textures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextureStyle {
    /// Aged, embossed leather.
    #[default]
    Leather,
    /// Weathered parchment.
    Parchment,
    /// Rich velvet fabric.
    Velvet,
    /// Woven banner cloth.
    Banner,
    /// Ancient scroll paper.
    Scroll,
    /// Polished dark wood.
    Wood,
    /// Brushed metal.
    Metal,
    /// Weathered stone.
    Stone,
    /// Smoky darkness.
    Shadow,
}

impl TextureStyle {
    /// All styles in display order.
    pub const ALL: [TextureStyle; 9] = [
        TextureStyle::Leather,
        TextureStyle::Parchment,
        TextureStyle::Velvet,
        TextureStyle::Banner,
        TextureStyle::Scroll,
        TextureStyle::Wood,
        TextureStyle::Metal,
        TextureStyle::Stone,
        TextureStyle::Shadow,
    ];

    /// Lower-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            TextureStyle::Leather => "leather",
            TextureStyle::Parchment => "parchment",
            TextureStyle::Velvet => "velvet",
            TextureStyle::Banner => "banner",
            TextureStyle::Scroll => "scroll",
            TextureStyle::Wood => "wood",
            TextureStyle::Metal => "metal",
            TextureStyle::Stone => "stone",
            TextureStyle::Shadow => "shadow",
        }
    }

    /// Prompt fragment describing the material.
    pub fn description(self) -> &'static str {
        match self {
            TextureStyle::Leather => {
                "aged leather texture, embossed, warm tones, medieval book binding"
            }
            TextureStyle::Parchment => "weathered parchment paper, aged vellum, slightly yellowed",
            TextureStyle::Velvet => "rich velvet fabric texture, soft lighting, luxurious material",
            TextureStyle::Banner => "woven fabric texture, medieval banner material, slight wear",
            TextureStyle::Scroll => "ancient scroll paper, rolled edges effect, aged document",
            TextureStyle::Wood => "polished dark wood grain, oak or mahogany, carved frame feel",
            TextureStyle::Metal => "brushed metal texture, bronze or copper tones, slight patina",
            TextureStyle::Stone => "weathered stone texture, castle wall, subtle moss",
            TextureStyle::Shadow => "dark smoke and shadow, charcoal tones, faint drifting fog",
        }
    }

    /// Parse a style name, falling back to [`TextureStyle::Leather`] for unknown values.
    pub fn from_name_lossy(name: &str) -> TextureStyle {
        let name = name.trim();
        match TextureStyle::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
        {
            Some(s) => s,
            None => {
                tracing::warn!(style = name, "unknown texture style, using leather");
                TextureStyle::default()
            }
        }
    }
}

impl fmt::Display for TextureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/category.rs"]
mod tests;
