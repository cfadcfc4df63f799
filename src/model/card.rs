use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{CardError, CardResult},
    model::category::Category,
};

/// Text content of one card.
///
/// Cards are transient: loaded from JSON (or built from a literal), rendered, discarded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Title drawn in the header.
    pub name: String,
    /// Body text, word-wrapped into the body region.
    #[serde(default)]
    pub description: String,
    /// Caption drawn in the footer.
    #[serde(default)]
    pub footer: String,
    /// Entity kind; `None` renders with the default category style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Portrait image path, relative to the card file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<PathBuf>,
    /// Extra `label: value` lines drawn under the description, in file order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub details: IndexMap<String, String>,
}

impl Card {
    /// Build a card from its three text fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        footer: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            footer: footer.into(),
            ..Self::default()
        }
    }

    /// Builder-style category setter.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Category used for styling.
    pub fn category(&self) -> Category {
        self.category.unwrap_or_default()
    }

    /// Load and validate a card definition from a JSON file.
    pub fn load(path: &Path) -> CardResult<Self> {
        if !path.is_file() {
            return Err(CardError::missing_input(format!(
                "card definition '{}'",
                path.display()
            )));
        }
        let f = File::open(path).with_context(|| format!("open card '{}'", path.display()))?;
        let card: Card = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| CardError::serde(format!("parse card '{}': {e}", path.display())))?;
        card.validate()?;
        Ok(card)
    }

    /// Portrait path resolved against the directory holding the card file.
    pub fn resolved_portrait(&self, card_dir: &Path) -> Option<PathBuf> {
        self.portrait.as_ref().map(|p| card_dir.join(p))
    }

    /// Reject cards that cannot produce a meaningful title.
    pub fn validate(&self) -> CardResult<()> {
        if self.name.trim().is_empty() {
            return Err(CardError::validation("card name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/card.rs"]
mod tests;
