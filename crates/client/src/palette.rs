//! Colour palettes bundled with the app.

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::ClientResult;

const BUNDLED_PALETTES: &str = include_str!("palettes.json");

/// Three swatches offered together.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: [String; 3],
}

impl Palette {
    pub fn swatches(&self) -> [Rgba; 3] {
        [
            Rgba::from_hex(&self.colors[0]),
            Rgba::from_hex(&self.colors[1]),
            Rgba::from_hex(&self.colors[2]),
        ]
    }
}

/// Palettes grouped under one family name (e.g. "Warm").
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorCollection {
    pub family: String,
    pub palettes: Vec<Palette>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaletteCatalog {
    collections: Vec<ColorCollection>,
}

impl PaletteCatalog {
    /// The catalog compiled into the crate.
    pub fn bundled() -> ClientResult<Self> {
        Self::from_json(BUNDLED_PALETTES)
    }

    pub fn from_json(json: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn collections(&self) -> &[ColorCollection] {
        &self.collections
    }

    /// Family names in file order.
    pub fn families(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.family.as_str()).collect()
    }

    /// Case-insensitive family lookup.
    pub fn collection(&self, family: &str) -> Option<&ColorCollection> {
        self.collections
            .iter()
            .find(|c| c.family.eq_ignore_ascii_case(family))
    }

    /// Case-insensitive palette lookup across all families.
    pub fn find(&self, name: &str) -> Option<&Palette> {
        self.collections
            .iter()
            .flat_map(|c| c.palettes.iter())
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
