//! Scene catalog: the ordered classification targets.

use crate::color::HexColor;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One classification target: the text the model scores against, and the
/// color/label reported when it wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneCatalogEntry {
    /// Natural-language scene description fed to the text encoder.
    pub descriptor: String,
    /// Marker color for this scene.
    pub color: HexColor,
    /// Short human-readable label.
    pub label: String,
}

/// Ordered, non-empty list of scene entries.
///
/// Entry order is part of the contract: probability index `i` always
/// refers to `entries()[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCatalog {
    entries: Vec<SceneCatalogEntry>,
}

impl SceneCatalog {
    /// Build a catalog from entries.
    pub fn new(entries: Vec<SceneCatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    /// All entries in index order.
    pub fn entries(&self) -> &[SceneCatalogEntry] {
        &self.entries
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&SceneCatalogEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptor strings in index order.
    pub fn descriptors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.descriptor.as_str())
    }
}

impl Default for SceneCatalog {
    fn default() -> Self {
        let entry = |descriptor: &str, color: HexColor, label: &str| SceneCatalogEntry {
            descriptor: descriptor.to_string(),
            color,
            label: label.to_string(),
        };

        Self {
            entries: vec![
                entry(
                    "busy downtown city street with store signs, billboards, commercial buildings, and traffic",
                    HexColor::new(0x70, 0x80, 0x90),
                    "City",
                ),
                entry(
                    "gray asphalt road surface and street markings",
                    HexColor::new(0x36, 0x45, 0x4f),
                    "Asphalt Road",
                ),
                entry(
                    "red rubber running track lanes in a stadium",
                    HexColor::new(0xff, 0x00, 0x00),
                    "Red Track",
                ),
                entry(
                    "brown dirt path, soil trail, and ground texture",
                    HexColor::new(0xa0, 0x52, 0x2d),
                    "Dirt Trail",
                ),
                entry(
                    "dense green forest, woods, and many trees",
                    HexColor::new(0x00, 0xa0, 0x00),
                    "Green Forest",
                ),
                entry(
                    "close-up of red and orange autumn maple leaves on a tree",
                    HexColor::new(0xff, 0x57, 0x33),
                    "Autumn Maple",
                ),
                entry(
                    "green grass lawn in a park",
                    HexColor::new(0x7c, 0xfc, 0x00),
                    "Park/Grass",
                ),
                entry(
                    "winter landscape with white snow and snow covering the ground and trees",
                    HexColor::new(0xf0, 0xf8, 0xff),
                    "Snowy Winter",
                ),
                entry(
                    "blue water surface of a river, lake, or ocean",
                    HexColor::new(0x00, 0x77, 0xff),
                    "River/Sea/Water",
                ),
                entry(
                    "empty clear blue sky with no objects, no trees, no buildings",
                    HexColor::new(0x00, 0xbf, 0xff),
                    "Blue Sky",
                ),
                entry(
                    "orange and purple sunset sky over the horizon",
                    HexColor::new(0xff, 0x63, 0x47),
                    "Sunset",
                ),
                entry(
                    "night city street with neon lights and darkness",
                    HexColor::new(0x8a, 0x2b, 0xe2),
                    "Night/Lights",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = SceneCatalog::default();
        assert_eq!(catalog.len(), 12);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.entries()[0].label, "City");
        assert_eq!(catalog.entries()[4].label, "Green Forest");
        assert_eq!(catalog.entries()[4].color.to_string(), "#00a000");
        assert_eq!(catalog.entries()[11].label, "Night/Lights");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            SceneCatalog::new(Vec::new()),
            Err(Error::EmptyCatalog)
        ));
    }

    #[test]
    fn test_descriptors_follow_entries() {
        let catalog = SceneCatalog::default();
        for (descriptor, entry) in catalog.descriptors().zip(catalog.entries()) {
            assert_eq!(descriptor, entry.descriptor);
        }
    }
}
