//! Icon catalog lookup
//!
//! Builds a read-only id-keyed index over the flat icon catalog fetched
//! from the shop, and resolves the matte render asset used for realistic
//! keypad previews. One build per catalog snapshot; the lookup is never
//! mutated afterwards and may be shared freely across threads.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::constants::assets;

/// One entry of the external icon catalog, as delivered by the shop API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconCatalogEntry {
    pub icon_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub matte_asset_path: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Resolved display metadata for one icon id.
#[derive(Debug, Clone, PartialEq)]
pub struct IconLookupEntry {
    pub icon_id: String,
    pub icon_name: String,
    pub matte_asset_path: Option<String>,
    pub category: Option<String>,
}

/// Read-only id → entry index over a catalog snapshot.
#[derive(Debug, Default)]
pub struct IconLookup {
    entries: HashMap<String, IconLookupEntry>,
}

impl IconLookup {
    /// Build the index. The first occurrence of a duplicate id wins; later
    /// duplicates are dropped. Entries without an id are skipped.
    pub fn build(catalog: &[IconCatalogEntry]) -> Self {
        let mut entries = HashMap::new();

        for icon in catalog {
            if icon.icon_id.is_empty() {
                continue;
            }
            if entries.contains_key(&icon.icon_id) {
                debug!(icon_id = %icon.icon_id, "duplicate icon id in catalog, keeping first");
                continue;
            }

            entries.insert(
                icon.icon_id.clone(),
                IconLookupEntry {
                    icon_id: icon.icon_id.clone(),
                    icon_name: if icon.name.is_empty() {
                        icon.icon_id.clone()
                    } else {
                        icon.name.clone()
                    },
                    matte_asset_path: icon.matte_asset_path.clone(),
                    category: icon.categories.first().cloned(),
                },
            );
        }

        Self { entries }
    }

    pub fn get(&self, icon_id: &str) -> Option<&IconLookupEntry> {
        self.entries.get(icon_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matte render asset for an icon: the catalog path when present, else
    /// a path synthesized from the icon's category. `None` means the
    /// renderer must fall back to a placeholder.
    pub fn matte_asset_path_for(&self, icon_id: &str) -> Option<String> {
        let entry = self.get(icon_id)?;
        if let Some(path) = &entry.matte_asset_path {
            return Some(path.clone());
        }

        let category = entry.category.as_deref()?;
        Some(format!(
            "{}/{}/{}.{}",
            assets::MATTE_BASE_PATH,
            slugify(category),
            entry.icon_id,
            assets::MATTE_EXTENSION
        ))
    }
}

/// Load a catalog snapshot from a JSON file (array of entries).
pub fn load_catalog(path: &Path) -> Result<Vec<IconCatalogEntry>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read icon catalog from {path:?}"))?;
    let catalog: Vec<IconCatalogEntry> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse icon catalog JSON from {path:?}"))?;
    debug!(icons = catalog.len(), path = %path.display(), "loaded icon catalog");
    Ok(catalog)
}

/// Lowercase, with runs of anything non-alphanumeric collapsed to `-`.
fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_was_dash = true;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        icon_id: &str,
        name: &str,
        matte: Option<&str>,
        categories: &[&str],
    ) -> IconCatalogEntry {
        IconCatalogEntry {
            icon_id: icon_id.to_string(),
            name: name.to_string(),
            matte_asset_path: matte.map(str::to_string),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_indexes_by_icon_id() {
        let lookup = IconLookup::build(&[
            entry("a1", "Anchor", Some("/m/a1.png"), &["Marine"]),
            entry("b2", "Bilge Pump", None, &["Marine"]),
        ]);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("a1").unwrap().icon_name, "Anchor");
        assert_eq!(lookup.get("zz"), None);
    }

    #[test]
    fn test_build_first_duplicate_wins() {
        let lookup = IconLookup::build(&[
            entry("a1", "First", None, &[]),
            entry("a1", "Second", None, &[]),
        ]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("a1").unwrap().icon_name, "First");
    }

    #[test]
    fn test_build_skips_empty_ids_and_falls_back_to_id_as_name() {
        let lookup = IconLookup::build(&[
            entry("", "Ghost", None, &[]),
            entry("c3", "", None, &[]),
        ]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("c3").unwrap().icon_name, "c3");
    }

    #[test]
    fn test_matte_path_prefers_catalog_path() {
        let lookup = IconLookup::build(&[entry("a1", "Anchor", Some("/m/a1.png"), &["Marine"])]);
        assert_eq!(lookup.matte_asset_path_for("a1").as_deref(), Some("/m/a1.png"));
    }

    #[test]
    fn test_matte_path_synthesized_from_category() {
        let lookup = IconLookup::build(&[entry("b2", "Bilge Pump", None, &["Nav Lights"])]);
        assert_eq!(
            lookup.matte_asset_path_for("b2").as_deref(),
            Some("/assets/icons/matte/nav-lights/b2.png")
        );
    }

    #[test]
    fn test_matte_path_none_without_category_or_asset() {
        let lookup = IconLookup::build(&[entry("d4", "Dome Light", None, &[])]);
        assert_eq!(lookup.matte_asset_path_for("d4"), None);
        assert_eq!(lookup.matte_asset_path_for("unknown"), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Marine"), "marine");
        assert_eq!(slugify("Nav  Lights"), "nav-lights");
        assert_eq!(slugify("Heating & Cooling"), "heating-cooling");
        assert_eq!(slugify("  trailing  "), "trailing");
    }
}
