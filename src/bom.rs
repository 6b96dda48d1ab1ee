//! Technical-specification rows
//!
//! Tabular slot → icon → glow color data derived from a resolved
//! configuration, one row per physical slot in canonical order. Consumed by
//! the printed technical specification; PDF generation itself happens
//! elsewhere.

use serde::Serialize;

use crate::icons::IconLookup;
use crate::resolver;
use crate::types::{Configuration, GlowColor, SlotId};

/// One line of the technical specification. Unconfigured slots are listed
/// with empty cells so the table always covers the whole unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomRow {
    pub slot_id: SlotId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<GlowColor>,
}

/// Rows for every resolved slot of the configuration, canonical order.
pub fn bom_rows(
    configuration: &Configuration,
    model_code: Option<&str>,
    lookup: Option<&IconLookup>,
) -> Vec<BomRow> {
    resolver::resolve_slot_ids(model_code, Some(configuration))
        .into_iter()
        .map(|slot_id| {
            let configured = configuration.get(slot_id);
            let icon_id = configured.map(|slot| slot.icon_id.clone());
            let icon_name = icon_id
                .as_deref()
                .and_then(|id| lookup.and_then(|l| l.get(id)))
                .map(|entry| entry.icon_name.clone());
            BomRow {
                slot_id,
                icon_id,
                icon_name,
                color: configured.and_then(|slot| slot.color),
            }
        })
        .collect()
}

/// Fixed-width text rendering of the rows, for terminal/plain-text output.
pub fn format_table(rows: &[BomRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:<14} {:<24} {:<8}\n",
        "SLOT", "ICON ID", "ICON", "GLOW"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<10} {:<14} {:<24} {:<8}\n",
            row.slot_id.to_string(),
            row.icon_id.as_deref().unwrap_or("-"),
            row.icon_name
                .as_deref()
                .or(row.icon_id.as_deref())
                .unwrap_or("-"),
            row.color
                .map(|color| color.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconCatalogEntry;
    use crate::types::SlotConfig;

    fn configuration() -> Configuration {
        let mut configuration = Configuration::default();
        configuration.slots.insert(
            SlotId::new(1),
            SlotConfig {
                icon_id: "a1".to_string(),
                color: GlowColor::parse("#FF0000"),
            },
        );
        configuration.slots.insert(
            SlotId::new(3),
            SlotConfig {
                icon_id: "c3".to_string(),
                color: None,
            },
        );
        configuration
    }

    #[test]
    fn test_rows_cover_all_resolved_slots() {
        let rows = bom_rows(&configuration(), Some("PKP-2200-SI"), None);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].slot_id, SlotId::new(1));
        assert_eq!(rows[0].icon_id.as_deref(), Some("a1"));
        assert_eq!(rows[1].icon_id, None);
        assert_eq!(rows[3].icon_id, None);
    }

    #[test]
    fn test_rows_resolve_icon_names_via_lookup() {
        let lookup = IconLookup::build(&[IconCatalogEntry {
            icon_id: "a1".to_string(),
            name: "Anchor".to_string(),
            matte_asset_path: None,
            categories: vec![],
        }]);
        let rows = bom_rows(&configuration(), Some("PKP-2200-SI"), Some(&lookup));
        assert_eq!(rows[0].icon_name.as_deref(), Some("Anchor"));
        // Unknown catalog id keeps the raw icon id, no display name
        assert_eq!(rows[2].icon_name, None);
        assert_eq!(rows[2].icon_id.as_deref(), Some("c3"));
    }

    #[test]
    fn test_format_table_renders_every_row() {
        let rows = bom_rows(&configuration(), Some("PKP-2200-SI"), None);
        let table = format_table(&rows);
        assert!(table.contains("slot_1"));
        assert!(table.contains("#FF0000"));
        assert!(table.contains("slot_4"));
        assert_eq!(table.lines().count(), 5);
    }
}
