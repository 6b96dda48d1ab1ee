//! Saved-design store
//!
//! A JSON-file store of named keypad designs. Every write path validates
//! the configuration text in strict mode first and persists the canonical
//! re-encoded form, so anything read back from the store decodes cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::{self, DecodeMode};
use crate::constants;

/// One saved design. `configuration` holds the canonical wire-format text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDesign {
    pub id: u64,
    pub name: String,
    pub keypad_model: String,
    pub configuration: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    designs: Vec<SavedDesign>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            designs: Vec::new(),
        }
    }
}

/// File-backed design store. Each operation reads and rewrites the whole
/// file; design counts are small and the simplicity keeps every operation
/// crash-consistent with no open handles between calls.
#[derive(Debug)]
pub struct DesignStore {
    path: PathBuf,
}

impl DesignStore {
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default store location under the platform data directory.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::store::APP_DIR);
        path.push(constants::store::FILENAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All designs, oldest first.
    pub fn list(&self) -> Result<Vec<SavedDesign>> {
        Ok(self.load()?.designs)
    }

    pub fn get(&self, id: u64) -> Result<SavedDesign> {
        self.load()?
            .designs
            .into_iter()
            .find(|design| design.id == id)
            .with_context(|| format!("Saved design {id} not found"))
    }

    /// Validate and persist a new design. The configuration must pass
    /// strict validation; the stored text is the canonical re-encoding.
    pub fn save(&self, name: &str, keypad_model: &str, configuration: &str) -> Result<SavedDesign> {
        let name = normalize_name(name)?;
        let keypad_model = normalize_keypad_model(keypad_model)?;
        let canonical = validate_strict(configuration)?;

        let mut file = self.load()?;
        let design = SavedDesign {
            id: file.next_id,
            name,
            keypad_model,
            configuration: canonical,
        };
        file.next_id += 1;
        file.designs.push(design.clone());
        self.persist(&file)?;

        info!(id = design.id, name = %design.name, model = %design.keypad_model, "saved design");
        Ok(design)
    }

    /// Rename and/or replace the configuration of an existing design.
    pub fn update(&self, id: u64, name: &str, configuration: &str) -> Result<SavedDesign> {
        let name = normalize_name(name)?;
        let canonical = validate_strict(configuration)?;

        let mut file = self.load()?;
        let Some(design) = file.designs.iter_mut().find(|design| design.id == id) else {
            bail!("Saved design {id} not found");
        };
        design.name = name;
        design.configuration = canonical;
        let updated = design.clone();
        self.persist(&file)?;

        info!(id = updated.id, name = %updated.name, "updated design");
        Ok(updated)
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let mut file = self.load()?;
        let before = file.designs.len();
        file.designs.retain(|design| design.id != id);
        if file.designs.len() == before {
            bail!("Saved design {id} not found");
        }
        self.persist(&file)?;

        info!(id, "deleted design");
        Ok(())
    }

    fn load(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read design store from {:?}", self.path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse design store from {:?}", self.path))
    }

    fn persist(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {parent:?}"))?;
        }
        let contents =
            serde_json::to_string_pretty(file).context("Failed to serialize design store")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write design store to {:?}", self.path))
    }
}

fn normalize_name(value: &str) -> Result<String> {
    let name = value.trim();
    if name.is_empty() {
        bail!("Design name cannot be empty");
    }
    Ok(name.chars().take(constants::store::MAX_NAME_LEN).collect())
}

fn normalize_keypad_model(value: &str) -> Result<String> {
    let model = value.trim().to_ascii_uppercase();
    if model.is_empty() {
        bail!("Keypad model cannot be empty");
    }
    Ok(model)
}

fn validate_strict(configuration: &str) -> Result<String> {
    let decoded = codec::decode_str(configuration, DecodeMode::Strict)
        .context("Configuration is invalid")?;
    Ok(codec::encode(&decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static STORE_COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Store on a unique temp path per test.
    fn temp_store(tag: &str) -> DesignStore {
        let n = STORE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "keypad-configurator-test-{tag}-{n}-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        DesignStore::open(path)
    }

    const VALID: &str = r##"{
        "slot_1": {"iconId": "a1", "color": "#ff0000"},
        "slot_2": {"iconId": "b2"},
        "slot_3": {"iconId": "c3"},
        "slot_4": {"iconId": "d4"}
    }"##;

    #[test]
    fn test_save_and_list_roundtrip() {
        let store = temp_store("roundtrip");
        let design = store.save("  My Boat  ", "pkp-2200-si", VALID).unwrap();
        assert_eq!(design.id, 1);
        assert_eq!(design.name, "My Boat");
        assert_eq!(design.keypad_model, "PKP-2200-SI");
        // Stored text is canonical: uppercase color, explicit nulls
        assert!(design.configuration.contains("#FF0000"));

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![design]);
    }

    #[test]
    fn test_save_assigns_increasing_ids() {
        let store = temp_store("ids");
        let first = store.save("One", "PKP-2200-SI", VALID).unwrap();
        let second = store.save("Two", "PKP-2200-SI", VALID).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_save_rejects_invalid_configuration() {
        let store = temp_store("invalid");
        let err = store
            .save("Bad", "PKP-2200-SI", r#"{"slot_1": {"iconId": "a1"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid"));
        // Nothing persisted
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_rejects_empty_name_and_model() {
        let store = temp_store("empty-fields");
        assert!(store.save("   ", "PKP-2200-SI", VALID).is_err());
        assert!(store.save("Name", "  ", VALID).is_err());
    }

    #[test]
    fn test_name_is_capped() {
        let store = temp_store("cap");
        let long_name = "x".repeat(500);
        let design = store.save(&long_name, "PKP-2200-SI", VALID).unwrap();
        assert_eq!(design.name.len(), constants::store::MAX_NAME_LEN);
    }

    #[test]
    fn test_update_replaces_name_and_configuration() {
        let store = temp_store("update");
        let design = store.save("Original", "PKP-2200-SI", VALID).unwrap();

        let replacement = r#"{
            "slot_1": {"iconId": "z9"}, "slot_2": {"iconId": "b2"},
            "slot_3": {"iconId": "c3"}, "slot_4": {"iconId": "d4"}
        }"#;
        let updated = store.update(design.id, "Renamed", replacement).unwrap();
        assert_eq!(updated.name, "Renamed");
        assert!(updated.configuration.contains("z9"));

        let fetched = store.get(design.id).unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let store = temp_store("update-missing");
        assert!(store.update(42, "Name", VALID).is_err());
    }

    #[test]
    fn test_delete_removes_design() {
        let store = temp_store("delete");
        let design = store.save("Doomed", "PKP-2200-SI", VALID).unwrap();
        store.delete(design.id).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(store.delete(design.id).is_err());
    }

    #[test]
    fn test_get_unknown_id_fails() {
        let store = temp_store("get-missing");
        assert!(store.get(7).is_err());
    }
}
