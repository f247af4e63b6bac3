//! JSON file save slot

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::types::ServerState;

use super::atomic::{remove_stale_temp, write_with_backup};
use super::SaveSlot;

/// File name used when none is configured
pub const DEFAULT_FILE_NAME: &str = "wolfkills.json";

/// Location of a file-backed save slot
#[derive(Debug, Clone)]
pub struct SlotConfig {
    /// Directory holding the save file and its backup
    pub data_dir: PathBuf,
    /// Name of the save file inside `data_dir`
    pub file_name: String,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl SlotConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Use a different save file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to the save file
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Get path to the previous save (backup)
    pub fn backup_path(&self) -> PathBuf {
        self.state_path().with_extension("previous.json")
    }
}

/// Save slot stored as a single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    config: SlotConfig,
}

impl JsonFileSlot {
    /// Create a slot for the given location
    pub fn new(config: SlotConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Check if a save file exists
    pub fn exists(&self) -> bool {
        self.config.state_path().exists()
    }

    /// Remove a temp file left by an interrupted save
    pub fn cleanup(&self) -> StoreResult<bool> {
        let removed = remove_stale_temp(&self.config.state_path())?;
        if removed {
            warn!(
                "Removed leftover temp file of {}",
                self.config.state_path().display()
            );
        }
        Ok(removed)
    }

    /// Load the backup written by the previous save
    pub fn recover_from_backup(&self) -> StoreResult<Option<Value>> {
        let backup = self.config.backup_path();
        let document = read_json(&backup)?;
        if document.is_some() {
            warn!("Recovered kill data from backup {}", backup.display());
        }
        Ok(document)
    }
}

fn read_json(path: &Path) -> StoreResult<Option<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

impl SaveSlot for JsonFileSlot {
    fn load_document(&self) -> StoreResult<Option<Value>> {
        let path = self.config.state_path();

        match read_json(&path) {
            Ok(Some(document)) => Ok(Some(document)),
            // Interrupted save: the old file was moved aside before the
            // new one landed.
            Ok(None) => match self.recover_from_backup() {
                Err(StoreError::Json(e)) => Err(StoreError::Corrupted(format!(
                    "{} is missing and its backup could not be parsed: {}",
                    path.display(),
                    e
                ))),
                other => other,
            },
            Err(StoreError::Json(e)) => {
                warn!("Save file {} is corrupted: {}", path.display(), e);
                match self.recover_from_backup() {
                    Ok(Some(document)) => Ok(Some(document)),
                    Ok(None) | Err(_) => Err(StoreError::Corrupted(format!(
                        "{} could not be parsed and no usable backup exists: {}",
                        path.display(),
                        e
                    ))),
                }
            }
            Err(e) => Err(e),
        }
    }

    fn save_document(&mut self, state: &ServerState) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&state.to_document()?)?;
        let path = self.config.state_path();

        write_with_backup(&path, &self.config.backup_path(), |file| {
            file.write_all(content.as_bytes())?;
            writeln!(file)
        })?;

        info!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerRecord;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_slot() -> (JsonFileSlot, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let slot = JsonFileSlot::new(SlotConfig::new(temp_dir.path()));
        (slot, temp_dir)
    }

    #[test]
    fn test_config_paths() {
        let config = SlotConfig::new("/srv/game").with_file_name("kills.json");
        assert_eq!(config.state_path(), PathBuf::from("/srv/game/kills.json"));
        assert_eq!(
            config.backup_path(),
            PathBuf::from("/srv/game/kills.previous.json")
        );
    }

    #[test]
    fn test_missing_file_loads_none() {
        let (slot, _temp_dir) = create_test_slot();
        assert!(slot.load_document().unwrap().is_none());
        assert!(!slot.exists());
    }

    #[test]
    fn test_save_then_load() {
        let (mut slot, _temp_dir) = create_test_slot();
        let mut state = ServerState::new();
        state.total_kills = 5;
        state
            .players
            .insert("Ana".to_string(), PlayerRecord::seeded(5));

        slot.save_document(&state).unwrap();

        let document = slot.load_document().unwrap().unwrap();
        assert_eq!(document["TotalKills"], 5);
        assert_eq!(document["KillCounts"]["Ana"]["kills"], 5);
    }

    #[test]
    fn test_corrupted_file_falls_back_to_backup() {
        let (mut slot, _temp_dir) = create_test_slot();
        let mut state = ServerState::new();
        state.total_kills = 1;
        slot.save_document(&state).unwrap();
        state.total_kills = 2;
        slot.save_document(&state).unwrap();

        fs::write(slot.config().state_path(), "{ not json").unwrap();

        let document = slot.load_document().unwrap().unwrap();
        assert_eq!(document["TotalKills"], 1);
    }

    #[test]
    fn test_corrupted_without_backup_is_an_error() {
        let (slot, temp_dir) = create_test_slot();
        fs::create_dir_all(temp_dir.path()).unwrap();
        fs::write(slot.config().state_path(), "garbage").unwrap();

        let err = slot.load_document().unwrap_err();
        assert!(matches!(err, StoreError::Corrupted(_)));
    }

    #[test]
    fn test_interrupted_save_recovers_backup() {
        let (slot, _temp_dir) = create_test_slot();
        fs::write(
            slot.config().backup_path(),
            json!({"TotalKills": 9}).to_string(),
        )
        .unwrap();
        fs::write(slot.config().state_path().with_extension("tmp"), "{").unwrap();

        let document = slot.load_document().unwrap().unwrap();
        assert_eq!(document["TotalKills"], 9);
        assert!(slot.cleanup().unwrap());
    }

    #[test]
    fn test_missing_file_with_unreadable_backup_is_an_error() {
        let (slot, temp_dir) = create_test_slot();
        fs::create_dir_all(temp_dir.path()).unwrap();
        fs::write(slot.config().backup_path(), "{ half").unwrap();

        let err = slot.load_document().unwrap_err();
        assert!(matches!(err, StoreError::Corrupted(_)));
    }
}
