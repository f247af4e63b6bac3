//! Persistence collaborator
//!
//! The core never touches files itself. It asks a [`SaveSlot`] for the raw
//! document at session start and hands it the whole [`ServerState`] on
//! save. Two slots ship with the crate:
//! - [`JsonFileSlot`]: one JSON file per save slot, replaced atomically
//! - [`MemorySlot`]: keeps the last saved document in memory

mod atomic;
mod file;

use serde_json::Value;

use crate::error::StoreResult;
use crate::types::ServerState;

pub use atomic::{remove_stale_temp, temp_path, write_with_backup};
pub use file::{JsonFileSlot, SlotConfig, DEFAULT_FILE_NAME};

/// Load/save primitives of the host
///
/// `save_document` must be all-or-nothing: either the complete state is
/// stored or the previous save is left as it was.
pub trait SaveSlot {
    /// Raw document of unknown vintage, or `None` if nothing was saved yet
    fn load_document(&self) -> StoreResult<Option<Value>>;

    /// Store the complete state in the current schema
    fn save_document(&mut self, state: &ServerState) -> StoreResult<()>;
}

/// Save slot that lives in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    document: Option<Value>,
    saves: usize,
}

impl MemorySlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot preloaded with a document, e.g. a legacy save
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Some(document),
            saves: 0,
        }
    }

    /// Last stored document
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SaveSlot for MemorySlot {
    fn load_document(&self) -> StoreResult<Option<Value>> {
        Ok(self.document.clone())
    }

    fn save_document(&mut self, state: &ServerState) -> StoreResult<()> {
        self.document = Some(state.to_document()?);
        self.saves += 1;
        Ok(())
    }
}
