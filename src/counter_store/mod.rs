//! Counter Store - owner of the session state
//!
//! The store holds the one [`ServerState`] of a session. Kill and death
//! reports mutate it in place, queries read it, and the whole state goes
//! through a [`SaveSlot`] on save. The store performs no I/O of its own
//! outside `open` and `save`, and holds no locks: the host delivers events
//! and commands one at a time.

mod events;
mod query;

use log::info;

use crate::error::StoreResult;
use crate::migration::{self, PersistedDocument};
use crate::persistence::SaveSlot;
use crate::types::{GoalSignal, PlayerRecord, ServerProgress, ServerState, Standing};

/// In-memory kill counter for one save slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterStore {
    pub(crate) state: ServerState,
}

impl CounterStore {
    /// Create a store for a fresh install
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around an already migrated state
    pub fn from_state(state: ServerState) -> Self {
        Self { state }
    }

    /// Load whatever the slot holds and migrate it to the current schema
    pub fn open<S: SaveSlot + ?Sized>(slot: &S) -> StoreResult<Self> {
        let raw = slot.load_document()?;
        let result = migration::migrate(PersistedDocument::classify(raw));
        info!(
            "Loaded {} schema: {} players, {} total kills, server goal {}",
            result.schema,
            result.state.players.len(),
            result.state.total_kills,
            result.state.server_goal
        );
        Ok(Self::from_state(result.state))
    }

    /// Write the entire state through the slot
    pub fn save<S: SaveSlot + ?Sized>(&self, slot: &mut S) -> StoreResult<()> {
        slot.save_document(&self.state)?;
        info!(
            "Saved kill data: {} players, {} total kills",
            self.state.players.len(),
            self.state.total_kills
        );
        Ok(())
    }

    /// Current state for persistence or read-only queries
    pub fn snapshot(&self) -> &ServerState {
        &self.state
    }
}

// Operations are implemented in the submodules
impl CounterStore {
    // Event operations (from events.rs)
    pub fn record_event(&mut self, actor: Option<&str>) -> Vec<GoalSignal> {
        events::record_event(self, actor)
    }

    pub fn record_death(&mut self, player: &str) -> bool {
        events::record_death(self, player)
    }

    pub fn reset_leaderboard(&mut self) {
        events::reset_leaderboard(self)
    }

    // Query operations (from query.rs)
    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        query::player(self, name)
    }

    pub fn server_progress(&self) -> ServerProgress {
        query::server_progress(self)
    }

    pub fn top_n(&self, n: usize) -> Vec<Standing> {
        query::top_n(self, n)
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        query::rank_of(self, name)
    }
}
