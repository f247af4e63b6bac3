//! Kill Counter
//!
//! Persistent kill tracking for a game server: a server-wide total with an
//! escalating goal, per-player counts and goals, and a leaderboard, kept in
//! one save slot that survives every historical file layout.
//!
//! # Modules
//!
//! - `types`: Core data structures (ServerState, PlayerRecord, GoalSignal)
//! - `goal`: Goal rounding and escalation
//! - `migration`: Turns any historical save document into the current state
//! - `counter_store`: In-memory state, kill/death events and queries
//! - `leaderboard`: Top-N ranking
//! - `persistence`: Save slots (JSON file, memory)
//! - `announce`: Text for goal announcements and listings
//! - `commands`: Player and admin commands
//! - `host`: Newline-delimited JSON bridge to the game host
//! - `config`: Bridge configuration
//!
//! # Example
//!
//! ```no_run
//! use kill_counter::{CounterStore, JsonFileSlot, SlotConfig};
//!
//! fn main() -> kill_counter::StoreResult<()> {
//!     let mut slot = JsonFileSlot::new(SlotConfig::new("data"));
//!     let mut store = CounterStore::open(&slot)?;
//!     for signal in store.record_event(Some("Ana")) {
//!         println!("{:?}", signal);
//!     }
//!     store.save(&mut slot)
//! }
//! ```

pub mod announce;
pub mod commands;
pub mod config;
pub mod counter_store;
pub mod error;
pub mod goal;
pub mod host;
pub mod leaderboard;
pub mod migration;
pub mod persistence;
pub mod types;

// Re-export commonly used items at crate root
pub use commands::{Command, CommandOutcome, CommandRegistry, CommandSpec};
pub use config::BridgeConfig;
pub use counter_store::CounterStore;
pub use error::{StoreError, StoreResult};
pub use host::{HostBridge, HostEvent, HostMessage};
pub use migration::{migrate, normalize, MigrationResult, PersistedDocument, Repair, SchemaKind};
pub use persistence::{JsonFileSlot, MemorySlot, SaveSlot, SlotConfig};
pub use types::{GoalSignal, PlayerRecord, ServerProgress, ServerState, Standing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
