//! Data types for the kill counter
//!
//! This module contains the current-schema state and the values the
//! counter store hands back to its host.

mod player;
mod signal;
mod state;

pub use player::PlayerRecord;
pub use signal::GoalSignal;
pub use state::{ServerProgress, ServerState, Standing, CURRENT_SCHEMA_VERSION};

/// Check if value is zero (for skip_serializing_if)
pub fn is_zero(val: &u64) -> bool {
    *val == 0
}
