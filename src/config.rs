//! Host bridge configuration

use serde::{Deserialize, Serialize};

use crate::announce;

/// Entity-code substring counted when no other is configured
pub const DEFAULT_TRACKED_ENTITY: &str = "wolf";

/// Leaderboard rows shown when no other size is configured
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

/// What the host bridge counts and how much of the board it shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Substring of an entity code that marks a tracked kill
    pub tracked_entity: String,
    /// Rows in the leaderboard listing
    pub leaderboard_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            tracked_entity: DEFAULT_TRACKED_ENTITY.to_string(),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

impl BridgeConfig {
    /// Create config tracking a different entity
    pub fn new(tracked_entity: impl Into<String>) -> Self {
        Self {
            tracked_entity: tracked_entity.into(),
            ..Default::default()
        }
    }

    /// Show a different number of leaderboard rows
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    /// Check if an entity code denotes a tracked entity (case-insensitive)
    pub fn is_tracked(&self, entity_code: &str) -> bool {
        let tracked = self.tracked_entity.trim().to_lowercase();
        !tracked.is_empty() && entity_code.to_lowercase().contains(&tracked)
    }

    /// Label used in announcements, e.g. `WOLF`
    pub fn label(&self) -> String {
        announce::label(&self.tracked_entity)
    }
}
