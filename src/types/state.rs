//! Server-wide state in the current schema

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::goal::DEFAULT_SERVER_GOAL;

use super::PlayerRecord;

/// Version marker written into every document saved by this crate
pub const CURRENT_SCHEMA_VERSION: u64 = 4;

/// Complete persisted state of one save slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerState {
    /// Every tracked kill, attributed or not
    pub total_kills: u64,
    /// Next total that triggers a server announcement
    pub server_goal: u64,
    #[serde(default)]
    pub players: BTreeMap<String, PlayerRecord>,
    /// Ranking source; may hold fewer names than `players` after a reset
    #[serde(default)]
    pub leaderboard: BTreeMap<String, u64>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            total_kills: 0,
            server_goal: DEFAULT_SERVER_GOAL,
            players: BTreeMap::new(),
            leaderboard: BTreeMap::new(),
        }
    }
}

/// On-disk layout of the current schema
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SavedDocument<'a> {
    schema_version: u64,
    saved_at: i64,
    total_kills: u64,
    server_kill_goal: u64,
    kill_counts: &'a BTreeMap<String, PlayerRecord>,
    leaderboard: &'a BTreeMap<String, u64>,
}

impl ServerState {
    /// Create an empty state for a fresh install
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.total_kills == 0 && self.players.is_empty() && self.leaderboard.is_empty()
    }

    /// Render the state as a current-schema document
    pub fn to_document(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(SavedDocument {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: chrono::Utc::now().timestamp(),
            total_kills: self.total_kills,
            server_kill_goal: self.server_goal,
            kill_counts: &self.players,
            leaderboard: &self.leaderboard,
        })
    }

    /// Server-wide totals
    pub fn progress(&self) -> ServerProgress {
        ServerProgress {
            total_kills: self.total_kills,
            server_goal: self.server_goal,
        }
    }
}

/// Read-only view of the server-wide counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProgress {
    pub total_kills: u64,
    pub server_goal: u64,
}

/// One row of a ranked leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub kills: u64,
}
