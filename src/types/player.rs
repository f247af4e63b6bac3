//! Per-player record

use serde::{Deserialize, Serialize};

use crate::goal::{round_goal, BASE_GOAL};

use super::is_zero;

/// Kill tally of a single player, keyed by player name in [`ServerState`]
///
/// `goal` is the next kill count that triggers an escalation and is always
/// at least `kills`.
///
/// [`ServerState`]: super::ServerState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub kills: u64,
    pub goal: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub deaths: u64,
}

impl PlayerRecord {
    /// Record for a player who just landed their first tracked kill
    pub fn first_kill() -> Self {
        Self {
            kills: 1,
            goal: BASE_GOAL,
            deaths: 0,
        }
    }

    /// Record seeded from a bare kill count, with the round goal for it
    pub fn seeded(kills: u64) -> Self {
        Self {
            kills,
            goal: round_goal(kills),
            deaths: 0,
        }
    }
}
