//! Goal escalation signals

use serde::{Deserialize, Serialize};

/// Raised by the counter store when a count lands exactly on its goal
///
/// The store only reports; rendering and delivery belong to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalSignal {
    /// The server-wide total reached the server goal
    ServerGoalReached { reached: u64, new_goal: u64 },
    /// A player's personal count reached their goal
    PlayerGoalReached {
        player: String,
        reached: u64,
        new_goal: u64,
    },
}

impl GoalSignal {
    /// The goal that replaces the one just reached
    pub fn new_goal(&self) -> u64 {
        match self {
            GoalSignal::ServerGoalReached { new_goal, .. } => *new_goal,
            GoalSignal::PlayerGoalReached { new_goal, .. } => *new_goal,
        }
    }
}
