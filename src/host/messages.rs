//! Wire types of the host pipe
//!
//! One JSON object per line in both directions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event reported by the game host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// An entity died; `killer` is the player that dealt the blow, if any
    EntityDeath {
        entity: String,
        #[serde(default)]
        killer: Option<String>,
    },
    /// A player died; `cause` is the entity code of whatever killed them
    PlayerDeath {
        player: String,
        #[serde(default)]
        cause: String,
    },
    /// A chat or console command
    Command {
        name: String,
        #[serde(default)]
        caller: Option<String>,
        #[serde(default)]
        admin: bool,
        #[serde(default)]
        args: Value,
    },
    /// The host is saving the world
    WorldSave,
    /// The host (re)loaded the world
    WorldLoad,
}

/// Line written back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// Announcement for every player
    Broadcast { text: String },
    /// Answer to a command, addressed to its caller (`None` is the console)
    Reply {
        to: Option<String>,
        ok: bool,
        text: String,
    },
    /// An input line that could not be handled
    Error { message: String },
}

impl HostMessage {
    pub fn broadcast(text: String) -> Self {
        HostMessage::Broadcast { text }
    }

    pub fn error(message: impl Into<String>) -> Self {
        HostMessage::Error {
            message: message.into(),
        }
    }
}
