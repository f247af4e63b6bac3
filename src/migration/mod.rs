//! Schema migration
//!
//! Turns a persisted document of any vintage into the current
//! [`ServerState`]:
//! 1. [`PersistedDocument::classify`] resolves the raw JSON into a layout
//! 2. [`migrate`] converts each player entry by its layout's rule
//! 3. Leaderboard and kill-count map are made key-consistent
//!
//! Migration never fails. Malformed fields fall back to defaults and every
//! repair is reported and logged.

mod document;

use std::collections::BTreeMap;

use log::{info, warn};
use serde_json::Value;

use crate::goal::{repair_goal, round_goal};
use crate::types::{PlayerRecord, ServerState};

pub use document::{
    Document, DocumentHeader, KillGoalPair, LegacyEntry, PersistedDocument, RecordFields,
    SchemaKind,
};

/// Result of a migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    pub state: ServerState,
    pub schema: SchemaKind,
    pub repairs: Vec<Repair>,
}

/// A change migration made to stored values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// Stored goal was below the round goal for the count and was raised
    GoalRaised {
        player: Option<String>,
        stored: u64,
        repaired: u64,
    },
    /// Goal was missing and was computed from the count
    GoalDefaulted { player: Option<String>, goal: u64 },
    /// Goal equals the count already; an exact-equality check will never
    /// fire for it again. Flagged only, the value is kept.
    GoalAlreadyReached { player: Option<String>, goal: u64 },
    /// Player found only in the leaderboard got a fresh record
    PlayerSeeded { player: String, kills: u64 },
    /// Player missing from the leaderboard was copied into it
    LeaderboardBackfilled { player: String, kills: u64 },
}

impl std::fmt::Display for Repair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Repair::GoalRaised {
                player,
                stored,
                repaired,
            } => write!(
                f,
                "goal of {} raised from {} to {}",
                subject(player),
                stored,
                repaired
            ),
            Repair::GoalDefaulted { player, goal } => {
                write!(f, "goal of {} defaulted to {}", subject(player), goal)
            }
            Repair::GoalAlreadyReached { player, goal } => write!(
                f,
                "goal of {} equals its kill count ({})",
                subject(player),
                goal
            ),
            Repair::PlayerSeeded { player, kills } => write!(
                f,
                "player '{}' seeded from leaderboard with {} kills",
                player, kills
            ),
            Repair::LeaderboardBackfilled { player, kills } => write!(
                f,
                "player '{}' added to leaderboard with {} kills",
                player, kills
            ),
        }
    }
}

fn subject(player: &Option<String>) -> String {
    match player {
        Some(name) => format!("player '{}'", name),
        None => "server".to_string(),
    }
}

/// Conversion of one kill-count entry into the current record
trait IntoPlayerRecord {
    fn into_record(self, name: &str, repairs: &mut Vec<Repair>) -> PlayerRecord;
}

impl IntoPlayerRecord for u64 {
    fn into_record(self, _name: &str, _repairs: &mut Vec<Repair>) -> PlayerRecord {
        PlayerRecord::seeded(self)
    }
}

impl IntoPlayerRecord for KillGoalPair {
    fn into_record(self, name: &str, repairs: &mut Vec<Repair>) -> PlayerRecord {
        let goal = match self.goal {
            Some(stored) => raise_goal(Some(name), stored, self.kills, repairs),
            None => default_goal(Some(name), self.kills, repairs),
        };
        PlayerRecord {
            kills: self.kills,
            goal,
            deaths: 0,
        }
    }
}

impl IntoPlayerRecord for RecordFields {
    fn into_record(self, name: &str, repairs: &mut Vec<Repair>) -> PlayerRecord {
        let goal = match self.goal {
            Some(stored) if stored >= self.kills => stored,
            Some(stored) => raise_goal(Some(name), stored, self.kills, repairs),
            None => default_goal(Some(name), self.kills, repairs),
        };
        PlayerRecord {
            kills: self.kills,
            goal,
            deaths: self.deaths,
        }
    }
}

impl IntoPlayerRecord for LegacyEntry {
    fn into_record(self, name: &str, repairs: &mut Vec<Repair>) -> PlayerRecord {
        match self {
            LegacyEntry::FlatInt(kills) => kills.into_record(name, repairs),
            LegacyEntry::PairArray(pair) => pair.into_record(name, repairs),
            LegacyEntry::RichRecord(fields) => fields.into_record(name, repairs),
        }
    }
}

fn raise_goal(player: Option<&str>, stored: u64, count: u64, repairs: &mut Vec<Repair>) -> u64 {
    let repaired = repair_goal(stored, count);
    if repaired != stored {
        repairs.push(Repair::GoalRaised {
            player: player.map(str::to_string),
            stored,
            repaired,
        });
    }
    repaired
}

fn default_goal(player: Option<&str>, count: u64, repairs: &mut Vec<Repair>) -> u64 {
    let goal = round_goal(count);
    repairs.push(Repair::GoalDefaulted {
        player: player.map(str::to_string),
        goal,
    });
    goal
}

/// Migrate a classified document, reporting every repair
pub fn migrate(document: PersistedDocument) -> MigrationResult {
    let schema = document.schema();
    let mut repairs = Vec::new();

    let state = match document {
        PersistedDocument::Absent => ServerState::new(),
        PersistedDocument::FlatIntMap(doc) => build_state(doc, &mut repairs),
        PersistedDocument::PairArrayMap(doc) => build_state(doc, &mut repairs),
        PersistedDocument::RichRecordMap(doc) => build_state(doc, &mut repairs),
        PersistedDocument::Mixed(doc) => build_state(doc, &mut repairs),
        PersistedDocument::LeaderboardOnly {
            header,
            leaderboard,
        } => build_state(
            Document::<u64> {
                header,
                players: BTreeMap::new(),
                leaderboard,
            },
            &mut repairs,
        ),
    };

    for repair in &repairs {
        warn!("[Migration] {}", repair);
    }
    if schema != SchemaKind::Current && schema != SchemaKind::Absent {
        info!(
            "[Migration] Migrated {} document: {} players, {} total kills",
            schema,
            state.players.len(),
            state.total_kills
        );
    }

    MigrationResult {
        state,
        schema,
        repairs,
    }
}

/// Migrate a classified document into the current state
pub fn normalize(document: PersistedDocument) -> ServerState {
    migrate(document).state
}

/// Classify and migrate a raw document in one step
pub fn normalize_value(raw: Option<Value>) -> ServerState {
    normalize(PersistedDocument::classify(raw))
}

fn build_state<T: IntoPlayerRecord>(doc: Document<T>, repairs: &mut Vec<Repair>) -> ServerState {
    let Document {
        header,
        players: entries,
        mut leaderboard,
    } = doc;

    let total_kills = header.total_kills.unwrap_or(0);
    let server_goal = match header.server_goal.filter(|goal| *goal > 0) {
        Some(stored) if stored >= total_kills => stored,
        Some(stored) => raise_goal(None, stored, total_kills, repairs),
        None => default_goal(None, total_kills, repairs),
    };
    if total_kills > 0 && server_goal == total_kills {
        repairs.push(Repair::GoalAlreadyReached {
            player: None,
            goal: server_goal,
        });
    }

    let mut players = BTreeMap::new();
    for (name, entry) in entries {
        let record = entry.into_record(&name, repairs);
        if record.kills > 0 && record.goal == record.kills {
            repairs.push(Repair::GoalAlreadyReached {
                player: Some(name.clone()),
                goal: record.goal,
            });
        }
        players.insert(name, record);
    }

    // Leaderboard names without a record: the leaderboard is the only source.
    for (name, kills) in &leaderboard {
        if !players.contains_key(name) {
            players.insert(name.clone(), PlayerRecord::seeded(*kills));
            repairs.push(Repair::PlayerSeeded {
                player: name.clone(),
                kills: *kills,
            });
        }
    }

    // A current-schema leaderboard is authoritative as saved, it may have
    // been reset on purpose.
    if !header.is_current() {
        for (name, record) in &players {
            if !leaderboard.contains_key(name) {
                leaderboard.insert(name.clone(), record.kills);
                repairs.push(Repair::LeaderboardBackfilled {
                    player: name.clone(),
                    kills: record.kills,
                });
            }
        }
    }

    ServerState {
        total_kills,
        server_goal,
        players,
        leaderboard,
    }
}
