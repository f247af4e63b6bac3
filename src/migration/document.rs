//! Classification of persisted documents
//!
//! Every historical save layout is recognized here, once, and turned into a
//! [`PersistedDocument`]. Nothing downstream looks at raw JSON shapes.
//!
//! Recognized layouts of the kill-count map (`KillCounts`):
//!
//! ```text
//! flat integer   { "Ana": 12 }
//! pair array     { "Ana": [12, 50] }
//! rich record    { "Ana": { "kills": 12, "goal": 50, "deaths": 3 } }
//! ```
//!
//! Documents without a kill-count map fall back to their `Leaderboard`.

use std::collections::BTreeMap;

use log::warn;
use serde_json::{Map, Value};

use crate::types::CURRENT_SCHEMA_VERSION;

const TOTAL_KILLS_KEYS: &[&str] = &["TotalKills", "totalKills"];
const SERVER_GOAL_KEYS: &[&str] = &["ServerKillGoal", "serverGoal"];
const KILL_COUNTS_KEYS: &[&str] = &["KillCounts", "players"];
const LEADERBOARD_KEYS: &[&str] = &["Leaderboard", "leaderboard"];
const SCHEMA_VERSION_KEYS: &[&str] = &["SchemaVersion", "schemaVersion"];

/// Top-level scalars of a document, each absent when missing or malformed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentHeader {
    pub total_kills: Option<u64>,
    pub server_goal: Option<u64>,
    pub schema_version: Option<u64>,
}

impl DocumentHeader {
    /// Check if the document was written by the current schema
    pub fn is_current(&self) -> bool {
        matches!(self.schema_version, Some(v) if v >= CURRENT_SCHEMA_VERSION)
    }

    fn is_empty(&self) -> bool {
        self.total_kills.is_none() && self.server_goal.is_none() && self.schema_version.is_none()
    }
}

/// `[kills, goal]` entry of the pair-array layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillGoalPair {
    pub kills: u64,
    pub goal: Option<u64>,
}

/// `{kills, goal, deaths}` entry of the rich-record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFields {
    pub kills: u64,
    pub goal: Option<u64>,
    pub deaths: u64,
}

/// A single kill-count entry in whichever layout it was stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyEntry {
    FlatInt(u64),
    PairArray(KillGoalPair),
    RichRecord(RecordFields),
}

/// Parsed body of a document whose kill-count map uses entries of type `T`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<T> {
    pub header: DocumentHeader,
    pub players: BTreeMap<String, T>,
    pub leaderboard: BTreeMap<String, u64>,
}

/// A persisted document of any vintage, resolved at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedDocument {
    /// Nothing saved yet
    Absent,
    FlatIntMap(Document<u64>),
    PairArrayMap(Document<KillGoalPair>),
    RichRecordMap(Document<RecordFields>),
    /// Kill-count map whose entries use more than one layout
    Mixed(Document<LegacyEntry>),
    /// No kill-count map; the leaderboard is the only per-player source
    LeaderboardOnly {
        header: DocumentHeader,
        leaderboard: BTreeMap<String, u64>,
    },
}

/// Which layout a document was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Absent,
    FlatIntMap,
    PairArrayMap,
    RichRecordMap,
    Mixed,
    LeaderboardOnly,
    /// Rich records carrying the current version marker
    Current,
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaKind::Absent => write!(f, "absent"),
            SchemaKind::FlatIntMap => write!(f, "flat_int_map"),
            SchemaKind::PairArrayMap => write!(f, "pair_array_map"),
            SchemaKind::RichRecordMap => write!(f, "rich_record_map"),
            SchemaKind::Mixed => write!(f, "mixed"),
            SchemaKind::LeaderboardOnly => write!(f, "leaderboard_only"),
            SchemaKind::Current => write!(f, "current"),
        }
    }
}

impl PersistedDocument {
    /// Resolve a raw document into one of the known layouts
    ///
    /// Never fails: fields of unexpected shape are treated as absent. A
    /// value that is not an object, or an object with none of the known
    /// keys, is [`PersistedDocument::Absent`].
    pub fn classify(raw: Option<Value>) -> Self {
        let Some(Value::Object(root)) = raw else {
            return PersistedDocument::Absent;
        };

        let header = DocumentHeader {
            total_kills: lookup(&root, TOTAL_KILLS_KEYS).and_then(count_from),
            server_goal: lookup(&root, SERVER_GOAL_KEYS).and_then(count_from),
            schema_version: lookup(&root, SCHEMA_VERSION_KEYS).and_then(count_from),
        };

        let kill_counts = lookup(&root, KILL_COUNTS_KEYS).and_then(Value::as_object);
        let leaderboard_map = lookup(&root, LEADERBOARD_KEYS).and_then(Value::as_object);

        if kill_counts.is_none() && leaderboard_map.is_none() && header.is_empty() {
            return PersistedDocument::Absent;
        }

        let leaderboard = leaderboard_map.map(parse_leaderboard).unwrap_or_default();

        match kill_counts {
            Some(map) => classify_kill_counts(header, map, leaderboard),
            None => PersistedDocument::LeaderboardOnly {
                header,
                leaderboard,
            },
        }
    }

    /// The layout this document was recognized as
    pub fn schema(&self) -> SchemaKind {
        match self {
            PersistedDocument::Absent => SchemaKind::Absent,
            PersistedDocument::FlatIntMap(_) => SchemaKind::FlatIntMap,
            PersistedDocument::PairArrayMap(_) => SchemaKind::PairArrayMap,
            PersistedDocument::RichRecordMap(doc) if doc.header.is_current() => {
                SchemaKind::Current
            }
            PersistedDocument::RichRecordMap(_) => SchemaKind::RichRecordMap,
            PersistedDocument::Mixed(_) => SchemaKind::Mixed,
            PersistedDocument::LeaderboardOnly { .. } => SchemaKind::LeaderboardOnly,
        }
    }
}

fn classify_kill_counts(
    header: DocumentHeader,
    map: &Map<String, Value>,
    leaderboard: BTreeMap<String, u64>,
) -> PersistedDocument {
    let mut entries = BTreeMap::new();
    for (name, value) in map {
        match parse_entry(name, value) {
            Some(entry) => {
                entries.insert(name.clone(), entry);
            }
            None => warn!("Dropping kill count for '{}': unrecognized value {}", name, value),
        }
    }

    let mut kinds = entries.values().map(std::mem::discriminant);
    let uniform = match kinds.next() {
        Some(first) => kinds.all(|kind| kind == first),
        None => true,
    };

    if !uniform {
        return PersistedDocument::Mixed(Document {
            header,
            players: entries,
            leaderboard,
        });
    }

    let first = entries.values().next().copied();
    match first {
        Some(LegacyEntry::FlatInt(_)) => PersistedDocument::FlatIntMap(Document {
            header,
            players: narrow(entries, |entry| match entry {
                LegacyEntry::FlatInt(kills) => Some(kills),
                _ => None,
            }),
            leaderboard,
        }),
        Some(LegacyEntry::PairArray(_)) => PersistedDocument::PairArrayMap(Document {
            header,
            players: narrow(entries, |entry| match entry {
                LegacyEntry::PairArray(pair) => Some(pair),
                _ => None,
            }),
            leaderboard,
        }),
        // An empty map carries no layout of its own; read it as rich records.
        Some(LegacyEntry::RichRecord(_)) | None => PersistedDocument::RichRecordMap(Document {
            header,
            players: narrow(entries, |entry| match entry {
                LegacyEntry::RichRecord(fields) => Some(fields),
                _ => None,
            }),
            leaderboard,
        }),
    }
}

fn narrow<T>(
    entries: BTreeMap<String, LegacyEntry>,
    pick: impl Fn(LegacyEntry) -> Option<T>,
) -> BTreeMap<String, T> {
    entries
        .into_iter()
        .filter_map(|(name, entry)| pick(entry).map(|value| (name, value)))
        .collect()
}

fn parse_entry(name: &str, value: &Value) -> Option<LegacyEntry> {
    match value {
        Value::Number(_) => Some(LegacyEntry::FlatInt(count_or_zero(name, "kills", Some(value)))),
        Value::Array(items) => Some(LegacyEntry::PairArray(KillGoalPair {
            kills: count_or_zero(name, "kills", items.first()),
            goal: items.get(1).and_then(count_from).filter(|goal| *goal > 0),
        })),
        Value::Object(fields) => Some(LegacyEntry::RichRecord(RecordFields {
            kills: count_or_zero(name, "kills", lookup(fields, &["kills", "Kills"])),
            goal: lookup(fields, &["goal", "Goal"])
                .and_then(count_from)
                .filter(|goal| *goal > 0),
            deaths: count_or_zero(name, "deaths", lookup(fields, &["deaths", "Deaths"])),
        })),
        _ => None,
    }
}

fn parse_leaderboard(map: &Map<String, Value>) -> BTreeMap<String, u64> {
    let mut leaderboard = BTreeMap::new();
    for (name, value) in map {
        match count_from(value) {
            Some(kills) => {
                leaderboard.insert(name.clone(), kills);
            }
            None => warn!("Dropping leaderboard entry for '{}': {} is not a count", name, value),
        }
    }
    leaderboard
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

/// Read a non-negative integer, accepting integral floats such as `12.0`
pub(crate) fn count_from(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

fn count_or_zero(name: &str, field: &str, value: Option<&Value>) -> u64 {
    match value {
        None => 0,
        Some(value) => count_from(value).unwrap_or_else(|| {
            warn!("Defaulting {} of '{}' to 0: {} is not a count", field, name, value);
            0
        }),
    }
}
