//! Integration tests for loading historical save layouts

use kill_counter::migration::{migrate, normalize_value, PersistedDocument, Repair, SchemaKind};
use kill_counter::{CounterStore, MemorySlot, PlayerRecord};
use serde_json::{json, Value};

fn classify(value: Value) -> PersistedDocument {
    PersistedDocument::classify(Some(value))
}

#[test]
fn test_schema_detection() {
    let cases = vec![
        (json!({"KillCounts": {"Ana": 3}}), SchemaKind::FlatIntMap),
        (json!({"KillCounts": {"Ana": [3, 50]}}), SchemaKind::PairArrayMap),
        (json!({"KillCounts": {"Ana": {"kills": 3}}}), SchemaKind::RichRecordMap),
        (json!({"KillCounts": {"Ana": 3, "Bo": [4]}}), SchemaKind::Mixed),
        (json!({"Leaderboard": {"Ana": 3}}), SchemaKind::LeaderboardOnly),
        (
            json!({"SchemaVersion": 4, "KillCounts": {"Ana": {"kills": 3, "goal": 50}}}),
            SchemaKind::Current,
        ),
        (json!([1, 2, 3]), SchemaKind::Absent),
        (json!({"Unrelated": true}), SchemaKind::Absent),
    ];

    for (value, expected) in cases {
        assert_eq!(classify(value.clone()).schema(), expected, "{}", value);
    }
    assert_eq!(PersistedDocument::classify(None).schema(), SchemaKind::Absent);
}

#[test]
fn test_leaderboard_only_seeds_players() {
    let state = normalize_value(Some(json!({
        "TotalKills": 75,
        "Leaderboard": {"Ana": 60, "Bo": 15}
    })));

    assert_eq!(state.total_kills, 75);
    assert_eq!(state.server_goal, 100);
    assert_eq!(state.players["Ana"], PlayerRecord { kills: 60, goal: 100, deaths: 0 });
    assert_eq!(state.players["Bo"].goal, 50);
    assert_eq!(state.leaderboard.len(), 2);
}

#[test]
fn test_rich_records_keep_deaths_and_goals() {
    let state = normalize_value(Some(json!({
        "TotalKills": 40,
        "ServerKillGoal": 100,
        "KillCounts": {
            "Ana": {"kills": 30, "goal": 200, "deaths": 4},
            "Bo": {"kills": 10}
        },
        "Leaderboard": {"Ana": 30}
    })));

    assert_eq!(state.players["Ana"], PlayerRecord { kills: 30, goal: 200, deaths: 4 });
    assert_eq!(state.players["Bo"], PlayerRecord { kills: 10, goal: 50, deaths: 0 });
    // Legacy documents get missing leaderboard entries backfilled
    assert_eq!(state.leaderboard["Bo"], 10);
}

#[test]
fn test_malformed_fields_fall_back_to_defaults() {
    let result = migrate(classify(json!({
        "TotalKills": "many",
        "ServerKillGoal": -5,
        "KillCounts": {"Ana": 12, "Bo": "lots", "Cy": 7.0}
    })));

    let state = &result.state;
    assert_eq!(state.total_kills, 0);
    assert_eq!(state.server_goal, 50);
    assert!(!state.players.contains_key("Bo"));
    assert_eq!(state.players["Cy"].kills, 7);
    assert!(result
        .repairs
        .contains(&Repair::GoalDefaulted { player: None, goal: 50 }));
}

#[test]
fn test_stale_server_goal_is_raised() {
    let result = migrate(classify(json!({
        "TotalKills": 260,
        "ServerKillGoal": 200,
        "KillCounts": {}
    })));

    assert_eq!(result.state.server_goal, 300);
    assert!(result.repairs.contains(&Repair::GoalRaised {
        player: None,
        stored: 200,
        repaired: 300,
    }));
}

#[test]
fn test_reached_goal_is_flagged_not_changed() {
    let result = migrate(classify(json!({
        "KillCounts": {"Ana": [50, 50]}
    })));

    assert_eq!(result.state.players["Ana"].goal, 50);
    assert!(result.repairs.contains(&Repair::GoalAlreadyReached {
        player: Some("Ana".to_string()),
        goal: 50,
    }));
}

#[test]
fn test_camel_case_aliases() {
    let state = normalize_value(Some(json!({
        "totalKills": 3,
        "serverGoal": 100,
        "players": {"Ana": {"kills": 3, "goal": 50}},
        "leaderboard": {"Ana": 3}
    })));

    assert_eq!(state.total_kills, 3);
    assert_eq!(state.players["Ana"].kills, 3);
}

#[test]
fn test_open_legacy_slot_then_save_upgrades_it() {
    let mut slot = MemorySlot::with_document(json!({
        "TotalKills": 12,
        "ServerKillGoal": 100,
        "KillCounts": {"Ana": [12, 50]}
    }));

    let store = CounterStore::open(&slot).unwrap();
    store.save(&mut slot).unwrap();

    let document = slot.document().unwrap().clone();
    assert_eq!(document["SchemaVersion"], 4);
    assert_eq!(classify(document).schema(), SchemaKind::Current);
}

#[test]
fn test_server_goal_landing_on_total_is_flagged() {
    let stored = migrate(classify(json!({
        "TotalKills": 100,
        "ServerKillGoal": 100,
        "KillCounts": {}
    })));
    assert!(stored.repairs.contains(&Repair::GoalAlreadyReached {
        player: None,
        goal: 100,
    }));

    let defaulted = migrate(classify(json!({
        "TotalKills": 100,
        "KillCounts": {}
    })));
    assert_eq!(defaulted.state.server_goal, 100);
    assert!(defaulted.repairs.contains(&Repair::GoalAlreadyReached {
        player: None,
        goal: 100,
    }));
}

#[test]
fn test_fresh_totals_are_not_flagged() {
    let result = migrate(classify(json!({
        "TotalKills": 0,
        "ServerKillGoal": 100,
        "KillCounts": {}
    })));
    assert!(!result
        .repairs
        .iter()
        .any(|repair| matches!(repair, Repair::GoalAlreadyReached { .. })));
}
