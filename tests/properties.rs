//! Property tests for goals, migration and the leaderboard

use std::collections::BTreeMap;

use kill_counter::goal::round_goal;
use kill_counter::leaderboard::top_n;
use kill_counter::migration::normalize_value;
use kill_counter::{CounterStore, GoalSignal};
use proptest::prelude::*;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
enum Op {
    Kill(Option<usize>),
    Death(usize),
    Reset,
}

const NAMES: &[&str] = &["Ana", "Bo", "Cy", "Dee"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => prop::option::weighted(0.9, 0..NAMES.len()).prop_map(Op::Kill),
        2 => (0..NAMES.len()).prop_map(Op::Death),
        1 => Just(Op::Reset),
    ]
}

fn apply(ops: &[Op]) -> (CounterStore, Vec<GoalSignal>) {
    let mut store = CounterStore::new();
    let mut signals = Vec::new();
    for op in ops {
        match op {
            Op::Kill(actor) => signals.extend(store.record_event(actor.map(|i| NAMES[i]))),
            Op::Death(i) => {
                store.record_death(NAMES[*i]);
            }
            Op::Reset => store.reset_leaderboard(),
        }
    }
    (store, signals)
}

fn legacy_entry() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0u64..500).prop_map(|k| json!(k)),
        (0u64..500, 1u64..600).prop_map(|(k, g)| json!([k, g])),
        (0u64..500).prop_map(|k| json!([k])),
        (0u64..500, 1u64..600, 0u64..20)
            .prop_map(|(k, g, d)| json!({"kills": k, "goal": g, "deaths": d})),
    ]
}

proptest! {
    #[test]
    fn round_goal_is_a_positive_multiple_above_count(kills in 0u64..1_000_000) {
        let goal = round_goal(kills);
        prop_assert_eq!(goal % 50, 0);
        prop_assert!(goal >= kills);
        prop_assert!(goal >= 50);
    }

    #[test]
    fn legacy_documents_have_consistent_keys(
        counts in prop::collection::btree_map("[A-Za-z]{1,6}", legacy_entry(), 0..8),
        board in prop::collection::btree_map("[A-Za-z]{1,6}", 0u64..500, 0..8),
        total in 0u64..5000,
    ) {
        let state = normalize_value(Some(json!({
            "TotalKills": total,
            "KillCounts": counts,
            "Leaderboard": board,
        })));

        let players: Vec<_> = state.players.keys().collect();
        let ranked: Vec<_> = state.leaderboard.keys().collect();
        prop_assert_eq!(players, ranked);
        for record in state.players.values() {
            prop_assert!(record.goal >= record.kills);
            prop_assert!(record.goal > 0);
        }
        prop_assert!(state.server_goal >= state.total_kills);
    }

    #[test]
    fn save_then_load_round_trips(ops in prop::collection::vec(op(), 0..300)) {
        let (store, _) = apply(&ops);
        let state = store.snapshot();
        let document = state.to_document().unwrap();
        prop_assert_eq!(&normalize_value(Some(document)), state);
    }

    #[test]
    fn kills_keep_totals_and_leaderboard_in_step(ops in prop::collection::vec(op(), 0..300)) {
        let (mut store, _) = apply(&ops);
        let before = store.snapshot().clone();

        let signals = store.record_event(Some("Ana"));
        let after = store.snapshot();
        let kills_before = before.players.get("Ana").map(|r| r.kills).unwrap_or(0);

        prop_assert_eq!(after.total_kills, before.total_kills + 1);
        prop_assert_eq!(after.players["Ana"].kills, kills_before + 1);
        prop_assert_eq!(after.leaderboard["Ana"], kills_before + 1);
        prop_assert!(signals.len() <= 2);
    }

    #[test]
    fn each_goal_fires_once(ops in prop::collection::vec(op(), 0..400)) {
        let (store, signals) = apply(&ops);

        let mut reached: Vec<(Option<String>, u64)> = signals
            .iter()
            .map(|signal| match signal {
                GoalSignal::ServerGoalReached { reached, .. } => (None, *reached),
                GoalSignal::PlayerGoalReached { player, reached, .. } => {
                    (Some(player.clone()), *reached)
                }
            })
            .collect();
        let count = reached.len();
        reached.sort();
        reached.dedup();
        prop_assert_eq!(reached.len(), count);

        for signal in &signals {
            prop_assert_eq!(signal.new_goal(), match signal {
                GoalSignal::ServerGoalReached { reached, .. } => reached * 2,
                GoalSignal::PlayerGoalReached { reached, .. } => reached * 2,
            });
        }
        prop_assert!(store.snapshot().total_kills < store.snapshot().server_goal);
    }

    #[test]
    fn reset_only_touches_the_leaderboard(ops in prop::collection::vec(op(), 0..200)) {
        let (mut store, _) = apply(&ops);
        let before = store.snapshot().clone();

        store.reset_leaderboard();
        let after = store.snapshot();

        prop_assert!(after.leaderboard.is_empty());
        prop_assert_eq!(after.total_kills, before.total_kills);
        prop_assert_eq!(after.server_goal, before.server_goal);
        prop_assert_eq!(&after.players, &before.players);
    }

    #[test]
    fn top_n_is_bounded_and_keeps_the_leader(
        board in prop::collection::btree_map("[a-z]{1,5}", 0u64..100, 0..12),
        n in 0usize..8,
    ) {
        let board: BTreeMap<String, u64> = board;
        let top = top_n(&board, n);

        prop_assert!(top.len() <= n);
        prop_assert_eq!(top.len(), n.min(board.len()));
        if n >= 1 {
            if let Some(max) = board.values().max() {
                prop_assert_eq!(top[0].kills, *max);
            }
        }
        for pair in top.windows(2) {
            prop_assert!(pair[0].kills >= pair[1].kills);
        }
    }
}
