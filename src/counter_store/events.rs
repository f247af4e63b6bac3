//! Event operations for the counter store

use log::{debug, info};

use crate::goal::escalate;
use crate::types::{GoalSignal, PlayerRecord};

use super::CounterStore;

/// Count one tracked kill and report any goal it landed on
///
/// `actor` names the killer; `None`, an empty or a whitespace-only name
/// leaves the kill unattributed but still counted in the total. The server
/// goal is checked before the player goal and both may fire on one event.
/// Goals fire on exact equality only.
pub fn record_event(store: &mut CounterStore, actor: Option<&str>) -> Vec<GoalSignal> {
    let state = &mut store.state;
    let mut signals = Vec::new();

    state.total_kills = state.total_kills.saturating_add(1);

    let actor = actor.filter(|name| !name.trim().is_empty());
    let player_kills = actor.map(|name| {
        let record = state
            .players
            .entry(name.to_string())
            .and_modify(|record| record.kills = record.kills.saturating_add(1))
            .or_insert_with(PlayerRecord::first_kill);
        let kills = record.kills;
        state.leaderboard.insert(name.to_string(), kills);
        kills
    });

    debug!(
        "Kill recorded for {} (total {})",
        actor.unwrap_or("<unattributed>"),
        state.total_kills
    );

    if state.total_kills == state.server_goal {
        let reached = state.server_goal;
        state.server_goal = escalate(reached);
        info!(
            "Server goal {} reached, new goal {}",
            reached, state.server_goal
        );
        signals.push(GoalSignal::ServerGoalReached {
            reached,
            new_goal: state.server_goal,
        });
    }

    if let (Some(name), Some(kills)) = (actor, player_kills) {
        if let Some(record) = state.players.get_mut(name) {
            if kills == record.goal {
                let reached = record.goal;
                record.goal = escalate(reached);
                info!(
                    "Player {} reached goal {}, new goal {}",
                    name, reached, record.goal
                );
                signals.push(GoalSignal::PlayerGoalReached {
                    player: name.to_string(),
                    reached,
                    new_goal: record.goal,
                });
            }
        }
    }

    signals
}

/// Count a death of a known player; unknown players are ignored
///
/// Returns whether a record was updated.
pub fn record_death(store: &mut CounterStore, player: &str) -> bool {
    match store.state.players.get_mut(player) {
        Some(record) => {
            record.deaths = record.deaths.saturating_add(1);
            debug!("Death recorded for {} ({} total)", player, record.deaths);
            true
        }
        None => {
            debug!("Ignoring death of unknown player {}", player);
            false
        }
    }
}

/// Clear the leaderboard cache; totals, goals and player records stay
pub fn reset_leaderboard(store: &mut CounterStore) {
    let cleared = store.state.leaderboard.len();
    store.state.leaderboard.clear();
    info!(
        "Leaderboard reset ({} entries cleared, {} total kills kept)",
        cleared, store.state.total_kills
    );
}
