//! Read-only queries on the counter store

use crate::leaderboard;
use crate::types::{PlayerRecord, ServerProgress, Standing};

use super::CounterStore;

pub fn player<'a>(store: &'a CounterStore, name: &str) -> Option<&'a PlayerRecord> {
    store.state.players.get(name)
}

pub fn server_progress(store: &CounterStore) -> ServerProgress {
    store.state.progress()
}

/// Top `n` of the leaderboard cache, as of now
pub fn top_n(store: &CounterStore, n: usize) -> Vec<Standing> {
    leaderboard::top_n(&store.state.leaderboard, n)
}

pub fn rank_of(store: &CounterStore, name: &str) -> Option<usize> {
    leaderboard::rank_of(&store.state.leaderboard, name)
}
