//! Leaderboard ranking
//!
//! Ordering: kill count descending, ties broken by player name ascending
//! (byte order). The input map is never mutated.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::types::Standing;

fn by_rank(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    b.1.cmp(a.1).then_with(|| a.0.cmp(b.0))
}

fn ranked(leaderboard: &BTreeMap<String, u64>) -> Vec<(&String, &u64)> {
    let mut entries: Vec<_> = leaderboard.iter().collect();
    entries.sort_by(by_rank);
    entries
}

/// At most `n` leading players of the leaderboard
pub fn top_n(leaderboard: &BTreeMap<String, u64>, n: usize) -> Vec<Standing> {
    ranked(leaderboard)
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(index, (name, kills))| Standing {
            rank: index + 1,
            name: name.clone(),
            kills: *kills,
        })
        .collect()
}

/// 1-based position of `name`, if it is on the leaderboard
pub fn rank_of(leaderboard: &BTreeMap<String, u64>, name: &str) -> Option<usize> {
    let kills = *leaderboard.get(name)?;
    // Everyone strictly ahead: more kills, or same kills and a smaller name.
    let ahead = leaderboard
        .iter()
        .filter(|(other, other_kills)| {
            **other_kills > kills || (**other_kills == kills && other.as_str() < name)
        })
        .count();
    Some(ahead + 1)
}
