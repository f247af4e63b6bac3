//! Text rendering for goal signals and leaderboard listings
//!
//! Pure formatting. Delivering the text to players is the host's job.

use crate::types::{GoalSignal, PlayerRecord, ServerProgress, Standing};

const RULE: &str = "=================================";

/// Upper-cased label for the tracked entity, e.g. `wolf` -> `WOLF`
pub fn label(tracked: &str) -> String {
    tracked.trim().to_uppercase()
}

/// Announcement for the server total reaching its goal
pub fn server_goal_message(label: &str, reached: u64, new_goal: u64) -> String {
    format!(
        " *** {label} SLAYERS UNITE! ***\n\
         | {reached} {noun} kills reached by the whole server!\n\
         | New server goal: {new_goal} kills!\n",
        label = label,
        noun = label.to_lowercase(),
        reached = reached,
        new_goal = new_goal
    )
}

/// Announcement for a player reaching their personal goal
pub fn player_goal_message(label: &str, player: &str, reached: u64, new_goal: u64) -> String {
    format!(
        " *** {label} HUNTER EXTRAORDINAIRE! ***\n\
         | {player} reached {reached} kills!\n\
         | New personal goal: {new_goal} kills!\n",
        label = label,
        player = player,
        reached = reached,
        new_goal = new_goal
    )
}

/// Announcement text for any goal signal
pub fn signal_message(label: &str, signal: &GoalSignal) -> String {
    match signal {
        GoalSignal::ServerGoalReached { reached, new_goal } => {
            server_goal_message(label, *reached, *new_goal)
        }
        GoalSignal::PlayerGoalReached {
            player,
            reached,
            new_goal,
        } => player_goal_message(label, player, *reached, *new_goal),
    }
}

/// Leaderboard listing; `your_kills` adds the caller's own count
pub fn leaderboard_listing(
    label: &str,
    standings: &[Standing],
    progress: ServerProgress,
    your_kills: Option<u64>,
) -> String {
    let mut list = format!("{} EXTERMINATION LEADERBOARD\n{}\n", label, RULE);

    if standings.is_empty() {
        list.push_str("No kills on the board yet.\n");
    }
    for standing in standings {
        list.push_str(&format!(
            "{}. {}: {} kills\n",
            standing.rank, standing.name, standing.kills
        ));
    }

    list.push_str("---------------------------------\n");
    list.push_str(&format!(
        "Total {} Kills: {}\n",
        title_case(label),
        progress.total_kills
    ));
    if let Some(kills) = your_kills {
        list.push_str(&format!("Your Kills: {}\n", kills));
    }
    list.push_str(RULE);
    list.push('\n');
    list
}

/// Personal progress line for one player
pub fn player_progress(name: &str, record: Option<&PlayerRecord>) -> String {
    match record {
        Some(record) => format!(
            "{}: {} kills, {} deaths, next goal {} kills",
            name, record.kills, record.deaths, record.goal
        ),
        None => format!("{} has no recorded kills yet", name),
    }
}

/// Server-wide progress line
pub fn server_progress(label: &str, progress: ServerProgress) -> String {
    format!(
        "Total {} kills: {}, next server goal {} kills",
        label.to_lowercase(),
        progress.total_kills,
        progress.server_goal
    )
}

fn title_case(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
