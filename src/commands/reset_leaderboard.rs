//! Leaderboard reset command

use serde_json::{json, Value};

use crate::error::StoreResult;

use super::{Command, CommandContext, CommandOutcome, CommandSpec};

/// Clears the leaderboard without touching totals or player records
pub struct ResetLeaderboardCommand;

impl ResetLeaderboardCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResetLeaderboardCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ResetLeaderboardCommand {
    fn definition(&self) -> CommandSpec {
        CommandSpec {
            name: "reset_leaderboard".to_string(),
            aliases: Vec::new(),
            description: "Reset the leaderboard without affecting total kills".to_string(),
            requires_admin: true,
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _params: Value) -> StoreResult<CommandOutcome> {
        ctx.store.reset_leaderboard();
        Ok(CommandOutcome::persisted(format!(
            "{} kill leaderboard has been reset. Total kill count remains unchanged.",
            ctx.config.label()
        )))
    }
}
