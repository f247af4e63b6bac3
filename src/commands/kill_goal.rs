//! Personal goal query command

use serde_json::{json, Value};

use crate::announce;
use crate::error::{StoreError, StoreResult};

use super::{string_arg, Command, CommandContext, CommandOutcome, CommandSpec};

/// Shows one player's kills, deaths and next goal
pub struct KillGoalCommand;

impl KillGoalCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KillGoalCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for KillGoalCommand {
    fn definition(&self) -> CommandSpec {
        CommandSpec {
            name: "kill_goal".to_string(),
            aliases: vec!["goal".to_string()],
            description: "Show a player's kills and next personal goal".to_string(),
            requires_admin: false,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "player": {
                        "type": "string",
                        "description": "Player to look up. Defaults to the caller"
                    }
                },
                "required": []
            }),
        }
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, params: Value) -> StoreResult<CommandOutcome> {
        let name = string_arg(&params, "player")?
            .or(ctx.caller)
            .ok_or_else(|| {
                StoreError::InvalidArgument("'player' is required from the console".to_string())
            })?;

        Ok(CommandOutcome::reply(announce::player_progress(
            name,
            ctx.store.player(name),
        )))
    }
}
