//! Server goal query command

use serde_json::{json, Value};

use crate::announce;
use crate::error::StoreResult;

use super::{Command, CommandContext, CommandOutcome, CommandSpec};

/// Shows the server total and the next server goal
pub struct ServerGoalCommand;

impl ServerGoalCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ServerGoalCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ServerGoalCommand {
    fn definition(&self) -> CommandSpec {
        CommandSpec {
            name: "server_goal".to_string(),
            aliases: vec!["sgoal".to_string()],
            description: "Show total kills and the next server goal".to_string(),
            requires_admin: false,
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _params: Value) -> StoreResult<CommandOutcome> {
        Ok(CommandOutcome::reply(announce::server_progress(
            &ctx.config.label(),
            ctx.store.server_progress(),
        )))
    }
}
