//! Leaderboard listing command

use serde_json::{json, Value};

use crate::announce;
use crate::error::StoreResult;

use super::{count_arg, Command, CommandContext, CommandOutcome, CommandSpec};

/// Lists the top killers, the server total and the caller's own kills
pub struct ListKillsCommand;

impl ListKillsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListKillsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ListKillsCommand {
    fn definition(&self) -> CommandSpec {
        CommandSpec {
            name: "list_kills".to_string(),
            aliases: vec!["lwk".to_string()],
            description: "List the top killers on the leaderboard".to_string(),
            requires_admin: false,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "top": {
                        "type": "integer",
                        "description": "Number of rows to show. Defaults to the configured leaderboard size"
                    }
                },
                "required": []
            }),
        }
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, params: Value) -> StoreResult<CommandOutcome> {
        let size = count_arg(&params, "top")?.unwrap_or(ctx.config.leaderboard_size);
        let standings = ctx.store.top_n(size);
        let your_kills = ctx
            .caller
            .map(|name| ctx.store.player(name).map(|record| record.kills).unwrap_or(0));

        Ok(CommandOutcome::reply(announce::leaderboard_listing(
            &ctx.config.label(),
            &standings,
            ctx.store.server_progress(),
            your_kills,
        )))
    }
}
