//! Player and admin commands
//!
//! Each command implements [`Command`] and is registered in a
//! [`CommandRegistry`] under its name and aliases:
//! - `list_kills` (`lwk`): leaderboard listing
//! - `reset_leaderboard`: clear the leaderboard (admin only)
//! - `kill_goal` (`goal`): one player's kills and next goal
//! - `server_goal` (`sgoal`): server total and next goal

mod kill_goal;
mod list_kills;
mod reset_leaderboard;
mod server_goal;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::counter_store::CounterStore;
use crate::error::{StoreError, StoreResult};

pub use kill_goal::KillGoalCommand;
pub use list_kills::ListKillsCommand;
pub use reset_leaderboard::ResetLeaderboardCommand;
pub use server_goal::ServerGoalCommand;

/// Command definition
#[derive(Serialize, Debug, Clone)]
pub struct CommandSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    #[serde(rename = "requiresAdmin")]
    pub requires_admin: bool,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Everything a command may read or change
pub struct CommandContext<'a> {
    pub store: &'a mut CounterStore,
    pub config: &'a BridgeConfig,
    /// Player who issued the command, `None` for the server console
    pub caller: Option<&'a str>,
    pub is_admin: bool,
}

/// Reply of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub text: String,
    /// Ask the host to save right after the command
    pub persist: bool,
}

impl CommandOutcome {
    /// Reply that leaves nothing to save
    pub fn reply(text: String) -> Self {
        Self {
            text,
            persist: false,
        }
    }

    /// Reply after a change that must be saved
    pub fn persisted(text: String) -> Self {
        Self {
            text,
            persist: true,
        }
    }
}

/// Trait for commands
///
/// All commands must implement this trait to be registered.
pub trait Command {
    /// Get the command definition
    fn definition(&self) -> CommandSpec;

    /// Execute the command with the given arguments
    fn execute(&self, ctx: &mut CommandContext<'_>, params: Value) -> StoreResult<CommandOutcome>;

    /// Get the command name (convenience method)
    fn name(&self) -> String {
        self.definition().name
    }
}

/// Commands by name, resolvable through aliases
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in command
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_all_commands(&mut registry);
        registry
    }

    /// Register a command under its name and aliases
    pub fn register(&mut self, command: Box<dyn Command>) -> &mut Self {
        let spec = command.definition();
        let key = spec.name.to_lowercase();
        for alias in &spec.aliases {
            self.aliases.insert(alias.to_lowercase(), key.clone());
        }
        self.commands.insert(key, command);
        self
    }

    /// Get the number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if no command is registered
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Find a command by name or alias (case-insensitive)
    pub fn resolve(&self, name: &str) -> Option<&dyn Command> {
        let key = name.trim().to_lowercase();
        let key = self.aliases.get(&key).unwrap_or(&key);
        self.commands.get(key).map(|command| command.as_ref())
    }

    /// Definitions of all commands, sorted by name
    pub fn definitions(&self) -> Vec<CommandSpec> {
        let mut specs: Vec<_> = self.commands.values().map(|c| c.definition()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Resolve, check privileges and run a command
    pub fn dispatch(
        &self,
        name: &str,
        ctx: &mut CommandContext<'_>,
        params: Value,
    ) -> StoreResult<CommandOutcome> {
        let command = self
            .resolve(name)
            .ok_or_else(|| StoreError::UnknownCommand(name.to_string()))?;

        let spec = command.definition();
        if spec.requires_admin && !ctx.is_admin {
            return Err(StoreError::PermissionDenied { command: spec.name });
        }

        command.execute(ctx, params)
    }
}

/// Register all built-in commands
pub fn register_all_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(ListKillsCommand::new()));
    registry.register(Box::new(ResetLeaderboardCommand::new()));
    registry.register(Box::new(KillGoalCommand::new()));
    registry.register(Box::new(ServerGoalCommand::new()));
}

/// Optional string argument
pub(crate) fn string_arg<'v>(params: &'v Value, key: &str) -> StoreResult<Option<&'v str>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(StoreError::InvalidArgument(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
    }
}

/// Optional positive integer argument
pub(crate) fn count_arg(params: &Value, key: &str) -> StoreResult<Option<usize>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .filter(|n| *n > 0)
            .map(|n| Some(n as usize))
            .ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "'{}' must be a positive integer, got {}",
                    key, value
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context<'a>(
        store: &'a mut CounterStore,
        config: &'a BridgeConfig,
        is_admin: bool,
    ) -> CommandContext<'a> {
        CommandContext {
            store,
            config,
            caller: Some("Ana"),
            is_admin,
        }
    }

    #[test]
    fn test_registry_resolves_names_and_aliases() {
        let registry = CommandRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.resolve("list_kills").unwrap().name(), "list_kills");
        assert_eq!(registry.resolve("LWK").unwrap().name(), "list_kills");
        assert!(registry.resolve("fly").is_none());
    }

    #[test]
    fn test_dispatch_unknown_command() {
        let registry = CommandRegistry::with_defaults();
        let mut store = CounterStore::new();
        let config = BridgeConfig::default();
        let mut ctx = context(&mut store, &config, false);

        let err = registry.dispatch("fly", &mut ctx, json!({})).unwrap_err();
        assert!(matches!(err, StoreError::UnknownCommand(name) if name == "fly"));
    }

    #[test]
    fn test_dispatch_requires_admin() {
        let registry = CommandRegistry::with_defaults();
        let mut store = CounterStore::new();
        store.record_event(Some("Ana"));
        let config = BridgeConfig::default();

        let mut ctx = context(&mut store, &config, false);
        let err = registry
            .dispatch("reset_leaderboard", &mut ctx, json!({}))
            .unwrap_err();
        assert!(matches!(err, StoreError::PermissionDenied { .. }));
        assert_eq!(store.snapshot().leaderboard.len(), 1);
    }

    #[test]
    fn test_definitions_sorted() {
        let names: Vec<_> = CommandRegistry::with_defaults()
            .definitions()
            .into_iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            names,
            vec!["kill_goal", "list_kills", "reset_leaderboard", "server_goal"]
        );
    }

    #[test]
    fn test_argument_helpers() {
        let params = json!({"player": "Bo", "top": 3, "bad": -1});
        assert_eq!(string_arg(&params, "player").unwrap(), Some("Bo"));
        assert_eq!(string_arg(&params, "missing").unwrap(), None);
        assert!(string_arg(&params, "top").is_err());
        assert_eq!(count_arg(&params, "top").unwrap(), Some(3));
        assert!(count_arg(&params, "bad").is_err());
    }
}
