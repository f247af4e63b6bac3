//! Host bridge
//!
//! Connects a [`CounterStore`] to a game host over newline-delimited JSON:
//! [`HostEvent`] lines come in, [`HostMessage`] lines go out. The bridge
//! saves on `world_save`, after commands that change persisted state, and
//! once more when the input ends.

mod messages;

use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::announce;
use crate::commands::{CommandContext, CommandRegistry};
use crate::config::BridgeConfig;
use crate::counter_store::CounterStore;
use crate::error::StoreResult;
use crate::persistence::SaveSlot;

pub use messages::{HostEvent, HostMessage};

/// Event loop between a game host and the kill counter
pub struct HostBridge<S: SaveSlot> {
    store: CounterStore,
    registry: CommandRegistry,
    config: BridgeConfig,
    slot: S,
}

impl<S: SaveSlot> HostBridge<S> {
    /// Open the store from the slot and register the built-in commands
    pub fn open(slot: S, config: BridgeConfig) -> StoreResult<Self> {
        let store = CounterStore::open(&slot)?;
        Ok(Self {
            store,
            registry: CommandRegistry::with_defaults(),
            config,
            slot,
        })
    }

    /// Get the store
    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    /// Get the save slot
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Get the configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run until the input ends, then save (blocking)
    pub fn run<R: BufRead, W: Write>(&mut self, mut reader: R, mut writer: W) -> StoreResult<()> {
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                for message in self.handle_line(trimmed) {
                    send_message(&mut writer, &message)?;
                }
            }
            line.clear();
        }

        info!("Host input closed, saving");
        self.save()
    }

    /// Handle a single input line
    pub fn handle_line(&mut self, line: &str) -> Vec<HostMessage> {
        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => self.handle_event(event),
            Err(e) => {
                warn!("Ignoring unparsable host line: {}", e);
                vec![HostMessage::error(format!("Invalid event: {}", e))]
            }
        }
    }

    /// Handle a single host event
    ///
    /// Never fails: a save or reload that goes wrong is reported as an
    /// `error` message and the in-memory state is kept.
    pub fn handle_event(&mut self, event: HostEvent) -> Vec<HostMessage> {
        match event {
            HostEvent::EntityDeath { entity, killer } => self.handle_kill(&entity, killer),
            HostEvent::PlayerDeath { player, cause } => {
                if self.config.is_tracked(&cause) {
                    self.store.record_death(&player);
                }
                Vec::new()
            }
            HostEvent::Command {
                name,
                caller,
                admin,
                args,
            } => self.handle_command(&name, caller, admin, args),
            HostEvent::WorldSave => self.try_save().into_iter().collect(),
            HostEvent::WorldLoad => self.reload(),
        }
    }

    fn handle_kill(&mut self, entity: &str, killer: Option<String>) -> Vec<HostMessage> {
        if !self.config.is_tracked(entity) {
            debug!("Ignoring death of untracked entity {}", entity);
            return Vec::new();
        }

        let label = self.config.label();
        self.store
            .record_event(killer.as_deref())
            .iter()
            .map(|signal| HostMessage::broadcast(announce::signal_message(&label, signal)))
            .collect()
    }

    fn handle_command(
        &mut self,
        name: &str,
        caller: Option<String>,
        admin: bool,
        args: serde_json::Value,
    ) -> Vec<HostMessage> {
        let mut ctx = CommandContext {
            store: &mut self.store,
            config: &self.config,
            caller: caller.as_deref(),
            is_admin: admin,
        };

        let mut failure = None;
        let (ok, text) = match self.registry.dispatch(name, &mut ctx, args) {
            Ok(outcome) if outcome.persist => {
                failure = self.try_save();
                let text = match failure {
                    Some(_) => format!(
                        "{}\n(Saving failed, the change is kept in memory.)",
                        outcome.text
                    ),
                    None => outcome.text,
                };
                (true, text)
            }
            Ok(outcome) => (true, outcome.text),
            Err(e) => {
                debug!("Command {} failed: {}", name, e);
                (false, e.to_string())
            }
        };

        let mut messages = vec![HostMessage::Reply {
            to: caller,
            ok,
            text,
        }];
        messages.extend(failure);
        messages
    }

    /// Replace the in-memory state with what the slot holds
    fn reload(&mut self) -> Vec<HostMessage> {
        match CounterStore::open(&self.slot) {
            Ok(store) => {
                self.store = store;
                Vec::new()
            }
            Err(e) => {
                warn!("Reload failed, keeping current state: {}", e);
                vec![HostMessage::error(format!("Reload failed: {}", e))]
            }
        }
    }

    /// Save the current state through the slot
    pub fn save(&mut self) -> StoreResult<()> {
        self.store.save(&mut self.slot)
    }

    /// Save, turning a failure into a message for the host
    fn try_save(&mut self) -> Option<HostMessage> {
        match self.save() {
            Ok(()) => None,
            Err(e) => {
                warn!("Save failed, keeping state in memory: {}", e);
                Some(HostMessage::error(format!("Save failed: {}", e)))
            }
        }
    }
}

fn send_message<W: Write>(writer: &mut W, message: &HostMessage) -> StoreResult<()> {
    let json = serde_json::to_string(message)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
