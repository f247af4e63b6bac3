//! Error types for the kill counter
//!
//! Migration and the in-memory counter operations never fail; these errors
//! only come out of persistence I/O and the command/host layers.

use thiserror::Error;

/// Result type for fallible kill counter operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting state or dispatching commands
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the save slot failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a document or a host message failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A save file exists but neither it nor its backup could be parsed
    #[error("Save slot corrupted: {0}")]
    Corrupted(String),

    /// No command is registered under this name or alias
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The caller lacks the privilege the command requires
    #[error("Permission denied for command '{command}'")]
    PermissionDenied { command: String },

    /// A command argument had the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
