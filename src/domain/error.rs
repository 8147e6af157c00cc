//! Error kinds surfaced by the command engine

use std::time::Duration;

use super::intent::CommandIntent;

/// Errors from parsing, validating and running commands.
///
/// The `Display` text is the user-facing message shown in the error state.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unrecognized command: \"{text}\"")]
    Unrecognized { text: String },

    #[error("{intent} is missing required value: {key}")]
    MissingEntity { intent: CommandIntent, key: String },

    #[error("The {0} command is disabled")]
    Disabled(String),

    #[error("Cancelled: {0} was not confirmed")]
    ConfirmationDeclined(String),

    #[error("No handler registered for {0}")]
    NoHandler(String),

    #[error("{intent} failed: {source}")]
    HandlerFailed {
        intent: CommandIntent,
        #[source]
        source: anyhow::Error,
    },

    #[error("Step {} ({intent}) failed: {message}", .index + 1)]
    ChainFailed {
        intent: CommandIntent,
        index: usize,
        message: String,
    },

    #[error("Command timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Semantic classifier error: {0}")]
    Classifier(String),
}
