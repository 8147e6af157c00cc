//! Command-mode session state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current state of a command-mode session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CommandModeState {
    /// Waiting for the wake word
    #[default]
    Inactive,
    /// Wake word heard, waiting for the command text
    Listening { since: DateTime<Utc> },
    /// Parsing the command text
    Processing { text: String },
    /// Running the parsed command
    Executing { display_name: String },
    /// Finished, result shown briefly before returning to inactive.
    /// Only entered when every step succeeded, so `success` is always true
    /// here; failed runs go to [`CommandModeState::Error`].
    Completed { success: bool, message: String },
    /// Failed, message shown briefly before returning to inactive
    Error { message: String },
}

impl CommandModeState {
    pub fn is_inactive(&self) -> bool {
        matches!(self, CommandModeState::Inactive)
    }

    pub fn is_listening(&self) -> bool {
        matches!(self, CommandModeState::Listening { .. })
    }

    /// Returns true while a command is being parsed or run
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            CommandModeState::Processing { .. } | CommandModeState::Executing { .. }
        )
    }

    /// Completed or error: a result is on display
    pub fn is_showing_result(&self) -> bool {
        matches!(
            self,
            CommandModeState::Completed { .. } | CommandModeState::Error { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandModeState::Inactive => "inactive",
            CommandModeState::Listening { .. } => "listening",
            CommandModeState::Processing { .. } => "processing",
            CommandModeState::Executing { .. } => "executing",
            CommandModeState::Completed { .. } => "completed",
            CommandModeState::Error { .. } => "error",
        }
    }
}

impl std::fmt::Display for CommandModeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandModeState::Inactive => write!(f, "Inactive"),
            CommandModeState::Listening { .. } => write!(f, "Listening"),
            CommandModeState::Processing { text } => write!(f, "Processing \"{}\"", text),
            CommandModeState::Executing { display_name } => write!(f, "Executing {}", display_name),
            CommandModeState::Completed { message, .. } => write!(f, "Done: {}", message),
            CommandModeState::Error { message } => write!(f, "Error: {}", message),
        }
    }
}
