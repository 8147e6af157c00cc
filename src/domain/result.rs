//! Execution results

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::command::{CommandSource, ParsedCommand};
use super::intent::CommandIntent;

/// A compensating action that reverses a completed step.
///
/// Undo actions are plain data; the caller decides whether to offer or run
/// them after a chain stops part-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoAction {
    pub intent: CommandIntent,
    #[serde(default)]
    pub entities: BTreeMap<String, String>,
    pub description: String,
}

impl UndoAction {
    pub fn new(intent: CommandIntent, description: impl Into<String>) -> Self {
        Self {
            intent,
            entities: BTreeMap::new(),
            description: description.into(),
        }
    }

    pub fn with_entity(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }

    /// Suggest the inverse of `command`, carrying its entities over
    pub fn inverse_of(command: &ParsedCommand) -> Option<Self> {
        let inverse = command.intent.inverse()?;
        Some(Self {
            intent: inverse,
            entities: command.entities.clone(),
            description: format!("Undo {}", command.display_name),
        })
    }

    /// Turn this undo action into an executable command
    pub fn to_command(&self) -> ParsedCommand {
        let mut command = ParsedCommand::new(self.intent, self.description.clone(), CommandSource::PatternMatch)
            .with_display_name(self.description.clone());
        command.entities = self.entities.clone();
        command
    }
}

/// Outcome of one executed command or chain step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub duration: Duration,
    #[serde(default)]
    pub undo: Option<UndoAction>,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            duration: Duration::ZERO,
            undo: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            duration: Duration::ZERO,
            undo: None,
        }
    }

    pub fn with_undo(mut self, undo: UndoAction) -> Self {
        self.undo = Some(undo);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Undo actions of the successful results, most recent first
pub fn collect_undo_actions(results: &[CommandResult]) -> Vec<UndoAction> {
    results
        .iter()
        .rev()
        .filter(|r| r.success)
        .filter_map(|r| r.undo.clone())
        .collect()
}
