//! Controller input and feedback types

use tokio::time::Instant;

use crate::domain::{CommandModeState, CommandResult};

/// One finalized piece of transcribed speech
#[derive(Debug, Clone)]
pub struct TranscriptSegment {
    pub text: String,
    /// Detected language code, if the recognizer reports one
    pub language: Option<String>,
    /// When the segment reached the controller's queue
    pub received_at: Instant,
}

impl TranscriptSegment {
    /// Segment received now
    pub fn new(text: impl Into<String>) -> Self {
        Self::received_at(text, Instant::now())
    }

    pub fn received_at(text: impl Into<String>, received_at: Instant) -> Self {
        Self {
            text: text.into(),
            language: None,
            received_at,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Events published by the controller for a UI or log sink
#[derive(Debug, Clone, PartialEq)]
pub enum CommandModeEvent {
    /// The session moved to a new state
    StateChanged(CommandModeState),
    /// A command or chain step finished
    StepFinished(CommandResult),
    /// Input arrived while busy and was dropped
    InputIgnored(String),
}
