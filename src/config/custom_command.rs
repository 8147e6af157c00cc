//! Custom command (alias) configuration types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::CommandIntent;

/// One action run by a custom command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandStep {
    pub intent: CommandIntent,

    /// Entity values passed to the intent handler
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl CommandStep {
    pub fn new(intent: CommandIntent) -> Self {
        Self {
            intent,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// A user-defined trigger phrase mapped to one or more actions.
///
/// ```toml
/// [[custom_commands]]
/// name = "Morning"
/// trigger_phrase = "start my day"
/// steps = [
///   { intent = "openApp", parameters = { appName = "Mail" } },
///   { intent = "volumeSet", parameters = { level = "30" } },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCommand {
    pub name: String,

    /// Matched case-insensitively against the whole utterance
    pub trigger_phrase: String,

    #[serde(default)]
    pub steps: Vec<CommandStep>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How often this command has been run
    #[serde(default)]
    pub use_count: u64,

    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

fn default_enabled() -> bool {
    true
}

impl CustomCommand {
    pub fn new(name: impl Into<String>, trigger_phrase: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trigger_phrase: trigger_phrase.into(),
            steps: Vec::new(),
            enabled: true,
            use_count: 0,
            last_used_at: None,
        }
    }

    pub fn with_step(mut self, step: CommandStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Case-insensitive exact match of the trimmed utterance
    pub fn matches(&self, text: &str) -> bool {
        let trigger = self.trigger_phrase.trim();
        !trigger.is_empty() && trigger.to_lowercase() == text.trim().to_lowercase()
    }

    pub fn record_use(&mut self, at: DateTime<Utc>) {
        self.use_count += 1;
        self.last_used_at = Some(at);
    }
}
