//! Parsed command values handed from the parser to the executor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::intent::{CommandIntent, EXTENSION};

/// Where a parsed command came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSource {
    /// Matched a row of the built-in pattern table
    PatternMatch,
    /// Classified by the optional semantic model
    SemanticFallback,
    /// Exact trigger-phrase match against a custom command
    Alias,
}

impl std::fmt::Display for CommandSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandSource::PatternMatch => write!(f, "pattern"),
            CommandSource::SemanticFallback => write!(f, "semantic"),
            CommandSource::Alias => write!(f, "alias"),
        }
    }
}

/// A recognized command, ready for validation and execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub intent: CommandIntent,
    /// Extracted parameters, keyed by entity name
    pub entities: BTreeMap<String, String>,
    /// The text this command was parsed from
    pub raw_text: String,
    /// Estimated correctness in [0, 1]
    pub confidence: f64,
    pub display_name: String,
    pub source: CommandSource,
}

impl ParsedCommand {
    pub fn new(intent: CommandIntent, raw_text: impl Into<String>, source: CommandSource) -> Self {
        Self {
            intent,
            entities: BTreeMap::new(),
            raw_text: raw_text.into(),
            confidence: 1.0,
            display_name: intent.label().to_string(),
            source,
        }
    }

    pub fn with_entity(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }

    /// Sets the confidence, clamped into [0, 1]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_confidence(confidence);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn entity(&self, key: &str) -> Option<&str> {
        self.entities.get(key).map(|s| s.as_str())
    }

    /// Name of the plugin extension this command targets, if any
    pub fn extension(&self) -> Option<&str> {
        match self.intent {
            CommandIntent::CustomAlias => self.entity(EXTENSION),
            _ => None,
        }
    }

    /// Required keys of this command's intent that have no value
    pub fn missing_entities(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|key| self.entity(key).is_none_or(|v| v.trim().is_empty()))
            .cloned()
            .collect()
    }
}

/// Clamp a raw score into [0, 1]. NaN is treated as no confidence.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
