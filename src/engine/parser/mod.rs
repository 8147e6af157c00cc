//! CommandParser - free text to ranked [`ParsedCommand`]s
//!
//! Resolution order, first match wins:
//!
//! 1. **Alias**: exact (case-insensitive) trigger phrase of an enabled custom command
//! 2. **Pattern**: the static [`PATTERNS`] table, ranked by `confidence * priority`
//! 3. **Semantic fallback**: optional classifier, bounded by a timeout
//!
//! [`CommandParser::parse_chain`] additionally splits compound utterances
//! ("open Safari and then mute") into several commands.

mod chain;
mod patterns;
mod semantic;

#[cfg(test)]
mod tests;

pub use chain::split_segments;
pub use patterns::{display_name_for, render_template, CommandPattern, PATTERNS};
pub use semantic::{Classification, OllamaClassifier, SemanticClassifier};

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ParserSettings;
use crate::domain::{
    clamp_confidence, CommandError, CommandIntent, CommandSource, ParsedCommand, ALIAS_NAME,
    EXTENSION, TRIGGER,
};

use super::store::CustomCommandStore;
use patterns::COMPILED;

/// Default minimum pattern confidence
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;
/// Default minimum semantic classifier confidence
pub const DEFAULT_SEMANTIC_MIN_CONFIDENCE: f64 = 0.6;

struct SemanticFallback {
    classifier: Arc<dyn SemanticClassifier>,
    min_confidence: f64,
    timeout: Duration,
}

/// Two-tier command parser
pub struct CommandParser {
    min_confidence: f64,
    custom_commands: Option<Arc<dyn CustomCommandStore>>,
    semantic: Option<SemanticFallback>,
    /// Lowercased names of registered extension intents
    extensions: HashSet<String>,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    /// Pattern-only parser with default thresholds
    pub fn new() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            custom_commands: None,
            semantic: None,
            extensions: HashSet::new(),
        }
    }

    /// Build from settings; wires the Ollama classifier when a model is configured
    pub fn from_settings(settings: &ParserSettings) -> Self {
        let parser = Self::new().with_min_confidence(settings.min_confidence);
        match &settings.semantic {
            Some(semantic) => parser.with_classifier(
                Arc::new(OllamaClassifier::from_settings(semantic)),
                semantic.min_confidence,
                Duration::from_millis(semantic.timeout_ms),
            ),
            None => parser,
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = clamp_confidence(min_confidence);
        self
    }

    pub fn with_custom_commands(mut self, store: Arc<dyn CustomCommandStore>) -> Self {
        self.custom_commands = Some(store);
        self
    }

    pub fn with_classifier(
        mut self,
        classifier: Arc<dyn SemanticClassifier>,
        min_confidence: f64,
        timeout: Duration,
    ) -> Self {
        self.semantic = Some(SemanticFallback {
            classifier,
            min_confidence: clamp_confidence(min_confidence),
            timeout,
        });
        self
    }

    /// Names the semantic classifier may return besides built-in intents
    pub fn with_extensions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    pub fn has_semantic_fallback(&self) -> bool {
        self.semantic.is_some()
    }

    /// Parse one command: alias, then pattern table, then semantic fallback
    pub async fn parse(&self, text: &str) -> Result<ParsedCommand, CommandError> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(CommandError::Unrecognized { text: text.to_string() });
        }

        if let Some(cmd) = self.match_alias(text) {
            return Ok(cmd);
        }

        if let Some(cmd) = self.match_pattern(text) {
            return Ok(cmd);
        }

        if let Some(cmd) = self.classify(&normalized).await {
            return Ok(cmd);
        }

        debug!("No command matched: {:?}", text);
        Err(CommandError::Unrecognized { text: text.trim().to_string() })
    }

    /// Split a compound utterance into commands.
    ///
    /// A custom command trigger matching the whole text wins over any split.
    /// Segments are matched against the pattern table only. If any segment
    /// fails, the split is abandoned and the whole text is parsed as one
    /// command, so "and" inside free text does not break it apart.
    pub async fn parse_chain(&self, text: &str) -> Vec<ParsedCommand> {
        if let Some(alias) = self.match_alias(text) {
            return vec![alias];
        }
        if let Some(commands) = self.split_chain(text) {
            return commands;
        }
        self.parse(text).await.into_iter().collect()
    }

    /// Pattern-only chain split; `None` when the text is not a valid chain
    pub fn split_chain(&self, text: &str) -> Option<Vec<ParsedCommand>> {
        let segments = split_segments(&normalize(text))?;

        let mut commands = Vec::with_capacity(segments.len());
        for segment in &segments {
            match self.match_pattern(segment) {
                Some(cmd) => commands.push(cmd),
                None => {
                    debug!("Chain segment {:?} is not a command, parsing as one", segment);
                    return None;
                }
            }
        }

        debug!("Split into {} chained commands", commands.len());
        Some(commands)
    }

    /// Exact trigger-phrase match against enabled custom commands
    pub fn match_alias(&self, text: &str) -> Option<ParsedCommand> {
        let store = self.custom_commands.as_ref()?;
        let normalized = normalize(text);
        let custom = store
            .custom_commands()
            .into_iter()
            .find(|c| c.enabled && (c.matches(text) || c.matches(&normalized)))?;

        debug!("Matched custom command {:?}", custom.name);
        Some(
            ParsedCommand::new(CommandIntent::CustomAlias, text.trim(), CommandSource::Alias)
                .with_entity(ALIAS_NAME, custom.name.clone())
                .with_entity(TRIGGER, custom.trigger_phrase.clone())
                .with_confidence(1.0)
                .with_display_name(custom.name),
        )
    }

    /// Best row of the pattern table, if its confidence clears the threshold
    pub fn match_pattern(&self, text: &str) -> Option<ParsedCommand> {
        let normalized = normalize(text);
        let input_len = normalized.chars().count();
        if input_len == 0 {
            return None;
        }

        let mut best: Option<(f64, f64, &CommandPattern, regex::Captures<'_>)> = None;
        for (pattern, re) in COMPILED.iter() {
            let Some(caps) = re.captures(&normalized) else {
                continue;
            };
            let matched_len = caps.get(0).map_or(0, |m| m.as_str().chars().count());
            let confidence = clamp_confidence(matched_len as f64 / input_len as f64);
            let score = confidence * f64::from(pattern.priority);

            // Strictly greater: earlier rows keep ties
            if best.as_ref().is_none_or(|(best_score, ..)| score > *best_score) {
                best = Some((score, confidence, *pattern, caps));
            }
        }

        let (score, confidence, pattern, caps) = best?;
        if confidence < self.min_confidence {
            debug!(
                intent = %pattern.intent,
                confidence,
                "Best pattern below confidence threshold"
            );
            return None;
        }

        let mut entities = BTreeMap::new();
        for (i, key) in pattern.entity_keys.iter().enumerate() {
            if let Some(value) = caps.get(i + 1).map(|m| m.as_str().trim()) {
                if !value.is_empty() {
                    entities.insert(key.to_string(), value.to_string());
                }
            }
        }

        debug!(intent = %pattern.intent, confidence, score, "Pattern matched");
        let display_name = render_template(pattern.template, &entities);
        let mut cmd = ParsedCommand::new(pattern.intent, text.trim(), CommandSource::PatternMatch)
            .with_confidence(confidence)
            .with_display_name(display_name);
        cmd.entities = entities;
        Some(cmd)
    }

    async fn classify(&self, text: &str) -> Option<ParsedCommand> {
        let semantic = self.semantic.as_ref()?;

        let classification =
            match tokio::time::timeout(semantic.timeout, semantic.classifier.classify(text)).await {
                Ok(Ok(c)) => c,
                Ok(Err(e)) => {
                    warn!("{}", CommandError::Classifier(e.to_string()));
                    return None;
                }
                Err(_) => {
                    warn!("Semantic classifier timed out after {:?}", semantic.timeout);
                    return None;
                }
            };

        let confidence = clamp_confidence(classification.confidence);
        if confidence < semantic.min_confidence {
            debug!(
                intent = %classification.intent,
                confidence,
                "Semantic classification below threshold"
            );
            return None;
        }

        self.command_from_classification(text, classification, confidence)
    }

    fn command_from_classification(
        &self,
        text: &str,
        classification: Classification,
        confidence: f64,
    ) -> Option<ParsedCommand> {
        let name = classification.intent.trim();

        if self.extensions.contains(&name.to_lowercase()) {
            return Some(
                ParsedCommand::new(CommandIntent::CustomAlias, text, CommandSource::SemanticFallback)
                    .with_entity(EXTENSION, name)
                    .with_confidence(confidence)
                    .with_display_name(name),
            );
        }

        let intent = match name.parse::<CommandIntent>() {
            Ok(CommandIntent::ChainedCommand | CommandIntent::CustomAlias) | Err(_) => {
                debug!("Classifier returned unusable intent {:?}", name);
                return None;
            }
            Ok(intent) => intent,
        };

        // Keep only the keys the intent declares
        let entities: BTreeMap<String, String> = classification
            .entities
            .into_iter()
            .filter(|(key, value)| {
                !value.trim().is_empty()
                    && (intent.required_entities().contains(&key.as_str())
                        || intent.optional_entities().contains(&key.as_str()))
            })
            .map(|(key, value)| (key, value.trim().to_string()))
            .collect();

        debug!(intent = %intent, confidence, "Semantic fallback matched");
        let display_name = display_name_for(intent, &entities);
        let mut cmd = ParsedCommand::new(intent, text, CommandSource::SemanticFallback)
            .with_confidence(confidence)
            .with_display_name(display_name);
        cmd.entities = entities;
        Some(cmd)
    }
}

/// Trim, collapse whitespace and strip sentence punctuation from the edges
pub fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '"'))
        .trim()
        .to_string()
}
