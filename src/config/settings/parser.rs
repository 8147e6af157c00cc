//! Parser settings

use serde::{Deserialize, Serialize};

/// Command parser settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Minimum pattern confidence (0.0-1.0) for a match to be accepted
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Optional local model used when no pattern matches.
    /// Leave unset to keep parsing purely pattern based.
    #[serde(default)]
    pub semantic: Option<SemanticSettings>,
}

fn default_min_confidence() -> f64 {
    0.5
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            semantic: None,
        }
    }
}

/// Semantic fallback classifier (Ollama-compatible endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticSettings {
    /// Model reference, e.g. "llama3.2:1b"
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Minimum classifier confidence (0.0-1.0)
    #[serde(default = "default_semantic_min_confidence")]
    pub min_confidence: f64,

    /// Hard limit for one classification call (ms)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_semantic_min_confidence() -> f64 {
    0.6
}

fn default_timeout_ms() -> u64 {
    1500
}

impl SemanticSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            endpoint: default_endpoint(),
            min_confidence: default_semantic_min_confidence(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
