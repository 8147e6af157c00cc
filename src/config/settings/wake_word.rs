//! Wake word settings

use serde::{Deserialize, Serialize};

/// Wake word settings as stored in config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeWordSettings {
    /// Phrase that switches the engine into command mode
    #[serde(default = "default_phrase")]
    pub phrase: String,

    /// Match the phrase case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,

    /// Minimum similarity (0.0-1.0) for a fuzzy match
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Minimum time between two activations (in milliseconds)
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

fn default_phrase() -> String {
    "hey type".to_string()
}

fn default_fuzzy_threshold() -> f64 {
    0.80
}

fn default_cooldown_ms() -> u64 {
    2000 // long utterances must not re-trigger on their own tail
}

impl Default for WakeWordSettings {
    fn default() -> Self {
        Self {
            phrase: default_phrase(),
            case_sensitive: false,
            fuzzy_threshold: default_fuzzy_threshold(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}
