//! Command mode session settings

use serde::{Deserialize, Serialize};

/// Timing and behaviour of a command-mode session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandModeSettings {
    /// Seconds to wait for a command after the wake word
    #[serde(default = "default_listening_timeout_secs")]
    pub listening_timeout_secs: u64,

    /// How long a result stays on display before returning to inactive (ms)
    #[serde(default = "default_result_display_ms")]
    pub result_display_ms: u64,

    /// Pause between chained commands (ms)
    #[serde(default = "default_chain_step_delay_ms")]
    pub chain_step_delay_ms: u64,

    /// Upper bound for running a command or chain (seconds)
    #[serde(default = "default_execution_timeout_secs")]
    pub execution_timeout_secs: u64,

    /// Split "X and then Y" into several commands
    #[serde(default = "default_chaining_enabled")]
    pub chaining_enabled: bool,
}

fn default_listening_timeout_secs() -> u64 {
    10
}

fn default_result_display_ms() -> u64 {
    1500
}

fn default_chain_step_delay_ms() -> u64 {
    300
}

fn default_execution_timeout_secs() -> u64 {
    30
}

fn default_chaining_enabled() -> bool {
    true
}

impl Default for CommandModeSettings {
    fn default() -> Self {
        Self {
            listening_timeout_secs: default_listening_timeout_secs(),
            result_display_ms: default_result_display_ms(),
            chain_step_delay_ms: default_chain_step_delay_ms(),
            execution_timeout_secs: default_execution_timeout_secs(),
            chaining_enabled: default_chaining_enabled(),
        }
    }
}
