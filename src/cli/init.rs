//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use vaultype::config::Config;

/// Default configuration content for vaultype init
pub const DEFAULT_CONFIG: &str = r#"# Vaultype Configuration
# =======================
#
# Say the wake phrase, then a command: "hey type, open Safari and then mute".

# Intents that are never executed (see `vaultype intents`)
disabled_intents = []

# ============================================================================
# WAKE WORD
# ============================================================================
#
#   phrase          - Phrase that starts command mode
#   case_sensitive  - Match the phrase case-sensitively (default: false)
#   fuzzy_threshold - Minimum similarity (0.0-1.0) for near misses like "hey tipe"
#   cooldown_ms     - Ignore repeated wake words within this window

[wake_word]
phrase = "hey type"
case_sensitive = false
fuzzy_threshold = 0.8
cooldown_ms = 2000

# ============================================================================
# COMMAND MODE
# ============================================================================

[command_mode]
# Seconds to wait for a command after the wake word
listening_timeout_secs = 10
# How long the result stays visible (ms)
result_display_ms = 1500
# Pause between chained commands (ms)
chain_step_delay_ms = 300
# Give up on a command or chain after this many seconds
execution_timeout_secs = 30
# Split "X and then Y" into two commands
chaining_enabled = true

# ============================================================================
# PARSER
# ============================================================================

[parser]
min_confidence = 0.5

# Optional: ask a local Ollama model when no pattern matches
# [parser.semantic]
# model = "llama3.2:1b"
# endpoint = "http://127.0.0.1:11434"
# min_confidence = 0.6
# timeout_ms = 1500

# ============================================================================
# CUSTOM COMMANDS
# ============================================================================
#
# A trigger phrase mapped to one or more steps. Steps use intent names from
# `vaultype intents` and the entity keys they need (appName, level, shortcutName).
#
# [[custom_commands]]
# name = "Morning"
# trigger_phrase = "start my day"
#
# [[custom_commands.steps]]
# intent = "openApp"
# parameters = { appName = "Mail" }
#
# [[custom_commands.steps]]
# intent = "volumeSet"
# parameters = { level = "30" }
"#;

/// Write the default config
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}
