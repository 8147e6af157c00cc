//! Built-in command pattern table
//!
//! Every recognizable phrasing is one row of data. Rows are evaluated
//! uniformly by the parser; adding a command never adds a code path.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::domain::{CommandIntent, APP_NAME, LEVEL, SHORTCUT_NAME};

/// One row of the pattern table
#[derive(Debug, Clone, Copy)]
pub struct CommandPattern {
    pub intent: CommandIntent,
    /// Anchored at the start; compiled case-insensitively
    pub pattern: &'static str,
    /// Capture group `i + 1` fills `entity_keys[i]`
    pub entity_keys: &'static [&'static str],
    /// Static weight 1-10 used to rank overlapping matches
    pub priority: u8,
    /// Display name with `{key}` placeholders
    pub template: &'static str,
}

const fn row(
    intent: CommandIntent,
    pattern: &'static str,
    entity_keys: &'static [&'static str],
    priority: u8,
    template: &'static str,
) -> CommandPattern {
    CommandPattern {
        intent,
        pattern,
        entity_keys,
        priority,
        template,
    }
}

/// Earlier rows win score ties
pub static PATTERNS: &[CommandPattern] = &[
    // App management
    row(CommandIntent::OpenApp, r"^(?:open|launch)\s+(.+)", &[APP_NAME], 5, "Open {appName}"),
    row(
        CommandIntent::SwitchToApp,
        r"^(?:switch\s+to|go\s+to|focus(?:\s+on)?|activate)\s+(.+)",
        &[APP_NAME],
        6,
        "Switch to {appName}",
    ),
    row(CommandIntent::CloseApp, r"^close\s+(.+)", &[APP_NAME], 5, "Close {appName}"),
    row(CommandIntent::QuitApp, r"^(?:quit|exit)\s+(.+)", &[APP_NAME], 6, "Quit {appName}"),
    row(CommandIntent::HideApp, r"^hide\s+(.+)", &[APP_NAME], 5, "Hide {appName}"),
    // Window management
    row(
        CommandIntent::MoveWindowLeft,
        r"^(?:move|snap|tile)\s+(?:the\s+)?window\s+(?:to\s+(?:the\s+)?)?left\b",
        &[],
        7,
        "Move window left",
    ),
    row(
        CommandIntent::MoveWindowRight,
        r"^(?:move|snap|tile)\s+(?:the\s+)?window\s+(?:to\s+(?:the\s+)?)?right\b",
        &[],
        7,
        "Move window right",
    ),
    row(
        CommandIntent::MaximizeWindow,
        r"^maximi[sz]e(?:\s+(?:the\s+)?window)?\b",
        &[],
        7,
        "Maximize window",
    ),
    row(
        CommandIntent::MinimizeWindow,
        r"^minimi[sz]e(?:\s+(?:the\s+)?window)?\b",
        &[],
        7,
        "Minimize window",
    ),
    row(
        CommandIntent::CenterWindow,
        r"^cent(?:er|re)(?:\s+(?:the\s+)?window)?\b",
        &[],
        7,
        "Center window",
    ),
    row(
        CommandIntent::FullScreenWindow,
        r"^(?:(?:toggle|enter|exit)\s+)?full\s*screen\b",
        &[],
        7,
        "Toggle full screen",
    ),
    row(
        CommandIntent::MoveWindowToNextScreen,
        r"^(?:move|send)\s+(?:the\s+)?window\s+to\s+(?:the\s+)?(?:next|other)\s+(?:screen|display|monitor)\b",
        &[],
        8,
        "Move window to next screen",
    ),
    // System control
    row(
        CommandIntent::VolumeUp,
        r"^(?:volume\s+up|turn\s+(?:the\s+)?volume\s+up|turn\s+it\s+up|louder|increase\s+(?:the\s+)?volume)\b",
        &[],
        8,
        "Volume up",
    ),
    row(
        CommandIntent::VolumeDown,
        r"^(?:volume\s+down|turn\s+(?:the\s+)?volume\s+down|turn\s+it\s+down|quieter|decrease\s+(?:the\s+)?volume)\b",
        &[],
        8,
        "Volume down",
    ),
    row(
        CommandIntent::VolumeMute,
        r"^(?:(?:un)?mute(?:\s+(?:the\s+)?(?:volume|sound|audio))?|toggle\s+mute)\b",
        &[],
        8,
        "Toggle mute",
    ),
    row(
        CommandIntent::VolumeSet,
        r"^(?:set\s+(?:the\s+)?)?volume\s+(?:to\s+)?(\d{1,3})(?:\s*(?:%|percent))?",
        &[LEVEL],
        9,
        "Set volume to {level}%",
    ),
    row(
        CommandIntent::BrightnessUp,
        r"^(?:brightness\s+up|turn\s+(?:the\s+)?brightness\s+up|brighter|increase\s+(?:the\s+)?brightness)\b",
        &[],
        8,
        "Brightness up",
    ),
    row(
        CommandIntent::BrightnessDown,
        r"^(?:brightness\s+down|turn\s+(?:the\s+)?brightness\s+down|dimmer|decrease\s+(?:the\s+)?brightness)\b",
        &[],
        8,
        "Brightness down",
    ),
    row(
        CommandIntent::ToggleDarkMode,
        r"^(?:(?:toggle|enable|disable|turn\s+(?:on|off)|switch\s+to)\s+)?dark\s+mode\b",
        &[],
        7,
        "Toggle dark mode",
    ),
    row(
        CommandIntent::ToggleDoNotDisturb,
        r"^(?:(?:toggle|enable|disable|turn\s+(?:on|off))\s+)?(?:do\s+not\s+disturb|focus\s+mode)\b",
        &[],
        8,
        "Toggle Do Not Disturb",
    ),
    row(
        CommandIntent::LockScreen,
        r"^lock(?:\s+(?:the\s+)?(?:screen|computer|mac))?\b",
        &[],
        7,
        "Lock screen",
    ),
    row(
        CommandIntent::TakeScreenshot,
        r"^(?:take\s+(?:a\s+)?)?screen\s*shot\b",
        &[],
        7,
        "Take screenshot",
    ),
    // Workflow
    row(
        CommandIntent::RunShortcut,
        r"^run\s+(?:the\s+)?shortcut\s+(.+)",
        &[SHORTCUT_NAME],
        8,
        "Run shortcut {shortcutName}",
    ),
];

/// The table compiled once; rows with invalid regexes are dropped
pub(super) static COMPILED: Lazy<Vec<(&'static CommandPattern, Regex)>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .filter_map(|p| match Regex::new(&format!("(?i){}", p.pattern)) {
            Ok(re) => Some((p, re)),
            Err(e) => {
                warn!("Invalid command pattern for {}: {}", p.intent, e);
                None
            }
        })
        .collect()
});

/// Substitute `{key}` placeholders with entity values
pub fn render_template(template: &str, entities: &BTreeMap<String, String>) -> String {
    entities.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}

/// Display name for an intent built outside the pattern path (aliases,
/// semantic fallback, undo actions). Uses the intent's first template when
/// every placeholder can be filled, otherwise the intent label.
pub fn display_name_for(intent: CommandIntent, entities: &BTreeMap<String, String>) -> String {
    PATTERNS
        .iter()
        .find(|p| p.intent == intent)
        .map(|p| render_template(p.template, entities))
        .filter(|name| !name.contains('{'))
        .unwrap_or_else(|| intent.label().to_string())
}
