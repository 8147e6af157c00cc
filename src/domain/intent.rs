//! Command intents - the closed set of actions a spoken command can request.

use serde::{Deserialize, Serialize};

/// Entity key for an application name ("open Safari")
pub const APP_NAME: &str = "appName";
/// Entity key for a numeric level ("set volume to 40")
pub const LEVEL: &str = "level";
/// Entity key for a Shortcuts.app shortcut name
pub const SHORTCUT_NAME: &str = "shortcutName";
/// Entity key naming a custom command (alias)
pub const ALIAS_NAME: &str = "name";
/// Entity key holding the trigger phrase of a custom command
pub const TRIGGER: &str = "trigger";
/// Entity key naming a plugin-contributed extension intent
pub const EXTENSION: &str = "extension";

/// Grouping used for settings display and `entries(for: category)` lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    App,
    Window,
    System,
    Workflow,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 4] = [
        CommandCategory::App,
        CommandCategory::Window,
        CommandCategory::System,
        CommandCategory::Workflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandCategory::App => "app",
            CommandCategory::Window => "window",
            CommandCategory::System => "system",
            CommandCategory::Workflow => "workflow",
        }
    }
}

impl std::fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommandCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// A recognizable action.
///
/// Persisted by name (`"openApp"`, `"volumeUp"`, ...), never by ordinal, so
/// reordering variants does not invalidate stored settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandIntent {
    // App management
    OpenApp,
    SwitchToApp,
    CloseApp,
    QuitApp,
    HideApp,
    // Window management
    MoveWindowLeft,
    MoveWindowRight,
    MaximizeWindow,
    MinimizeWindow,
    CenterWindow,
    FullScreenWindow,
    MoveWindowToNextScreen,
    // System control
    VolumeUp,
    VolumeDown,
    VolumeMute,
    VolumeSet,
    BrightnessUp,
    BrightnessDown,
    ToggleDarkMode,
    ToggleDoNotDisturb,
    LockScreen,
    TakeScreenshot,
    // Workflow / meta
    RunShortcut,
    ChainedCommand,
    /// User-defined aliases and plugin-contributed extensions
    CustomAlias,
}

impl CommandIntent {
    /// Every built-in intent, in declaration order
    pub const ALL: [CommandIntent; 25] = [
        CommandIntent::OpenApp,
        CommandIntent::SwitchToApp,
        CommandIntent::CloseApp,
        CommandIntent::QuitApp,
        CommandIntent::HideApp,
        CommandIntent::MoveWindowLeft,
        CommandIntent::MoveWindowRight,
        CommandIntent::MaximizeWindow,
        CommandIntent::MinimizeWindow,
        CommandIntent::CenterWindow,
        CommandIntent::FullScreenWindow,
        CommandIntent::MoveWindowToNextScreen,
        CommandIntent::VolumeUp,
        CommandIntent::VolumeDown,
        CommandIntent::VolumeMute,
        CommandIntent::VolumeSet,
        CommandIntent::BrightnessUp,
        CommandIntent::BrightnessDown,
        CommandIntent::ToggleDarkMode,
        CommandIntent::ToggleDoNotDisturb,
        CommandIntent::LockScreen,
        CommandIntent::TakeScreenshot,
        CommandIntent::RunShortcut,
        CommandIntent::ChainedCommand,
        CommandIntent::CustomAlias,
    ];

    /// Stable identifier used for persistence and registry lookups
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandIntent::OpenApp => "openApp",
            CommandIntent::SwitchToApp => "switchToApp",
            CommandIntent::CloseApp => "closeApp",
            CommandIntent::QuitApp => "quitApp",
            CommandIntent::HideApp => "hideApp",
            CommandIntent::MoveWindowLeft => "moveWindowLeft",
            CommandIntent::MoveWindowRight => "moveWindowRight",
            CommandIntent::MaximizeWindow => "maximizeWindow",
            CommandIntent::MinimizeWindow => "minimizeWindow",
            CommandIntent::CenterWindow => "centerWindow",
            CommandIntent::FullScreenWindow => "fullScreenWindow",
            CommandIntent::MoveWindowToNextScreen => "moveWindowToNextScreen",
            CommandIntent::VolumeUp => "volumeUp",
            CommandIntent::VolumeDown => "volumeDown",
            CommandIntent::VolumeMute => "volumeMute",
            CommandIntent::VolumeSet => "volumeSet",
            CommandIntent::BrightnessUp => "brightnessUp",
            CommandIntent::BrightnessDown => "brightnessDown",
            CommandIntent::ToggleDarkMode => "toggleDarkMode",
            CommandIntent::ToggleDoNotDisturb => "toggleDoNotDisturb",
            CommandIntent::LockScreen => "lockScreen",
            CommandIntent::TakeScreenshot => "takeScreenshot",
            CommandIntent::RunShortcut => "runShortcut",
            CommandIntent::ChainedCommand => "chainedCommand",
            CommandIntent::CustomAlias => "customAlias",
        }
    }

    /// Human-readable label used when no display template applies
    pub fn label(&self) -> &'static str {
        match self {
            CommandIntent::OpenApp => "Open App",
            CommandIntent::SwitchToApp => "Switch to App",
            CommandIntent::CloseApp => "Close App",
            CommandIntent::QuitApp => "Quit App",
            CommandIntent::HideApp => "Hide App",
            CommandIntent::MoveWindowLeft => "Move Window Left",
            CommandIntent::MoveWindowRight => "Move Window Right",
            CommandIntent::MaximizeWindow => "Maximize Window",
            CommandIntent::MinimizeWindow => "Minimize Window",
            CommandIntent::CenterWindow => "Center Window",
            CommandIntent::FullScreenWindow => "Toggle Full Screen",
            CommandIntent::MoveWindowToNextScreen => "Move Window to Next Screen",
            CommandIntent::VolumeUp => "Volume Up",
            CommandIntent::VolumeDown => "Volume Down",
            CommandIntent::VolumeMute => "Toggle Mute",
            CommandIntent::VolumeSet => "Set Volume",
            CommandIntent::BrightnessUp => "Brightness Up",
            CommandIntent::BrightnessDown => "Brightness Down",
            CommandIntent::ToggleDarkMode => "Toggle Dark Mode",
            CommandIntent::ToggleDoNotDisturb => "Toggle Do Not Disturb",
            CommandIntent::LockScreen => "Lock Screen",
            CommandIntent::TakeScreenshot => "Take Screenshot",
            CommandIntent::RunShortcut => "Run Shortcut",
            CommandIntent::ChainedCommand => "Chained Command",
            CommandIntent::CustomAlias => "Custom Command",
        }
    }

    pub fn category(&self) -> CommandCategory {
        match self {
            CommandIntent::OpenApp
            | CommandIntent::SwitchToApp
            | CommandIntent::CloseApp
            | CommandIntent::QuitApp
            | CommandIntent::HideApp => CommandCategory::App,
            CommandIntent::MoveWindowLeft
            | CommandIntent::MoveWindowRight
            | CommandIntent::MaximizeWindow
            | CommandIntent::MinimizeWindow
            | CommandIntent::CenterWindow
            | CommandIntent::FullScreenWindow
            | CommandIntent::MoveWindowToNextScreen => CommandCategory::Window,
            CommandIntent::VolumeUp
            | CommandIntent::VolumeDown
            | CommandIntent::VolumeMute
            | CommandIntent::VolumeSet
            | CommandIntent::BrightnessUp
            | CommandIntent::BrightnessDown
            | CommandIntent::ToggleDarkMode
            | CommandIntent::ToggleDoNotDisturb
            | CommandIntent::LockScreen
            | CommandIntent::TakeScreenshot => CommandCategory::System,
            CommandIntent::RunShortcut
            | CommandIntent::ChainedCommand
            | CommandIntent::CustomAlias => CommandCategory::Workflow,
        }
    }

    /// Entity keys that must be present before the handler runs
    pub fn required_entities(&self) -> &'static [&'static str] {
        match self {
            CommandIntent::OpenApp
            | CommandIntent::SwitchToApp
            | CommandIntent::CloseApp
            | CommandIntent::QuitApp
            | CommandIntent::HideApp => &[APP_NAME],
            CommandIntent::VolumeSet => &[LEVEL],
            CommandIntent::RunShortcut => &[SHORTCUT_NAME],
            _ => &[],
        }
    }

    pub fn optional_entities(&self) -> &'static [&'static str] {
        match self {
            CommandIntent::CustomAlias => &[ALIAS_NAME, TRIGGER, EXTENSION],
            _ => &[],
        }
    }

    /// Destructive intents need an explicit yes before running
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, CommandIntent::QuitApp | CommandIntent::LockScreen)
    }

    /// The intent that reverses this one, if there is an obvious one.
    ///
    /// Handlers use this to attach an undo action to their result.
    pub fn inverse(&self) -> Option<CommandIntent> {
        match self {
            CommandIntent::OpenApp => Some(CommandIntent::CloseApp),
            CommandIntent::HideApp => Some(CommandIntent::SwitchToApp),
            CommandIntent::MoveWindowLeft => Some(CommandIntent::MoveWindowRight),
            CommandIntent::MoveWindowRight => Some(CommandIntent::MoveWindowLeft),
            CommandIntent::VolumeUp => Some(CommandIntent::VolumeDown),
            CommandIntent::VolumeDown => Some(CommandIntent::VolumeUp),
            CommandIntent::BrightnessUp => Some(CommandIntent::BrightnessDown),
            CommandIntent::BrightnessDown => Some(CommandIntent::BrightnessUp),
            CommandIntent::VolumeMute
            | CommandIntent::ToggleDarkMode
            | CommandIntent::ToggleDoNotDisturb
            | CommandIntent::FullScreenWindow => Some(*self),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommandIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CommandIntent::ALL
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown intent: {}", s))
    }
}
