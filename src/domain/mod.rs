//! Core domain types for the command engine

mod command;
mod error;
mod intent;
mod result;
mod state;


pub use command::{clamp_confidence, CommandSource, ParsedCommand};
pub use error::CommandError;
pub use intent::{
    CommandCategory, CommandIntent, ALIAS_NAME, APP_NAME, EXTENSION, LEVEL, SHORTCUT_NAME, TRIGGER,
};
pub use result::{collect_undo_actions, CommandResult, UndoAction};
pub use state::CommandModeState;
