//! Settings configuration types

mod command_mode;
mod parser;
mod wake_word;

pub use command_mode::CommandModeSettings;
pub use parser::{ParserSettings, SemanticSettings};
pub use wake_word::WakeWordSettings;
