//! CLI command implementations

pub mod init;
pub mod intents;
pub mod listen;
pub mod parse;
pub mod toggle;
