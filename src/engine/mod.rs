//! Command engine
//!
//! Turns transcribed speech into system commands:
//!
//! ```text
//! transcript -> WakeWordDetector -> CommandModeController -> CommandParser
//!            -> CommandRegistry -> CommandExecutor -> IntentHandler
//! ```

pub mod controller;
pub mod executor;
pub mod parser;
pub mod registry;
pub mod store;
pub mod wake_word;

pub use controller::{CommandModeController, CommandModeEvent, TranscriptSegment};
pub use executor::{AutoConfirm, CommandExecutor, ConfirmationPrompt};
pub use parser::{Classification, CommandParser, OllamaClassifier, SemanticClassifier};
pub use registry::{handler_fn, CommandRegistry, CommandRegistryEntry, IntentHandler};
pub use store::{CustomCommandStore, InMemoryCustomCommandStore};
pub use wake_word::{WakeWordConfig, WakeWordDetector, WakeWordMatch};
