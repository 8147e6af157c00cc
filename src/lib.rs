//! Vaultype - voice command mode
//!
//! Vaultype listens to a stream of transcribed speech for a wake phrase
//! ("hey type"), then turns what follows into system commands: opening and
//! switching apps, moving windows, changing volume or brightness, running
//! shortcuts and user-defined multi-step commands.
//!
//! ## Pipeline
//!
//! 1. **Wake word**: exact or fuzzy match of the configured phrase, with a cooldown
//! 2. **Parse**: custom-command triggers, then a ranked pattern table, then an
//!    optional local language model
//! 3. **Execute**: registry checks (enabled, entities, confirmation) and the
//!    intent's handler; chains stop at the first failure
//!
//! OS-specific side effects live in [`engine::IntentHandler`] implementations
//! supplied by the application.

pub mod config;
pub mod domain;
pub mod engine;

pub use domain::*;
