//! Shared helpers: recording handlers and a fully wired registry

use std::sync::{Arc, Mutex};

use vaultype::engine::{handler_fn, CommandRegistry};
use vaultype::{CommandIntent, CommandResult, UndoAction};

/// Intents handled so far, in call order
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<CommandIntent>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<CommandIntent> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Registry where every built-in intent succeeds and is logged
pub fn recording_registry(log: &CallLog) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for intent in CommandIntent::ALL {
        let log = log.clone();
        registry.register_handler(
            intent,
            handler_fn(move |cmd| {
                let log = log.clone();
                async move {
                    log.0.lock().unwrap().push(cmd.intent);
                    let mut result = CommandResult::success(format!("{} done", cmd.display_name));
                    if let Some(undo) = UndoAction::inverse_of(&cmd) {
                        result = result.with_undo(undo);
                    }
                    Ok(result)
                }
            }),
        );
    }
    registry
}
