//! Custom command store
//!
//! The engine reads trigger phrases and records usage through this trait;
//! where the commands are persisted is up to the application.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::config::CustomCommand;

/// Read/write access to the user's custom commands
pub trait CustomCommandStore: Send + Sync {
    /// Snapshot of all custom commands, enabled or not
    fn custom_commands(&self) -> Vec<CustomCommand>;

    /// Note that the command called `name` just ran
    fn record_usage(&self, name: &str);

    /// Enable or disable a command. Returns false if no such command exists.
    fn set_enabled(&self, name: &str, enabled: bool) -> bool;
}

/// Store holding commands in memory, typically seeded from config
#[derive(Debug, Default)]
pub struct InMemoryCustomCommandStore {
    commands: Mutex<Vec<CustomCommand>>,
}

impl InMemoryCustomCommandStore {
    pub fn new(commands: Vec<CustomCommand>) -> Self {
        Self {
            commands: Mutex::new(commands),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CustomCommand>> {
        // A poisoned lock only means a panic elsewhere; the data is still usable
        self.commands.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CustomCommandStore for InMemoryCustomCommandStore {
    fn custom_commands(&self) -> Vec<CustomCommand> {
        self.lock().clone()
    }

    fn record_usage(&self, name: &str) {
        let mut commands = self.lock();
        if let Some(cmd) = commands.iter_mut().find(|c| c.name == name) {
            cmd.record_use(Utc::now());
        }
    }

    fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        let mut commands = self.lock();
        match commands.iter_mut().find(|c| c.name.eq_ignore_ascii_case(name)) {
            Some(cmd) => {
                cmd.enabled = enabled;
                true
            }
            None => false,
        }
    }
}
