//! CommandRegistry - catalog of known intents
//!
//! Holds exactly one entry per built-in [`CommandIntent`], each with its
//! enabled flag, category, entity requirements and handler. Plugin intents
//! are added at startup as extensions keyed by name. The registry is an
//! explicitly constructed value owned by the controller; nothing about it is
//! process-global.

mod entry;
mod handler;


pub use entry::CommandRegistryEntry;
pub use handler::{handler_fn, FnHandler, IntentHandler};

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{CommandStep, CustomCommand};
use crate::domain::{CommandCategory, CommandIntent, ParsedCommand};

/// Registry of built-in intents and plugin extensions
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    entries: BTreeMap<CommandIntent, CommandRegistryEntry>,
    /// Extensions keyed by lowercased name
    extensions: BTreeMap<String, CommandRegistryEntry>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// One enabled built-in entry per intent, no handlers
    pub fn new() -> Self {
        let entries = CommandIntent::ALL
            .into_iter()
            .map(|intent| (intent, CommandRegistryEntry::built_in(intent)))
            .collect();

        Self {
            entries,
            extensions: BTreeMap::new(),
        }
    }

    /// Attach the handler that performs `intent`
    pub fn register_handler(&mut self, intent: CommandIntent, handler: Arc<dyn IntentHandler>) {
        if let Some(entry) = self.entries.get_mut(&intent) {
            entry.handler = Some(handler);
            debug!("Registered handler for {}", intent);
        }
    }

    /// Builder form of [`register_handler`](Self::register_handler)
    pub fn with_handler(mut self, intent: CommandIntent, handler: Arc<dyn IntentHandler>) -> Self {
        self.register_handler(intent, handler);
        self
    }

    /// Add a plugin-contributed intent. Returns false if the name is taken
    /// by a built-in intent or an existing extension.
    pub fn register_extension(&mut self, entry: CommandRegistryEntry) -> bool {
        let key = entry.name.trim().to_lowercase();
        if key.is_empty() || key.parse::<CommandIntent>().is_ok() || self.extensions.contains_key(&key) {
            warn!("Rejected extension registration: {}", entry.name);
            return false;
        }

        info!("Registered extension intent: {}", entry.name);
        self.extensions.insert(key, CommandRegistryEntry {
            intent: CommandIntent::CustomAlias,
            built_in: false,
            ..entry
        });
        true
    }

    pub fn entry(&self, intent: CommandIntent) -> Option<&CommandRegistryEntry> {
        self.entries.get(&intent)
    }

    pub fn extension(&self, name: &str) -> Option<&CommandRegistryEntry> {
        self.extensions.get(&name.trim().to_lowercase())
    }

    /// The entry a parsed command dispatches to: its extension when it
    /// names one, otherwise the built-in entry of its intent.
    pub fn entry_for(&self, command: &ParsedCommand) -> Option<&CommandRegistryEntry> {
        match command.extension() {
            Some(name) => self.extension(name),
            None => self.entry(command.intent),
        }
    }

    pub fn is_enabled(&self, intent: CommandIntent) -> bool {
        self.entries.get(&intent).is_some_and(|e| e.enabled)
    }

    /// Flip the enabled flag; the entry itself is never removed
    pub fn set_enabled(&mut self, intent: CommandIntent, enabled: bool) {
        if let Some(entry) = self.entries.get_mut(&intent) {
            if entry.enabled != enabled {
                info!("{} {}", if enabled { "Enabled" } else { "Disabled" }, intent);
            }
            entry.enabled = enabled;
        }
    }

    /// Enable or disable an extension by name. Returns false if unknown.
    pub fn set_extension_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.extensions.get_mut(&name.trim().to_lowercase()) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Built-in entries of a category in declaration order, then its extensions
    pub fn entries(&self, category: CommandCategory) -> Vec<&CommandRegistryEntry> {
        self.entries
            .values()
            .chain(self.extensions.values())
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn all_entries(&self) -> impl Iterator<Item = &CommandRegistryEntry> {
        self.entries.values().chain(self.extensions.values())
    }

    /// Built-in entry count; always equals the number of intents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First enabled custom command whose trigger phrase equals `text`
    /// (case-insensitive, surrounding whitespace ignored)
    pub fn find_custom_command<'c>(
        &self,
        text: &str,
        custom_commands: &'c [CustomCommand],
    ) -> Option<&'c CustomCommand> {
        custom_commands.iter().find(|c| c.enabled && c.matches(text))
    }

    /// Action steps of the custom command triggered by `text`, if any
    pub fn resolve_custom_command(
        &self,
        text: &str,
        custom_commands: &[CustomCommand],
    ) -> Option<Vec<CommandStep>> {
        self.find_custom_command(text, custom_commands)
            .map(|c| c.steps.clone())
    }

    /// Names of disabled built-in intents, sorted, for persistence
    pub fn disabled_intent_raw_values(&self) -> Vec<String> {
        let mut values: Vec<String> = self
            .entries
            .values()
            .filter(|e| !e.enabled)
            .map(|e| e.intent.as_str().to_string())
            .collect();
        values.sort();
        values
    }

    /// Replace the disabled set with `values`.
    ///
    /// Not accumulative: every intent missing from `values` is re-enabled.
    /// Unknown names are skipped.
    pub fn load_disabled_intents<S: AsRef<str>>(&mut self, values: &[S]) {
        let mut disabled = HashSet::new();
        for value in values {
            match value.as_ref().parse::<CommandIntent>() {
                Ok(intent) => {
                    disabled.insert(intent);
                }
                Err(e) => warn!("Ignoring disabled intent: {}", e),
            }
        }

        for (intent, entry) in self.entries.iter_mut() {
            entry.enabled = !disabled.contains(intent);
        }
        debug!("Loaded {} disabled intents", disabled.len());
    }
}
