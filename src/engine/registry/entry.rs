//! CommandRegistryEntry - one registered intent

use std::sync::Arc;

use crate::domain::{CommandCategory, CommandIntent};

use super::handler::IntentHandler;

/// Registration record for one intent (or one plugin extension)
#[derive(Clone)]
pub struct CommandRegistryEntry {
    pub intent: CommandIntent,
    /// Lookup name: the intent's stable name, or the extension's own name
    pub name: String,
    pub built_in: bool,
    pub enabled: bool,
    pub category: CommandCategory,
    pub required_entities: Vec<String>,
    pub optional_entities: Vec<String>,
    pub requires_confirmation: bool,
    pub handler: Option<Arc<dyn IntentHandler>>,
}

impl CommandRegistryEntry {
    /// Built-in entry with the intent's own metadata, enabled, no handler yet
    pub fn built_in(intent: CommandIntent) -> Self {
        Self {
            intent,
            name: intent.as_str().to_string(),
            built_in: true,
            enabled: true,
            category: intent.category(),
            required_entities: to_strings(intent.required_entities()),
            optional_entities: to_strings(intent.optional_entities()),
            requires_confirmation: intent.requires_confirmation(),
            handler: None,
        }
    }

    /// Plugin-contributed entry, keyed by `name` under the custom-alias intent
    pub fn extension(
        name: impl Into<String>,
        category: CommandCategory,
        handler: Arc<dyn IntentHandler>,
    ) -> Self {
        Self {
            intent: CommandIntent::CustomAlias,
            name: name.into(),
            built_in: false,
            enabled: true,
            category,
            required_entities: Vec::new(),
            optional_entities: Vec::new(),
            requires_confirmation: false,
            handler: Some(handler),
        }
    }

    pub fn with_required_entities(mut self, keys: &[&str]) -> Self {
        self.required_entities = to_strings(keys);
        self
    }

    pub fn with_optional_entities(mut self, keys: &[&str]) -> Self {
        self.optional_entities = to_strings(keys);
        self
    }

    pub fn with_confirmation(mut self, requires: bool) -> Self {
        self.requires_confirmation = requires;
        self
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl std::fmt::Debug for CommandRegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistryEntry")
            .field("intent", &self.intent)
            .field("name", &self.name)
            .field("built_in", &self.built_in)
            .field("enabled", &self.enabled)
            .field("category", &self.category)
            .field("required_entities", &self.required_entities)
            .field("optional_entities", &self.optional_entities)
            .field("requires_confirmation", &self.requires_confirmation)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

fn to_strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
