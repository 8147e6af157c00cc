//! CommandExecutor - validates and runs parsed commands
//!
//! A single command passes four gates in order: enabled, required entities,
//! confirmation, handler. Chains run step by step and stop at the first
//! failure; completed steps are not rolled back.

mod confirm;


pub use confirm::{AutoConfirm, ConfirmationPrompt};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::domain::{
    CommandError, CommandIntent, CommandResult, CommandSource, ParsedCommand, TRIGGER,
};

use super::parser::display_name_for;
use super::registry::CommandRegistry;
use super::store::CustomCommandStore;

/// Default pause between chain steps
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(300);

/// Runs commands against a borrowed registry
pub struct CommandExecutor<'a> {
    registry: &'a CommandRegistry,
    confirmation: Option<Arc<dyn ConfirmationPrompt>>,
    custom_commands: Option<Arc<dyn CustomCommandStore>>,
    step_delay: Duration,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self {
            registry,
            confirmation: None,
            custom_commands: None,
            step_delay: DEFAULT_STEP_DELAY,
        }
    }

    /// Without a prompt, confirmation-gated intents are declined
    pub fn with_confirmation(mut self, prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        self.confirmation = Some(prompt);
        self
    }

    /// Store used to expand alias commands into their steps
    pub fn with_custom_commands(mut self, store: Arc<dyn CustomCommandStore>) -> Self {
        self.custom_commands = Some(store);
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Execute one command. Failures are reported in the result, never panicked.
    pub async fn execute(&self, command: &ParsedCommand) -> CommandResult {
        if command.intent == CommandIntent::CustomAlias && command.source == CommandSource::Alias {
            return self.execute_alias(command).await;
        }
        self.execute_step(command).await
    }

    /// Execute in order, stopping after the first failed step.
    ///
    /// The returned list is never longer than `commands`; when a step fails
    /// it is the last element.
    pub async fn execute_chain(&self, commands: &[ParsedCommand]) -> Vec<CommandResult> {
        let mut results = Vec::with_capacity(commands.len());

        for (index, command) in commands.iter().enumerate() {
            if index > 0 {
                self.pause_between_steps().await;
            }

            let result = self.execute(command).await;
            let success = result.success;
            results.push(result);

            if !success {
                if let Some(err) = chain_failure(commands, &results) {
                    warn!("Chain stopped: {}", err);
                }
                break;
            }
        }

        results
    }

    /// Run one command through the gates and its handler
    pub async fn try_execute(&self, command: &ParsedCommand) -> Result<CommandResult, CommandError> {
        let started = Instant::now();

        let entry = self
            .registry
            .entry_for(command)
            .ok_or_else(|| CommandError::NoHandler(command.display_name.clone()))?;

        if !entry.enabled {
            debug!("Refusing disabled command {}", entry.name);
            return Err(CommandError::Disabled(command.display_name.clone()));
        }

        if let Some(key) = command.missing_entities(&entry.required_entities).into_iter().next() {
            return Err(CommandError::MissingEntity {
                intent: command.intent,
                key,
            });
        }

        if entry.requires_confirmation {
            let prompt = format!("{}?", command.display_name);
            let confirmed = match &self.confirmation {
                Some(confirmation) => confirmation.confirm(&prompt).await,
                None => {
                    warn!("No confirmation prompt available for {}", entry.name);
                    false
                }
            };
            if !confirmed {
                info!("{} was not confirmed", command.display_name);
                return Err(CommandError::ConfirmationDeclined(command.display_name.clone()));
            }
        }

        let handler = entry
            .handler
            .clone()
            .ok_or_else(|| CommandError::NoHandler(entry.name.clone()))?;

        let mut result = handler
            .handle(command)
            .await
            .map_err(|source| CommandError::HandlerFailed {
                intent: command.intent,
                source,
            })?;

        if result.message.trim().is_empty() {
            result.message = command.display_name.clone();
        }
        debug!(
            intent = %command.intent,
            success = result.success,
            "Handler finished in {:?}",
            started.elapsed()
        );
        Ok(result.with_duration(started.elapsed()))
    }

    async fn execute_step(&self, command: &ParsedCommand) -> CommandResult {
        let started = Instant::now();
        match self.try_execute(command).await {
            Ok(result) => result,
            Err(e) => CommandResult::failure(e.to_string()).with_duration(started.elapsed()),
        }
    }

    /// Expand a custom command into its steps and run them as a chain
    async fn execute_alias(&self, command: &ParsedCommand) -> CommandResult {
        let started = Instant::now();

        if !self.registry.is_enabled(CommandIntent::CustomAlias) {
            return CommandResult::failure(
                CommandError::Disabled(CommandIntent::CustomAlias.label().to_string()).to_string(),
            );
        }

        let Some(store) = &self.custom_commands else {
            return CommandResult::failure("Custom commands are not available");
        };

        let trigger = command.entity(TRIGGER).unwrap_or(command.raw_text.as_str());
        let commands = store.custom_commands();
        let Some(custom) = self.registry.find_custom_command(trigger, &commands) else {
            return CommandResult::failure(format!(
                "Custom command \"{}\" is no longer available",
                command.display_name
            ));
        };

        if custom.steps.is_empty() {
            return CommandResult::failure(format!("{} has no actions", custom.name));
        }
        if custom.steps.iter().any(|s| s.intent == CommandIntent::CustomAlias) {
            return CommandResult::failure(format!(
                "{} cannot run another custom command",
                custom.name
            ));
        }

        let steps: Vec<ParsedCommand> = custom
            .steps
            .iter()
            .map(|step| {
                let mut cmd = ParsedCommand::new(step.intent, trigger, CommandSource::Alias)
                    .with_display_name(display_name_for(step.intent, &step.parameters));
                cmd.entities = step.parameters.clone();
                cmd
            })
            .collect();

        info!("Running custom command {} ({} steps)", custom.name, steps.len());
        store.record_usage(&custom.name);

        let mut results = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if index > 0 {
                self.pause_between_steps().await;
            }
            let result = self.execute_step(step).await;
            let success = result.success;
            results.push(result);
            if !success {
                break;
            }
        }

        let duration = started.elapsed();
        match chain_failure(&steps, &results) {
            Some(err) => CommandResult::failure(format!("{}: {}", custom.name, err)).with_duration(duration),
            None => CommandResult::success(format!("{}: {} actions done", custom.name, results.len()))
                .with_duration(duration),
        }
    }

    async fn pause_between_steps(&self) {
        if !self.step_delay.is_zero() {
            tokio::time::sleep(self.step_delay).await;
        }
    }
}

/// The chain error for `results`, if its last step failed
pub fn chain_failure(commands: &[ParsedCommand], results: &[CommandResult]) -> Option<CommandError> {
    let index = results.len().checked_sub(1)?;
    let last = &results[index];
    if last.success {
        return None;
    }
    let intent = commands.get(index).map_or(CommandIntent::ChainedCommand, |c| c.intent);
    Some(CommandError::ChainFailed {
        intent,
        index,
        message: last.message.clone(),
    })
}
