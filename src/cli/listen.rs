//! Listen command implementation
//!
//! Runs a command-mode session over stdin: each line is one transcript
//! segment. Handlers only print what they would do.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use vaultype::config::Config;
use vaultype::engine::{
    AutoConfirm, CommandModeController, CommandModeEvent, CommandRegistry, IntentHandler,
    TranscriptSegment,
};
use vaultype::{CommandIntent, CommandModeState, CommandResult, ParsedCommand, UndoAction};

/// Handler that reports the command instead of performing it
struct DryRunHandler;

#[async_trait]
impl IntentHandler for DryRunHandler {
    async fn handle(&self, command: &ParsedCommand) -> Result<CommandResult> {
        let mut result = CommandResult::success(format!("{} (dry run)", command.display_name));
        if let Some(undo) = UndoAction::inverse_of(command) {
            result = result.with_undo(undo);
        }
        Ok(result)
    }
}

pub async fn listen_command(config_path: Option<&Path>, assume_yes: bool) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let config_file = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    let handler: Arc<dyn IntentHandler> = Arc::new(DryRunHandler);
    let mut registry = CommandRegistry::new();
    for intent in CommandIntent::ALL {
        registry.register_handler(intent, handler.clone());
    }

    let mut controller = CommandModeController::from_config(&config, registry)
        .with_confirmation(Arc::new(AutoConfirm(assume_yes)));
    let events = controller.subscribe();
    let printer = tokio::spawn(print_events(events));

    println!(
        "Say \"{}\" followed by a command (one line per utterance, Ctrl-D to stop)",
        config.wake_word.phrase
    );

    let (tx, rx) = mpsc::channel(32);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(TranscriptSegment::new(line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin closed");
    });

    controller.run(rx).await;
    reader.await.context("Stdin reader task failed")?;

    let undo = controller.last_undo_actions().to_vec();
    if !undo.is_empty() {
        println!("Undo available for the last run:");
        for action in &undo {
            println!("  - {}", action.description);
        }
    }

    let used = controller.custom_commands().custom_commands();
    let any_used = used
        .iter()
        .zip(&config.custom_commands)
        .any(|(now, before)| now.use_count != before.use_count);
    if any_used && config_file.exists() {
        let mut saved = Config::from_file(&config_file)?;
        saved.custom_commands = used;
        saved.save_to_file(&config_file)?;
        info!("Saved custom command usage to {}", config_file.display());
    }

    // Closes the event channel so the printer finishes
    drop(controller);
    printer.await.context("Event printer task failed")?;
    Ok(())
}

async fn print_events(mut events: mpsc::UnboundedReceiver<CommandModeEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            CommandModeEvent::StateChanged(state) => match &state {
                CommandModeState::Inactive | CommandModeState::Processing { .. } => {
                    debug!("{}", state)
                }
                _ => println!("[{}] {}", state.name(), state),
            },
            CommandModeEvent::StepFinished(result) => {
                let mark = if result.success { "ok" } else { "failed" };
                println!("  {} {} ({:?})", mark, result.message, result.duration);
            }
            CommandModeEvent::InputIgnored(text) => {
                println!("  (busy, ignored \"{}\")", text);
            }
        }
    }
}
