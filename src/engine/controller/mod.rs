//! CommandModeController - the command-mode session state machine
//!
//! ```text
//! inactive -> listening -> processing -> executing -> completed | error -> inactive
//! ```
//!
//! The controller handles one transcript at a time. Text arriving while a
//! command is being parsed or run is dropped, never queued. Only one timer is
//! ever pending: arming a new deadline replaces the old one.

mod events;


pub use events::{CommandModeEvent, TranscriptSegment};

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{CommandModeSettings, Config};
use crate::domain::{
    collect_undo_actions, CommandError, CommandIntent, CommandModeState, CommandResult,
    ParsedCommand, UndoAction,
};

use super::executor::{chain_failure, CommandExecutor, ConfirmationPrompt};
use super::parser::{normalize, CommandParser};
use super::registry::CommandRegistry;
use super::store::{CustomCommandStore, InMemoryCustomCommandStore};
use super::wake_word::WakeWordDetector;

/// Phrases that end the session from any state
pub const CANCEL_PHRASES: [&str; 5] = ["cancel", "never mind", "stop", "dismiss", "forget it"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// No command arrived after the wake word
    ListeningTimeout,
    /// A result has been on display long enough
    ResultExpired,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    kind: TimerKind,
}

/// Drives wake word, parser and executor for a single user session
pub struct CommandModeController {
    registry: CommandRegistry,
    detector: WakeWordDetector,
    parser: CommandParser,
    custom_commands: Arc<dyn CustomCommandStore>,
    confirmation: Option<Arc<dyn ConfirmationPrompt>>,
    settings: CommandModeSettings,
    state: CommandModeState,
    deadline: Option<Deadline>,
    /// Start and end of the most recent processing run
    busy_window: Option<(Instant, Instant)>,
    last_undo: Vec<UndoAction>,
    events: Option<mpsc::UnboundedSender<CommandModeEvent>>,
}

impl CommandModeController {
    pub fn new(registry: CommandRegistry, detector: WakeWordDetector, parser: CommandParser) -> Self {
        Self {
            registry,
            detector,
            parser,
            custom_commands: Arc::new(InMemoryCustomCommandStore::default()),
            confirmation: None,
            settings: CommandModeSettings::default(),
            state: CommandModeState::Inactive,
            deadline: None,
            busy_window: None,
            last_undo: Vec::new(),
            events: None,
        }
    }

    /// Wire everything from a loaded config. Handlers and extensions must
    /// already be registered on `registry`.
    pub fn from_config(config: &Config, mut registry: CommandRegistry) -> Self {
        registry.load_disabled_intents(&config.disabled_intents);

        let extensions: Vec<String> = registry
            .all_entries()
            .filter(|e| !e.built_in)
            .map(|e| e.name.clone())
            .collect();
        let parser = CommandParser::from_settings(&config.parser).with_extensions(extensions);
        let detector = WakeWordDetector::new(config.wake_word.clone().into());
        let store = Arc::new(InMemoryCustomCommandStore::new(config.custom_commands.clone()));

        Self::new(registry, detector, parser)
            .with_settings(config.command_mode.clone())
            .with_custom_commands(store)
    }

    pub fn with_settings(mut self, settings: CommandModeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Custom commands used by both alias matching and alias execution
    pub fn with_custom_commands(mut self, store: Arc<dyn CustomCommandStore>) -> Self {
        self.parser = self.parser.with_custom_commands(store.clone());
        self.custom_commands = store;
        self
    }

    pub fn with_confirmation(mut self, prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        self.confirmation = Some(prompt);
        self
    }

    /// Receive state changes and results. Replaces any earlier subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CommandModeEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    pub fn state(&self) -> &CommandModeState {
        &self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn settings(&self) -> &CommandModeSettings {
        &self.settings
    }

    pub fn custom_commands(&self) -> &Arc<dyn CustomCommandStore> {
        &self.custom_commands
    }

    pub fn set_enabled(&mut self, intent: CommandIntent, enabled: bool) {
        self.registry.set_enabled(intent, enabled);
    }

    /// Undo actions of the last run's successful steps, most recent first
    pub fn last_undo_actions(&self) -> &[UndoAction] {
        &self.last_undo
    }

    /// Whether a timer (listening timeout or result display) is pending
    pub fn has_pending_timer(&self) -> bool {
        self.deadline.is_some()
    }

    /// Enter listening without a wake word (hotkey activation)
    pub fn activate(&mut self) {
        if self.state.is_busy() {
            debug!("Ignoring activation while {}", self.state.name());
            return;
        }
        self.enter_listening();
    }

    /// Return to inactive and drop any pending timer
    pub fn deactivate(&mut self) {
        self.deadline = None;
        if !self.state.is_inactive() {
            self.set_state(CommandModeState::Inactive);
        }
    }

    /// Feed a queued segment, dropping it if it arrived while busy
    pub async fn handle_segment(&mut self, segment: TranscriptSegment) {
        let arrived_while_busy = self
            .busy_window
            .is_some_and(|(start, end)| segment.received_at >= start && segment.received_at < end);
        if arrived_while_busy {
            debug!("Dropping segment received while busy: {:?}", segment.text);
            self.emit(CommandModeEvent::InputIgnored(segment.text));
            return;
        }

        if let Some(language) = &segment.language {
            debug!(language = %language, "Transcript segment");
        }
        self.handle_transcript(&segment.text).await;
    }

    /// Advance the state machine with one piece of transcribed text
    pub async fn handle_transcript(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        if is_cancel_phrase(text) {
            info!("Command mode cancelled");
            self.deactivate();
            return;
        }

        if self.state.is_busy() {
            debug!("Busy, ignoring {:?}", text);
            self.emit(CommandModeEvent::InputIgnored(text.to_string()));
            return;
        }

        if self.state.is_listening() {
            self.process(text).await;
            return;
        }

        // inactive, completed or error
        let showing_result = self.state.is_showing_result();
        match self.detector.detect(text) {
            Some(found) => {
                self.enter_listening();
                if !found.remainder.is_empty() {
                    self.process(&found.remainder).await;
                }
            }
            // Follow-up while the last result is still on display
            None if showing_result => self.process(text).await,
            None => debug!("No wake word in {:?}", text),
        }
    }

    /// Wait for the pending timer and apply it. Returns false if none is set.
    pub async fn tick(&mut self) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        tokio::time::sleep_until(deadline.at).await;
        self.fire_deadline();
        true
    }

    /// Consume transcript segments until the sender side closes
    pub async fn run(&mut self, mut transcripts: mpsc::Receiver<TranscriptSegment>) {
        info!("Command mode started");
        loop {
            let deadline = self.deadline.map(|d| d.at);
            tokio::select! {
                segment = transcripts.recv() => match segment {
                    Some(segment) => self.handle_segment(segment).await,
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire_deadline();
                }
            }
        }
        info!("Transcript stream closed, command mode stopped");
    }

    async fn process(&mut self, text: &str) {
        self.deadline = None;

        if is_cancel_phrase(text) {
            info!("Command mode cancelled");
            self.deactivate();
            return;
        }

        let started = Instant::now();
        self.set_state(CommandModeState::Processing {
            text: text.to_string(),
        });

        match self.parse(text).await {
            Ok(commands) => {
                self.set_state(CommandModeState::Executing {
                    display_name: describe(&commands),
                });
                match self.run_commands(&commands).await {
                    Ok(results) => self.finish(&commands, results),
                    Err(e) => {
                        warn!("{}", e);
                        self.last_undo.clear();
                        self.set_state(CommandModeState::Error { message: e.to_string() });
                    }
                }
            }
            Err(e) => {
                info!("{}", e);
                self.set_state(CommandModeState::Error { message: e.to_string() });
            }
        }

        self.busy_window = Some((started, Instant::now()));
        self.arm(
            TimerKind::ResultExpired,
            Duration::from_millis(self.settings.result_display_ms),
        );
    }

    async fn parse(&self, text: &str) -> Result<Vec<ParsedCommand>, CommandError> {
        let chaining =
            self.settings.chaining_enabled && self.registry.is_enabled(CommandIntent::ChainedCommand);
        if !chaining {
            return self.parser.parse(text).await.map(|cmd| vec![cmd]);
        }

        let commands = self.parser.parse_chain(text).await;
        if commands.is_empty() {
            return Err(CommandError::Unrecognized { text: text.to_string() });
        }
        Ok(commands)
    }

    async fn run_commands(&self, commands: &[ParsedCommand]) -> Result<Vec<CommandResult>, CommandError> {
        let mut executor = CommandExecutor::new(&self.registry)
            .with_custom_commands(self.custom_commands.clone())
            .with_step_delay(Duration::from_millis(self.settings.chain_step_delay_ms));
        if let Some(confirmation) = &self.confirmation {
            executor = executor.with_confirmation(confirmation.clone());
        }

        let limit = Duration::from_secs(self.settings.execution_timeout_secs);
        tokio::time::timeout(limit, executor.execute_chain(commands))
            .await
            .map_err(|_| CommandError::Timeout(limit))
    }

    fn finish(&mut self, commands: &[ParsedCommand], results: Vec<CommandResult>) {
        self.last_undo = collect_undo_actions(&results);
        for result in &results {
            self.emit(CommandModeEvent::StepFinished(result.clone()));
        }

        let state = match chain_failure(commands, &results) {
            // A lone command reports its own message, a chain names the step
            Some(_) if commands.len() == 1 => CommandModeState::Error {
                message: results.last().map(|r| r.message.clone()).unwrap_or_default(),
            },
            Some(err) => CommandModeState::Error { message: err.to_string() },
            None => CommandModeState::Completed {
                success: true,
                message: results
                    .iter()
                    .map(|r| r.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            },
        };
        self.set_state(state);
    }

    fn enter_listening(&mut self) {
        self.set_state(CommandModeState::Listening { since: Utc::now() });
        self.arm(
            TimerKind::ListeningTimeout,
            Duration::from_secs(self.settings.listening_timeout_secs),
        );
    }

    /// Replace the pending timer
    fn arm(&mut self, kind: TimerKind, after: Duration) {
        self.deadline = Some(Deadline {
            at: Instant::now() + after,
            kind,
        });
    }

    fn fire_deadline(&mut self) {
        let Some(deadline) = self.deadline.take() else {
            return;
        };
        match deadline.kind {
            TimerKind::ListeningTimeout if self.state.is_listening() => {
                info!("No command within {}s, leaving command mode", self.settings.listening_timeout_secs);
                self.set_state(CommandModeState::Inactive);
            }
            TimerKind::ResultExpired if self.state.is_showing_result() => {
                self.set_state(CommandModeState::Inactive);
            }
            kind => debug!("Stale {:?} timer in state {}", kind, self.state.name()),
        }
    }

    fn set_state(&mut self, state: CommandModeState) {
        debug!("Command mode: {} -> {}", self.state.name(), state.name());
        self.state = state;
        self.emit(CommandModeEvent::StateChanged(self.state.clone()));
    }

    fn emit(&mut self, event: CommandModeEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                debug!("Event receiver dropped");
                self.events = None;
            }
        }
    }
}

/// Case and whitespace insensitive match against [`CANCEL_PHRASES`]
pub fn is_cancel_phrase(text: &str) -> bool {
    let normalized = normalize(text).to_lowercase();
    CANCEL_PHRASES.contains(&normalized.as_str())
}

fn describe(commands: &[ParsedCommand]) -> String {
    commands
        .iter()
        .map(|c| c.display_name.as_str())
        .collect::<Vec<_>>()
        .join(", then ")
}
