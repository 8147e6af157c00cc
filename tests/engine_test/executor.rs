//! Tests for CommandExecutor

use std::sync::Arc;
use std::time::Duration;

use vaultype::engine::{AutoConfirm, CommandExecutor};
use vaultype::{CommandIntent, CommandSource, ParsedCommand, APP_NAME};

use crate::common::{recording_registry, CallLog};

fn command(intent: CommandIntent) -> ParsedCommand {
    ParsedCommand::new(intent, intent.as_str(), CommandSource::PatternMatch)
}

#[tokio::test]
async fn test_disabled_command_reports_and_skips_handler() {
    let log = CallLog::default();
    let mut registry = recording_registry(&log);
    registry.set_enabled(CommandIntent::BrightnessDown, false);

    let result = CommandExecutor::new(&registry)
        .execute(&command(CommandIntent::BrightnessDown))
        .await;
    assert!(!result.success);
    assert!(result.message.contains("disabled"));
    assert_eq!(log.count(), 0);
}

#[tokio::test]
async fn test_chain_stops_after_disabled_middle_step() {
    let log = CallLog::default();
    let mut registry = recording_registry(&log);
    registry.set_enabled(CommandIntent::MinimizeWindow, false);
    let executor = CommandExecutor::new(&registry).with_step_delay(Duration::ZERO);

    let results = executor
        .execute_chain(&[
            command(CommandIntent::CenterWindow),
            command(CommandIntent::MinimizeWindow),
            command(CommandIntent::VolumeUp),
        ])
        .await;
    assert_eq!(results.len(), 2);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert_eq!(log.calls(), vec![CommandIntent::CenterWindow]);
}

#[tokio::test]
async fn test_chain_of_three_successes() {
    let log = CallLog::default();
    let registry = recording_registry(&log);
    let executor = CommandExecutor::new(&registry).with_step_delay(Duration::ZERO);

    let chain = [
        command(CommandIntent::OpenApp).with_entity(APP_NAME, "Notes"),
        command(CommandIntent::MaximizeWindow),
        command(CommandIntent::ToggleDarkMode),
    ];
    let results = executor.execute_chain(&chain).await;
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.success && !r.message.is_empty()));
    assert_eq!(
        log.calls(),
        vec![
            CommandIntent::OpenApp,
            CommandIntent::MaximizeWindow,
            CommandIntent::ToggleDarkMode
        ]
    );
}

#[tokio::test]
async fn test_missing_app_name_fails_before_handler() {
    let log = CallLog::default();
    let registry = recording_registry(&log);

    let result = CommandExecutor::new(&registry)
        .execute(&command(CommandIntent::SwitchToApp))
        .await;
    assert!(!result.success);
    assert_eq!(log.count(), 0);
}

#[tokio::test]
async fn test_quit_requires_confirmation() {
    let log = CallLog::default();
    let registry = recording_registry(&log);
    let quit = command(CommandIntent::QuitApp).with_entity(APP_NAME, "Xcode");

    let declined = CommandExecutor::new(&registry)
        .with_confirmation(Arc::new(AutoConfirm(false)))
        .execute(&quit)
        .await;
    assert!(!declined.success);
    assert_eq!(log.count(), 0);

    let confirmed = CommandExecutor::new(&registry)
        .with_confirmation(Arc::new(AutoConfirm(true)))
        .execute(&quit)
        .await;
    assert!(confirmed.success);
    assert_eq!(log.calls(), vec![CommandIntent::QuitApp]);
}
