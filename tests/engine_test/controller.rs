//! Tests for CommandModeController sessions

use std::time::Duration;

use vaultype::config::{CommandModeSettings, Config};
use vaultype::engine::{CommandModeController, CommandParser, WakeWordConfig, WakeWordDetector};
use vaultype::{CommandIntent, CommandModeState};

use crate::common::{recording_registry, CallLog};

fn controller(log: &CallLog) -> CommandModeController {
    let detector = WakeWordDetector::new(WakeWordConfig::new("hey type").with_cooldown(Duration::ZERO));
    CommandModeController::new(recording_registry(log), detector, CommandParser::new()).with_settings(
        CommandModeSettings {
            chain_step_delay_ms: 0,
            ..Default::default()
        },
    )
}

#[tokio::test(start_paused = true)]
async fn test_full_session() {
    let log = CallLog::default();
    let mut controller = controller(&log);

    controller.handle_transcript("hey type").await;
    assert!(controller.state().is_listening());

    controller.handle_transcript("open Safari and then volume up").await;
    assert!(matches!(controller.state(), CommandModeState::Completed { success: true, .. }));
    assert_eq!(log.calls(), vec![CommandIntent::OpenApp, CommandIntent::VolumeUp]);

    controller.tick().await;
    assert!(controller.state().is_inactive());
}

#[tokio::test]
async fn test_fuzzy_wake_word_sends_whole_transcript() {
    let log = CallLog::default();
    let mut controller = controller(&log);

    // Misheard wake word: the full text becomes the command, which does
    // not parse because it starts with the wake words
    controller.handle_transcript("hey tipe mute").await;
    assert!(matches!(controller.state(), CommandModeState::Error { .. }));
    assert_eq!(log.count(), 0);
}

#[tokio::test]
async fn test_unrecognized_then_follow_up() {
    let log = CallLog::default();
    let mut controller = controller(&log);

    controller.handle_transcript("hey type do a barrel roll").await;
    assert!(matches!(controller.state(), CommandModeState::Error { .. }));

    // Still showing the error: no wake word needed
    controller.handle_transcript("maximize window").await;
    assert!(matches!(controller.state(), CommandModeState::Completed { .. }));
    assert_eq!(log.calls(), vec![CommandIntent::MaximizeWindow]);
}

#[tokio::test(start_paused = true)]
async fn test_silence_after_wake_word() {
    let log = CallLog::default();
    let mut controller = controller(&log);

    controller.handle_transcript("hey type").await;
    tokio::time::advance(Duration::from_secs(5)).await;
    assert!(controller.state().is_listening());

    controller.tick().await;
    assert!(controller.state().is_inactive());
    assert_eq!(log.count(), 0);
}

#[tokio::test]
async fn test_config_driven_session() {
    let log = CallLog::default();
    let config: Config = toml::from_str(
        r#"
disabled_intents = ["lockScreen"]

[wake_word]
phrase = "computer"
cooldown_ms = 0

[command_mode]
chain_step_delay_ms = 0
"#,
    )
    .unwrap();

    let mut controller = CommandModeController::from_config(&config, recording_registry(&log));
    controller.handle_transcript("computer, lock screen").await;
    match controller.state() {
        CommandModeState::Error { message } => assert!(message.contains("disabled")),
        other => panic!("unexpected state {other:?}"),
    }

    controller.handle_transcript("computer, mute").await;
    assert_eq!(log.calls(), vec![CommandIntent::VolumeMute]);
}
