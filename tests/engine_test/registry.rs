//! Tests for CommandRegistry

use vaultype::config::{CommandStep, CustomCommand};
use vaultype::engine::CommandRegistry;
use vaultype::{CommandCategory, CommandIntent, APP_NAME};

#[test]
fn test_every_intent_is_registered_once() {
    let registry = CommandRegistry::new();
    assert_eq!(registry.len(), CommandIntent::ALL.len());
    assert!(CommandIntent::ALL.iter().all(|i| registry.is_enabled(*i)));

    let window = registry.entries(CommandCategory::Window);
    assert_eq!(window.len(), 7);
}

#[test]
fn test_disabled_set_is_replaced_not_merged() {
    let mut registry = CommandRegistry::new();
    registry.load_disabled_intents(&["volumeUp", "lockScreen"]);
    assert_eq!(registry.disabled_intent_raw_values(), vec!["lockScreen", "volumeUp"]);

    registry.load_disabled_intents(&["openApp"]);
    assert!(registry.is_enabled(CommandIntent::VolumeUp));
    assert!(registry.is_enabled(CommandIntent::LockScreen));
    assert!(!registry.is_enabled(CommandIntent::OpenApp));
    assert_eq!(registry.disabled_intent_raw_values(), vec!["openApp"]);
}

#[test]
fn test_disabled_round_trip_through_another_registry() {
    let mut first = CommandRegistry::new();
    first.set_enabled(CommandIntent::HideApp, false);
    first.set_enabled(CommandIntent::TakeScreenshot, false);

    let mut second = CommandRegistry::new();
    second.load_disabled_intents(&first.disabled_intent_raw_values());
    for intent in CommandIntent::ALL {
        assert_eq!(first.is_enabled(intent), second.is_enabled(intent));
    }
}

#[test]
fn test_resolve_custom_command() {
    let registry = CommandRegistry::new();
    let commands = vec![
        CustomCommand::new("Standup", "Standup Time").disabled(),
        CustomCommand::new("Work", "work mode")
            .with_step(CommandStep::new(CommandIntent::OpenApp).with_parameter(APP_NAME, "Slack"))
            .with_step(CommandStep::new(CommandIntent::ToggleDoNotDisturb)),
    ];

    let steps = registry.resolve_custom_command("  WORK MODE ", &commands).unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].intent, CommandIntent::OpenApp);

    assert!(registry.resolve_custom_command("standup time", &commands).is_none());
    assert!(registry.resolve_custom_command("work", &commands).is_none());
}
