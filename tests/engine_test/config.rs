//! Tests for config persistence used by the CLI

use vaultype::config::{CommandStep, Config, CustomCommand};
use vaultype::engine::CommandRegistry;
use vaultype::{CommandIntent, APP_NAME};

#[test]
fn test_disabled_intents_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut registry = CommandRegistry::new();
    registry.set_enabled(CommandIntent::QuitApp, false);
    Config::save_disabled_intents(&path, registry.disabled_intent_raw_values()).unwrap();

    let config = Config::from_file(&path).unwrap();
    let mut reloaded = CommandRegistry::new();
    reloaded.load_disabled_intents(&config.disabled_intents);
    assert!(!reloaded.is_enabled(CommandIntent::QuitApp));
    assert!(reloaded.is_enabled(CommandIntent::OpenApp));
}

#[test]
fn test_saving_disabled_intents_keeps_custom_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.custom_commands.push(
        CustomCommand::new("Mail", "check mail")
            .with_step(CommandStep::new(CommandIntent::OpenApp).with_parameter(APP_NAME, "Mail")),
    );
    config.save_to_file(&path).unwrap();

    Config::save_disabled_intents(&path, vec!["volumeMute".to_string()]).unwrap();
    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.disabled_intents, vec!["volumeMute"]);
    assert_eq!(config.custom_commands.len(), 1);
    assert_eq!(config.custom_commands[0].steps[0].parameters[APP_NAME], "Mail");
}
