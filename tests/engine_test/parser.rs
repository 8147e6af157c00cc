//! Tests for CommandParser

use vaultype::engine::CommandParser;
use vaultype::{CommandError, CommandIntent, CommandSource, APP_NAME, LEVEL};

#[tokio::test]
async fn test_common_commands() {
    let parser = CommandParser::new();
    let cases = [
        ("open Safari", CommandIntent::OpenApp),
        ("switch to Slack", CommandIntent::SwitchToApp),
        ("quit Xcode", CommandIntent::QuitApp),
        ("move window left", CommandIntent::MoveWindowLeft),
        ("snap the window to the right", CommandIntent::MoveWindowRight),
        ("full screen", CommandIntent::FullScreenWindow),
        ("volume down", CommandIntent::VolumeDown),
        ("mute", CommandIntent::VolumeMute),
        ("brightness up", CommandIntent::BrightnessUp),
        ("turn on do not disturb", CommandIntent::ToggleDoNotDisturb),
        ("lock the screen", CommandIntent::LockScreen),
        ("take a screenshot", CommandIntent::TakeScreenshot),
        ("run shortcut Focus", CommandIntent::RunShortcut),
    ];

    for (text, intent) in cases {
        let cmd = parser.parse(text).await.unwrap();
        assert_eq!(cmd.intent, intent, "{text}");
        assert_eq!(cmd.source, CommandSource::PatternMatch);
        assert!(cmd.confidence >= 0.5 && cmd.confidence <= 1.0);
    }
}

#[tokio::test]
async fn test_open_app_entities() {
    let cmd = CommandParser::new().parse("open Safari").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::OpenApp);
    assert_eq!(cmd.entities.len(), 1);
    assert_eq!(cmd.entity(APP_NAME), Some("Safari"));
}

#[tokio::test]
async fn test_volume_level() {
    let cmd = CommandParser::new().parse("set the volume to 75 percent").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::VolumeSet);
    assert_eq!(cmd.entity(LEVEL), Some("75"));
}

#[tokio::test]
async fn test_empty_and_unknown_text() {
    let parser = CommandParser::new();
    assert!(matches!(parser.parse("").await, Err(CommandError::Unrecognized { .. })));
    assert!(matches!(
        parser.parse("what is the weather like").await,
        Err(CommandError::Unrecognized { .. })
    ));
    assert!(parser.parse_chain("").await.is_empty());
}

#[tokio::test]
async fn test_chain_split() {
    let cmds = CommandParser::new()
        .parse_chain("open Safari and then volume up")
        .await;
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].intent, CommandIntent::OpenApp);
    assert_eq!(cmds[0].entity(APP_NAME), Some("Safari"));
    assert_eq!(cmds[1].intent, CommandIntent::VolumeUp);
}

#[tokio::test]
async fn test_chain_with_unknown_segment_is_one_command() {
    let cmds = CommandParser::new().parse_chain("open Safari and cheese").await;
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].intent, CommandIntent::OpenApp);
}

#[tokio::test]
async fn test_app_name_containing_and() {
    let cmds = CommandParser::new().parse_chain("open Pages and Numbers").await;
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].entity(APP_NAME), Some("Pages and Numbers"));
}
