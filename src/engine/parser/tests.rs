use super::*;
use crate::config::{CommandStep, CustomCommand};
use crate::domain::{APP_NAME, LEVEL, SHORTCUT_NAME};
use crate::engine::store::InMemoryCustomCommandStore;
use anyhow::Result;
use async_trait::async_trait;

struct FixedClassifier {
    result: Classification,
    delay: Duration,
}

#[async_trait]
impl SemanticClassifier for FixedClassifier {
    async fn classify(&self, _text: &str) -> Result<Classification> {
        tokio::time::sleep(self.delay).await;
        Ok(self.result.clone())
    }
}

fn classifier(intent: &str, confidence: f64) -> Arc<dyn SemanticClassifier> {
    Arc::new(FixedClassifier {
        result: Classification {
            intent: intent.to_string(),
            entities: BTreeMap::from([(APP_NAME.to_string(), "Music".to_string())]),
            confidence,
        },
        delay: Duration::ZERO,
    })
}

#[tokio::test]
async fn test_parse_open_app() {
    let parser = CommandParser::new();
    let cmd = parser.parse("open Safari").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::OpenApp);
    assert_eq!(cmd.entity(APP_NAME), Some("Safari"));
    assert_eq!(cmd.entities.len(), 1);
    assert_eq!(cmd.display_name, "Open Safari");
    assert_eq!(cmd.source, CommandSource::PatternMatch);
    assert_eq!(cmd.confidence, 1.0);
}

#[tokio::test]
async fn test_parse_rejects_empty_and_gibberish() {
    let parser = CommandParser::new();
    assert!(matches!(
        parser.parse("").await,
        Err(CommandError::Unrecognized { .. })
    ));
    assert!(parser.parse("   ").await.is_err());
    assert!(parser.parse("hello world foo bar").await.is_err());
}

#[tokio::test]
async fn test_parse_is_case_insensitive() {
    let parser = CommandParser::new();
    let cmd = parser.parse("VOLUME UP").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::VolumeUp);
}

#[test]
fn test_trailing_punctuation_is_ignored() {
    let parser = CommandParser::new();
    let cmd = parser.match_pattern("Open Safari.").unwrap();
    assert_eq!(cmd.entity(APP_NAME), Some("Safari"));
    assert_eq!(cmd.raw_text, "Open Safari.");
}

#[test]
fn test_entity_extraction() {
    let parser = CommandParser::new();

    let cmd = parser.match_pattern("set volume to 40%").unwrap();
    assert_eq!(cmd.intent, CommandIntent::VolumeSet);
    assert_eq!(cmd.entity(LEVEL), Some("40"));
    assert_eq!(cmd.display_name, "Set volume to 40%");

    let cmd = parser.match_pattern("run shortcut   Morning Routine ").unwrap();
    assert_eq!(cmd.intent, CommandIntent::RunShortcut);
    assert_eq!(cmd.entity(SHORTCUT_NAME), Some("Morning Routine"));
}

#[test]
fn test_priority_breaks_overlaps() {
    let parser = CommandParser::new();
    // Both "switch to (.+)" and the dark mode row match the full text
    let cmd = parser.match_pattern("switch to dark mode").unwrap();
    assert_eq!(cmd.intent, CommandIntent::ToggleDarkMode);

    // "exit (.+)" vs. the full screen row
    let cmd = parser.match_pattern("exit full screen").unwrap();
    assert_eq!(cmd.intent, CommandIntent::FullScreenWindow);

    let cmd = parser.match_pattern("move the window to the next display").unwrap();
    assert_eq!(cmd.intent, CommandIntent::MoveWindowToNextScreen);
}

#[test]
fn test_partial_match_confidence() {
    let parser = CommandParser::new();
    // 9 of 16 characters matched
    let cmd = parser.match_pattern("volume up please").unwrap();
    assert_eq!(cmd.intent, CommandIntent::VolumeUp);
    assert!((cmd.confidence - 9.0 / 16.0).abs() < 1e-9);

    // Too little of the input is explained by the match
    assert!(parser.match_pattern("mute the whole conference room now").is_none());
}

#[test]
fn test_min_confidence_is_configurable() {
    let strict = CommandParser::new().with_min_confidence(0.9);
    assert!(strict.match_pattern("volume up please").is_none());
    assert!(strict.match_pattern("volume up").is_some());
}

#[test]
fn test_entity_keys_are_declared_keys() {
    let parser = CommandParser::new();
    for text in ["open Notes", "lock screen", "set volume 20", "run shortcut Focus"] {
        let cmd = parser.match_pattern(text).unwrap();
        let declared: Vec<&str> = PATTERNS
            .iter()
            .filter(|p| p.intent == cmd.intent)
            .flat_map(|p| p.entity_keys.iter().copied())
            .collect();
        assert!(cmd.entities.keys().all(|k| declared.contains(&k.as_str())));
    }
}

#[test]
fn test_every_pattern_compiles() {
    assert_eq!(COMPILED.len(), PATTERNS.len());
    assert!(PATTERNS.iter().all(|p| (1..=10).contains(&p.priority)));
}

#[tokio::test]
async fn test_parse_chain_splits_known_commands() {
    let parser = CommandParser::new();
    let cmds = parser.parse_chain("open Safari and volume up").await;
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].intent, CommandIntent::OpenApp);
    assert_eq!(cmds[0].entity(APP_NAME), Some("Safari"));
    assert_eq!(cmds[1].intent, CommandIntent::VolumeUp);
}

#[tokio::test]
async fn test_parse_chain_rejects_split_with_unknown_segment() {
    let parser = CommandParser::new();
    let cmds = parser.parse_chain("open Safari and cheese").await;
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].intent, CommandIntent::OpenApp);
    assert_eq!(cmds[0].entity(APP_NAME), Some("Safari and cheese"));
}

#[tokio::test]
async fn test_parse_chain_then_separator() {
    let parser = CommandParser::new();
    let cmds = parser
        .parse_chain("maximize window and then take a screenshot then lock screen")
        .await;
    // "and then" is more specific, so it is the only separator used
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].intent, CommandIntent::MaximizeWindow);
    assert_eq!(cmds[1].intent, CommandIntent::TakeScreenshot);
}

#[tokio::test]
async fn test_parse_chain_unrecognized_is_empty() {
    let parser = CommandParser::new();
    assert!(parser.parse_chain("bananas and apples").await.is_empty());
}

fn alias_store() -> Arc<InMemoryCustomCommandStore> {
    Arc::new(InMemoryCustomCommandStore::new(vec![
        CustomCommand::new("Morning", "Start My Day")
            .with_step(CommandStep::new(CommandIntent::OpenApp).with_parameter(APP_NAME, "Mail")),
        CustomCommand::new("Old", "open sesame").disabled(),
    ]))
}

#[tokio::test]
async fn test_alias_resolution_comes_first() {
    let parser = CommandParser::new().with_custom_commands(alias_store());
    let cmd = parser.parse("start my day.").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::CustomAlias);
    assert_eq!(cmd.source, CommandSource::Alias);
    assert_eq!(cmd.confidence, 1.0);
    assert_eq!(cmd.entity(ALIAS_NAME), Some("Morning"));
    assert_eq!(cmd.entity(TRIGGER), Some("Start My Day"));
}

#[tokio::test]
async fn test_disabled_alias_falls_through_to_patterns() {
    let parser = CommandParser::new().with_custom_commands(alias_store());
    let cmd = parser.parse("open sesame").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::OpenApp);
    assert_eq!(cmd.source, CommandSource::PatternMatch);
}

#[tokio::test]
async fn test_chain_segments_skip_aliases() {
    let parser = CommandParser::new().with_custom_commands(alias_store());
    // "start my day" is an alias but chain segments only use patterns
    assert!(parser.split_chain("mute and start my day").is_none());
}

#[tokio::test]
async fn test_parse_chain_prefers_whole_text_alias() {
    let store = Arc::new(InMemoryCustomCommandStore::new(vec![CustomCommand::new("Away", "mute and lock")
        .with_step(CommandStep::new(CommandIntent::VolumeMute))]));
    let parser = CommandParser::new().with_custom_commands(store);

    let commands = parser.parse_chain("Mute and lock").await;
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].intent, CommandIntent::CustomAlias);
    assert_eq!(commands[0].source, CommandSource::Alias);

    // Without the alias the same words are a two-step chain
    let plain = CommandParser::new().parse_chain("mute and lock").await;
    assert_eq!(plain.len(), 2);
}

#[tokio::test]
async fn test_semantic_fallback_accepts_confident_result() {
    let parser = CommandParser::new().with_classifier(
        classifier("openApp", 0.8),
        DEFAULT_SEMANTIC_MIN_CONFIDENCE,
        Duration::from_secs(1),
    );
    let cmd = parser.parse("I want to listen to some tunes").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::OpenApp);
    assert_eq!(cmd.source, CommandSource::SemanticFallback);
    assert_eq!(cmd.entity(APP_NAME), Some("Music"));
    assert_eq!(cmd.display_name, "Open Music");
}

#[tokio::test]
async fn test_semantic_fallback_rejects_low_confidence_and_unknown_intents() {
    let low = CommandParser::new().with_classifier(classifier("openApp", 0.59), 0.6, Duration::from_secs(1));
    assert!(low.parse("play something").await.is_err());

    let unknown = CommandParser::new().with_classifier(classifier("orderPizza", 0.99), 0.6, Duration::from_secs(1));
    assert!(unknown.parse("I'm hungry").await.is_err());
}

#[tokio::test]
async fn test_semantic_fallback_drops_undeclared_entities() {
    let parser = CommandParser::new().with_classifier(classifier("volumeUp", 0.9), 0.6, Duration::from_secs(1));
    let cmd = parser.parse("make it a bit louder for me").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::VolumeUp);
    assert!(cmd.entities.is_empty());
}

#[tokio::test]
async fn test_semantic_fallback_can_name_an_extension() {
    let parser = CommandParser::new()
        .with_classifier(classifier("Post Standup", 0.9), 0.6, Duration::from_secs(1))
        .with_extensions(["post standup"]);
    let cmd = parser.parse("tell the team what I did").await.unwrap();
    assert_eq!(cmd.intent, CommandIntent::CustomAlias);
    assert_eq!(cmd.extension(), Some("Post Standup"));
}

#[tokio::test(start_paused = true)]
async fn test_semantic_fallback_is_bounded() {
    let slow: Arc<dyn SemanticClassifier> = Arc::new(FixedClassifier {
        result: Classification {
            intent: "volumeUp".to_string(),
            entities: BTreeMap::new(),
            confidence: 1.0,
        },
        delay: Duration::from_secs(30),
    });
    let parser = CommandParser::new().with_classifier(slow, 0.6, Duration::from_millis(200));
    assert!(parser.parse("pump it up").await.is_err());
}

#[test]
fn test_normalize() {
    assert_eq!(normalize("  open   Safari. "), "open Safari");
    assert_eq!(normalize("\"mute!\""), "mute");
    assert_eq!(normalize("..."), "");
}

#[test]
fn test_display_name_for() {
    let mut entities = BTreeMap::new();
    assert_eq!(display_name_for(CommandIntent::OpenApp, &entities), "Open App");
    entities.insert(APP_NAME.to_string(), "Xcode".to_string());
    assert_eq!(display_name_for(CommandIntent::OpenApp, &entities), "Open Xcode");
    assert_eq!(display_name_for(CommandIntent::ChainedCommand, &entities), "Chained Command");
}
