//! Wake word detection
//!
//! Decides whether a transcript segment activates command mode. An exact
//! (substring) match yields the text after the phrase; when that fails, a
//! sliding window of the phrase's word count is compared by edit distance so
//! that mis-transcriptions like "hey tipe" still activate.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::config::WakeWordSettings;

/// Wake word configuration, fixed for a session
#[derive(Debug, Clone, PartialEq)]
pub struct WakeWordConfig {
    pub phrase: String,
    pub case_sensitive: bool,
    /// Minimum window similarity (0.0-1.0) for a fuzzy hit
    pub fuzzy_threshold: f64,
    pub cooldown: Duration,
}

impl Default for WakeWordConfig {
    fn default() -> Self {
        WakeWordSettings::default().into()
    }
}

impl From<WakeWordSettings> for WakeWordConfig {
    fn from(settings: WakeWordSettings) -> Self {
        Self {
            phrase: settings.phrase,
            case_sensitive: settings.case_sensitive,
            fuzzy_threshold: settings.fuzzy_threshold.clamp(0.0, 1.0),
            cooldown: Duration::from_millis(settings.cooldown_ms),
        }
    }
}

impl WakeWordConfig {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            ..Self::default()
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// How the wake word was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    /// Fuzzy hits carry no split point, so the whole transcript is the command
    Fuzzy,
}

/// Result of a successful detection
#[derive(Debug, Clone, PartialEq)]
pub struct WakeWordMatch {
    /// Command text following the wake word. Empty means "listen for the command".
    pub remainder: String,
    pub kind: MatchKind,
}

/// Stateful detector; remembers the last trigger for the cooldown
#[derive(Debug)]
pub struct WakeWordDetector {
    config: WakeWordConfig,
    normalized_phrase: String,
    phrase_words: Vec<String>,
    last_trigger: Option<Instant>,
}

impl WakeWordDetector {
    pub fn new(config: WakeWordConfig) -> Self {
        let (normalized_phrase, _) = fold_case(config.phrase.trim(), config.case_sensitive);
        let phrase_words = normalized_phrase
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            config,
            normalized_phrase,
            phrase_words,
            last_trigger: None,
        }
    }

    pub fn config(&self) -> &WakeWordConfig {
        &self.config
    }

    /// Check `text` for the wake word.
    ///
    /// Returns `None` when the phrase is absent or the cooldown is still running.
    pub fn detect(&mut self, text: &str) -> Option<WakeWordMatch> {
        if self.normalized_phrase.is_empty() {
            return None;
        }

        let now = Instant::now();
        let cooling_down = self
            .last_trigger
            .is_some_and(|last| now.duration_since(last) < self.config.cooldown);
        if cooling_down {
            debug!("Wake word ignored: cooldown active");
            return None;
        }

        let found = self
            .exact_match(text)
            .or_else(|| self.fuzzy_match(text))?;

        self.last_trigger = Some(now);
        debug!(kind = ?found.kind, remainder = %found.remainder, "Wake word detected");
        Some(found)
    }

    /// Forget the last trigger so the next detection is not rate-limited
    pub fn reset_cooldown(&mut self) {
        self.last_trigger = None;
    }

    fn exact_match(&self, text: &str) -> Option<WakeWordMatch> {
        let (haystack, source_ends) = fold_case(text, self.config.case_sensitive);
        let start = haystack.find(&self.normalized_phrase)?;
        let end = start + self.normalized_phrase.len();

        // Case folding can change lengths ('İ' lowers to two chars), so cut
        // `text` after the source char that produced the last matched byte
        let end_byte = end
            .checked_sub(1)
            .and_then(|last| source_ends.get(last).copied())
            .unwrap_or(text.len());

        let remainder = text[end_byte..]
            .trim_start_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .trim_end();

        Some(WakeWordMatch {
            remainder: remainder.to_string(),
            kind: MatchKind::Exact,
        })
    }

    fn fuzzy_match(&self, text: &str) -> Option<WakeWordMatch> {
        let haystack = normalize_case(text, self.config.case_sensitive);
        let words: Vec<&str> = haystack
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() || self.phrase_words.is_empty() {
            return None;
        }

        let phrase = self.phrase_words.join(" ");
        let window = self.phrase_words.len().min(words.len());

        let best = words
            .windows(window)
            .map(|w| similarity(&w.join(" "), &phrase))
            .fold(0.0_f64, f64::max);

        if best >= self.config.fuzzy_threshold {
            debug!(similarity = best, "Fuzzy wake word match");
            Some(WakeWordMatch {
                remainder: text.trim().to_string(),
                kind: MatchKind::Fuzzy,
            })
        } else {
            None
        }
    }
}

/// 1 - levenshtein / max(len), over characters
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - strsim::levenshtein(a, b) as f64 / max_len as f64
}

fn normalize_case(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// Case-fold `text`, returning for every byte of the result the byte offset
/// in `text` just past the char it came from
fn fold_case(text: &str, case_sensitive: bool) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut source_ends = Vec::with_capacity(text.len());
    for (idx, c) in text.char_indices() {
        let before = folded.len();
        if case_sensitive {
            folded.push(c);
        } else {
            folded.extend(c.to_lowercase());
        }
        source_ends.resize(source_ends.len() + folded.len() - before, idx + c.len_utf8());
    }
    (folded, source_ends)
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| c.is_ascii_punctuation())
}
