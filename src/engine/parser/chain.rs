//! Compound utterance splitting ("open Safari and then mute")

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Conjunctions, most specific first
const SEPARATORS: [&str; 3] = [r"(?i)\s+and\s+then\s+", r"(?i)\s+then\s+", r"(?i)\s+and\s+"];

static SEPARATOR_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    SEPARATORS
        .iter()
        .filter_map(|s| match Regex::new(s) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Invalid chain separator {}: {}", s, e);
                None
            }
        })
        .collect()
});

/// Split `text` on the first separator kind that occurs in it.
///
/// Returns the trimmed, non-empty segments, or `None` when no separator is
/// present or fewer than two segments remain.
pub fn split_segments(text: &str) -> Option<Vec<String>> {
    let separator = SEPARATOR_RES.iter().find(|re| re.is_match(text))?;

    let segments: Vec<String> = separator
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    (segments.len() >= 2).then_some(segments)
}
