// ABOUTME: Word and stopword counting over plain text for a given stopword set.
// ABOUTME: Punctuation is stripped before tokenizing; empty input yields zeroed stats.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::stopwords::StopWords;

// Anything that is not a letter, decimal digit, connector or whitespace.
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Ll}\p{Lu}\p{Lt}\p{Lo}\p{Nd}\p{Pc}\s]").unwrap());

/// Word statistics for one blob of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    word_count: usize,
    stop_word_count: usize,
    stop_words: Vec<String>,
}

impl WordStats {
    /// Number of tokens after punctuation stripping.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of tokens found in the stopword set.
    pub fn stop_word_count(&self) -> usize {
        self.stop_word_count
    }

    /// Matched stopwords, lowercase, in the order they appeared.
    pub fn stop_words(&self) -> &[String] {
        &self.stop_words
    }
}

/// Counts words and stopwords in `text`.
///
/// Tokens are compared case-folded. Dictionary-segmented languages get spaces
/// inserted around each stopword occurrence before the whitespace split.
pub fn count(text: &str, stop_words: &StopWords) -> WordStats {
    if text.trim().is_empty() {
        return WordStats::default();
    }

    let stripped = PUNCTUATION_RE.replace_all(text, "");
    let folded = stripped.to_lowercase();
    let segmented = stop_words.segment(&folded);

    let mut stats = WordStats::default();
    for token in segmented.split_whitespace() {
        stats.word_count += 1;
        if stop_words.contains(token) {
            stats.stop_word_count += 1;
            stats.stop_words.push(token.to_string());
        }
    }
    stats
}

/// Shorthand for `count(text, stop_words).stop_word_count()`.
pub fn stop_word_count(text: &str, stop_words: &StopWords) -> usize {
    count(text, stop_words).stop_word_count
}
