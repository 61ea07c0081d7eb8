// ABOUTME: Stopword sets and the provider trait that resolves a language code to a set.
// ABOUTME: Embeds English and Chinese lists; Chinese text is segmented against its dictionary.

//! Stopword lists.
//!
//! A [`StopWords`] value is an ordered, lowercase set of tokens plus the rule
//! used to split text into tokens. Most languages split on whitespace. Languages
//! written without word separators use [`Segmentation::Dictionary`], which
//! pads every stopword occurrence with spaces before splitting.

use std::borrow::Cow;
use std::collections::BTreeSet;

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

use crate::text::{self, WordStats};

const ENGLISH_STOP_WORDS: &str = include_str!("../data/stopwords-en.txt");
const CHINESE_STOP_WORDS: &str = include_str!("../data/stopwords-zh.txt");

static ENGLISH: Lazy<StopWords> = Lazy::new(|| StopWords::new("en", parse_list(ENGLISH_STOP_WORDS)));
static CHINESE: Lazy<StopWords> = Lazy::new(|| {
    StopWords::with_segmentation("zh", parse_list(CHINESE_STOP_WORDS), Segmentation::Dictionary)
});

/// How text is split into tokens before stopwords are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segmentation {
    /// Split on runs of whitespace.
    #[default]
    Whitespace,
    /// Insert spaces around every dictionary match, then split on whitespace.
    Dictionary,
}

/// An ordered set of lowercase stopwords for one language.
#[derive(Debug, Clone)]
pub struct StopWords {
    language: String,
    words: BTreeSet<String>,
    segmentation: Segmentation,
    dictionary: Option<AhoCorasick>,
}

impl StopWords {
    /// Builds a whitespace-segmented stopword set.
    pub fn new<I, S>(language: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_segmentation(language, words, Segmentation::Whitespace)
    }

    /// Builds a stopword set with an explicit segmentation rule.
    ///
    /// Words are trimmed and lowercased; blanks are dropped.
    pub fn with_segmentation<I, S>(
        language: impl Into<String>,
        words: I,
        segmentation: Segmentation,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let dictionary = match segmentation {
            Segmentation::Dictionary if !words.is_empty() => AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostLongest)
                .build(&words)
                .ok(),
            _ => None,
        };

        Self {
            language: language.into(),
            words,
            segmentation,
            dictionary,
        }
    }

    /// The built-in English list.
    pub fn english() -> &'static StopWords {
        &ENGLISH
    }

    /// Language code this set was built for.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn segmentation(&self) -> Segmentation {
        self.segmentation
    }

    /// Returns true if the already-lowercased token is a stopword.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates the words in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Counts words and stopwords in `text`.
    pub fn count(&self, text: &str) -> WordStats {
        text::count(text, self)
    }

    /// Pads dictionary matches with spaces so a whitespace split isolates them.
    pub(crate) fn segment<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(dictionary) = &self.dictionary else {
            return Cow::Borrowed(text);
        };

        let mut out = String::with_capacity(text.len() + text.len() / 2);
        let mut last = 0;
        for m in dictionary.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            out.push(' ');
            out.push_str(&text[m.start()..m.end()]);
            out.push(' ');
            last = m.end();
        }
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }
}

/// Resolves a language code to its stopword set.
pub trait StopWordsProvider {
    /// Returns the stopwords for `language`, or `None` if the language is unknown.
    fn stop_words_for(&self, language: &str) -> Option<StopWords>;
}

impl<F> StopWordsProvider for F
where
    F: Fn(&str) -> Option<StopWords>,
{
    fn stop_words_for(&self, language: &str) -> Option<StopWords> {
        self(language)
    }
}

/// Provider backed by the lists embedded in this crate (`en`, `zh`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStopWords;

impl StopWordsProvider for BuiltinStopWords {
    fn stop_words_for(&self, language: &str) -> Option<StopWords> {
        match primary_subtag(language).as_str() {
            "en" => Some((*ENGLISH).clone()),
            "zh" => Some((*CHINESE).clone()),
            _ => None,
        }
    }
}

/// `en-US` and `EN_gb` both resolve to `en`.
fn primary_subtag(language: &str) -> String {
    language
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// One word per line; blank lines and `#` comments are skipped.
fn parse_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
