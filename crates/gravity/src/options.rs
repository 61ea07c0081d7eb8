// ABOUTME: Configuration for the extractor including ContentType, Options, and ExtractorBuilder.
// ABOUTME: ExtractorBuilder provides a fluent API for constructing Extractor instances with custom settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::extractor::Extractor;
use crate::stopwords::{BuiltinStopWords, StopWords, StopWordsProvider};

/// The content type format for rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Html,
    Markdown,
    Text,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentType::Html => "html",
            ContentType::Markdown => "markdown",
            ContentType::Text => "text",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => ContentType::Markdown,
            "text" | "txt" => ContentType::Text,
            _ => ContentType::Html,
        }
    }
}

/// Tunable thresholds for scoring and formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Stopword language code, resolved on its primary subtag.
    pub language: String,
    /// A top node scoring below this is discarded.
    pub min_top_node_score: f64,
    /// Paragraphs need strictly more stopwords than this to count.
    pub min_candidate_stop_words: usize,
    pub link_density_threshold: f64,
    /// Fraction of the top node's mean paragraph stopwords a sibling must beat.
    pub sibling_baseline_ratio: f64,
    pub content_type: ContentType,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            min_top_node_score: 20.0,
            min_candidate_stop_words: 2,
            link_density_threshold: 1.0,
            sibling_baseline_ratio: 0.3,
            content_type: ContentType::Html,
        }
    }
}

impl Options {
    /// Reject negative, NaN, or infinite thresholds.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("min_top_node_score", self.min_top_node_score),
            ("link_density_threshold", self.link_density_threshold),
            ("sibling_baseline_ratio", self.sibling_baseline_ratio),
        ];
        for (name, value) in checks {
            if !value.is_finite() {
                return Err(ExtractError::invalid_option(name, "must be finite"));
            }
            if value < 0.0 {
                return Err(ExtractError::invalid_option(
                    name,
                    format_args!("must not be negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Builder for constructing Extractor instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ExtractorBuilder {
    opts: Options,
    stop_words: Option<StopWords>,
}

impl From<Options> for ExtractorBuilder {
    fn from(opts: Options) -> Self {
        Self {
            opts,
            stop_words: None,
        }
    }
}

impl ExtractorBuilder {
    /// Create a new ExtractorBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stopword language code.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.opts.language = language.into();
        self
    }

    pub fn min_top_node_score(mut self, score: f64) -> Self {
        self.opts.min_top_node_score = score;
        self
    }

    pub fn min_candidate_stop_words(mut self, count: usize) -> Self {
        self.opts.min_candidate_stop_words = count;
        self
    }

    pub fn link_density_threshold(mut self, threshold: f64) -> Self {
        self.opts.link_density_threshold = threshold;
        self
    }

    pub fn sibling_baseline_ratio(mut self, ratio: f64) -> Self {
        self.opts.sibling_baseline_ratio = ratio;
        self
    }

    /// Set the content type for rendered output.
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.opts.content_type = content_type;
        self
    }

    /// Use this stopword set instead of resolving `language`.
    pub fn stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Build with the embedded stopword lists.
    pub fn build(self) -> Result<Extractor> {
        self.build_with(&BuiltinStopWords)
    }

    /// Build, resolving the language through `provider`.
    pub fn build_with<P>(self, provider: &P) -> Result<Extractor>
    where
        P: StopWordsProvider + ?Sized,
    {
        self.opts.validate()?;
        let stop_words = match self.stop_words {
            Some(stop_words) => stop_words,
            None => provider
                .stop_words_for(&self.opts.language)
                .ok_or_else(|| ExtractError::unsupported_language(&self.opts.language))?,
        };
        Ok(Extractor::from_parts(self.opts, stop_words))
    }
}
