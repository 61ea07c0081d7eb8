// ABOUTME: Error types for building an extractor: unsupported languages and invalid options.
// ABOUTME: The extraction pipeline itself never fails; it degrades to empty output instead.

use std::fmt;
use thiserror::Error;

/// Errors raised while configuring an [`Extractor`](crate::Extractor).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
    /// The stopword provider has no list for the requested language code.
    #[error("no stopword list for language {0:?}")]
    UnsupportedLanguage(String),

    /// A numeric option was negative, NaN, or infinite.
    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

impl ExtractError {
    /// Creates an UnsupportedLanguage error for the given code.
    pub fn unsupported_language(code: impl Into<String>) -> Self {
        ExtractError::UnsupportedLanguage(code.into())
    }

    /// Creates an InvalidOption error with a formatted reason.
    pub fn invalid_option(name: &'static str, reason: impl fmt::Display) -> Self {
        ExtractError::InvalidOption {
            name,
            reason: reason.to_string(),
        }
    }

    /// Returns true if this is an UnsupportedLanguage error.
    pub fn is_unsupported_language(&self) -> bool {
        matches!(self, ExtractError::UnsupportedLanguage(_))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ExtractError>;
