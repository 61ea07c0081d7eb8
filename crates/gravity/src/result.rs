// ABOUTME: Article struct holding the extracted body of a page as text and HTML.
// ABOUTME: Includes format conversion, JSON serialization, and convenience predicates.

use serde::{Deserialize, Serialize};

use crate::formats::html_to_markdown;
use crate::options::ContentType;

/// The extracted article body.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Article {
    pub text: String,
    pub html: String,
    /// Tag of the element chosen as the content root.
    pub top_node_tag: Option<String>,
    /// Gravity score of the content root.
    pub score: Option<f64>,
    pub word_count: usize,
    pub language: String,
    #[serde(default)]
    pub content_type: ContentType,
}

impl Article {
    /// Render the body in the requested format.
    pub fn format(&self, content_type: ContentType) -> String {
        match content_type {
            ContentType::Html => self.html.clone(),
            ContentType::Text => self.text.clone(),
            ContentType::Markdown => html_to_markdown(&self.html),
        }
    }

    /// The body in the configured content type.
    pub fn content(&self) -> String {
        self.format(self.content_type)
    }

    /// Returns true if no content root was found.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.html.is_empty()
    }

    pub fn has_top_node(&self) -> bool {
        self.top_node_tag.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Count words in a text string using whitespace splitting.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
