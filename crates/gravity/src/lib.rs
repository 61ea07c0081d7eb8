// ABOUTME: Main library entry point for the gravity article extractor.
// ABOUTME: Re-exports the public API: Extractor, ExtractorBuilder, Article, ExtractError, ContentType, Options.

//! Gravity - finds the main article body in a parsed HTML page.
//!
//! The page is cleaned of boilerplate, paragraphs are scored by how many
//! stopwords they contain, the scores are pushed up to parents and
//! grandparents, and the best-scoring element is trimmed and rendered as
//! text, HTML, or Markdown.
//!
//! # Example
//!
//! ```
//! use digests_gravity::{ContentType, Extractor};
//!
//! let extractor = Extractor::builder().build().unwrap();
//! let extraction = extractor.extract_html("<html><body><p>Too short.</p></body></html>");
//! assert!(extraction.top_node().is_none());
//! let article = extraction.into_article();
//! assert_eq!(article.format(ContentType::Text), "");
//! ```

pub mod dom;
pub mod error;
pub mod extractor;
pub mod formats;
pub mod options;
pub mod result;
pub mod stopwords;
pub mod text;

pub use crate::dom::cleaners::clean_document;
pub use crate::dom::formatter::ContentFormatter;
pub use crate::dom::scoring::{is_high_link_density, ContentScorer, Gravity, ScoreBoard, TopNode};
pub use crate::error::{ExtractError, Result};
pub use crate::extractor::{Extraction, Extractor};
pub use crate::options::{ContentType, ExtractorBuilder, Options};
pub use crate::result::Article;
pub use crate::stopwords::{BuiltinStopWords, Segmentation, StopWords, StopWordsProvider};
pub use crate::text::WordStats;
