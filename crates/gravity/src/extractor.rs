// ABOUTME: The Extractor facade that runs cleaning, scoring, and formatting over one document.
// ABOUTME: Extraction owns the mutated document and the rendered text and HTML of the top node.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use tracing::{debug, debug_span};

use crate::dom::cleaners::clean_document;
use crate::dom::formatter::ContentFormatter;
use crate::dom::scoring::{ContentScorer, TopNode};
use crate::error::Result;
use crate::formats::{render_html, render_text};
use crate::options::{ContentType, ExtractorBuilder, Options};
use crate::result::{word_count, Article};
use crate::stopwords::StopWords;

/// Extracts the main article body from parsed pages.
///
/// Immutable once built; one instance can serve many documents across threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    opts: Options,
    stop_words: StopWords,
}

impl Extractor {
    /// Create a new ExtractorBuilder for fluent configuration.
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Build from options, resolving the language with the embedded lists.
    pub fn new(opts: Options) -> Result<Self> {
        ExtractorBuilder::from(opts).build()
    }

    pub(crate) fn from_parts(opts: Options, stop_words: StopWords) -> Self {
        Self { opts, stop_words }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Parse `html` as a full document and extract from it.
    pub fn extract_html(&self, html: &str) -> Extraction {
        self.extract(Html::parse_document(html))
    }

    /// Clean `doc`, pick its top node, and render it.
    ///
    /// Never fails: a page without a qualifying top node yields an empty extraction.
    pub fn extract(&self, mut doc: Html) -> Extraction {
        let span = debug_span!("extract", language = %self.stop_words.language());
        let _enter = span.enter();

        clean_document(&mut doc);

        let Some(top) = ContentScorer::new(&self.stop_words, &self.opts).top_node(&doc) else {
            return Extraction::empty(doc, self);
        };

        ContentFormatter::new(&self.stop_words, &self.opts).format(&mut doc, top.id);

        let (text, html) = match doc.tree.get(top.id).and_then(ElementRef::wrap) {
            Some(el) => (render_text(el), render_html(el)),
            None => (String::new(), String::new()),
        };
        debug!(chars = text.len(), score = top.score, "extracted article");

        Extraction {
            document: doc,
            top: Some(top),
            text,
            html,
            language: self.stop_words.language().to_string(),
            content_type: self.opts.content_type,
        }
    }
}

/// Output of one extraction run.
#[derive(Debug)]
pub struct Extraction {
    document: Html,
    top: Option<TopNode>,
    text: String,
    html: String,
    language: String,
    content_type: ContentType,
}

impl Extraction {
    fn empty(document: Html, extractor: &Extractor) -> Self {
        Self {
            document,
            top: None,
            text: String::new(),
            html: String::new(),
            language: extractor.stop_words.language().to_string(),
            content_type: extractor.opts.content_type,
        }
    }

    /// The cleaned and formatted document.
    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn top_node_id(&self) -> Option<NodeId> {
        self.top.map(|top| top.id)
    }

    /// The chosen content root, if one cleared the minimum score.
    pub fn top_node(&self) -> Option<ElementRef<'_>> {
        self.top_node_id()
            .and_then(|id| self.document.tree.get(id))
            .and_then(ElementRef::wrap)
    }

    pub fn score(&self) -> Option<f64> {
        self.top.map(|top| top.score)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_article(self) -> Article {
        let top_node_tag = self.top_node().map(|el| el.value().name().to_string());
        Article {
            word_count: word_count(&self.text),
            top_node_tag,
            score: self.score(),
            language: self.language,
            content_type: self.content_type,
            text: self.text,
            html: self.html,
        }
    }
}
