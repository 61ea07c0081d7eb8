// ABOUTME: Post-selection shaping of the top node: pulls in wordy preceding siblings, prunes weak paragraphs.
// ABOUTME: Rendering of the shaped node lives in formats.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::scoring::{is_high_link_density, PARAGRAPH_TAGS};
use super::tree::{detach, has_descendant_tag, is_tag, normalized_text, orphan_paragraph};
use crate::options::Options;
use crate::stopwords::StopWords;
use crate::text::stop_word_count;

/// Baseline used when the top node has no qualifying paragraphs; high enough that no sibling passes.
const DEFAULT_BASELINE: f64 = 100_000.0;
const MIN_PARAGRAPH_CHARS: usize = 8;
const MIN_PARAGRAPH_STOP_WORDS: usize = 3;
const EMBED_TAGS: &[&str] = &["object", "embed"];

#[derive(Debug, Clone, Copy)]
pub struct ContentFormatter<'a> {
    stop_words: &'a StopWords,
    opts: &'a Options,
}

impl<'a> ContentFormatter<'a> {
    pub fn new(stop_words: &'a StopWords, opts: &'a Options) -> Self {
        Self { stop_words, opts }
    }

    /// Reattach siblings, then prune. Returns (added, pruned).
    pub fn format(&self, doc: &mut Html, top: NodeId) -> (usize, usize) {
        let added = self.add_siblings(doc, top);
        let pruned = self.prune(doc, top);
        debug!(added, pruned, "formatted top node");
        (added, pruned)
    }

    /// Mean stopword count of the top node's qualifying p/strong descendants.
    pub fn baseline_score(&self, top: ElementRef<'_>) -> f64 {
        let counts: Vec<usize> = top
            .descendent_elements()
            .skip(1)
            .filter(|el| PARAGRAPH_TAGS.contains(&el.value().name()))
            .filter_map(|el| {
                let stops = stop_word_count(&normalized_text(*el), self.stop_words);
                let qualifies = stops > self.opts.min_candidate_stop_words
                    && !is_high_link_density(el, self.opts.link_density_threshold);
                qualifies.then_some(stops)
            })
            .collect();

        if counts.is_empty() {
            return DEFAULT_BASELINE;
        }
        counts.iter().sum::<usize>() as f64 / counts.len() as f64
    }

    /// Copy qualifying paragraph text from preceding siblings into the top node.
    ///
    /// Siblings are visited nearest-first and every copy goes in as the new
    /// first child, so the copies end up in document order.
    pub fn add_siblings(&self, doc: &mut Html, top: NodeId) -> usize {
        let texts: Vec<String> = {
            let Some(top_el) = doc.tree.get(top).and_then(ElementRef::wrap) else {
                return 0;
            };
            let threshold = self.baseline_score(top_el) * self.opts.sibling_baseline_ratio;
            top_el
                .prev_siblings()
                .filter_map(ElementRef::wrap)
                .flat_map(|sibling| self.sibling_paragraphs(sibling, threshold))
                .collect()
        };

        for text in &texts {
            let p = orphan_paragraph(doc, Some(text.as_str()));
            if let Some(mut node) = doc.tree.get_mut(top) {
                node.prepend_id(p);
            }
        }
        texts.len()
    }

    fn sibling_paragraphs(&self, sibling: ElementRef<'_>, threshold: f64) -> Vec<String> {
        let is_paragraph = PARAGRAPH_TAGS.contains(&sibling.value().name());
        let sources: Vec<ElementRef<'_>> = if is_paragraph && !normalized_text(*sibling).is_empty() {
            vec![sibling]
        } else {
            sibling
                .descendent_elements()
                .skip(1)
                .filter(|el| PARAGRAPH_TAGS.contains(&el.value().name()))
                .collect()
        };

        sources
            .into_iter()
            .filter_map(|el| {
                let text = normalized_text(*el);
                if text.is_empty() {
                    return None;
                }
                let stops = stop_word_count(&text, self.stop_words) as f64;
                let keep = stops > threshold
                    && !is_high_link_density(el, self.opts.link_density_threshold);
                keep.then_some(text)
            })
            .collect()
    }

    /// Remove short, stopword-poor paragraphs under the top node.
    pub fn prune(&self, doc: &mut Html, top: NodeId) -> usize {
        let weak: Vec<NodeId> = match doc.tree.get(top) {
            Some(node) => node
                .descendants()
                .skip(1)
                .filter(|n| is_tag(*n, "p"))
                .filter(|n| {
                    let text = normalized_text(*n);
                    text.chars().count() < MIN_PARAGRAPH_CHARS
                        && stop_word_count(&text, self.stop_words) < MIN_PARAGRAPH_STOP_WORDS
                        && !has_descendant_tag(*n, EMBED_TAGS)
                })
                .map(|n| n.id())
                .collect(),
            None => return 0,
        };
        for id in &weak {
            detach(doc, *id);
        }
        weak.len()
    }
}
