// ABOUTME: Gravity scoring for content extraction: link density, candidate gathering, top node selection.
// ABOUTME: Scores live in a NodeId side table and never touch the document.

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use super::tree::{collect_elements, normalized_text, tag_name};
use crate::options::Options;
use crate::stopwords::StopWords;
use crate::text::stop_word_count;

const CANDIDATE_TAGS: &[&str] = &["p", "td", "pre"];
pub(crate) const PARAGRAPH_TAGS: &[&str] = &["p", "strong"];
const BOOST_MAX_STEPS: usize = 3;
const BOOST_MIN_STOP_WORDS: usize = 5;
const BOOST_BASE: f64 = 50.0;
const BOTTOM_PENALTY_MIN_NODES: usize = 15;
const BOTTOM_PENALTY_FRACTION: f64 = 0.25;
const BOTTOM_PENALTY_CAP: f64 = 40.0;
const BOTTOM_PENALTY_FALLBACK: f64 = 5.0;

/// Accumulated score for one element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gravity {
    pub score: f64,
    pub nodes: u32,
}

/// Score storage using NodeId as key
pub type GravityScores = HashMap<NodeId, Gravity>;

/// The chosen content root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopNode {
    pub id: NodeId,
    pub score: f64,
}

/// Returns true when the words inside links dominate `element`'s text.
///
/// `(link_words / words) * link_count >= threshold`. Elements without
/// anchor descendants are never high density.
pub fn is_high_link_density(element: ElementRef<'_>, threshold: f64) -> bool {
    let links: Vec<ElementRef<'_>> = element
        .descendent_elements()
        .skip(1)
        .filter(|el| el.value().name() == "a")
        .collect();
    if links.is_empty() {
        return false;
    }

    let words = normalized_text(*element).split_whitespace().count();
    if words == 0 {
        return false;
    }

    let link_text: String = links.iter().map(|a| normalized_text(**a)).collect();
    let link_words = link_text.split_whitespace().count();

    let score = (link_words as f64 / words as f64) * links.len() as f64;
    score >= threshold
}

/// Result of one scoring run: the side table plus candidates in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: GravityScores,
    order: Vec<NodeId>,
}

impl ScoreBoard {
    pub fn get(&self, id: NodeId) -> Option<Gravity> {
        self.scores.get(&id).copied()
    }

    /// Scored elements in the order they first received a score.
    pub fn candidates(&self) -> &[NodeId] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn add(&mut self, id: NodeId, score: f64) {
        let entry = self.scores.entry(id).or_default();
        if entry.nodes == 0 {
            self.order.push(id);
        }
        entry.score += score;
        entry.nodes += 1;
    }

    /// Highest score, ties going to the earliest candidate, if it reaches `min_score`.
    pub fn top_node(&self, min_score: f64) -> Option<TopNode> {
        let mut best: Option<TopNode> = None;
        for &id in &self.order {
            let score = self.scores[&id].score;
            match best {
                Some(top) if score <= top.score => {}
                _ => best = Some(TopNode { id, score }),
            }
        }
        best.filter(|top| top.score >= min_score)
    }
}

/// Finds the element holding the article body.
#[derive(Debug, Clone, Copy)]
pub struct ContentScorer<'a> {
    stop_words: &'a StopWords,
    opts: &'a Options,
}

impl<'a> ContentScorer<'a> {
    pub fn new(stop_words: &'a StopWords, opts: &'a Options) -> Self {
        Self { stop_words, opts }
    }

    /// p/td/pre elements with enough stopwords and few links, with their stopword counts.
    pub fn gather(&self, doc: &Html) -> Vec<(NodeId, usize)> {
        collect_elements(doc, |_, el| CANDIDATE_TAGS.contains(&el.name()))
            .into_iter()
            .filter_map(|id| {
                let el = doc.tree.get(id).and_then(ElementRef::wrap)?;
                let stops = stop_word_count(&normalized_text(*el), self.stop_words);
                let qualifies = stops > self.opts.min_candidate_stop_words
                    && !is_high_link_density(el, self.opts.link_density_threshold);
                qualifies.then_some((id, stops))
            })
            .collect()
    }

    /// A paragraph earns a boost when a nearby preceding p/strong sibling is wordy.
    ///
    /// Only p/strong siblings count as steps; after three of them the search stops.
    pub fn is_ok_to_boost(&self, element: ElementRef<'_>) -> bool {
        let mut steps = 0;
        for sibling in element.prev_siblings() {
            if !tag_name(sibling).is_some_and(|name| PARAGRAPH_TAGS.contains(&name)) {
                continue;
            }
            if steps >= BOOST_MAX_STEPS {
                return false;
            }
            if stop_word_count(&normalized_text(sibling), self.stop_words) > BOOST_MIN_STOP_WORDS {
                return true;
            }
            steps += 1;
        }
        false
    }

    /// Score every gathered candidate and push the scores onto parents and grandparents.
    pub fn score(&self, doc: &Html) -> ScoreBoard {
        let candidates = self.gather(doc);
        let count = candidates.len();
        let bottom = count as f64 * BOTTOM_PENALTY_FRACTION;

        let mut board = ScoreBoard::default();
        let mut boosted = 0usize;

        for (i, (id, stops)) in candidates.into_iter().enumerate() {
            let Some(element) = doc.tree.get(id).and_then(ElementRef::wrap) else {
                continue;
            };

            let mut boost = 0.0;
            if self.is_ok_to_boost(element) {
                boost = BOOST_BASE / (boosted + 1) as f64;
                boosted += 1;
            }

            let remaining = (count - i) as f64;
            if count > BOTTOM_PENALTY_MIN_NODES && remaining <= bottom {
                let booster = bottom - remaining;
                boost = -booster.powi(2);
                if boost.abs() > BOTTOM_PENALTY_CAP {
                    boost = BOTTOM_PENALTY_FALLBACK;
                }
            }

            let score = stops as f64 + boost;
            trace!(?id, stops, boost, "scored paragraph");

            let Some(parent) = element.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            board.add(parent.id(), score);
            if let Some(grandparent) = parent.parent().and_then(ElementRef::wrap) {
                board.add(grandparent.id(), score / 2.0);
            }
        }

        debug!(paragraphs = count, boosted, scored = board.order.len(), "scored candidates");
        board
    }

    /// The best-scoring element, if any clears the minimum score.
    pub fn top_node(&self, doc: &Html) -> Option<TopNode> {
        let top = self.score(doc).top_node(self.opts.min_top_node_score);
        match &top {
            Some(top) => debug!(id = ?top.id, score = top.score, "selected top node"),
            None => debug!("no top node"),
        }
        top
    }
}
