// ABOUTME: DOM passes over scraper's arena tree: cleaning, scoring, and top-node formatting.
// ABOUTME: Holds the shared tree helpers and the attribute matcher used by the cleaner.

//! DOM stages of the extraction pipeline.
//!
//! Every stage works on a `scraper::Html` in place and addresses nodes by
//! `ego_tree::NodeId`. [`cleaners`] normalizes the page, [`scoring`] picks the
//! element holding the article, and [`formatter`] shapes that element before
//! it is rendered.

pub mod cleaners;
pub mod formatter;
pub mod matcher;
pub mod scoring;
pub mod tree;
