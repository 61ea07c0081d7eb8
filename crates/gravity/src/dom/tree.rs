// ABOUTME: Arena helpers over scraper's ego_tree: text collection, attachment checks, node surgery.
// ABOUTME: Every mutation in the pipeline goes through these so NodeIds stay stable.

use std::borrow::Cow;

use ego_tree::{NodeId, NodeRef, Tree};
use html5ever::tendril::StrTendril;
use html5ever::{LocalName, Namespace, QualName};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::{Element, Text};
use scraper::{Html, Node};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace to one space, keeping a leading or trailing one.
pub fn collapse_spaces(text: &str) -> Cow<'_, str> {
    WHITESPACE_RE.replace_all(text, " ")
}

/// Collapse runs of whitespace to one space and trim the ends.
pub fn normalize_spaces(text: &str) -> String {
    collapse_spaces(text).trim().to_string()
}

/// Raw concatenation of every text node under `node`, in document order.
pub fn node_text(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text())
        .map(|t| &**t)
        .collect()
}

/// `node_text`, whitespace-normalized.
pub fn normalized_text(node: NodeRef<'_, Node>) -> String {
    normalize_spaces(&node_text(node))
}

/// Local name of an element node, `None` for everything else.
pub fn tag_name<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.value().as_element().map(|el| el.name())
}

pub fn is_tag(node: NodeRef<'_, Node>, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

/// True if any strict descendant is an element named in `tags`.
pub fn has_descendant_tag(node: NodeRef<'_, Node>, tags: &[&str]) -> bool {
    node.descendants()
        .skip(1)
        .filter_map(tag_name)
        .any(|name| tags.contains(&name))
}

/// A node is attached while its ancestor chain still reaches the document root.
pub fn is_attached(tree: &Tree<Node>, id: NodeId) -> bool {
    let root = tree.root().id();
    match tree.get(id) {
        Some(node) => node.id() == root || node.ancestors().any(|a| a.id() == root),
        None => false,
    }
}

/// Ids of all attached elements matching `pred`, in document order.
pub fn collect_elements<F>(doc: &Html, mut pred: F) -> Vec<NodeId>
where
    F: FnMut(NodeRef<'_, Node>, &Element) -> bool,
{
    doc.tree
        .root()
        .descendants()
        .filter(|n| n.value().as_element().is_some_and(|el| pred(*n, el)))
        .map(|n| n.id())
        .collect()
}

/// Unlink a node (and its subtree) from its parent.
pub fn detach(doc: &mut Html, id: NodeId) {
    if let Some(mut node) = doc.tree.get_mut(id) {
        node.detach();
    }
}

/// Put a text node where `id` was and unlink `id`.
pub fn replace_with_text(doc: &mut Html, id: NodeId, text: &str) {
    if let Some(mut node) = doc.tree.get_mut(id) {
        node.insert_before(text_node(text));
        node.detach();
    }
}

/// Change an element's tag in place. Attributes and children are kept.
pub fn rename(doc: &mut Html, id: NodeId, tag: LocalName) {
    if let Some(mut node) = doc.tree.get_mut(id) {
        if let Node::Element(el) = node.value() {
            el.name = html_name(tag);
        }
    }
}

/// A detached `<p>` containing `text`, ready to be appended somewhere.
pub fn orphan_paragraph(doc: &mut Html, text: Option<&str>) -> NodeId {
    let mut p = doc.tree.orphan(element(LocalName::from("p")));
    if let Some(text) = text {
        p.append(text_node(text));
    }
    p.id()
}

pub fn element(tag: LocalName) -> Node {
    Node::Element(Element::new(html_name(tag), Vec::new()))
}

fn html_name(tag: LocalName) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), tag)
}

pub fn text_node(text: &str) -> Node {
    Node::Text(Text {
        text: StrTendril::from(text),
    })
}
