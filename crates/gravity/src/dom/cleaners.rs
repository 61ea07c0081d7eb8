// ABOUTME: Document cleaning passes that normalize a parsed page before scoring.
// ABOUTME: Strips comments, scripts, boilerplate and inline markup, then turns containers into paragraphs.

use std::collections::HashSet;

use ego_tree::NodeId;
use html5ever::LocalName;
use scraper::{Html, Node};
use tracing::{debug, trace};

use super::matcher::{self, AttrRule};
use super::tree::{
    collapse_spaces, collect_elements, detach, has_descendant_tag, is_attached, is_tag, node_text,
    orphan_paragraph, rename, replace_with_text, text_node,
};

const EMPHASIS_TAGS: &[&str] = &["em", "strong", "b", "i", "strike", "del", "ins"];
const SCRIPT_TAGS: &[&str] = &["script", "style"];
const NOISE_TAGS: &[&str] = &["header", "footer", "input", "form", "button", "aside"];
const PROTECTED_TAGS: &[&str] = &["html", "body"];
const CONTAINER_TAGS: &[&str] = &["div", "span", "article"];
const BLOCK_TAGS: &[&str] = &[
    "a",
    "blockquote",
    "dl",
    "div",
    "img",
    "ol",
    "p",
    "pre",
    "table",
    "ul",
];

/// Run every cleaning pass over `doc`, in order.
pub fn clean_document(doc: &mut Html) {
    let comments = remove_comments(doc);
    let emphasis = flatten_emphasis(doc);
    let drop_caps = flatten_drop_caps(doc);
    let scripts = remove_tags(doc, SCRIPT_TAGS);
    let noise = remove_tags(doc, NOISE_TAGS);
    let boilerplate = remove_matching(doc, matcher::BOILERPLATE);
    let special = remove_matching(doc, matcher::SPECIAL);
    let para_spans = flatten_paragraph_spans(doc);
    let containers = CONTAINER_TAGS
        .iter()
        .map(|tag| convert_containers(doc, tag))
        .sum::<usize>();

    debug!(
        comments,
        emphasis,
        drop_caps,
        scripts,
        noise,
        boilerplate,
        special,
        para_spans,
        containers,
        "cleaned document"
    );
}

fn remove_comments(doc: &mut Html) -> usize {
    let ids: Vec<NodeId> = doc
        .tree
        .root()
        .descendants()
        .filter(|n| n.value().is_comment())
        .map(|n| n.id())
        .collect();
    for id in &ids {
        detach(doc, *id);
    }
    ids.len()
}

/// Replace inline emphasis with its text plus a trailing space, unless it wraps an image.
fn flatten_emphasis(doc: &mut Html) -> usize {
    let ids = collect_elements(doc, |_, el| EMPHASIS_TAGS.contains(&el.name()));
    let mut flattened = 0;
    for id in ids {
        let text = match doc.tree.get(id) {
            Some(node) if is_attached(&doc.tree, id) && !has_descendant_tag(node, &["img"]) => {
                format!("{} ", node_text(node))
            }
            _ => continue,
        };
        replace_with_text(doc, id, &text);
        flattened += 1;
    }
    flattened
}

fn flatten_drop_caps(doc: &mut Html) -> usize {
    let ids = collect_elements(doc, |_, el| {
        el.name() == "span"
            && el.attr("class").is_some_and(|class| {
                let class = class.to_lowercase();
                class.contains("dropcap") || class.contains("drop_cap")
            })
    });
    replace_all_with_text(doc, ids)
}

/// Unwrap spans sitting directly inside a paragraph.
fn flatten_paragraph_spans(doc: &mut Html) -> usize {
    let ids = collect_elements(doc, |node, el| {
        el.name() == "span" && node.parent().is_some_and(|parent| is_tag(parent, "p"))
    });
    replace_all_with_text(doc, ids)
}

fn replace_all_with_text(doc: &mut Html, ids: Vec<NodeId>) -> usize {
    let mut replaced = 0;
    for id in ids {
        let text = match doc.tree.get(id) {
            Some(node) if is_attached(&doc.tree, id) => node_text(node),
            _ => continue,
        };
        replace_with_text(doc, id, &text);
        replaced += 1;
    }
    replaced
}

fn remove_tags(doc: &mut Html, tags: &[&str]) -> usize {
    let ids = collect_elements(doc, |_, el| tags.contains(&el.name()));
    detach_attached(doc, ids)
}

/// Remove every element whose id/class/name satisfies one of `rules`.
fn remove_matching(doc: &mut Html, rules: &[AttrRule]) -> usize {
    let ids = collect_elements(doc, |_, el| {
        !PROTECTED_TAGS.contains(&el.name()) && matcher::matches_any(el, rules)
    });
    detach_attached(doc, ids)
}

fn detach_attached(doc: &mut Html, ids: Vec<NodeId>) -> usize {
    let mut removed = 0;
    for id in ids {
        if !is_attached(&doc.tree, id) {
            continue;
        }
        trace!(?id, "removing node");
        detach(doc, id);
        removed += 1;
    }
    removed
}

/// One pass over the `tag` containers present when the pass starts.
fn convert_containers(doc: &mut Html, tag: &str) -> usize {
    let ids = collect_elements(doc, |_, el| el.name() == tag);
    let mut converted = 0;
    for id in ids {
        let has_blocks = match doc.tree.get(id) {
            Some(node) if is_attached(&doc.tree, id) => has_descendant_tag(node, BLOCK_TAGS),
            _ => continue,
        };
        if has_blocks {
            let entries = segment_children(doc, id);
            replace_children(doc, id, entries);
        } else {
            rename(doc, id, LocalName::from("p"));
        }
        converted += 1;
    }
    converted
}

/// A child slot in a rebuilt container.
#[derive(Debug)]
enum Entry {
    Existing(NodeId),
    Paragraph(Vec<Piece>),
}

#[derive(Debug)]
enum Piece {
    Text(String),
    Anchor(NodeId),
}

/// Text and anchors waiting to be wrapped into a paragraph.
#[derive(Debug, Default)]
struct Run {
    pieces: Vec<Piece>,
}

impl Run {
    fn push_text(&mut self, text: &str) {
        match self.pieces.last_mut() {
            Some(Piece::Text(last)) => last.push_str(text),
            _ => self.pieces.push(Piece::Text(text.to_string())),
        }
    }

    fn push_anchor(&mut self, id: NodeId) {
        self.push_text(" ");
        self.pieces.push(Piece::Anchor(id));
        self.push_text(" ");
    }

    fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    fn take(&mut self) -> Entry {
        Entry::Paragraph(std::mem::take(&mut self.pieces))
    }
}

/// Build the replacement child list for a container that holds block content.
///
/// Loose text becomes synthetic paragraphs that also absorb neighbouring
/// anchors. Anchors pulled into a paragraph are recorded in `consumed` and
/// dropped from their original slot.
fn segment_children(doc: &Html, container: NodeId) -> Vec<Entry> {
    let mut entries = Vec::new();
    let Some(node) = doc.tree.get(container) else {
        return entries;
    };

    let mut consumed: HashSet<NodeId> = HashSet::new();
    let mut run = Run::default();

    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                let collapsed = collapse_spaces(text);
                if collapsed.trim().is_empty() {
                    continue;
                }

                let mut before = Vec::new();
                let mut prev = child.prev_sibling();
                while let Some(sib) = prev.filter(|s| is_tag(*s, "a") && !consumed.contains(&s.id())) {
                    consumed.insert(sib.id());
                    before.push(sib.id());
                    prev = sib.prev_sibling();
                }
                for id in before.into_iter().rev() {
                    run.push_anchor(id);
                }

                run.push_text(&collapsed);

                let mut next = child.next_sibling();
                while let Some(sib) = next.filter(|s| is_tag(*s, "a") && !consumed.contains(&s.id())) {
                    consumed.insert(sib.id());
                    run.push_anchor(sib.id());
                    next = sib.next_sibling();
                }
            }
            Node::Element(el) if el.name() == "p" && !run.is_empty() => {
                entries.push(run.take());
                entries.push(Entry::Existing(child.id()));
            }
            _ => entries.push(Entry::Existing(child.id())),
        }
    }
    if !run.is_empty() {
        entries.push(run.take());
    }

    entries.retain(|entry| !matches!(entry, Entry::Existing(id) if consumed.contains(id)));
    entries
}

fn replace_children(doc: &mut Html, container: NodeId, entries: Vec<Entry>) {
    let children: Vec<NodeId> = match doc.tree.get(container) {
        Some(node) => node.children().map(|c| c.id()).collect(),
        None => return,
    };
    for id in children {
        detach(doc, id);
    }

    for entry in entries {
        let id = match entry {
            Entry::Existing(id) => id,
            Entry::Paragraph(pieces) => build_paragraph(doc, pieces),
        };
        if let Some(mut parent) = doc.tree.get_mut(container) {
            parent.append_id(id);
        }
    }
}

fn build_paragraph(doc: &mut Html, pieces: Vec<Piece>) -> NodeId {
    let p = orphan_paragraph(doc, None);
    for piece in pieces {
        let child = match piece {
            Piece::Text(text) => doc.tree.orphan(text_node(&text)).id(),
            Piece::Anchor(id) => id,
        };
        if let Some(mut p) = doc.tree.get_mut(p) {
            p.append_id(child);
        }
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::{ElementRef, Selector};

    fn cleaned(html: &str) -> Html {
        let mut doc = Html::parse_fragment(html);
        clean_document(&mut doc);
        doc
    }

    fn inner(doc: &Html, css: &str) -> String {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel).next().map(|el| el.inner_html()).unwrap_or_default()
    }

    fn body_html(doc: &Html) -> String {
        doc.root_element().inner_html()
    }

    #[test]
    fn test_emphasis_becomes_text() {
        let doc = cleaned("<p><em>a</em><strong>b</strong></p>");
        assert_eq!(body_html(&doc), "<p>a b </p>");
        let p = doc.select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(p.children().filter_map(ElementRef::wrap).count(), 0);
    }

    #[test]
    fn test_emphasis_with_image_is_kept() {
        let doc = cleaned(r#"<p><b><img src="x.png"></b> caption text</p>"#);
        assert!(inner(&doc, "p").starts_with("<b><img"));
    }

    #[test]
    fn test_emphasis_keeps_inner_edge_spaces() {
        let doc = cleaned("<p>read the<em> full </em>story</p>");
        assert_eq!(inner(&doc, "p"), "read the full  story");
    }

    #[test]
    fn test_nested_emphasis_flattens_once() {
        let doc = cleaned("<p><b>bold <i>and italic</i></b></p>");
        assert_eq!(inner(&doc, "p"), "bold and italic ");
    }

    #[test]
    fn test_container_with_loose_text_is_segmented() {
        let doc = cleaned("<div><img/>text<p>X</p>text</div>");
        assert_eq!(body_html(&doc), "<div><img><p>text</p><p>X</p><p>text</p></div>");
    }

    #[test]
    fn test_container_without_blocks_becomes_paragraph() {
        let doc = cleaned(r#"<div class="lede">Plain words only</div>"#);
        assert_eq!(body_html(&doc), r#"<p class="lede">Plain words only</p>"#);
    }

    #[test]
    fn test_segmentation_absorbs_adjacent_anchors() {
        let doc = cleaned(r#"<div>Read <a href="/a">this</a><a href="/b">that</a><p>Body</p></div>"#);
        assert_eq!(
            body_html(&doc),
            r#"<div><p>Read  <a href="/a">this</a>  <a href="/b">that</a> </p><p>Body</p></div>"#
        );
    }

    #[test]
    fn test_anchor_before_text_moves_into_run() {
        let doc = cleaned(r#"<div><a href="/x">link</a> tail text<p>Body</p></div>"#);
        assert_eq!(
            body_html(&doc),
            r#"<div><p> <a href="/x">link</a>  tail text</p><p>Body</p></div>"#
        );
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let doc = cleaned("<div>\n  <p>One</p>\n  <p>Two</p>\n</div>");
        assert_eq!(body_html(&doc), "<div><p>One</p><p>Two</p></div>");
    }

    #[test]
    fn test_comments_scripts_and_noise_removed() {
        let doc = cleaned(
            "<div><!-- hidden --><script>var x;</script><style>p{}</style>\
             <header>Top</header><form><input></form><aside>Side</aside>\
             <p>Kept</p><footer>Bottom</footer></div>",
        );
        assert_eq!(body_html(&doc), "<div><p>Kept</p></div>");
    }

    #[test]
    fn test_boilerplate_removed_by_attribute() {
        let doc = cleaned(
            r#"<div class="story"><p>Kept</p><div id="comments"><p>Gone</p></div><ul class="share-bar"><li>x</li></ul></div>"#,
        );
        assert_eq!(inner(&doc, "div.story"), "<p>Kept</p>");
    }

    #[test]
    fn test_special_filters_remove_social_and_captions() {
        let doc = cleaned(
            r#"<div class="story"><p>Kept</p><p class="caption">Photo</p><span id="facebook">f</span><span class="icon-facebook">ok</span></div>"#,
        );
        assert_eq!(inner(&doc, "div.story"), r#"<p>Kept</p><p class="icon-facebook">ok</p>"#);
    }

    #[test]
    fn test_body_is_never_removed() {
        let mut doc = Html::parse_document(r#"<html><body class="comments"><p>Text</p></body></html>"#);
        clean_document(&mut doc);
        assert_eq!(inner(&doc, "body"), "<p>Text</p>");
    }

    #[test]
    fn test_spans_in_paragraph_unwrapped() {
        let doc = cleaned("<p>Hello <span>big</span> world</p>");
        assert_eq!(inner(&doc, "p"), "Hello big world");
    }

    #[test]
    fn test_span_unwrap_keeps_leading_space() {
        let doc = cleaned("<p>Hello<span> big</span> world</p>");
        assert_eq!(inner(&doc, "p"), "Hello big world");
    }

    #[test]
    fn test_drop_cap_unwrapped() {
        let doc = cleaned(r#"<div><span class="DropCap">O</span>nce upon a time<p>x</p></div>"#);
        assert_eq!(body_html(&doc), "<div><p>Once upon a time</p><p>x</p></div>");
    }
}
