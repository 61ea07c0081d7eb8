// ABOUTME: End-to-end tests for cleaning, scoring, and formatting through the public API.
// ABOUTME: Covers container segmentation, top node selection, empty pages, and sibling reattachment.

use digests_gravity::{
    clean_document, is_high_link_density, ContentScorer, Extractor, Options, StopWords,
};
use pretty_assertions::assert_eq;
use scraper::{Html, Selector};

/// Prose with exactly `stops` English stopwords.
fn prose(stops: usize) -> String {
    let mut s = String::from("Granite");
    for _ in 0..stops / 2 {
        s.push_str(" of the stone");
    }
    if stops % 2 == 1 {
        s.push_str(" and");
    }
    s.push('.');
    s
}

fn page(body: &str) -> String {
    format!("<html><head><title>t</title></head><body>{}</body></html>", body)
}

fn cleaned_fragment(html: &str) -> String {
    let mut doc = Html::parse_fragment(html);
    clean_document(&mut doc);
    doc.root_element().inner_html()
}

#[test]
fn emphasis_is_flattened_to_text() {
    assert_eq!(
        cleaned_fragment("<p><em>a</em><strong>b</strong></p>"),
        "<p>a b </p>"
    );
}

#[test]
fn loose_text_in_container_becomes_paragraphs() {
    assert_eq!(
        cleaned_fragment("<div><img/>text<p>X</p>text</div>"),
        "<div><img><p>text</p><p>X</p><p>text</p></div>"
    );
}

#[test]
fn nested_containers_convert_inner_to_paragraphs() {
    assert_eq!(
        cleaned_fragment("<div><div>inner words</div><span>loose</span></div>"),
        "<div><p>inner words</p><p>loose</p></div>"
    );
}

#[test]
fn article_container_is_segmented() {
    assert_eq!(
        cleaned_fragment("<article>Lead text<p>Body</p></article>"),
        "<article><p>Lead text</p><p>Body</p></article>"
    );
}

#[test]
fn dominant_paragraph_selects_its_container() {
    let mut body = format!(r#"<div id="story"><p>{}</p></div><div id="filler">"#, prose(30));
    for _ in 0..19 {
        body.push_str(&format!("<p>{}</p>", prose(3)));
    }
    body.push_str("</div>");

    let html = Html::parse_document(&page(&body));
    let sw = StopWords::english();
    let opts = Options::default();
    let top = ContentScorer::new(sw, &opts).top_node(&html).unwrap();

    let story = html
        .select(&Selector::parse("#story").unwrap())
        .next()
        .unwrap();
    assert_eq!(top.id, story.id());
    assert_eq!(top.score, 30.0);
}

#[test]
fn bottom_candidates_are_penalized() {
    let mut body = String::from(r#"<div id="filler">"#);
    for _ in 0..19 {
        body.push_str(&format!("<p>{}</p>", prose(3)));
    }
    body.push_str(&format!(r#"</div><div id="late"><p>{}</p></div>"#, prose(30)));

    let html = Html::parse_document(&page(&body));
    let sw = StopWords::english();
    let opts = Options::default();
    let board = ContentScorer::new(sw, &opts).score(&html);

    let late = html
        .select(&Selector::parse("#late").unwrap())
        .next()
        .unwrap();
    // Last of 20 candidates: booster 4, boost -16.
    assert_eq!(board.get(late.id()).unwrap().score, 14.0);
}

#[test]
fn page_without_wordy_paragraphs_has_no_article() {
    let extractor = Extractor::builder().build().unwrap();
    let html = page("<div><p>Hello there.</p><p>Buy now!</p><td>x</td></div>");
    let extraction = extractor.extract_html(&html);
    assert!(extraction.top_node().is_none());
    assert_eq!(extraction.text(), "");
    assert_eq!(extraction.html(), "");
}

#[test]
fn wordy_preceding_sibling_is_pulled_into_top_node() {
    let lede = prose(8);
    let body = format!(
        r#"<p id="lede">{}</p><div id="story"><p>{}</p><p>{}</p></div>"#,
        lede,
        prose(25),
        prose(15)
    );
    let extractor = Extractor::builder().build().unwrap();
    let extraction = extractor.extract_html(&page(&body));

    let top = extraction.top_node().expect("top node");
    assert_eq!(top.value().attr("id"), Some("story"));

    let first = top
        .children()
        .find_map(scraper::ElementRef::wrap)
        .expect("first child");
    assert_eq!(first.value().name(), "p");
    assert_eq!(first.value().attr("id"), None);
    assert_eq!(first.text().collect::<String>(), lede);

    let paragraphs: Vec<&str> = extraction.text().split("\n\n").collect();
    assert_eq!(paragraphs, vec![lede.clone(), prose(25), prose(15)]);
    assert!(extraction
        .html()
        .starts_with(&format!(r#"<div id="story"><p>{}</p>"#, lede)));
}

#[test]
fn thin_preceding_sibling_is_left_out() {
    let body = format!(
        r#"<p>{}</p><div id="story"><p>{}</p><p>{}</p></div>"#,
        prose(3),
        prose(25),
        prose(15)
    );
    let extractor = Extractor::builder().build().unwrap();
    let extraction = extractor.extract_html(&page(&body));
    assert_eq!(extraction.text().split("\n\n").count(), 2);
}

#[test]
fn loose_text_in_top_node_is_rendered() {
    let body = format!(
        r#"<section id="s">Loose intro words here.<p>{}</p></section>"#,
        prose(30)
    );
    let extractor = Extractor::builder().build().unwrap();
    let extraction = extractor.extract_html(&page(&body));

    let top = extraction.top_node().expect("top node");
    assert_eq!(top.value().attr("id"), Some("s"));
    assert_eq!(
        extraction.text(),
        format!("Loose intro words here.\n\n{}", prose(30))
    );
}

#[test]
fn preformatted_text_keeps_its_lines() {
    let body = format!(
        r#"<div id="code"><pre>{}
{}</pre></div>"#,
        prose(24),
        prose(4)
    );
    let extractor = Extractor::builder().build().unwrap();
    let extraction = extractor.extract_html(&page(&body));

    assert_eq!(extraction.score(), Some(28.0));
    assert_eq!(extraction.text(), format!("{}\n{}", prose(24), prose(4)));
}

#[test]
fn returned_top_node_clears_minimum_score() {
    let extractor = Extractor::builder().build().unwrap();
    for stops in [10, 19, 20, 21, 40] {
        let body = format!("<div><p>{}</p></div>", prose(stops));
        let extraction = extractor.extract_html(&page(&body));
        match extraction.score() {
            Some(score) => assert!(score >= 20.0, "stops {stops}: score {score}"),
            None => assert!(stops < 20, "stops {stops} should select a top node"),
        }
    }
}

#[test]
fn link_density_needs_anchors() {
    let doc = Html::parse_fragment("<div><p>no links in here at all</p></div>");
    for el in doc.select(&Selector::parse("div, p").unwrap()) {
        assert!(!is_high_link_density(el, 1.0));
        assert!(!is_high_link_density(el, 0.0));
    }
}

#[test]
fn link_heavy_paragraph_is_not_a_candidate() {
    let links = (0..6)
        .map(|i| format!(r#"<a href="/{i}">one of the best of the lists</a> "#))
        .collect::<String>();
    let body = format!("<div><p>{}</p></div>", links);
    let extractor = Extractor::builder().build().unwrap();
    assert!(extractor.extract_html(&page(&body)).top_node().is_none());
}

#[test]
fn custom_stop_words_drive_scoring() {
    let sw = StopWords::new("xx", ["zz"]);
    let extractor = Extractor::builder()
        .language("xx")
        .stop_words(sw)
        .build()
        .unwrap();
    let words = vec!["zz"; 25].join(" ");
    let body = format!(r#"<div id="story"><p>{}</p></div>"#, words);
    let article = extractor.extract_html(&page(&body)).into_article();
    assert_eq!(article.top_node_tag.as_deref(), Some("div"));
    assert_eq!(article.language, "xx");
    assert_eq!(article.word_count, 25);
}

#[test]
fn extractor_is_shared_across_threads() {
    let extractor = std::sync::Arc::new(Extractor::builder().build().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let extractor = extractor.clone();
            std::thread::spawn(move || {
                let body = format!("<div><p>{}</p></div>", prose(24));
                extractor.extract_html(&page(&body)).into_article().word_count
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), prose(24).split_whitespace().count());
    }
}
