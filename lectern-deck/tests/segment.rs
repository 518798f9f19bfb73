#![allow(clippy::expect_used, reason = "Fine in tests")]
use kuchikikiki::NodeRef;
use lectern_deck::{LeadingContent, SegmentOptions, Segmenter};
use proptest::prelude::*;
use tendril::TendrilSink;

fn parse(html: &str) -> NodeRef {
  kuchikikiki::parse_html().one(html)
}

fn texts(slides: &[NodeRef]) -> Vec<String> {
  slides.iter().map(NodeRef::text_contents).collect()
}

fn count(document: &NodeRef, selector: &str) -> usize {
  document.select(selector).expect("valid selector").count()
}

#[test]
fn each_marker_becomes_one_slide() {
  let document = parse(
    "<h1>Title</h1><hr><h2>A</h2><p>a</p><hr><h2>B</h2><p>b</p><hr><p>c</p>",
  );
  let slides = Segmenter::default()
    .segment(&document)
    .expect("segmentation succeeds");

  assert_eq!(texts(&slides), ["Aa", "Bb", "c"]);
  assert_eq!(count(&document, "hr"), 0);
  assert_eq!(count(&document, "body > section.slide"), 3);
}

#[test]
fn leading_content_stays_outside_by_default() {
  let document = parse("<h1>Title</h1><hr><p>a</p>");
  Segmenter::default()
    .segment(&document)
    .expect("segmentation succeeds");

  assert_eq!(count(&document, "body > h1"), 1);
  assert_eq!(count(&document, "section h1"), 0);
}

#[test]
fn leading_content_can_form_a_slide() {
  let document = parse("<h1>Title</h1><hr><p>a</p><hr><p>b</p>");
  let slides = Segmenter::new(SegmentOptions {
    leading: LeadingContent::Slide,
    ..Default::default()
  })
  .segment(&document)
  .expect("segmentation succeeds");

  assert_eq!(texts(&slides), ["Title", "a", "b"]);
}

#[test]
fn document_without_markers_has_no_slides() {
  let document = parse("<h1>Title</h1><p>body</p>");
  let slides = Segmenter::default()
    .segment(&document)
    .expect("segmentation succeeds");
  assert!(slides.is_empty());
  assert_eq!(count(&document, "body > p"), 1);
}

#[test]
fn second_run_is_a_noop() {
  let document = parse("<hr><p>a</p><hr><p>b</p>");
  let segmenter = Segmenter::default();
  let first = segmenter.segment(&document).expect("first run");
  let before = document.to_string();

  let second = segmenter.segment(&document).expect("second run");
  assert_eq!(first.len(), second.len());
  assert_eq!(document.to_string(), before);
}

#[test]
fn preexisting_containers_are_not_swallowed() {
  let document =
    parse(r#"<section class="slide"><p>kept</p></section><hr><p>new</p>"#);
  let slides = Segmenter::default()
    .segment(&document)
    .expect("segmentation succeeds");

  assert_eq!(texts(&slides), ["kept", "new"]);
  assert_eq!(count(&document, "section.slide section.slide"), 0);
}

#[test]
fn nested_markers_keep_document_order() {
  let document = parse("<div><hr><p>inner</p></div><hr><p>outer</p>");
  let slides = Segmenter::default()
    .segment(&document)
    .expect("segmentation succeeds");

  assert_eq!(texts(&slides), ["inner", "outer"]);
  assert_eq!(count(&document, "div > section.slide"), 1);
}

#[test]
fn markers_at_different_depths_never_nest_slides() {
  let document = parse("<hr><p>a</p><div><hr><p>b</p></div>");
  let slides = Segmenter::default()
    .segment(&document)
    .expect("segmentation succeeds");

  assert_eq!(texts(&slides), ["a", "b"]);
  assert_eq!(count(&document, "section.slide section.slide"), 0);
  assert_eq!(count(&document, "div > section.slide"), 1);
}

#[test]
fn wrapper_holds_moved_content() {
  let document = parse("<hr><h2>A</h2><p>a</p>");
  let slides = Segmenter::new(SegmentOptions {
    wrapper_class: Some("slide-content".to_owned()),
    ..Default::default()
  })
  .segment(&document)
  .expect("segmentation succeeds");

  assert_eq!(slides.len(), 1);
  assert_eq!(count(&document, "section.slide > div.slide-content > h2"), 1);
  assert_eq!(count(&document, "section.slide > p"), 0);
}

#[test]
fn custom_markers_and_containers() {
  let document =
    parse(r#"<p>intro</p><div class="cut"></div><p>a</p><hr><p>still a</p>"#);
  let slides = Segmenter::new(SegmentOptions {
    marker: "div.cut".to_owned(),
    container_tag: "article".to_owned(),
    container_class: "page".to_owned(),
    ..Default::default()
  })
  .segment(&document)
  .expect("segmentation succeeds");

  assert_eq!(texts(&slides), ["astill a"]);
  assert_eq!(count(&document, "article.page > hr"), 1);
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn partition_is_order_preserving(
    sections in prop::collection::vec(
      prop::collection::vec("[a-z]{1,6}", 0..4),
      0..8,
    ),
  ) {
    let mut html = String::from("<p>preamble</p>");
    for words in &sections {
      html.push_str("<hr>");
      for word in words {
        html.push_str(&format!("<p>{word}</p>"));
      }
    }

    let document = parse(&html);
    let slides = Segmenter::default()
      .segment(&document)
      .expect("segmentation succeeds");

    prop_assert_eq!(slides.len(), sections.len());
    let expected: Vec<String> = sections.iter().map(|words| words.concat()).collect();
    prop_assert_eq!(texts(&slides), expected);
    prop_assert_eq!(count(&document, "hr"), 0);
  }
}
