//! End-to-end capture behaviour on small documents and a dictionary-entry
//! fixture.

use pretty_assertions::assert_eq;
use sift_extract::{
    Capture, CaptureConfig, Document, ExtractError, LINE_BREAK, RETAIN_TAGS_DEFAULT, Selector,
    UNIT_DELIMITER,
};

const ENTRY: &str = include_str!("fixtures/entry.html");

fn excise(html: &str, capture: &Capture) -> String {
    let mut doc = Document::parse(html);
    capture.excise(&mut doc).expect("capture should succeed")
}

#[test]
fn retained_class_becomes_span_and_other_classes_collapse_to_text() {
    let capture = Capture::new("word", Selector::tag("div")).with_config(
        CaptureConfig::default()
            .with_retain_classes(["word"])
            .with_block_elements(Vec::<String>::new())
            .with_space_elements(Vec::<String>::new()),
    );
    let html = r#"<div><span class="word">ⲁⲃ</span>  <span class="other">x</span></div>"#;
    assert_eq!(excise(html, &capture), r#"<span class="word">ⲁⲃ</span> x"#);
}

#[test]
fn table_rows_become_lines_and_cells_become_spaces() {
    let config = CaptureConfig::default()
        .with_block_elements(["table", "tr"])
        .with_space_elements(["td"]);

    let rows = Capture::new("t", Selector::tag("table")).with_config(config.clone());
    let html = "<table><tr><td>A</td></tr><tr><td>B</td></tr></table>";
    assert_eq!(excise(html, &rows), format!("A{LINE_BREAK}B"));

    let cells = Capture::new("t", Selector::tag("table")).with_config(config);
    let html = "<table><tr><td>A</td><td>B</td></tr></table>";
    assert_eq!(excise(html, &cells), "A B");
}

#[test]
fn unit_tags_separate_units() {
    let capture = Capture::new("u", Selector::id("c"))
        .with_config(CaptureConfig::default().with_unit_tags(["p"]));
    let html = r#"<div id="c"><p>one</p><p>two</p></div>"#;
    assert_eq!(excise(html, &capture), format!("one{UNIT_DELIMITER}two"));
}

#[test]
fn empty_unretained_tag_simplifies_to_empty_string() {
    let capture = Capture::new("s", Selector::tag("span"));
    assert_eq!(excise("<body><span></span></body>", &capture), "");
}

#[test]
fn whitespace_and_empty_wrappers_simplify_to_empty_string() {
    let capture = Capture::new("s", Selector::id("c"))
        .with_config(CaptureConfig::default().with_unit_tags(["p"]));
    let html = r#"<div id="c"> <p> </p> <b> <i></i> </b> <br> <p></p> </div>"#;
    assert_eq!(excise(html, &capture), "");
}

#[test]
fn later_capture_cannot_see_an_excised_subtree() {
    let mut doc = Document::parse(ENTRY);
    let first = Capture::new("pretty", Selector::id("pretty"));
    let same_again = Capture::new("again", Selector::id("pretty").optional());
    let nested = Capture::new("pos", Selector::tag("i").optional());

    assert!(!first.excise(&mut doc).unwrap().is_empty());
    assert_eq!(same_again.excise(&mut doc).unwrap(), "");
    assert_eq!(nested.excise(&mut doc).unwrap(), "");
}

#[test]
fn required_capture_without_match_fails() {
    let mut doc = Document::parse("<body><p>x</p></body>");
    let err = Capture::new("f", Selector::id("missing"))
        .excise(&mut doc)
        .expect_err("required selector must fail");
    assert!(matches!(err, ExtractError::SelectorNotFound { .. }));
}

#[test]
fn ambiguous_capture_fails() {
    let mut doc = Document::parse("<body><p>x</p><p>y</p></body>");
    let err = Capture::new("f", Selector::tag("p").optional())
        .excise(&mut doc)
        .expect_err("two paragraphs must be ambiguous");
    assert!(matches!(err, ExtractError::SelectorAmbiguous { count: 2, .. }));
}

#[test]
fn dictionary_entry_fixture() {
    let mut doc = Document::parse(ENTRY);
    doc.strip_comments();
    for selector in [
        Selector::tag("title").optional(),
        Selector::tag("script").optional(),
        Selector::class("header").optional(),
        Selector::tag("footer").optional(),
    ] {
        for id in selector.find_all(&doc).unwrap() {
            doc.remove(id);
        }
    }

    let marcion = Capture::new("marcion", Selector::id("pretty"))
        .with_config(CaptureConfig::default().with_retain_classes(["dialect", "spelling"]));
    let meaning = Capture::new("meaning", Selector::id("meaning"));
    let wiki = Capture::new("wiki", Selector::id("wiki")).with_config(
        CaptureConfig::default()
            .with_retain_tags(RETAIN_TAGS_DEFAULT.iter().copied().chain(["a"]))
            .with_retain_attributes(["href"])
            .with_unit_tags(["p"]),
    );
    let appendix = Capture::new("appendix", Selector::tag("body"));

    assert_eq!(
        marcion.excise(&mut doc).unwrap(),
        concat!(
            r#"<span class="dialect">S</span> <span class="spelling">ⲁⲃⲱⲕ</span>, "#,
            r#"<span class="dialect">B</span> <span class="spelling">ⲁⲃⲟⲕ</span> <i>nn.</i>"#,
        )
    );
    assert_eq!(
        meaning.excise(&mut doc).unwrap(),
        "raven <b>crow</b><br>Gen 8 7"
    );
    assert_eq!(
        wiki.excise(&mut doc).unwrap(),
        format!(
            r#"First <a href="https://example.org/wiki">sense</a>.{UNIT_DELIMITER}Second sense."#
        )
    );
    // Everything else was either extracted as noise or already captured.
    assert_eq!(appendix.excise(&mut doc).unwrap(), "");
}
