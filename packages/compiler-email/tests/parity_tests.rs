//! The interactive surface and the email output agree on what they show

use proseline_compiler_email::{compile_blocks, ComponentsMap};
use proseline_schema::{Document, Theme};
use proseline_surface::{default_plugins, Composition};
use serde_json::json;

fn both(value: serde_json::Value) -> (String, String) {
    let document = Document::from_value(value).unwrap();
    let theme = Theme::default();

    let surface = Composition::new(default_plugins())
        .render_document(&document, Some(theme.clone()))
        .to_html();
    let email = compile_blocks(&document, &ComponentsMap::standard(), &theme)
        .unwrap()
        .concat();
    (surface, email)
}

#[test]
fn test_unknown_type_is_flagged_in_both() {
    let (surface, email) = both(json!([
        { "type": "video-embed", "children": [{ "text": "" }] }
    ]));

    let marker = "Unsupported block type: video-embed";
    assert!(surface.contains(marker));
    assert!(email.contains(marker));
}

#[test]
fn test_empty_image_is_a_placeholder_in_both() {
    let (surface, email) = both(json!([
        { "type": "image", "url": "", "children": [{ "text": "" }] }
    ]));

    assert!(surface.contains("data-image-placeholder=\"true\""));
    assert!(email.contains("data-image-placeholder=\"true\""));
    assert!(!surface.contains("outline"));
    assert!(!email.contains("<img"));
}

#[test]
fn test_indent_padding_matches() {
    let (surface, email) = both(json!([
        { "type": "paragraph", "indent": 3, "children": [{ "text": "x" }] },
        { "type": "bulleted-list", "children": [
            { "type": "list-item", "indent": 2, "children": [{ "text": "y" }] }
        ]}
    ]));

    for html in [&surface, &email] {
        assert!(html.contains("padding-left: 72px;"));
        assert!(html.contains("padding-left: 20px;"));
    }
}

#[test]
fn test_marks_nest_the_same_way() {
    let (surface, email) = both(json!([
        { "type": "paragraph", "children": [{ "text": "z", "bold": true, "underline": true }] }
    ]));

    let nested = "<u><strong>z</strong></u>";
    assert!(surface.contains(nested));
    assert!(email.contains(nested));
}

#[test]
fn test_extreme_indent_renders_in_both() {
    let (surface, email) = both(json!([
        { "type": "paragraph", "indent": u32::MAX, "children": [{ "text": "x" }] },
        { "type": "bulleted-list", "children": [
            { "type": "list-item", "indent": u32::MAX, "children": [{ "text": "y" }] }
        ]}
    ]));

    for html in [&surface, &email] {
        assert!(html.contains("padding-left: 103079215080px;"));
        assert!(html.contains("padding-left: 85899345880px;"));
    }
}

#[test]
fn test_broken_link_is_contained_in_both() {
    let (surface, email) = both(json!([
        { "type": "paragraph", "children": [{ "text": "kept" }] },
        { "type": "paragraph", "children": [
            { "text": "" },
            { "type": "link", "children": [{ "text": "x" }] },
            { "text": "" }
        ]}
    ]));

    for html in [&surface, &email] {
        assert!(html.contains("kept"));
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("This block could not be displayed."));
    }
}
