use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proseline_compiler_email::{compile_to_email, CompileOptions, ComponentsMap};
use proseline_schema::{Document, Theme};
use serde_json::{json, Value};

fn newsletter(sections: usize) -> Document {
    let mut blocks: Vec<Value> = Vec::new();
    for i in 0..sections {
        blocks.push(json!({ "type": "heading-two", "children": [{ "text": format!("Section {}", i) }] }));
        blocks.push(json!({ "type": "paragraph", "indent": 1, "children": [
            { "text": "Some ", "bold": true },
            { "type": "link", "url": "https://example.com", "children": [{ "text": "linked" }] },
            { "text": " copy." }
        ]}));
        blocks.push(json!({ "type": "bulleted-list", "children": [
            { "type": "list-item", "children": [{ "text": "first" }] },
            { "type": "list-item", "indent": 2, "children": [{ "text": "second" }] }
        ]}));
        blocks.push(json!({ "type": "layout-container", "columns": 2, "columnWidths": ["50%", "50%"], "children": [
            { "type": "layout-column", "children": [{ "type": "image", "url": "https://example.com/a.png", "children": [{ "text": "" }] }] },
            { "type": "layout-column", "children": [{ "type": "paragraph", "padding": "8px", "children": [{ "text": "caption" }] }] }
        ]}));
    }
    Document::from_value(Value::Array(blocks)).unwrap()
}

fn compile_small_email(c: &mut Criterion) {
    let doc = newsletter(1);
    let components = ComponentsMap::standard();
    let theme = Theme::default();

    c.bench_function("compile_small_email", |b| {
        b.iter(|| compile_to_email(black_box(&doc), &components, &theme, CompileOptions::default()))
    });
}

fn compile_large_email(c: &mut Criterion) {
    let doc = newsletter(50);
    let components = ComponentsMap::standard();
    let theme = Theme::default();

    c.bench_function("compile_large_email", |b| {
        b.iter(|| compile_to_email(black_box(&doc), &components, &theme, CompileOptions::default()))
    });
}

criterion_group!(benches, compile_small_email, compile_large_email);
criterion_main!(benches);
