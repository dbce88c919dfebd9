//! Structural repairs run after every command.
//!
//! - the root holds at least one block
//! - every element has at least one child (an empty text leaf if need be)
//! - a void element holds exactly one empty text leaf
//! - `layout-container.columns` matches its child count and `columnWidths`
//!   never has more entries than there are columns

use proseline_schema::{Element, ElementRules, ElementType, Node, Text};
use proseline_styles::layout::rebalance_percentages;

pub(crate) fn normalize_document(document: &mut proseline_schema::Document, rules: &ElementRules) {
    document.ensure_not_empty();
    for node in &mut document.children {
        normalize_node(node, rules);
    }
}

fn normalize_node(node: &mut Node, rules: &ElementRules) {
    let Node::Element(el) = node else {
        return;
    };

    if rules.is_void(el) {
        if el.children != [Node::empty_text()] {
            el.children = vec![Node::empty_text()];
        }
        return;
    }

    if el.children.is_empty() {
        el.children.push(Node::empty_text());
    }
    for child in &mut el.children {
        normalize_node(child, rules);
    }

    if el.kind == ElementType::LayoutContainer {
        sync_columns(el);
    }
}

fn sync_columns(container: &mut Element) {
    let count = container.children.len();
    container.attrs.columns = Some(count as u32);

    let Some(widths) = container.attrs.column_widths.take() else {
        return;
    };
    container.attrs.column_widths = match widths.len() {
        n if n == count => Some(widths),
        n if n > count => Some(rebalance_percentages(&widths[..count])),
        _ => None,
    };
}

/// Tidy a block's inline content after leaves were split or wrapped.
///
/// Adjacent leaves with identical marks merge, empty leaves between two
/// other leaves are dropped, and every inline element is given a text
/// neighbour on both sides so a caret can always sit next to it. None of
/// this changes the character offsets of the content.
pub(crate) fn normalize_inline(children: &mut Vec<Node>, rules: &ElementRules) {
    for child in children.iter_mut() {
        if let Node::Element(el) = child {
            if rules.is_inline(el) {
                normalize_inline(&mut el.children, rules);
            }
        }
    }

    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        if let (Some(Node::Text(prev)), Node::Text(next)) = (merged.last_mut(), &child) {
            if same_marks(prev, next) {
                prev.text.push_str(&next.text);
                continue;
            }
            if prev.is_empty() {
                *prev = next.clone();
                continue;
            }
            if next.is_empty() {
                continue;
            }
        }
        merged.push(child);
    }

    let mut index = 0;
    while index < merged.len() {
        let is_inline = matches!(&merged[index], Node::Element(el) if rules.is_inline(el));
        if is_inline {
            if index == 0 || !merged[index - 1].is_text() {
                merged.insert(index, Node::empty_text());
                index += 1;
            }
            if index + 1 == merged.len() || !merged[index + 1].is_text() {
                merged.insert(index + 1, Node::empty_text());
            }
        }
        index += 1;
    }

    if merged.is_empty() {
        merged.push(Node::empty_text());
    }
    *children = merged;
}

fn same_marks(a: &Text, b: &Text) -> bool {
    a.marks() == b.marks()
}
