//! Character-offset addressing inside a block.
//!
//! Mark and link commands work on "offset `n` of block `b`" rather than leaf
//! paths, because splitting and merging leaves reshuffles paths while the
//! character offsets stay put.

use crate::selection::Point;
use proseline_schema::{Document, Element, ElementType, Mark, Node, Path, Text};

/// A text leaf below a block: its path, start offset and length
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Leaf {
    pub path: Path,
    pub start: usize,
    pub len: usize,
}

pub(crate) fn leaves(document: &Document, block: &Path) -> Vec<Leaf> {
    let mut out = Vec::new();
    if let Some(node) = document.node(block) {
        let mut offset = 0;
        collect_leaves(node, block.clone(), &mut offset, &mut out);
    }
    out
}

fn collect_leaves(node: &Node, path: Path, offset: &mut usize, out: &mut Vec<Leaf>) {
    match node {
        Node::Text(text) => {
            out.push(Leaf {
                path,
                start: *offset,
                len: text.len(),
            });
            *offset += text.len();
        }
        Node::Element(el) => {
            for (index, child) in el.children.iter().enumerate() {
                collect_leaves(child, path.child(index), offset, out);
            }
        }
    }
}

/// Offset of `point` counted from the start of `block`
pub(crate) fn block_offset(document: &Document, block: &Path, point: &Point) -> Option<usize> {
    leaves(document, block)
        .into_iter()
        .find(|leaf| leaf.path == point.path)
        .map(|leaf| leaf.start + point.offset.min(leaf.len))
}

/// The point at `offset` in `block`; at a leaf boundary the earlier leaf wins
pub(crate) fn point_at(document: &Document, block: &Path, offset: usize) -> Option<Point> {
    let leaves = leaves(document, block);
    let leaf = leaves
        .iter()
        .find(|leaf| offset <= leaf.start + leaf.len)
        .or_else(|| leaves.last())?;
    let local = offset.saturating_sub(leaf.start).min(leaf.len);
    Some(Point::new(leaf.path.clone(), local))
}

/// Split the inline content so that a child boundary falls at `offset`;
/// returns the index of the first child at or after it.
///
/// An inline element straddling `offset` is split internally and the index
/// after it is returned.
pub(crate) fn split_at(children: &mut Vec<Node>, offset: usize) -> usize {
    let mut start = 0;
    let mut index = 0;
    while index < children.len() {
        if offset == start {
            return index;
        }
        let len = children[index].text_len();
        if offset < start + len {
            match &mut children[index] {
                Node::Text(text) => {
                    let tail = text.split_off(offset - start);
                    children.insert(index + 1, Node::Text(tail));
                }
                Node::Element(el) => {
                    split_at(&mut el.children, offset - start);
                }
            }
            return index + 1;
        }
        start += len;
        index += 1;
    }
    children.len()
}

/// Set or clear `mark` on every non-empty leaf lying wholly in `[from, to)`
pub(crate) fn set_mark(children: &mut [Node], from: usize, to: usize, mark: Mark, on: bool) {
    let mut offset = 0;
    visit_leaves_mut(children, &mut offset, &mut |text, start| {
        if !text.is_empty() && start >= from && start + text.len() <= to {
            text.set_mark(mark, on);
        }
    });
}

fn visit_leaves_mut(
    children: &mut [Node],
    offset: &mut usize,
    f: &mut dyn FnMut(&mut Text, usize),
) {
    for child in children {
        match child {
            Node::Text(text) => {
                let len = text.len();
                f(text, *offset);
                *offset += len;
            }
            Node::Element(el) => visit_leaves_mut(&mut el.children, offset, f),
        }
    }
}

/// Non-empty leaves overlapping `[from, to)`
pub(crate) fn leaves_in_range<'a>(
    children: &'a [Node],
    from: usize,
    to: usize,
) -> Vec<&'a Text> {
    fn walk<'a>(
        children: &'a [Node],
        offset: &mut usize,
        from: usize,
        to: usize,
        out: &mut Vec<&'a Text>,
    ) {
        for child in children {
            match child {
                Node::Text(text) => {
                    let start = *offset;
                    *offset += text.len();
                    if !text.is_empty() && start < to && from < start + text.len() {
                        out.push(text);
                    }
                }
                Node::Element(el) => walk(&el.children, offset, from, to, out),
            }
        }
    }

    let mut out = Vec::new();
    let mut offset = 0;
    walk(children, &mut offset, from, to, &mut out);
    out
}

/// Top-level links in a block's content: `(child index, start, end)`
pub(crate) fn link_ranges(children: &[Node]) -> Vec<(usize, usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0;
    for (index, child) in children.iter().enumerate() {
        let len = child.text_len();
        if child.kind() == Some(&ElementType::Link) {
            out.push((index, start, start + len));
        }
        start += len;
    }
    out
}

/// Replace the element at `index` with its own children
pub(crate) fn unwrap_at(children: &mut Vec<Node>, index: usize) {
    if let Some(Node::Element(el)) = children.get(index).cloned() {
        children.splice(index..=index, el.children);
    }
}

/// Move `children[from..to]` into a new link element
pub(crate) fn wrap_in_link(children: &mut Vec<Node>, from: usize, to: usize, url: &str) {
    let wrapped: Vec<Node> = children.drain(from..to).collect();
    let mut link = Element::new(ElementType::Link, wrapped);
    link.attrs.url = Some(url.to_string());
    children.insert(from, Node::Element(link));
}
