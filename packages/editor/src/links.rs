//! Link commands.
//!
//! Links never nest: inserting a link first unwraps any link the selection
//! touches, then wraps the selected content (or inserts the url as text
//! when nothing is highlighted).

use crate::editor::Editor;
use crate::inline::{self, link_ranges, split_at, unwrap_at, wrap_in_link};
use crate::normalize::normalize_inline;
use crate::selection::Selection;
use proseline_schema::{Element, ElementType, Node, Path};

impl Editor {
    /// True iff the selection touches a link: a caret inside one, or a range
    /// overlapping one
    pub fn is_link_active(&self) -> bool {
        let Some(selection) = self.selection.as_ref() else {
            return false;
        };
        if self.enclosing_link(&selection.anchor.path).is_some()
            || self.enclosing_link(&selection.focus.path).is_some()
        {
            return true;
        }
        if selection.is_collapsed() {
            return false;
        }
        self.selection_ranges().iter().any(|(block, from, to)| {
            self.document.children_at(block).map_or(false, |children| {
                link_ranges(children)
                    .iter()
                    .any(|(_, start, end)| start < to && from < end)
            })
        })
    }

    pub fn insert_link(&mut self, url: &str) {
        if url.is_empty() {
            return self.skip("insert_link", "empty url");
        }
        if self.selection.is_none() {
            return self.skip("insert_link", "no selection");
        }
        if self.is_link_active() {
            self.unwrap_selected_links();
        }
        let Some(selection) = self.selection.clone() else {
            return self.skip("insert_link", "selection lost");
        };

        if selection.is_collapsed() {
            let Some((block, offset)) = self.point_offset(&selection.anchor) else {
                return self.skip("insert_link", "caret outside a block");
            };
            if self.document.element(&block).map_or(true, |el| self.rules.is_void(el)) {
                return self.skip("insert_link", "caret in a void block");
            }
            let rules = self.rules.clone();
            let Some(children) = self.document.children_at_mut(&block) else {
                return self.skip("insert_link", "caret outside a block");
            };
            let index = split_at(children, offset);
            let mut link = Element::new(ElementType::Link, vec![Node::text(url)]);
            link.attrs.url = Some(url.to_string());
            children.insert(index, Node::Element(link));
            normalize_inline(children, &rules);

            let end = offset + url.chars().count();
            let caret = inline::point_at(&self.document, &block, end);
            self.selection = caret.map(Selection::caret);
        } else {
            let ranges = self.selection_ranges();
            let Some(end) = self.point_offset(selection.end()) else {
                return self.skip("insert_link", "selection outside a block");
            };
            let rules = self.rules.clone();
            for (block, from, to) in ranges.into_iter().filter(|(_, from, to)| from < to) {
                let Some(children) = self.document.children_at_mut(&block) else {
                    continue;
                };
                let first = split_at(children, from);
                let last = split_at(children, to);
                wrap_in_link(children, first, last, url);
                normalize_inline(children, &rules);
            }
            let (end_block, end_offset) = end;
            let caret = inline::point_at(&self.document, &end_block, end_offset);
            self.selection = caret.map(Selection::caret);
        }
        self.commit("insert_link");
    }

    pub fn remove_link(&mut self) {
        if !self.is_link_active() {
            return self.skip("remove_link", "no link at selection");
        }
        self.unwrap_selected_links();
        self.commit("remove_link");
    }

    /// Path of the link element at or above `path`
    fn enclosing_link(&self, path: &Path) -> Option<Path> {
        let mut candidates = path.ancestors();
        candidates.push(path.clone());
        candidates
            .into_iter()
            .rev()
            .find(|p| self.document.node(p).and_then(Node::kind) == Some(&ElementType::Link))
    }

    /// Unwrap every link the selection touches, keeping the selection on
    /// the same characters
    fn unwrap_selected_links(&mut self) {
        let offsets = self.selection_offsets();
        let Some(selection) = self.selection.clone() else {
            return;
        };

        let mut enclosing: Vec<Path> = [&selection.anchor, &selection.focus]
            .iter()
            .filter_map(|point| self.enclosing_link(&point.path))
            .collect();
        enclosing.dedup();
        let ranges = if selection.is_collapsed() {
            Vec::new()
        } else {
            self.selection_ranges()
        };

        // Deepest and last first so earlier paths stay valid
        let mut targets: Vec<Path> = enclosing;
        for (block, from, to) in &ranges {
            if let Some(children) = self.document.children_at(block) {
                for (index, start, end) in link_ranges(children) {
                    if start < *to && *from < end {
                        targets.push(block.child(index));
                    }
                }
            }
        }
        targets.sort();
        targets.dedup();

        let rules = self.rules.clone();
        let mut touched: Vec<Path> = Vec::new();
        for link in targets.iter().rev() {
            let (Some(parent), Some(index)) = (link.parent(), link.last()) else {
                continue;
            };
            if let Some(children) = self.document.children_at_mut(&parent) {
                unwrap_at(children, index);
            }
            if !touched.contains(&parent) {
                touched.push(parent);
            }
        }
        for parent in touched {
            if let Some(children) = self.document.children_at_mut(&parent) {
                normalize_inline(children, &rules);
            }
        }
        self.restore_selection(offsets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Point;
    use proseline_schema::Document;
    use serde_json::json;

    fn editor(value: serde_json::Value) -> Editor {
        Editor::with_document(Document::from_value(value).unwrap())
    }

    fn range(anchor: Point, focus: Point) -> Selection {
        Selection::new(anchor, focus)
    }

    #[test]
    fn test_wrap_selection_in_link() {
        let mut editor = editor(json!([
            { "type": "paragraph", "children": [{ "text": "read the docs now" }] }
        ]));
        editor.select(range(Point::new(vec![0, 0], 9), Point::new(vec![0, 0], 13)));
        editor.insert_link("https://example.com");

        let block = editor.document().element(&Path::new(vec![0])).unwrap();
        assert_eq!(block.children.len(), 3);
        assert_eq!(block.children[0].text_content(), "read the ");
        let link = block.children[1].as_element().unwrap();
        assert_eq!(link.kind, ElementType::Link);
        assert_eq!(link.attrs.url.as_deref(), Some("https://example.com"));
        assert_eq!(link.text_content(), "docs");
        assert_eq!(block.children[2].text_content(), " now");
        assert!(editor.is_link_active());
    }

    #[test]
    fn test_collapsed_insert_uses_url_as_text() {
        let mut editor = editor(json!([
            { "type": "paragraph", "children": [{ "text": "go " }] }
        ]));
        editor.select(Selection::caret(Point::new(vec![0, 0], 3)));
        editor.insert_link("https://a.io");

        let block = editor.document().element(&Path::new(vec![0])).unwrap();
        assert_eq!(block.text_content(), "go https://a.io");
        assert_eq!(block.children[1].kind(), Some(&ElementType::Link));
        assert_eq!(
            editor.selection().unwrap().anchor,
            Point::new(vec![0, 1, 0], 12)
        );
    }

    #[test]
    fn test_links_never_nest() {
        let mut editor = editor(json!([
            { "type": "paragraph", "children": [
                { "text": "a " },
                { "type": "link", "url": "old", "children": [{ "text": "bc" }] },
                { "text": " d" }
            ]}
        ]));
        editor.select(range(Point::new(vec![0, 0], 0), Point::new(vec![0, 2], 2)));
        editor.insert_link("new");

        let block = editor.document().element(&Path::new(vec![0])).unwrap();
        let links: Vec<&Element> = block
            .children
            .iter()
            .filter_map(Node::as_element)
            .collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attrs.url.as_deref(), Some("new"));
        assert_eq!(links[0].text_content(), "a bc d");
        assert!(links[0]
            .children
            .iter()
            .all(|child| child.kind() != Some(&ElementType::Link)));
    }

    #[test]
    fn test_remove_link_keeps_text() {
        let mut editor = editor(json!([
            { "type": "paragraph", "children": [
                { "text": "x" },
                { "type": "link", "url": "u", "children": [{ "text": "yz" }] },
                { "text": "" }
            ]}
        ]));
        editor.select(Selection::caret(Point::new(vec![0, 1, 0], 1)));
        assert!(editor.is_link_active());

        editor.remove_link();
        let block = editor.document().element(&Path::new(vec![0])).unwrap();
        assert_eq!(block.children, vec![Node::text("xyz")]);
        assert_eq!(editor.selection().unwrap().anchor, Point::new(vec![0, 0], 2));
        assert!(!editor.is_link_active());
    }

    #[test]
    fn test_link_commands_need_selection() {
        let mut editor = editor(json!([
            { "type": "paragraph", "children": [{ "text": "x" }] }
        ]));
        assert!(!editor.is_link_active());
        editor.insert_link("u");
        editor.remove_link();
        assert_eq!(editor.version(), 0);
    }
}
