//! Whole-block commands: convert, duplicate, delete, move, insert.

use crate::editor::Editor;
use proseline_schema::{Element, ElementType, Node, Path};

impl Editor {
    /// Change the block at `path` to `to`.
    ///
    /// `align`, `lineHeight`, `font` and `indent` always survive. Converting
    /// into a list wraps the content in list items; converting a list into
    /// anything else keeps only the first item's content.
    pub fn convert_block(&mut self, path: &Path, to: ElementType) {
        let Some(el) = self.document.element(path) else {
            return self.skip("convert_block", "no element at path");
        };
        if !el.kind.is_convertible() || !to.is_convertible() {
            return self.skip("convert_block", "not a convertible block type");
        }
        if el.kind == to {
            return self.skip("convert_block", "already that type");
        }

        let from_list = el.kind.is_list();
        let to_list = to.is_list();
        let el = el.clone();

        if !from_list && to_list {
            let (items, moves) = wrap_in_list_items(el.children);
            let moves: Vec<(Path, Path)> = moves
                .into_iter()
                .map(|(old, new)| {
                    let target = Path::new([path.as_slice(), new.as_slice()].concat());
                    (path.child(old), target)
                })
                .collect();
            let list = Element::new(to, items).with_attrs(el.attrs.conversion_subset());
            self.document.replace_node(path, Node::Element(list));
            self.remap_selection(
                |p| {
                    moves
                        .iter()
                        .find_map(|(old, new)| p.rebase(old, new))
                        .or_else(|| (!path.is_ancestor_of(p)).then(|| p.clone()))
                },
                Some(path),
            );
        } else if from_list && !to_list {
            let payload = el
                .children
                .into_iter()
                .next()
                .and_then(|item| match item {
                    Node::Element(item) => Some(item.children),
                    Node::Text(_) => None,
                })
                .unwrap_or_default();
            let block = Element::new(to, payload).with_attrs(el.attrs.conversion_subset());
            self.document.replace_node(path, Node::Element(block));
            let first_item = path.child(0);
            self.remap_selection(
                |p| {
                    p.rebase(&first_item, path)
                        .or_else(|| (!path.is_ancestor_of(p)).then(|| p.clone()))
                },
                Some(path),
            );
        } else if let Some(target) = self.document.element_mut(path) {
            target.kind = to;
        }

        self.commit("convert_block");
    }

    /// Insert a deep copy right after `path` and move the caret into it
    pub fn duplicate_block(&mut self, path: &Path) {
        let (Some(node), Some(next)) = (self.document.node(path).cloned(), path.next()) else {
            return self.skip("duplicate_block", "no node at path");
        };
        if node.is_text() {
            return self.skip("duplicate_block", "not a block");
        }
        if !self.document.insert_node(&next, node) {
            return self.skip("duplicate_block", "cannot insert after path");
        }
        self.caret_at_start(&next);
        self.commit("duplicate_block");
    }

    /// Remove the block at `path`; a sole child is reset to an empty
    /// paragraph instead
    pub fn delete_block(&mut self, path: &Path) {
        let Some(siblings) = self.document.sibling_count(path) else {
            return self.skip("delete_block", "no parent at path");
        };
        if self.document.node(path).map_or(true, Node::is_text) {
            return self.skip("delete_block", "no block at path");
        }

        if siblings == 1 {
            self.document.replace_node(path, Node::empty_paragraph());
            self.caret_at_start(path);
        } else {
            let selection_inside = self.selection.as_ref().map_or(false, |s| {
                path.is_ancestor_of(&s.anchor.path) || path.is_ancestor_of(&s.focus.path)
            });
            self.document.remove_node(path);
            if selection_inside {
                match path.previous() {
                    Some(previous) => self.caret_at_end(&previous),
                    // the following sibling has slid into this slot
                    None => self.caret_at_start(path),
                }
            } else {
                self.remap_selection(|p| p.after_removal(path), None);
            }
        }
        self.commit("delete_block");
    }

    pub fn move_block_up(&mut self, path: &Path) {
        let Some(previous) = path.previous() else {
            return self.skip("move_block_up", "already first");
        };
        if !self.document.move_node(path, &previous) {
            return self.skip("move_block_up", "no node at path");
        }
        self.remap_selection(|p| Some(p.after_move(path, &previous)), None);
        self.commit("move_block_up");
    }

    /// Moves the following sibling into this slot, so `path` keeps pointing
    /// at the same position
    pub fn move_block_down(&mut self, path: &Path) {
        let Some(next) = path.next() else {
            return self.skip("move_block_down", "no parent at path");
        };
        if self.document.node(path).is_none() || self.document.node(&next).is_none() {
            return self.skip("move_block_down", "already last");
        }
        if !self.document.move_node(&next, path) {
            return self.skip("move_block_down", "no node at path");
        }
        self.remap_selection(|p| Some(p.after_move(&next, path)), None);
        self.commit("move_block_down");
    }

    /// Insert an empty block of `kind` after `path` and put the caret in it
    pub fn insert_block_after(&mut self, path: &Path, kind: ElementType) {
        if self.document.node(path).map_or(true, Node::is_text) {
            return self.skip("insert_block_after", "no block at path");
        }
        if !kind.is_convertible() && kind.is_known() {
            return self.skip("insert_block_after", "not a standalone block type");
        }
        let Some(next) = path.next() else {
            return self.skip("insert_block_after", "no parent at path");
        };

        let block = if kind.is_list() {
            Element::new(
                kind,
                vec![Node::Element(Element::empty(ElementType::ListItem))],
            )
        } else {
            Element::empty(kind)
        };
        if !self.document.insert_node(&next, Node::Element(block)) {
            return self.skip("insert_block_after", "cannot insert after path");
        }
        self.caret_at_start(&next);
        self.commit("insert_block_after");
    }
}

/// Wrap every child in its own list item. Returns the items and, for each
/// old child index, its new path relative to the list.
fn wrap_in_list_items(children: Vec<Node>) -> (Vec<Node>, Vec<(usize, Vec<usize>)>) {
    children
        .into_iter()
        .enumerate()
        .map(|(old, child)| {
            let item = Node::Element(Element::new(ElementType::ListItem, vec![child]));
            (item, (old, vec![old, 0]))
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Point, Selection};
    use proseline_schema::{Document, TextAlign};
    use serde_json::json;

    fn editor(value: serde_json::Value) -> Editor {
        Editor::with_document(Document::from_value(value).unwrap())
    }

    #[test]
    fn test_each_child_becomes_a_list_item() {
        let (items, moves) = wrap_in_list_items(vec![
            Node::text("a"),
            Node::element(ElementType::Link, vec![Node::text("b")]),
            Node::text("c"),
        ]);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].kind(), Some(&ElementType::ListItem));
        assert_eq!(items[2].text_content(), "c");
        assert_eq!(moves[2], (2, vec![2, 0]));
    }

    #[test]
    fn test_convert_paragraph_to_list_keeps_caret() {
        let mut editor = editor(json!([
            { "type": "paragraph", "align": "center", "children": [{ "text": "hello" }] }
        ]));
        editor.select(Selection::caret(Point::new(vec![0, 0], 3)));
        editor.convert_block(&Path::new(vec![0]), ElementType::BulletedList);

        let list = editor.document().element(&Path::new(vec![0])).unwrap();
        assert_eq!(list.kind, ElementType::BulletedList);
        assert_eq!(list.attrs.align, Some(TextAlign::Center));
        assert_eq!(
            editor.selection().unwrap().anchor,
            Point::new(vec![0, 0, 0], 3)
        );
    }

    #[test]
    fn test_relabel_keeps_block_styles() {
        let mut editor = editor(json!([
            { "type": "paragraph", "padding": "8px", "children": [{ "text": "x" }] }
        ]));
        editor.convert_block(&Path::new(vec![0]), ElementType::HeadingTwo);

        let heading = editor.document().element(&Path::new(vec![0])).unwrap();
        assert_eq!(heading.kind, ElementType::HeadingTwo);
        assert_eq!(heading.attrs.padding.as_deref(), Some("8px"));
    }

    #[test]
    fn test_convert_rejects_non_blocks() {
        let mut editor = editor(json!([
            { "type": "image", "url": "a.png", "children": [{ "text": "" }] }
        ]));
        let before = editor.document().clone();
        editor.convert_block(&Path::new(vec![0]), ElementType::Paragraph);
        assert_eq!(editor.document(), &before);
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_delete_moves_caret_to_previous_block() {
        let mut editor = editor(json!([
            { "type": "paragraph", "children": [{ "text": "one" }] },
            { "type": "paragraph", "children": [{ "text": "two" }] }
        ]));
        editor.select(Selection::caret(Point::new(vec![1, 0], 1)));
        editor.delete_block(&Path::new(vec![1]));

        assert_eq!(editor.document().children.len(), 1);
        assert_eq!(editor.selection().unwrap().anchor, Point::new(vec![0, 0], 3));
    }

    #[test]
    fn test_insert_list_after_has_one_item() {
        let mut editor = editor(json!([
            { "type": "paragraph", "children": [{ "text": "one" }] }
        ]));
        editor.insert_block_after(&Path::new(vec![0]), ElementType::NumberedList);

        let list = editor.document().element(&Path::new(vec![1])).unwrap();
        assert_eq!(list.children.len(), 1);
        assert_eq!(list.children[0].kind(), Some(&ElementType::ListItem));
        assert_eq!(editor.selection().unwrap().anchor, Point::new(vec![1, 0, 0], 0));
    }
}
