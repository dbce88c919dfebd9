//! Mark toggling and text insertion.

use crate::editor::Editor;
use crate::inline::{self, leaves_in_range, set_mark, split_at};
use crate::normalize::normalize_inline;
use crate::selection::Selection;
use proseline_schema::{Mark, Node, Text};
use std::collections::BTreeSet;

impl Editor {
    /// Whether `mark` applies at the selection.
    ///
    /// A caret reports the pending marks if any were toggled, otherwise the
    /// marks of the leaf it sits in. A range reports true only if every
    /// selected leaf carries the mark.
    pub fn is_mark_active(&self, mark: Mark) -> bool {
        let Some(selection) = self.selection.as_ref() else {
            return false;
        };
        if selection.is_collapsed() {
            if let Some(pending) = &self.pending_marks {
                return pending.contains(&mark);
            }
            return self
                .document
                .text(&selection.anchor.path)
                .map_or(false, |text| text.has_mark(mark));
        }

        let mut any = false;
        for (block, from, to) in self.selection_ranges() {
            let Some(children) = self.document.children_at(&block) else {
                continue;
            };
            for text in leaves_in_range(children, from, to) {
                if !text.has_mark(mark) {
                    return false;
                }
                any = true;
            }
        }
        any
    }

    /// Flip `mark` on the selected text.
    ///
    /// On a caret the document is left alone and the mark is toggled in the
    /// pending set used by the next [`insert_text`](Self::insert_text).
    pub fn toggle_mark(&mut self, mark: Mark) {
        let Some(selection) = self.selection.clone() else {
            return self.skip("toggle_mark", "no selection");
        };

        if selection.is_collapsed() {
            let mut pending = self.pending_marks.take().unwrap_or_else(|| {
                self.document
                    .text(&selection.anchor.path)
                    .map(|text| text.marks().into_iter().collect())
                    .unwrap_or_default()
            });
            if !pending.remove(&mark) {
                pending.insert(mark);
            }
            self.pending_marks = Some(pending);
            return;
        }

        let on = !self.is_mark_active(mark);
        let offsets = self.selection_offsets();
        let rules = self.rules.clone();
        for (block, from, to) in self.selection_ranges() {
            let Some(children) = self.document.children_at_mut(&block) else {
                continue;
            };
            split_at(children, from);
            split_at(children, to);
            set_mark(children, from, to, mark, on);
            normalize_inline(children, &rules);
        }
        self.restore_selection(offsets);
        self.commit("toggle_mark");
    }

    /// Insert `content` at a caret, using the pending marks when set
    pub fn insert_text(&mut self, content: &str) {
        let Some(selection) = self.selection.clone() else {
            return self.skip("insert_text", "no selection");
        };
        if !selection.is_collapsed() {
            return self.skip("insert_text", "selection is not collapsed");
        }
        if content.is_empty() {
            return self.skip("insert_text", "nothing to insert");
        }
        let Some((block, offset)) = self.point_offset(&selection.anchor) else {
            return self.skip("insert_text", "caret outside a block");
        };
        if self.document.element(&block).map_or(true, |el| self.rules.is_void(el)) {
            return self.skip("insert_text", "caret in a void block");
        }

        match self.pending_marks.take() {
            Some(marks) => {
                let rules = self.rules.clone();
                let Some(children) = self.document.children_at_mut(&block) else {
                    return self.skip("insert_text", "caret outside a block");
                };
                let index = split_at(children, offset);
                children.insert(index, Node::Text(marked_text(content, &marks)));
                normalize_inline(children, &rules);
            }
            None => {
                let Some(text) = self.document.text_mut(&selection.anchor.path) else {
                    return self.skip("insert_text", "caret outside text");
                };
                text.insert_str(selection.anchor.offset, content);
            }
        }

        let end = offset + content.chars().count();
        self.selection = inline::point_at(&self.document, &block, end).map(Selection::caret);
        self.commit("insert_text");
    }
}

fn marked_text(content: &str, marks: &BTreeSet<Mark>) -> Text {
    marks
        .iter()
        .fold(Text::new(content), |text, mark| text.with_mark(*mark))
}
