//! # Editing Session
//!
//! An [`Editor`] owns one document tree, the current selection and the
//! session's [`ElementRules`]. Every command in this crate is a method on it.
//!
//! ## Command contract
//!
//! ```text
//! check preconditions ──no──▶ debug!("skipped") and return
//!        │yes
//!        ▼
//!   mutate tree ──▶ normalize ──▶ repair selection ──▶ version += 1
//! ```
//!
//! Commands never return errors. A missing selection, a stale path or a node
//! of the wrong kind turns the command into a no-op. Only whole-tree load and
//! save can fail (see [`EditorError`](crate::EditorError)).

use crate::errors::EditorResult;
use crate::inline;
use crate::normalize;
use crate::selection::{Point, Selection};
use proseline_schema::{Document, Element, ElementRules, Mark, Node, Path};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// A live editing session over one document
#[derive(Debug, Clone)]
pub struct Editor {
    pub(crate) document: Document,
    pub(crate) selection: Option<Selection>,
    pub(crate) rules: ElementRules,

    /// Marks to apply to the next inserted text (set by toggling a mark on
    /// a collapsed selection)
    pub(crate) pending_marks: Option<BTreeSet<Mark>>,

    /// Increments on each applied command that changed the tree
    version: u64,
}

impl Editor {
    pub fn new(document: Document, rules: ElementRules) -> Self {
        let mut document = document;
        document.ensure_not_empty();
        Self {
            document,
            selection: None,
            rules,
            pending_marks: None,
            version: 0,
        }
    }

    /// Session with the standard rules (link inline, image void)
    pub fn with_document(document: Document) -> Self {
        Self::new(document, ElementRules::standard())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn rules(&self) -> &ElementRules {
        &self.rules
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn pending_marks(&self) -> Option<&BTreeSet<Mark>> {
        self.pending_marks.as_ref()
    }

    /// Set the selection; ignored unless both points address a text leaf
    pub fn select(&mut self, selection: Selection) {
        if !self.point_is_valid(&selection.anchor) || !self.point_is_valid(&selection.focus) {
            self.skip("select", "selection does not resolve to text");
            return;
        }
        if self.selection.as_ref() != Some(&selection) {
            self.pending_marks = None;
        }
        self.selection = Some(selection);
    }

    pub fn deselect(&mut self) {
        self.selection = None;
        self.pending_marks = None;
    }

    /// Replace the whole tree with a parsed document.
    ///
    /// On error the current tree and selection are left untouched.
    pub fn load_json(&mut self, source: &str) -> EditorResult<()> {
        let document = Document::from_json(source)?;
        info!(blocks = document.children.len(), "Loaded document");
        self.document = document;
        self.deselect();
        self.version += 1;
        Ok(())
    }

    /// Serialize the current tree verbatim
    pub fn save_json(&self) -> EditorResult<String> {
        Ok(self.document.to_json()?)
    }

    // --- shared plumbing for commands ---

    pub(crate) fn point_is_valid(&self, point: &Point) -> bool {
        self.document
            .text(&point.path)
            .map_or(false, |text| point.offset <= text.len())
    }

    /// Deepest non-inline element at or above `path`
    pub(crate) fn lowest_block(&self, path: &Path) -> Option<Path> {
        let mut candidates = path.ancestors();
        candidates.push(path.clone());
        candidates.into_iter().rev().find(|candidate| {
            matches!(self.document.element(candidate), Some(el) if !self.rules.is_inline(el))
        })
    }

    /// Lowest enclosing block of the selection anchor
    pub(crate) fn selection_block(&self) -> Option<Path> {
        let selection = self.selection.as_ref()?;
        self.lowest_block(&selection.anchor.path)
    }

    pub(crate) fn selection_top_level(&self) -> Option<Path> {
        self.selection.as_ref()?.anchor.path.top_level()
    }

    pub(crate) fn block_element(&self, path: &Path) -> Option<&Element> {
        self.document
            .element(path)
            .filter(|el| !self.rules.is_inline(el))
    }

    pub(crate) fn caret_at_start(&mut self, path: &Path) {
        self.selection = self
            .document
            .first_text_path(path)
            .map(|text| Selection::caret(Point::new(text, 0)));
    }

    pub(crate) fn caret_at_end(&mut self, path: &Path) {
        self.selection = self.document.last_text_path(path).and_then(|text| {
            let offset = self.document.text(&text)?.len();
            Some(Selection::caret(Point::new(text, offset)))
        });
    }

    /// Carry the selection through a structural edit.
    ///
    /// When either point cannot be mapped the caret falls back to the start
    /// of `fallback` (or the selection is dropped without one).
    pub(crate) fn remap_selection(
        &mut self,
        map: impl Fn(&Path) -> Option<Path>,
        fallback: Option<&Path>,
    ) {
        let Some(selection) = self.selection.take() else {
            return;
        };
        let mapped = selection.map_points(|point| {
            map(&point.path).map(|path| Point::new(path, point.offset))
        });
        match (mapped, fallback) {
            (Some(mapped), _) => self.selection = Some(mapped),
            (None, Some(fallback)) => self.caret_at_start(fallback),
            (None, None) => {}
        }
    }

    /// Anchor and focus as `(block, offset-in-block)` pairs; these survive
    /// any edit that only reshapes the inline content of a block.
    pub(crate) fn selection_offsets(&self) -> Option<[(Path, usize); 2]> {
        let selection = self.selection.as_ref()?;
        let anchor = self.point_offset(&selection.anchor)?;
        let focus = self.point_offset(&selection.focus)?;
        Some([anchor, focus])
    }

    pub(crate) fn point_offset(&self, point: &Point) -> Option<(Path, usize)> {
        let block = self.lowest_block(&point.path)?;
        let offset = inline::block_offset(&self.document, &block, point)?;
        Some((block, offset))
    }

    pub(crate) fn restore_selection(&mut self, offsets: Option<[(Path, usize); 2]>) {
        let Some([(anchor_block, anchor), (focus_block, focus)]) = offsets else {
            return;
        };
        let anchor = inline::point_at(&self.document, &anchor_block, anchor);
        let focus = inline::point_at(&self.document, &focus_block, focus);
        self.selection = anchor.zip(focus).map(|(a, f)| Selection::new(a, f));
    }

    /// Blocks touched by the selection with the selected character range of
    /// each, in document order. Void blocks are skipped.
    pub(crate) fn selection_ranges(&self) -> Vec<(Path, usize, usize)> {
        let Some(selection) = self.selection.as_ref() else {
            return Vec::new();
        };
        let (start, end) = (selection.start(), selection.end());
        let (Some((start_block, start_offset)), Some((end_block, end_offset))) =
            (self.point_offset(start), self.point_offset(end))
        else {
            return Vec::new();
        };

        let mut blocks: Vec<Path> = Vec::new();
        for path in self.document.text_paths() {
            if path < start.path || path > end.path {
                continue;
            }
            if let Some(block) = self.lowest_block(&path) {
                if blocks.last() != Some(&block) {
                    blocks.push(block);
                }
            }
        }

        blocks
            .into_iter()
            .filter(|block| {
                self.document
                    .element(block)
                    .map_or(false, |el| !self.rules.is_void(el))
            })
            .map(|block| {
                let from = if block == start_block { start_offset } else { 0 };
                let to = if block == end_block {
                    end_offset
                } else {
                    self.document.node(&block).map_or(0, Node::text_len)
                };
                (block, from, to)
            })
            .collect()
    }

    /// Finish a command that changed the tree
    pub(crate) fn commit(&mut self, command: &'static str) {
        normalize::normalize_document(&mut self.document, &self.rules);
        self.repair_selection();
        self.version += 1;
        debug!(command, version = self.version, "Applied command");
    }

    pub(crate) fn skip(&self, command: &'static str, reason: &'static str) {
        debug!(command, reason, "Skipped command");
    }

    /// Clamp offsets into range and drop points that no longer hit text
    fn repair_selection(&mut self) {
        let Some(selection) = self.selection.take() else {
            return;
        };
        self.selection = selection.map_points(|point| {
            let len = self.document.text(&point.path)?.len();
            Some(Point::new(point.path.clone(), point.offset.min(len)))
        });
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_document(Document::empty())
    }
}
