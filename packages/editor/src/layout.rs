//! Layout and image insertion.

use crate::editor::Editor;
use proseline_schema::{Attributes, Element, ElementType, Node, Path};
use proseline_styles::layout::{equal_widths, normalize_column_widths, rebalance_percentages, widths_from_pattern};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What `insert_layout` should build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpec {
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl From<u32> for LayoutSpec {
    fn from(columns: u32) -> Self {
        Self {
            columns,
            column_widths: None,
            pattern: None,
        }
    }
}

impl LayoutSpec {
    /// Widths to store on the container, if any apply
    fn resolved_widths(&self) -> Option<Vec<String>> {
        let count = self.columns as usize;
        if let Some(widths) = &self.column_widths {
            if widths.len() == count {
                return Some(normalize_column_widths(widths));
            }
            debug!(
                widths = widths.len(),
                columns = count,
                "Ignoring column widths that do not match the column count"
            );
        }
        self.pattern
            .as_deref()
            .and_then(widths_from_pattern)
            .filter(|widths| widths.len() == count)
    }
}

fn column() -> Node {
    Node::element(ElementType::LayoutColumn, vec![Node::empty_paragraph()])
}

impl Editor {
    /// Where a new top-level block goes: after the selection's top-level
    /// block, or at the end
    fn top_level_insertion_point(&self) -> Path {
        match self.selection_top_level().and_then(|p| p.next()) {
            Some(next) => next,
            None => Path::new(vec![self.document.children.len()]),
        }
    }

    /// Insert a layout container with `columns` empty columns, followed by
    /// an empty paragraph
    pub fn insert_layout(&mut self, spec: impl Into<LayoutSpec>) {
        let spec = spec.into();
        if spec.columns == 0 {
            return self.skip("insert_layout", "zero columns");
        }

        let attrs = Attributes {
            columns: Some(spec.columns),
            column_widths: spec.resolved_widths(),
            pattern: spec.pattern.clone(),
            ..Attributes::default()
        };
        let children = (0..spec.columns).map(|_| column()).collect();
        let container = Element::new(ElementType::LayoutContainer, children).with_attrs(attrs);

        let at = self.top_level_insertion_point();
        let Some(after) = at.next() else {
            return self.skip("insert_layout", "no insertion point");
        };
        self.document.insert_node(&at, Node::Element(container));
        self.document.insert_node(&after, Node::empty_paragraph());
        self.caret_at_start(&at);
        self.commit("insert_layout");
    }

    /// Append one column; explicit widths are reset to an even split
    pub fn add_column(&mut self, container: &Path) {
        let Some(el) = self.layout_container_mut(container) else {
            return self.skip("add_column", "not a layout container");
        };
        el.children.push(column());
        let count = el.children.len();
        el.attrs.columns = Some(count as u32);
        if el.attrs.column_widths.is_some() {
            el.attrs.column_widths = Some(equal_widths(count));
        }
        self.commit("add_column");
    }

    /// Remove the column at `index`; the last column is never removed.
    /// Remaining percentage widths are scaled back up to 100%.
    pub fn remove_column(&mut self, container: &Path, index: usize) {
        let Some(el) = self.layout_container_mut(container) else {
            return self.skip("remove_column", "not a layout container");
        };
        if el.children.len() <= 1 {
            return self.skip("remove_column", "last column");
        }
        if index >= el.children.len() {
            return self.skip("remove_column", "no such column");
        }

        el.children.remove(index);
        el.attrs.columns = Some(el.children.len() as u32);
        if let Some(mut widths) = el.attrs.column_widths.take() {
            if index < widths.len() {
                widths.remove(index);
            }
            el.attrs.column_widths = Some(rebalance_percentages(&widths));
        }

        let removed = container.child(index);
        self.remap_selection(|p| p.after_removal(&removed), Some(container));
        self.commit("remove_column");
    }

    fn layout_container_mut(&mut self, path: &Path) -> Option<&mut Element> {
        self.document
            .element_mut(path)
            .filter(|el| el.kind == ElementType::LayoutContainer)
    }

    /// Insert an image after the selection's top-level block (or at the
    /// end) followed by an empty paragraph for the caret
    pub fn insert_image(&mut self, url: &str, alt: Option<&str>) {
        let attrs = Attributes {
            url: Some(url.to_string()),
            alt: alt.map(str::to_string),
            ..Attributes::default()
        };
        let image = Element::empty(ElementType::Image).with_attrs(attrs);

        let at = self.top_level_insertion_point();
        let Some(after) = at.next() else {
            return self.skip("insert_image", "no insertion point");
        };
        self.document.insert_node(&at, Node::Element(image));
        self.document.insert_node(&after, Node::empty_paragraph());
        self.caret_at_start(&after);
        self.commit("insert_image");
    }

    /// Change an image's url and/or alt text; `None` leaves a field alone
    pub fn update_image(&mut self, path: &Path, url: Option<&str>, alt: Option<&str>) {
        let Some(el) = self
            .document
            .element_mut(path)
            .filter(|el| el.kind == ElementType::Image)
        else {
            return self.skip("update_image", "not an image");
        };
        if url.is_none() && alt.is_none() {
            return self.skip("update_image", "nothing to change");
        }
        if let Some(url) = url {
            el.attrs.url = Some(url.to_string());
        }
        if let Some(alt) = alt {
            el.attrs.alt = Some(alt.to_string());
        }
        self.commit("update_image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Point, Selection};
    use proseline_schema::Document;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_relative_widths_become_percentages() {
        let mut editor = Editor::default();
        editor.insert_layout(LayoutSpec {
            columns: 3,
            column_widths: Some(strings(&["1fr", "2fr", "1fr"])),
            pattern: None,
        });

        let container = editor.document().element(&Path::new(vec![1])).unwrap();
        assert_eq!(
            container.attrs.column_widths,
            Some(strings(&["25.00%", "50.00%", "25.00%"]))
        );
    }

    #[test]
    fn test_mismatched_widths_are_ignored() {
        let mut editor = Editor::default();
        editor.insert_layout(LayoutSpec {
            columns: 2,
            column_widths: Some(strings(&["1fr", "2fr", "1fr"])),
            pattern: None,
        });

        let container = editor.document().element(&Path::new(vec![1])).unwrap();
        assert_eq!(container.attrs.columns, Some(2));
        assert_eq!(container.attrs.column_widths, None);
    }

    #[test]
    fn test_pattern_supplies_widths() {
        let mut editor = Editor::default();
        editor.insert_layout(LayoutSpec {
            columns: 2,
            column_widths: None,
            pattern: Some("1:3".to_string()),
        });

        let container = editor.document().element(&Path::new(vec![1])).unwrap();
        assert_eq!(
            container.attrs.column_widths,
            Some(strings(&["25.00%", "75.00%"]))
        );
        assert_eq!(container.attrs.pattern.as_deref(), Some("1:3"));
    }

    #[test]
    fn test_layout_goes_after_selected_block() {
        let document = Document::from_value(json!([
            { "type": "paragraph", "children": [{ "text": "a" }] },
            { "type": "paragraph", "children": [{ "text": "b" }] }
        ]))
        .unwrap();
        let mut editor = Editor::with_document(document);
        editor.select(Selection::caret(Point::new(vec![0, 0], 1)));
        editor.insert_layout(2);

        let kinds: Vec<_> = editor
            .document()
            .children
            .iter()
            .map(|n| n.kind().cloned().unwrap())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ElementType::Paragraph,
                ElementType::LayoutContainer,
                ElementType::Paragraph,
                ElementType::Paragraph,
            ]
        );
        assert_eq!(
            editor.selection().unwrap().anchor,
            Point::new(vec![1, 0, 0, 0], 0)
        );
    }

    #[test]
    fn test_remove_column_rebalances_widths() {
        let mut editor = Editor::default();
        editor.insert_layout(LayoutSpec {
            columns: 3,
            column_widths: Some(strings(&["1fr", "2fr", "1fr"])),
            pattern: None,
        });
        let container = Path::new(vec![1]);
        editor.remove_column(&container, 1);

        let el = editor.document().element(&container).unwrap();
        assert_eq!(el.children.len(), 2);
        assert_eq!(el.attrs.columns, Some(2));
        assert_eq!(el.attrs.column_widths, Some(strings(&["50.00%", "50.00%"])));

        editor.remove_column(&container, 0);
        editor.remove_column(&container, 0);
        let el = editor.document().element(&container).unwrap();
        assert_eq!(el.children.len(), 1);
    }

    #[test]
    fn test_add_column_resets_widths() {
        let mut editor = Editor::default();
        editor.insert_layout(LayoutSpec {
            columns: 2,
            column_widths: None,
            pattern: Some("1:3".to_string()),
        });
        editor.add_column(&Path::new(vec![1]));

        let el = editor.document().element(&Path::new(vec![1])).unwrap();
        assert_eq!(el.attrs.columns, Some(3));
        assert_eq!(
            el.attrs.column_widths,
            Some(strings(&["33.33%", "33.33%", "33.33%"]))
        );
    }

    #[test]
    fn test_insert_and_update_image() {
        let mut editor = Editor::default();
        editor.insert_image("https://example.com/a.png", None);

        let image_path = Path::new(vec![1]);
        assert_eq!(
            editor.document().element(&image_path).unwrap().kind,
            ElementType::Image
        );
        assert_eq!(editor.selection().unwrap().anchor, Point::new(vec![2, 0], 0));

        editor.update_image(&image_path, None, Some("A cat"));
        let image = editor.document().element(&image_path).unwrap();
        assert_eq!(image.attrs.url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(image.attrs.alt.as_deref(), Some("A cat"));

        let before = editor.document().clone();
        editor.update_image(&Path::new(vec![0]), Some("x"), None);
        assert_eq!(editor.document(), &before);
    }
}
