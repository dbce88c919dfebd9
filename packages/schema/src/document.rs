//! # Document Tree
//!
//! An ordered forest of [`Node`]s plus the path-addressed primitives every
//! command is built from (lookup, insert, remove, replace, move).
//!
//! ## Serialization
//!
//! A document is persisted as the bare JSON array of its root nodes.
//! [`Document::from_json`] parses the whole array before anything else sees
//! it, so a malformed file never produces a half-built tree.

use crate::error::LoadResult;
use crate::node::{Element, Node, Text};
use crate::path::Path;
use serde::{Deserialize, Serialize};

/// The whole editable tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        let mut doc = Self { children };
        doc.ensure_not_empty();
        doc
    }

    /// A document with exactly one empty paragraph
    pub fn empty() -> Self {
        Self {
            children: vec![Node::empty_paragraph()],
        }
    }

    /// Parse the serialized form
    pub fn from_json(source: &str) -> LoadResult<Self> {
        let children: Vec<Node> = serde_json::from_str(source)?;
        Ok(Self::new(children))
    }

    pub fn from_value(value: serde_json::Value) -> LoadResult<Self> {
        let children: Vec<Node> = serde_json::from_value(value)?;
        Ok(Self::new(children))
    }

    /// Serialize the current tree verbatim
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.children)
    }

    /// Root sequence is never empty
    pub fn ensure_not_empty(&mut self) {
        if self.children.is_empty() {
            self.children.push(Node::empty_paragraph());
        }
    }

    pub fn node(&self, path: &Path) -> Option<&Node> {
        let (first, rest) = path.as_slice().split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = node.children()?.get(*index)?;
        }
        Some(node)
    }

    pub fn node_mut(&mut self, path: &Path) -> Option<&mut Node> {
        let (first, rest) = path.as_slice().split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for index in rest {
            node = node.children_mut()?.get_mut(*index)?;
        }
        Some(node)
    }

    pub fn element(&self, path: &Path) -> Option<&Element> {
        self.node(path)?.as_element()
    }

    pub fn element_mut(&mut self, path: &Path) -> Option<&mut Element> {
        self.node_mut(path)?.as_element_mut()
    }

    pub fn text(&self, path: &Path) -> Option<&Text> {
        self.node(path)?.as_text()
    }

    pub fn text_mut(&mut self, path: &Path) -> Option<&mut Text> {
        self.node_mut(path)?.as_text_mut()
    }

    /// Children of the node at `parent` (the root sequence for the root path)
    pub fn children_at(&self, parent: &Path) -> Option<&Vec<Node>> {
        if parent.is_root() {
            Some(&self.children)
        } else {
            self.node(parent)?.children()
        }
    }

    pub fn children_at_mut(&mut self, parent: &Path) -> Option<&mut Vec<Node>> {
        if parent.is_root() {
            Some(&mut self.children)
        } else {
            self.node_mut(parent)?.children_mut()
        }
    }

    /// Number of siblings sharing the parent of `path` (including itself)
    pub fn sibling_count(&self, path: &Path) -> Option<usize> {
        self.children_at(&path.parent()?).map(Vec::len)
    }

    /// Insert `node` so that it ends up at `path`
    pub fn insert_node(&mut self, path: &Path, node: Node) -> bool {
        let (Some(parent), Some(index)) = (path.parent(), path.last()) else {
            return false;
        };
        match self.children_at_mut(&parent) {
            Some(children) if index <= children.len() => {
                children.insert(index, node);
                true
            }
            _ => false,
        }
    }

    pub fn remove_node(&mut self, path: &Path) -> Option<Node> {
        let index = path.last()?;
        let children = self.children_at_mut(&path.parent()?)?;
        if index < children.len() {
            Some(children.remove(index))
        } else {
            None
        }
    }

    /// Swap in `node`, returning what was there
    pub fn replace_node(&mut self, path: &Path, node: Node) -> Option<Node> {
        let slot = self.node_mut(path)?;
        Some(std::mem::replace(slot, node))
    }

    /// Move a node between positions under the same parent.
    ///
    /// `to` addresses the node's final position, i.e. it is interpreted after
    /// the node has been taken out of its old slot.
    pub fn move_node(&mut self, from: &Path, to: &Path) -> bool {
        if from.parent() != to.parent() {
            return false;
        }
        let (Some(parent), Some(from_index), Some(to_index)) = (from.parent(), from.last(), to.last())
        else {
            return false;
        };
        let Some(children) = self.children_at_mut(&parent) else {
            return false;
        };
        if from_index >= children.len() || to_index >= children.len() {
            return false;
        }

        let node = children.remove(from_index);
        children.insert(to_index, node);
        true
    }

    /// Every node with its path, depth-first in document order
    pub fn descendants(&self) -> Vec<(Path, &Node)> {
        let mut out = Vec::new();
        for (index, child) in self.children.iter().enumerate() {
            collect_descendants(child, Path::new(vec![index]), &mut out);
        }
        out
    }

    /// Paths of all text leaves in document order
    pub fn text_paths(&self) -> Vec<Path> {
        self.descendants()
            .into_iter()
            .filter(|(_, node)| node.is_text())
            .map(|(path, _)| path)
            .collect()
    }

    /// First text leaf at or below `path`
    pub fn first_text_path(&self, path: &Path) -> Option<Path> {
        let mut current = path.clone();
        loop {
            match self.node(&current)? {
                Node::Text(_) => return Some(current),
                Node::Element(el) if el.children.is_empty() => return None,
                Node::Element(_) => current = current.child(0),
            }
        }
    }

    /// Last text leaf at or below `path`
    pub fn last_text_path(&self, path: &Path) -> Option<Path> {
        let mut current = path.clone();
        loop {
            match self.node(&current)? {
                Node::Text(_) => return Some(current),
                Node::Element(el) if el.children.is_empty() => return None,
                Node::Element(el) => current = current.child(el.children.len() - 1),
            }
        }
    }
}

fn collect_descendants<'a>(node: &'a Node, path: Path, out: &mut Vec<(Path, &'a Node)>) {
    out.push((path.clone(), node));
    if let Node::Element(el) = node {
        for (index, child) in el.children.iter().enumerate() {
            collect_descendants(child, path.child(index), out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::registry::ElementType;
    use serde_json::json;

    fn sample() -> Document {
        Document::from_value(json!([
            { "type": "paragraph", "children": [{ "text": "one" }] },
            { "type": "bulleted-list", "children": [
                { "type": "list-item", "children": [{ "text": "a" }] },
                { "type": "list-item", "children": [{ "text": "b" }] }
            ]},
            { "type": "paragraph", "children": [{ "text": "three" }] }
        ]))
        .unwrap()
    }

    #[test]
    fn test_empty_root_is_repaired() {
        let doc = Document::from_json("[]").unwrap();
        assert_eq!(doc.children, vec![Node::empty_paragraph()]);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = Document::from_json("[{ \"type\": ").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { .. }));
    }

    #[test]
    fn test_shape_error_is_reported() {
        let err = Document::from_json(r#"[{ "children": [] }]"#).unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }

    #[test]
    fn test_lookup_by_path() {
        let doc = sample();
        let item = doc.element(&Path::new(vec![1, 1])).unwrap();
        assert_eq!(item.kind, ElementType::ListItem);
        assert_eq!(item.text_content(), "b");
        assert!(doc.node(&Path::new(vec![1, 5])).is_none());
        assert!(doc.node(&Path::root()).is_none());
    }

    #[test]
    fn test_move_node_swaps_siblings() {
        let mut doc = sample();
        assert!(doc.move_node(&Path::new(vec![1, 1]), &Path::new(vec![1, 0])));
        let list = doc.element(&Path::new(vec![1])).unwrap();
        assert_eq!(list.children[0].text_content(), "b");
        assert_eq!(list.children[1].text_content(), "a");
    }

    #[test]
    fn test_move_node_rejects_cross_parent_moves() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(!doc.move_node(&Path::new(vec![0]), &Path::new(vec![1, 0])));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_text_paths_in_document_order() {
        let doc = sample();
        assert_eq!(
            doc.text_paths(),
            vec![
                Path::new(vec![0, 0]),
                Path::new(vec![1, 0, 0]),
                Path::new(vec![1, 1, 0]),
                Path::new(vec![2, 0]),
            ]
        );
        assert_eq!(
            doc.last_text_path(&Path::new(vec![1])),
            Some(Path::new(vec![1, 1, 0]))
        );
    }

    #[test]
    fn test_save_is_verbatim() {
        let doc = sample();
        let reloaded = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, doc);
    }
}
