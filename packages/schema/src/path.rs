//! Root-relative node addresses.
//!
//! A [`Path`] is only valid for the tree it was computed against. Any
//! structural edit at an ancestor or preceding sibling shifts it, so callers
//! re-derive paths after every mutation instead of caching them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence of child indices from the root
///
/// Ordering is document order: an ancestor sorts before its descendants and
/// earlier siblings before later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The empty path (the document root itself)
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Index within the parent
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(Path(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    /// Following sibling (may not exist in the tree)
    pub fn next(&self) -> Option<Path> {
        let last = self.last()?;
        self.with_last(last + 1)
    }

    /// Preceding sibling; `None` at index 0
    pub fn previous(&self) -> Option<Path> {
        let last = self.last()?;
        last.checked_sub(1).and_then(|i| self.with_last(i))
    }

    fn with_last(&self, index: usize) -> Option<Path> {
        let mut indices = self.0.clone();
        *indices.last_mut()? = index;
        Some(Path(indices))
    }

    /// True if `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Strict ancestors, outermost first (root excluded)
    pub fn ancestors(&self) -> Vec<Path> {
        (1..self.0.len()).map(|n| Path(self.0[..n].to_vec())).collect()
    }

    /// The top-level ancestor-or-self
    pub fn top_level(&self) -> Option<Path> {
        self.0.first().map(|first| Path(vec![*first]))
    }

    /// Same path with `prefix` swapped for `replacement`, if `prefix` matches
    pub fn rebase(&self, prefix: &Path, replacement: &Path) -> Option<Path> {
        let rest = self.0.strip_prefix(prefix.as_slice())?;
        let mut indices = replacement.0.clone();
        indices.extend_from_slice(rest);
        Some(Path(indices))
    }

    /// Where this path points after the node at `removed` is taken out.
    /// `None` when the removed node is this node or one of its ancestors.
    pub fn after_removal(&self, removed: &Path) -> Option<Path> {
        if removed == self || removed.is_ancestor_of(self) {
            return None;
        }
        let mut indices = self.0.clone();
        if let (Some(parent), Some(index)) = (removed.parent(), removed.last()) {
            let depth = parent.len();
            if indices.len() > depth && indices.starts_with(parent.as_slice()) && indices[depth] > index {
                indices[depth] -= 1;
            }
        }
        Some(Path(indices))
    }

    /// Where this path points after a node is inserted at `inserted`
    pub fn after_insertion(&self, inserted: &Path) -> Path {
        let mut indices = self.0.clone();
        if let (Some(parent), Some(index)) = (inserted.parent(), inserted.last()) {
            let depth = parent.len();
            if indices.len() > depth && indices.starts_with(parent.as_slice()) && indices[depth] >= index {
                indices[depth] += 1;
            }
        }
        Path(indices)
    }

    /// Where this path points after the node at `from` moves to `to`
    /// (`to` being the final position, as in `Document::move_node`)
    pub fn after_move(&self, from: &Path, to: &Path) -> Path {
        if let Some(moved) = self.rebase(from, to) {
            return moved;
        }
        match self.after_removal(from) {
            Some(path) => path.after_insertion(to),
            None => self.clone(),
        }
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Path(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Path(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_siblings() {
        let path = Path::new(vec![0, 2]);
        assert_eq!(path.next(), Some(Path::new(vec![0, 3])));
        assert_eq!(path.previous(), Some(Path::new(vec![0, 1])));
        assert_eq!(Path::new(vec![0, 0]).previous(), None);
        assert_eq!(Path::root().next(), None);
    }

    #[test]
    fn test_document_order() {
        let mut paths = vec![
            Path::new(vec![1]),
            Path::new(vec![0, 1]),
            Path::new(vec![0]),
            Path::new(vec![0, 0, 3]),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                Path::new(vec![0]),
                Path::new(vec![0, 0, 3]),
                Path::new(vec![0, 1]),
                Path::new(vec![1]),
            ]
        );
    }

    #[test]
    fn test_ancestry() {
        let path = Path::new(vec![1, 0, 2]);
        assert_eq!(
            path.ancestors(),
            vec![Path::new(vec![1]), Path::new(vec![1, 0])]
        );
        assert!(Path::new(vec![1]).is_ancestor_of(&path));
        assert!(!path.is_ancestor_of(&path));
        assert_eq!(path.top_level(), Some(Path::new(vec![1])));
    }

    #[test]
    fn test_transform_through_removal() {
        let removed = Path::new(vec![1]);
        assert_eq!(
            Path::new(vec![2, 0]).after_removal(&removed),
            Some(Path::new(vec![1, 0]))
        );
        assert_eq!(
            Path::new(vec![0, 3]).after_removal(&removed),
            Some(Path::new(vec![0, 3]))
        );
        assert_eq!(Path::new(vec![1, 0]).after_removal(&removed), None);
    }

    #[test]
    fn test_transform_through_insertion() {
        let inserted = Path::new(vec![0, 1]);
        assert_eq!(
            Path::new(vec![0, 1, 0]).after_insertion(&inserted),
            Path::new(vec![0, 2, 0])
        );
        assert_eq!(
            Path::new(vec![0, 0, 4]).after_insertion(&inserted),
            Path::new(vec![0, 0, 4])
        );
        assert_eq!(
            Path::new(vec![1]).after_insertion(&inserted),
            Path::new(vec![1])
        );
    }

    #[test]
    fn test_transform_through_sibling_swap() {
        // Moving [3] to [2] swaps the two siblings
        let from = Path::new(vec![3]);
        let to = Path::new(vec![2]);
        assert_eq!(Path::new(vec![3, 0]).after_move(&from, &to), Path::new(vec![2, 0]));
        assert_eq!(Path::new(vec![2, 1]).after_move(&from, &to), Path::new(vec![3, 1]));
        assert_eq!(Path::new(vec![0]).after_move(&from, &to), Path::new(vec![0]));
    }
}
