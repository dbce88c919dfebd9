//! Caret and range positions.

use proseline_schema::Path;
use serde::{Deserialize, Serialize};

/// A position inside a text leaf
///
/// `offset` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }
}

/// Anchor/focus pair; the anchor is where the selection started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Collapsed selection (a caret)
    pub fn caret(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Earlier of the two points in document order
    pub fn start(&self) -> &Point {
        if self.focus < self.anchor {
            &self.focus
        } else {
            &self.anchor
        }
    }

    pub fn end(&self) -> &Point {
        if self.focus < self.anchor {
            &self.anchor
        } else {
            &self.focus
        }
    }

    pub(crate) fn map_points(&self, mut f: impl FnMut(&Point) -> Option<Point>) -> Option<Selection> {
        Some(Selection {
            anchor: f(&self.anchor)?,
            focus: f(&self.focus)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_selection_orders_points() {
        let selection = Selection::new(Point::new(vec![1, 0], 2), Point::new(vec![0, 0], 4));
        assert_eq!(selection.start(), &Point::new(vec![0, 0], 4));
        assert_eq!(selection.end(), &Point::new(vec![1, 0], 2));
        assert!(!selection.is_collapsed());
    }

    #[test]
    fn test_same_leaf_orders_by_offset() {
        let selection = Selection::new(Point::new(vec![0, 0], 5), Point::new(vec![0, 0], 1));
        assert_eq!(selection.start().offset, 1);
        assert_eq!(selection.end().offset, 5);
    }

    #[test]
    fn test_caret_is_collapsed() {
        assert!(Selection::caret(Point::new(vec![0, 0], 0)).is_collapsed());
    }
}
