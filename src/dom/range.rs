//! Document ranges
//!
//! A [`DomRange`] is a pair of boundary points over a [`Document`] arena,
//! mirroring the browser `Range`: each point is a node plus an offset that
//! counts characters within a text node, or children within an element.
//!
//! No ordering is enforced between the two points. An inverted range is
//! representable; extracting its text yields the empty string.

use super::types::{char_slice, Document, NodeId};
use crate::error::{AnchorError, Result};

/// A boundary point: a node and an offset within it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// The container node
    pub node: NodeId,
    /// Character offset for text nodes, child index for elements
    pub offset: usize,
}

impl Point {
    /// Create a boundary point
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A region of a document between two boundary points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    /// Start boundary
    pub start: Point,
    /// End boundary
    pub end: Point,
}

impl DomRange {
    /// Create a range between two boundary points
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create an empty range with both boundaries at the same point
    pub fn collapsed(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// True if the range's boundaries coincide
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Deepest node containing both boundary points
    pub fn common_ancestor(&self, doc: &Document) -> NodeId {
        let mut ancestors = Vec::new();
        let mut current = Some(self.start.node);
        while let Some(n) = current {
            ancestors.push(n);
            current = doc.parent(n);
        }

        let mut current = Some(self.end.node);
        while let Some(n) = current {
            if ancestors.contains(&n) {
                return n;
            }
            current = doc.parent(n);
        }

        // Both points live in the same arena, so the chains always meet at
        // the document root.
        doc.root()
    }

    /// The raw text between the boundary points
    ///
    /// Equivalent to `Range.toString()`: the document's text content sliced
    /// between the two points. An inverted range yields an empty string.
    pub fn text(&self, doc: &Document) -> Result<String> {
        let root = doc.root();
        let start = global_offset(doc, root, self.start)?;
        let end = global_offset(doc, root, self.end)?;
        if end <= start {
            return Ok(String::new());
        }
        Ok(char_slice(&doc.text_content(root), start, end).to_string())
    }
}

/// Convert a boundary point to a character offset within `root`'s text
pub(crate) fn global_offset(doc: &Document, root: NodeId, point: Point) -> Result<usize> {
    let base = doc
        .text_offset_of(root, point.node)
        .ok_or(AnchorError::NotAnAncestor)?;
    if doc.is_text(point.node) {
        if point.offset > doc.text_len(point.node) {
            return Err(AnchorError::TextOffsetOutOfRange);
        }
        Ok(base + point.offset)
    } else {
        let children = doc.children(point.node);
        if point.offset > children.len() {
            return Err(AnchorError::ChildOffsetOutOfRange);
        }
        let before: usize = children[..point.offset]
            .iter()
            .map(|&c| doc.text_len(c))
            .sum();
        Ok(base + before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let doc = Document::from_xml("<p>foo<em>bar</em></p><div>baz</div>").unwrap();
        let p = doc.children(doc.root())[0];
        let div = doc.children(doc.root())[1];
        (doc, p, div)
    }

    #[test]
    fn test_text_between_text_node_points() {
        let (doc, p, div) = sample();
        let foo = doc.children(p)[0];
        let baz = doc.children(div)[0];

        let range = DomRange::new(Point::new(foo, 1), Point::new(baz, 2));
        assert_eq!(range.text(&doc).unwrap(), "oobarba");
    }

    #[test]
    fn test_text_with_element_points() {
        let (doc, p, _) = sample();
        // Whole <p>: children 0..2
        let range = DomRange::new(Point::new(p, 0), Point::new(p, 2));
        assert_eq!(range.text(&doc).unwrap(), "foobar");
    }

    #[test]
    fn test_inverted_range_text_is_empty() {
        let (doc, p, _) = sample();
        let foo = doc.children(p)[0];
        let range = DomRange::new(Point::new(foo, 3), Point::new(foo, 1));
        assert_eq!(range.text(&doc).unwrap(), "");
        assert!(!range.is_collapsed());
    }

    #[test]
    fn test_collapsed_range() {
        let (doc, p, _) = sample();
        let foo = doc.children(p)[0];
        let range = DomRange::collapsed(Point::new(foo, 2));
        assert!(range.is_collapsed());
        assert_eq!(range.text(&doc).unwrap(), "");
    }

    #[test]
    fn test_common_ancestor() {
        let (doc, p, div) = sample();
        let foo = doc.children(p)[0];
        let em = doc.children(p)[1];
        let bar = doc.children(em)[0];
        let baz = doc.children(div)[0];

        let within_p = DomRange::new(Point::new(foo, 0), Point::new(bar, 1));
        assert_eq!(within_p.common_ancestor(&doc), p);

        let across = DomRange::new(Point::new(foo, 0), Point::new(baz, 1));
        assert_eq!(across.common_ancestor(&doc), doc.root());

        let same_node = DomRange::new(Point::new(bar, 0), Point::new(bar, 2));
        assert_eq!(same_node.common_ancestor(&doc), bar);
    }

    #[test]
    fn test_global_offset_validation() {
        let (doc, p, _) = sample();
        let foo = doc.children(p)[0];

        let past_text = DomRange::collapsed(Point::new(foo, 10));
        assert_eq!(
            past_text.text(&doc),
            Err(AnchorError::TextOffsetOutOfRange)
        );

        let past_children = DomRange::collapsed(Point::new(p, 5));
        assert_eq!(
            past_children.text(&doc),
            Err(AnchorError::ChildOffsetOutOfRange)
        );
    }
}
