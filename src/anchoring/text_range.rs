//! Regions of a document as pairs of text positions
//!
//! A [`TextRange`] describes a region by its start and end [`TextPosition`].
//! Because both ends are character offsets rather than node references into
//! specific text nodes, the range survives DOM changes that do not affect
//! text content (e.g. wrapping part of the text in a highlight element).
//!
//! No ordering is enforced between `start` and `end`. Converting an
//! inverted range produces a [`DomRange`] whose start point lies after its
//! end point; extracting text from such a range yields an empty string.

use crate::dom::{DomRange, Document, NodeId, Point};
use crate::error::Result;

use super::text_position::{resolve_offsets, ResolveDirection, TextPosition};

/// A region of a document as a (start, end) pair of text positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    /// Start of the region
    pub start: TextPosition,
    /// End of the region
    pub end: TextPosition,
}

impl TextRange {
    /// Create a range between two positions
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// Create a range covering the `start`th to `end`th characters of
    /// `root`'s text
    pub fn from_offsets(root: NodeId, start: usize, end: usize) -> Self {
        Self::new(TextPosition::new(root, start), TextPosition::new(root, end))
    }

    /// Return a copy of this range with both positions relative to an
    /// ancestor element
    pub fn relative_to(&self, doc: &Document, element: NodeId) -> Result<TextRange> {
        Ok(TextRange::new(
            self.start.relative_to(doc, element)?,
            self.end.relative_to(doc, element)?,
        ))
    }

    /// Resolve this range to a [`DomRange`]
    ///
    /// The resulting range always starts and ends inside text nodes, so
    /// `TextRange::from_range(doc, &range)?.to_range(doc)?` can be used to
    /// shrink a range to the text it contains.
    ///
    /// Fails if either position cannot be resolved against the current
    /// document state; callers treat this as "anchoring failed" and
    /// recover with a fallback selector.
    pub fn to_range(&self, doc: &Document) -> Result<DomRange> {
        let (start, end) = if self.start.element == self.end.element
            && self.start.offset <= self.end.offset
        {
            // Fast path for start and end points in the same element.
            let resolved = resolve_offsets(
                doc,
                self.start.element,
                &[self.start.offset, self.end.offset],
            )?;
            (resolved[0], resolved[1])
        } else {
            (
                self.start
                    .resolve_with_fallback(doc, ResolveDirection::Forwards)?,
                self.end
                    .resolve_with_fallback(doc, ResolveDirection::Backwards)?,
            )
        };

        Ok(DomRange::new(
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
        ))
    }

    /// Create a text range from a [`DomRange`]'s boundary points
    pub fn from_range(doc: &Document, range: &DomRange) -> Result<TextRange> {
        let start = TextPosition::from_point(doc, range.start.node, range.start.offset)?;
        let end = TextPosition::from_point(doc, range.end.node, range.end.offset)?;
        Ok(TextRange::new(start, end))
    }
}
