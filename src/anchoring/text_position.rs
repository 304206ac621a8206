//! Character offsets into an element's text
//!
//! A [`TextPosition`] survives DOM mutations that do not change text
//! content: it records only an element handle and a character offset into
//! that element's concatenated text. Resolution walks the element's text
//! nodes on demand.

use crate::dom::{char_len, Document, NodeId};
use crate::error::{AnchorError, Result};

/// Which way to look for an adjacent text node when resolving a position
/// at offset 0 inside an element with no text of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveDirection {
    /// Use the next text node in document order
    Forwards,
    /// Use the previous text node in document order
    Backwards,
}

/// Resolve ascending character offsets within an element to
/// (text node, offset) pairs in a single walk.
///
/// Offsets at the boundary between two nodes resolve to the start of the
/// node that begins at the boundary, except at the very end of the
/// element's text, where the last text node is used.
pub(crate) fn resolve_offsets(
    doc: &Document,
    element: NodeId,
    offsets: &[usize],
) -> Result<Vec<(NodeId, usize)>> {
    let nodes = doc.text_nodes(element);
    let mut results = Vec::with_capacity(offsets.len());
    let mut pending = offsets.iter().copied().peekable();

    let mut index = 0;
    let mut length = 0;
    let mut last_node = None;

    while let Some(&offset) = pending.peek() {
        if index >= nodes.len() {
            break;
        }
        let node = nodes[index];
        let node_len = char_len(doc.text_data(node).unwrap_or(""));
        last_node = Some(node);
        if length + node_len > offset {
            results.push((node, offset - length));
            pending.next();
        } else {
            length += node_len;
            index += 1;
        }
    }

    // Boundary case: an offset that points at the very end of the text
    // resolves to the end of the last text node.
    while let Some(&offset) = pending.peek() {
        match last_node {
            Some(node) if length == offset => {
                results.push((node, char_len(doc.text_data(node).unwrap_or(""))));
                pending.next();
            }
            _ => break,
        }
    }

    if pending.peek().is_some() {
        return Err(AnchorError::OffsetExceedsTextLength);
    }
    Ok(results)
}

/// An offset within the text content of an element
///
/// Immutable value type; `relative_to` and `resolve` return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
    /// Element the offset is relative to (not owned)
    pub element: NodeId,
    /// Character offset from the start of the element's text content
    pub offset: usize,
}

impl TextPosition {
    /// Create a position at `offset` characters into `element`'s text
    pub fn new(element: NodeId, offset: usize) -> Self {
        Self { element, offset }
    }

    /// Return a copy of this position with its offset relative to an
    /// ancestor element
    pub fn relative_to(&self, doc: &Document, parent: NodeId) -> Result<TextPosition> {
        if !doc.contains(parent, self.element) {
            return Err(AnchorError::NotAnAncestor);
        }

        let mut element = self.element;
        let mut offset = self.offset;
        while element != parent {
            offset += doc.previous_siblings_text_length(element);
            element = doc.parent(element).ok_or(AnchorError::NotAnAncestor)?;
        }

        Ok(TextPosition::new(element, offset))
    }

    /// Resolve the position to a specific text node and offset within it
    ///
    /// Fails with [`AnchorError::OffsetExceedsTextLength`] if the offset
    /// points past the end of the element's text.
    pub fn resolve(&self, doc: &Document) -> Result<(NodeId, usize)> {
        let mut resolved = resolve_offsets(doc, self.element, &[self.offset])?;
        Ok(resolved.remove(0))
    }

    /// Resolve, falling back to the nearest text node in `direction` when
    /// the element has no text of its own and the offset is 0
    pub fn resolve_with_fallback(
        &self,
        doc: &Document,
        direction: ResolveDirection,
    ) -> Result<(NodeId, usize)> {
        match self.resolve(doc) {
            Ok(point) => Ok(point),
            Err(err) if self.offset == 0 => {
                let text = match direction {
                    ResolveDirection::Forwards => doc.next_text_node(self.element),
                    ResolveDirection::Backwards => doc.previous_text_node(self.element),
                };
                match text {
                    Some(node) => {
                        tracing::debug!(
                            ?direction,
                            "empty element position fell back to adjacent text node"
                        );
                        let offset = match direction {
                            ResolveDirection::Forwards => 0,
                            ResolveDirection::Backwards => {
                                char_len(doc.text_data(node).unwrap_or(""))
                            }
                        };
                        Ok((node, offset))
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Construct a position referring to the `offset`th character within
    /// `node`, which may be a text node or an element
    pub fn from_char_offset(doc: &Document, node: NodeId, offset: usize) -> Result<TextPosition> {
        if doc.is_text(node) {
            TextPosition::from_point(doc, node, offset)
        } else if doc.is_element(node) {
            Ok(TextPosition::new(node, offset))
        } else {
            Err(AnchorError::InvalidPoint)
        }
    }

    /// Construct a position from a native boundary point (node, offset),
    /// as found in a [`crate::dom::DomRange`]
    pub fn from_point(doc: &Document, node: NodeId, offset: usize) -> Result<TextPosition> {
        if doc.is_text(node) {
            if offset > doc.text_len(node) {
                return Err(AnchorError::TextOffsetOutOfRange);
            }
            let parent = doc.parent(node).ok_or(AnchorError::InvalidPoint)?;
            let text_offset = doc.previous_siblings_text_length(node) + offset;
            Ok(TextPosition::new(parent, text_offset))
        } else if doc.is_element(node) {
            let children = doc.children(node);
            if offset > children.len() {
                return Err(AnchorError::ChildOffsetOutOfRange);
            }
            let text_offset = children[..offset].iter().map(|&c| doc.text_len(c)).sum();
            Ok(TextPosition::new(node, text_offset))
        } else {
            Err(AnchorError::InvalidPoint)
        }
    }
}
