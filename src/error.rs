//! Anchoring error types
//!
//! Unified error handling for position resolution, range construction and
//! document parsing.

use thiserror::Error;

/// Unified anchoring error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// A character offset points past the end of an element's text
    #[error("Offset exceeds text length")]
    OffsetExceedsTextLength,

    /// Start offset outside the text of the root element
    #[error("Invalid start offset")]
    InvalidStartOffset,

    /// End offset outside the text of the root element
    #[error("Invalid end offset")]
    InvalidEndOffset,

    /// Offset within a text node is larger than the node's text
    #[error("Text node offset is out of range")]
    TextOffsetOutOfRange,

    /// Child offset within an element is larger than its child count
    #[error("Child node offset is out of range")]
    ChildOffsetOutOfRange,

    /// A boundary point refers to a node that is neither an element nor text
    #[error("Point is not in an element or text node")]
    InvalidPoint,

    /// The given element does not contain the position's element
    #[error("Parent is not an ancestor of current element")]
    NotAnAncestor,

    /// A child node was appended to a node that cannot have children
    #[error("Node is not an element")]
    NotAnElement,

    /// A range to be trimmed holds only whitespace
    #[error("Range contains no non-whitespace text")]
    EmptyTrimRange,

    /// No usable text node found while trimming a range boundary
    #[error("No text nodes with non-whitespace text found in range")]
    NoTextInRange,

    /// A trim operation requires text-node boundaries
    #[error("Range boundary is not a text node")]
    BoundaryNotText,

    /// Failed to parse document markup
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for anchoring operations
pub type Result<T> = std::result::Result<T, AnchorError>;

impl From<quick_xml::Error> for AnchorError {
    fn from(err: quick_xml::Error) -> Self {
        AnchorError::Parse(err.to_string())
    }
}
