//! Selector types following the W3C Web Annotation format
//!
//! An anchored region of a document is described by several selectors at
//! once; when one fails to resolve (the document changed, an offset map is
//! stale), the next is tried. The serialized form is compatible with the
//! W3C Web Annotation Data Model.
//!
//! Reference: <https://www.w3.org/TR/annotation-model/#selectors>

use serde::{Deserialize, Serialize};

/// Selector types for identifying text and positions
/// Multiple selectors provide fallback options for resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Selector {
    /// Quoted text with surrounding context
    #[serde(rename = "TextQuoteSelector")]
    TextQuote {
        /// The exact text of the selection
        exact: String,
        /// Text immediately before the selection
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        /// Text immediately after the selection
        #[serde(skip_serializing_if = "Option::is_none")]
        suffix: Option<String>,
    },
    /// Character offsets into the document text
    #[serde(rename = "TextPositionSelector")]
    TextPosition {
        /// Start character offset
        start: usize,
        /// End character offset
        end: usize,
    },
    /// Serialized boundary points of a range, for same-session restore
    #[serde(rename = "RangeSelector")]
    Range {
        /// Path to the element containing the range start
        #[serde(rename = "startContainer")]
        start_container: String,
        /// Character offset within the start container
        #[serde(rename = "startOffset")]
        start_offset: usize,
        /// Path to the element containing the range end
        #[serde(rename = "endContainer")]
        end_container: String,
        /// Character offset within the end container
        #[serde(rename = "endOffset")]
        end_offset: usize,
    },
    /// The EPUB content document the selection lives in
    #[serde(rename = "EPUBContentSelector")]
    EpubContent {
        /// CFI of the content document within the publication
        #[serde(skip_serializing_if = "Option::is_none")]
        cfi: Option<String>,
        /// URL of the content document
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        /// Human-readable title, e.g. the chapter name
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// A page of a paginated document
    #[serde(rename = "PageSelector")]
    Page {
        /// Zero-based page index
        index: usize,
        /// Page label as printed, which need not be numeric
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl Selector {
    /// The quoted text, if this is a quote selector
    pub fn exact(&self) -> Option<&str> {
        match self {
            Selector::TextQuote { exact, .. } => Some(exact.as_str()),
            _ => None,
        }
    }

    /// The text offsets, if this is a position selector
    pub fn offsets(&self) -> Option<(usize, usize)> {
        match self {
            Selector::TextPosition { start, end } => Some((*start, *end)),
            _ => None,
        }
    }

    /// The content document CFI, if this is an EPUB content selector
    pub fn cfi(&self) -> Option<&str> {
        match self {
            Selector::EpubContent { cfi, .. } => cfi.as_deref(),
            _ => None,
        }
    }
}

/// The primary text quote among `selectors`, if any
pub fn text_quote(selectors: &[Selector]) -> Option<&str> {
    selectors.iter().find_map(|s| s.exact())
}

/// The primary text position among `selectors`, if any
pub fn text_position(selectors: &[Selector]) -> Option<(usize, usize)> {
    selectors.iter().find_map(|s| s.offsets())
}
