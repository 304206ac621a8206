//! Character offset utilities
//!
//! Two independent building blocks used by the document-type integrations:
//!
//! - [`translate_offsets`] maps a character range in one string to the
//!   corresponding range in a transformed copy of it, given a filter that
//!   identifies the characters preserved by the transformation.
//! - [`to_range`] builds a [`DomRange`] directly from start/end character
//!   offsets into an element's text content, with strict bounds checks.

use crate::anchoring::resolve_offsets;
use crate::dom::{DomRange, Document, NodeId, Point};
use crate::error::{AnchorError, Result};

/// Translate a `[start, end)` character range in `input` into the
/// corresponding range in `output`.
///
/// `output` must differ from `input` only by insertion or removal of
/// characters that do _not_ match `filter` (e.g. whitespace, when `filter`
/// accepts non-whitespace). The returned range contains the same filtered
/// characters as the input range.
///
/// Where several output offsets contain the same number of filtered
/// characters, the largest valid start and the smallest valid end are
/// chosen, so the mapped boundaries land on content rather than on
/// inserted characters. Offsets past the end of `input` stop counting at
/// the string's end.
pub fn translate_offsets<F>(
    input: &str,
    output: &str,
    start: usize,
    end: usize,
    filter: F,
) -> (usize, usize)
where
    F: Fn(char) -> bool,
{
    let mut start_count = 0;
    let mut span_count = 0;
    for (i, ch) in input.chars().enumerate() {
        if i >= end {
            break;
        }
        if filter(ch) {
            if i < start {
                start_count += 1;
            } else {
                span_count += 1;
            }
        }
    }

    let output_chars: Vec<char> = output.chars().collect();

    // Find the offset in `output` with `start_count` filtered characters
    // before it.
    let mut out_start = 0;
    while start_count > 0 && out_start < output_chars.len() {
        if filter(output_chars[out_start]) {
            start_count -= 1;
        }
        out_start += 1;
    }
    // Land the start on a filtered character rather than in an inserted
    // run.
    while out_start < output_chars.len() && !filter(output_chars[out_start]) {
        out_start += 1;
    }

    // Advance by `span_count` more filtered characters to find the end.
    let mut out_end = out_start;
    while span_count > 0 && out_end < output_chars.len() {
        if filter(output_chars[out_end]) {
            span_count -= 1;
        }
        out_end += 1;
    }

    (out_start, out_end)
}

/// Build a [`DomRange`] from two character offsets into `root`'s text
/// content, in a single text-node walk.
///
/// Both offsets are validated against `[0, text length]` before anything
/// else; an out-of-bounds start or end fails with
/// [`AnchorError::InvalidStartOffset`] / [`AnchorError::InvalidEndOffset`].
/// When `end < start` the result is a well-defined collapsed range at the
/// start offset rather than an error.
pub fn to_range(doc: &Document, root: NodeId, start: usize, end: usize) -> Result<DomRange> {
    let total = doc.text_len(root);
    if start > total {
        return Err(AnchorError::InvalidStartOffset);
    }
    if end > total {
        return Err(AnchorError::InvalidEndOffset);
    }

    if total == 0 {
        // No text nodes to anchor into; collapse at the element itself.
        return Ok(DomRange::collapsed(Point::new(root, 0)));
    }

    let (lo, hi) = if end < start { (end, start) } else { (start, end) };
    let resolved = resolve_offsets(doc, root, &[lo, hi])?;

    if end < start {
        let (node, offset) = resolved[1];
        return Ok(DomRange::collapsed(Point::new(node, offset)));
    }

    Ok(DomRange::new(
        Point::new(resolved[0].0, resolved[0].1),
        Point::new(resolved[1].0, resolved[1].1),
    ))
}
