//! Range trimming
//!
//! Selections made by dragging often pick up whitespace at their edges, or
//! end inside a text node that holds nothing but whitespace. [`trim_range`]
//! shrinks a range so that both boundary offsets point at non-whitespace
//! characters, moving a boundary into a neighboring text node when its own
//! node has no usable character on the required side.

use crate::dom::{char_len, DomRange, Document, NodeId, Point};
use crate::error::{AnchorError, Result};

/// From which side of a string or node sequence to evaluate: from the
/// start looking forward, or from the end looking backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FromPosition {
    Start,
    End,
}

/// Offset of the nearest non-whitespace character to `base_offset` in
/// `text`, looking in `direction`. `None` if only whitespace lies between
/// `base_offset` and the relevant end of the string.
fn trim_text_offset(text: &str, base_offset: usize, direction: FromPosition) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();

    let adjacent = match direction {
        FromPosition::Start => Some(base_offset),
        FromPosition::End => base_offset.checked_sub(1),
    };
    if let Some(i) = adjacent {
        if i < chars.len() && !chars[i].is_whitespace() {
            // base_offset is already a valid offset.
            return Some(base_offset);
        }
    }

    match direction {
        FromPosition::Start => {
            let available = &chars[base_offset.min(chars.len())..];
            available
                .iter()
                .position(|ch| !ch.is_whitespace())
                .map(|skipped| base_offset + skipped)
        }
        FromPosition::End => {
            let available = &chars[..base_offset.min(chars.len())];
            available
                .iter()
                .rposition(|ch| !ch.is_whitespace())
                .map(|last| base_offset - (available.len() - (last + 1)))
        }
    }
}

/// Find the nearest text node to `container` (exclusive) with a usable
/// non-whitespace character, walking toward `boundary` within `root`.
fn trim_text_container(
    doc: &Document,
    container: NodeId,
    boundary: NodeId,
    direction: FromPosition,
    root: NodeId,
) -> Result<(NodeId, usize)> {
    let nodes = doc.text_nodes(root);
    let position = nodes
        .iter()
        .position(|&n| n == container)
        .ok_or(AnchorError::NoTextInRange)?;

    let mut index = position;
    loop {
        match direction {
            FromPosition::Start => {
                index += 1;
                if index >= nodes.len() {
                    return Err(AnchorError::NoTextInRange);
                }
            }
            FromPosition::End => {
                if index == 0 {
                    return Err(AnchorError::NoTextInRange);
                }
                index -= 1;
            }
        }

        let node = nodes[index];
        let data = doc.text_data(node).unwrap_or("");
        let base = match direction {
            FromPosition::Start => 0,
            FromPosition::End => char_len(data),
        };
        if let Some(offset) = trim_text_offset(data, base, direction) {
            return Ok((node, offset));
        }
        if node == boundary {
            return Err(AnchorError::NoTextInRange);
        }
    }
}

/// Return a copy of `range` trimmed so that both boundary containers are
/// text nodes whose boundary offsets point at non-whitespace characters
///
/// Fails if the range contains no non-whitespace text, or if either
/// boundary is not inside a text node.
pub fn trim_range(doc: &Document, range: &DomRange) -> Result<DomRange> {
    if range.text(doc)?.trim().is_empty() {
        return Err(AnchorError::EmptyTrimRange);
    }
    if !doc.is_text(range.start.node) || !doc.is_text(range.end.node) {
        return Err(AnchorError::BoundaryNotText);
    }

    let mut trimmed = *range;

    let start_offset = trim_text_offset(
        doc.text_data(range.start.node).unwrap_or(""),
        range.start.offset,
        FromPosition::Start,
    );
    let end_offset = trim_text_offset(
        doc.text_data(range.end.node).unwrap_or(""),
        range.end.offset,
        FromPosition::End,
    );

    let mut start_trimmed = false;
    let mut end_trimmed = false;

    if let Some(offset) = start_offset {
        trimmed.start.offset = offset;
        start_trimmed = true;
    }
    // An end offset of 0 is unusable: no text in that node would remain
    // inside the range.
    if let Some(offset) = end_offset {
        if offset > 0 {
            trimmed.end.offset = offset;
            end_trimmed = true;
        }
    }

    let ancestor = range.common_ancestor(doc);

    if !start_trimmed {
        // Nothing usable between the start offset and the end of its node;
        // move the start into a following text node.
        let (node, offset) = trim_text_container(
            doc,
            trimmed.start.node,
            trimmed.end.node,
            FromPosition::Start,
            ancestor,
        )?;
        trimmed.start = Point::new(node, offset);
    }

    if !end_trimmed {
        // Nothing usable before the end offset in its node; move the end
        // into a preceding text node.
        let (node, offset) = trim_text_container(
            doc,
            trimmed.end.node,
            trimmed.start.node,
            FromPosition::End,
            ancestor,
        )?;
        trimmed.end = Point::new(node, offset);
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_text_offset_forward() {
        assert_eq!(trim_text_offset("  foo", 0, FromPosition::Start), Some(2));
        assert_eq!(trim_text_offset("foo", 0, FromPosition::Start), Some(0));
        assert_eq!(trim_text_offset("foo  ", 3, FromPosition::Start), None);
    }

    #[test]
    fn test_trim_text_offset_backward() {
        assert_eq!(trim_text_offset("foo  ", 5, FromPosition::End), Some(3));
        assert_eq!(trim_text_offset("foo", 3, FromPosition::End), Some(3));
        assert_eq!(trim_text_offset("  foo", 2, FromPosition::End), None);
        assert_eq!(trim_text_offset("foo", 0, FromPosition::End), None);
    }

    #[test]
    fn test_trim_within_boundary_nodes() {
        let doc = Document::from_xml("<p>  foo bar  </p>").unwrap();
        let p = doc.children(doc.root())[0];
        let text = doc.children(p)[0];

        let range = DomRange::new(Point::new(text, 0), Point::new(text, 11));
        let trimmed = trim_range(&doc, &range).unwrap();
        assert_eq!(trimmed.start, Point::new(text, 2));
        assert_eq!(trimmed.end, Point::new(text, 9));
        assert_eq!(trimmed.text(&doc).unwrap(), "foo bar");
    }

    #[test]
    fn test_trim_moves_start_into_next_node() {
        // Start boundary sits in a whitespace-only text node.
        let doc = Document::from_xml("<p><em>   </em>foo</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let em = doc.children(p)[0];
        let ws = doc.children(em)[0];
        let foo = doc.children(p)[1];

        let range = DomRange::new(Point::new(ws, 0), Point::new(foo, 3));
        let trimmed = trim_range(&doc, &range).unwrap();
        assert_eq!(trimmed.start, Point::new(foo, 0));
        assert_eq!(trimmed.end, Point::new(foo, 3));
    }

    #[test]
    fn test_trim_moves_end_into_previous_node() {
        let doc = Document::from_xml("<p>foo<em>   </em></p>").unwrap();
        let p = doc.children(doc.root())[0];
        let foo = doc.children(p)[0];
        let em = doc.children(p)[1];
        let ws = doc.children(em)[0];

        let range = DomRange::new(Point::new(foo, 0), Point::new(ws, 3));
        let trimmed = trim_range(&doc, &range).unwrap();
        assert_eq!(trimmed.start, Point::new(foo, 0));
        assert_eq!(trimmed.end, Point::new(foo, 3));
    }

    #[test]
    fn test_trim_whitespace_only_range_fails() {
        let doc = Document::from_xml("<p>a   b</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let text = doc.children(p)[0];

        let range = DomRange::new(Point::new(text, 1), Point::new(text, 4));
        assert_eq!(trim_range(&doc, &range), Err(AnchorError::EmptyTrimRange));
    }

    #[test]
    fn test_trim_requires_text_node_boundaries() {
        let doc = Document::from_xml("<p>foo</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let text = doc.children(p)[0];

        let range = DomRange::new(Point::new(p, 0), Point::new(text, 3));
        assert_eq!(trim_range(&doc, &range), Err(AnchorError::BoundaryNotText));
    }

    #[test]
    fn test_trim_is_noop_for_tight_range() {
        let doc = Document::from_xml("<p>foo</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let text = doc.children(p)[0];

        let range = DomRange::new(Point::new(text, 0), Point::new(text, 3));
        assert_eq!(trim_range(&doc, &range).unwrap(), range);
    }
}
