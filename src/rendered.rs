//! Rendered text composition
//!
//! `textContent` concatenates the text of block-level elements with no
//! separator, but a browser visually separates them with line breaks. Any
//! offset arithmetic done against `textContent` therefore disagrees with
//! what the user actually selected on screen. This module computes the
//! text as rendered — a single space at block boundaries and `<br>`
//! elements, whitespace runs collapsed — together with offset maps between
//! the raw and rendered forms.

use crate::dom::{char_len, char_slice, global_offset, DomRange, Document, NodeId};
use crate::error::Result;
use crate::offsets::translate_offsets;

/// Tags that browsers lay out as blocks, separating their content visually
/// from surrounding text.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Append a separator space, unless the output is empty or already ends
/// with one.
fn push_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

/// Collapse all whitespace runs (including newlines) to single spaces and
/// trim the ends.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }
    out
}

/// Compute the text a browser would visually present for a range
///
/// Text nodes contribute their text, clipped to the range. A single space
/// is emitted before and after the content of each block-level element
/// intersecting the range, and for each `<br>` inside it. The result has
/// its whitespace runs collapsed and its ends trimmed.
pub fn rendered_text_from_range(doc: &Document, range: &DomRange) -> Result<String> {
    let ancestor = range.common_ancestor(doc);
    // A range inside a single text node has that node as its ancestor;
    // walk from the enclosing element so block context still applies.
    let root = if doc.is_element(ancestor) {
        ancestor
    } else {
        doc.parent(ancestor).unwrap_or(doc.root())
    };

    let start = global_offset(doc, root, range.start)?;
    let end = global_offset(doc, root, range.end)?;
    if end <= start {
        return Ok(String::new());
    }

    let mut out = String::new();
    let mut cursor = 0;
    for &child in doc.children(root) {
        walk(doc, child, &mut cursor, start, end, &mut out);
    }
    Ok(collapse_whitespace(&out))
}

fn walk(
    doc: &Document,
    node: NodeId,
    cursor: &mut usize,
    start: usize,
    end: usize,
    out: &mut String,
) {
    if let Some(data) = doc.text_data(node) {
        let len = char_len(data);
        let lo = (*cursor).max(start);
        let hi = (*cursor + len).min(end);
        if hi > lo {
            out.push_str(char_slice(data, lo - *cursor, hi - *cursor));
        }
        *cursor += len;
        return;
    }

    let Some(tag) = doc.tag(node) else {
        // Comments have no text and no layout effect.
        return;
    };

    let len = doc.text_len(node);
    let node_start = *cursor;
    let node_end = *cursor + len;
    // Mirrors Range.cloneContents(): only nodes intersecting the range end
    // up in the cloned fragment. Empty elements count when they sit at a
    // position covered by the range.
    let intersects = if len == 0 {
        start <= node_start && node_start < end
    } else {
        node_start < end && node_end > start
    };
    if !intersects {
        *cursor += len;
        return;
    }

    if tag == "br" {
        push_space(out);
        *cursor += len;
        return;
    }

    let block = is_block_tag(tag);
    if block {
        push_space(out);
    }
    for &child in doc.children(node) {
        walk(doc, child, cursor, start, end, out);
    }
    if block {
        push_space(out);
    }
}

/// Rendered text of a container plus bidirectional offset maps
///
/// Produced by [`rendered_text_with_offsets`]; holds both the raw
/// (`textContent`) and rendered forms of the container's text and converts
/// offsets between them. The map reflects the document state at the time
/// it was computed — recompute after mutating the document.
#[derive(Debug, Clone)]
pub struct RenderedTextMap {
    raw: String,
    text: String,
}

impl RenderedTextMap {
    /// The whitespace-collapsed, block-boundary-spaced rendered text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map an offset in the raw text to the rendered text
    ///
    /// Offset 0 always maps to the rendered start.
    pub fn to_rendered(&self, raw_offset: usize) -> usize {
        if raw_offset == 0 {
            return 0;
        }
        translate_offsets(&self.raw, &self.text, 0, raw_offset, |ch| {
            !ch.is_whitespace()
        })
        .1
    }

    /// Map an offset in the rendered text back to the raw text
    ///
    /// Offset 0 always maps to the raw start, even when the raw text has
    /// leading whitespace.
    pub fn to_raw(&self, rendered_offset: usize) -> usize {
        if rendered_offset == 0 {
            return 0;
        }
        translate_offsets(&self.text, &self.raw, 0, rendered_offset, |ch| {
            !ch.is_whitespace()
        })
        .1
    }
}

/// Compute the rendered text for an entire container element along with
/// raw-to-rendered and rendered-to-raw offset maps
pub fn rendered_text_with_offsets(doc: &Document, container: NodeId) -> Result<RenderedTextMap> {
    let range = DomRange::new(
        crate::dom::Point::new(container, 0),
        crate::dom::Point::new(container, doc.children(container).len()),
    );
    let text = rendered_text_from_range(doc, &range)?;
    Ok(RenderedTextMap {
        raw: doc.text_content(container),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Point;

    fn full_range(doc: &Document, container: NodeId) -> DomRange {
        DomRange::new(
            Point::new(container, 0),
            Point::new(container, doc.children(container).len()),
        )
    }

    #[test]
    fn test_blocks_and_br_render_as_spaces() {
        let doc = Document::from_xml("<p>foo<br/>bar</p><div>baz</div>").unwrap();
        let range = full_range(&doc, doc.root());
        assert_eq!(
            rendered_text_from_range(&doc, &range).unwrap(),
            "foo bar baz"
        );
    }

    #[test]
    fn test_inline_elements_do_not_separate() {
        let doc = Document::from_xml("<p>foo<em>bar</em>baz</p>").unwrap();
        let range = full_range(&doc, doc.root());
        assert_eq!(rendered_text_from_range(&doc, &range).unwrap(), "foobarbaz");
    }

    #[test]
    fn test_nested_blocks_no_doubled_spaces() {
        let doc = Document::from_xml("<div><p>a</p><p>b</p></div>").unwrap();
        let range = full_range(&doc, doc.root());
        assert_eq!(rendered_text_from_range(&doc, &range).unwrap(), "a b");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let doc = Document::from_xml("<p>foo\n   bar</p>").unwrap();
        let range = full_range(&doc, doc.root());
        assert_eq!(rendered_text_from_range(&doc, &range).unwrap(), "foo bar");
    }

    #[test]
    fn test_no_leading_or_trailing_space() {
        let doc = Document::from_xml("<br/><p>foo</p><br/>").unwrap();
        let range = full_range(&doc, doc.root());
        assert_eq!(rendered_text_from_range(&doc, &range).unwrap(), "foo");
    }

    #[test]
    fn test_partial_range_clips_text() {
        let doc = Document::from_xml("<p>foo</p><p>bar</p>").unwrap();
        let p1 = doc.children(doc.root())[0];
        let p2 = doc.children(doc.root())[1];
        let foo = doc.children(p1)[0];
        let bar = doc.children(p2)[0];

        let range = DomRange::new(Point::new(foo, 1), Point::new(bar, 2));
        assert_eq!(rendered_text_from_range(&doc, &range).unwrap(), "oo ba");
    }

    #[test]
    fn test_range_within_single_text_node() {
        let doc = Document::from_xml("<p>foobar</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let text = doc.children(p)[0];
        let range = DomRange::new(Point::new(text, 1), Point::new(text, 4));
        assert_eq!(rendered_text_from_range(&doc, &range).unwrap(), "oob");
    }

    #[test]
    fn test_collapsed_range_renders_empty() {
        let doc = Document::from_xml("<p>foo</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let text = doc.children(p)[0];
        let range = DomRange::collapsed(Point::new(text, 1));
        assert_eq!(rendered_text_from_range(&doc, &range).unwrap(), "");
    }

    #[test]
    fn test_offset_map_boundary_maps_both_ways() {
        // Raw "foo\nbar" renders as "foo bar"; the boundary at offset 3
        // maps consistently in both directions.
        let doc = Document::from_xml("<p>foo\nbar</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let map = rendered_text_with_offsets(&doc, p).unwrap();

        assert_eq!(map.text(), "foo bar");
        assert_eq!(map.to_rendered(3), 3);
        assert_eq!(map.to_raw(3), 3);
        assert_eq!(map.to_rendered(7), 7);
        assert_eq!(map.to_raw(7), 7);
    }

    #[test]
    fn test_offset_map_block_boundaries() {
        let doc = Document::from_xml("<p>foo</p><p>bar</p>").unwrap();
        let map = rendered_text_with_offsets(&doc, doc.root()).unwrap();

        assert_eq!(map.text(), "foo bar");
        // Raw "foobar": offset 3 (boundary) and 4 ('a').
        assert_eq!(map.to_rendered(3), 3);
        assert_eq!(map.to_rendered(4), 5);
        // Rendered offset 5 is after 'b'.
        assert_eq!(map.to_raw(5), 4);
        assert_eq!(map.to_rendered(6), 7);
    }

    #[test]
    fn test_offset_map_clamps_to_start() {
        let doc = Document::from_xml("<p>  foo</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let map = rendered_text_with_offsets(&doc, p).unwrap();

        assert_eq!(map.text(), "foo");
        assert_eq!(map.to_raw(0), 0);
        assert_eq!(map.to_rendered(0), 0);
    }

    #[test]
    fn test_offset_map_full_length() {
        let doc = Document::from_xml("<p>foo\nbar</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let map = rendered_text_with_offsets(&doc, p).unwrap();

        let raw_len = doc.text_len(p);
        assert_eq!(map.to_rendered(raw_len), map.text().chars().count());
    }

    #[test]
    fn test_empty_container() {
        let doc = Document::from_xml("<p/>").unwrap();
        let p = doc.children(doc.root())[0];
        let map = rendered_text_with_offsets(&doc, p).unwrap();
        assert_eq!(map.text(), "");
        assert_eq!(map.to_rendered(5), 0);
        assert_eq!(map.to_raw(5), 0);
    }
}
