//! XHTML fragment parsing
//!
//! Builds a [`Document`] arena from well-formed XHTML/XML markup using
//! quick-xml. EPUB content documents are XHTML, so the strict XML parser is
//! the right tool here; this is not a forgiving HTML5 parser.
//!
//! The markup is treated as a fragment: it may contain several top-level
//! nodes, which are placed under a synthetic `body` root element.
//! Whitespace-only text nodes are kept, since rendered-text composition
//! depends on them. Attributes are not stored; nothing in the anchoring
//! core reads them.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::types::{Document, NodeId};
use crate::error::{AnchorError, Result};

pub(crate) fn parse_fragment(markup: &str) -> Result<Document> {
    let mut doc = Document::new("body");
    let mut stack: Vec<NodeId> = vec![doc.root()];

    // Default reader config: text is not trimmed, so whitespace-only
    // nodes survive parsing.
    let mut reader = Reader::from_str(markup);

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
                let element = doc.create_element(&tag);
                let parent = *stack.last().ok_or_else(unbalanced)?;
                doc.append_child(parent, element)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
                let element = doc.create_element(&tag);
                let parent = *stack.last().ok_or_else(unbalanced)?;
                doc.append_child(parent, element)?;
            }
            Event::End(_) => {
                if stack.len() <= 1 {
                    return Err(unbalanced());
                }
                stack.pop();
            }
            Event::Text(text) => {
                let data = text.unescape()?;
                if !data.is_empty() {
                    let node = doc.create_text(&data);
                    let parent = *stack.last().ok_or_else(unbalanced)?;
                    doc.append_child(parent, node)?;
                }
            }
            Event::CData(cdata) => {
                let data = String::from_utf8_lossy(&cdata.into_inner()).to_string();
                if !data.is_empty() {
                    let node = doc.create_text(&data);
                    let parent = *stack.last().ok_or_else(unbalanced)?;
                    doc.append_child(parent, node)?;
                }
            }
            Event::Comment(comment) => {
                let data = String::from_utf8_lossy(&comment.into_inner()).to_string();
                let node = doc.create_comment(&data);
                let parent = *stack.last().ok_or_else(unbalanced)?;
                doc.append_child(parent, node)?;
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {
                tracing::trace!("skipping non-content markup event");
            }
            Event::Eof => break,
        }
    }

    if stack.len() != 1 {
        return Err(unbalanced());
    }

    tracing::debug!(
        text_len = doc.text_len(doc.root()),
        "parsed markup fragment"
    );
    Ok(doc)
}

fn unbalanced() -> AnchorError {
    AnchorError::Parse("unbalanced element tags".to_string())
}

impl Document {
    /// Parse an XHTML/XML fragment into a document
    ///
    /// The fragment's nodes become children of a synthetic `body` root.
    pub fn from_xml(markup: &str) -> Result<Self> {
        parse_fragment(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_fragment() {
        let doc = Document::from_xml("<p>foo<em>bar</em></p>").unwrap();
        assert_eq!(doc.tag(doc.root()), Some("body"));
        assert_eq!(doc.text_content(doc.root()), "foobar");

        let p = doc.children(doc.root())[0];
        assert_eq!(doc.tag(p), Some("p"));
        assert_eq!(doc.children(p).len(), 2);
    }

    #[test]
    fn test_parse_multiple_top_level_nodes() {
        let doc = Document::from_xml("<p>foo</p><div>bar</div>baz").unwrap();
        assert_eq!(doc.children(doc.root()).len(), 3);
        assert_eq!(doc.text_content(doc.root()), "foobarbaz");
    }

    #[test]
    fn test_parse_keeps_whitespace_text_nodes() {
        let doc = Document::from_xml("<p>foo</p>\n  <p>bar</p>").unwrap();
        let children = doc.children(doc.root());
        assert_eq!(children.len(), 3);
        assert_eq!(doc.text_data(children[1]), Some("\n  "));
    }

    #[test]
    fn test_parse_self_closing_and_entities() {
        let doc = Document::from_xml("<p>a&amp;b<br/>c</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "a&bc");
        assert_eq!(doc.tag(doc.children(p)[1]), Some("br"));
    }

    #[test]
    fn test_parse_comment_node() {
        let doc = Document::from_xml("<p>a<!-- note -->b</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let comment = doc.children(p)[1];
        assert!(doc.is_comment(comment));
        assert_eq!(doc.text_content(p), "ab");
    }

    #[test]
    fn test_parse_normalizes_tag_case() {
        let doc = Document::from_xml("<DIV>x</DIV>").unwrap();
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.tag(div), Some("div"));
    }

    #[test]
    fn test_parse_unbalanced_markup_fails() {
        assert!(Document::from_xml("<p>foo").is_err());
        assert!(Document::from_xml("foo</p>").is_err());
    }
}
