//! Arena document model
//!
//! Documents are stored as a flat arena of nodes addressed by stable
//! [`NodeId`] handles. The arena owns all nodes; anchoring code only ever
//! borrows the document, so positions and ranges stay plain value types.
//!
//! Offsets throughout this crate count Unicode scalar values, not bytes.

use crate::error::{AnchorError, Result};

/// Stable handle to a node in a [`Document`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        parent: Option<NodeId>,
        children: Vec<NodeId>,
    },
    Text {
        data: String,
        parent: Option<NodeId>,
    },
    Comment {
        data: String,
        parent: Option<NodeId>,
    },
}

/// A parsed document tree
///
/// The root is always an element. Text and comment nodes are leaves;
/// comments contribute nothing to text content or text offsets.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

const NO_CHILDREN: &[NodeId] = &[];

impl Document {
    /// Create an empty document with a root element of the given tag
    pub fn new(root_tag: &str) -> Self {
        let root = NodeData::Element {
            tag: root_tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// The document's root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.push(NodeData::Text {
            data: data.to_string(),
            parent: None,
        })
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.push(NodeData::Comment {
            data: data.to_string(),
            parent: None,
        })
    }

    /// Append a detached node as the last child of an element
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        match &mut self.nodes[parent.0] {
            NodeData::Element { children, .. } => children.push(child),
            _ => return Err(AnchorError::NotAnElement),
        }
        match &mut self.nodes[child.0] {
            NodeData::Element { parent: p, .. }
            | NodeData::Text { parent: p, .. }
            | NodeData::Comment { parent: p, .. } => *p = Some(parent),
        }
        Ok(())
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    /// True if the node is an element
    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0], NodeData::Element { .. })
    }

    /// True if the node is a text node
    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0], NodeData::Text { .. })
    }

    /// True if the node is a comment
    pub fn is_comment(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0], NodeData::Comment { .. })
    }

    /// Lowercased tag name, if the node is an element
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0] {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// The character data of a text node
    pub fn text_data(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0] {
            NodeData::Text { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The character data of a comment node
    pub fn comment_data(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0] {
            NodeData::Comment { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The node's parent element, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        match &self.nodes[node.0] {
            NodeData::Element { parent, .. }
            | NodeData::Text { parent, .. }
            | NodeData::Comment { parent, .. } => *parent,
        }
    }

    /// Child nodes in document order (empty for leaves)
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match &self.nodes[node.0] {
            NodeData::Element { children, .. } => children,
            _ => NO_CHILDREN,
        }
    }

    /// True if `node` is `ancestor` or a descendant of it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Combined character count of all text nodes under `node`
    ///
    /// Comments contribute nothing, matching `textContent` semantics on a
    /// parent element.
    pub fn text_len(&self, node: NodeId) -> usize {
        match &self.nodes[node.0] {
            NodeData::Text { data, .. } => char_len(data),
            NodeData::Comment { .. } => 0,
            NodeData::Element { children, .. } => {
                children.iter().map(|&c| self.text_len(c)).sum()
            }
        }
    }

    /// Concatenated text of all text nodes under `node`
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0] {
            NodeData::Text { data, .. } => out.push_str(data),
            NodeData::Comment { .. } => {}
            NodeData::Element { children, .. } => {
                for &child in children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// All text nodes under `root` in document order
    pub fn text_nodes(&self, root: NodeId) -> Vec<NodeId> {
        self.pre_order(root)
            .into_iter()
            .filter(|&n| self.is_text(n))
            .collect()
    }

    /// Total text length of all previous siblings of `node`
    pub fn previous_siblings_text_length(&self, node: NodeId) -> usize {
        let Some(parent) = self.parent(node) else {
            return 0;
        };
        self.children(parent)
            .iter()
            .take_while(|&&sibling| sibling != node)
            .map(|&sibling| self.text_len(sibling))
            .sum()
    }

    /// First text node after `node` in document order, including `node`'s
    /// own descendants
    pub fn next_text_node(&self, node: NodeId) -> Option<NodeId> {
        let order = self.pre_order(self.root);
        let pos = order.iter().position(|&n| n == node)?;
        order[pos + 1..].iter().copied().find(|&n| self.is_text(n))
    }

    /// Last text node before `node` in document order
    pub fn previous_text_node(&self, node: NodeId) -> Option<NodeId> {
        let order = self.pre_order(self.root);
        let pos = order.iter().position(|&n| n == node)?;
        order[..pos].iter().copied().rev().find(|&n| self.is_text(n))
    }

    /// Character offset of the start of `node` within `root`'s text content
    ///
    /// Returns `None` if `root` does not contain `node`.
    pub(crate) fn text_offset_of(&self, root: NodeId, node: NodeId) -> Option<usize> {
        if !self.contains(root, node) {
            return None;
        }
        let mut current = node;
        let mut offset = 0;
        while current != root {
            offset += self.previous_siblings_text_length(current);
            current = self.parent(current)?;
        }
        Some(offset)
    }

    fn pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            order.push(node);
            for &child in self.children(node).iter().rev() {
                stack.push(child);
            }
        }
        order
    }
}

/// Character count of a string (Unicode scalar values)
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Slice a string by character offsets, clamping at the string's end
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if end <= start {
        return "";
    }
    let byte_at = |n: usize| {
        s.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(s.len())
    };
    &s[byte_at(start)..byte_at(end)]
}
