//! Document model
//!
//! An arena-based document tree with stable node handles, a strict XHTML
//! fragment parser, and a `Range` equivalent over boundary points. This is
//! the substrate the anchoring types operate on: they only ever read text
//! content, node kinds and sibling/parent relationships, and construct new
//! [`DomRange`] values.

mod parser;
mod range;
mod types;

pub use range::{DomRange, Point};
pub use types::{Document, NodeId};

pub(crate) use range::global_offset;
pub(crate) use types::{char_len, char_slice};
