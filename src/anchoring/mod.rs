//! Position-based anchors
//!
//! [`TextPosition`] and [`TextRange`] describe document locations as
//! character offsets relative to an element, which keeps them stable
//! across DOM mutations that leave text content unchanged. Both resolve
//! to concrete text-node boundary points on demand.

mod text_position;
mod text_range;

pub use text_position::{ResolveDirection, TextPosition};
pub use text_range::TextRange;

pub(crate) use text_position::resolve_offsets;
