//! Text Anchoring Library
//!
//! Core algorithms for attaching annotations to locations in XHTML content
//! documents so they can be stored and re-resolved later.
//!
//! # Modules
//!
//! - `dom`: Arena-backed document tree, XHTML fragment parsing, ranges
//! - `anchoring`: Text positions and ranges relative to a container element
//! - `offsets`: Offset translation between related strings, offset-to-range resolution
//! - `rendered`: Visually rendered text and raw/rendered offset maps
//! - `trim`: Shrinking ranges onto non-whitespace text
//! - `cfi`: EPUB Canonical Fragment Identifier ordering
//! - `selectors`: W3C Web Annotation selector wire types

pub mod anchoring;
pub mod cfi;
pub mod dom;
pub mod error;
pub mod offsets;
pub mod rendered;
pub mod selectors;
pub mod trim;

pub use error::{AnchorError, Result};
