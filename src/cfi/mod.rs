//! EPUB Canonical Fragment Identifiers
//!
//! CFIs locate content within an EPUB publication as a `/`-delimited
//! sequence of integer steps, optionally carrying `[...]` assertions and a
//! `!` step indirection into a content document, e.g.
//! `/6/14[chap05ref]!/4/2/1:42`.
//!
//! This module treats CFIs as opaque strings and provides just what
//! annotation ordering needs: stripping assertions, slicing off the part
//! after the first indirection, and a total order over the remaining step
//! sequence. Annotation threads are sorted by chapter with [`compare_cfis`]
//! before falling back to in-chapter text position (owned by the caller).
//!
//! Reference: <https://idpf.org/epub/linking/cfi/>

mod assertions;
mod comparator;

pub use assertions::{document_cfi, split_cfi_range, strip_cfi_assertions};
pub use comparator::{cfi_in_range, compare_cfis};
