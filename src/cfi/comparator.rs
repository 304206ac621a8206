//! CFI comparison and ordering
//!
//! Implements the sorting rules from
//! <https://idpf.org/epub/linking/cfi/#sec-sorting> for the portion of a
//! CFI up to the first step indirection, which is what orders annotations
//! by chapter.

use std::cmp::Ordering;

use super::assertions::document_cfi;

/// A single step of a CFI path. Steps should always be integers; malformed
/// steps fall back to string comparison rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Number(i64),
    Text(String),
}

fn parse_steps(cfi: &str) -> Vec<Step> {
    document_cfi(cfi)
        .split('/')
        .map(|step| match step.parse::<i64>() {
            Ok(n) => Step::Number(n),
            Err(_) => Step::Text(step.to_string()),
        })
        .collect()
}

/// Lexicographic tuple comparison over step sequences. On an unresolved
/// tie with different lengths, the shorter sequence sorts first.
fn compare_steps(a: &[Step], b: &[Step]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = match (x, y) {
            (Step::Number(m), Step::Number(n)) => m.cmp(n),
            (Step::Text(s), Step::Text(t)) => s.cmp(t),
            // Numbers sort before malformed string steps.
            (Step::Number(_), Step::Text(_)) => Ordering::Less,
            (Step::Text(_), Step::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Compare two Canonical Fragment Identifiers
///
/// Only the part of each CFI up to the first step indirection (`!`) is
/// considered, and assertions are ignored. Steps compare as integers, so
/// `/2/10` sorts after `/2/3`.
///
/// ```
/// use std::cmp::Ordering;
/// use text_anchor::cfi::compare_cfis;
///
/// assert_eq!(compare_cfis("/2/3[chap3ref]", "/2/10[chap10ref]"), Ordering::Less);
/// ```
pub fn compare_cfis(a: &str, b: &str) -> Ordering {
    compare_steps(&parse_steps(a), &parse_steps(b))
}

/// True if `cfi` lies in the range `[start, end)`
///
/// Like [`compare_cfis`], only the pre-indirection document path is
/// considered.
pub fn cfi_in_range(cfi: &str, start: &str, end: &str) -> bool {
    compare_cfis(cfi, start) != Ordering::Less && compare_cfis(cfi, end) == Ordering::Less
}
