//! CFI assertion stripping
//!
//! Assertions are `[...]` enclosed sections that act as validity checks on
//! the steps they follow but do not affect sort order. The circumflex (`^`)
//! is the CFI escape character: `^[` and `^]` inside an assertion do not
//! open or close it.

/// Stripping state. The escape state remembers whether it was entered from
/// inside an assertion, so an escaped bracket there cannot terminate the
/// assertion early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Escaped { in_assertion: bool },
    InAssertion,
}

/// Strip assertions from a Canonical Fragment Identifier
///
/// ```
/// use text_anchor::cfi::strip_cfi_assertions;
///
/// assert_eq!(strip_cfi_assertions("/6/14[chap05ref]"), "/6/14");
/// ```
pub fn strip_cfi_assertions(cfi: &str) -> String {
    // Fast path for CFIs with no assertions.
    if !cfi.contains('[') {
        return cfi.to_string();
    }

    let mut result = String::with_capacity(cfi.len());
    let mut state = State::Normal;

    for ch in cfi.chars() {
        state = match state {
            State::Normal => match ch {
                '^' => State::Escaped {
                    in_assertion: false,
                },
                '[' => State::InAssertion,
                _ => {
                    result.push(ch);
                    State::Normal
                }
            },
            State::Escaped { in_assertion: false } => {
                result.push(ch);
                State::Normal
            }
            State::Escaped { in_assertion: true } => State::InAssertion,
            State::InAssertion => match ch {
                '^' => State::Escaped { in_assertion: true },
                ']' => State::Normal,
                _ => State::InAssertion,
            },
        };
    }

    result
}

/// The slice of `cfi` up to the first step indirection (`!`), with
/// assertions removed
///
/// A typical CFI holds a path to a content document, an indirection, then
/// a path within that document; this keeps only the content document path.
///
/// ```
/// use text_anchor::cfi::document_cfi;
///
/// assert_eq!(document_cfi("/6/152[;vnd.idref=ch13]!/4/2[sec1]"), "/6/152");
/// ```
pub fn document_cfi(cfi: &str) -> String {
    let stripped = strip_cfi_assertions(cfi);
    match stripped.find('!') {
        Some(index) => stripped[..index].to_string(),
        None => stripped,
    }
}

/// Split a hyphen-separated CFI range into its start and end
///
/// Assertions are stripped in the process. A `range` without a hyphen
/// yields an empty range whose end equals its start.
pub fn split_cfi_range(range: &str) -> (String, String) {
    let stripped = strip_cfi_assertions(range);
    match stripped.split_once('-') {
        Some((start, end)) => (start.to_string(), end.to_string()),
        None => (stripped.clone(), stripped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_no_assertions_fast_path() {
        assert_eq!(strip_cfi_assertions("/2/4/6"), "/2/4/6");
    }

    #[test]
    fn test_strip_simple_assertion() {
        assert_eq!(strip_cfi_assertions("/6/14[chap05ref]"), "/6/14");
        assert_eq!(strip_cfi_assertions("/2/4[a]/6[b]"), "/2/4/6");
    }

    #[test]
    fn test_strip_escaped_bracket_inside_assertion() {
        assert_eq!(
            strip_cfi_assertions("/1/2[chap4^[ignoreme^]ref]"),
            "/1/2"
        );
    }

    #[test]
    fn test_strip_escaped_character_outside_assertion() {
        // The escape is dropped, the escaped character kept.
        assert_eq!(strip_cfi_assertions("/2^[/4[x]"), "/2[/4");
    }

    #[test]
    fn test_document_cfi_slices_at_indirection() {
        assert_eq!(document_cfi("/6/14[chap05ref]!/4/2/1:42"), "/6/14");
        assert_eq!(document_cfi("/6/14"), "/6/14");
    }

    #[test]
    fn test_split_cfi_range() {
        assert_eq!(
            split_cfi_range("/2/4[chap-02]-/2/6[chap-03]"),
            ("/2/4".to_string(), "/2/6".to_string())
        );
        assert_eq!(
            split_cfi_range("/2/4"),
            ("/2/4".to_string(), "/2/4".to_string())
        );
    }
}
