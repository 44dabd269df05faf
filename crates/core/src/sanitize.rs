//! Inbound text sanitation.
//!
//! Every free-text field crossing the API boundary passes through [`clean`]
//! before validation or persistence, so comparisons (duplicate listings,
//! email lookups) operate on canonical strings.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Characters stripped from inbound text: zero-width space/joiners
/// (U+200B..U+200D), the word joiner (U+2060), and the no-break space
/// (U+00A0).
const INVISIBLE: &[char] = &[
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{00A0}',
];

/// Upload filenames keep only ASCII word characters, dots, and dashes.
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("valid regex"));

/// Canonicalize a free-text input.
///
/// Applies Unicode NFKC normalization, removes invisible characters, and
/// trims surrounding whitespace.
pub fn clean(input: &str) -> String {
    input
        .nfkc()
        .filter(|c| !INVISIBLE.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitize an uploaded filename for storage.
///
/// Replaces every character outside `[A-Za-z0-9_.-]` with `_` and lower-cases
/// the result, matching how object paths are compared for duplicates.
pub fn safe_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS
        .replace_all(name, "_")
        .to_lowercase()
}
