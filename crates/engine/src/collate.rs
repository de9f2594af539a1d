//! Locale-aware text comparison used to sort labels and descriptions.
//!
//! Strings are compared on a primary key first (NFKD-decomposed, combining
//! marks stripped, lowercased), so `"éclair"` sorts next to `"eclair"` and
//! `"apple"` before `"Banana"`. Equal primary keys fall back to the raw
//! strings so the ordering stays total.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

pub(crate) fn collation_key(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out
}

/// Compares two strings the way a user-facing list expects.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| b.cmp(a))
}

/// Case-insensitive, accent-sensitive substring test.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
