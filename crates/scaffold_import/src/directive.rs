//! Locating `@include` directives in a CSS buffer.

use std::ops::Range;

/// A located `@include '<path>';` occurrence.
///
/// Transient: discovered, consumed, and discarded per resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Byte span of the full directive text, quote to semicolon inclusive.
    pub span: Range<usize>,
    /// The path string between the quotes, as written.
    pub target: String,
}

/// Finds the first well-formed `@include` directive in a buffer.
///
/// Accepts single or double quotes: `@include 'path';` or
/// `@include "path";`. The semicolon must immediately follow the closing
/// quote. Malformed occurrences of `@include` are skipped, not errors;
/// they are left in the buffer untouched.
pub fn find_directive(src: &str) -> Option<Directive> {
    const KEYWORD: &str = "@include";
    let bytes = src.as_bytes();
    let mut search_from = 0;

    while let Some(found) = src[search_from..].find(KEYWORD) {
        let start = search_from + found;
        search_from = start + 1;

        let mut i = start + KEYWORD.len();
        let ws_start = i;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i == ws_start || i >= bytes.len() {
            continue;
        }

        let quote = bytes[i];
        if quote != b'\'' && quote != b'"' {
            continue;
        }
        i += 1;

        let target_start = i;
        while i < bytes.len() && bytes[i] != b'\'' && bytes[i] != b'"' {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != quote || i == target_start {
            continue;
        }
        let target = src[target_start..i].to_string();
        i += 1;

        if i >= bytes.len() || bytes[i] != b';' {
            continue;
        }

        return Some(Directive {
            span: start..i + 1,
            target,
        });
    }

    None
}
