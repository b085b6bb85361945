/// Division-vs-regex disambiguation for a bare `/`.
///
/// A `/` in code position is ambiguous: `a / b` is division while
/// `let r = /\d+/` opens a regex literal. This module classifies the
/// cursor position heuristically from the bytes already consumed. The
/// heuristic is the contract — callers must not second-guess it, and it
/// is deliberately not a parser.

/// Significant bytes after which a `/` is taken to open a regex.
/// Operators and openers, i.e. positions where an operand is expected.
const REGEX_PRECEDING: &[u8] = b"=(,[:{!&|^+-*%<>~;";

/// Keywords after which an operand (and therefore a regex) may follow.
const REGEX_KEYWORDS: &[&str] = &["return", "where"];

/// Decide whether a `/` at `cursor` begins a regex literal.
///
/// Scans backward over ASCII whitespace to the previous significant
/// byte. Returns `true` at start of input, after an operator or opening
/// bracket, or after a bare `return`/`where` keyword. Everything else
/// (identifiers, literals, closing brackets) reads as division, so
/// `foo / bar`, `a[k] / 2`, and `x() / y` keep their slashes.
pub(crate) fn is_regex_context(src: &[u8], cursor: usize) -> bool {
    let mut pos = cursor;
    while pos > 0 && src[pos - 1].is_ascii_whitespace() {
        pos -= 1;
    }
    if pos == 0 {
        return true;
    }

    if REGEX_PRECEDING.contains(&src[pos - 1]) {
        return true;
    }

    for keyword in REGEX_KEYWORDS {
        let kb = keyword.as_bytes();
        if pos >= kb.len() && &src[pos - kb.len()..pos] == kb {
            let start = pos - kb.len();
            if start == 0 || !src[start - 1].is_ascii_alphanumeric() {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
#[path = "oracle_test.rs"]
mod tests;
