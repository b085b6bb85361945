//! Comment removal for Swift source text.
//!
//! The core of the tool: a single-pass, byte-driven state machine that
//! copies code and string/regex literals through verbatim while eliding
//! line comments, nested block comments, and the `# …` comments inside
//! free-spacing extended regex literals. Layout is normalized as
//! comments are dropped: trailing blanks before a removed comment are
//! trimmed, and lines that held nothing but a comment disappear.
//!
//! `strip` is pure and total — malformed or truncated input still
//! produces best-effort output. Callers that care can use
//! `strip_with_outcome` to learn whether the input ended mid-construct.
mod machine;
mod oracle;

use machine::Machine;

/// Result of a strip pass: the output text plus whether the input ended
/// in a clean lexical state (not inside a string, block comment, regex,
/// or interpolation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    pub text: String,
    pub complete: bool,
}

/// Remove all comments from `source`, preserving every other byte in
/// order apart from the layout trims described in the module docs.
pub fn strip(source: &str) -> String {
    strip_with_outcome(source).text
}

/// Like [`strip`], but also reports whether the input terminated
/// cleanly. Truncated input (e.g. an unclosed block comment or string)
/// yields `complete == false`; the text is still the best-effort result.
pub fn strip_with_outcome(source: &str) -> StripOutcome {
    let (bytes, complete) = Machine::new(source).run();
    // Every elision is delimited by ASCII bytes, so the buffer is still
    // valid UTF-8; the lossy path is unreachable in practice.
    let text = String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
    StripOutcome { text, complete }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
