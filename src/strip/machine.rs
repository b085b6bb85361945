/// Byte-driven state machine for comment removal.
///
/// Implements the per-state transition logic for Swift's lexical
/// contexts: line and nested block comments, cooked and raw strings,
/// multi-line strings, string interpolation, and regex literals.
/// Driven by `mod.rs`, which owns the public entry points.
use super::oracle;

/// The active lexical context. String variants carry the delimiter
/// attributes needed to recognize their own close (`hashes` for raw
/// delimiters, `quotes` for multi-line openers); `Interpolation`
/// carries the bracket depths needed to find its matching `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Mode {
    Normal,
    LineComment,
    BlockComment {
        depth: usize,
    },
    Str {
        hashes: usize,
    },
    StrEscape {
        hashes: usize,
    },
    Multiline {
        hashes: usize,
        quotes: usize,
    },
    MultilineEscape {
        hashes: usize,
        quotes: usize,
    },
    Regex,
    ExtendedRegex {
        hashes: usize,
    },
    Interpolation {
        parens: usize,
        braces: usize,
        brackets: usize,
    },
}

/// Scan backward from `pos` to the previous newline (or start of input)
/// and report whether the line carries anything besides spaces and tabs.
/// Looks at the source, not the output, so bytes already elided by an
/// earlier comment on the same line still count.
pub(super) fn line_has_code_before(src: &[u8], pos: usize) -> bool {
    for &b in src[..pos].iter().rev() {
        match b {
            b'\n' => return false,
            b' ' | b'\t' => {}
            _ => return true,
        }
    }
    false
}

/// The transducer: consumes `src` left to right, appending non-comment
/// bytes to `out`. All delimiter triggers are 7-bit ASCII, so multi-byte
/// UTF-8 sequences pass through untouched via the verbatim fallthrough.
pub(super) struct Machine<'a> {
    src: &'a [u8],
    i: usize,
    out: Vec<u8>,
    mode: Mode,
    /// Saved enclosing contexts: the string frame interrupted by `\(`,
    /// and the interpolation frame interrupted by a nested string,
    /// regex, or comment.
    stack: Vec<Mode>,
    /// Whether the line holding the most recent comment opener had any
    /// code before it. Decides if that line's newline survives.
    line_had_code: bool,
}

impl<'a> Machine<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            i: 0,
            out: Vec::with_capacity(source.len()),
            mode: Mode::Normal,
            stack: Vec::new(),
            line_had_code: false,
        }
    }

    /// Run to end of input. Returns the output bytes and whether the
    /// machine ended in a clean state (anything else means the input
    /// was truncated mid-construct).
    pub(super) fn run(mut self) -> (Vec<u8>, bool) {
        while self.i < self.src.len() {
            match self.mode {
                Mode::Normal | Mode::Interpolation { .. } => self.step_code(),
                Mode::LineComment => self.step_line_comment(),
                Mode::BlockComment { depth } => self.step_block_comment(depth),
                Mode::Str { hashes } => self.step_string(hashes, 1, false),
                Mode::Multiline { hashes, quotes } => self.step_string(hashes, quotes, true),
                Mode::StrEscape { hashes } => {
                    self.emit_current();
                    self.mode = Mode::Str { hashes };
                }
                Mode::MultilineEscape { hashes, quotes } => {
                    self.emit_current();
                    self.mode = Mode::Multiline { hashes, quotes };
                }
                Mode::Regex => self.step_regex(),
                Mode::ExtendedRegex { hashes } => self.step_extended_regex(hashes),
            }
        }
        let clean = self.stack.is_empty() && matches!(self.mode, Mode::Normal | Mode::LineComment);
        (self.out, clean)
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.src.get(self.i + offset).copied()
    }

    /// Length of the run of `byte` starting at `from`.
    fn run_len(&self, byte: u8, from: usize) -> usize {
        let from = from.min(self.src.len());
        self.src[from..].iter().take_while(|&&b| b == byte).count()
    }

    fn emit_current(&mut self) {
        self.out.push(self.src[self.i]);
        self.i += 1;
    }

    fn emit_repeat(&mut self, byte: u8, count: usize) {
        self.out.resize(self.out.len() + count, byte);
    }

    /// Pop spaces and tabs already emitted for the current output line.
    fn trim_trailing_blanks(&mut self) {
        while matches!(self.out.last(), Some(&(b' ' | b'\t'))) {
            self.out.pop();
        }
    }

    /// Save the live interpolation frame before entering a nested
    /// context (string, regex, or comment) that will need to restore it.
    fn push_if_interpolating(&mut self) {
        if let Mode::Interpolation { .. } = self.mode {
            self.stack.push(self.mode);
        }
    }

    /// The mode to resume after a comment, regex, or string closes:
    /// the interrupted interpolation frame if one was saved, else normal.
    fn resume_code(&mut self) -> Mode {
        if let Some(m @ Mode::Interpolation { .. }) = self.stack.last().copied() {
            self.stack.pop();
            m
        } else {
            Mode::Normal
        }
    }

    /// Normal and interpolation share one dispatch; interpolation
    /// additionally balances `()[]{}` to find its terminating `)`.
    fn step_code(&mut self) {
        let b = self.src[self.i];
        let next = self.peek(1);

        if b == b'/' && next == Some(b'/') {
            self.open_comment(Mode::LineComment);
            self.i += 2;
            return;
        }
        if b == b'/' && next == Some(b'*') {
            self.open_comment(Mode::BlockComment { depth: 1 });
            self.i += 2;
            return;
        }

        // A hash run opens a raw string or an extended regex depending
        // on the byte after the last hash; otherwise the hash is an
        // ordinary code byte.
        if b == b'#' {
            let hashes = self.run_len(b'#', self.i);
            match self.src.get(self.i + hashes).copied() {
                Some(b'"') => {
                    let quotes = self.run_len(b'"', self.i + hashes);
                    self.open_string(hashes, quotes);
                    return;
                }
                Some(b'/') if oracle::is_regex_context(self.src, self.i) => {
                    self.push_if_interpolating();
                    self.mode = Mode::ExtendedRegex { hashes };
                    self.emit_repeat(b'#', hashes);
                    self.out.push(b'/');
                    self.i += hashes + 1;
                    return;
                }
                _ => {}
            }
        }

        if b == b'"' {
            let quotes = self.run_len(b'"', self.i);
            self.open_string(0, quotes);
            return;
        }

        if b == b'/' && oracle::is_regex_context(self.src, self.i) {
            self.push_if_interpolating();
            self.mode = Mode::Regex;
            self.emit_current();
            return;
        }

        self.out.push(b);
        self.i += 1;

        if let Mode::Interpolation {
            parens,
            braces,
            brackets,
        } = self.mode
        {
            self.balance_interpolation(b, parens, braces, brackets);
        }
    }

    /// Track bracket depths inside `\(…)`. A `)` that brings all three
    /// to zero is the interpolation's own terminator; the enclosing
    /// string frame is restored from the stack. Stray closers saturate
    /// at zero rather than wrapping on malformed input.
    fn balance_interpolation(&mut self, b: u8, parens: usize, braces: usize, brackets: usize) {
        let (mut parens, mut braces, mut brackets) = (parens, braces, brackets);
        match b {
            b'(' => parens += 1,
            b'{' => braces += 1,
            b'[' => brackets += 1,
            b'}' => braces = braces.saturating_sub(1),
            b']' => brackets = brackets.saturating_sub(1),
            b')' => {
                parens = parens.saturating_sub(1);
                if parens == 0 && braces == 0 && brackets == 0 {
                    self.mode = self.stack.pop().unwrap_or(Mode::Normal);
                    return;
                }
            }
            _ => {}
        }
        self.mode = Mode::Interpolation {
            parens,
            braces,
            brackets,
        };
    }

    /// Shared entry for both comment kinds: trim the trailing blanks
    /// already emitted, record whether the line had code (consulted when
    /// the comment ends), and save any interpolation frame.
    fn open_comment(&mut self, comment: Mode) {
        self.trim_trailing_blanks();
        self.line_had_code = line_has_code_before(self.src, self.i);
        self.push_if_interpolating();
        self.mode = comment;
    }

    /// Enter a string literal, emitting its opener verbatim. Three or
    /// more quotes open a multi-line string whose close must repeat the
    /// full quote run; fewer open a plain string closed by one quote.
    fn open_string(&mut self, hashes: usize, quotes: usize) {
        self.push_if_interpolating();
        let opener_quotes = if quotes >= 3 {
            self.mode = Mode::Multiline { hashes, quotes };
            quotes
        } else {
            self.mode = Mode::Str { hashes };
            1
        };
        self.emit_repeat(b'#', hashes);
        self.emit_repeat(b'"', opener_quotes);
        self.i += hashes + opener_quotes;
    }

    fn step_line_comment(&mut self) {
        if self.src[self.i] == b'\n' {
            self.mode = self.resume_code();
            // Comment-only lines disappear entirely.
            if self.line_had_code {
                self.out.push(b'\n');
            }
        }
        self.i += 1;
    }

    fn step_block_comment(&mut self, depth: usize) {
        let b = self.src[self.i];
        let next = self.peek(1);
        if b == b'/' && next == Some(b'*') {
            self.mode = Mode::BlockComment { depth: depth + 1 };
            self.i += 2;
        } else if b == b'*' && next == Some(b'/') {
            self.i += 2;
            if depth <= 1 {
                self.mode = self.resume_code();
                // A comment-only line also swallows the newline that
                // immediately follows its close.
                if !self.line_had_code && self.peek(0) == Some(b'\n') {
                    self.i += 1;
                }
            } else {
                self.mode = Mode::BlockComment { depth: depth - 1 };
            }
        } else {
            self.i += 1;
        }
    }

    /// One step inside a string literal. `quotes` is the quote count the
    /// close must reach (1 for plain strings). Raw strings additionally
    /// require the opener's hash run after the quotes.
    fn step_string(&mut self, hashes: usize, quotes: usize, multiline: bool) {
        let b = self.src[self.i];

        if b == b'\\' {
            if self.peek(1) == Some(b'(') {
                self.out.extend_from_slice(b"\\(");
                self.i += 2;
                self.stack.push(self.mode);
                self.mode = Mode::Interpolation {
                    parens: 1,
                    braces: 0,
                    brackets: 0,
                };
            } else {
                self.emit_current();
                self.mode = if multiline {
                    Mode::MultilineEscape { hashes, quotes }
                } else {
                    Mode::StrEscape { hashes }
                };
            }
            return;
        }

        if b == b'"' {
            let run = self.run_len(b'"', self.i);
            let closes = run >= quotes && (hashes == 0 || self.run_len(b'#', self.i + run) >= hashes);
            if closes {
                self.emit_repeat(b'"', quotes);
                self.emit_repeat(b'#', hashes);
                self.i += quotes + hashes;
                self.mode = self.resume_code();
                return;
            }
        }

        self.emit_current();
    }

    fn step_regex(&mut self) {
        let b = self.src[self.i];
        if b == b'\\' && self.i + 1 < self.src.len() {
            self.out.push(b'\\');
            self.out.push(self.src[self.i + 1]);
            self.i += 2;
        } else if b == b'/' {
            self.emit_current();
            self.mode = self.resume_code();
        } else {
            self.emit_current();
        }
    }

    fn step_extended_regex(&mut self, hashes: usize) {
        let b = self.src[self.i];

        if b == b'/' && self.run_len(b'#', self.i + 1) >= hashes {
            self.out.push(b'/');
            self.emit_repeat(b'#', hashes);
            self.i += 1 + hashes;
            self.mode = self.resume_code();
            return;
        }

        // Free-spacing comment: drop it along with the spaces that
        // aligned it, up to but not including the newline.
        if b == b'#' {
            while self.out.last() == Some(&b' ') {
                self.out.pop();
            }
            while self.i < self.src.len() && self.src[self.i] != b'\n' {
                self.i += 1;
            }
            return;
        }

        if b == b'\\' && self.i + 1 < self.src.len() {
            self.out.push(b'\\');
            self.out.push(self.src[self.i + 1]);
            self.i += 2;
            return;
        }

        self.emit_current();
    }
}

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;
