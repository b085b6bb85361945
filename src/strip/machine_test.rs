use super::*;

// --- line_has_code_before ---

#[test]
fn code_before_cursor_on_same_line() {
    let src = b"let x = 1 ";
    assert!(line_has_code_before(src, src.len()));
}

#[test]
fn only_blanks_before_cursor() {
    assert!(!line_has_code_before(b"    ", 4));
    assert!(!line_has_code_before(b"\t\t", 2));
}

#[test]
fn scan_stops_at_previous_newline() {
    assert!(!line_has_code_before(b"code\n   ", 8));
    assert!(line_has_code_before(b"\ncode ", 6));
}

#[test]
fn start_of_input_counts_as_blank() {
    assert!(!line_has_code_before(b"anything", 0));
}

#[test]
fn carriage_return_counts_as_code() {
    // Only spaces and tabs are line blanks; a stray \r is content.
    assert!(line_has_code_before(b"\r", 1));
}

// --- Machine terminal state ---

fn run(src: &str) -> (String, bool) {
    let (bytes, clean) = Machine::new(src).run();
    (String::from_utf8(bytes).unwrap(), clean)
}

#[test]
fn clean_after_plain_code() {
    let (out, clean) = run("let a = 1\n");
    assert_eq!(out, "let a = 1\n");
    assert!(clean);
}

#[test]
fn clean_when_input_ends_inside_line_comment() {
    // A trailing line comment is a complete construct.
    let (out, clean) = run("let a = 1 // tail");
    assert_eq!(out, "let a = 1");
    assert!(clean);
}

#[test]
fn dirty_when_input_ends_inside_block_comment() {
    let (_, clean) = run("/* open");
    assert!(!clean);
}

#[test]
fn dirty_when_input_ends_inside_string() {
    let (_, clean) = run("let s = \"open");
    assert!(!clean);
}

#[test]
fn dirty_when_input_ends_inside_regex() {
    let (_, clean) = run("let r = /open");
    assert!(!clean);
}

#[test]
fn dirty_when_interpolation_frame_left_on_stack() {
    let (_, clean) = run("let s = \"\\(1 + 2");
    assert!(!clean);
}

#[test]
fn stray_closers_inside_interpolation_do_not_panic() {
    // Unbalanced `]` and `}` saturate; the `)` still closes the frame.
    let (out, clean) = run("let s = \"\\(a]})\"");
    assert_eq!(out, "let s = \"\\(a]})\"");
    assert!(clean);
}
