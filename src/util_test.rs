use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::*;

// --- read_source ---

#[test]
fn read_source_utf8() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all("let a = 1 // c\n".as_bytes()).unwrap();
    tmp.flush().unwrap();

    match read_source(tmp.path()).unwrap() {
        SourceText::Utf8(text) => assert_eq!(text, "let a = 1 // c\n"),
        other => panic!("expected Utf8, got {other:?}"),
    }
}

#[test]
fn read_source_binary() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"hello\x00world").unwrap();
    tmp.flush().unwrap();

    assert!(matches!(
        read_source(tmp.path()).unwrap(),
        SourceText::Binary
    ));
}

#[test]
fn read_source_invalid_utf8() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();
    tmp.flush().unwrap();

    assert!(matches!(
        read_source(tmp.path()).unwrap(),
        SourceText::NotUtf8
    ));
}

#[test]
fn read_source_missing_file_is_io_error() {
    assert!(read_source(Path::new("/nonexistent/nope.swift")).is_err());
}

// --- format_size ---

#[test]
fn format_size_units() {
    assert_eq!(format_size(0), "0.00 B");
    assert_eq!(format_size(512), "512.00 B");
    assert_eq!(format_size(2048), "2.00 KB");
    assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
}

// --- newline_count ---

#[test]
fn newline_count_basic() {
    assert_eq!(newline_count(""), 0);
    assert_eq!(newline_count("no newline"), 0);
    assert_eq!(newline_count("a\nb\nc\n"), 3);
}

// --- flat_name ---

#[test]
fn flat_name_joins_components() {
    assert_eq!(flat_name(Path::new("Models/User.swift")), "Models_User.swift");
    assert_eq!(
        flat_name(Path::new("Sources/App/Main.swift")),
        "Sources_App_Main.swift"
    );
}

#[test]
fn flat_name_single_component() {
    assert_eq!(flat_name(Path::new("Main.swift")), "Main.swift");
}

// --- percent_saved ---

#[test]
fn percent_saved_basic() {
    assert_eq!(percent_saved(100, 75), 25.0);
    assert_eq!(percent_saved(100, 100), 0.0);
}

#[test]
fn percent_saved_empty_input() {
    assert_eq!(percent_saved(0, 0), 0.0);
}
