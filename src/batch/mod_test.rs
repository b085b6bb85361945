use std::fs;

use tempfile::tempdir;

use super::*;

/// Lay out a small project with nested sources and comments.
fn make_project(root: &Path) {
    fs::create_dir_all(root.join("proj/Models")).unwrap();
    fs::write(
        root.join("proj/Main.swift"),
        "// entry point\nlet app = App() // boot\n",
    )
    .unwrap();
    fs::write(
        root.join("proj/Models/User.swift"),
        "struct User {\n    /* fields */\n    let name: String\n}\n",
    )
    .unwrap();
}

#[test]
fn run_writes_flattened_trees() {
    let dir = tempdir().unwrap();
    make_project(dir.path());
    let input_root = dir.path().join("input");
    let output_root = dir.path().join("output");

    run(
        &dir.path().join("proj"),
        &input_root,
        &output_root,
        false,
        false,
        &ExcludeFilter::default(),
        "swift",
    )
    .unwrap();

    // Originals copied verbatim under flattened names.
    let copied = fs::read_to_string(input_root.join("proj/Models_User.swift")).unwrap();
    assert_eq!(
        copied,
        "struct User {\n    /* fields */\n    let name: String\n}\n"
    );

    // Stripped counterparts alongside.
    let stripped = fs::read_to_string(output_root.join("proj/Models_User.swift")).unwrap();
    assert_eq!(stripped, "struct User {\n    let name: String\n}\n");

    let main = fs::read_to_string(output_root.join("proj/Main.swift")).unwrap();
    assert_eq!(main, "let app = App()\n");
}

#[test]
fn run_fails_on_empty_project() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("proj")).unwrap();

    let err = run(
        &dir.path().join("proj"),
        &dir.path().join("input"),
        &dir.path().join("output"),
        false,
        false,
        &ExcludeFilter::default(),
        "swift",
    )
    .unwrap_err();
    assert!(err.to_string().contains("no .swift files"));
}

#[test]
fn run_skips_binary_files() {
    let dir = tempdir().unwrap();
    make_project(dir.path());
    fs::write(dir.path().join("proj/blob.swift"), b"\x00\x01\x02").unwrap();

    // Binary file is skipped with a warning; the run still succeeds.
    run(
        &dir.path().join("proj"),
        &dir.path().join("input"),
        &dir.path().join("output"),
        false,
        false,
        &ExcludeFilter::default(),
        "swift",
    )
    .unwrap();

    assert!(!dir.path().join("output/proj/blob.swift").exists());
}

#[test]
fn process_file_measures_sizes() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("A.swift");
    fs::write(&src, "let a = 1 // c\n// gone\n").unwrap();

    let outcome = process_file(
        &src,
        &dir.path().join("in_A.swift"),
        &dir.path().join("out_A.swift"),
    )
    .unwrap()
    .unwrap();

    assert_eq!(outcome.bytes_before, 23);
    assert_eq!(outcome.lines_before, 2);
    assert_eq!(outcome.lines_after, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("out_A.swift")).unwrap(),
        "let a = 1\n"
    );
}

#[test]
fn process_file_skips_non_utf8() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("A.swift");
    fs::write(&src, [0x66u8, 0xff, 0xfe]).unwrap();

    let outcome = process_file(
        &src,
        &dir.path().join("in_A.swift"),
        &dir.path().join("out_A.swift"),
    )
    .unwrap();
    assert!(outcome.is_none());
}

#[test]
fn strip_single_to_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("A.swift");
    let dst = dir.path().join("A.stripped.swift");
    fs::write(&src, "let a = 1 /* c */\n").unwrap();

    strip_single(&src, Some(&dst)).unwrap();
    assert_eq!(fs::read_to_string(&dst).unwrap(), "let a = 1\n");
}

#[test]
fn strip_single_rejects_binary() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("A.swift");
    fs::write(&src, b"\x00").unwrap();

    assert!(strip_single(&src, None).is_err());
}
