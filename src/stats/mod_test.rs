use std::fs;

use tempfile::tempdir;

use super::*;

fn write_project(root: &Path, name: &str, files: &[(&str, &str)]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, content) in files {
        fs::write(dir.join(file), content).unwrap();
    }
}

#[test]
fn project_dirs_sorted_and_filtered() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("beta")).unwrap();
    fs::create_dir_all(dir.path().join("alpha")).unwrap();
    fs::create_dir_all(dir.path().join(".hidden")).unwrap();
    fs::write(dir.path().join("stray.txt"), "").unwrap();

    let dirs = project_dirs(dir.path()).unwrap();
    let names: Vec<_> = dirs
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[test]
fn analyze_project_accumulates() {
    let dir = tempdir().unwrap();
    write_project(
        dir.path(),
        "app",
        &[
            ("A.swift", "let a = 1 // c\n"),
            ("B.swift", "// only\nlet b = 2\n"),
        ],
    );

    let mut savings = Vec::new();
    let stats = analyze_project(
        &dir.path().join("app"),
        &ExcludeFilter::default(),
        "swift",
        &mut savings,
    )
    .unwrap();

    assert_eq!(stats.name, "app");
    assert_eq!(stats.files, 2);
    assert_eq!(stats.bytes_before, 15 + 19);
    assert_eq!(stats.bytes_after, 10 + 10);
    assert_eq!(savings.len(), 2);
}

#[test]
fn analyze_project_empty_is_none() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();

    let mut savings = Vec::new();
    assert!(
        analyze_project(
            &dir.path().join("empty"),
            &ExcludeFilter::default(),
            "swift",
            &mut savings
        )
        .is_none()
    );
}

#[test]
fn analyze_project_counts_skipped() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "app", &[("A.swift", "let a = 1\n")]);
    fs::write(dir.path().join("app/blob.swift"), b"\x00\x01").unwrap();

    let mut savings = Vec::new();
    let stats = analyze_project(
        &dir.path().join("app"),
        &ExcludeFilter::default(),
        "swift",
        &mut savings,
    )
    .unwrap();
    assert_eq!(stats.files, 1);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn run_reports_projects() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "one", &[("A.swift", "let a = 1 // c\n")]);
    write_project(dir.path(), "two", &[("B.swift", "/* gone */\nlet b = 2\n")]);

    run(dir.path(), 5, false, &ExcludeFilter::default(), "swift").unwrap();
    run(dir.path(), 5, true, &ExcludeFilter::default(), "swift").unwrap();
}

#[test]
fn run_fails_without_projects() {
    let dir = tempdir().unwrap();
    assert!(run(dir.path(), 5, false, &ExcludeFilter::default(), "swift").is_err());
}

#[test]
fn run_fails_without_files() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    let err = run(dir.path(), 5, false, &ExcludeFilter::default(), "swift").unwrap_err();
    assert!(err.to_string().contains("no .swift files"));
}
