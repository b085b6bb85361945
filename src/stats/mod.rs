//! Comment-overhead statistics across projects.
//!
//! Strips every project under a root in memory (nothing is written) and
//! reports how much of each project is comments: per-project and total
//! bytes before/after, percent saved, throughput, and a ranking of the
//! files with the most bytes saved.
pub(crate) mod report;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::strip;
use crate::util::{self, SourceText};
use crate::walk::{self, ExcludeFilter};
use report::{FileSaving, ProjectStats, print_json, print_report};

/// Analyze every project directory under `root` and print the report
/// (or JSON when `json` is true). `top` caps the file ranking.
pub fn run(
    root: &Path,
    top: usize,
    json: bool,
    filter: &ExcludeFilter,
    ext: &str,
) -> Result<(), Box<dyn Error>> {
    let projects = project_dirs(root)?;
    if projects.is_empty() {
        return Err(format!("no project directories under {}", root.display()).into());
    }

    let mut rows = Vec::new();
    let mut savings = Vec::new();
    for project in &projects {
        if let Some(stats) = analyze_project(project, filter, ext, &mut savings) {
            rows.push(stats);
        }
    }
    if rows.is_empty() {
        return Err(format!("no .{ext} files found in any project").into());
    }

    savings.sort_by(|a, b| b.saved.cmp(&a.saved));
    savings.truncate(top);

    if json {
        print_json(&rows, &savings)?;
    } else {
        print_report(&rows, &savings);
    }
    Ok(())
}

/// Non-hidden subdirectories of `root`, sorted.
fn project_dirs(root: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut projects = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        projects.push(entry.path());
    }
    projects.sort();
    Ok(projects)
}

/// Strip one project in memory, accumulating per-file savings into
/// `savings`. Returns `None` when the project has no processable files.
fn analyze_project(
    project: &Path,
    filter: &ExcludeFilter,
    ext: &str,
    savings: &mut Vec<FileSaving>,
) -> Option<ProjectStats> {
    let files = walk::source_files(project, ext, filter);
    if files.is_empty() {
        return None;
    }
    let name = project.file_name()?.to_str()?.to_string();

    let start = Instant::now();
    let mut stats = ProjectStats::new(name);

    for file in &files {
        let source = match util::read_source(file) {
            Ok(SourceText::Utf8(s)) => s,
            Ok(SourceText::Binary) => {
                stats.skipped += 1;
                eprintln!("warning: {}: skipped (binary)", file.display());
                continue;
            }
            Ok(SourceText::NotUtf8) => {
                stats.skipped += 1;
                eprintln!("warning: {}: skipped (not valid UTF-8)", file.display());
                continue;
            }
            Err(err) => {
                stats.skipped += 1;
                eprintln!("warning: {}: {err}", file.display());
                continue;
            }
        };

        let stripped = strip::strip(&source);
        let before = source.len() as u64;
        let after = stripped.len() as u64;
        stats.files += 1;
        stats.bytes_before += before;
        stats.bytes_after += after;
        savings.push(FileSaving {
            path: file.clone(),
            saved: before.saturating_sub(after),
        });
    }
    stats.elapsed_seconds = start.elapsed().as_secs_f64();

    if stats.files == 0 { None } else { Some(stats) }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
