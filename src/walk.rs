//! Filesystem walking with `.gitignore` support.
//!
//! Provides directory traversal that respects `.gitignore` rules, skips
//! `.git` directories, applies user-supplied directory and glob
//! exclusions, and collects the source files to strip by extension.
//! Uses the `ignore` crate for efficient `.gitignore`-aware traversal.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Filter that excludes files by directory name or glob pattern.
///
/// Built from the `--exclude-dir` and `--exclude` CLI flags. An empty
/// filter (via `Default`) is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ExcludeFilter {
    /// Directory names to exclude (exact, case-sensitive match).
    dirs: HashSet<Box<str>>,
    /// Compiled glob patterns for file path matching.
    globs: Option<GlobSet>,
}

impl ExcludeFilter {
    /// Build a filter from directory-name and glob-pattern slices.
    /// Invalid glob patterns are reported to stderr and skipped.
    pub fn new(dirs: &[String], globs: &[String]) -> Self {
        let dirs = dirs.iter().map(|d| d.clone().into_boxed_str()).collect();
        let globs = Self::build_glob_set(globs);
        Self { dirs, globs }
    }

    /// Compile glob patterns into a `GlobSet`, skipping invalid ones.
    fn build_glob_set(patterns: &[String]) -> Option<GlobSet> {
        if patterns.is_empty() {
            return None;
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(g) => {
                    builder.add(g);
                }
                Err(e) => eprintln!("warning: invalid glob '{pattern}': {e}"),
            }
        }
        match builder.build() {
            Ok(set) => Some(set),
            Err(e) => {
                eprintln!("warning: failed to compile glob set: {e}");
                None
            }
        }
    }

    /// Returns `true` if a directory with this name should be excluded.
    pub fn excludes_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    /// Returns `true` if a file path matches any glob pattern.
    /// Normalises to a path relative to the walk root so that globs
    /// like `Generated/**` work regardless of whether the input was
    /// absolute.
    pub fn excludes_file(&self, path: &Path, walk_root: &Path) -> bool {
        self.globs.as_ref().is_some_and(|g| {
            let relative = path.strip_prefix(walk_root).unwrap_or(path);
            g.is_match(relative)
        })
    }
}

/// Walk the directory tree and return all files with the given
/// extension (case-insensitive), sorted for deterministic processing.
/// Walk errors are reported to stderr and skipped.
pub fn source_files(path: &Path, ext: &str, filter: &ExcludeFilter) -> Vec<PathBuf> {
    let mut result = Vec::new();
    for entry in walk(path, filter) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                eprintln!("warning: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let file_path = entry.path();
        if file_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext))
        {
            result.push(file_path.to_path_buf());
        }
    }
    result.sort();
    result
}

/// Build a directory walker that respects `.gitignore`, skips `.git`,
/// and applies the exclusion filter. File-level glob filtering is done
/// here so excluded files are never yielded.
fn walk(path: &Path, filter: &ExcludeFilter) -> ignore::Walk {
    let filter = filter.clone();
    let walk_root = path.to_path_buf();
    WalkBuilder::new(path)
        .hidden(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            let ft = entry.file_type();
            if ft.is_some_and(|ft| ft.is_dir()) {
                if entry.file_name() == ".git" {
                    return false;
                }
                if let Some(name) = entry.file_name().to_str()
                    && filter.excludes_dir(name)
                {
                    return false;
                }
            } else if ft.is_some_and(|ft| ft.is_file())
                && filter.excludes_file(entry.path(), &walk_root)
            {
                return false;
            }
            true
        })
        .build()
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
