//! Batch strip run over a single project.
//!
//! Enumerates a project's source files, copies each original (with its
//! relative path flattened into the file name) into
//! `<input-root>/<project>/`, writes the stripped text to
//! `<output-root>/<project>/`, and reports size/line totals. Per-file
//! failures are warnings; the run continues and the failure count
//! decides the exit code.
pub(crate) mod report;

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::strip;
use crate::util::{self, SourceText};
use crate::walk::{self, ExcludeFilter};
use report::{RunReport, print_json, print_report};

/// Per-file measurement for a successfully stripped file.
pub(crate) struct FileOutcome {
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub lines_before: usize,
    pub lines_after: usize,
}

/// Strip every source file of `project` into flattened input/output
/// trees and print a summary (or JSON when `json` is true).
pub fn run(
    project: &Path,
    input_root: &Path,
    output_root: &Path,
    verbose: bool,
    json: bool,
    filter: &ExcludeFilter,
    ext: &str,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let project = fs::canonicalize(project)?;
    let name = project_name(&project)?;

    let files = walk::source_files(&project, ext, filter);
    if files.is_empty() {
        return Err(format!("no .{ext} files under {}", project.display()).into());
    }

    let input_dir = input_root.join(&name);
    let output_dir = output_root.join(&name);
    fs::create_dir_all(&input_dir)?;
    fs::create_dir_all(&output_dir)?;

    let mut totals = RunReport::new(name);
    let total = files.len();

    for (idx, file) in files.iter().enumerate() {
        let relative = file.strip_prefix(&project).unwrap_or(file);
        let flat = util::flat_name(relative);
        match process_file(file, &input_dir.join(&flat), &output_dir.join(&flat)) {
            Ok(Some(outcome)) => {
                if verbose {
                    println!(
                        "[{}/{}] {} -> {} ({:.1}% saved)",
                        idx + 1,
                        total,
                        relative.display(),
                        flat,
                        util::percent_saved(outcome.bytes_before, outcome.bytes_after)
                    );
                }
                totals.add(&outcome);
            }
            Ok(None) => totals.skipped += 1,
            Err(err) => {
                totals.failed += 1;
                eprintln!("warning: {}: {err}", file.display());
            }
        }
    }
    totals.elapsed = start.elapsed();

    if json {
        print_json(&totals)?;
    } else {
        print_report(&totals, &input_dir, &output_dir);
    }

    if totals.failed > 0 {
        return Err(format!("{} file(s) failed", totals.failed).into());
    }
    Ok(())
}

/// Strip one file to stdout or `output`.
pub fn strip_single(file: &Path, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let source = match util::read_source(file)? {
        SourceText::Utf8(s) => s,
        SourceText::Binary => return Err(format!("{}: binary file", file.display()).into()),
        SourceText::NotUtf8 => return Err(format!("{}: not valid UTF-8", file.display()).into()),
    };
    let outcome = strip::strip_with_outcome(&source);
    if !outcome.complete {
        eprintln!(
            "warning: {}: unterminated construct at end of file",
            file.display()
        );
    }
    match output {
        Some(path) => fs::write(path, &outcome.text)?,
        None => print!("{}", outcome.text),
    }
    Ok(())
}

fn project_name(project: &Path) -> Result<String, Box<dyn Error>> {
    match project.file_name().and_then(|n| n.to_str()) {
        Some(name) => Ok(name.to_string()),
        None => Err(format!("cannot derive a project name from {}", project.display()).into()),
    }
}

/// Copy the original to `input_copy`, strip it, and write the result to
/// `output_path`. Returns `None` for files that are skipped (binary or
/// not UTF-8), with the reason already reported.
fn process_file(
    source_path: &Path,
    input_copy: &Path,
    output_path: &Path,
) -> Result<Option<FileOutcome>, Box<dyn Error>> {
    let source = match util::read_source(source_path)? {
        SourceText::Utf8(s) => s,
        SourceText::Binary => {
            eprintln!("warning: {}: skipped (binary)", source_path.display());
            return Ok(None);
        }
        SourceText::NotUtf8 => {
            eprintln!(
                "warning: {}: skipped (not valid UTF-8)",
                source_path.display()
            );
            return Ok(None);
        }
    };
    fs::write(input_copy, &source)?;

    let outcome = strip::strip_with_outcome(&source);
    if !outcome.complete {
        eprintln!(
            "warning: {}: unterminated construct at end of file",
            source_path.display()
        );
    }
    fs::write(output_path, &outcome.text)?;

    Ok(Some(FileOutcome {
        bytes_before: source.len() as u64,
        bytes_after: outcome.text.len() as u64,
        lines_before: util::newline_count(&source),
        lines_after: util::newline_count(&outcome.text),
    }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
