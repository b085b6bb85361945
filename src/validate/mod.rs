//! Review bundle generation.
//!
//! Pairs the flattened originals under `input/<project>/` with their
//! stripped counterparts under `output/<project>/` and writes
//! size-capped text bundles with BEFORE/AFTER sections, so a reviewer
//! can check that every comment was removed and nothing else changed.
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::util;

/// Generate bundles for the given projects (or every project under the
/// input root when `projects` is empty) plus a `_summary.txt` index.
pub fn run(
    projects: &[String],
    input_root: &Path,
    output_root: &Path,
    out_dir: &Path,
    max_kb: u64,
    ext: &str,
) -> Result<(), Box<dyn Error>> {
    let names = if projects.is_empty() {
        list_projects(input_root)?
    } else {
        projects.to_vec()
    };
    if names.is_empty() {
        return Err(format!("no projects under {}", input_root.display()).into());
    }
    fs::create_dir_all(out_dir)?;

    let mut bundled = Vec::new();
    for name in &names {
        let count = bundle_project(
            name,
            input_root,
            output_root,
            out_dir,
            max_kb.saturating_mul(1024),
            ext,
        )?;
        if count > 0 {
            bundled.push((name.clone(), count));
        }
    }
    if bundled.is_empty() {
        return Err("no validation bundles were produced".into());
    }
    write_summary(out_dir, &bundled, max_kb)?;

    let total: usize = bundled.iter().map(|(_, n)| n).sum();
    println!(
        "{total} bundle(s) for {} project(s) written to {}",
        bundled.len(),
        out_dir.display()
    );
    Ok(())
}

/// Non-hidden subdirectories of the input root, sorted by name.
fn list_projects(input_root: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(input_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str()
            && !name.starts_with('.')
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Write this project's bundles; returns how many were produced.
/// Missing directories or files are warnings, not errors.
fn bundle_project(
    name: &str,
    input_root: &Path,
    output_root: &Path,
    out_dir: &Path,
    max_bytes: u64,
    ext: &str,
) -> Result<usize, Box<dyn Error>> {
    let input_dir = input_root.join(name);
    let output_dir = output_root.join(name);
    if !input_dir.is_dir() {
        eprintln!("warning: {name}: no input directory, skipped");
        return Ok(0);
    }
    if !output_dir.is_dir() {
        eprintln!("warning: {name}: no output directory, skipped");
        return Ok(0);
    }

    let files = sized_files(&input_dir, ext)?;
    if files.is_empty() {
        eprintln!("warning: {name}: no .{ext} files, skipped");
        return Ok(0);
    }

    let groups = group_by_size(&files, max_bytes);
    for (idx, group) in groups.iter().enumerate() {
        let bundle_name = format!("validation_{}_{:02}.txt", name, idx + 1);
        let body = render_bundle(name, idx + 1, group, &output_dir)?;
        fs::write(out_dir.join(&bundle_name), body)?;
        println!("  wrote {bundle_name} ({} files)", group.len());
    }
    Ok(groups.len())
}

/// Files with the given extension directly under `dir` (the batch trees
/// are flat), paired with their sizes and sorted by name.
fn sized_files(dir: &Path, ext: &str) -> Result<Vec<(PathBuf, u64)>, Box<dyn Error>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext))
        {
            continue;
        }
        let size = entry.metadata()?.len();
        files.push((path, size));
    }
    files.sort();
    Ok(files)
}

/// First-fit grouping in name order: a group is closed once adding the
/// next file would exceed the cap. A file larger than the cap still
/// gets a group of its own.
fn group_by_size(files: &[(PathBuf, u64)], max_bytes: u64) -> Vec<Vec<PathBuf>> {
    let mut groups = Vec::new();
    let mut current: Vec<PathBuf> = Vec::new();
    let mut current_size = 0u64;

    for (path, size) in files {
        if current_size + size > max_bytes && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
            current_size = 0;
        }
        current.push(path.clone());
        current_size += size;
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn render_bundle(
    project: &str,
    number: usize,
    group: &[PathBuf],
    output_dir: &Path,
) -> Result<String, Box<dyn Error>> {
    let heavy = "=".repeat(70);
    let light = "-".repeat(70);
    let mut body = String::new();

    writeln!(body, "{heavy}")?;
    writeln!(body, "Validation bundle #{number}: {project}")?;
    writeln!(body, "{heavy}")?;
    writeln!(body)?;
    writeln!(body, "Compare each BEFORE/AFTER pair and confirm that:")?;
    writeln!(body, "  1. every comment was removed")?;
    writeln!(body, "  2. the code itself is intact")?;
    writeln!(body, "  3. string contents are preserved")?;
    writeln!(body)?;

    for (idx, input_file) in group.iter().enumerate() {
        let Some(file_name) = input_file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let output_file = output_dir.join(file_name);
        if !output_file.is_file() {
            eprintln!("warning: {file_name}: no stripped counterpart, skipped");
            continue;
        }

        let original = fs::read_to_string(input_file)?;
        let stripped = fs::read_to_string(&output_file)?;
        let lines_before = util::newline_count(&original);
        let lines_after = util::newline_count(&stripped);
        let removed = lines_before.saturating_sub(lines_after);
        let removed_pct = if lines_before > 0 {
            removed as f64 / lines_before as f64 * 100.0
        } else {
            0.0
        };

        writeln!(body, "{heavy}")?;
        writeln!(body, "File #{}: {file_name}", idx + 1)?;
        writeln!(body, "{heavy}")?;
        writeln!(body)?;
        writeln!(body, "Size: {}", util::format_size(original.len() as u64))?;
        writeln!(body, "Lines before: {lines_before}")?;
        writeln!(body, "Lines after: {lines_after}")?;
        writeln!(body, "Lines removed: {removed} ({removed_pct:.1}%)")?;
        writeln!(body)?;
        writeln!(body, "{light}")?;
        writeln!(body, "BEFORE:")?;
        writeln!(body, "{light}")?;
        writeln!(body, "{original}")?;
        writeln!(body, "{light}")?;
        writeln!(body, "AFTER:")?;
        writeln!(body, "{light}")?;
        writeln!(body, "{stripped}")?;
        writeln!(body)?;
    }

    writeln!(body, "{heavy}")?;
    writeln!(body, "End of bundle #{number}")?;
    writeln!(body, "{heavy}")?;
    Ok(body)
}

fn write_summary(
    out_dir: &Path,
    bundled: &[(String, usize)],
    max_kb: u64,
) -> Result<(), Box<dyn Error>> {
    let heavy = "=".repeat(70);
    let mut body = String::new();

    writeln!(body, "{heavy}")?;
    writeln!(body, "Validation summary")?;
    writeln!(body, "{heavy}")?;
    writeln!(body)?;
    let total: usize = bundled.iter().map(|(_, n)| n).sum();
    writeln!(body, "Projects: {}", bundled.len())?;
    writeln!(body, "Bundles: {total}")?;
    writeln!(body, "Size cap per bundle: {max_kb} KB")?;
    writeln!(body)?;
    writeln!(body, "Per project:")?;
    for (name, count) in bundled {
        writeln!(body, "  - {name} ({count} bundle(s))")?;
    }

    fs::write(out_dir.join("_summary.txt"), body)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
