//! Shared utilities used across multiple modules.
//!
//! Provides binary/UTF-8-checked file reading, human-readable size
//! formatting, flattened output names for the batch trees, and newline
//! counting for the line statistics.

use std::fs;
use std::io;
use std::path::Path;

/// Outcome of reading a source file: the decoded text, or the reason it
/// must be skipped. Skips are reported by the caller and never abort a
/// run.
#[derive(Debug)]
pub enum SourceText {
    Utf8(String),
    Binary,
    NotUtf8,
}

/// Read a file and decode it as UTF-8. Files with a NUL byte in the
/// first 512 bytes are classified as binary before decoding is
/// attempted.
pub fn read_source(path: &Path) -> io::Result<SourceText> {
    let bytes = fs::read(path)?;
    let header = &bytes[..bytes.len().min(512)];
    if header.contains(&0) {
        return Ok(SourceText::Binary);
    }
    match String::from_utf8(bytes) {
        Ok(text) => Ok(SourceText::Utf8(text)),
        Err(_) => Ok(SourceText::NotUtf8),
    }
}

/// Format a byte count as B/KB/MB/GB with two decimals.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} TB")
}

/// Number of newline bytes in `text`. Both trees are compared with the
/// same measure, so the delta is the number of removed lines.
pub fn newline_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Flatten a relative path into a single file name, joining components
/// with `_` (e.g. `Models/User.swift` becomes `Models_User.swift`).
pub fn flat_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("_")
}

/// Percentage of bytes removed, guarded against empty inputs.
pub fn percent_saved(before: u64, after: u64) -> f64 {
    if before == 0 {
        0.0
    } else {
        before.saturating_sub(after) as f64 / before as f64 * 100.0
    }
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;
