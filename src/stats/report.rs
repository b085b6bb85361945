use std::error::Error;
use std::path::PathBuf;

use serde::Serialize;

use crate::util::{format_size, percent_saved};

/// Per-project aggregates for the stats report.
#[derive(Debug, Serialize)]
pub struct ProjectStats {
    pub name: String,
    pub files: usize,
    pub skipped: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub elapsed_seconds: f64,
}

impl ProjectStats {
    pub fn new(name: String) -> Self {
        Self {
            name,
            files: 0,
            skipped: 0,
            bytes_before: 0,
            bytes_after: 0,
            elapsed_seconds: 0.0,
        }
    }

    pub fn saved(&self) -> u64 {
        self.bytes_before.saturating_sub(self.bytes_after)
    }

    /// Input throughput in MB/s, guarded against a zero elapsed time.
    pub fn speed(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.bytes_before as f64 / (1024.0 * 1024.0) / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// One entry of the "most bytes saved" ranking.
#[derive(Debug, Serialize)]
pub struct FileSaving {
    pub path: PathBuf,
    pub saved: u64,
}

pub fn print_report(rows: &[ProjectStats], top: &[FileSaving]) {
    let separator = "─".repeat(78);

    println!("{separator}");
    println!(
        " {:<22} {:>6} {:>10} {:>10} {:>10} {:>7} {:>7}",
        "Project", "Files", "Before", "After", "Saved", "%", "MB/s"
    );
    println!("{separator}");

    let mut total_files = 0usize;
    let mut total_before = 0u64;
    let mut total_after = 0u64;
    let mut total_elapsed = 0f64;

    for r in rows {
        println!(
            " {:<22} {:>6} {:>10} {:>10} {:>10} {:>6.2}% {:>7.2}",
            r.name,
            r.files,
            format_size(r.bytes_before),
            format_size(r.bytes_after),
            format_size(r.saved()),
            percent_saved(r.bytes_before, r.bytes_after),
            r.speed()
        );
        total_files += r.files;
        total_before += r.bytes_before;
        total_after += r.bytes_after;
        total_elapsed += r.elapsed_seconds;
    }

    let total_speed = if total_elapsed > 0.0 {
        total_before as f64 / (1024.0 * 1024.0) / total_elapsed
    } else {
        0.0
    };

    println!("{separator}");
    println!(
        " {:<22} {:>6} {:>10} {:>10} {:>10} {:>6.2}% {:>7.2}",
        "SUM:",
        total_files,
        format_size(total_before),
        format_size(total_after),
        format_size(total_before.saturating_sub(total_after)),
        percent_saved(total_before, total_after),
        total_speed
    );
    println!("{separator}");

    if !top.is_empty() {
        println!();
        println!(" Top {} files by bytes saved", top.len());
        println!("{separator}");
        for f in top {
            println!(" {:<66} {:>10}", f.path.display(), format_size(f.saved));
        }
        println!("{separator}");
    }
}

pub fn print_json(rows: &[ProjectStats], top: &[FileSaving]) -> Result<(), Box<dyn Error>> {
    let total_before: u64 = rows.iter().map(|r| r.bytes_before).sum();
    let total_after: u64 = rows.iter().map(|r| r.bytes_after).sum();
    let value = serde_json::json!({
        "projects": rows,
        "totals": {
            "projects": rows.len(),
            "files": rows.iter().map(|r| r.files).sum::<usize>(),
            "bytes_before": total_before,
            "bytes_after": total_after,
            "saved": total_before.saturating_sub(total_after),
            "percent_saved": percent_saved(total_before, total_after),
            "elapsed_seconds": rows.iter().map(|r| r.elapsed_seconds).sum::<f64>(),
        },
        "top_files": top,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
