use std::error::Error;
use std::path::Path;
use std::time::Duration;

use super::FileOutcome;
use crate::util::{format_size, percent_saved};

/// Aggregated results of one batch run.
pub struct RunReport {
    pub project: String,
    pub files: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub lines_before: usize,
    pub lines_after: usize,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new(project: String) -> Self {
        Self {
            project,
            files: 0,
            skipped: 0,
            failed: 0,
            bytes_before: 0,
            bytes_after: 0,
            lines_before: 0,
            lines_after: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn add(&mut self, outcome: &FileOutcome) {
        self.files += 1;
        self.bytes_before += outcome.bytes_before;
        self.bytes_after += outcome.bytes_after;
        self.lines_before += outcome.lines_before;
        self.lines_after += outcome.lines_after;
    }

    /// Input throughput in MB/s, guarded against a zero elapsed time.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_before as f64 / (1024.0 * 1024.0) / secs
        } else {
            0.0
        }
    }
}

pub fn print_report(r: &RunReport, input_dir: &Path, output_dir: &Path) {
    let separator = "─".repeat(56);

    println!("{separator}");
    println!(" Project: {}", r.project);
    println!("{separator}");
    println!(" {:<24} {:>29}", "Files processed", r.files);
    println!(" {:<24} {:>29}", "Skipped", r.skipped);
    println!(" {:<24} {:>29}", "Failed", r.failed);
    println!(" {:<24} {:>29}", "Bytes before", format_size(r.bytes_before));
    println!(" {:<24} {:>29}", "Bytes after", format_size(r.bytes_after));
    println!(
        " {:<24} {:>29}",
        "Saved",
        format!(
            "{} ({:.2}%)",
            format_size(r.bytes_before.saturating_sub(r.bytes_after)),
            percent_saved(r.bytes_before, r.bytes_after)
        )
    );
    println!(" {:<24} {:>29}", "Lines before", r.lines_before);
    println!(" {:<24} {:>29}", "Lines after", r.lines_after);
    println!(
        " {:<24} {:>29}",
        "Lines removed",
        r.lines_before.saturating_sub(r.lines_after)
    );
    println!(
        " {:<24} {:>29}",
        "Elapsed",
        format!("{:.2}s", r.elapsed.as_secs_f64())
    );
    println!(
        " {:<24} {:>29}",
        "Throughput",
        format!("{:.2} MB/s", r.throughput())
    );
    println!("{separator}");
    println!(" Originals: {}", input_dir.display());
    println!(" Stripped:  {}", output_dir.display());
    println!("{separator}");
}

pub fn print_json(r: &RunReport) -> Result<(), Box<dyn Error>> {
    let value = serde_json::json!({
        "project": r.project,
        "files": r.files,
        "skipped": r.skipped,
        "failed": r.failed,
        "bytes": {
            "before": r.bytes_before,
            "after": r.bytes_after,
            "saved": r.bytes_before.saturating_sub(r.bytes_after),
            "percent_saved": percent_saved(r.bytes_before, r.bytes_after),
        },
        "lines": {
            "before": r.lines_before,
            "after": r.lines_after,
            "removed": r.lines_before.saturating_sub(r.lines_after),
        },
        "elapsed_seconds": r.elapsed.as_secs_f64(),
        "throughput_mb_per_s": r.throughput(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome() -> FileOutcome {
        FileOutcome {
            bytes_before: 100,
            bytes_after: 80,
            lines_before: 10,
            lines_after: 8,
        }
    }

    #[test]
    fn add_accumulates() {
        let mut r = RunReport::new("App".to_string());
        r.add(&outcome());
        r.add(&outcome());
        assert_eq!(r.files, 2);
        assert_eq!(r.bytes_before, 200);
        assert_eq!(r.bytes_after, 160);
        assert_eq!(r.lines_before, 20);
        assert_eq!(r.lines_after, 16);
    }

    #[test]
    fn throughput_zero_elapsed() {
        let r = RunReport::new("App".to_string());
        assert_eq!(r.throughput(), 0.0);
    }

    #[test]
    fn throughput_computed() {
        let mut r = RunReport::new("App".to_string());
        r.bytes_before = 2 * 1024 * 1024;
        r.elapsed = Duration::from_secs(1);
        assert!((r.throughput() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn print_report_does_not_panic() {
        let mut r = RunReport::new("App".to_string());
        r.add(&outcome());
        r.elapsed = Duration::from_millis(12);
        print_report(&r, &PathBuf::from("input/App"), &PathBuf::from("output/App"));
    }

    #[test]
    fn print_json_does_not_panic() {
        let r = RunReport::new("App".to_string());
        print_json(&r).unwrap();
    }
}
