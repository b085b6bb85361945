//! `ncm` — a CLI tool that strips comments from Swift source files.
//!
//! The core is a single-pass lexical state machine (`strip`) that
//! removes line comments, nested block comments, and the free-spacing
//! comments inside extended regex literals, while leaving strings,
//! regex literals, and interpolated expressions byte-for-byte intact.
//! Around it sit three drivers: a batch runner that lays projects out
//! in flattened input/output trees, a statistics command for measuring
//! comment overhead, and a bundle generator for side-by-side review.
//!
//! The dispatch pattern is uniform: parse CLI args with `clap` and
//! delegate to the module's `run()` function. All errors are printed
//! to stderr and cause exit code 1.

/// Batch strip runs over a project tree.
mod batch;
/// CLI argument definitions using `clap` derive macros.
mod cli;
/// Comment-overhead statistics across projects.
mod stats;
/// Comment removal core: lexer state machine and regex-context oracle.
mod strip;
/// Shared utilities (file reading, size formatting, flattened names).
mod util;
/// Review bundle generation (BEFORE/AFTER pairs).
mod validate;
/// Filesystem walking with .gitignore support.
mod walk;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use cli::{Cli, Commands};

/// Run a command, printing errors to stderr and exiting with code 1
/// on failure.
fn run_command(f: impl FnOnce() -> Result<(), Box<dyn Error>>) {
    if let Err(err) = f() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project,
            input_root,
            output_root,
            verbose,
            json,
            filter,
        } => run_command(|| {
            batch::run(
                &project,
                &input_root,
                &output_root,
                verbose,
                json,
                &filter.to_filter(),
                &filter.ext,
            )
        }),
        Commands::Stats {
            root,
            top,
            json,
            filter,
        } => run_command(|| {
            let root = root.unwrap_or_else(|| PathBuf::from("project"));
            stats::run(&root, top, json, &filter.to_filter(), &filter.ext)
        }),
        Commands::Validate {
            projects,
            input_root,
            output_root,
            out_dir,
            max_kb,
            ext,
        } => run_command(|| validate::run(&projects, &input_root, &output_root, &out_dir, max_kb, &ext)),
        Commands::Strip { file, output } => {
            run_command(|| batch::strip_single(&file, output.as_deref()))
        }
    }
}
