/// CLI argument definitions for the `ncm` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::walk::ExcludeFilter;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "ncm", version, about = "Strip comments from Swift sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Walk configuration shared by the commands that traverse a project.
#[derive(Args)]
pub struct FilterArgs {
    /// File extension to process (default: swift)
    #[arg(long, default_value = "swift")]
    pub ext: String,

    /// Directory names to skip during the walk (repeatable)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dir: Vec<String>,

    /// Glob patterns for files to skip (repeatable, e.g. "Generated/**")
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ExcludeFilter {
        ExcludeFilter::new(&self.exclude_dir, &self.exclude)
    }
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Strip a project into flattened input/output trees
    #[command(long_about = "\
Strip every source file of a project and lay the results out for review.

Each file is copied, flattened (path separators replaced with `_`), into
<input-root>/<project>/ and its stripped counterpart is written to
<output-root>/<project>/. A summary of files, bytes, lines, and elapsed
time is printed at the end (or emitted as JSON with --json).

Files that fail to read or are not UTF-8 text are reported and skipped;
the run continues. The exit code is non-zero if any file failed.")]
    Run {
        /// Project directory to process
        project: PathBuf,

        /// Root for flattened copies of the originals (default: input)
        #[arg(long, default_value = "input")]
        input_root: PathBuf,

        /// Root for the stripped files (default: output)
        #[arg(long, default_value = "output")]
        output_root: PathBuf,

        /// Print a progress line per file
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Measure comment overhead across every project under a root
    #[command(long_about = "\
Strip every project under a root in memory and report how much of each
project is comments.

Every non-hidden subdirectory of the root is treated as a project.
Nothing is written to disk; the report shows per-project and total
bytes before/after, percent saved, throughput, and the files with the
most bytes saved.")]
    Stats {
        /// Directory whose subdirectories are the projects (default: ./project)
        root: Option<PathBuf>,

        /// Show only the top N files by bytes saved (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Bundle originals with stripped results for side-by-side review
    Validate {
        /// Projects to bundle (default: every project under the input root)
        #[arg(long = "project", value_name = "NAME")]
        projects: Vec<String>,

        /// Root holding the flattened originals (default: input)
        #[arg(long, default_value = "input")]
        input_root: PathBuf,

        /// Root holding the stripped files (default: output)
        #[arg(long, default_value = "output")]
        output_root: PathBuf,

        /// Directory for the generated bundles (default: validation)
        #[arg(long, default_value = "validation")]
        out_dir: PathBuf,

        /// Size cap per bundle, in KB of original source (default: 200)
        #[arg(long, default_value = "200")]
        max_kb: u64,

        /// File extension to pair (default: swift)
        #[arg(long, default_value = "swift")]
        ext: String,
    },

    /// Strip a single file to stdout or a given path
    Strip {
        /// File to strip
        file: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
