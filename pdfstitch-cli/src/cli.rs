//! CLI argument parsing for pdfstitch.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by the build script to render the man page, so it
//! only depends on `clap` and the library's configuration types.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use pdfstitch::config::{Config, DEFAULT_OUTPUT, DEFAULT_PATTERN};

/// Stitch PDF files into a single document.
///
/// Sources are taken from --files in the order given, or from every file in
/// --input-dir (default: the current directory) matching --pattern, sorted
/// by name. Each source is preceded by a divider page naming it unless
/// --no_source is set. Encrypted, missing and corrupt files are reported and
/// skipped.
#[derive(Parser, Debug)]
#[command(name = "pdfstitch")]
#[command(version)]
#[command(about = "Stitch PDF files into a single document", long_about)]
#[command(author)]
pub struct Cli {
    /// Directory to collect source PDFs from
    ///
    /// Only files directly inside the directory are used. Ignored when
    /// --files is given.
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Source PDF files, stitched in the order given
    ///
    /// Takes precedence over --input-dir. May be repeated.
    ///
    /// Examples:
    ///   pdfstitch -f cover.pdf body.pdf -o book.pdf
    ///   pdfstitch -f b.pdf -f a.pdf
    #[arg(short, long, value_name = "FILE", num_args = 1.., action = ArgAction::Append)]
    pub files: Vec<PathBuf>,

    /// Output PDF file path
    ///
    /// An existing file is replaced. The parent directory must exist.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// File name pattern for directory mode
    ///
    /// Matched against file names case-sensitively, e.g. "chapter_*.pdf".
    /// Matches are still sorted by name ignoring case.
    #[arg(short, long, value_name = "GLOB", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Verbose output - show page counts, timing and PDF version per file
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not insert a divider page before each source
    #[arg(long = "no_source")]
    pub no_source: bool,

    /// Suppress all non-error output
    ///
    /// Warnings about skipped and failed files are still printed.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run - process all sources and report, but do not write output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the final report as JSON on stdout
    ///
    /// Human-readable messages are moved to stderr.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a Config.
    ///
    /// Validation happens when the run starts.
    pub fn to_config(&self) -> Config {
        Config {
            files: self.files.clone(),
            input_dir: self.input_dir.clone(),
            pattern: self.pattern.clone(),
            output: self.output.clone(),
            dividers: !self.no_source,
            verbose: self.verbose,
            quiet: self.quiet,
            dry_run: self.dry_run,
            json: self.json,
        }
    }
}
