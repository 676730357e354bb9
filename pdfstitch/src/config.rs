//! Configuration module for pdfstitch.
//!
//! [`Config`] is populated once from command-line arguments and validated
//! before any file is touched. The implicit default (current directory,
//! `*.pdf`) lives here as an explicit value and is resolved into an
//! [`InputSource`] by [`Config::input_source`].

use std::path::{Path, PathBuf};

use crate::error::{Result, StitchError};
use crate::source::normalize;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "stitched_document.pdf";

/// Default pattern used in directory mode.
pub const DEFAULT_PATTERN: &str = "*.pdf";

/// Where source files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Explicit ordered list of files. Order is preserved as given.
    Files(Vec<PathBuf>),
    /// Every file in `dir` whose name matches `pattern`.
    Directory {
        /// Directory to list.
        dir: PathBuf,
        /// Glob pattern applied to file names.
        pattern: String,
    },
}

/// Complete configuration for a stitch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Explicit source files, in stitch order. Takes precedence over `input_dir`.
    pub files: Vec<PathBuf>,

    /// Directory to discover sources in.
    pub input_dir: Option<PathBuf>,

    /// File name pattern for directory mode.
    pub pattern: String,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Insert a divider page naming each source before its pages.
    pub dividers: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Dry run mode - ingest and report without writing.
    pub dry_run: bool,

    /// Print the final summary as JSON.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            input_dir: None,
            pattern: DEFAULT_PATTERN.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            dividers: true,
            verbose: false,
            quiet: false,
            dry_run: false,
            json: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::InvalidConfig`] if:
    /// - Verbose and quiet modes are both enabled
    /// - The output path is empty or equal to an explicit input
    /// - The pattern is empty, not a valid glob, or contains a path separator
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(StitchError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(StitchError::invalid_config("Output path cannot be empty"));
        }

        if self.files.iter().any(|input| same_path(input, &self.output)) {
            return Err(StitchError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }

        if self.pattern.trim().is_empty() {
            return Err(StitchError::invalid_config("Pattern cannot be empty"));
        }

        if self.pattern.contains('/') || self.pattern.contains(std::path::MAIN_SEPARATOR) {
            return Err(StitchError::invalid_config(format!(
                "Pattern must match file names only, without directories: {}",
                self.pattern
            )));
        }

        glob::Pattern::new(&self.pattern).map_err(|err| {
            StitchError::invalid_config(format!("Invalid pattern '{}': {err}", self.pattern))
        })?;

        Ok(())
    }

    /// True when an explicit list and a directory were both given.
    ///
    /// The explicit list wins; callers warn that the directory is ignored.
    pub fn has_conflicting_inputs(&self) -> bool {
        !self.files.is_empty() && self.input_dir.is_some()
    }

    /// Resolve which input source this run uses.
    ///
    /// Falls back to the current working directory when neither files nor an
    /// input directory were given.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the current directory cannot be determined.
    pub fn input_source(&self) -> Result<InputSource> {
        if !self.files.is_empty() {
            return Ok(InputSource::Files(self.files.clone()));
        }

        let dir = match &self.input_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        Ok(InputSource::Directory {
            dir,
            pattern: self.pattern.clone(),
        })
    }

    /// Returns the output path.
    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// True when both paths name the same file, lexically or once resolved.
fn same_path(a: &Path, b: &Path) -> bool {
    if normalize(a) == normalize(b) {
        return true;
    }
    matches!(
        (a.canonicalize(), b.canonicalize()),
        (Ok(a), Ok(b)) if a == b
    )
}
