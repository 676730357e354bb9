//! Input resolution.
//!
//! Turns an [`InputSource`] into the ordered list of [`SourceFile`]s that the
//! rest of the pipeline walks through. Explicit lists keep the caller's order.
//! Directory listings are sorted by file name, case-insensitively, so the same
//! directory always stitches in the same order.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::InputSource;
use crate::error::{Result, StitchError};
use crate::utils::{compare_file_names, display_name};

/// A source PDF path plus the name shown on its divider page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    path: PathBuf,
    display_name: String,
}

impl SourceFile {
    /// Create a source file, deriving its display name from the path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = display_name(&path);
        Self { path, display_name }
    }

    /// Path to the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its directory.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Outcome of input resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSources {
    /// Sources in stitch order.
    pub sources: Vec<SourceFile>,

    /// Repeated explicit paths that were dropped.
    pub duplicates: Vec<PathBuf>,
}

impl ResolvedSources {
    /// Number of resolved sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Resolve the configured input source into ordered source files.
///
/// Explicit files are not checked for existence here; a missing file is
/// reported per file during ingestion instead of aborting the run.
///
/// # Errors
///
/// Returns an input error if the directory is missing, is not a directory,
/// cannot be listed, or contains no matching files.
pub fn resolve_sources(input: &InputSource) -> Result<ResolvedSources> {
    match input {
        InputSource::Files(paths) => Ok(dedup_preserving_order(paths)),
        InputSource::Directory { dir, pattern } => {
            let paths = list_matching_files(dir, pattern)?;
            Ok(ResolvedSources {
                sources: paths.into_iter().map(SourceFile::new).collect(),
                duplicates: Vec::new(),
            })
        }
    }
}

/// Keep the first occurrence of every path, in the given order.
fn dedup_preserving_order(paths: &[PathBuf]) -> ResolvedSources {
    let mut seen = HashSet::new();
    let mut resolved = ResolvedSources::default();

    for path in paths {
        if seen.insert(normalize(path)) {
            resolved.sources.push(SourceFile::new(path.clone()));
        } else {
            resolved.duplicates.push(path.clone());
        }
    }

    resolved
}

/// Lexical key for duplicate detection (`./a.pdf` and `a.pdf` are the same).
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// List regular files directly inside `dir` whose name matches `pattern`,
/// sorted case-insensitively by name.
fn list_matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(StitchError::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    if !dir.is_dir() {
        return Err(StitchError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let matcher = Pattern::new(pattern).map_err(|err| {
        StitchError::invalid_config(format!("Invalid pattern '{pattern}': {err}"))
    })?;

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| compare_file_names(a.file_name(), b.file_name()));

    let mut matches = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // The directory itself could not be read.
            Err(err) if err.depth() == 0 => {
                return Err(StitchError::FailedToListDir {
                    path: dir.to_path_buf(),
                    source: err,
                });
            }
            // Broken links and vanished entries are not sources.
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if matcher.matches_with(&name, options) {
            matches.push(entry.into_path());
        }
    }

    if matches.is_empty() {
        return Err(StitchError::NoMatchingFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    Ok(matches)
}
