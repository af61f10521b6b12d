//! Source discovery: list the files in a directory whose extension matches.
//!
//! The directory is read once and each file name is tested against one
//! `*.<ext>` `glob` pattern per extension. Only the name is matched, so the
//! directory path never goes through pattern syntax. A directory that does
//! not exist simply matches nothing, so an absent uploads folder is an empty
//! run rather than an error.
//!
//! Results are grouped by extension in the configured order; within one
//! extension they are sorted by path.

use glob::{MatchOptions, Pattern, PatternError};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A discovered input PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File name without its final extension: `q3.final.pdf` → `q3.final`.
    pub base_name: OsString,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let base_name = path.file_stem().map(OsString::from).unwrap_or_default();
        Self { path, base_name }
    }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// The file-name pattern for `ext`.
///
/// The extension is escaped, so one containing `*` or `[` is matched
/// literally.
pub fn match_pattern(ext: &str) -> Result<Pattern, PatternError> {
    Pattern::new(&format!("*.{}", Pattern::escape(ext)))
}

/// Return every regular file directly inside `dir` whose extension is one of
/// `extensions`.
pub fn find_by_extensions<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Vec<PathBuf> {
    let candidates = regular_files(dir);
    let mut found = Vec::new();

    for ext in extensions {
        let pattern = match match_pattern(ext.as_ref()) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Skipping invalid extension {:?}: {}", ext.as_ref(), e);
                continue;
            }
        };
        info!("Scanning {}", dir.join(pattern.as_str()).display());

        let mut matched: Vec<PathBuf> = candidates
            .iter()
            .filter(|(name, _)| pattern.matches_with(name, MATCH_OPTIONS))
            .map(|(_, path)| path.clone())
            .collect();
        matched.sort();

        for path in &matched {
            debug!("Matched {}", path.display());
        }
        found.extend(matched);
    }

    info!("Found {} source file(s) in {}", found.len(), dir.display());
    found
}

/// Regular files in `dir`, each paired with the name used for matching.
///
/// Names that are not valid UTF-8 are matched in their lossy form
/// (U+FFFD for each bad sequence); the returned path keeps the real bytes.
fn regular_files(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist", dir.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Cannot read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            debug!("Ignoring non-file {}", path.display());
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push((name, path));
    }
    files
}
