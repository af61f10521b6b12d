//! Configuration types for a PDF-to-JPEG run.
//!
//! Everything the pipeline needs to know is carried in [`PipelineConfig`],
//! built via its [`PipelineConfigBuilder`]. The directories are explicit
//! fields rather than being derived from the executable's location inside
//! the pipeline; only the binary applies the historical install-relative
//! layout, through [`PipelineConfig::builder_for_install_dir`].

use crate::error::Pdf2SlidesError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["pdf"];

/// Input directory name, relative to the parent of the install directory.
pub const UPLOADS_DIR: &str = "uploads";

/// Output directory name, relative to the parent of the install directory.
pub const IMAGES_DIR: &str = "images";

/// Configuration for one scan-convert-write run.
///
/// Built via [`PipelineConfig::builder()`] or
/// [`PipelineConfig::builder_for_install_dir()`].
///
/// # Example
/// ```rust
/// use pdf2slides::{FailurePolicy, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .input_dir("/srv/deck/uploads")
///     .output_dir("/srv/deck/images")
///     .failure_policy(FailurePolicy::Continue)
///     .build()
///     .unwrap();
/// assert_eq!(config.extensions, vec!["pdf".to_string()]);
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Directory scanned (non-recursively) for source PDFs.
    pub input_dir: PathBuf,

    /// Directory receiving `<base>-slide-<i>.jpg` files.
    pub output_dir: PathBuf,

    /// File-name extensions to match, without the leading dot. Case-sensitive.
    /// Default: `["pdf"]`.
    pub extensions: Vec<String>,

    /// Create `output_dir` (and its parents) before the first page is written.
    /// Default: true.
    ///
    /// When false, a missing output directory fails the run with
    /// [`crate::error::WriteError::OutputDirMissing`].
    pub create_output_dir: bool,

    /// What to do when one source fails. Default: [`FailurePolicy::Abort`].
    pub failure_policy: FailurePolicy,

    /// Optional progress callback for per-file and per-page events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(UPLOADS_DIR),
            output_dir: PathBuf::from(IMAGES_DIR),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            create_output_dir: true,
            failure_policy: FailurePolicy::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("extensions", &self.extensions)
            .field("create_output_dir", &self.create_output_dir)
            .field("failure_policy", &self.failure_policy)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }

    /// Builder pre-loaded with the install-relative layout:
    /// `<install_dir>/../uploads` in, `<install_dir>/../images` out.
    pub fn builder_for_install_dir(install_dir: impl AsRef<Path>) -> PipelineConfigBuilder {
        let root = install_dir.as_ref().join("..");
        Self::builder()
            .input_dir(root.join(UPLOADS_DIR))
            .output_dir(root.join(IMAGES_DIR))
    }
}

/// Canonical directory containing the running executable.
pub fn install_dir() -> Result<PathBuf, Pdf2SlidesError> {
    let exe = std::env::current_exe()
        .and_then(|p| p.canonicalize())
        .map_err(|e| {
            Pdf2SlidesError::InvalidConfig(format!("Cannot locate the running executable: {e}"))
        })?;

    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Pdf2SlidesError::InvalidConfig(format!(
            "Executable path has no parent directory: {}",
            exe.display()
        ))
    })
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Replace the extension list. Leading dots are stripped, so `".pdf"`
    /// and `"pdf"` are equivalent.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = exts
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn create_output_dir(mut self, v: bool) -> Self {
        self.config.create_output_dir = v;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// Duplicate extensions are dropped, keeping the first occurrence.
    pub fn build(mut self) -> Result<PipelineConfig, Pdf2SlidesError> {
        let mut seen = Vec::with_capacity(self.config.extensions.len());
        for ext in self.config.extensions.drain(..) {
            if ext.is_empty() {
                return Err(Pdf2SlidesError::InvalidConfig(
                    "Extensions must not be empty strings".into(),
                ));
            }
            if ext.contains(['/', '\\']) {
                return Err(Pdf2SlidesError::InvalidConfig(format!(
                    "Extension '{ext}' must not contain a path separator"
                )));
            }
            if !seen.contains(&ext) {
                seen.push(ext);
            }
        }
        if seen.is_empty() {
            return Err(Pdf2SlidesError::InvalidConfig(
                "At least one extension is required".into(),
            ));
        }
        self.config.extensions = seen;
        Ok(self.config)
    }
}

/// What the pipeline does when a single source fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Propagate the first error and stop the run. (default)
    #[default]
    Abort,
    /// Record the failure in the report and move on to the next source.
    Continue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PipelineConfig::builder().build().unwrap();
        assert_eq!(c.extensions, vec!["pdf"]);
        assert!(c.create_output_dir);
        assert_eq!(c.failure_policy, FailurePolicy::Abort);
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn install_relative_layout() {
        let c = PipelineConfig::builder_for_install_dir("/opt/deck/scripts")
            .build()
            .unwrap();
        assert_eq!(c.input_dir, PathBuf::from("/opt/deck/scripts/../uploads"));
        assert_eq!(c.output_dir, PathBuf::from("/opt/deck/scripts/../images"));
    }

    #[test]
    fn extensions_are_normalised_and_deduplicated() {
        let c = PipelineConfig::builder()
            .extensions([".pdf", "PDF", "pdf"])
            .build()
            .unwrap();
        assert_eq!(c.extensions, vec!["pdf", "PDF"]);
    }

    #[test]
    fn empty_extension_list_rejected() {
        let err = PipelineConfig::builder()
            .extensions(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2SlidesError::InvalidConfig(_)));
    }

    #[test]
    fn extension_with_separator_rejected() {
        let err = PipelineConfig::builder()
            .extensions(["../pdf"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("path separator"));
    }

    #[test]
    fn install_dir_resolves_to_existing_directory() {
        let dir = install_dir().unwrap();
        assert!(dir.is_dir());
        assert!(dir.is_absolute());
    }
}
