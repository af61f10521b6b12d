//! The pipeline driver: locate sources, rasterise each, write every page.
//!
//! Sources are handled strictly one after another. All pages of a source are
//! written, in ordinal order, before the next source is rasterised, so at
//! most one document's page images are held in memory at a time.

use crate::config::{FailurePolicy, PipelineConfig};
use crate::error::{FileError, Pdf2SlidesError, WriteError};
use crate::output::{ConversionReport, ConversionStats, FileReport};
use crate::pipeline::locate::{self, SourceFile};
use crate::pipeline::render::{PageImage, Rasterizer};
use crate::pipeline::write;
use std::cell::Cell;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs the scan-convert-write pipeline with an injected [`Rasterizer`].
///
/// # Example
/// ```rust,no_run
/// use pdf2slides::{Pipeline, PdfiumRasterizer, PipelineConfig};
///
/// # fn main() -> Result<(), pdf2slides::Pdf2SlidesError> {
/// let config = PipelineConfig::builder()
///     .input_dir("uploads")
///     .output_dir("images")
///     .build()?;
/// let report = Pipeline::new(config, PdfiumRasterizer::new()).run()?;
/// println!("{} JPEGs written", report.stats.pages_written);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<R> {
    config: PipelineConfig,
    rasterizer: R,
    output_dir_ready: Cell<bool>,
}

/// Pages written for one source, plus the error that stopped it, if any.
struct FileOutcome {
    outputs: Vec<PathBuf>,
    failure: Option<(Pdf2SlidesError, FileError)>,
    render_ms: u64,
    write_ms: u64,
}

impl<R: Rasterizer> Pipeline<R> {
    pub fn new(config: PipelineConfig, rasterizer: R) -> Self {
        Self {
            config,
            rasterizer,
            output_dir_ready: Cell::new(false),
        }
    }

    /// Scan the input directory and convert every matching source.
    ///
    /// # Errors
    /// Under [`FailurePolicy::Abort`] the first rasterisation or write error
    /// is returned and no later source is touched. Under
    /// [`FailurePolicy::Continue`] failures are recorded in the report and
    /// this only returns `Ok`.
    pub fn run(&self) -> Result<ConversionReport, Pdf2SlidesError> {
        let total_start = Instant::now();
        info!(
            "Starting run: {} → {}",
            self.config.input_dir.display(),
            self.config.output_dir.display()
        );

        let extensions = self.config.extensions.as_slice();
        let sources: Vec<SourceFile> = locate::find_by_extensions(&self.config.input_dir, extensions)
            .into_iter()
            .map(SourceFile::new)
            .collect();
        let total = sources.len();

        if let Some(ref cb) = self.config.progress_callback {
            cb.on_run_start(total);
        }

        let mut report = ConversionReport {
            files: Vec::with_capacity(total),
            stats: ConversionStats {
                files_found: total,
                ..Default::default()
            },
        };

        for (i, source) in sources.iter().enumerate() {
            let file_num = i + 1;
            if let Some(ref cb) = self.config.progress_callback {
                cb.on_file_start(file_num, total, &source.path);
            }
            info!("[{}/{}] Converting {}", file_num, total, source.path.display());

            let outcome = self.process(source);
            report.stats.pages_written += outcome.outputs.len();
            report.stats.render_duration_ms += outcome.render_ms;
            report.stats.write_duration_ms += outcome.write_ms;

            match outcome.failure {
                None => {
                    if let Some(ref cb) = self.config.progress_callback {
                        cb.on_file_complete(file_num, total, outcome.outputs.len());
                    }
                    report.stats.files_converted += 1;
                    report.files.push(FileReport {
                        source: source.path.clone(),
                        outputs: outcome.outputs,
                        error: None,
                    });
                }
                Some((err, record)) => {
                    if let Some(ref cb) = self.config.progress_callback {
                        cb.on_file_error(file_num, total, &err.to_string());
                    }
                    match self.config.failure_policy {
                        FailurePolicy::Abort => {
                            error!("Aborting run: {}", err);
                            return Err(err);
                        }
                        FailurePolicy::Continue => {
                            warn!("Skipping {}: {}", source.path.display(), err);
                            report.stats.files_failed += 1;
                            report.files.push(FileReport {
                                source: source.path.clone(),
                                outputs: outcome.outputs,
                                error: Some(record),
                            });
                        }
                    }
                }
            }
        }

        report.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
        info!(
            "Run complete: {}/{} files converted, {} images written in {}ms",
            report.stats.files_converted,
            total,
            report.stats.pages_written,
            report.stats.total_duration_ms
        );

        if let Some(ref cb) = self.config.progress_callback {
            cb.on_run_complete(total, report.stats.files_converted);
        }

        Ok(report)
    }

    /// Rasterise one source and write all of its pages.
    ///
    /// Returns the written paths in ordinal order. Pages written before a
    /// write failure are left on disk.
    pub fn convert_file(&self, source: &SourceFile) -> Result<Vec<PathBuf>, Pdf2SlidesError> {
        let outcome = self.process(source);
        match outcome.failure {
            None => Ok(outcome.outputs),
            Some((err, _)) => Err(err),
        }
    }

    fn process(&self, source: &SourceFile) -> FileOutcome {
        let mut outcome = FileOutcome {
            outputs: Vec::new(),
            failure: None,
            render_ms: 0,
            write_ms: 0,
        };

        let render_start = Instant::now();
        let rendered = self.rasterizer.rasterize(&source.path);
        outcome.render_ms = render_start.elapsed().as_millis() as u64;

        let pages: Vec<PageImage> = match rendered {
            Ok(images) => images
                .into_iter()
                .enumerate()
                .map(|(ordinal, image)| PageImage { ordinal, image })
                .collect(),
            Err(e) => {
                let record = FileError::RenderFailed {
                    detail: e.to_string(),
                };
                outcome.failure = Some((e.into(), record));
                return outcome;
            }
        };
        debug!(
            "Rasterised {} into {} page(s) in {}ms",
            source.path.display(),
            pages.len(),
            outcome.render_ms
        );

        let write_start = Instant::now();
        let total_pages = pages.len();
        for page in pages {
            match self.write(&page, source) {
                Ok(path) => {
                    if let Some(ref cb) = self.config.progress_callback {
                        cb.on_page_written(&source.path, page.ordinal, total_pages, &path);
                    }
                    outcome.outputs.push(path);
                }
                Err(e) => {
                    let record = FileError::WriteFailed {
                        page: page.ordinal,
                        detail: e.to_string(),
                    };
                    outcome.failure = Some((e.into(), record));
                    break;
                }
            }
        }
        outcome.write_ms = write_start.elapsed().as_millis() as u64;

        outcome
    }

    fn write(&self, page: &PageImage, source: &SourceFile) -> Result<PathBuf, WriteError> {
        self.ensure_output_dir()?;
        write::write_page(page, &source.base_name, &self.config.output_dir)
    }

    /// Create the output directory on first use when configured to.
    fn ensure_output_dir(&self) -> Result<(), WriteError> {
        if self.output_dir_ready.get() || !self.config.create_output_dir {
            return Ok(());
        }

        let dir = &self.config.output_dir;
        if !dir.is_dir() {
            std::fs::create_dir_all(dir).map_err(|source| WriteError::CreateOutputDir {
                path: dir.clone(),
                source,
            })?;
            info!("Created output directory {}", dir.display());
        }
        self.output_dir_ready.set(true);
        Ok(())
    }
}

/// Build a pipeline from `config` and run it once.
pub fn convert_directory<R: Rasterizer>(
    config: PipelineConfig,
    rasterizer: R,
) -> Result<ConversionReport, Pdf2SlidesError> {
    Pipeline::new(config, rasterizer).run()
}
