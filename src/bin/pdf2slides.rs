//! CLI binary for pdf2slides.
//!
//! Takes no arguments: converts `<install-dir>/../uploads/*.pdf` into
//! `<install-dir>/../images/<base>-slide-<N>.jpg` once and exits. Any
//! rasterisation or write error ends the process with a non-zero status.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pdf2slides::{install_dir, ConversionProgressCallback, PdfiumRasterizer, Pipeline, PipelineConfig};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Terminal progress ────────────────────────────────────────────────────────

/// One bar over the source files, with a log line per finished file.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
    }

    fn on_file_start(&self, _file_num: usize, _total_files: usize, source: &Path) {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.set_message(name);
    }

    fn on_page_written(&self, source: &Path, ordinal: usize, total_pages: usize, _output: &Path) {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar
            .set_message(format!("{name} page {}/{}", ordinal + 1, total_pages));
    }

    fn on_file_complete(&self, file_num: usize, total_files: usize, pages_written: usize) {
        self.bar.println(format!(
            "  {} File {:>3}/{:<3}  {}",
            green("✓"),
            file_num,
            total_files,
            dim(&format!("{pages_written} image(s)")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, file_num: usize, total_files: usize, error: &str) {
        let first_line = error.lines().next().unwrap_or(error);
        self.bar.println(format!(
            "  {} File {:>3}/{:<3}  {}",
            red("✗"),
            file_num,
            total_files,
            red(first_line),
        ));
        self.bar.abandon();
    }

    fn on_run_complete(&self, total_files: usize, success_count: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {}/{} PDF files converted",
            green("✔"),
            bold(&success_count.to_string()),
            total_files
        );
    }
}

fn main() -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs on a terminal.
    let show_progress = io::stderr().is_terminal();
    let filter = if show_progress { "error" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Install-relative layout ──────────────────────────────────────────
    let install = install_dir().context("Failed to resolve the install directory")?;
    let mut builder = PipelineConfig::builder_for_install_dir(&install);
    if show_progress {
        builder = builder.progress_callback(CliProgressCallback::new());
    }
    let config = builder.build().context("Invalid pipeline configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    let rasterizer = PdfiumRasterizer::new().with_library_dir(&install);
    let report = Pipeline::new(config, rasterizer)
        .run()
        .context("PDF conversion failed")?;

    if !show_progress {
        for path in report.outputs() {
            println!("{}", path.display());
        }
    }

    Ok(())
}
