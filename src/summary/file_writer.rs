//! Durable end-of-run summary files
//!
//! Serializes the drained cache into a timestamped markdown file, one line per
//! distinct message. The file path is fixed at process start; every flush in
//! the same run appends to it.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use thiserror::Error;

use super::cache::{Occurrence, SummaryCache};

/// Subdirectory of the data root that holds summary files
pub const SUMMARY_DIR_NAME: &str = "EnhancedLogger";

/// Errors surfaced while preparing the summary file location
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("failed to create summary directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle to the per-run summary file
#[derive(Debug, Clone)]
pub struct SummaryFile {
    /// Full path to the markdown summary, fixed at process start
    pub path: PathBuf,
}

/// Metadata written in the summary header
#[derive(Debug, Clone)]
pub struct RunInfo {
    /// Product name of the host application
    pub product: String,
    /// Version of the host application
    pub version: String,
    /// Host runtime version string (e.g. a toolchain version)
    pub runtime: String,
}

impl RunInfo {
    /// Create header metadata for this run
    pub fn new(
        product: impl Into<String>,
        version: impl Into<String>,
        runtime: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
            runtime: runtime.into(),
        }
    }

    /// "Dev" in debug builds, "Release" otherwise
    fn build_kind() -> &'static str {
        if cfg!(debug_assertions) {
            "Dev"
        } else {
            "Release"
        }
    }

    fn header_title(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.product,
            self.version,
            self.runtime,
            Self::build_kind()
        )
    }
}

/// Generate the timestamped summary file path inside the summary directory
pub fn summary_file_path(summary_dir: &Path, product: &str, start: DateTime<Local>) -> PathBuf {
    let timestamp = start.format("%Y-%m-%d_%H-%M-%S");
    summary_dir.join(format!("{}_{}.md", product, timestamp))
}

/// Compute the per-run summary file path and create its directory
///
/// The timestamp is taken from `start` so all flushes of one run share a file.
/// A directory that cannot be created is a startup error; the host should
/// degrade to console-only logging rather than abort.
pub fn init_summary_file(
    data_root: &Path,
    product: &str,
    start: DateTime<Local>,
) -> Result<SummaryFile, SummaryError> {
    let summary_dir = data_root.join(SUMMARY_DIR_NAME);
    fs::create_dir_all(&summary_dir).map_err(|source| SummaryError::CreateDir {
        path: summary_dir.clone(),
        source,
    })?;

    Ok(SummaryFile {
        path: summary_file_path(&summary_dir, product, start),
    })
}

/// Drain the cache and append its contents to the summary file
///
/// Intended for orderly shutdown, but safe to call at any number of
/// shutdown-adjacent points: an empty snapshot writes nothing. A failed write
/// is reported through tracing and the drained entries are dropped; nothing
/// here can take down the host.
pub fn flush_summary(cache: &SummaryCache, file: &SummaryFile, run: &RunInfo) {
    let entries = cache.drain();
    if entries.is_empty() {
        return;
    }

    if let Err(e) = write_entries(&file.path, run, &entries) {
        tracing::error!(
            "Failed to flush log summary to {}: {}",
            file.path.display(),
            e
        );
    }
}

fn write_entries(path: &Path, run: &RunInfo, entries: &[(String, Occurrence)]) -> io::Result<()> {
    // The directory existed at init time but may have been removed since
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = OpenOptions::new().create(true).append(true).open(path)?;

    writeln!(writer, "# Log Summary of {}", run.header_title())?;
    writeln!(writer)?;

    for (message, entry) in entries {
        writeln!(
            writer,
            "{} - from `{}` to `{}` shown **{}x**",
            escape_markdown(message),
            entry.first_seen.format("%H:%M:%S"),
            entry.last_seen.format("%H:%M:%S"),
            entry.count
        )?;
    }

    writer.flush()
}

/// Backslash-escape characters that would change the markdown structure
fn escape_markdown(message: &str) -> String {
    message
        .replace('*', "\\*")
        .replace('_', "\\_")
        .replace('`', "\\`")
}

/// Guard that flushes the cache to the summary file when dropped
///
/// Hold one in the composition root so the summary is written during normal
/// shutdown even when no explicit flush runs.
pub struct SummaryGuard {
    cache: Arc<SummaryCache>,
    file: SummaryFile,
    run: RunInfo,
}

impl SummaryGuard {
    /// Create a guard for the given cache and target file
    pub fn new(cache: Arc<SummaryCache>, file: SummaryFile, run: RunInfo) -> Self {
        Self { cache, file, run }
    }

    /// Flush now instead of waiting for drop. Safe to call more than once.
    pub fn flush(&self) {
        flush_summary(&self.cache, &self.file, &self.run);
    }

    /// Path of the summary file this guard writes to
    pub fn path(&self) -> &Path {
        &self.file.path
    }
}

impl Drop for SummaryGuard {
    fn drop(&mut self) {
        flush_summary(&self.cache, &self.file, &self.run);
    }
}
