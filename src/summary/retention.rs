//! Summary file retention
//!
//! Each run writes its own summary file, so old ones accumulate; this trims
//! them by age.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up summary files older than the default retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_summaries(summary_dir: &Path) -> Result<usize> {
    cleanup_old_summaries_with_retention(summary_dir, DEFAULT_RETENTION_DAYS)
}

/// Clean up summary files older than the specified number of days
///
/// Returns the number of files deleted.
pub fn cleanup_old_summaries_with_retention(
    summary_dir: &Path,
    retention_days: u64,
) -> Result<usize> {
    if !summary_dir.exists() {
        return Ok(0);
    }

    let retention_duration = Duration::from_secs(retention_days * 24 * 60 * 60);
    let cutoff = SystemTime::now()
        .checked_sub(retention_duration)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted_count = 0;

    for entry in fs::read_dir(summary_dir)? {
        let entry = entry?;
        let path = entry.path();

        // Only touch markdown summaries, nothing else living in the directory
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !name.ends_with(".md") {
                continue;
            }
        } else {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff && fs::remove_file(&path).is_ok() {
                    deleted_count += 1;
                }
            }
        }
    }

    Ok(deleted_count)
}
