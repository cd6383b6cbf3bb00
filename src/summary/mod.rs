//! Log aggregation and end-of-run summary files
//!
//! Collects accepted log lines into an in-memory cache keyed by exact message
//! text, and flushes a de-duplicated markdown summary to disk at shutdown.
//! Old summary files are trimmed by age.

mod cache;
mod file_writer;
mod retention;

pub use cache::{Occurrence, SummaryCache};
pub use file_writer::{
    flush_summary, init_summary_file, summary_file_path, RunInfo, SummaryError, SummaryFile,
    SummaryGuard, SUMMARY_DIR_NAME,
};
pub use retention::{
    cleanup_old_summaries, cleanup_old_summaries_with_retention, DEFAULT_RETENTION_DAYS,
};
