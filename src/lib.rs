//! Enhanced Logger - leveled logging with de-duplicated run summaries
//!
//! Messages pass a severity threshold, are rendered with per-level prefixes
//! and their call site, and are aggregated by exact text so each run can end
//! with a compact markdown summary of what was logged, how often, and when.

pub mod config;
pub mod level;
pub mod logger;
pub mod summary;
