//! Leveled console logger feeding the summary cache
//!
//! The logger is an explicitly constructed service: build one at the
//! composition root, share it with `Arc`, and register a `SummaryGuard` so
//! the aggregated summary is written at shutdown. Call sites are captured
//! through `#[track_caller]`, so every line names the file and line that
//! produced it.

use std::io::Write;
use std::panic::Location;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::config::Settings;
use crate::level::LogLevel;
use crate::summary::SummaryCache;

/// Placeholder rendered when a subject was expected but is missing
const UNNAMED_SUBJECT: &str = "<unnamed>";

/// Leveled logger with a severity threshold and summary aggregation
pub struct Logger {
    settings: RwLock<Settings>,
    cache: Arc<SummaryCache>,
}

impl Logger {
    /// Create a logger from the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            cache: Arc::new(SummaryCache::new()),
        }
    }

    /// Cache handle for wiring up a summary guard
    pub fn cache(&self) -> Arc<SummaryCache> {
        Arc::clone(&self.cache)
    }

    /// Get the current threshold level
    pub fn current_level(&self) -> LogLevel {
        self.settings
            .read()
            .map(|s| s.current_level)
            .unwrap_or(LogLevel::Info)
    }

    /// Change the threshold level at runtime
    pub fn set_level(&self, level: LogLevel) {
        if let Ok(mut settings) = self.settings.write() {
            settings.current_level = level;
        }
    }

    /// For catastrophic errors that break the application
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, None, message.as_ref(), Location::caller());
    }

    /// For severe issues that should not be ignored
    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, None, message.as_ref(), Location::caller());
    }

    /// For temporary messages during development of a module
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, None, message.as_ref(), Location::caller());
    }

    /// For general information that is useful to know
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, None, message.as_ref(), Location::caller());
    }

    /// For successful operations or states
    #[track_caller]
    pub fn success(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Success, None, message.as_ref(), Location::caller());
    }

    /// For detail that would drown the info level
    #[track_caller]
    pub fn verbose(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Verbose, None, message.as_ref(), Location::caller());
    }

    /// Log at an explicitly chosen level
    #[track_caller]
    pub fn console(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log(level, None, message.as_ref(), Location::caller());
    }

    /// Log at an explicitly chosen level, naming the subject the message is about
    ///
    /// A missing subject degrades to a placeholder rather than an error.
    #[track_caller]
    pub fn console_on(&self, level: LogLevel, subject: Option<&str>, message: impl AsRef<str>) {
        self.log(
            level,
            Some(subject.unwrap_or(UNNAMED_SUBJECT)),
            message.as_ref(),
            Location::caller(),
        );
    }

    fn log(&self, level: LogLevel, subject: Option<&str>, message: &str, location: &Location<'_>) {
        let (prefix, write_to_file) = match self.settings.read() {
            Ok(settings) => {
                if !level.visible_under(settings.current_level) {
                    return;
                }
                (settings.prefix(level).to_string(), settings.write_to_file)
            }
            // A poisoned settings lock silences output rather than panicking
            Err(_) => return,
        };

        let line = format_line(&prefix, location, subject, message);

        // stderr failures are swallowed; logging must never crash the host
        let _ = writeln!(std::io::stderr(), "{}", line);

        if write_to_file {
            self.cache.record(&line);
        }
    }
}

/// Format the final message text: prefix, call site, optional subject, user text
fn format_line(
    prefix: &str,
    location: &Location<'_>,
    subject: Option<&str>,
    message: &str,
) -> String {
    let file_stem = Path::new(location.file())
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(location.file());

    match subject {
        Some(subject) => format!(
            "{} | {} ({}) on {} : {}",
            prefix,
            file_stem,
            location.line(),
            subject,
            message
        ),
        None => format!(
            "{} | {} ({}) : {}",
            prefix,
            file_stem,
            location.line(),
            message
        ),
    }
}

/// Join message parts with ` : `, skipping empty parts
pub fn combine(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" : ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger_at(level: LogLevel) -> Logger {
        let mut settings = Settings::default();
        settings.current_level = level;
        Logger::new(settings)
    }

    #[test]
    fn test_below_threshold_messages_do_not_reach_the_cache() {
        let logger = logger_at(LogLevel::Info);

        logger.verbose("too chatty");
        logger.success("also filtered");
        assert!(logger.cache().is_empty());

        logger.error("kept");
        assert_eq!(logger.cache().len(), 1);
    }

    #[test]
    fn test_none_threshold_drops_everything() {
        let logger = logger_at(LogLevel::None);
        logger.error("even errors");
        assert!(logger.cache().is_empty());
    }

    #[test]
    fn test_write_to_file_gate_keeps_cache_empty() {
        let mut settings = Settings::default();
        settings.write_to_file = false;
        let logger = Logger::new(settings);

        logger.error("shown but not aggregated");
        assert!(logger.cache().is_empty());
    }

    #[test]
    fn test_recorded_line_is_fully_formatted() {
        let logger = logger_at(LogLevel::Verbose);
        logger.error("boom");

        let drained = logger.cache().drain();
        assert_eq!(drained.len(), 1);

        let line = &drained[0].0;
        assert!(line.starts_with("[ERROR] | logger ("));
        assert!(line.ends_with(") : boom"));
    }

    #[test]
    fn test_console_on_names_the_subject() {
        let logger = logger_at(LogLevel::Verbose);
        logger.console_on(LogLevel::Debug, Some("Player"), "spawned");

        let drained = logger.cache().drain();
        assert!(drained[0].0.contains(") on Player : spawned"));
    }

    #[test]
    fn test_missing_subject_degrades_to_placeholder() {
        let logger = logger_at(LogLevel::Verbose);
        logger.console_on(LogLevel::Debug, None, "spawned");

        let drained = logger.cache().drain();
        assert!(drained[0].0.contains(") on <unnamed> : spawned"));
    }

    #[test]
    fn test_identical_call_sites_aggregate() {
        let logger = logger_at(LogLevel::Verbose);
        for _ in 0..3 {
            logger.info("retrying");
        }

        // Same loop body means same file and line, so one entry with count 3
        let drained = logger.cache().drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].1.count, 3);
    }

    #[test]
    fn test_set_level_changes_filtering() {
        let logger = logger_at(LogLevel::Verbose);
        assert_eq!(logger.current_level(), LogLevel::Verbose);

        logger.set_level(LogLevel::Error);
        assert_eq!(logger.current_level(), LogLevel::Error);

        logger.warning("now filtered");
        assert!(logger.cache().is_empty());
    }

    #[test]
    fn test_combine_joins_and_skips_empty_parts() {
        assert_eq!(combine(&["a", "b"]), "a : b");
        assert_eq!(combine(&["a", "", "c"]), "a : c");
        assert_eq!(combine(&["only"]), "only");
        assert_eq!(combine(&[]), "");
    }
}
