use std::sync::Arc;

use anyhow::Result;
use chrono::Local;

use enhanced_logger::config::{self, Settings};
use enhanced_logger::level::LogLevel;
use enhanced_logger::logger::{combine, Logger};
use enhanced_logger::summary::{self, RunInfo, SummaryGuard};

fn main() -> Result<()> {
    // Diagnostics of the logging subsystem itself go through tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "enhanced_logger=info".into()),
        )
        .init();

    let settings = Settings::load_or_default();
    let product = settings.product_name.clone();
    let run = RunInfo::new(
        &product,
        &settings.product_version,
        concat!("rust ", env!("CARGO_PKG_RUST_VERSION")),
    );
    let retention_days = settings.retention_days;

    let logger = Arc::new(Logger::new(settings));

    // A failed summary location degrades to console-only logging
    let guard = match summary::init_summary_file(&config::data_root(), &product, Local::now()) {
        Ok(file) => {
            tracing::info!("Writing log summary to: {}", file.path.display());
            Some(SummaryGuard::new(logger.cache(), file, run))
        }
        Err(e) => {
            tracing::warn!("File logging disabled: {}", e);
            None
        }
    };

    if let Ok(count) =
        summary::cleanup_old_summaries_with_retention(&config::summary_dir(), retention_days)
    {
        if count > 0 {
            tracing::info!("Cleaned up {} old summary files", count);
        }
    }

    logger.set_level(LogLevel::Verbose);
    logger.info("Starting up");
    logger.success("Connected to asset server");
    for _ in 0..3 {
        logger.warning("Retrying connection");
    }

    logger.console_on(LogLevel::Debug, Some("Player"), "Spawned at origin");
    logger.console_on(LogLevel::Error, None, "Health component missing");
    logger.error(combine(&["Save failed", "disk full"]));

    logger.set_level(LogLevel::Warning);
    logger.info("This line is filtered out");
    logger.verbose("So is this one");

    // The guard would also flush on drop; flushing here makes the exit explicit
    if let Some(guard) = &guard {
        guard.flush();
        tracing::info!("Summary written to: {}", guard.path().display());
    }

    Ok(())
}
