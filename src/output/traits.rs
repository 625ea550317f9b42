//! Output handler traits and types
//!
//! This module defines the trait interface for writers that persist a
//! finished crawl, and the errors they report.

use crate::crawler::CrawlOutput;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Context entry missing for admitted page {0}")]
    MissingContext(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for writers that persist a crawl result
pub trait OutputHandler {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Writes the crawl result
    fn write(&self, output: &CrawlOutput) -> OutputResult<()>;
}
