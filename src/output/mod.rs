//! Output module for crawl results
//!
//! This module handles:
//! - Building the corpus excerpt used for relevance scoring
//! - Recording and printing crawl statistics
//! - Exporting the corpus as CSV
//! - Generating markdown summaries of crawl results

mod csv_export;
mod excerpt;
mod markdown;
pub mod stats;
mod traits;

pub use csv_export::{write_corpus_csv, CsvCorpusWriter, CORPUS_HEADERS};
pub use excerpt::build_excerpt;
pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownSummaryWriter};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};

use crate::config::OutputConfig;
use crate::crawler::CrawlOutput;

/// Builds the output handlers enabled by the configuration
pub fn handlers_for(config: &OutputConfig) -> Vec<Box<dyn OutputHandler>> {
    let mut handlers: Vec<Box<dyn OutputHandler>> = Vec::new();

    if let Some(path) = &config.corpus_path {
        handlers.push(Box::new(CsvCorpusWriter::new(path)));
    }

    if let Some(path) = &config.summary_path {
        handlers.push(Box::new(MarkdownSummaryWriter::new(path)));
    }

    handlers
}

/// Runs every configured output handler over a finished crawl
///
/// # Returns
///
/// * `Ok(usize)` - Number of handlers that wrote output
/// * `Err(OutputError)` - The first handler that failed
pub fn write_outputs(output: &CrawlOutput, config: &OutputConfig) -> OutputResult<usize> {
    let handlers = handlers_for(config);

    for handler in &handlers {
        tracing::info!("Writing {}", handler.name());
        handler.write(output)?;
    }

    Ok(handlers.len())
}
