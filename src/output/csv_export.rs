//! Corpus CSV export
//!
//! Writes one row per admitted page, in corpus order, with the columns
//! `URL` and `Page Text`. Keyword scoring tools read this file directly.

use crate::crawler::CrawlOutput;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use std::io::Write;
use std::path::PathBuf;

/// Column headers of the corpus CSV
pub const CORPUS_HEADERS: [&str; 2] = ["URL", "Page Text"];

/// Writes the corpus of a crawl as CSV to any writer
pub fn write_corpus_csv<W: Write>(output: &CrawlOutput, writer: W) -> OutputResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(CORPUS_HEADERS)?;

    for page in &output.admitted {
        let text = output
            .context_for(&page.url)
            .ok_or_else(|| OutputError::MissingContext(page.url.clone()))?;
        csv_writer.write_record([page.url.as_str(), text])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Output handler writing the corpus CSV to a file
#[derive(Debug, Clone)]
pub struct CsvCorpusWriter {
    path: PathBuf,
}

impl CsvCorpusWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for CsvCorpusWriter {
    fn name(&self) -> &'static str {
        "corpus csv"
    }

    fn write(&self, output: &CrawlOutput) -> OutputResult<()> {
        let file = std::fs::File::create(&self.path)?;
        write_corpus_csv(output, file)
    }
}
