//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl:
//! where it started, how the budget was spent, and which pages made it into
//! the corpus.

use crate::crawler::CrawlOutput;
use crate::output::traits::{OutputHandler, OutputResult};
use std::path::{Path, PathBuf};

/// Generates a markdown summary file for a crawl
///
/// # Arguments
///
/// * `output` - The finished crawl
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(output: &CrawlOutput, output_path: &Path) -> OutputResult<()> {
    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    std::fs::write(output_path, format_markdown_summary(output, &generated_at))?;
    Ok(())
}

/// Formats a crawl as markdown
///
/// # Arguments
///
/// * `output` - The finished crawl
/// * `generated_at` - Timestamp printed in the header
pub fn format_markdown_summary(output: &CrawlOutput, generated_at: &str) -> String {
    let stats = &output.stats;
    let mut md = String::new();

    md.push_str("# Site Corpus Crawl Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", output.seed));
    md.push_str(&format!("- **Domain**: {}\n", output.domain));
    md.push_str(&format!("- **Generated**: {}\n", generated_at));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n\n",
        stats.duration.as_secs_f64()
    ));

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Visited**: {}\n", output.visited.len()));
    md.push_str(&format!("- **Requests Made**: {}\n", stats.requests));
    md.push_str(&format!("- **Corpus Entries**: {}\n", output.corpus.len()));
    md.push_str(&format!(
        "- **Corpus Characters**: {}\n",
        output.admitted.iter().map(|p| p.chars).sum::<usize>()
    ));
    md.push_str(&format!(
        "- **Left in Frontier**: {}\n",
        stats.frontier_remaining
    ));
    md.push_str(&format!(
        "- **Admission Rate**: {:.2}%\n\n",
        stats.admission_rate()
    ));

    md.push_str("## Page Outcome Breakdown\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Admitted | {} |\n", stats.admitted));
    md.push_str(&format!("| Too Short | {} |\n", stats.too_short));
    md.push_str(&format!("| Duplicate Content | {} |\n", stats.duplicates));
    md.push_str(&format!("| Non-HTML | {} |\n", stats.non_html));
    for (code, count) in &stats.http_errors {
        md.push_str(&format!("| HTTP {} | {} |\n", code, count));
    }
    md.push_str(&format!("| Transport Failure | {} |\n", stats.failures));
    md.push_str(&format!(
        "| Asset Skipped | {} |\n\n",
        stats.assets_skipped
    ));

    md.push_str("## Corpus Pages\n\n");
    if output.admitted.is_empty() {
        md.push_str("_No page passed the content filters._\n");
    } else {
        md.push_str("| # | URL | Title | Characters |\n");
        md.push_str("|---|-----|-------|------------|\n");
        for (i, page) in output.admitted.iter().enumerate() {
            let title = page
                .title
                .as_deref()
                .map(escape_cell)
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                i + 1,
                page.url,
                title,
                page.chars
            ));
        }
    }

    md
}

/// Keeps a value from breaking the markdown table it sits in
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Output handler writing the markdown summary to a file
#[derive(Debug, Clone)]
pub struct MarkdownSummaryWriter {
    path: PathBuf,
}

impl MarkdownSummaryWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownSummaryWriter {
    fn name(&self) -> &'static str {
        "markdown summary"
    }

    fn write(&self, output: &CrawlOutput) -> OutputResult<()> {
        generate_markdown_summary(output, &self.path)
    }
}
