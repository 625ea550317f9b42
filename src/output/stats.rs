//! Crawl statistics
//!
//! This module tallies page outcomes during a crawl and prints a summary.

use crate::crawler::{Admission, PageOutcome, SkipReason};
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// URLs popped from the frontier
    pub dequeued: usize,

    /// Network requests that ended in a page outcome (retries not counted)
    pub requests: usize,

    /// Pages whose text entered the corpus
    pub admitted: usize,

    /// Parsed pages whose text was too short
    pub too_short: usize,

    /// Parsed pages whose text was already in the corpus
    pub duplicates: usize,

    /// Pages skipped before a request because of their extension
    pub assets_skipped: usize,

    /// Responses that were not HTML
    pub non_html: usize,

    /// Non-200 responses by status code
    pub http_errors: BTreeMap<u16, usize>,

    /// Transport failures (timeouts, connection errors, body errors)
    pub failures: usize,

    /// Links appended to the frontier
    pub links_enqueued: usize,

    /// URLs still waiting when the crawl stopped
    pub frontier_remaining: usize,

    /// Wall-clock time of the crawl
    pub duration: Duration,
}

impl CrawlStatistics {
    /// Tallies one page outcome
    pub fn record(&mut self, outcome: &PageOutcome) {
        self.dequeued += 1;
        if outcome.made_request() {
            self.requests += 1;
        }

        match outcome {
            PageOutcome::Processed(page) => {
                self.links_enqueued += page.links_enqueued;
                match page.admission {
                    Admission::Admitted => self.admitted += 1,
                    Admission::TooShort => self.too_short += 1,
                    Admission::Duplicate => self.duplicates += 1,
                }
            }
            PageOutcome::Skipped(SkipReason::AlreadyVisited) => {}
            PageOutcome::Skipped(SkipReason::Asset) => self.assets_skipped += 1,
            PageOutcome::Skipped(SkipReason::NotHtml(_)) => self.non_html += 1,
            PageOutcome::Skipped(SkipReason::HttpStatus(code)) => {
                *self.http_errors.entry(*code).or_insert(0) += 1;
            }
            PageOutcome::Failed(_) => self.failures += 1,
        }
    }

    /// Pages parsed as HTML, whatever their admission
    pub fn pages_parsed(&self) -> usize {
        self.admitted + self.too_short + self.duplicates
    }

    /// Total non-200 responses
    pub fn total_http_errors(&self) -> usize {
        self.http_errors.values().sum()
    }

    /// Share of parsed pages that were admitted, in percent
    pub fn admission_rate(&self) -> f64 {
        let parsed = self.pages_parsed();
        if parsed == 0 {
            0.0
        } else {
            (self.admitted as f64 / parsed as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  URLs dequeued: {}", stats.dequeued);
    println!("  Requests made: {}", stats.requests);
    println!("  Links enqueued: {}", stats.links_enqueued);
    println!("  Left in frontier: {}", stats.frontier_remaining);
    println!("  Duration: {:.1}s", stats.duration.as_secs_f64());
    println!();

    println!("HTML Pages:");
    println!("  Admitted: {}", stats.admitted);
    println!("  Too short: {}", stats.too_short);
    println!("  Duplicate content: {}", stats.duplicates);
    println!("  Admission rate: {:.1}%", stats.admission_rate());
    println!();

    println!("Skipped / Failed:");
    println!("  Assets skipped: {}", stats.assets_skipped);
    println!("  Non-HTML responses: {}", stats.non_html);
    println!("  Transport failures: {}", stats.failures);
    if stats.http_errors.is_empty() {
        println!("  HTTP errors: 0");
    } else {
        println!("  HTTP errors: {}", stats.total_http_errors());
        for (code, count) in &stats.http_errors {
            println!("    {}: {}", code, count);
        }
    }
}
