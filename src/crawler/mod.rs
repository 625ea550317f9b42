//! Crawler module for site traversal and text extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with per-request timeouts
//! - HTML parsing, boilerplate stripping and link extraction
//! - Content fingerprinting for duplicate suppression
//! - Per-crawl session state and the breadth-first crawl loop

mod engine;
mod fetcher;
mod fingerprint;
mod outcome;
mod parser;
mod session;

pub use engine::{crawl_site, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use fingerprint::content_fingerprint;
pub use outcome::{Admission, FailureReason, PageOutcome, ProcessedPage, SkipReason};
pub use parser::{collapse_whitespace, parse_html, ParsedPage, BOILERPLATE_TAGS};
pub use session::{AdmittedPage, CrawlOutput, CrawlSession};
