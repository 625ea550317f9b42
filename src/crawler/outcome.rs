//! Per-page outcome definitions
//!
//! Every URL popped from the frontier ends in exactly one [`PageOutcome`].
//! The crawl loop never propagates a page-level error; it matches on the
//! outcome instead, so the ignore-and-continue policy is a visible branch.

use std::fmt;

/// What happened to one dequeued URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// HTML page fetched with status 200 and parsed
    Processed(ProcessedPage),

    /// URL was not crawled, or the response carried nothing to parse
    Skipped(SkipReason),

    /// Transport-level failure; the URL is dropped for good
    Failed(FailureReason),
}

/// Details of a successfully parsed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedPage {
    /// Whether the cleaned text entered the corpus
    pub admission: Admission,

    /// Character count of the cleaned text
    pub chars: usize,

    /// New in-scope links appended to the frontier
    pub links_enqueued: usize,
}

/// Corpus admission decision for a parsed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Admission {
    /// Text was stored in the context map and appended to the corpus
    Admitted,

    /// Text was not longer than the minimum content length
    TooShort,

    /// Identical text was already admitted from another URL
    Duplicate,
}

/// Why a URL produced no parsed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// URL was already visited in this crawl
    AlreadyVisited,

    /// URL path ends with an asset extension
    Asset,

    /// Response status was not 200
    HttpStatus(u16),

    /// Response was not HTML
    NotHtml(String),
}

/// Why a request failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Request exceeded the per-request timeout
    Timeout,

    /// Connection, DNS, TLS or protocol error
    Network(String),

    /// Response body could not be read
    Body(String),
}

impl PageOutcome {
    /// Returns true if the URL joins the visited set and consumes budget
    ///
    /// Any response that came back counts, whatever its status or content
    /// type. Pre-request skips and transport failures do not.
    pub fn counts_as_visited(&self) -> bool {
        match self {
            Self::Processed(_) => true,
            Self::Skipped(reason) => reason.made_request(),
            Self::Failed(_) => false,
        }
    }

    /// Returns true if the page contributed a corpus entry
    pub fn is_admitted(&self) -> bool {
        matches!(
            self,
            Self::Processed(ProcessedPage {
                admission: Admission::Admitted,
                ..
            })
        )
    }

    /// Returns true if a network request was made for this URL
    pub fn made_request(&self) -> bool {
        match self {
            Self::Processed(_) | Self::Failed(_) => true,
            Self::Skipped(reason) => reason.made_request(),
        }
    }
}

impl SkipReason {
    /// Returns true for skips decided after a response arrived
    pub fn made_request(&self) -> bool {
        matches!(self, Self::HttpStatus(_) | Self::NotHtml(_))
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processed(page) => write!(
                f,
                "processed ({}, {} chars, {} new links)",
                page.admission, page.chars, page.links_enqueued
            ),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

impl fmt::Display for Admission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Admitted => "admitted",
            Self::TooShort => "too short",
            Self::Duplicate => "duplicate",
        };
        f.write_str(label)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyVisited => f.write_str("already visited"),
            Self::Asset => f.write_str("asset url"),
            Self::HttpStatus(code) => write!(f, "HTTP {}", code),
            Self::NotHtml(content_type) => write!(f, "content type {:?}", content_type),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("request timeout"),
            Self::Network(err) => write!(f, "network error: {}", err),
            Self::Body(err) => write!(f, "body read error: {}", err),
        }
    }
}
