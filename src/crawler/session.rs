//! Per-crawl state
//!
//! A [`CrawlSession`] is created by every `crawl` call and consumed when the
//! call returns, so repeated or concurrent crawls never share a frontier,
//! visited set, fingerprint set, context map or corpus.

use crate::crawler::fingerprint::content_fingerprint;
use crate::crawler::outcome::{Admission, PageOutcome};
use crate::output::{build_excerpt, CrawlStatistics};
use crate::url::DomainScope;
use crate::UrlError;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// A page admitted into the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedPage {
    /// URL the page was requested under (the context map key)
    pub url: String,

    /// Page title, when the document had one
    pub title: Option<String>,

    /// Character count of the cleaned text
    pub chars: usize,
}

/// Mutable state of one crawl
#[derive(Debug)]
pub struct CrawlSession {
    seed: Url,
    scope: DomainScope,

    /// FIFO queue of URLs awaiting a fetch attempt
    frontier: VecDeque<Url>,

    /// Every URL ever placed on the frontier, the seed included
    enqueued: HashSet<String>,

    visited: HashSet<String>,
    visit_order: Vec<String>,

    fingerprints: HashSet<String>,
    context: HashMap<String, String>,
    corpus: Vec<String>,
    admitted: Vec<AdmittedPage>,

    stats: CrawlStatistics,
}

impl CrawlSession {
    /// Starts a session with the seed as the only frontier entry
    pub fn new(seed: Url) -> Result<Self, UrlError> {
        let scope = DomainScope::from_seed(&seed)?;

        let mut enqueued = HashSet::new();
        enqueued.insert(seed.as_str().to_string());

        Ok(Self {
            frontier: VecDeque::from([seed.clone()]),
            seed,
            scope,
            enqueued,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            fingerprints: HashSet::new(),
            context: HashMap::new(),
            corpus: Vec::new(),
            admitted: Vec::new(),
            stats: CrawlStatistics::default(),
        })
    }

    /// Returns the domain scope derived from the seed
    pub fn scope(&self) -> &DomainScope {
        &self.scope
    }

    /// Pops the oldest frontier entry
    pub fn pop_next(&mut self) -> Option<Url> {
        self.frontier.pop_front()
    }

    /// Returns the number of URLs waiting on the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Returns true if the URL was already visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Returns the size of the visited set
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Adds a URL to the visited set
    ///
    /// Returns false if it was already there.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        let inserted = self.visited.insert(url.as_str().to_string());
        if inserted {
            self.visit_order.push(url.as_str().to_string());
        }
        inserted
    }

    /// Appends a discovered link to the frontier if it may ever be crawled
    ///
    /// The link must be in scope, not visited, and never enqueued before.
    /// Returns true if it was appended.
    pub fn try_enqueue(&mut self, url: Url) -> bool {
        if !self.scope.contains(&url) {
            tracing::trace!("Out of scope: {}", url);
            return false;
        }

        if self.visited.contains(url.as_str()) {
            return false;
        }

        if !self.enqueued.insert(url.as_str().to_string()) {
            return false;
        }

        tracing::trace!("Enqueued: {}", url);
        self.frontier.push_back(url);
        true
    }

    /// Decides whether cleaned text enters the corpus, and stores it if so
    ///
    /// The length filter runs first, so short pages never take a fingerprint.
    /// A duplicate gets no context entry of its own.
    pub fn admit(
        &mut self,
        url: &Url,
        title: Option<String>,
        text: String,
        min_content_length: usize,
    ) -> Admission {
        let chars = text.chars().count();
        if chars <= min_content_length {
            return Admission::TooShort;
        }

        if !self.fingerprints.insert(content_fingerprint(&text)) {
            return Admission::Duplicate;
        }

        self.context.insert(url.as_str().to_string(), text.clone());
        self.corpus.push(text);
        self.admitted.push(AdmittedPage {
            url: url.as_str().to_string(),
            title,
            chars,
        });
        Admission::Admitted
    }

    /// Tallies a page outcome into the crawl statistics
    pub fn record(&mut self, outcome: &PageOutcome) {
        self.stats.record(outcome);
    }

    /// Ends the session and hands over everything it accumulated
    pub fn finish(self, duration: Duration) -> CrawlOutput {
        let mut stats = self.stats;
        stats.frontier_remaining = self.frontier.len();
        stats.duration = duration;

        CrawlOutput {
            seed: self.seed.to_string(),
            domain: self.scope.location().to_string(),
            context: self.context,
            corpus: self.corpus,
            admitted: self.admitted,
            visited: self.visit_order,
            frontier_remaining: self.frontier.into_iter().map(String::from).collect(),
            stats,
        }
    }
}

/// Everything one crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    /// Seed URL the crawl started from
    pub seed: String,

    /// Network location the crawl was confined to
    pub domain: String,

    /// URL → cleaned text, for admitted pages only
    pub context: HashMap<String, String>,

    /// Cleaned texts of admitted pages, in processing order
    pub corpus: Vec<String>,

    /// Admitted pages, parallel to `corpus`
    pub admitted: Vec<AdmittedPage>,

    /// Visited URLs in the order they were visited
    pub visited: Vec<String>,

    /// URLs still waiting on the frontier when the crawl stopped
    pub frontier_remaining: Vec<String>,

    /// Outcome counts and timing
    pub stats: CrawlStatistics,
}

impl CrawlOutput {
    /// Returns the corpus as handed to the keyword grouping service
    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    /// Returns the cleaned text stored for a URL
    pub fn context_for(&self, url: &str) -> Option<&str> {
        self.context.get(url).map(String::as_str)
    }

    /// Returns the first `max_chars` characters of the space-joined corpus
    pub fn excerpt(&self, max_chars: usize) -> String {
        build_excerpt(&self.corpus, max_chars)
    }

    /// Returns true if no page made it into the corpus
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Splits the output into the context map and the corpus
    pub fn into_parts(self) -> (HashMap<String, String>, Vec<String>) {
        (self.context, self.corpus)
    }
}
