//! Crawler engine - the breadth-first crawl loop
//!
//! This module contains the main crawl loop that:
//! - Pops URLs from the frontier in FIFO order
//! - Skips visited and asset URLs without touching the network
//! - Fetches, parses and admits page text
//! - Enqueues same-domain links
//! - Stops when the frontier is empty or the page budget is spent

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::outcome::{FailureReason, PageOutcome, ProcessedPage, SkipReason};
use crate::crawler::parser::parse_html;
use crate::crawler::session::{CrawlOutput, CrawlSession};
use crate::url::{has_skipped_extension, parse_seed};
use crate::CorpusError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Sequential, polite single-domain crawler
///
/// The crawler holds only configuration and an HTTP client. All crawl state
/// lives in a [`CrawlSession`] created by each [`Crawler::crawl`] call.
pub struct Crawler {
    settings: CrawlerConfig,
    client: Client,
    delay: Duration,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `settings` - Budget, delay, timeout and filter settings
    /// * `user_agent` - The fixed identifying user agent
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CorpusError)` - The HTTP client could not be built
    pub fn new(settings: CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, CorpusError> {
        let client = build_http_client(
            &user_agent.value,
            Duration::from_secs(settings.request_timeout_secs),
        )?;
        let delay = Duration::from_millis(settings.request_delay_ms);

        Ok(Self {
            settings,
            client,
            delay,
        })
    }

    /// Crawls the site reachable from `seed`
    ///
    /// Page-level problems (timeouts, error statuses, non-HTML responses)
    /// never abort the crawl; the returned output simply holds fewer pages.
    /// An empty corpus is a valid result.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutput)` - Context map, corpus and statistics
    /// * `Err(CorpusError)` - The seed is not an absolute HTTP(S) URL
    pub async fn crawl(&self, seed: &str) -> Result<CrawlOutput, CorpusError> {
        let seed = parse_seed(seed)?;
        let mut session = CrawlSession::new(seed.clone())?;
        let budget = self.settings.page_budget;
        let start_time = Instant::now();

        info!(
            "Starting crawl of {} (domain {}, budget {} pages)",
            seed,
            session.scope().location(),
            budget
        );

        while session.visited_count() < budget {
            let Some(url) = session.pop_next() else {
                info!("Frontier is empty, crawl complete");
                break;
            };

            let outcome = self.process_url(&mut session, &url).await;
            debug!("{} -> {}", url, outcome);

            match &outcome {
                PageOutcome::Failed(reason) => {
                    warn!("Dropping {}: {}", url, reason);
                }
                outcome if outcome.counts_as_visited() => {
                    session.mark_visited(&url);
                    let visited = session.visited_count();
                    if visited % 10 == 0 || visited == budget {
                        info!(
                            "Progress: {}/{} pages visited, {} in frontier",
                            visited,
                            budget,
                            session.frontier_len()
                        );
                    }
                }
                _ => {}
            }

            session.record(&outcome);

            if outcome.made_request() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let output = session.finish(start_time.elapsed());
        info!(
            "Crawl completed: {} pages visited, {} admitted, {} left in frontier, {:?}",
            output.visited.len(),
            output.corpus.len(),
            output.frontier_remaining.len(),
            output.stats.duration
        );

        Ok(output)
    }

    /// Processes a single dequeued URL
    ///
    /// This method:
    /// 1. Skips visited and asset URLs
    /// 2. Fetches the page (with bounded retries when configured)
    /// 3. Parses HTML, admits its text and enqueues its links
    ///
    /// Marking the URL visited is left to the caller.
    async fn process_url(&self, session: &mut CrawlSession, url: &Url) -> PageOutcome {
        if session.is_visited(url) {
            return PageOutcome::Skipped(SkipReason::AlreadyVisited);
        }

        if has_skipped_extension(url, &self.settings.skip_extensions) {
            return PageOutcome::Skipped(SkipReason::Asset);
        }

        match self.fetch_with_retry(url).await {
            FetchResult::Html {
                final_url, body, ..
            } => {
                let parsed = parse_html(&body, &final_url, self.settings.follow_boilerplate_links);
                let chars = parsed.text.chars().count();

                let admission = session.admit(
                    url,
                    parsed.title,
                    parsed.text,
                    self.settings.min_content_length,
                );

                let mut links_enqueued = 0;
                for link in parsed.links {
                    if session.try_enqueue(link) {
                        links_enqueued += 1;
                    }
                }

                PageOutcome::Processed(ProcessedPage {
                    admission,
                    chars,
                    links_enqueued,
                })
            }

            FetchResult::NotHtml { content_type } => {
                PageOutcome::Skipped(SkipReason::NotHtml(content_type))
            }

            FetchResult::HttpStatus { status_code } => {
                PageOutcome::Skipped(SkipReason::HttpStatus(status_code))
            }

            FetchResult::Timeout => PageOutcome::Failed(FailureReason::Timeout),

            FetchResult::NetworkError { error } => {
                PageOutcome::Failed(FailureReason::Network(error))
            }

            FetchResult::BodyError { error } => PageOutcome::Failed(FailureReason::Body(error)),
        }
    }

    /// Fetches a URL, retrying transport failures up to `retry_attempts` times
    ///
    /// The politeness delay is applied between attempts.
    async fn fetch_with_retry(&self, url: &Url) -> FetchResult {
        let mut attempt = 0;
        loop {
            let result = fetch_url(&self.client, url).await;
            if !result.is_transport_failure() || attempt >= self.settings.retry_attempts {
                return result;
            }

            attempt += 1;
            debug!(
                "Transport failure on {}, retry {}/{}",
                url, attempt, self.settings.retry_attempts
            );
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Runs a crawl from the configuration's seed URL
///
/// # Example
///
/// ```no_run
/// use site_corpus::config::load_config;
/// use site_corpus::crawler::crawl_site;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let output = crawl_site(&config).await?;
/// println!("{} pages in corpus", output.corpus().len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl_site(config: &Config) -> Result<CrawlOutput, CorpusError> {
    let crawler = Crawler::new(config.crawler.clone(), &config.user_agent)?;
    crawler.crawl(&config.crawler.seed_url).await
}
