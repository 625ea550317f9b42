use serde::Deserialize;

/// Asset extensions that are never fetched
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg"];

/// Default number of characters handed to the relevance scorer
pub const DEFAULT_EXCERPT_CHARS: usize = 50_000;

/// Main configuration structure for Site-Corpus
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Absolute URL the crawl starts from; its host bounds the crawl
    pub seed_url: String,

    /// Maximum number of pages visited in one crawl
    #[serde(default = "default_page_budget")]
    pub page_budget: usize,

    /// Pause after every request (milliseconds)
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Cleaned text must be strictly longer than this to enter the corpus
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,

    /// Extra GET attempts after a transport failure; 0 drops the URL at once
    #[serde(default)]
    pub retry_attempts: u32,

    /// Follow links found inside nav/header/footer blocks
    #[serde(default)]
    pub follow_boilerplate_links: bool,

    /// URL path suffixes that are never requested
    #[serde(default = "default_skip_extensions")]
    pub skip_extensions: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Literal `User-Agent` header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Where to write the `URL,Page Text` corpus CSV
    #[serde(default)]
    pub corpus_path: Option<String>,

    /// Where to write the markdown crawl summary
    #[serde(default)]
    pub summary_path: Option<String>,

    /// Length of the corpus excerpt reported for scoring
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            summary_path: None,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl CrawlerConfig {
    /// Builds a crawler configuration for `seed_url` with every other field defaulted
    pub fn with_seed(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            page_budget: default_page_budget(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            min_content_length: default_min_content_length(),
            retry_attempts: 0,
            follow_boilerplate_links: false,
            skip_extensions: default_skip_extensions(),
        }
    }
}

fn default_page_budget() -> usize {
    100
}

fn default_request_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_min_content_length() -> usize {
    500
}

fn default_skip_extensions() -> Vec<String> {
    DEFAULT_SKIP_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_excerpt_chars() -> usize {
    DEFAULT_EXCERPT_CHARS
}
