//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - Single GET requests classified into a [`FetchResult`]

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Status 200 with an HTML body
    Html {
        /// Final URL after redirects
        final_url: Url,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Status 200 but the body is not HTML
    NotHtml {
        /// The Content-Type received (empty when absent)
        content_type: String,
    },

    /// Any status other than 200
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// Request exceeded the configured timeout
    Timeout,

    /// Connection refused, DNS failure, TLS or protocol error
    NetworkError {
        /// Error description
        error: String,
    },

    /// Headers arrived but the body could not be read
    BodyError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true for transport-level failures that a retry might fix
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::NetworkError { .. } | Self::BodyError { .. }
        )
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Literal `User-Agent` header value sent with every request
/// * `timeout` - Upper bound for one whole request, body included
///
/// # Example
///
/// ```no_run
/// use site_corpus::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("CorpusBot/1.0", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// | Condition | Result |
/// |-----------|--------|
/// | 200 + `text/html` | `Html` |
/// | 200 + other type | `NotHtml` |
/// | any other status | `HttpStatus` |
/// | timeout | `Timeout` |
/// | connect/DNS/TLS error | `NetworkError` |
/// | body read error | `BodyError` |
///
/// Redirects are followed by the client; `final_url` is where they ended.
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => return FetchResult::Timeout,
        Err(e) => {
            return FetchResult::NetworkError {
                error: e.to_string(),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpStatus {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return FetchResult::NotHtml { content_type };
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(body) => FetchResult::Html {
            final_url,
            content_type,
            body,
        },
        Err(e) if e.is_timeout() => FetchResult::Timeout,
        Err(e) => FetchResult::BodyError {
            error: e.to_string(),
        },
    }
}

/// Returns true if a Content-Type header value denotes HTML
fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}
