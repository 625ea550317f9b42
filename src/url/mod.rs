//! URL handling module for Site-Corpus
//!
//! This module provides seed parsing, link resolution, network-location
//! extraction, asset filtering and the domain scope a crawl is bound to.

mod domain;
mod matcher;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::network_location;
pub use matcher::has_skipped_extension;
pub use normalize::{parse_seed, resolve_link};

/// The network location a crawl is confined to
///
/// Derived once from the seed URL. A URL is in scope only when its network
/// location equals the seed's exactly: subdomains and other ports are out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainScope {
    location: String,
}

impl DomainScope {
    /// Derives the scope from a seed URL
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use site_corpus::url::DomainScope;
    ///
    /// let seed = Url::parse("https://example.com/").unwrap();
    /// let scope = DomainScope::from_seed(&seed).unwrap();
    ///
    /// assert!(scope.contains(&Url::parse("https://example.com/about").unwrap()));
    /// assert!(!scope.contains(&Url::parse("https://blog.example.com/").unwrap()));
    /// ```
    pub fn from_seed(seed: &Url) -> Result<Self, UrlError> {
        let location = network_location(seed).ok_or(UrlError::MissingHost)?;
        Ok(Self { location })
    }

    /// Returns the network location string (e.g. `example.com` or `127.0.0.1:8080`)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns true if the URL lives on exactly this network location
    pub fn contains(&self, url: &Url) -> bool {
        network_location(url).as_deref() == Some(self.location.as_str())
    }
}
