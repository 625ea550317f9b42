use url::Url;

/// Extracts the network location (host, plus port when one is given) from a URL
///
/// The host is lowercased. Default ports are not part of the location, so
/// `https://example.com:443/` and `https://example.com/` share one location
/// while `http://127.0.0.1:8080/` keeps its port.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_corpus::url::network_location;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
