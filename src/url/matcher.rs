use url::Url;

/// Checks if a URL's path ends with one of the given extensions
///
/// Matching is case-insensitive and looks at the path only, so query strings
/// such as `?v=2` do not hide an image.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_corpus::url::has_skipped_extension;
///
/// let exts = vec![".png".to_string(), ".jpg".to_string()];
/// let url = Url::parse("https://example.com/logo.PNG?v=2").unwrap();
/// assert!(has_skipped_extension(&url, &exts));
///
/// let url = Url::parse("https://example.com/about").unwrap();
/// assert!(!has_skipped_extension(&url, &exts));
/// ```
pub fn has_skipped_extension(url: &Url, extensions: &[String]) -> bool {
    let path = url.path().to_lowercase();
    extensions
        .iter()
        .any(|ext| path.ends_with(&ext.to_lowercase()))
}
