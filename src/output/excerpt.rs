/// Builds the content sample handed to relevance scoring
///
/// Joins the corpus with single spaces and keeps the first `max_chars`
/// characters. Cutting on a character boundary keeps multi-byte text valid.
///
/// # Examples
///
/// ```
/// use site_corpus::output::build_excerpt;
///
/// let corpus = vec!["first page".to_string(), "second page".to_string()];
/// assert_eq!(build_excerpt(&corpus, 14), "first page sec");
/// assert_eq!(build_excerpt(&corpus, 1000), "first page second page");
/// ```
pub fn build_excerpt(corpus: &[String], max_chars: usize) -> String {
    let mut excerpt = String::new();
    let mut remaining = max_chars;

    for (i, text) in corpus.iter().enumerate() {
        if remaining == 0 {
            break;
        }

        if i > 0 {
            excerpt.push(' ');
            remaining -= 1;
        }

        let taken: String = text.chars().take(remaining).collect();
        remaining -= taken.chars().count();
        excerpt.push_str(&taken);
    }

    excerpt
}
