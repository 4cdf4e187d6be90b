use crate::url::origin_and_path;
use url::Url;

/// Checks whether an absolute URL falls under one of the exclusion prefixes
///
/// A prefix matches if it is a literal string prefix of either the raw URL
/// or the URL reduced to `scheme://host/path`, so exclusions apply with or
/// without a query string. There is no wildcard or regex support.
///
/// # Examples
///
/// ```
/// use crawldown::url::is_excluded;
///
/// let prefixes = vec!["https://example.com/private".to_string()];
/// assert!(is_excluded("https://example.com/private/page?x=1", &prefixes));
/// assert!(!is_excluded("https://example.com/public", &prefixes));
/// assert!(!is_excluded("https://example.com/private", &[]));
/// ```
pub fn is_excluded(absolute_url: &str, prefixes: &[String]) -> bool {
    if prefixes.is_empty() {
        return false;
    }

    let reduced = Url::parse(absolute_url).ok().map(|u| origin_and_path(&u));

    prefixes.iter().any(|prefix| {
        absolute_url.starts_with(prefix.as_str())
            || reduced
                .as_deref()
                .is_some_and(|path| path.starts_with(prefix.as_str()))
    })
}
