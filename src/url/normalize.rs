use url::Url;

/// Normalizes a URL for identity comparison
///
/// # Normalization Steps
///
/// 1. Parse the URL; if parsing fails the input is returned unchanged
/// 2. Sort query parameters by key (stable, so repeated keys keep their order)
/// 3. Remove an empty query string (trailing ?)
///
/// Scheme, host, path and fragment are kept as parsed. Trailing slashes are
/// left alone; see [`registry_key`] for the form used as a registry identity.
///
/// # Examples
///
/// ```
/// use crawldown::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("https://example.com/page?c=3&a=1&b=2"),
///     normalize_url("https://example.com/page?a=1&b=2&c=3"),
/// );
/// assert_eq!(normalize_url("not a url"), "not a url");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return raw.to_string(),
    };

    if url.query().is_some() {
        let params = sorted_query_params(&url);

        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    url.to_string()
}

/// Returns the registry identity of a URL
///
/// This is [`normalize_url`] with a single trailing slash removed, so that
/// `https://example.com/docs/` and `https://example.com/docs` share a key.
pub fn registry_key(raw: &str) -> String {
    let normalized = normalize_url(raw);
    match normalized.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

/// Collects query parameters sorted by key
fn sorted_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    // sort_by is stable: duplicates keep their relative order
    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_query_params() {
        let result = normalize_url("https://example.com/page?b=2&a=1");
        assert_eq!(result, "https://example.com/page?a=1&b=2");
    }

    #[test]
    fn test_query_order_insensitive() {
        assert_eq!(
            normalize_url("https://example.com/page?c=3&a=1&b=2"),
            normalize_url("https://example.com/page?a=1&b=2&c=3")
        );
    }

    #[test]
    fn test_duplicate_keys_keep_relative_order() {
        let result = normalize_url("https://example.com/page?tag=z&b=1&tag=a");
        assert_eq!(result, "https://example.com/page?b=1&tag=z&tag=a");
    }

    #[test]
    fn test_unparsable_returned_unchanged() {
        assert_eq!(normalize_url("not a url"), "not a url");
        assert_eq!(normalize_url("/relative/path"), "/relative/path");
    }

    #[test]
    fn test_empty_query_removed() {
        let result = normalize_url("https://example.com/page?");
        assert_eq!(result, "https://example.com/page");
    }

    #[test]
    fn test_fragment_preserved() {
        let result = normalize_url("https://example.com/page?b=2&a=1#section");
        assert_eq!(result, "https://example.com/page?a=1&b=2#section");
    }

    #[test]
    fn test_trailing_slash_preserved() {
        let result = normalize_url("https://example.com/docs/");
        assert_eq!(result, "https://example.com/docs/");
    }

    #[test]
    fn test_no_query_untouched() {
        let result = normalize_url("https://example.com/docs/guide");
        assert_eq!(result, "https://example.com/docs/guide");
    }

    #[test]
    fn test_registry_key_strips_one_trailing_slash() {
        assert_eq!(
            registry_key("https://example.com/docs/"),
            "https://example.com/docs"
        );
        assert_eq!(registry_key("https://example.com/"), "https://example.com");
        assert_eq!(registry_key("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_registry_key_sorts_query() {
        assert_eq!(
            registry_key("https://example.com/page?z=1&a=2"),
            "https://example.com/page?a=2&z=1"
        );
    }
}
