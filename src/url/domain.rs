use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawldown::url::extract_domain;
///
/// let url = Url::parse("https://Docs.Example.COM:8443/guide").unwrap();
/// assert_eq!(extract_domain(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks if a host matches an allowed-domain pattern
///
/// Two forms are supported:
/// 1. Exact: `example.com` matches only `example.com`
/// 2. Wildcard: `*.example.com` matches `example.com` and every subdomain
///
/// Both sides are expected to be lowercase.
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}

/// The set of hosts a crawl is allowed to visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainScope {
    /// Any http(s) host may be visited
    Any,
    /// Only hosts matching one of these patterns may be visited
    Patterns(Vec<String>),
}

impl DomainScope {
    /// Builds the scope for a crawl rooted at `root`
    ///
    /// Explicit patterns always win. Without patterns the crawl stays on the
    /// root's host, unless external links are followed, in which case any
    /// host is allowed.
    pub fn for_root(root: &Url, allowed_domains: &[String], follow_external_links: bool) -> Self {
        if !allowed_domains.is_empty() {
            return Self::Patterns(allowed_domains.iter().map(|d| d.to_lowercase()).collect());
        }

        if follow_external_links {
            return Self::Any;
        }

        match extract_domain(root) {
            Some(host) => Self::Patterns(vec![host]),
            None => Self::Patterns(Vec::new()),
        }
    }

    /// Returns true if the URL is an http(s) URL on an allowed host
    pub fn allows(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        let Some(host) = extract_domain(url) else {
            return false;
        };

        match self {
            Self::Any => true,
            Self::Patterns(patterns) => patterns.iter().any(|p| matches_wildcard(p, &host)),
        }
    }
}
