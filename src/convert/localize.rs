//! Link localization
//!
//! Runs after the crawl has finished: every inline Markdown link whose
//! target resolves to a crawled page is rewritten to that page's local file.

use crate::registry::{FrozenRegistry, UrlToFilenameIndex};
use crate::url::{origin_and_path, registry_key};
use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

/// A document whose links have been localized, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedDocument {
    pub filename: String,
    pub source_url: String,
    pub content: String,
}

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"))
}

/// Rewrites links in `markup` that point at crawled pages
///
/// Relative targets are resolved against `source_url`. Fragment-only,
/// `mailto:` and `javascript:` links, links to pages that were not crawled,
/// and links that do not parse are left byte-for-byte unchanged. A fragment
/// on a rewritten link is carried over to the local target, as is a link
/// title following the URL.
///
/// # Examples
///
/// ```
/// use crawldown::registry::UrlToFilenameIndex;
/// use crawldown::localize_links;
///
/// let index: UrlToFilenameIndex =
///     [("https://example.com/docs".to_string(), "docs.md".to_string())]
///         .into_iter()
///         .collect();
///
/// assert_eq!(
///     localize_links("[Docs](/docs#intro)", "https://example.com/", &index),
///     "[Docs](docs.md#intro)"
/// );
/// ```
pub fn localize_links(markup: &str, source_url: &str, index: &UrlToFilenameIndex) -> String {
    let base = match Url::parse(source_url) {
        Ok(base) => base,
        Err(_) => return markup.to_string(),
    };

    link_regex()
        .replace_all(markup, |caps: &Captures| {
            let text = &caps[1];
            let inner = &caps[2];

            match rewrite_target(inner, &base, index) {
                Some(local) => format!("[{}]({})", text, local),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Returns the rewritten link body, or None to keep the link as is
fn rewrite_target(inner: &str, base: &Url, index: &UrlToFilenameIndex) -> Option<String> {
    // `[text](url "title")`: only the URL part is resolved
    let (target, title) = match inner.find(char::is_whitespace) {
        Some(idx) => inner.split_at(idx),
        None => (inner, ""),
    };

    if target.is_empty()
        || target.starts_with('#')
        || target.starts_with("mailto:")
        || target.starts_with("javascript:")
    {
        return None;
    }

    let resolved = base.join(target).ok()?;
    let filename = lookup(&resolved, index)?;

    let mut local = filename.to_string();
    if let Some(fragment) = resolved.fragment().filter(|f| !f.is_empty()) {
        local.push('#');
        local.push_str(fragment);
    }
    local.push_str(title);

    Some(local)
}

/// Looks a resolved link up in the index
///
/// Tried in order: the registry identity of the link, the link reduced to
/// `scheme://host[:port]/path` (trailing slash stripped) with its query,
/// then the same without query.
fn lookup<'a>(resolved: &Url, index: &'a UrlToFilenameIndex) -> Option<&'a str> {
    let mut without_fragment = resolved.clone();
    without_fragment.set_fragment(None);

    let path_key = origin_and_path(&without_fragment);
    let path_key = path_key.strip_suffix('/').unwrap_or(&path_key).to_string();

    let mut candidates = vec![registry_key(without_fragment.as_str())];
    if let Some(query) = without_fragment.query().filter(|q| !q.is_empty()) {
        candidates.push(format!("{}?{}", path_key, query));
    }
    candidates.push(path_key);

    let hit = candidates.iter().find_map(|key| index.get(key));
    if hit.is_none() {
        debug!("No local document for link {}", resolved);
    }
    hit
}

/// Localizes every document in the frozen registry
///
/// Documents come back ordered by normalized URL.
pub fn localize_all(registry: &FrozenRegistry) -> Vec<FinalizedDocument> {
    let index = registry.index();

    registry
        .records_sorted()
        .into_iter()
        .map(|record| FinalizedDocument {
            filename: record.generated_filename.clone(),
            source_url: record.original_url.clone(),
            content: localize_links(&record.converted_markup, &record.original_url, index),
        })
        .collect()
}
