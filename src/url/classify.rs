/// Schemes that never point at a crawlable document
const NON_DOCUMENT_SCHEMES: &[&str] = &[
    "javascript:",
    "mailto:",
    "tel:",
    "sms:",
    "fax:",
    "data:",
    "file:",
];

/// Why a discovered href is not followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Empty href
    Empty,
    /// Same-page anchor (`#section`)
    Fragment,
    /// `javascript:`, `mailto:`, `tel:` and friends
    NonDocumentScheme,
    /// A bare email address without `mailto:`
    Email,
    /// A bare phone number without `tel:`
    Phone,
}

/// Classification of a discovered href
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// The href may point at a page and should be resolved and checked further
    Follow,
    /// The href is never crawled
    Skip(SkipReason),
}

impl LinkClass {
    /// Returns true if the link should be followed
    pub fn should_follow(&self) -> bool {
        matches!(self, Self::Follow)
    }
}

/// Classifies a raw href found in an anchor
///
/// Rules are checked in order and the first match wins:
/// 1. Fragment-only → skip
/// 2. Non-document scheme → skip
/// 3. Bare email address → skip
/// 4. Bare phone number → skip
/// 5. Otherwise → follow
///
/// # Examples
///
/// ```
/// use crawldown::url::{classify_link, LinkClass, SkipReason};
///
/// assert_eq!(classify_link("/about"), LinkClass::Follow);
/// assert_eq!(classify_link("#section"), LinkClass::Skip(SkipReason::Fragment));
/// assert_eq!(classify_link("test@example.com"), LinkClass::Skip(SkipReason::Email));
/// assert_eq!(classify_link("+1 (555) 123-4567"), LinkClass::Skip(SkipReason::Phone));
/// ```
pub fn classify_link(href: &str) -> LinkClass {
    let href = href.trim();

    if href.is_empty() {
        return LinkClass::Skip(SkipReason::Empty);
    }

    if href.starts_with('#') {
        return LinkClass::Skip(SkipReason::Fragment);
    }

    if has_non_document_scheme(href) {
        return LinkClass::Skip(SkipReason::NonDocumentScheme);
    }

    if looks_like_email(href) {
        return LinkClass::Skip(SkipReason::Email);
    }

    if looks_like_phone(href) {
        return LinkClass::Skip(SkipReason::Phone);
    }

    LinkClass::Follow
}

fn has_non_document_scheme(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    NON_DOCUMENT_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Exactly one `@`, text on both sides, and a dot in the domain part
fn looks_like_email(href: &str) -> bool {
    let parts: Vec<&str> = href.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

/// 7 to 15 digits and at least one of `+ ( ) -`
fn looks_like_phone(href: &str) -> bool {
    let digit_count = href.chars().filter(|c| c.is_ascii_digit()).count();
    let has_phone_chars = href.chars().any(|c| matches!(c, '+' | '(' | ')' | '-'));

    (7..=15).contains(&digit_count) && has_phone_chars
}
