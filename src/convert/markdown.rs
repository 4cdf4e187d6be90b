use crate::convert::{ConvertError, ConvertResult};
use regex::Regex;
use std::sync::OnceLock;

/// Converts extracted page HTML into a document body
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, html: &str) -> ConvertResult<String>;
}

/// HTML to Markdown converter backed by `htmd`
///
/// Output is cleaned up after conversion: runs of three or more newlines
/// collapse to a single blank line and surrounding whitespace is trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentConverter for MarkdownConverter {
    fn convert(&self, html: &str) -> ConvertResult<String> {
        if html.is_empty() {
            return Err(ConvertError::EmptyInput);
        }

        let markdown = htmd::convert(html).map_err(|e| ConvertError::Failed(e.to_string()))?;

        Ok(clean_markdown(&markdown))
    }
}

fn clean_markdown(markdown: &str) -> String {
    static EXCESS_NEWLINES: OnceLock<Regex> = OnceLock::new();
    let re = EXCESS_NEWLINES.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"));

    re.replace_all(markdown, "\n\n").trim().to_string()
}

/// Builds the header placed at the top of every document
///
/// # Examples
///
/// ```
/// use crawldown::convert::document_header;
///
/// assert_eq!(
///     document_header("Guide", "https://example.com/guide"),
///     "# Guide\n\nURL: https://example.com/guide\n\n---\n\n"
/// );
/// ```
pub fn document_header(title: &str, url: &str) -> String {
    format!("# {}\n\nURL: {}\n\n---\n\n", title, url)
}
