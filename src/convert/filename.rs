use url::Url;

const DEFAULT_FILENAME: &str = "index.md";
const MARKDOWN_EXTENSION: &str = ".md";

/// Generates a local Markdown file name from a page URL
///
/// The path becomes a dash-separated name, the raw query string (if any) is
/// appended, characters that are unsafe in file names are replaced, and the
/// result always ends in `.md`. Two different URLs can map to the same name;
/// callers decide how to handle that.
///
/// # Examples
///
/// ```
/// use crawldown::generate_filename;
///
/// assert_eq!(generate_filename("https://example.com/"), "index.md");
/// assert_eq!(generate_filename("https://example.com/docs/guide"), "docs-guide.md");
/// assert_eq!(generate_filename("https://example.com/page?id=1&lang=en"), "page-id-1-lang-en.md");
/// assert_eq!(generate_filename("not a url"), "index.md");
/// ```
pub fn generate_filename(page_url: &str) -> String {
    let url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return DEFAULT_FILENAME.to_string(),
    };

    let path = url.path();
    let query = url.query().filter(|q| !q.is_empty());

    let name = if path.is_empty() || path == "/" {
        match query {
            Some(query) => format!("index-{}", sanitize_filename(query)),
            None => "index".to_string(),
        }
    } else {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        let mut name = trimmed.replace('/', "-");
        if let Some(query) = query {
            name.push('-');
            name.push_str(query);
        }
        sanitize_filename(&name)
    };

    with_markdown_extension(name)
}

/// Replaces characters that are unsafe in file names
///
/// `< > : " / \ | ? * = &` become `-`, runs of `-` collapse, leading and
/// trailing `-` are trimmed. An empty result becomes `page`.
fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for ch in name.chars() {
        let ch = match ch {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '=' | '&' => '-',
            other => other,
        };
        if ch == '-' && out.ends_with('-') {
            continue;
        }
        out.push(ch);
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "page".to_string()
    } else {
        trimmed.to_string()
    }
}

fn with_markdown_extension(name: String) -> String {
    if name.ends_with(MARKDOWN_EXTENSION) {
        return name;
    }

    let stem = match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name.as_str(),
    };
    let stem = if stem.is_empty() { "page" } else { stem };

    format!("{}{}", stem, MARKDOWN_EXTENSION)
}
