use crate::config::types::{Config, CrawlerConfig, MAX_REQUEST_DELAY};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// A configuration that passes validation has a parseable http(s) start URL
/// and a non-empty output directory, so a crawl can begin without further
/// checks.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_start_url(config.start_url.as_deref())?;
    validate_output_dir(config.output_dir.as_deref())?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

fn validate_start_url(start_url: Option<&str>) -> Result<(), ConfigError> {
    let raw = match start_url {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(ConfigError::Missing("start URL (--url or --single)")),
    };

    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Start URL '{}' must use http or https",
            raw
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Start URL '{}' has no host",
            raw
        )));
    }

    Ok(())
}

fn validate_output_dir(output_dir: Option<&str>) -> Result<(), ConfigError> {
    match output_dir {
        Some(dir) if !dir.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::Missing("output directory (--output)")),
    }
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.parallelism < 1 || config.parallelism > 100 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be between 1 and 100, got {}",
            config.parallelism
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.request_delay > MAX_REQUEST_DELAY {
        return Err(ConfigError::Validation(format!(
            "request_delay must be <= {}s, got {}s",
            MAX_REQUEST_DELAY, config.request_delay
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    for prefix in &config.excluded_paths {
        if prefix.is_empty() {
            return Err(ConfigError::Validation(
                "excluded path prefixes cannot be empty".to_string(),
            ));
        }
    }

    for pattern in &config.allowed_domains {
        validate_domain_pattern(pattern)?;
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => validate_domain_string(domain),
        None => validate_domain_string(pattern),
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}
