//! Free-form identifier → canonical domain or LinkedIn path.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use investor_common::CanonicalIdentifier;

static RE_LINKEDIN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/(company|in)/[^/?#\s]+").unwrap());
static RE_LINKEDIN_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/?(company|in)/[^/?#\s]+").unwrap());
static RE_SCHEME_WWW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*://)?(?:www\.)?").unwrap());

/// Normalize a raw identifier. Blank input yields an empty domain value,
/// which callers treat as missing input.
pub fn normalize_identifier(raw: &str) -> CanonicalIdentifier {
    let input = raw.trim();
    if input.is_empty() {
        return CanonicalIdentifier::domain("");
    }

    if is_linkedin(input) {
        return CanonicalIdentifier::linkedin(linkedin_path(input));
    }

    CanonicalIdentifier::domain(domain_of(input))
}

fn is_linkedin(input: &str) -> bool {
    RE_LINKEDIN_URL.is_match(input)
        || input.to_ascii_lowercase().contains("linkedin.com")
        || RE_LINKEDIN_PATH.is_match(input)
}

fn linkedin_path(input: &str) -> String {
    if RE_LINKEDIN_PATH.is_match(input) {
        return input
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/')
            .to_string();
    }

    match Url::parse(&with_scheme(input)) {
        Ok(url) => url.path().trim_matches('/').to_string(),
        Err(_) => {
            let stripped = RE_SCHEME_WWW.replace(input, "");
            stripped
                .split_once('/')
                .map(|(_, path)| path)
                .unwrap_or_default()
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .trim_matches('/')
                .to_string()
        }
    }
}

fn domain_of(input: &str) -> String {
    let host = Url::parse(&with_scheme(input))
        .ok()
        .and_then(|url| url.host_str().map(str::to_string));

    match host {
        Some(host) => host
            .strip_prefix("www.")
            .unwrap_or(&host)
            .to_ascii_lowercase(),
        None => {
            let stripped = RE_SCHEME_WWW.replace(input, "");
            stripped
                .split('/')
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase()
        }
    }
}

/// Prefix `https://` unless the input already carries a scheme.
fn with_scheme(input: &str) -> String {
    if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}
