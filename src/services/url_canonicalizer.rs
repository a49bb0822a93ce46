//! URL canonicalization.
//!
//! Turns a raw, possibly scheme-less string into an absolute `http(s)` URL,
//! or rejects it. Rejection carries no detail: callers drop the line.

use std::fmt;

use url::Url;

/// Returned by [`domain_of`] when the URL cannot be parsed.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// An absolute, schemed URL that passed validation.
///
/// Keeps the cleaned input text verbatim (no re-serialization through the
/// parser, so `https://a.com` does not grow a trailing slash) next to the
/// parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUrl {
    text: String,
    parsed: Url,
}

impl CanonicalUrl {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn parsed(&self) -> &Url {
        &self.parsed
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validates and normalizes a raw URL string.
///
/// Trims whitespace, removes one matching pair of surrounding quotes,
/// prepends `https://` when no `http://`/`https://` prefix is present, then
/// requires the result to parse as an absolute URL.
pub fn canonicalize(raw: &str) -> Option<CanonicalUrl> {
    let cleaned = strip_quotes(raw.trim()).trim();
    if cleaned.is_empty() {
        return None;
    }

    let text = if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        cleaned.to_string()
    } else {
        format!("https://{}", cleaned)
    };

    let parsed = Url::parse(&text).ok()?;
    if !parsed.has_host() {
        return None;
    }
    Some(CanonicalUrl { text, parsed })
}

/// Lower-cased hostname with a leading `www.` removed, or `"unknown"`.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(host_to_domain))
        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string())
}

pub(crate) fn host_to_domain(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
