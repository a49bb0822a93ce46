//! Splits pasted text into candidate `(url, title)` pairs.

use tracing::debug;

use super::classifier;
use super::url_canonicalizer::{canonicalize, domain_of, CanonicalUrl};

/// One surviving input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub url: CanonicalUrl,
    /// Explicit title from the `url | title` form, empty when absent.
    pub title: String,
}

/// Parses a multi-line block.
///
/// Blank lines are ignored. A line is split on `|`: the first segment is the
/// URL candidate and the remaining segments, rejoined with `" | "`, form the
/// title. Lines whose URL fails canonicalization are dropped.
pub fn parse_block(text: &str) -> Vec<ParsedLine> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<ParsedLine> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    let (candidate, title) = if parts.len() >= 2 {
        (parts[0], parts[1..].join(" | "))
    } else {
        (line, String::new())
    };

    match canonicalize(candidate) {
        Some(url) => Some(ParsedLine { url, title }),
        None => {
            debug!(candidate, "dropping line that is not a valid URL");
            None
        }
    }
}

/// Rewrites bare-URL lines into the `url | title` form.
///
/// Lines that mention `http` and carry no `|` are replaced by their first
/// whitespace-separated token, canonicalized, followed by an inferred title.
/// Everything else passes through trimmed; blank lines are removed.
pub fn auto_format_block(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.contains("http") && !line.contains('|') {
                let token = line.split(' ').next().unwrap_or(line);
                if let Some(url) = canonicalize(token) {
                    let domain = domain_of(url.as_str());
                    let title = classifier::infer_title(url.as_str(), &domain);
                    return format!("{} | {}", url, title);
                }
            }
            line.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
