//! Domain-based classification of canonical URLs.
//!
//! Every function here is pure: it looks at the URL text and its domain and
//! derives a group label, tags, a content type, a fallback title and a
//! description. Rule tables are checked in declaration order.

use std::borrow::Cow;

use url::Url;

use crate::types::link::LinkType;

use super::url_canonicalizer::CanonicalUrl;

/// Title returned when the URL cannot be parsed at all.
pub const FALLBACK_TITLE: &str = "Link";

/// Domain substring -> group label. First match wins, so a more specific
/// substring must precede any entry it contains.
pub const GROUP_RULES: &[(&str, &str)] = &[
    ("youtube.com", "Videos"),
    ("youtu.be", "Videos"),
    ("hotstar.com", "Entertainment"),
    ("geeksforgeeks.org", "Programming"),
    ("github.com", "Programming"),
    ("stackoverflow.com", "Programming"),
    ("wikipedia.org", "Reference"),
    ("medium.com", "Articles"),
    ("twitter.com", "Social"),
    ("reddit.com", "Social"),
    ("perplexity.ai", "AI Tools"),
    ("pwonlyias.com", "Education"),
    ("syllabusx.live", "Education"),
    ("kartoons.fun", "Entertainment"),
];

/// Domain substring -> tags. Every matching rule contributes.
const DOMAIN_TAG_RULES: &[(&str, &[&str])] = &[
    ("youtube", &["video", "youtube"]),
    ("github", &["code", "development"]),
    ("stackoverflow", &["programming", "q&a"]),
    ("geeksforgeeks", &["tutorial", "coding"]),
    ("wikipedia", &["reference", "encyclopedia"]),
    ("medium", &["article", "blog"]),
    ("twitter", &["social", "microblogging"]),
    ("reddit", &["social", "discussion"]),
    ("perplexity", &["ai", "search"]),
    ("hotstar", &["entertainment", "streaming"]),
    ("pwonlyias", &["education", "upsc"]),
];

/// URL substring -> tag.
const URL_TAG_RULES: &[(&str, &str)] = &[
    ("watch?v=", "youtube-video"),
    ("/shows/", "tv-show"),
    ("/courses/", "course"),
    ("/article/", "article"),
    ("/tutorial/", "tutorial"),
];

/// Content type cascade. Only the first category with a matching domain
/// substring applies.
const TYPE_RULES: &[(LinkType, &[&str])] = &[
    (LinkType::Video, &["youtube", "youtu.be", "hotstar"]),
    (LinkType::Code, &["github", "stackoverflow", "geeksforgeeks"]),
    (LinkType::Article, &["wikipedia", "medium"]),
    (LinkType::Ai, &["perplexity"]),
];

/// Query parameters consulted for a description, in priority order.
const DESCRIPTION_PARAMS: &[&str] = &["description", "title", "name", "q", "search"];

/// Everything the classifier derives for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub group_label: Option<&'static str>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub kind: LinkType,
}

/// Runs every classifier over `url`. `explicit_title` wins over inference
/// when it is non-empty.
pub fn classify(url: &CanonicalUrl, domain: &str, explicit_title: &str) -> Classification {
    let title = if explicit_title.is_empty() {
        infer_title(url.as_str(), domain)
    } else {
        explicit_title.to_string()
    };

    Classification {
        group_label: detect_group(domain),
        title,
        description: infer_description(url.as_str()),
        tags: extract_tags(domain, url.as_str()),
        kind: detect_type(domain),
    }
}

/// Label of the first group rule whose substring occurs in `domain`.
pub fn detect_group(domain: &str) -> Option<&'static str> {
    GROUP_RULES
        .iter()
        .find(|(needle, _)| domain.contains(needle))
        .map(|(_, label)| *label)
}

/// Title from the last path segment, else from the domain's site label.
pub fn infer_title(url: &str, domain: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return FALLBACK_TITLE.to_string();
    };

    if let Some(last) = parsed.path().split('/').rfind(|s| !s.is_empty()) {
        let Some(decoded) = decode_component(last) else {
            return FALLBACK_TITLE.to_string();
        };
        let spaced = dashes_to_spaces(&decoded);
        let cleaned = strip_extension(&spaced);
        if cleaned.chars().count() > 3 {
            return capitalize(cleaned);
        }
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let site = if labels.len() > 1 {
        labels[labels.len() - 2]
    } else {
        domain
    };
    capitalize(site)
}

/// Description from a descriptive query parameter, else the decoded path,
/// else the hostname. Empty when the URL cannot be parsed.
pub fn infer_description(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };

    let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    for param in DESCRIPTION_PARAMS {
        if let Some((_, value)) = pairs.iter().find(|(key, _)| key == param) {
            if value.chars().count() > 5 {
                return value.clone();
            }
        }
    }

    let path = parsed.path();
    if !path.is_empty() && path != "/" {
        let Some(decoded) = decode_component(path) else {
            return String::new();
        };
        let trimmed = decoded.strip_suffix('/').unwrap_or(decoded.as_ref());
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
        return dashes_to_spaces(trimmed);
    }

    parsed.host_str().unwrap_or_default().to_string()
}

/// Percent-decodes `raw`. `None` when an escape is not `%` plus two hex
/// digits or the bytes are not UTF-8.
fn decode_component(raw: &str) -> Option<Cow<'_, str>> {
    let bytes = raw.as_bytes();
    let malformed = bytes.iter().enumerate().any(|(i, b)| {
        *b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if malformed {
        return None;
    }
    urlencoding::decode(raw).ok()
}

/// Union of domain and URL tag rules, first occurrence order, no repeats.
pub fn extract_tags(domain: &str, url: &str) -> Vec<String> {
    let domain_tags = DOMAIN_TAG_RULES
        .iter()
        .filter(|(needle, _)| domain.contains(needle))
        .flat_map(|(_, tags)| tags.iter().copied());
    let url_tags = URL_TAG_RULES
        .iter()
        .filter(|(needle, _)| url.contains(needle))
        .map(|(_, tag)| *tag);

    let mut tags: Vec<String> = Vec::new();
    for tag in domain_tags.chain(url_tags) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub fn detect_type(domain: &str) -> LinkType {
    TYPE_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| domain.contains(n)))
        .map(|(kind, _)| *kind)
        .unwrap_or(LinkType::Website)
}

fn dashes_to_spaces(s: &str) -> String {
    s.replace(['-', '_'], " ")
}

/// Drops a trailing `.ext`, where `ext` is non-empty and contains no `/`.
fn strip_extension(s: &str) -> &str {
    match s.rfind('.') {
        Some(pos) if pos + 1 < s.len() && !s[pos + 1..].contains('/') => &s[..pos],
        _ => s,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
