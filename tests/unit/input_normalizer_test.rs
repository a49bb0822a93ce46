//! Unit tests for pasted-text parsing and the auto-format pass.

use linkshelf::services::input_normalizer::{auto_format_block, parse_block};

#[test]
fn test_parse_block_skips_blank_and_invalid_lines() {
    let text = "\n  https://a.com/x  \n\nnot a link\nb.org | Bee\n   \n";
    let lines = parse_block(text);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].url.as_str(), "https://a.com/x");
    assert_eq!(lines[0].title, "");
    assert_eq!(lines[1].url.as_str(), "https://b.org");
    assert_eq!(lines[1].title, "Bee");
}

#[test]
fn test_parse_block_trims_title_segments() {
    let lines = parse_block("https://a.com |   Spaced   title  ");
    assert_eq!(lines[0].title, "Spaced   title");
}

#[test]
fn test_parse_block_empty_title_segment() {
    let lines = parse_block("https://a.com |");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].title, "");
}

#[test]
fn test_parse_block_handles_crlf() {
    let lines = parse_block("https://a.com\r\nhttps://b.com\r\n");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].url.as_str(), "https://b.com");
}

#[test]
fn test_parse_block_all_invalid_is_empty() {
    assert!(parse_block("nope\n\"\"\n   ").is_empty());
}

#[test]
fn test_auto_format_adds_inferred_title() {
    let out = auto_format_block("https://example.com/some-long-page-name");
    assert_eq!(out, "https://example.com/some-long-page-name | Some long page name");
}

#[test]
fn test_auto_format_uses_first_token_only() {
    let out = auto_format_block("https://github.com/rust-lang trailing words");
    assert_eq!(out, "https://github.com/rust-lang | Rust lang");
}

#[test]
fn test_auto_format_leaves_other_lines() {
    let out = auto_format_block("plain note\nexample.com\nhttps://a.com/xy | T");
    assert_eq!(out, "plain note\nexample.com\nhttps://a.com/xy | T");
}
