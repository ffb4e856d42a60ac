//! Document-shell stripping.
//!
//! A page body is what remains of an HTML document once everything a
//! single-file component cannot hold is gone. Removed, case-insensitively:
//!
//! - the doctype declaration
//! - opening and closing `<html>` tags
//! - the whole `<head>…</head>` block, content included
//! - opening and closing `<body>` tags
//! - `<link rel="stylesheet" …>` elements
//! - `<script src="…">…</script>` elements
//!
//! Inline `<script>` blocks without `src` are left for
//! [`hoist_inline_scripts`](super::script::hoist_inline_scripts). Attribute
//! names match whole, so `data-src` or `data-rel` never count.

use regex::Regex;
use std::sync::OnceLock;

fn shell_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            r"(?i)<!doctype[^>]*>",
            r"(?is)<head\b[^>]*>.*?</head\s*>",
            r"(?i)</?html\b[^>]*>",
            r"(?i)</?body\b[^>]*>",
            r#"(?i)<link\b[^>]*\srel\s*=\s*["']?stylesheet\b[^>]*>"#,
            r"(?is)<script\b[^>]*\ssrc\s*=[^>]*>.*?</script\s*>",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("shell pattern must compile"))
        .collect()
    })
}

/// Strip the document shell from a page.
///
/// Rules are reapplied until nothing changes, so removing one element can
/// never leave behind text that another rule would match on a second call.
pub fn sanitize(fragment: &str) -> String {
    let mut current = fragment.to_string();
    loop {
        let next = shell_patterns()
            .iter()
            .fold(current.clone(), |acc, re| re.replace_all(&acc, "").into_owned());
        if next == current {
            return next;
        }
        current = next;
    }
}
