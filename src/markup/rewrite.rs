//! Link and event-handler rewriting.
//!
//! ## Links
//!
//! `<a … href="X" …>text</a>` becomes `<router-link … to="P" …>text</router-link>`
//! (element and attribute names come from [`TemplateSyntax`]):
//!
//! | `href` | Target |
//! |---|---|
//! | `index.html`, `./` | `/` |
//! | `about.html` | `/about` |
//! | `blog/post.html` | `/blog/post` |
//! | `/docs/intro.html` | `/docs/intro` |
//! | `https://…`, `//…`, `mailto:…`, `#top` | untouched |
//! | `files/report.pdf` | untouched (asset, not a page) |
//!
//! ## Events
//!
//! `onclick="greet(…)"` becomes `@click="greet"` when `greet` is declared in
//! the page's script. With `keep_arguments`, a call with arguments stays an
//! inline handler instead (`@click="greet('Bob')"`). Handlers the script does
//! not declare are left alone.
//!
//! Attribute names must start after whitespace, so `data-href` and
//! `data-onclick` are never rewritten.

use super::TemplateSyntax;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<a\b(?P<pre>[^>]*?\s)href\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')(?P<post>[^>]*)>(?P<text>.*?)</a\s*>"#,
        )
        .expect("anchor pattern must compile")
    })
}

fn onclick_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(?P<lead>\s)onclick\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
            .expect("onclick pattern must compile")
    })
}

/// Rewrite every internal `<a href>` into the framework's navigation element.
pub fn rewrite_links(fragment: &str, syntax: &TemplateSyntax) -> String {
    anchor_re()
        .replace_all(fragment, |caps: &Captures| {
            let href = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match route_target(href) {
                Some(target) => format!(
                    "<{el}{pre}{attr}=\"{target}\"{post}>{text}</{el}>",
                    el = syntax.link_element,
                    pre = &caps["pre"],
                    attr = syntax.link_target,
                    post = &caps["post"],
                    text = &caps["text"],
                ),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Client-side route for an `href`, or `None` when the link must stay an `<a>`.
pub fn route_target(href: &str) -> Option<String> {
    let href = href.trim();
    if is_external(href) {
        return None;
    }
    if href == "index.html" || href == "./" {
        return Some("/".to_string());
    }

    let path = href
        .strip_suffix(".html")
        .or_else(|| href.strip_suffix(".htm"))
        .unwrap_or(href);
    if path.len() == href.len() && has_asset_extension(path) {
        return None;
    }
    if path == "index" || path == "/index" {
        return Some("/".to_string());
    }
    if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{path}"))
    }
}

fn is_external(href: &str) -> bool {
    href.is_empty() || href.starts_with('#') || href.starts_with("//") || has_scheme(href)
}

/// `scheme:` prefix per RFC 3986 (`https:`, `mailto:`, `tel:`, `javascript:`).
fn has_scheme(href: &str) -> bool {
    let Some(colon) = href.find(':') else {
        return false;
    };
    let scheme = &href[..colon];
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Last path segment carries a non-page file extension (`report.pdf`, `logo.png`).
fn has_asset_extension(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && !ext.is_empty()
                && !ext.eq_ignore_ascii_case("html")
                && !ext.eq_ignore_ascii_case("htm")
        }
        None => false,
    }
}

/// Rewrite `onclick` attributes that call a function in `known`.
pub fn rewrite_events(
    fragment: &str,
    known: &BTreeSet<String>,
    syntax: &TemplateSyntax,
    keep_arguments: bool,
) -> String {
    onclick_re()
        .replace_all(fragment, |caps: &Captures| {
            let call = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            let lead = &caps["lead"];
            match click_handler(call, known, keep_arguments) {
                Some(handler) if !handler.contains('"') => {
                    format!("{lead}{}=\"{handler}\"", syntax.click_binding)
                }
                Some(handler) if !handler.contains('\'') => {
                    format!("{lead}{}='{handler}'", syntax.click_binding)
                }
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Binding expression for an inline handler, `None` when the handler is unknown.
///
/// The handler name is the text before the first `(`.
fn click_handler(call: &str, known: &BTreeSet<String>, keep_arguments: bool) -> Option<String> {
    let call = call.trim().trim_end_matches(';').trim_end();
    let name = call.split('(').next().unwrap_or_default().trim();
    if !known.contains(name) {
        return None;
    }
    let args = call[call.find(name)? + name.len()..].trim();
    if keep_arguments && !args.is_empty() && args != "()" {
        Some(call.to_string())
    } else {
        Some(name.to_string())
    }
}
