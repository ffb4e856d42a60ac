//! Script-facing rules: handler discovery, inline-script hoisting, and the
//! asset references a page declares in its markup.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn function_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)function\s+(?P<name>[A-Za-z_$][\w$]*)\s*\((?P<params>[^)]*)\)\s*\{(?P<body>[^}]*)\}")
            .expect("function pattern must compile")
    })
}

fn inline_script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b(?P<attrs>[^>]*)>(?P<body>.*?)</script\s*>")
            .expect("script pattern must compile")
    })
}

fn asset_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<(?P<tag>link|script)\b(?P<attrs>[^>]*)>").expect("tag pattern must compile")
    })
}

fn attr_re(name: &'static str) -> &'static Regex {
    static HREF: OnceLock<Regex> = OnceLock::new();
    static SRC: OnceLock<Regex> = OnceLock::new();
    static REL: OnceLock<Regex> = OnceLock::new();
    static TYPE: OnceLock<Regex> = OnceLock::new();
    let cell = match name {
        "href" => &HREF,
        "src" => &SRC,
        "rel" => &REL,
        _ => &TYPE,
    };
    cell.get_or_init(|| {
        Regex::new(&format!(
            r#"(?i)(?:^|\s){name}\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"'>]+))"#
        ))
        .expect("attribute pattern must compile")
    })
}

/// Value of `name` in a tag's attribute text (`href`, `src`, `rel`, `type`).
fn attribute(attrs: &str, name: &'static str) -> Option<String> {
    attr_re(name).captures(attrs).and_then(|caps| {
        caps.name("dq")
            .or_else(|| caps.name("sq"))
            .or_else(|| caps.name("bare"))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// Names of all `function name(…) { … }` declarations in a script.
pub fn function_names(script: &str) -> BTreeSet<String> {
    function_re()
        .captures_iter(script)
        .map(|caps| caps["name"].to_string())
        .collect()
}

/// Script types that can run as component setup code.
fn is_executable(attrs: &str) -> bool {
    match attribute(attrs, "type") {
        None => true,
        Some(kind) => matches!(
            kind.to_ascii_lowercase().as_str(),
            "" | "module" | "text/javascript" | "application/javascript" | "text/ecmascript"
        ),
    }
}

/// Remove inline `<script>` blocks from a fragment and return their bodies.
///
/// Blocks with a `src` attribute or a non-JavaScript `type` (JSON-LD,
/// templates) stay where they are.
pub fn hoist_inline_scripts(fragment: &str) -> (String, Vec<String>) {
    let mut remainder = String::with_capacity(fragment.len());
    let mut bodies = Vec::new();
    let mut last_end = 0;

    for caps in inline_script_re().captures_iter(fragment) {
        let Some(whole) = caps.get(0) else { continue };
        let attrs = &caps["attrs"];
        if attribute(attrs, "src").is_some() || !is_executable(attrs) {
            continue;
        }
        remainder.push_str(&fragment[last_end..whole.start()]);
        last_end = whole.end();

        let body = caps["body"].trim();
        if !body.is_empty() {
            bodies.push(body.to_string());
        }
    }
    remainder.push_str(&fragment[last_end..]);
    (remainder, bodies)
}

/// Stylesheet and script URLs a page references, in document order.
pub fn referenced_assets(markup: &str) -> Vec<String> {
    asset_tag_re()
        .captures_iter(markup)
        .filter_map(|caps| {
            let attrs = &caps["attrs"];
            if caps["tag"].eq_ignore_ascii_case("link") {
                let rel = attribute(attrs, "rel")?;
                rel.split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case("stylesheet"))
                    .then(|| attribute(attrs, "href"))?
            } else {
                attribute(attrs, "src")
            }
        })
        .filter(|url| !url.is_empty())
        .collect()
}
