//! Name derivation shared by routes, pages, and components.
//!
//! Every generated name comes from a page's base name or a region's tag:
//!
//! - `about` → display name `About`, route `/about`, import `About`
//! - `index` → display name `Index`, route `/`
//! - `about-us` → display name `About-us`, import `AboutUs`
//! - `404` → display name `404`, import `Page404`
//! - `nav` (tag) → component `Nav`
//! - `site-header` (tag) → component `SiteHeader`

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// URL path for a page: `/` for `index`, `/<base_name>` otherwise.
pub fn route_path(base_name: &str) -> String {
    if base_name == "index" {
        "/".to_string()
    } else {
        format!("/{base_name}")
    }
}

/// Component name for a structural tag (`nav` → `Nav`).
///
/// Custom-element tags are joined into one identifier (`site-header` →
/// `SiteHeader`) so the name can be imported directly.
pub fn component_name(tag: &str) -> String {
    tag.to_ascii_lowercase()
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// A valid JavaScript identifier for importing a page.
///
/// Non-alphanumeric characters split words, each word is capitalized, and a
/// leading digit gets a `Page` prefix.
pub fn pascal_ident(base_name: &str) -> String {
    let ident: String = base_name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    match ident.chars().next() {
        None => "Page".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Page{ident}"),
        Some(_) => ident,
    }
}

/// Escape a value for use inside a single-quoted JavaScript string.
pub fn js_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
