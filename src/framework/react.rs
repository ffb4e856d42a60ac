//! Attribute renaming for the `react` selector.
//!
//! There is no React profile: the site is copied file by file like
//! passthrough, and markup files have their `class` attributes renamed to
//! `className` so the markup reads as JSX. Nothing else changes.
//!
//! Only attribute names inside start tags are touched. Text content, quoted
//! attribute values, and `data-class` style names are left alone.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// One attribute name swapped for another in every start tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRename {
    /// Canonical selector.
    pub id: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

pub const CLASS_NAME: AttributeRename = AttributeRename {
    id: "react",
    from: "class",
    to: "className",
};

fn start_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<[A-Za-z][\w:-]*(?:"[^"]*"|'[^']*'|[^'">])*>"#)
            .expect("start tag pattern must compile")
    })
}

/// An attribute with its value, so quoted values are consumed whole.
fn attribute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?P<lead>\s)(?P<name>[^\s=/>"']+)(?P<eq>\s*=\s*)(?P<value>"[^"]*"|'[^']*'|[^\s>]*)"#,
        )
        .expect("attribute pattern must compile")
    })
}

impl AttributeRename {
    /// Rename the attribute in every start tag of `markup`.
    pub fn apply(&self, markup: &str) -> String {
        start_tag_re()
            .replace_all(markup, |tag: &Captures| {
                attribute_re()
                    .replace_all(&tag[0], |attr: &Captures| {
                        if attr["name"].eq_ignore_ascii_case(self.from) {
                            format!("{}{}{}{}", &attr["lead"], self.to, &attr["eq"], &attr["value"])
                        } else {
                            attr[0].to_string()
                        }
                    })
                    .into_owned()
            })
            .into_owned()
    }
}
