//! Structural region extraction.
//!
//! Repeated page chrome (navigation bars, footers) is pulled out of each page
//! so the synthesizer can promote it into a shared component. Matching is
//! non-greedy and case-insensitive, and only the first block is taken.

use super::rewrite::rewrite_links;
use super::{Extraction, TemplateSyntax, TransformError};
use crate::types::ExtractedRegion;
use regex::Regex;

/// Remove the first `<tag …>…</tag>` block from `fragment`.
///
/// The returned region carries both the raw block and the block with links
/// rewritten. A fragment without the tag comes back unchanged with no region.
/// An opening tag that is never closed is a [`TransformError`]; the caller
/// decides how to degrade.
pub fn extract(
    fragment: &str,
    tag: &str,
    syntax: &TemplateSyntax,
) -> Result<Extraction, TransformError> {
    let name = regex::escape(tag);
    let block = Regex::new(&format!(r"(?is)<{name}\b[^>]*>.*?</{name}\s*>"))?;

    let Some(found) = block.find(fragment) else {
        let opening = Regex::new(&format!(r"(?i)<{name}\b[^>]*>"))?;
        if opening.is_match(fragment) {
            return Err(TransformError::UnterminatedRegion {
                tag: tag.to_string(),
            });
        }
        return Ok(Extraction {
            remainder: fragment.to_string(),
            region: None,
        });
    };

    let raw = found.as_str().to_string();
    let mut remainder = String::with_capacity(fragment.len() - raw.len());
    remainder.push_str(&fragment[..found.start()]);
    remainder.push_str(&fragment[found.end()..]);

    Ok(Extraction {
        remainder,
        region: Some(ExtractedRegion {
            tag: tag.to_ascii_lowercase(),
            rewritten: rewrite_links(&raw, syntax),
            raw,
        }),
    })
}
