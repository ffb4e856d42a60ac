//! Shared types passed between pipeline stages.
//!
//! The walker produces [`ClassifiedFile`]s, page collection turns markup files
//! into [`PageUnit`]s, the extractor yields [`ExtractedRegion`]s which the
//! synthesizer promotes into [`ComponentUnit`]s, and the route generator emits
//! one [`RouteEntry`] per page.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Coarse file classification, derived purely from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Markup,
    Stylesheet,
    Script,
    Other,
}

impl FileKind {
    /// Classify a path by its (case-insensitive) extension.
    ///
    /// - `html`, `htm` → Markup
    /// - `css` → Stylesheet
    /// - `js`, `mjs` → Script
    /// - anything else, including no extension → Other
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "html" | "htm" => FileKind::Markup,
            "css" => FileKind::Stylesheet,
            "js" | "mjs" => FileKind::Script,
            _ => FileKind::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Markup => "markup",
            FileKind::Stylesheet => "stylesheet",
            FileKind::Script => "script",
            FileKind::Other => "other",
        }
    }
}

/// A file found under the input root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedFile {
    pub absolute_path: PathBuf,
    /// Path relative to the input root, always `/`-separated.
    pub relative_path: String,
    pub kind: FileKind,
    /// Inside a hidden entry (`.htaccess`, `.git/…`) or the root config file.
    /// Copied by passthrough, never converted or published.
    pub hidden: bool,
}

impl ClassifiedFile {
    /// File name without its extension (`css/about.css` → `about`).
    pub fn stem(&self) -> String {
        self.absolute_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// A stylesheet or script whose content travels with a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociatedAsset {
    pub relative_path: String,
    pub content: String,
}

/// One discovered markup file and the assets associated with it.
#[derive(Debug, Clone, Serialize)]
pub struct PageUnit {
    /// Markup file name without extension; unique within a conversion.
    pub base_name: String,
    /// Relative path of the markup file.
    pub source: String,
    pub markup: String,
    pub stylesheets: Vec<AssociatedAsset>,
    pub scripts: Vec<AssociatedAsset>,
}

impl PageUnit {
    /// Combined stylesheet content, `None` when no stylesheet is associated.
    pub fn stylesheet(&self) -> Option<String> {
        join_assets(&self.stylesheets)
    }

    /// Combined script content, `None` when no script is associated.
    pub fn script(&self) -> Option<String> {
        join_assets(&self.scripts)
    }
}

fn join_assets(assets: &[AssociatedAsset]) -> Option<String> {
    if assets.is_empty() {
        return None;
    }
    let parts: Vec<&str> = assets.iter().map(|a| a.content.trim_end()).collect();
    Some(parts.join("\n\n"))
}

/// A structural block pulled out of a page's markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRegion {
    /// Lowercased tag identity, e.g. `nav`.
    pub tag: String,
    /// The matched block exactly as it appeared in the source.
    pub raw: String,
    /// The matched block with links rewritten.
    pub rewritten: String,
}

/// A shared component promoted from the first occurrence of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentUnit {
    /// Capitalized tag identity, e.g. `Nav`.
    pub name: String,
    pub tag: String,
    pub template: String,
    /// Base name of the page the component was promoted from.
    pub first_page: String,
}

/// One entry of the generated router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// URL path: `/` for `index`, `/<base_name>` otherwise.
    pub path: String,
    /// Display name: capitalized base name.
    pub name: String,
    /// Base name of the page this route renders.
    pub page: String,
    /// JavaScript identifier the router imports the page as.
    pub ident: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(FileKind::from_path(Path::new("index.html")), FileKind::Markup);
        assert_eq!(FileKind::from_path(Path::new("old/page.HTM")), FileKind::Markup);
        assert_eq!(FileKind::from_path(Path::new("style.css")), FileKind::Stylesheet);
        assert_eq!(FileKind::from_path(Path::new("app.js")), FileKind::Script);
        assert_eq!(FileKind::from_path(Path::new("mod.mjs")), FileKind::Script);
        assert_eq!(FileKind::from_path(Path::new("logo.svg")), FileKind::Other);
        assert_eq!(FileKind::from_path(Path::new("LICENSE")), FileKind::Other);
    }

    #[test]
    fn stem_drops_directory_and_extension() {
        let file = ClassifiedFile {
            absolute_path: PathBuf::from("/site/css/about.css"),
            relative_path: "css/about.css".to_string(),
            kind: FileKind::Stylesheet,
            hidden: false,
        };
        assert_eq!(file.stem(), "about");
    }

    #[test]
    fn assets_join_with_blank_line() {
        let page = PageUnit {
            base_name: "index".to_string(),
            source: "index.html".to_string(),
            markup: String::new(),
            stylesheets: vec![
                AssociatedAsset {
                    relative_path: "a.css".to_string(),
                    content: "a {}\n".to_string(),
                },
                AssociatedAsset {
                    relative_path: "b.css".to_string(),
                    content: "b {}".to_string(),
                },
            ],
            scripts: vec![],
        };
        assert_eq!(page.stylesheet().as_deref(), Some("a {}\n\nb {}"));
        assert_eq!(page.script(), None);
    }
}
