//! Source tree walking and page collection.
//!
//! Stage 1 of the conversion pipeline. Walks the input directory, classifies
//! every file by extension, and groups markup files with the stylesheets and
//! scripts that belong to them.
//!
//! ## Input Layout
//!
//! Any static site works; nothing about the layout is required:
//!
//! ```text
//! site/
//! ├── sitevue.toml      # Optional config (hidden)
//! ├── index.html        # Page "index"  → route /
//! ├── index.js          # Script of "index" (same stem)
//! ├── about.html        # Page "about"  → route /about
//! ├── style.css         # Linked from index.html and about.html
//! ├── css/
//! │   └── about.css     # Stylesheet of "about" (same stem)
//! ├── img/
//! │   └── logo.svg      # Static asset → public/img/logo.svg
//! └── .git/             # Hidden
//! ```
//!
//! Hidden entries (any path segment starting with `.`) and the root config
//! file are walked like everything else but flagged
//! [`hidden`](ClassifiedFile::hidden): passthrough copies them, page
//! collection and the generated project leave them out.
//!
//! ## Traversal Order
//!
//! Depth-first, with the entries of every directory sorted by file name. Page
//! discovery order drives route order and decides which page a shared
//! component is promoted from, so the order must not depend on the platform.
//!
//! ## Association Rules
//!
//! A stylesheet or script belongs to a page when either
//! - its file stem equals the page's base name (`about.css` ↔ `about.html`), or
//! - the page references it (`<link rel="stylesheet" href>`, `<script src>`).
//!
//! A stylesheet that belongs to no page is site-wide and attached to every
//! page. A script that belongs to no page is reported and left out.
//!
//! Two markup files with the same base name collide: the later one replaces
//! the earlier one (keeping its position) and the collision is reported.

use crate::config::CONFIG_FILE;
use crate::markup::MarkupRewriter;
use crate::types::{AssociatedAsset, ClassifiedFile, FileKind, PageUnit};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Two markup files resolved to the same page base name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCollision {
    pub base_name: String,
    /// Source that won (the later one in traversal order).
    pub kept: String,
    /// Source that was dropped.
    pub discarded: String,
}

/// Pages discovered in a source tree.
#[derive(Debug, Default)]
pub struct PageSet {
    /// Pages in discovery order.
    pub pages: Vec<PageUnit>,
    pub collisions: Vec<NameCollision>,
    /// Scripts no page claimed, as relative paths.
    pub unassociated_scripts: Vec<String>,
}

/// Enumerate and classify every file under `root`.
///
/// Hidden entries and the root-level config file are included and flagged.
/// A missing or unreadable root is an error.
pub fn walk(root: &Path) -> Result<Vec<ClassifiedFile>, ScanError> {
    if !fs::metadata(root)?.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let hidden = relative_path == CONFIG_FILE
            || relative_path.split('/').any(|segment| segment.starts_with('.'));

        files.push(ClassifiedFile {
            absolute_path: entry.path().to_path_buf(),
            relative_path,
            kind: FileKind::from_path(entry.path()),
            hidden,
        });
    }

    debug!(root = %root.display(), count = files.len(), "walked source tree");
    Ok(files)
}

/// Read a text file, replacing invalid UTF-8 rather than failing the batch.
fn read_text(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Build page units from classified files.
pub fn collect_pages(
    files: &[ClassifiedFile],
    rewriter: &dyn MarkupRewriter,
) -> Result<PageSet, ScanError> {
    let mut set = PageSet::default();
    // Relative paths each page references, parallel to `set.pages`.
    let mut references: Vec<Vec<String>> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    let site = || files.iter().filter(|f| !f.hidden);

    for file in site().filter(|f| f.kind == FileKind::Markup) {
        let markup = read_text(&file.absolute_path)?;
        let refs = rewriter
            .referenced_assets(&markup)
            .iter()
            .filter_map(|url| resolve_reference(&file.relative_path, url))
            .collect();
        let page = PageUnit {
            base_name: file.stem(),
            source: file.relative_path.clone(),
            markup,
            stylesheets: Vec::new(),
            scripts: Vec::new(),
        };

        match index_by_name.get(&page.base_name) {
            Some(&i) => {
                warn!(
                    page = %page.base_name,
                    kept = %page.source,
                    discarded = %set.pages[i].source,
                    "page base name collision, later file wins"
                );
                set.collisions.push(NameCollision {
                    base_name: page.base_name.clone(),
                    kept: page.source.clone(),
                    discarded: set.pages[i].source.clone(),
                });
                set.pages[i] = page;
                references[i] = refs;
            }
            None => {
                index_by_name.insert(page.base_name.clone(), set.pages.len());
                set.pages.push(page);
                references.push(refs);
            }
        }
    }

    for file in site().filter(|f| matches!(f.kind, FileKind::Stylesheet | FileKind::Script)) {
        let stem = file.stem();
        let mut targets: Vec<usize> = set
            .pages
            .iter()
            .zip(&references)
            .enumerate()
            .filter(|(_, (page, refs))| page.base_name == stem || refs.contains(&file.relative_path))
            .map(|(i, _)| i)
            .collect();

        if targets.is_empty() {
            if file.kind == FileKind::Script {
                debug!(script = %file.relative_path, "script not associated with any page");
                set.unassociated_scripts.push(file.relative_path.clone());
                continue;
            }
            debug!(stylesheet = %file.relative_path, "site-wide stylesheet");
            targets = (0..set.pages.len()).collect();
        }
        if targets.is_empty() {
            continue;
        }

        let asset = AssociatedAsset {
            relative_path: file.relative_path.clone(),
            content: read_text(&file.absolute_path)?,
        };
        for i in targets {
            let page = &mut set.pages[i];
            match file.kind {
                FileKind::Stylesheet => page.stylesheets.push(asset.clone()),
                _ => page.scripts.push(asset.clone()),
            }
        }
    }

    Ok(set)
}

/// Resolve a URL found in a page against the page's location.
///
/// Returns a root-relative, `/`-separated path, or `None` for URLs that point
/// outside the source tree.
fn resolve_reference(page: &str, url: &str) -> Option<String> {
    if url.contains("://") || url.starts_with("//") || url.starts_with("data:") {
        return None;
    }
    let path = url.split(['?', '#']).next().unwrap_or_default();
    if path.is_empty() {
        return None;
    }

    let mut segments: Vec<&str> = if path.starts_with('/') {
        Vec::new()
    } else {
        let mut dir: Vec<&str> = page.split('/').collect();
        dir.pop();
        dir
    };
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}
