//! Shared test utilities for the sitevue test suite.
//!
//! Provides fixture setup and lookup helpers that work with scan-phase data
//! (`PageSet`, `PageUnit`) and with converted output on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let files = walk(tmp.path()).unwrap();
//! let set = collect_pages(&files, &rewriter()).unwrap();
//!
//! let about = find_page(&set, "about");
//! assert_eq!(about.source, "about.html");
//! assert_eq!(page_names(&set), vec!["about", "contact", "index"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::framework::vue;
use crate::markup::PatternRewriter;
use crate::scan::PageSet;
use crate::types::PageUnit;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// The rewriter the Vue profile uses.
pub fn rewriter() -> PatternRewriter {
    PatternRewriter::new(vue::SYNTAX)
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a page by base name. Panics if not found.
pub fn find_page<'a>(set: &'a PageSet, base_name: &str) -> &'a PageUnit {
    set.pages
        .iter()
        .find(|p| p.base_name == base_name)
        .unwrap_or_else(|| {
            let names = page_names(set);
            panic!("page '{base_name}' not found. Available: {names:?}")
        })
}

/// All page base names in discovery order.
pub fn page_names(set: &PageSet) -> Vec<&str> {
    set.pages.iter().map(|p| p.base_name.as_str()).collect()
}

/// Read a generated file. Panics with the path if it is missing.
pub fn read_output(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("cannot read output file '{relative}': {e}"))
}
