//! Target framework profiles.
//!
//! A [`FrameworkProfile`] bundles everything that depends on the output
//! framework: the template syntax the markup rewriter emits, where pages and
//! components live, how they are wrapped, the router file, and the scaffold.
//! One profile is selected per conversion with [`profile_for`]. A selector
//! without a profile may still name an attribute rename ([`rename_for`],
//! `react`), applied while copying the site; anything else means passthrough
//! copy.

pub mod react;
pub mod vue;

use crate::config::ConvertConfig;
use crate::markup::TemplateSyntax;
use crate::types::{ComponentUnit, RouteEntry};
use std::path::PathBuf;

/// How a page's stylesheets end up in its single-file component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleBlock {
    /// Stylesheet content placed in the page's scoped style block (may be empty).
    Inline(String),
    /// Stylesheets copied into the profile's stylesheet directory, by their
    /// path relative to that directory.
    External(Vec<String>),
}

/// Everything needed to render one page file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub base_name: String,
    /// Component names rendered above the markup.
    pub top: Vec<String>,
    /// Component names rendered below the markup.
    pub bottom: Vec<String>,
    /// Sanitized and rewritten page markup.
    pub markup: String,
    /// Associated and hoisted script code, empty when there is none.
    pub script: String,
    pub style: StyleBlock,
}

/// A generated bootstrap file, by path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: PathBuf,
    pub contents: String,
}

pub trait FrameworkProfile: Sync {
    /// Canonical selector (`vue`).
    fn id(&self) -> &'static str;

    fn syntax(&self) -> TemplateSyntax;

    /// Output path of a page file, relative to the output root.
    fn page_path(&self, base_name: &str) -> PathBuf;

    /// Output path of a shared component file, relative to the output root.
    fn component_path(&self, name: &str) -> PathBuf;

    fn render_page(&self, page: &PageView) -> String;

    fn render_component(&self, component: &ComponentUnit) -> String;

    fn render_router(&self, routes: &[RouteEntry]) -> String;

    /// Every bootstrap file, router included.
    fn scaffold_files(
        &self,
        routes: &[RouteEntry],
        config: &ConvertConfig,
    ) -> Result<Vec<ScaffoldFile>, serde_json::Error>;

    /// Directories that must exist even when empty.
    fn asset_dirs(&self) -> &'static [&'static str];

    /// Directory that static files are copied into, served from `/`.
    fn public_dir(&self) -> &'static str;

    /// Directory that stylesheets are copied into under the external policy.
    fn stylesheet_dir(&self) -> &'static str;
}

/// Profile for a framework selector, matched case-insensitively.
pub fn profile_for(selector: &str) -> Option<&'static dyn FrameworkProfile> {
    match selector.trim().to_ascii_lowercase().as_str() {
        "vue" => Some(&vue::VueProfile),
        _ => None,
    }
}

/// Attribute rename for a copy-only selector, matched case-insensitively.
pub fn rename_for(selector: &str) -> Option<&'static react::AttributeRename> {
    match selector.trim().to_ascii_lowercase().as_str() {
        "react" => Some(&react::CLASS_NAME),
        _ => None,
    }
}
