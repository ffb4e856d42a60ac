//! Pattern-based markup rewriting.
//!
//! Source pages are never parsed into a DOM. Every transformation is a
//! regular-expression rule over the raw text, grouped by stage:
//!
//! | Stage | Module | Contract |
//! |---|---|---|
//! | **Sanitize** | [`sanitize`] | strip doctype, `<html>`, `<head>…</head>`, `<body>`, stylesheet links, external scripts |
//! | **Extract** | [`extract`] | pull the first `<tag>…</tag>` block out of a fragment |
//! | **Rewrite** | [`rewrite`] | `<a href>` → navigation element, `onclick` → click binding |
//! | **Script** | [`script`] | function-name discovery, inline-script hoisting, asset references |
//!
//! The rest of the crate only talks to the [`MarkupRewriter`] trait, so an
//! AST-backed implementation can replace [`PatternRewriter`] without touching
//! page collection or synthesis.
//!
//! ## Known Limitations
//!
//! - Nested same-named tags (`<nav>` inside `<nav>`) are not supported by the
//!   extractor; the first closing tag ends the match.
//! - Function discovery captures `function name(…) { … }` with a single level
//!   of braces. Names are still found when bodies nest, bodies are not.
//! - Link targets with query strings or `../` segments pass through as-is.

pub mod extract;
pub mod rewrite;
pub mod sanitize;
pub mod script;

use crate::types::ExtractedRegion;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("<{tag}> is opened but never closed")]
    UnterminatedRegion { tag: String },
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Target-framework spelling of the constructs the rewriter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSyntax {
    /// Element replacing `<a>` for internal navigation.
    pub link_element: &'static str,
    /// Attribute on [`link_element`](Self::link_element) holding the target path.
    pub link_target: &'static str,
    /// Attribute replacing `onclick`.
    pub click_binding: &'static str,
}

/// Result of extracting one structural region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The fragment with the matched block removed (unchanged when nothing matched).
    pub remainder: String,
    pub region: Option<ExtractedRegion>,
}

/// Every text transformation the pipeline applies to pages and scripts.
pub trait MarkupRewriter: Sync {
    /// Strip the document shell, stylesheet links, and external scripts.
    fn sanitize(&self, fragment: &str) -> String;

    /// Remove the first `<tag>…</tag>` block and return it with links rewritten.
    fn extract(&self, fragment: &str, tag: &str) -> Result<Extraction, TransformError>;

    /// Rewrite internal `<a href>` links into navigation elements.
    fn rewrite_links(&self, fragment: &str) -> String;

    /// Rewrite `onclick` attributes whose handler is in `known`.
    fn rewrite_events(&self, fragment: &str, known: &BTreeSet<String>) -> String;

    /// Names of functions declared in a script.
    fn function_names(&self, script: &str) -> BTreeSet<String>;

    /// Move inline `<script>` bodies out of a fragment.
    fn hoist_scripts(&self, fragment: &str) -> (String, Vec<String>);

    /// Stylesheet and script URLs referenced by a page (`<link href>`, `<script src>`).
    fn referenced_assets(&self, markup: &str) -> Vec<String>;
}

/// The regular-expression implementation of [`MarkupRewriter`].
#[derive(Debug, Clone, Copy)]
pub struct PatternRewriter {
    syntax: TemplateSyntax,
    inline_arguments: bool,
}

impl PatternRewriter {
    pub fn new(syntax: TemplateSyntax) -> Self {
        Self {
            syntax,
            inline_arguments: false,
        }
    }

    /// Keep handler arguments as inline click handlers (`events.inline_arguments`).
    pub fn with_inline_arguments(mut self, inline_arguments: bool) -> Self {
        self.inline_arguments = inline_arguments;
        self
    }

    pub fn syntax(&self) -> &TemplateSyntax {
        &self.syntax
    }
}

impl MarkupRewriter for PatternRewriter {
    fn sanitize(&self, fragment: &str) -> String {
        sanitize::sanitize(fragment)
    }

    fn extract(&self, fragment: &str, tag: &str) -> Result<Extraction, TransformError> {
        extract::extract(fragment, tag, &self.syntax)
    }

    fn rewrite_links(&self, fragment: &str) -> String {
        rewrite::rewrite_links(fragment, &self.syntax)
    }

    fn rewrite_events(&self, fragment: &str, known: &BTreeSet<String>) -> String {
        rewrite::rewrite_events(fragment, known, &self.syntax, self.inline_arguments)
    }

    fn function_names(&self, script: &str) -> BTreeSet<String> {
        script::function_names(script)
    }

    fn hoist_scripts(&self, fragment: &str) -> (String, Vec<String>) {
        script::hoist_inline_scripts(fragment)
    }

    fn referenced_assets(&self, markup: &str) -> Vec<String> {
        script::referenced_assets(markup)
    }
}
