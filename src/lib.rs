//! # sitevue
//!
//! Converts a folder of static HTML, CSS, and JavaScript into a runnable
//! Vue 3 + Vite project. Every HTML file becomes a page component and a
//! route; repeated page chrome becomes shared components.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      site/        →  pages + assets     (walk, classify, associate)
//! 2. Synth     pages        →  src/pages, src/components
//! 3. Scaffold  page names   →  router, manifest, entry files
//! ```
//!
//! [`convert::convert`] runs all three for one input tree. Nothing is cached
//! between runs: the same input always produces byte-identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the site, classifies files, groups pages with their styles and scripts |
//! | [`synth`] | Stage 2: runs the markup rules per page, promotes shared regions, writes page and component files |
//! | [`scaffold`] | Stage 3: writes the project bootstrap files |
//! | [`convert`] | Entry point: selects a framework profile, orchestrates the stages, builds the report |
//! | [`markup`] | Pattern-based rewriting rules behind the `MarkupRewriter` trait |
//! | [`framework`] | Per-framework output conventions behind the `FrameworkProfile` trait |
//! | [`routes`] | Route table derived from page discovery order |
//! | [`config`] | `sitevue.toml` loading, merging, and validation |
//! | [`types`] | Data passed between stages |
//! | [`naming`] | Display names, route paths, and identifiers derived from file names |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Patterns, Not a DOM
//!
//! Pages are rewritten with regular expressions over the raw text. Real-world
//! static sites are often not well-formed, and a pattern rule that misses
//! leaves the markup alone instead of rejecting the page. All rules sit behind
//! [`markup::MarkupRewriter`] so a parser-backed implementation can replace
//! them without touching any other stage.
//!
//! ## First Occurrence Wins
//!
//! A region such as `<nav>` becomes a component the first time a page
//! contains it, in traversal order. Later pages reference that component and
//! their own copy is discarded. Traversal is sorted by file name, so which
//! page wins never depends on the filesystem.
//!
//! ## Unknown Frameworks Copy Through
//!
//! A framework selector with no profile is not an error. The input is copied
//! to the output unchanged, hidden files included, and the report carries a
//! warning. `react` copies the same way but renames `class` attributes to
//! `className` in markup files.

pub mod config;
pub mod convert;
pub mod framework;
pub mod markup;
pub mod naming;
pub mod output;
pub mod routes;
pub mod scaffold;
pub mod scan;
pub mod synth;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
