//! CLI output formatting.
//!
//! Output is **page-centric**: every page is shown by its position and route
//! first, with source and output files as indented context lines. This reads
//! as an inventory of the converted site while still letting users trace each
//! page back to its files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 Index → /
//!     Source: index.html
//!     Styles: style.css
//!     Scripts: index.js
//! 002 About → /about
//!     Source: about.html
//!
//! Files
//!     markup: 2
//!     stylesheet: 1
//!     script: 1
//!     other: 1
//! ```
//!
//! ## Convert
//!
//! ```text
//! Pages
//! 001 Index → /
//!     Source: index.html
//!     Output: src/pages/index.vue
//!
//! Components
//!     Nav → src/components/Nav.vue (from index)
//!
//! Assets
//!     public/img/logo.svg
//!
//! Scaffold
//!     package.json
//!     ...
//!
//! Converted 1 page, 1 component, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::convert::{ConversionMode, ConversionReport, Warning};
use crate::naming::{capitalize, route_path};
use crate::scan::PageSet;
use crate::types::{AssociatedAsset, ClassifiedFile, FileKind};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `2 pages`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn section(lines: &mut Vec<String>, title: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(title.to_string());
}

fn format_warnings<'a>(lines: &mut Vec<String>, warnings: impl IntoIterator<Item = &'a Warning>) {
    let mut warnings = warnings.into_iter().peekable();
    if warnings.peek().is_none() {
        return;
    }
    section(lines, "Warnings");
    for warning in warnings {
        lines.push(format!("{}{}", indent(1), warning));
    }
}

fn path_line(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Format the page inventory of a source tree.
pub fn format_scan_output(files: &[ClassifiedFile], set: &PageSet) -> Vec<String> {
    let mut lines = Vec::new();

    if !set.pages.is_empty() {
        section(&mut lines, "Pages");
        for (i, page) in set.pages.iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                capitalize(&page.base_name),
                route_path(&page.base_name)
            ));
            lines.push(format!("{}Source: {}", indent(1), page.source));
            let join = |assets: &[AssociatedAsset]| {
                assets
                    .iter()
                    .map(|a| a.relative_path.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            if !page.stylesheets.is_empty() {
                lines.push(format!("{}Styles: {}", indent(1), join(&page.stylesheets)));
            }
            if !page.scripts.is_empty() {
                lines.push(format!("{}Scripts: {}", indent(1), join(&page.scripts)));
            }
        }
    }

    section(&mut lines, "Files");
    for kind in [
        FileKind::Markup,
        FileKind::Stylesheet,
        FileKind::Script,
        FileKind::Other,
    ] {
        let count = files.iter().filter(|f| f.kind == kind && !f.hidden).count();
        lines.push(format!("{}{}: {}", indent(1), kind.label(), count));
    }
    let hidden = files.iter().filter(|f| f.hidden).count();
    if hidden > 0 {
        lines.push(format!("{}hidden: {}", indent(1), hidden));
    }

    let warnings: Vec<Warning> = set
        .collisions
        .iter()
        .cloned()
        .map(Warning::NameCollision)
        .chain(
            set.unassociated_scripts
                .iter()
                .cloned()
                .map(Warning::UnassociatedScript),
        )
        .collect();
    format_warnings(&mut lines, &warnings);
    lines
}

pub fn print_scan_output(files: &[ClassifiedFile], set: &PageSet) {
    for line in format_scan_output(files, set) {
        println!("{}", line);
    }
}

/// Format what a conversion wrote.
pub fn format_convert_output(report: &ConversionReport) -> Vec<String> {
    let mut lines = Vec::new();

    match report.mode {
        ConversionMode::Framework(_) => {}
        ConversionMode::Passthrough => {
            format_copied(&mut lines, report);
            lines.push(format!("Copied {} unchanged", plural(report.copied.len(), "file")));
            return lines;
        }
        ConversionMode::Rename(id) => {
            format_copied(&mut lines, report);
            lines.push(format!(
                "Copied {} for {id}, {} renamed",
                plural(report.copied.len(), "file"),
                report.renamed.len()
            ));
            return lines;
        }
    }

    if !report.pages.is_empty() {
        section(&mut lines, "Pages");
        for (i, page) in report.pages.iter().enumerate() {
            let name = Path::new(&page.source)
                .file_stem()
                .map(|s| capitalize(&s.to_string_lossy()))
                .unwrap_or_default();
            lines.push(format!("{} {} → {}", format_index(i + 1), name, page.route));
            lines.push(format!("{}Source: {}", indent(1), page.source));
            lines.push(format!("{}Output: {}", indent(1), path_line(&page.output)));
        }
    }

    if !report.components.is_empty() {
        section(&mut lines, "Components");
        for component in &report.components {
            lines.push(format!(
                "{}{} → {} (from {})",
                indent(1),
                component.name,
                path_line(&component.output),
                component.first_page
            ));
        }
    }

    if !report.assets.is_empty() {
        section(&mut lines, "Assets");
        for path in &report.assets {
            lines.push(format!("{}{}", indent(1), path_line(path)));
        }
    }

    section(&mut lines, "Scaffold");
    for path in &report.scaffold {
        lines.push(format!("{}{}", indent(1), path_line(path)));
    }

    format_warnings(&mut lines, &report.warnings);

    lines.push(String::new());
    lines.push(format!(
        "Converted {}, {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.components.len(), "component"),
        plural(report.assets.len(), "asset")
    ));
    lines
}

/// File list of a copy-only conversion, renamed files marked.
fn format_copied(lines: &mut Vec<String>, report: &ConversionReport) {
    if !report.copied.is_empty() {
        section(lines, "Copied");
        for path in &report.copied {
            let mark = if report.renamed.contains(path) { " (renamed)" } else { "" };
            lines.push(format!("{}{}{}", indent(1), path_line(path), mark));
        }
    }
    format_warnings(lines, &report.warnings);
    lines.push(String::new());
}

pub fn print_convert_output(report: &ConversionReport) {
    for line in format_convert_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConvertedComponent, ConvertedPage};
    use crate::scan::NameCollision;
    use crate::types::PageUnit;
    use std::path::PathBuf;

    fn report() -> ConversionReport {
        ConversionReport {
            mode: ConversionMode::Framework("vue"),
            pages: vec![ConvertedPage {
                source: "index.html".to_string(),
                output: PathBuf::from("src/pages/index.vue"),
                route: "/".to_string(),
            }],
            components: vec![ConvertedComponent {
                name: "Nav".to_string(),
                first_page: "index".to_string(),
                output: PathBuf::from("src/components/Nav.vue"),
            }],
            assets: vec![PathBuf::from("public/img/logo.svg")],
            scaffold: vec![PathBuf::from("package.json")],
            copied: vec![],
            renamed: vec![],
            warnings: vec![],
        }
    }

    #[test]
    fn index_is_zero_padded() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn plural_counts() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "asset"), "3 assets");
    }

    #[test]
    fn convert_output_lists_everything() {
        let lines = format_convert_output(&report());
        assert_eq!(
            lines,
            vec![
                "Pages",
                "001 Index → /",
                "    Source: index.html",
                "    Output: src/pages/index.vue",
                "",
                "Components",
                "    Nav → src/components/Nav.vue (from index)",
                "",
                "Assets",
                "    public/img/logo.svg",
                "",
                "Scaffold",
                "    package.json",
                "",
                "Converted 1 page, 1 component, 1 asset",
            ]
        );
    }

    #[test]
    fn convert_output_shows_warnings() {
        let mut report = report();
        report
            .warnings
            .push(Warning::UnassociatedScript("analytics.js".to_string()));
        let lines = format_convert_output(&report);
        let at = lines.iter().position(|l| l == "Warnings").unwrap();
        assert_eq!(lines[at + 1], "    analytics.js is not used by any page");
    }

    #[test]
    fn passthrough_output_lists_copies() {
        let report = ConversionReport {
            mode: ConversionMode::Passthrough,
            pages: vec![],
            components: vec![],
            assets: vec![],
            scaffold: vec![],
            copied: vec![PathBuf::from("index.html"), PathBuf::from("img/logo.svg")],
            renamed: vec![],
            warnings: vec![Warning::UnknownSelector("svelte".to_string())],
        };
        let lines = format_convert_output(&report);
        assert_eq!(lines[0], "Copied");
        assert!(lines.contains(&"    img/logo.svg".to_string()));
        assert!(lines.contains(&"    unknown framework 'svelte', files copied unchanged".to_string()));
        assert_eq!(lines.last().unwrap(), "Copied 2 files unchanged");
    }

    #[test]
    fn rename_output_marks_renamed_files() {
        let report = ConversionReport {
            mode: ConversionMode::Rename("react"),
            pages: vec![],
            components: vec![],
            assets: vec![],
            scaffold: vec![],
            copied: vec![PathBuf::from("index.html"), PathBuf::from("style.css")],
            renamed: vec![PathBuf::from("index.html")],
            warnings: vec![],
        };
        assert_eq!(
            format_convert_output(&report),
            vec![
                "Copied",
                "    index.html (renamed)",
                "    style.css",
                "",
                "Copied 2 files for react, 1 renamed",
            ]
        );
    }

    #[test]
    fn scan_output_shows_pages_and_counts() {
        let files = vec![
            ClassifiedFile {
                absolute_path: PathBuf::from("/site/about.html"),
                relative_path: "about.html".to_string(),
                kind: FileKind::Markup,
                hidden: false,
            },
            ClassifiedFile {
                absolute_path: PathBuf::from("/site/about.css"),
                relative_path: "about.css".to_string(),
                kind: FileKind::Stylesheet,
                hidden: false,
            },
        ];
        let set = PageSet {
            pages: vec![PageUnit {
                base_name: "about".to_string(),
                source: "about.html".to_string(),
                markup: String::new(),
                stylesheets: vec![AssociatedAsset {
                    relative_path: "about.css".to_string(),
                    content: String::new(),
                }],
                scripts: vec![],
            }],
            collisions: vec![NameCollision {
                base_name: "about".to_string(),
                kept: "about.html".to_string(),
                discarded: "old/about.html".to_string(),
            }],
            unassociated_scripts: vec![],
        };

        let lines = format_scan_output(&files, &set);
        assert_eq!(
            lines,
            vec![
                "Pages",
                "001 About → /about",
                "    Source: about.html",
                "    Styles: about.css",
                "",
                "Files",
                "    markup: 1",
                "    stylesheet: 1",
                "    script: 0",
                "    other: 0",
                "",
                "Warnings",
                "    about.html replaces old/about.html (both are page 'about')",
            ]
        );
    }

    #[test]
    fn hidden_files_counted_apart() {
        let files = vec![
            ClassifiedFile {
                absolute_path: PathBuf::from("/site/index.html"),
                relative_path: "index.html".to_string(),
                kind: FileKind::Markup,
                hidden: false,
            },
            ClassifiedFile {
                absolute_path: PathBuf::from("/site/.drafts/old.html"),
                relative_path: ".drafts/old.html".to_string(),
                kind: FileKind::Markup,
                hidden: true,
            },
        ];
        let lines = format_scan_output(&files, &PageSet::default());
        assert!(lines.contains(&"    markup: 1".to_string()));
        assert!(lines.contains(&"    hidden: 1".to_string()));
    }

    #[test]
    fn empty_scan_still_shows_counts() {
        let lines = format_scan_output(&[], &PageSet::default());
        assert_eq!(lines[0], "Files");
        assert_eq!(lines.len(), 5);
    }
}
