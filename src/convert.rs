//! Conversion entry point.
//!
//! [`convert`] runs the whole pipeline for one input tree:
//!
//! ```text
//! walk ─→ collect pages ─→ prepare (sequential) ─→ render + write (parallel)
//!   │                            │
//!   │                            └─→ components ─→ src/components/
//!   ├─→ static files ─→ public/
//!   └─→ page names ─→ routes ─→ scaffold (router, manifest, entry files)
//! ```
//!
//! The selector picks a [`FrameworkProfile`]. `react` has no profile and
//! copies the site with `class` attributes renamed (see
//! [`react`](crate::framework::react)). Any other selector is not an error:
//! every file is copied to the output unchanged and the report carries a
//! warning.
//!
//! The output directory must differ from the input directory. Converting a
//! site onto itself would overwrite the sources it reads.

use crate::config::{self, ConfigError, ConvertConfig, StylePolicy};
use crate::framework::react::AttributeRename;
use crate::framework::{FrameworkProfile, PageView, profile_for, rename_for};
use crate::markup::PatternRewriter;
use crate::routes::build_routes;
use crate::scaffold::{ScaffoldError, emit_scaffold};
use crate::scan::{self, NameCollision, ScanError};
use crate::synth::{self, ComponentRegistry, TransformFallback};
use crate::types::{ClassifiedFile, FileKind};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scaffold error: {0}")]
    Scaffold(#[from] ScaffoldError),
    #[error("Output directory is the input directory: {0}")]
    OutputIsInput(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Converted with the profile of the given id.
    Framework(&'static str),
    /// Files copied with an attribute rename applied to markup.
    Rename(&'static str),
    /// Unknown selector: files copied unchanged.
    Passthrough,
}

/// Something that did not stop the conversion but changed its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnknownSelector(String),
    NameCollision(NameCollision),
    TransformFallback(TransformFallback),
    UnassociatedScript(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownSelector(selector) => {
                write!(f, "unknown framework '{selector}', files copied unchanged")
            }
            Warning::NameCollision(c) => write!(
                f,
                "{} replaces {} (both are page '{}')",
                c.kept, c.discarded, c.base_name
            ),
            Warning::TransformFallback(fb) => {
                write!(f, "{}: <{}> left in the page: {}", fb.page, fb.tag, fb.reason)
            }
            Warning::UnassociatedScript(path) => write!(f, "{path} is not used by any page"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPage {
    /// Markup file the page came from, relative to the input root.
    pub source: String,
    /// Page file, relative to the output root.
    pub output: PathBuf,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedComponent {
    pub name: String,
    /// Page the component was promoted from.
    pub first_page: String,
    pub output: PathBuf,
}

/// What a conversion wrote. All paths are relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub mode: ConversionMode,
    pub pages: Vec<ConvertedPage>,
    pub components: Vec<ConvertedComponent>,
    /// Static files and external stylesheets copied into the project.
    pub assets: Vec<PathBuf>,
    pub scaffold: Vec<PathBuf>,
    /// Files copied in passthrough and rename mode.
    pub copied: Vec<PathBuf>,
    /// Markup files the rename changed (a subset of `copied`).
    pub renamed: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
}

impl ConversionReport {
    fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            pages: Vec::new(),
            components: Vec::new(),
            assets: Vec::new(),
            scaffold: Vec::new(),
            copied: Vec::new(),
            renamed: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Convert `input` into `output` using the config file found in `input`.
pub fn convert(input: &Path, output: &Path, selector: &str) -> Result<ConversionReport, ConvertError> {
    let config = config::load_config(input)?;
    convert_with_config(input, output, selector, &config)
}

/// Convert `input` into `output` with an already resolved config.
pub fn convert_with_config(
    input: &Path,
    output: &Path,
    selector: &str,
    config: &ConvertConfig,
) -> Result<ConversionReport, ConvertError> {
    if same_directory(input, output) {
        return Err(ConvertError::OutputIsInput(output.to_path_buf()));
    }
    let files = exclude_output(scan::walk(input)?, input, output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        files = files.len(),
        selector,
        "starting conversion"
    );

    if let Some(profile) = profile_for(selector) {
        return convert_framework(&files, output, profile, config);
    }
    if let Some(rename) = rename_for(selector) {
        return copy_tree(&files, output, Some(rename));
    }

    warn!(selector, "no profile for framework selector, copying files unchanged");
    let mut report = copy_tree(&files, output, None)?;
    report
        .warnings
        .push(Warning::UnknownSelector(selector.to_string()));
    Ok(report)
}

fn convert_framework(
    files: &[ClassifiedFile],
    output: &Path,
    profile: &dyn FrameworkProfile,
    config: &ConvertConfig,
) -> Result<ConversionReport, ConvertError> {
    let mut report = ConversionReport::new(ConversionMode::Framework(profile.id()));
    let rewriter =
        PatternRewriter::new(profile.syntax()).with_inline_arguments(config.events.inline_arguments);

    let set = scan::collect_pages(files, &rewriter)?;
    report
        .warnings
        .extend(set.collisions.into_iter().map(Warning::NameCollision));
    report
        .warnings
        .extend(set.unassociated_scripts.into_iter().map(Warning::UnassociatedScript));

    let mut registry = ComponentRegistry::new();
    let mut prepared = Vec::with_capacity(set.pages.len());
    for page in &set.pages {
        let (page, fallbacks) = synth::prepare_page(page, &rewriter, &config.components, &mut registry);
        report
            .warnings
            .extend(fallbacks.into_iter().map(Warning::TransformFallback));
        prepared.push(page);
    }

    let names: Vec<String> = prepared.iter().map(|p| p.base_name.clone()).collect();
    let routes = build_routes(&names);

    let views: Vec<PageView> = prepared
        .iter()
        .map(|page| synth::page_view(page, &registry, &config.components, config.styles.policy))
        .collect();
    let written: Vec<PathBuf> = views
        .par_iter()
        .map(|view| synth::write_page(output, profile, view))
        .collect::<Result<Vec<_>, std::io::Error>>()?;

    report.pages = prepared
        .iter()
        .zip(written)
        .zip(&routes)
        .map(|((page, output), route)| ConvertedPage {
            source: page.source.clone(),
            output,
            route: route.path.clone(),
        })
        .collect();

    let component_paths = synth::write_components(output, profile, &registry)?;
    report.components = registry
        .components()
        .zip(component_paths)
        .map(|(component, output)| ConvertedComponent {
            name: component.name.clone(),
            first_page: component.first_page.clone(),
            output,
        })
        .collect();

    if config.styles.policy == StylePolicy::External {
        let mut seen = BTreeSet::new();
        for sheet in prepared.iter().flat_map(|p| &p.stylesheets) {
            if seen.insert(sheet.relative_path.as_str()) {
                let relative = Path::new(profile.stylesheet_dir()).join(&sheet.relative_path);
                synth::write_output(output, &relative, &sheet.content)?;
                report.assets.push(relative);
            }
        }
    }

    for file in files.iter().filter(|f| f.kind == FileKind::Other && !f.hidden) {
        let relative = Path::new(profile.public_dir()).join(&file.relative_path);
        copy_file(&file.absolute_path, output, &relative)?;
        report.assets.push(relative);
    }

    report.scaffold = emit_scaffold(output, &routes, profile, config)?;

    info!(
        pages = report.pages.len(),
        components = report.components.len(),
        assets = report.assets.len(),
        warnings = report.warnings.len(),
        "conversion finished"
    );
    Ok(report)
}

/// Copy every walked file, hidden ones included, keeping relative paths.
///
/// With a `rename`, markup files the rename changes are rewritten; every
/// other file is copied byte for byte.
fn copy_tree(
    files: &[ClassifiedFile],
    output: &Path,
    rename: Option<&AttributeRename>,
) -> Result<ConversionReport, ConvertError> {
    let mode = rename.map_or(ConversionMode::Passthrough, |r| ConversionMode::Rename(r.id));
    let mut report = ConversionReport::new(mode);

    fs::create_dir_all(output)?;
    for file in files {
        let relative = PathBuf::from(&file.relative_path);
        let renamed = match rename {
            Some(rename) if file.kind == FileKind::Markup && !file.hidden => {
                let markup = String::from_utf8_lossy(&fs::read(&file.absolute_path)?).into_owned();
                Some(rename.apply(&markup)).filter(|renamed| *renamed != markup)
            }
            _ => None,
        };
        match renamed {
            Some(contents) => {
                synth::write_output(output, &relative, &contents)?;
                report.renamed.push(relative.clone());
            }
            None => copy_file(&file.absolute_path, output, &relative)?,
        }
        report.copied.push(relative);
    }
    info!(
        files = report.copied.len(),
        renamed = report.renamed.len(),
        "copy finished"
    );
    Ok(report)
}

fn copy_file(from: &Path, output_root: &Path, relative: &Path) -> std::io::Result<()> {
    let dest = output_root.join(relative);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, dest)?;
    Ok(())
}

/// Both paths exist and resolve to the same directory.
fn same_directory(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

/// Drop files that live inside the output directory when it is nested in the input.
fn exclude_output(
    files: Vec<ClassifiedFile>,
    input: &Path,
    output: &Path,
) -> Result<Vec<ClassifiedFile>, ConvertError> {
    let Ok(output) = fs::canonicalize(output) else {
        return Ok(files);
    };
    let input = fs::canonicalize(input)?;
    let Ok(nested) = output.strip_prefix(&input) else {
        return Ok(files);
    };
    debug!(output = %nested.display(), "skipping output directory inside input");
    Ok(files
        .into_iter()
        .filter(|f| !Path::new(&f.relative_path).starts_with(nested))
        .collect())
}
