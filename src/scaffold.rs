//! Project bootstrap files.
//!
//! Stage 3 of the conversion pipeline. Writes the files every generated
//! project needs regardless of its pages: manifest, build config, document
//! entry, entry script, shell component, router, and the asset directories.
//! Existing files at the same paths are overwritten, never merged.

use crate::config::ConvertConfig;
use crate::framework::FrameworkProfile;
use crate::synth::write_output;
use crate::types::RouteEntry;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the bootstrap file set. Returns written paths relative to `output_root`.
pub fn emit_scaffold(
    output_root: &Path,
    routes: &[RouteEntry],
    profile: &dyn FrameworkProfile,
    config: &ConvertConfig,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    for dir in profile.asset_dirs() {
        fs::create_dir_all(output_root.join(dir))?;
    }

    let mut written = Vec::new();
    for file in profile.scaffold_files(routes, config)? {
        write_output(output_root, &file.path, &file.contents)?;
        written.push(file.path);
    }
    debug!(files = written.len(), routes = routes.len(), "emitted scaffold");
    Ok(written)
}
