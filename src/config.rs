//! Conversion configuration.
//!
//! Handles loading, validating, and merging `sitevue.toml`. Stock defaults are
//! overridden by an optional config file placed in the root of the static
//! site being converted:
//!
//! ```text
//! site/
//! ├── sitevue.toml             # Optional, not part of the generated project
//! ├── index.html
//! ├── about.html
//! └── style.css
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [project]
//! name = "converted-site"   # package.json name
//! title = "Converted Site"  # <title> of index.html
//!
//! [dependencies]
//! vue = "^3.4.0"
//! vue_router = "^4.3.0"
//! vite = "^5.2.0"
//! plugin_vue = "^5.0.0"
//!
//! [components]
//! top = ["nav"]             # Regions promoted to components above page content
//! bottom = ["footer"]       # Regions promoted to components below page content
//!
//! [styles]
//! policy = "inline"         # "inline" (scoped <style> block) or "external"
//!
//! [events]
//! inline_arguments = false  # true: onclick="f('x')" → @click="f('x')"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the input root.
pub const CONFIG_FILE: &str = "sitevue.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Conversion configuration loaded from `sitevue.toml`.
///
/// All fields have defaults; a user file only lists what it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Naming of the generated project.
    pub project: ProjectConfig,
    /// Version ranges written to `package.json`.
    pub dependencies: DependencyConfig,
    /// Structural regions promoted to shared components.
    pub components: ComponentsConfig,
    /// How page stylesheets are attached.
    pub styles: StylesConfig,
    /// How inline click handlers are rewritten.
    pub events: EventsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl ConvertConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.project.name;
        if name.is_empty() || name.len() > 214 {
            return Err(ConfigError::Validation(
                "project.name must be 1-214 characters".into(),
            ));
        }
        if !name.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.' | '@' | '/')
        }) {
            return Err(ConfigError::Validation(format!(
                "project.name '{name}' must be lowercase letters, digits, '-', '_', '.', '@' or '/'"
            )));
        }

        for (key, range) in self.dependencies.entries() {
            if range.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "dependencies.{key} must not be empty"
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for tag in self.components.tags() {
            let mut chars = tag.chars();
            let well_formed = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
            if !well_formed {
                return Err(ConfigError::Validation(format!(
                    "components: '{tag}' is not a valid tag name"
                )));
            }
            if !seen.insert(tag.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "components: '{tag}' is listed more than once"
                )));
            }
        }

        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Naming of the generated project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// `name` field of `package.json`.
    pub name: String,
    /// Document title of the generated `index.html`.
    pub title: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "converted-site".to_string(),
            title: "Converted Site".to_string(),
        }
    }
}

/// Version ranges for the runtime and build-tool packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependencyConfig {
    pub vue: String,
    pub vue_router: String,
    pub vite: String,
    pub plugin_vue: String,
}

impl DependencyConfig {
    /// `(config key, version range)` pairs, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("vue", self.vue.as_str()),
            ("vue_router", self.vue_router.as_str()),
            ("vite", self.vite.as_str()),
            ("plugin_vue", self.plugin_vue.as_str()),
        ]
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            vue: "^3.4.0".to_string(),
            vue_router: "^4.3.0".to_string(),
            vite: "^5.2.0".to_string(),
            plugin_vue: "^5.0.0".to_string(),
        }
    }
}

/// Region tags promoted to shared components, by placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentsConfig {
    /// Rendered above the page content, in this order.
    pub top: Vec<String>,
    /// Rendered below the page content, in this order.
    pub bottom: Vec<String>,
}

impl ComponentsConfig {
    /// All configured tags, top first.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.top.iter().chain(&self.bottom).map(String::as_str)
    }
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            top: vec!["nav".to_string()],
            bottom: vec!["footer".to_string()],
        }
    }
}

/// How a page's stylesheets end up in its component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePolicy {
    /// Content is inlined in a scoped `<style>` block.
    #[default]
    Inline,
    /// Files are copied into the project and referenced with `src`.
    External,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesConfig {
    pub policy: StylePolicy,
}

/// How `onclick` handlers become click bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventsConfig {
    /// Keep call arguments as an inline handler (`@click="greet('Bob')"`)
    /// instead of binding the bare function name (`@click="greet"`).
    pub inline_arguments: bool,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page-writing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Worker count for the rayon pool: `max_processes` clamped to the CPU count,
/// or every core when unset.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    config.max_processes.map_or(cores, |n| n.min(cores))
}

/// Load `sitevue.toml` from the site root.
///
/// The user file is laid over the serialized stock defaults, so it only needs
/// the keys it changes. The merged table is deserialized with unknown keys
/// rejected, then validated. A site without the file gets the defaults.
pub fn load_config(root: &Path) -> Result<ConvertConfig, ConfigError> {
    let defaults = toml::Value::try_from(ConvertConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))?;

    let path = root.join(CONFIG_FILE);
    let merged = if path.is_file() {
        let user: toml::Value = toml::from_str(&fs::read_to_string(&path)?)?;
        merge_toml(defaults, user)
    } else {
        defaults
    };

    let config: ConvertConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Lay `user` over `defaults`: tables merge key by key, any other value
/// (arrays included) replaces the default outright.
fn merge_toml(defaults: toml::Value, user: toml::Value) -> toml::Value {
    match (defaults, user) {
        (toml::Value::Table(mut merged), toml::Value::Table(user)) => {
            for (key, value) in user {
                let value = match merged.remove(&key) {
                    Some(default) => merge_toml(default, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, user) => user,
    }
}

/// Returns a fully-commented stock `sitevue.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitevue Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as `sitevue.toml` in the root of the site being converted.
# It is read before conversion and left out of the generated project.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Generated project
# ---------------------------------------------------------------------------
[project]
# package.json name (lowercase, npm naming rules).
name = "converted-site"

# <title> of the generated index.html.
title = "Converted Site"

# ---------------------------------------------------------------------------
# Package versions written to package.json
# ---------------------------------------------------------------------------
[dependencies]
vue = "^3.4.0"
vue_router = "^4.3.0"
vite = "^5.2.0"
plugin_vue = "^5.0.0"

# ---------------------------------------------------------------------------
# Shared components
# ---------------------------------------------------------------------------
[components]
# Tags whose first block on each page is pulled out into a shared component.
# The first page containing a tag defines the component; every page that
# contained the tag references it, above (top) or below (bottom) its content.
top = ["nav"]
bottom = ["footer"]

# ---------------------------------------------------------------------------
# Stylesheets
# ---------------------------------------------------------------------------
[styles]
# "inline"   - stylesheet content goes into the page's <style scoped> block.
# "external" - stylesheets are copied to src/assets/styles/ and referenced
#              with <style scoped src="...">.
policy = "inline"

# ---------------------------------------------------------------------------
# Click handlers
# ---------------------------------------------------------------------------
[events]
# onclick="greet('Bob')" calling a function from the page's script becomes
# @click="greet" by default. Set to true to keep the arguments instead:
# @click="greet('Bob')".
inline_arguments = false

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page-writing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
