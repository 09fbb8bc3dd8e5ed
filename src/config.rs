//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tagtree/tagtree.toml`
//! 3. Local config: `<project_dir>/.tagtree.toml`
//! 4. Environment variables: `TAGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DEFAULT_INDENT};
use crate::domain::ChildTemplate;

/// Upper bound for `export.indent`.
pub const MAX_INDENT: usize = 16;

/// Export text settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Spaces per indentation level in exported JSON
    pub indent: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

/// Raw export config for intermediate parsing (`None` → inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawExportConfig {
    pub indent: Option<usize>,
}

/// Raw add-child template for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawChildTemplate {
    pub name: Option<String>,
    pub data: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub seed_file: Option<PathBuf>,
    pub export: RawExportConfig,
    pub new_child: RawChildTemplate,
}

/// Unified configuration for tagtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Raw JSON tree to start from instead of the built-in seed
    pub seed_file: Option<PathBuf>,
    /// Export text settings
    pub export: ExportConfig,
    /// Name and data of nodes created by add-child
    pub new_child: ChildTemplate,
}

/// Get the XDG config directory for tagtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tagtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tagtree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".tagtree.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            seed_file: overlay
                .seed_file
                .clone()
                .or_else(|| self.seed_file.clone()),
            export: ExportConfig {
                indent: overlay.export.indent.unwrap_or(self.export.indent),
            },
            new_child: ChildTemplate {
                name: overlay
                    .new_child
                    .name
                    .clone()
                    .unwrap_or_else(|| self.new_child.name.clone()),
                data: overlay
                    .new_child
                    .data
                    .clone()
                    .unwrap_or_else(|| self.new_child.data.clone()),
            },
        }
    }

    /// Expand shell variables and tilde in `seed_file`.
    fn expand_paths(&mut self) {
        if let Some(seed) = &self.seed_file {
            let expanded = expand_path(seed.to_string_lossy().as_ref());
            self.seed_file = Some(PathBuf::from(expanded));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), project_dir)
    }

    /// Load settings from an explicit global config path.
    ///
    /// Missing files are skipped; unreadable or malformed files are errors.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply TAGTREE_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`: `TAGTREE_EXPORT__INDENT=4`, `TAGTREE_NEW_CHILD__NAME=tag`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TAGTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("seed_file") {
            settings.seed_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("export.indent") {
            settings.export.indent = val.trim().parse().map_err(|_| ApplicationError::Config {
                message: format!("TAGTREE_EXPORT__INDENT: not a number: {}", val),
            })?;
        }
        if let Ok(val) = config.get_string("new_child.name") {
            settings.new_child.name = val;
        }
        if let Ok(val) = config.get_string("new_child.data") {
            settings.new_child.data = val;
        }

        Ok(settings)
    }

    /// Reject settings the editor cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.new_child.name.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "new_child.name must not be empty".to_string(),
            });
        }
        if self.export.indent > MAX_INDENT {
            return Err(ApplicationError::Config {
                message: format!(
                    "export.indent must be at most {}, got {}",
                    MAX_INDENT, self.export.indent
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tagtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/tagtree/tagtree.toml
#   Local:  <project_dir>/.tagtree.toml
#   Env:    TAGTREE_* environment variables (e.g. TAGTREE_EXPORT__INDENT=4)

# Raw JSON tree to start from when no input file is given
# seed_file = "~/trees/tags.json"

[export]
# Spaces per indentation level in exported JSON
# indent = 2

[new_child]
# Name and data of nodes created by "add"
# name = "New Child"
# data = "Data"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
