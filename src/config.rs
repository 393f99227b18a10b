//! Settings for wmsloc, merged from several layers
//!
//! Later layers win:
//! 1. Built-in defaults
//! 2. Global config: `$XDG_CONFIG_HOME/wmsloc/wmsloc.toml`
//! 3. Local config: `<project_dir>/.wmsloc.toml`
//! 4. Environment variables: `WMSLOC_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::util::path::expand_env_vars;

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub snapshot: Option<PathBuf>,
    pub expand_roots: Option<bool>,
    pub show_item_counts: Option<bool>,
    pub default_warehouse: Option<String>,
}

/// Unified configuration for wmsloc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Snapshot file holding warehouses and locations (default: locations.toml)
    pub snapshot: PathBuf,
    /// Start with root locations expanded
    pub expand_roots: bool,
    /// Show item counts next to locations in tree output
    pub show_item_counts: bool,
    /// Warehouse filter applied when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_warehouse: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("locations.toml"),
            expand_roots: true,
            show_item_counts: true,
            default_warehouse: None,
        }
    }
}

/// `$XDG_CONFIG_HOME/wmsloc` on Linux, the platform equivalent elsewhere.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wmsloc").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("wmsloc.toml"))
}

/// `.wmsloc.toml` inside the project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".wmsloc.toml")
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Resolve `~` and `$VAR` in the snapshot path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.snapshot.to_string_lossy().as_ref());
        self.snapshot = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            snapshot: overlay
                .snapshot
                .clone()
                .unwrap_or_else(|| self.snapshot.clone()),
            expand_roots: overlay.expand_roots.unwrap_or(self.expand_roots),
            show_item_counts: overlay.show_item_counts.unwrap_or(self.show_item_counts),
            default_warehouse: overlay
                .default_warehouse
                .clone()
                .or_else(|| self.default_warehouse.clone()),
        }
    }

    /// Merge every layer on top of the defaults.
    ///
    /// A relative `snapshot` from the local config is resolved against
    /// `project_dir`.
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                let mut raw = load_raw_settings(&local_path)?;
                raw.snapshot = raw.snapshot.map(|snapshot| {
                    let expanded = PathBuf::from(expand_env_vars(&snapshot.to_string_lossy()));
                    if expanded.is_relative() {
                        dir.join(expanded)
                    } else {
                        expanded
                    }
                });
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();

        Ok(current)
    }

    /// Apply WMSLOC_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("WMSLOC")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("snapshot") {
            settings.snapshot = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("expand_roots") {
            settings.expand_roots = val;
        }
        if let Ok(val) = config.get_bool("show_item_counts") {
            settings.show_item_counts = val;
        }
        if let Ok(val) = config.get_string("default_warehouse") {
            settings.default_warehouse = Some(val);
        }

        Ok(settings)
    }

    /// Effective settings, as printed by `wmsloc config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Commented-out config file listing every key with its default.
    pub fn template() -> String {
        r#"# wmsloc configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/wmsloc/wmsloc.toml
#   Local:  <project_dir>/.wmsloc.toml   (relative snapshot paths resolve here)
#   Env:    WMSLOC_* environment variables (explicit overrides)

# Snapshot file with [[warehouses]] and [[locations]] tables
# snapshot = "locations.toml"

# Start with root locations expanded
# expand_roots = true

# Show item counts next to locations in tree output
# show_item_counts = true

# Warehouse filter used when --warehouse is not given
# default_warehouse = "WH"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_expands_roots() {
        let settings = Settings::default();
        assert_eq!(settings.snapshot, PathBuf::from("locations.toml"));
        assert!(settings.expand_roots);
        assert!(settings.show_item_counts);
        assert_eq!(settings.default_warehouse, None);
    }

    #[test]
    fn given_tilde_in_snapshot_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            snapshot: PathBuf::from("~/wms/locations.toml"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let snapshot = settings.snapshot.to_string_lossy();
        assert!(
            snapshot.starts_with(&home),
            "snapshot should start with home dir: {}",
            snapshot
        );
        assert!(!snapshot.contains('~'));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            expand_roots: Some(false),
            default_warehouse: Some("WH2".to_string()),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert!(!merged.expand_roots);
        assert_eq!(merged.default_warehouse.as_deref(), Some("WH2"));
        assert_eq!(merged.snapshot, base.snapshot);
        assert!(merged.show_item_counts);
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips() {
        let settings = Settings {
            default_warehouse: Some("WH".to_string()),
            ..Settings::default()
        };

        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();

        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
