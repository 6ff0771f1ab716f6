//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
//! 3. Local config: `<dir>/.rstree.toml`
//! 4. Environment variables: `RSTREE_*` prefix, `__` as section separator

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, GraphType, LineStyle};
use crate::domain::TraversalMode;

/// Defaults for text rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShowSettings {
    pub line_style: LineStyle,
    pub id_hidden: bool,
    pub sorting: bool,
    pub reverse: bool,
}

impl Default for ShowSettings {
    fn default() -> Self {
        Self {
            line_style: LineStyle::AsciiEx,
            id_hidden: true,
            sorting: true,
            reverse: false,
        }
    }
}

/// Defaults for DOT export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GraphvizSettings {
    pub shape: String,
    pub graph_type: GraphType,
}

impl Default for GraphvizSettings {
    fn default() -> Self {
        Self {
            shape: "circle".into(),
            graph_type: GraphType::Digraph,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub traversal: Option<TraversalMode>,
    pub show: RawShowSettings,
    pub graphviz: RawGraphvizSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawShowSettings {
    pub line_style: Option<LineStyle>,
    pub id_hidden: Option<bool>,
    pub sorting: Option<bool>,
    pub reverse: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawGraphvizSettings {
    pub shape: Option<String>,
    pub graph_type: Option<GraphType>,
}

/// Unified configuration for rstree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default mode of the `expand` command
    pub traversal: TraversalMode,
    pub show: ShowSettings,
    pub graphviz: GraphvizSettings,
}

/// Get the XDG config directory for rstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rstree.toml")
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
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            traversal: overlay.traversal.unwrap_or(self.traversal),
            show: ShowSettings {
                line_style: overlay.show.line_style.unwrap_or(self.show.line_style),
                id_hidden: overlay.show.id_hidden.unwrap_or(self.show.id_hidden),
                sorting: overlay.show.sorting.unwrap_or(self.show.sorting),
                reverse: overlay.show.reverse.unwrap_or(self.show.reverse),
            },
            graphviz: GraphvizSettings {
                shape: overlay
                    .graphviz
                    .shape
                    .clone()
                    .unwrap_or_else(|| self.graphviz.shape.clone()),
                graph_type: overlay
                    .graphviz
                    .graph_type
                    .unwrap_or(self.graphviz.graph_type),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.rstree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        let local = local_dir.map(local_config_path);
        Self::load_from(
            global.as_deref(),
            local.as_deref(),
            Environment::with_prefix("RSTREE")
                .prefix_separator("_")
                .separator("__"),
        )
    }

    /// Layered load from explicit sources; missing files are skipped.
    pub fn load_from(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current, env)
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("show.line_style") {
            settings.show.line_style = val.parse()?;
        }
        if let Ok(val) = config.get_bool("show.id_hidden") {
            settings.show.id_hidden = val;
        }
        if let Ok(val) = config.get_bool("show.sorting") {
            settings.show.sorting = val;
        }
        if let Ok(val) = config.get_bool("show.reverse") {
            settings.show.reverse = val;
        }
        if let Ok(val) = config.get_string("graphviz.shape") {
            settings.graphviz.shape = val;
        }
        if let Ok(val) = config.get_string("graphviz.graph_type") {
            settings.graphviz.graph_type = val.parse()?;
        }
        if let Ok(val) = config.get_string("traversal") {
            settings.traversal = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("RSTREE_TRAVERSAL: {e}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rstree/rstree.toml
#   Local:  ./.rstree.toml
#   Env:    RSTREE_* environment variables, e.g. RSTREE_SHOW__LINE_STYLE=ascii

# Default mode of `rstree expand`: depth | width | zigzag
# traversal = "depth"

[show]
# ascii | ascii-ex | ascii-exr | ascii-em | ascii-emv | ascii-emh
# line_style = "ascii-ex"
# id_hidden = true
# sorting = true
# reverse = false

[graphviz]
# shape = "circle"
# graph_type = "digraph"
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

    fn no_env() -> Environment {
        Environment::with_prefix("RSTREE")
            .prefix_separator("_")
            .separator("__")
            .source(Some(Default::default()))
    }

    #[test]
    fn given_no_config_files_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None, no_env()).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.show.line_style, LineStyle::AsciiEx);
        assert_eq!(settings.graphviz.shape, "circle");
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let overlay = RawSettings {
            show: RawShowSettings {
                reverse: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = Settings::default().merge_with(&overlay);

        assert!(merged.show.reverse);
        assert!(merged.show.sorting);
        assert_eq!(merged.graphviz, GraphvizSettings::default());
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("parse template");
        assert!(raw.traversal.is_none());
    }
}
