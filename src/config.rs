//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/goaltree/goaltree.toml`
//! 3. Local config: `<project_dir>/.goaltree.toml`
//! 4. Environment variables: `GOALTREE_*` prefix
//!
//! Relative paths are resolved against the project directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

pub const DEFAULT_TREE_FILE: &str = "project_network.json";
pub const DEFAULT_QUESTIONS_FILE: &str = "config/questions.yaml";
pub const DEFAULT_RULES_FILE: &str = "config/rules.yaml";

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub questions_file: Option<PathBuf>,
    pub rules_file: Option<PathBuf>,
}

/// Unified configuration for goaltree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Goal tree JSON file
    pub tree_file: PathBuf,
    /// Question catalog YAML
    pub questions_file: PathBuf,
    /// Recommendation rules YAML
    pub rules_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_file: PathBuf::from(DEFAULT_TREE_FILE),
            questions_file: PathBuf::from(DEFAULT_QUESTIONS_FILE),
            rules_file: PathBuf::from(DEFAULT_RULES_FILE),
        }
    }
}

/// Get the XDG config directory for goaltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "goaltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("goaltree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".goaltree.toml")
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

/// Expand `~`, `$VAR` and `${VAR}` in a path; unknown variables leave it as is.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay
                .tree_file
                .clone()
                .unwrap_or_else(|| self.tree_file.clone()),
            questions_file: overlay
                .questions_file
                .clone()
                .unwrap_or_else(|| self.questions_file.clone()),
            rules_file: overlay
                .rules_file
                .clone()
                .unwrap_or_else(|| self.rules_file.clone()),
        }
    }

    /// Expand shell variables and tilde, then anchor relative paths at
    /// `project_dir`.
    fn resolve_paths(&mut self, project_dir: Option<&Path>) {
        for path in [
            &mut self.tree_file,
            &mut self.questions_file,
            &mut self.rules_file,
        ] {
            let expanded = expand_path(path);
            *path = match project_dir {
                Some(dir) if expanded.is_relative() => dir.join(expanded),
                _ => expanded,
            };
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/goaltree/goaltree.toml`
    /// 3. Local config: `<project_dir>/.goaltree.toml`
    /// 4. Environment variables: `GOALTREE_*` prefix
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_layers(global.as_deref(), project_dir, None)
    }

    /// Same layering as [`Settings::load`] with explicit sources.
    ///
    /// `global` is the global config file (skipped when `None` or absent).
    /// `env` replaces the process environment when given; keys keep the
    /// `GOALTREE_` prefix.
    pub fn load_layers(
        global: Option<&Path>,
        project_dir: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global.filter(|p| p.exists()) {
            let raw = load_raw_settings(global_path)?;
            current = current.merge_with(&raw);
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, env)?;
        current.resolve_paths(project_dir);

        Ok(current)
    }

    /// Apply GOALTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GOALTREE")
                    .separator("__")
                    .source(env.map(|vars| vars.into_iter().collect())),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("questions_file") {
            settings.questions_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("rules_file") {
            settings.rules_file = PathBuf::from(val);
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
        format!(
            r#"# goaltree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/goaltree/goaltree.toml
#   Local:  <project_dir>/.goaltree.toml
#   Env:    GOALTREE_* environment variables (e.g. GOALTREE_RULES_FILE)
#
# Relative paths are resolved against the project directory.

# Goal tree (JSON node array)
# tree_file = "{DEFAULT_TREE_FILE}"

# Question catalog: axis -> list of questions, or a nested outline
# questions_file = "{DEFAULT_QUESTIONS_FILE}"

# Recommendation rules: list of {{match: <regex>, action: <text>}}
# rules_file = "{DEFAULT_RULES_FILE}"
"#
        )
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
    fn given_overlay_with_one_field_when_merging_then_keeps_others() {
        let base = Settings::default();
        let overlay = RawSettings {
            rules_file: Some(PathBuf::from("custom/rules.yaml")),
            ..Default::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.rules_file, PathBuf::from("custom/rules.yaml"));
        assert_eq!(merged.tree_file, PathBuf::from(DEFAULT_TREE_FILE));
    }

    #[test]
    fn given_project_dir_when_resolving_then_anchors_relative_paths() {
        let mut settings = Settings {
            tree_file: PathBuf::from("/abs/tree.json"),
            ..Default::default()
        };
        settings.resolve_paths(Some(Path::new("/work")));
        assert_eq!(settings.tree_file, PathBuf::from("/abs/tree.json"));
        assert_eq!(
            settings.questions_file,
            PathBuf::from("/work").join(DEFAULT_QUESTIONS_FILE)
        );
    }

    #[test]
    fn given_env_map_when_applying_overrides_then_prefixed_keys_win() {
        let env = HashMap::from([
            ("GOALTREE_RULES_FILE".to_string(), "env/rules.yaml".to_string()),
            ("OTHER_TREE_FILE".to_string(), "ignored.json".to_string()),
        ]);

        let settings = Settings::apply_env_overrides(Settings::default(), Some(env)).unwrap();

        assert_eq!(settings.rules_file, PathBuf::from("env/rules.yaml"));
        assert_eq!(settings.tree_file, PathBuf::from(DEFAULT_TREE_FILE));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.tree_file.is_none());
    }
}
