//! Integration tests for Settings config loading.
//!
//! Sources are passed explicitly, so the developer's global config and
//! `GOALTREE_*` variables never leak into the results.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use goaltree::config::{
    local_config_path, Settings, DEFAULT_QUESTIONS_FILE, DEFAULT_RULES_FILE, DEFAULT_TREE_FILE,
};

fn load_local(project: &Path) -> Result<Settings, goaltree::application::ApplicationError> {
    Settings::load_layers(None, Some(project), Some(HashMap::new()))
}

#[test]
fn given_no_local_config_when_load_then_defaults_anchored_at_project_dir() {
    // Arrange
    let project = TempDir::new().unwrap();

    // Act
    let settings = load_local(project.path()).expect("load settings");

    // Assert
    assert_eq!(settings.tree_file, project.path().join(DEFAULT_TREE_FILE));
    assert_eq!(
        settings.questions_file,
        project.path().join(DEFAULT_QUESTIONS_FILE)
    );
    assert_eq!(settings.rules_file, project.path().join(DEFAULT_RULES_FILE));
}

#[test]
fn given_local_config_when_load_then_overrides_only_given_fields() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "rules_file = \"assessment/rules.yaml\"\ntree_file = \"/abs/tree.json\"\n",
    )
    .unwrap();

    // Act
    let settings = load_local(project.path()).expect("load settings");

    // Assert
    assert_eq!(
        settings.rules_file,
        project.path().join("assessment/rules.yaml")
    );
    assert_eq!(settings.tree_file, PathBuf::from("/abs/tree.json"));
    assert_eq!(
        settings.questions_file,
        project.path().join(DEFAULT_QUESTIONS_FILE)
    );
}

#[test]
fn given_invalid_local_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "tree_file = [not toml").unwrap();

    let result = load_local(project.path());

    assert!(result.is_err());
}

#[test]
fn given_tilde_path_when_load_then_expanded() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "questions_file = \"~/goaltree/questions.yaml\"\n",
    )
    .unwrap();

    let settings = load_local(project.path()).unwrap();

    assert!(settings.questions_file.is_absolute());
    assert!(settings.questions_file.ends_with("goaltree/questions.yaml"));
}

#[test]
fn given_settings_when_rendering_toml_then_reloadable() {
    let settings = Settings::default();

    let rendered = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&rendered).unwrap();

    assert_eq!(parsed, settings);
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins_and_env_wins_last() {
    // Arrange
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let global = home.path().join("goaltree.toml");
    fs::write(
        &global,
        "tree_file = \"/global/tree.json\"\nrules_file = \"/global/rules.yaml\"\nquestions_file = \"/global/q.yaml\"\n",
    )
    .unwrap();
    fs::write(
        local_config_path(project.path()),
        "rules_file = \"/local/rules.yaml\"\nquestions_file = \"/local/q.yaml\"\n",
    )
    .unwrap();
    let env = HashMap::from([(
        "GOALTREE_QUESTIONS_FILE".to_string(),
        "/env/q.yaml".to_string(),
    )]);

    // Act
    let settings = Settings::load_layers(Some(global.as_path()), Some(project.path()), Some(env))
        .expect("load settings");

    // Assert
    assert_eq!(settings.tree_file, PathBuf::from("/global/tree.json"));
    assert_eq!(settings.rules_file, PathBuf::from("/local/rules.yaml"));
    assert_eq!(settings.questions_file, PathBuf::from("/env/q.yaml"));
}

#[test]
fn given_missing_global_file_when_load_then_skipped() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let settings = Settings::load_layers(
        Some(home.path().join("absent.toml").as_path()),
        Some(project.path()),
        Some(HashMap::new()),
    )
    .unwrap();

    assert_eq!(settings.tree_file, project.path().join(DEFAULT_TREE_FILE));
}
