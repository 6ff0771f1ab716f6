//! Integration tests for Settings layered loading.
//!
//! Precedence: defaults < global file < local file < RSTREE_* environment.
//! Environment sources are injected so tests never touch the process env.

use std::collections::HashMap;
use std::fs;

use config::Environment;
use tempfile::TempDir;

use rstree::application::{ApplicationError, GraphType, LineStyle};
use rstree::config::{local_config_path, Settings};
use rstree::domain::TraversalMode;

fn env(vars: &[(&str, &str)]) -> Environment {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Environment::with_prefix("RSTREE")
        .prefix_separator("_")
        .separator("__")
        .source(Some(map))
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
traversal = "zigzag"

[show]
line_style = "ascii-em"
reverse = true
"#,
    )
    .unwrap();

    let settings =
        Settings::load_from(None, Some(&local_config_path(dir.path())), env(&[])).unwrap();

    assert_eq!(settings.traversal, TraversalMode::ZigZag);
    assert_eq!(settings.show.line_style, LineStyle::AsciiEm);
    assert!(settings.show.reverse);
    // untouched values keep their defaults
    assert!(settings.show.sorting);
    assert_eq!(settings.graphviz.shape, "circle");
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("rstree.toml");
    fs::write(
        &global,
        "[graphviz]\nshape = \"box\"\ngraph_type = \"graph\"\n",
    )
    .unwrap();
    fs::write(local_config_path(dir.path()), "[graphviz]\nshape = \"ellipse\"\n").unwrap();

    let settings = Settings::load_from(
        Some(&global),
        Some(&local_config_path(dir.path())),
        env(&[]),
    )
    .unwrap();

    assert_eq!(settings.graphviz.shape, "ellipse");
    assert_eq!(settings.graphviz.graph_type, GraphType::Graph);
}

#[test]
fn given_env_vars_when_load_then_they_override_files() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[show]\nline_style = \"ascii-em\"\n").unwrap();

    let settings = Settings::load_from(
        None,
        Some(&local_config_path(dir.path())),
        env(&[
            ("RSTREE_SHOW__LINE_STYLE", "ascii"),
            ("RSTREE_SHOW__ID_HIDDEN", "false"),
            ("RSTREE_TRAVERSAL", "width"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.show.line_style, LineStyle::Ascii);
    assert!(!settings.show.id_hidden);
    assert_eq!(settings.traversal, TraversalMode::Width);
}

#[test]
fn given_invalid_env_value_when_load_then_config_error() {
    let result = Settings::load_from(None, None, env(&[("RSTREE_SHOW__LINE_STYLE", "fancy")]));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[show]\nline_style = \"fancy\"\n").unwrap();

    let result = Settings::load_from(None, Some(&local_config_path(dir.path())), env(&[]));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_missing_files_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(
        Some(&dir.path().join("absent.toml")),
        Some(&local_config_path(dir.path())),
        env(&[]),
    )
    .unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_settings_when_serialized_then_round_trips_through_toml() {
    let text = Settings::default().to_toml().unwrap();
    assert!(text.contains("line_style = \"ascii-ex\""));
    let parsed: Settings = toml::from_str(&text).unwrap();
    assert_eq!(parsed, Settings::default());
}
