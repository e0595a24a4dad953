// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic layered TOML files.

use gitops_rs::config::Config;
use gitops_rs::config::loader::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_builder_layered() {
    let temp = temp_dir();
    let base = temp.path().join("base.toml");
    let ci = temp.path().join("ci.toml");
    fs::write(
        &base,
        r#"
[git]
branch = "main"
clone_prefix = "fleet-"

[author]
name = "Fleet Bot"
email = "fleet@example.com"
"#,
    )
    .unwrap();
    fs::write(
        &ci,
        r#"
[git]
branch = "staging"
timeout_secs = 300
"#,
    )
    .unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&ci)
        .build()
        .unwrap();

    assert_eq!(config.git.branch, "staging");
    assert_eq!(config.git.clone_prefix, "fleet-");
    assert_eq!(config.git.timeout_secs, Some(300));
    assert_eq!(
        config.author.identity().unwrap(),
        ("Fleet Bot", "fleet@example.com")
    );
}

#[test]
fn config_builder_set_override() {
    let temp = temp_dir();
    let file = temp.path().join("gitops.toml");
    fs::write(&file, "[git]\ntemp_root = \"/var/tmp/gitops\"\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&file)
        .add_overrides(["git.temp_root=/srv/gitops", "global.output_log_level=4"])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.git.temp_root(), PathBuf::from("/srv/gitops"));
    assert_eq!(config.global.output_log_level.as_u8(), 4);
}

#[test]
fn config_sources_listed_in_order() {
    let temp = temp_dir();
    let file = temp.path().join("gitops.toml");
    fs::write(&file, "").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(temp.path().join("absent.toml"))
        .add_toml_file(&file)
        .add_overrides(["git.branch=dev"])
        .unwrap();

    let lines = loader.format_loaded_files();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("1. [file] {}", file.display()));
    assert_eq!(lines[1], "2. [override] git.branch=dev");
}

#[test]
fn config_invalid_clone_prefix_rejected() {
    let err = Config::parse("[git]\nclone_prefix = \"../escape-\"\n").unwrap_err();
    assert!(err.to_string().contains("clone_prefix"), "{err}");
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn config_serializes_to_json() {
    let config = Config::parse(
        r#"
[git]
branch = "release"

[author]
name = "ci"
email = "ci@example.com"
"#,
    )
    .unwrap();

    let json: serde_json::Value = serde_json::to_value(&config).unwrap();

    assert_eq!(json["git"]["branch"], "release");
    assert_eq!(json["git"]["program"], "git");
    assert_eq!(json["author"]["email"], "ci@example.com");
    assert_eq!(json["global"]["output_log_level"], 3);
}

#[test]
fn config_default_values() {
    let config = Config::default();
    let lines = config.format_options();

    assert!(lines.iter().any(|l| l.ends_with("= gitops-repo-")));
    assert!(lines.iter().any(|l| l.starts_with("git.branch") && l.ends_with("= main")));
}
