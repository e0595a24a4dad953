// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{PublishRequest, publish};
use crate::cli::repo::PublishArgs;
use crate::config::Config;
use crate::core::process::{RecordingExecutor, ScriptedOutcome};
use crate::error::{ConfigError, GitError, GitopsError};
use crate::git::GitClient;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LOCATOR: &str = "git@github.com:example/fleet-infra.git";

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Recorder where `git diff --cached --quiet` reports staged changes.
fn recorder() -> RecordingExecutor {
    RecordingExecutor::new().on_subcommand("diff", ScriptedOutcome::exit(1))
}

fn source_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "apiVersion: v1\n").unwrap();
    path
}

fn request(sources: Vec<PathBuf>) -> PublishRequest {
    PublishRequest::builder()
        .locator(LOCATOR)
        .branch("main")
        .message("Update manifests")
        .author_name("Flux")
        .author_email("flux@example.com")
        .sources(sources)
        .build()
}

fn subcommands(git: &GitClient<RecordingExecutor>) -> Vec<String> {
    git.executor()
        .calls()
        .iter()
        .filter_map(|call| call.subcommand().map(String::from))
        .collect()
}

#[test]
fn test_publish_full_round_trip() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let mut git = GitClient::new(recorder(), root.path());

    let outcome = publish(&mut git, &request(vec![file])).unwrap();

    assert_eq!(outcome.staged, ["app.yaml"]);
    assert!(outcome.pushed);
    assert!(outcome.kept.is_none());
    assert_eq!(
        subcommands(&git),
        ["clone", "add", "diff", "config", "config", "commit", "push"]
    );
    assert!(git.working_copy().is_none());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn test_publish_clone_prefix_uses_repo_name() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let mut git = GitClient::new(recorder(), root.path());

    let outcome = publish(&mut git, &request(vec![file])).unwrap();
    assert!(outcome.pushed);

    let clone = &git.executor().calls()[0];
    let dest = clone.args().last().unwrap();
    let name = Path::new(dest).file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("gitops-repo-fleet-infra-"), "{name}");
}

#[test]
fn test_publish_into_dest_and_keep() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let mut git = GitClient::new(recorder(), root.path());
    let request = PublishRequest::builder()
        .locator(LOCATOR)
        .branch("main")
        .message("Update manifests")
        .author_name("Flux")
        .author_email("flux@example.com")
        .dest("clusters/prod")
        .sources(vec![file])
        .push(false)
        .keep(true)
        .build();

    let outcome = publish(&mut git, &request).unwrap();

    assert_eq!(outcome.staged, ["clusters/prod/app.yaml"]);
    assert!(!outcome.pushed);
    let kept = outcome.kept.expect("working copy should be kept");
    assert!(kept.join("clusters/prod/app.yaml").is_file());
    assert!(!subcommands(&git).contains(&"push".to_string()));

    let add = git
        .executor()
        .calls()
        .into_iter()
        .find(|call| call.subcommand() == Some("add"))
        .unwrap();
    assert_eq!(add.args(), ["add", "--", "clusters/prod/app.yaml"]);
}

#[test]
fn test_publish_rejects_non_url() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let mut git = GitClient::new(recorder(), root.path());
    let request = PublishRequest::builder()
        .locator("not-a-url")
        .branch("main")
        .message("m")
        .author_name("Flux")
        .author_email("flux@example.com")
        .sources(vec![file])
        .build();

    let err = publish(&mut git, &request).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GitError>(),
        Some(GitError::NotAGitUrl { .. })
    ));
    assert_eq!(git.executor().call_count(), 0);
}

#[test]
fn test_publish_rejects_escaping_dest() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let mut git = GitClient::new(recorder(), root.path());

    for dest in ["../outside", "/etc"] {
        let request = PublishRequest::builder()
            .locator(LOCATOR)
            .branch("main")
            .message("m")
            .author_name("Flux")
            .author_email("flux@example.com")
            .dest(dest)
            .sources(vec![file.clone()])
            .build();

        assert!(publish(&mut git, &request).is_err(), "{dest}");
    }
    assert_eq!(git.executor().call_count(), 0);
}

#[test]
fn test_publish_rejects_git_metadata_dest() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let mut git = GitClient::new(recorder(), root.path());

    for dest in [".git", "./.git/hooks", "clusters/.GIT"] {
        let request = PublishRequest::builder()
            .locator(LOCATOR)
            .branch("main")
            .message("m")
            .author_name("Flux")
            .author_email("flux@example.com")
            .dest(dest)
            .sources(vec![file.clone()])
            .build();

        let err = publish(&mut git, &request).unwrap_err();
        assert!(err.to_string().contains(".git"), "{dest}: {err}");
    }
    assert_eq!(git.executor().call_count(), 0);
}

#[test]
fn test_publish_failed_push_still_deletes_working_copy() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let recorder = recorder().on_subcommand(
        "push",
        ScriptedOutcome::Exit {
            code: 128,
            stderr: "rejected".to_string(),
        },
    );
    let mut git = GitClient::new(recorder, root.path());

    let err = publish(&mut git, &request(vec![file])).unwrap_err();

    let err = err.downcast_ref::<GitopsError>().expect("git error");
    assert!(err.is_non_zero_exit());
    assert!(git.working_copy().is_none());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn test_publish_missing_source_cleans_up() {
    let root = temp_dir();
    let src = temp_dir();
    let mut git = GitClient::new(recorder(), root.path());

    let result = publish(&mut git, &request(vec![src.path().join("missing.yaml")]));

    assert!(result.is_err());
    assert_eq!(subcommands(&git), ["clone"]);
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn test_publish_nothing_staged_skips_commit() {
    let root = temp_dir();
    let src = temp_dir();
    let file = source_file(src.path(), "app.yaml");
    let mut git = GitClient::new(RecordingExecutor::new(), root.path());

    publish(&mut git, &request(vec![file])).unwrap();

    assert_eq!(subcommands(&git), ["clone", "add", "diff", "push"]);
}

#[test]
fn test_request_from_args_uses_config_defaults() {
    let config = Config::parse(
        r#"
[git]
branch = "release"
clone_prefix = "ci-"

[author]
name = "ci-bot"
email = "ci@example.com"
"#,
    )
    .unwrap();
    let args = PublishArgs {
        url: LOCATOR.to_string(),
        branch: None,
        message: "msg".to_string(),
        author_name: None,
        author_email: None,
        dest: None,
        no_push: false,
        keep: false,
        sources: vec![PathBuf::from("a.yaml")],
    };

    let request = PublishRequest::from_args(&args, &config).unwrap();

    assert_eq!(request.locator(), LOCATOR);
    assert_eq!(request.branch(), "release");
    assert_eq!(request.author_name, "ci-bot");
    assert_eq!(request.clone_prefix, "ci-");
    assert!(request.push);
}

#[test]
fn test_request_from_args_requires_email() {
    let args = PublishArgs {
        url: LOCATOR.to_string(),
        branch: Some("main".to_string()),
        message: "msg".to_string(),
        author_name: Some("me".to_string()),
        author_email: None,
        dest: None,
        no_push: true,
        keep: false,
        sources: vec![PathBuf::from("a.yaml")],
    };

    let err = PublishRequest::from_args(&args, &Config::default()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingKey { key, .. }) if key == "email"
    ));
}
