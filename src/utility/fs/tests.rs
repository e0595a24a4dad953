// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::copy::{copy_dir_contents, copy_into};
use crate::error::FsError;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn test_copy_dir_contents_recursive() {
    let src = temp_dir();
    let dst = temp_dir();

    std::fs::create_dir(src.path().join("subdir")).unwrap();
    std::fs::write(src.path().join("file1.txt"), "one").unwrap();
    std::fs::write(src.path().join("subdir/file2.txt"), "two").unwrap();

    copy_dir_contents(src.path(), &dst.path().join("out")).unwrap();

    let out = dst.path().join("out");
    assert_eq!(std::fs::read_to_string(out.join("file1.txt")).unwrap(), "one");
    assert_eq!(
        std::fs::read_to_string(out.join("subdir/file2.txt")).unwrap(),
        "two"
    );
}

#[test]
fn test_copy_dir_contents_skips_git_metadata() {
    let src = temp_dir();
    let dst = temp_dir();

    std::fs::create_dir(src.path().join(".git")).unwrap();
    std::fs::write(src.path().join(".git/HEAD"), "ref").unwrap();
    std::fs::write(src.path().join("kustomization.yaml"), "").unwrap();

    copy_dir_contents(src.path(), dst.path()).unwrap();

    assert!(dst.path().join("kustomization.yaml").exists());
    assert!(!dst.path().join(".git").exists());
}

#[test]
fn test_copy_into_file_keeps_name() {
    let src = temp_dir();
    let dst = temp_dir();
    let file = src.path().join("app.yaml");
    std::fs::write(&file, "kind: Deployment").unwrap();

    let copied = copy_into(&file, &dst.path().join("clusters/prod")).unwrap();

    assert_eq!(copied, dst.path().join("clusters/prod/app.yaml"));
    assert_eq!(
        std::fs::read_to_string(copied).unwrap(),
        "kind: Deployment"
    );
}

#[test]
fn test_copy_into_directory() {
    let src = temp_dir();
    let dst = temp_dir();
    let manifests = src.path().join("manifests");
    std::fs::create_dir(&manifests).unwrap();
    std::fs::write(manifests.join("a.yaml"), "a").unwrap();

    let copied = copy_into(&manifests, dst.path()).unwrap();

    assert_eq!(copied, dst.path().join("manifests"));
    assert!(copied.join("a.yaml").is_file());
}

#[test]
fn test_copy_into_missing_source() {
    let src = temp_dir();
    let dst = temp_dir();

    let err = copy_into(&src.path().join("missing.yaml"), dst.path()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FsError>(),
        Some(FsError::NotFound(_))
    ));
}
