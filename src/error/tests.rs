// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, GitopsError, GitopsResult, ProcessError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "author".to_string(),
        key: "email".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'email' in section '[author]'");
}

#[test]
fn test_git_error_display() {
    let unsafe_delete = GitError::UnsafeDeletion {
        path: "/home/user".to_string(),
        root: "/tmp".to_string(),
    };
    insta::assert_snapshot!(
        unsafe_delete.to_string(),
        @"refusing to delete '/home/user': not inside temporary root '/tmp'"
    );

    let no_copy = GitError::NoWorkingCopy { operation: "push" };
    insta::assert_snapshot!(no_copy.to_string(), @"cannot push: no working copy has been cloned");
}

#[test]
fn test_boxed_conversion_keeps_variant() {
    let err: GitopsError = GitError::InvalidLocator {
        locator: "app-dev".to_string(),
    }
    .into();
    assert!(matches!(
        err.as_git(),
        Some(GitError::InvalidLocator { locator }) if locator == "app-dev"
    ));
    assert!(err.as_process().is_none());

    let err: GitopsError = ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    }
    .into();
    assert!(err.as_process().is_some());

    let err: GitopsError = std::io::Error::other("disk full").into();
    assert!(matches!(err, GitopsError::Io(_)));
    insta::assert_snapshot!(err.to_string(), @"io error: disk full");
}

#[test]
fn test_gitops_error_size() {
    // Every variant is a thin box plus discriminant.
    let size = std::mem::size_of::<GitopsError>();
    assert!(size <= 16, "GitopsError is {size} bytes, expected <= 16");
}

#[test]
fn test_gitops_result_size() {
    let size = std::mem::size_of::<GitopsResult<()>>();
    assert!(size <= 24, "GitopsResult<()> is {size} bytes, expected <= 24");
}
