// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Recursively copies all contents from src directory to dst directory.
///
/// Creates dst if it doesn't exist. Existing files in dst are overwritten.
///
/// # Example
/// ```no_run
/// use gitops_rs::utility::fs::copy::copy_dir_contents;
/// use std::path::Path;
///
/// copy_dir_contents(Path::new("/source/dir"), Path::new("/dest/dir"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let entries =
        fs::read_dir(src).with_context(|| format!("failed to read directory {}", src.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry from {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        // never descend into a nested repository's metadata
        if entry.file_name() == ".git" {
            continue;
        }

        if src_path.is_dir() {
            copy_dir_contents(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Copies a file or directory into `dst`, keeping its file name.
///
/// Returns the path of the copy, e.g. `dst/app.yaml` for `src = manifests/app.yaml`.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `src` does not exist or has no file name,
/// or an error if any IO operation fails.
pub fn copy_into(src: &Path, dst: &Path) -> Result<PathBuf> {
    if !src.exists() {
        return Err(FsError::NotFound(src.display().to_string()).into());
    }
    let name = src
        .file_name()
        .ok_or_else(|| FsError::NotFound(src.display().to_string()))?;
    let target = dst.join(name);

    if src.is_dir() {
        copy_dir_contents(src, &target)?;
    } else {
        fs::create_dir_all(dst)
            .with_context(|| format!("failed to create directory {}", dst.display()))?;
        fs::copy(src, &target).with_context(|| {
            format!("failed to copy {} to {}", src.display(), target.display())
        })?;
    }

    Ok(target)
}
