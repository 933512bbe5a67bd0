//! Fixture templates and isolated test roots
//!
//! Templates are read-only directory trees. Every scenario copies the
//! templates it needs into its own freshly created temp directory, so two
//! scenarios never see each other's files.

use crate::error::{Result, RigError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ROOT_PREFIX: &str = "rig-";

/// An ephemeral working directory owned by one scenario run
#[derive(Debug)]
pub struct TestRoot {
    dir: TempDir,
    path: PathBuf,
}

impl TestRoot {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join<P: AsRef<Path>>(&self, p: P) -> PathBuf {
        self.path().join(p)
    }

    /// Disable cleanup and hand back the path for inspection
    pub fn keep(self) -> PathBuf {
        let _ = self.dir.keep();
        self.path
    }
}

/// Read-only store of named template directories
#[derive(Debug, Clone)]
pub struct FixtureStore {
    templates_dir: PathBuf,
}

impl FixtureStore {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Path of a named template, if it exists on disk
    pub fn template(&self, name: &str) -> Result<PathBuf> {
        let path = self.templates_dir.join(name);
        if !path.is_dir() {
            return Err(RigError::FixtureNotFound {
                name: name.to_string(),
                searched: self.templates_dir.clone(),
            });
        }
        Ok(path)
    }

    /// Create a new, empty, uniquely named directory under the system temp dir
    pub fn create_isolated_root(&self) -> Result<TestRoot> {
        let dir = tempfile::Builder::new()
            .prefix(ROOT_PREFIX)
            .tempdir()
            .map_err(|e| RigError::io("Failed to create test root", e))?;

        // Canonical form so spawned tools and assertions agree on the path
        // (macOS /var -> /private/var).
        let path = fs::canonicalize(dir.path())
            .map_err(|e| RigError::io("Failed to resolve test root", e))?;
        tracing::debug!(root = %path.display(), "created test root");

        Ok(TestRoot { dir, path })
    }

    /// Deep copy a named template into `destination`, creating it if needed
    pub fn copy_template(&self, name: &str, destination: &Path) -> Result<()> {
        let source = self.template(name)?;
        copy_dir_recursive(&source, destination).map_err(|e| {
            RigError::io(
                format!(
                    "Failed to copy fixture '{}' to {}",
                    name,
                    destination.display()
                ),
                e,
            )
        })?;
        tracing::debug!(template = name, dest = %destination.display(), "copied fixture");
        Ok(())
    }

    /// Copy several templates into the same destination, in order
    pub fn provision<S: AsRef<str>>(&self, names: &[S], destination: &Path) -> Result<()> {
        for name in names {
            self.copy_template(name.as_ref(), destination)?;
        }
        Ok(())
    }
}

/// Recursively copy a directory
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst)?;
    }

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_symlink() {
            copy_symlink(&src_path, &dst_path)?;
        } else if ty.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Recreate a symlink with the same (unresolved) target
#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dst)
}

#[cfg(windows)]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    let target = fs::read_link(src)?;
    if fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(target, dst)
    } else {
        std::os::windows::fs::symlink_file(target, dst)
    }
}
