//! Default locations, relative to the directory holding rig.toml
//!
//! <repo>/
//! ├── rig.toml
//! └── test/
//!     ├── TestAssets/        # Fixture templates (read-only)
//!     ├── packagesToTest/    # Optional local package feed
//!     └── packages/          # Package cache used by restore

use std::path::{Path, PathBuf};

/// Project config file name, searched upward from the working directory
pub const PROJECT_CONFIG: &str = "rig.toml";

pub fn default_templates_dir() -> PathBuf {
    Path::new("test").join("TestAssets")
}

pub fn default_local_feed() -> PathBuf {
    Path::new("test").join("packagesToTest")
}

pub fn default_packages_dir() -> PathBuf {
    Path::new("test").join("packages")
}

/// Per-user fallback config (~/.config/scenario-rig/config.toml on Linux)
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scenario-rig").join("config.toml"))
}

/// Search `start` and its parents for rig.toml
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(PROJECT_CONFIG);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}
