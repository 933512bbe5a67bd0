//! Platform details needed to locate published executables

use std::path::{Path, PathBuf};

/// File name of an executable called `name` on this platform
pub fn executable_name(name: &str) -> String {
    format!("{}{}", name, std::env::consts::EXE_SUFFIX)
}

/// Where a self-contained publish of `assembly` lands inside `output_dir`
pub fn published_executable(output_dir: &Path, assembly: &str) -> PathBuf {
    output_dir.join(executable_name(assembly))
}
