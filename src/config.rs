//! Configuration for scenario-rig
//!
//! Reads rig.toml (project), or the per-user config file, and the version pin
//! environment variables. Everything is collected once at startup and passed
//! down explicitly.

use crate::args::PropertyOverrides;
use crate::error::RigError;
use crate::paths;
use crate::util::process;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const NUGET_ORG: &str = "https://api.nuget.org/v3/index.json";

pub const FSHARP_SDK_VERSION_VAR: &str = "TEST_SUITE_FSHARP_NET_SDK_PKG_VERSION";
pub const FSHARP_CORE_VERSION_VAR: &str = "TEST_SUITE_MS_FSHARP_CORE_PKG_VERSION";

/// Global rig configuration
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
    #[serde(default)]
    pub restore: RestoreConfig,
    #[serde(default)]
    pub run: RunConfig,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

/// The tool under test
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_tool_name")]
    pub name: String,
    /// Explicit executable; skips the PATH lookup
    pub path: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: default_tool_name(),
            path: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixturesConfig {
    #[serde(default = "paths::default_templates_dir")]
    pub templates: PathBuf,
    /// Templates copied next to every project fixture
    #[serde(default = "default_support")]
    pub support: Vec<String>,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            templates: paths::default_templates_dir(),
            support: default_support(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RestoreConfig {
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    /// Appended to the sources when the directory exists
    #[serde(default = "default_local_feed")]
    pub local_feed: Option<PathBuf>,
    #[serde(default = "default_packages")]
    pub packages: Option<PathBuf>,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            local_feed: default_local_feed(),
            packages: default_packages(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub keep_roots: bool,
    #[serde(default = "default_true")]
    pub capture: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            keep_roots: false,
            capture: true,
        }
    }
}

fn default_tool_name() -> String {
    "dotnet".to_string()
}

fn default_support() -> Vec<String> {
    vec!["TestSuiteProps".to_string()]
}

fn default_sources() -> Vec<String> {
    vec![NUGET_ORG.to_string()]
}

fn default_local_feed() -> Option<PathBuf> {
    Some(paths::default_local_feed())
}

fn default_packages() -> Option<PathBuf> {
    Some(paths::default_packages_dir())
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration.
    /// Priority: explicit path -> rig.toml in cwd or a parent -> user config -> defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        if let Some(path) = paths::find_project_config(&cwd) {
            return Self::from_file(&path);
        }

        if let Some(path) = paths::user_config_file().filter(|p| p.is_file()) {
            return Self::from_file(&path);
        }

        Ok(Self::with_base_dir(cwd))
    }

    /// Load a config file; relative paths inside resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let dir = config_dir(path);
        config.base_dir = fs::canonicalize(dir)
            .with_context(|| format!("Failed to resolve config directory: {}", dir.display()))?;
        Ok(config)
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.fixtures.templates)
    }

    /// Ordered restore sources, local feed last when it exists
    pub fn restore_sources(&self) -> Vec<String> {
        let mut sources = self.restore.sources.clone();
        if let Some(ref feed) = self.restore.local_feed {
            let feed = self.resolve(feed);
            if feed.is_dir() {
                sources.push(feed.display().to_string());
            }
        }
        sources
    }

    pub fn packages_dir(&self) -> Option<PathBuf> {
        self.restore.packages.as_deref().map(|p| self.resolve(p))
    }

    /// Absolute path of the tool under test
    pub fn tool_path(&self) -> std::result::Result<PathBuf, RigError> {
        match self.tool.path {
            Some(ref path) => process::resolve_program(&self.resolve(path).to_string_lossy()),
            None => process::resolve_program(&self.tool.name),
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool.name
    }
}

/// Directory holding a config file; a bare file name lives in the cwd
fn config_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Package version pins, translated to `/p:` overrides when present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPins {
    pub fsharp_sdk: Option<String>,
    pub fsharp_core: Option<String>,
}

impl VersionPins {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            fsharp_sdk: lookup(FSHARP_SDK_VERSION_VAR),
            fsharp_core: lookup(FSHARP_CORE_VERSION_VAR),
        }
    }

    pub fn to_properties(&self) -> PropertyOverrides {
        let mut props = PropertyOverrides::new();
        props
            .set("FSharpNETSdkVersion", self.fsharp_sdk.clone())
            .set("MicrosoftFSharpCorenetcoreVersion", self.fsharp_core.clone());
        props
    }
}
