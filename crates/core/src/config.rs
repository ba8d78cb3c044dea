//! Run configuration for skaffold-runner.
//!
//! A [`RunnerConfig`] is built once from the command line and handed to the
//! rest of the pipeline. It also knows where the module list comes from.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::manifest;

/// Manifest looked up in the working directory when discovering modules
pub const DEFAULT_MANIFEST_NAME: &str = "skaffold.yaml";

/// Run modes offered by default
pub const DEFAULT_MODES: [&str; 2] = ["dev", "run"];

/// Profiles offered by default
pub const DEFAULT_PROFILES: [&str; 1] = ["local"];

/// Optional flags offered by default
pub const DEFAULT_FLAGS: [&str; 2] = ["--port-forward", "--tail"];

/// Where the list of selectable modules comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    /// An explicit manifest path.
    Manifest(PathBuf),
    /// `skaffold.yaml` inside the working directory.
    Discover,
    /// No module prompt; every module runs.
    AllModules,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub working_directory: Option<PathBuf>,
    pub module_source: ModuleSource,
    pub modes: Vec<String>,
    pub profiles: Vec<String>,
    pub flags: Vec<String>,
    pub dry_run: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            working_directory: None,
            module_source: ModuleSource::AllModules,
            modes: to_strings(&DEFAULT_MODES),
            profiles: to_strings(&DEFAULT_PROFILES),
            flags: to_strings(&DEFAULT_FLAGS),
            dry_run: false,
        }
    }
}

impl RunnerConfig {
    /// Path of the manifest to read, if the module source uses one.
    ///
    /// Explicit manifest paths are tilde-expanded. Discovery looks in the
    /// working directory, or the current directory when none is set.
    #[must_use]
    pub fn manifest_path(&self) -> Option<PathBuf> {
        match &self.module_source {
            ModuleSource::Manifest(path) => Some(expand_path(path)),
            ModuleSource::Discover => Some(
                self.working_directory
                    .as_deref()
                    .unwrap_or_else(|| Path::new("."))
                    .join(DEFAULT_MANIFEST_NAME),
            ),
            ModuleSource::AllModules => None,
        }
    }

    /// Reads the selectable modules, or `None` when every module runs.
    ///
    /// # Errors
    ///
    /// Propagates manifest read and parse failures unchanged.
    pub fn resolve_modules(&self) -> Result<Option<Vec<String>>> {
        self.manifest_path()
            .map(|path| manifest::read_modules(&path))
            .transpose()
    }
}

/// Expands shell variables in a working directory path.
///
/// # Examples
///
/// ```
/// use skaffold_runner_core::config::expand_working_directory;
///
/// let expanded = expand_working_directory(Some("~/projects"));
/// assert!(expanded.is_some());
///
/// assert!(expand_working_directory(None).is_none());
/// ```
#[must_use]
pub fn expand_working_directory(working_directory: Option<&str>) -> Option<PathBuf> {
    working_directory.map(|directory| PathBuf::from(shellexpand::tilde(directory).into_owned()))
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
