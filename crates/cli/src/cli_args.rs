//! Command-line argument parsing.
//!
//! This module defines the command-line interface using the `clap` crate and
//! turns it into the [`RunnerConfig`] the rest of the run is driven by.

use clap::{ArgAction, Parser};
use skaffold_runner_core::config::{expand_working_directory, ModuleSource, RunnerConfig};
use std::path::PathBuf;

/// Command-line arguments for the `skaffoldrunner` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use skaffold_runner_cli::cli_args::Args;
///
/// let args = Args::parse_from(["skaffoldrunner", "--file", "skaffold.yaml"]);
/// assert_eq!(args.file.as_deref(), Some("skaffold.yaml"));
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "skaffoldrunner",
    about = "Reads your skaffold.yaml and launches the modules you select",
    term_width = 0
)]
pub struct Args {
    /// Path to the skaffold YAML file declaring the modules.
    ///
    /// Without this (or `--discover`), every module is run and no module
    /// prompt is shown.
    #[arg(long, short = 'f', conflicts_with = "discover")]
    pub file: Option<String>,

    /// Working directory to run skaffold from.
    ///
    /// Defaults to the current directory.
    #[arg(long, short = 'w')]
    pub workdir: Option<String>,

    /// Read the modules from `skaffold.yaml` in the working directory.
    #[arg(long, short = 'D', action)]
    pub discover: bool,

    /// Profile to offer; repeat to offer several.
    ///
    /// Defaults to `local`.
    #[arg(long = "profile", short = 'p', action = ArgAction::Append)]
    pub profiles: Vec<String>,

    /// Print the skaffold command without running it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,
}

impl Args {
    /// Builds the run configuration. Empty path options count as unset.
    #[must_use]
    pub fn into_config(self) -> RunnerConfig {
        let defaults = RunnerConfig::default();

        let file = self.file.filter(|file| !file.is_empty());
        let workdir = self.workdir.filter(|workdir| !workdir.is_empty());

        let module_source = match (file, self.discover) {
            (Some(file), _) => ModuleSource::Manifest(PathBuf::from(file)),
            (None, true) => ModuleSource::Discover,
            (None, false) => ModuleSource::AllModules,
        };

        let profiles = if self.profiles.is_empty() {
            defaults.profiles
        } else {
            self.profiles
        };

        RunnerConfig {
            working_directory: expand_working_directory(workdir.as_deref()),
            module_source,
            profiles,
            dry_run: self.dry_run,
            ..defaults
        }
    }
}
