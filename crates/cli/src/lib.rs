//! skaffold-runner CLI Library
//!
//! This crate provides the command-line interface for skaffold-runner, an
//! interactive launcher for `skaffold`. It handles argument parsing and the
//! terminal list used for every prompt.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing into a run configuration
//! - [`prompt`]: Crossterm list widget backing the core selection engine
//!
//! # Examples
//!
//! The CLI binary (`skaffoldrunner`) can be used in several ways:
//!
//! ```bash
//! # Run every module, only prompting for mode, profile and flags
//! skaffoldrunner
//!
//! # Pick modules from a manifest
//! skaffoldrunner --file ./skaffold.yaml
//!
//! # Pick modules from the manifest in another directory, and run from there
//! skaffoldrunner --workdir ~/src/platform --discover
//!
//! # Offer more than one profile
//! skaffoldrunner -f skaffold.yaml -p local -p staging
//!
//! # Dry run (don't execute, just show what would run)
//! skaffoldrunner --dry-run -f skaffold.yaml
//! ```

pub mod cli_args;
pub mod prompt;
