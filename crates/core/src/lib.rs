//! skaffold-runner core library
//!
//! This crate provides the pieces behind `skaffoldrunner`, an interactive
//! launcher for `skaffold`: reading modules out of a `skaffold.yaml`,
//! prompting for a mode, profile, flags and modules, assembling the
//! `skaffold` argument vector, and supervising the resulting child process.
//!
//! # Key Features
//!
//! - **Manifest Reading**: Module names from the `requires` section of a manifest
//! - **Selection Engine**: Single and repeated multi-choice prompts over any [`selection::Prompter`]
//! - **Argument Building**: The exact `skaffold <mode> -p <profile> -m <modules> [flags]` vector
//! - **Process Supervision**: Inherited output, and a clean kill when an interrupt arrives
//! - **Error Handling**: One error type naming the stage that failed
//!
//! # Examples
//!
//! Assembling the arguments for a run:
//!
//! ```
//! use skaffold_runner_core::arguments::build;
//!
//! let modules = vec!["web".to_string(), "api".to_string()];
//! let arguments = build("dev", "local", &modules, &["--tail".to_string()]);
//! assert_eq!(arguments, ["dev", "-p", "local", "-m", "web,api", "--tail"]);
//! ```

pub mod arguments;
pub mod config;
pub mod error;
pub mod manifest;
pub mod planning;
pub mod selection;
pub mod supervisor;
