//! Terminal rendering for the selection prompts.
//!
//! [`TerminalPrompter`] is the crossterm implementation of the core
//! [`Prompter`](skaffold_runner_core::selection::Prompter): it draws one
//! list, lets the user move around or filter it, and reports which row was
//! activated. Repeated picking and the "done" row are handled by the core
//! selection engine.
//!
//! # User Interface
//!
//! - Arrow keys or vim-style (j/k) navigation
//! - Enter to activate the highlighted row
//! - `/` to filter rows (fuzzy search)
//! - 'q', Escape or Ctrl-C to abort

pub mod types;
pub mod ui;

pub use types::{CycleDirection, KeyOutcome, UiState, ViewportState};
pub use ui::TerminalPrompter;
