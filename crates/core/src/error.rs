use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Selection failed: `{}` was offered no options.", .label)]
    EmptyCandidates { label: String },

    #[error("Selection failed: nothing was selected for `{}`.", .label)]
    NoSelection { label: String },

    #[error("Selection failed: `{}` is reserved and cannot be offered as a choice.", .0)]
    ReservedCandidate(String),

    #[error("Selection aborted: {}", .0)]
    PromptAborted(String),

    #[error("Selection aborted by terminal error: {}", .0)]
    Terminal(#[from] std::io::Error),

    #[error("Manifest read failed for `{}`: {}", .path, .original)]
    ManifestRead {
        path: String,
        original: std::io::Error,
    },

    #[error("Manifest parse failed for `{}`: {}", .path, .original)]
    ManifestParse {
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Manifest read failed: no modules found for file at `{}`.", .path)]
    EmptyManifest { path: String },

    #[error("Manifest parse failed for `{}`: entry {} under `requires` has no configs.", .path, .index)]
    IncompleteRequirement { path: String, index: usize },

    #[error("Launch failed: could not start the async runtime: {}", .0)]
    Runtime(std::io::Error),

    #[error("Launch failed for `{}`: {}", .program, .original)]
    Launch {
        program: String,
        original: std::io::Error,
    },

    #[error("Child exit: lost track of `{}`: {}", .program, .reason)]
    Supervision { program: String, reason: String },

    #[error("Child exit: `{}` terminated abnormally ({}).", .program, .status)]
    ChildExit { program: String, status: ExitStatus },
}

impl Error {
    pub fn empty_candidates(label: &str) -> Self {
        Self::EmptyCandidates {
            label: label.to_string(),
        }
    }

    pub fn no_selection(label: &str) -> Self {
        Self::NoSelection {
            label: label.to_string(),
        }
    }

    pub fn manifest_read(path: String, original: std::io::Error) -> Self {
        Self::ManifestRead { path, original }
    }

    pub fn manifest_parse(path: String, original: serde_yaml::Error) -> Self {
        Self::ManifestParse { path, original }
    }

    pub fn launch(program: &str, original: std::io::Error) -> Self {
        Self::Launch {
            program: program.to_string(),
            original,
        }
    }

    pub fn supervision(program: &str, reason: impl std::fmt::Display) -> Self {
        Self::Supervision {
            program: program.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn child_exit(program: &str, status: ExitStatus) -> Self {
        Self::ChildExit {
            program: program.to_string(),
            status,
        }
    }

    /// True when the terminal interaction itself failed or was cancelled.
    #[must_use]
    pub fn is_prompt_aborted(&self) -> bool {
        matches!(self, Self::PromptAborted(_) | Self::Terminal(_))
    }
}
