//! Integration tests for skaffold-runner-core
//!
//! These tests drive the whole pipeline (manifest, prompts, argument
//! assembly) with a scripted prompter standing in for the terminal.

use skaffold_runner_core::{
    config::{ModuleSource, RunnerConfig},
    error::{Error, Result},
    planning::{plan_invocation, FLAGS_LABEL, MODE_LABEL, MODULES_LABEL, PROFILE_LABEL},
    selection::{Prompter, SelectionEngine, SENTINEL},
};
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Answers each prompt with the next scripted row text and logs the labels it saw.
struct ScriptedPrompter {
    answers: VecDeque<String>,
    labels: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(ToString::to_string).collect(),
            labels: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, label: &str, options: &[String]) -> Result<usize> {
        self.labels.push(label.to_string());
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| Error::PromptAborted("no more answers".to_string()))?;
        options
            .iter()
            .position(|option| *option == answer)
            .ok_or_else(|| Error::PromptAborted(format!("`{answer}` was not offered")))
    }
}

fn manifest_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r"
apiVersion: skaffold/v4beta6
kind: Config
requires:
  - configs: [frontend]
    path: ./frontend
  - configs: [backend]
    path: ./backend
  - configs: [payments, payments-worker]
    path: ./payments
"
    )
    .unwrap();
    file
}

#[test]
fn test_manifest_to_argument_vector() {
    let manifest = manifest_file();
    let config = RunnerConfig {
        module_source: ModuleSource::Manifest(manifest.path().to_path_buf()),
        ..RunnerConfig::default()
    };

    let modules = config.resolve_modules().unwrap();
    assert_eq!(
        modules,
        Some(vec![
            "frontend".to_string(),
            "backend".to_string(),
            "payments".to_string()
        ])
    );

    let mut prompter = ScriptedPrompter::new(&[
        "dev",
        "local",
        "--tail",
        SENTINEL,
        "payments",
        "frontend",
        SENTINEL,
    ]);
    let mut engine = SelectionEngine::new(&mut prompter);
    let invocation = plan_invocation(&mut engine, &config, modules).unwrap();

    assert_eq!(
        invocation.arguments(),
        vec!["dev", "-p", "local", "-m", "payments,frontend", "--tail"]
    );
    assert_eq!(
        prompter.labels,
        vec![
            MODE_LABEL,
            PROFILE_LABEL,
            FLAGS_LABEL,
            FLAGS_LABEL,
            MODULES_LABEL,
            MODULES_LABEL,
            MODULES_LABEL
        ]
    );
}

#[test]
fn test_all_modules_skips_module_prompt() {
    let config = RunnerConfig::default();
    let modules = config.resolve_modules().unwrap();
    assert!(modules.is_none());

    let mut engine = SelectionEngine::new(ScriptedPrompter::new(&[
        "run",
        "local",
        "--tail",
        SENTINEL,
    ]));
    let invocation = plan_invocation(&mut engine, &config, modules).unwrap();

    assert_eq!(
        invocation.arguments(),
        vec!["run", "-p", "local", "-m", "", "--tail"]
    );
    assert!(!engine.into_prompter().labels.contains(&MODULES_LABEL.to_string()));
}

#[test]
fn test_no_modules_selected_stops_planning() {
    let manifest = manifest_file();
    let config = RunnerConfig {
        module_source: ModuleSource::Manifest(manifest.path().to_path_buf()),
        ..RunnerConfig::default()
    };
    let modules = config.resolve_modules().unwrap();

    let mut engine = SelectionEngine::new(ScriptedPrompter::new(&[
        "dev",
        "local",
        "--port-forward",
        SENTINEL,
        SENTINEL,
    ]));
    let result = plan_invocation(&mut engine, &config, modules);

    match result {
        Err(Error::NoSelection { label }) => assert_eq!(label, MODULES_LABEL),
        other => panic!("Expected NoSelection, got {other:?}"),
    }
}

#[test]
fn test_no_flags_selected_stops_planning() {
    let manifest = manifest_file();
    let config = RunnerConfig {
        module_source: ModuleSource::Manifest(manifest.path().to_path_buf()),
        ..RunnerConfig::default()
    };
    let modules = config.resolve_modules().unwrap();

    let mut prompter = ScriptedPrompter::new(&["dev", "local", SENTINEL, "frontend"]);
    let mut engine = SelectionEngine::new(&mut prompter);
    let result = plan_invocation(&mut engine, &config, modules);

    match result {
        Err(Error::NoSelection { label }) => assert_eq!(label, FLAGS_LABEL),
        other => panic!("Expected NoSelection, got {other:?}"),
    }
    assert!(!prompter.labels.contains(&MODULES_LABEL.to_string()));
}

#[test]
fn test_custom_profiles_are_offered() {
    let config = RunnerConfig {
        profiles: vec!["local".to_string(), "staging".to_string()],
        ..RunnerConfig::default()
    };

    let mut engine = SelectionEngine::new(ScriptedPrompter::new(&[
        "dev",
        "staging",
        "--port-forward",
        "--tail",
    ]));
    let invocation = plan_invocation(&mut engine, &config, None).unwrap();

    assert_eq!(
        invocation.arguments(),
        vec!["dev", "-p", "staging", "-m", "", "--port-forward", "--tail"]
    );
}

#[test]
fn test_empty_profile_list_is_a_configuration_error() {
    let config = RunnerConfig {
        profiles: Vec::new(),
        ..RunnerConfig::default()
    };

    let mut engine = SelectionEngine::new(ScriptedPrompter::new(&["dev"]));
    let result = plan_invocation(&mut engine, &config, None);
    assert!(matches!(result, Err(Error::EmptyCandidates { .. })));
}

#[test]
fn test_manifest_errors_surface_before_prompting() {
    let config = RunnerConfig {
        module_source: ModuleSource::Manifest(PathBuf::from("/nonexistent/skaffold.yaml")),
        ..RunnerConfig::default()
    };

    let error = config.resolve_modules().unwrap_err();
    assert!(matches!(error, Error::ManifestRead { .. }));
    assert!(error.to_string().starts_with("Manifest read failed"));
}
