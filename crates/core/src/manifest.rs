//! Reading the module list out of a `skaffold.yaml` manifest.
//!
//! Only the `requires` section matters here: every entry names one or more
//! configs, and the first config of each entry is offered as a module.

use std::fs::File;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    #[serde(default)]
    pub requires: Vec<Requirement>,
}

#[derive(Deserialize, Debug)]
pub struct Requirement {
    #[serde(default)]
    pub configs: Vec<String>,
    pub path: Option<String>,
}

impl Manifest {
    /// Module names in declaration order, one per `requires` entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteRequirement`] if an entry lists no configs.
    pub fn module_names(&self, path: &str) -> Result<Vec<String>> {
        self.requires
            .iter()
            .enumerate()
            .map(|(index, requirement)| {
                requirement
                    .configs
                    .first()
                    .cloned()
                    .ok_or_else(|| Error::IncompleteRequirement {
                        path: path.to_string(),
                        index,
                    })
            })
            .collect()
    }
}

/// Reads the manifest at `path` and returns its module names.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, if an entry has no configs,
/// or if the manifest declares no modules at all.
pub fn read_modules(path: &Path) -> Result<Vec<String>> {
    let display_path = path.display().to_string();
    debug!("Reading manifest at `{display_path}`");

    let reader = File::open(path).map_err(|e| Error::manifest_read(display_path.clone(), e))?;
    let manifest: Manifest = serde_yaml::from_reader(reader)
        .map_err(|e| Error::manifest_parse(display_path.clone(), e))?;

    let modules = manifest.module_names(&display_path)?;
    if modules.is_empty() {
        return Err(Error::EmptyManifest { path: display_path });
    }

    debug!("Found {} modules: {:?}", modules.len(), modules);
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn manifest_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_reads_first_config_of_each_requirement_in_order() {
        let file = manifest_file(
            r"
apiVersion: skaffold/v4beta6
kind: Config
requires:
  - configs: [frontend]
    path: ./frontend
  - configs: [backend, worker]
    path: ./backend
  - configs: [database]
",
        );

        let modules = read_modules(file.path()).unwrap();
        assert_eq!(modules, vec!["frontend", "backend", "database"]);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let file = manifest_file(
            r"
apiVersion: skaffold/v4beta6
kind: Config
metadata:
  name: platform
build:
  artifacts: []
requires:
  - configs: [api]
",
        );

        assert_eq!(read_modules(file.path()).unwrap(), vec!["api"]);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_modules(&dir.path().join("skaffold.yaml"));
        assert!(matches!(result, Err(Error::ManifestRead { .. })));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let file = manifest_file("requires: [configs: {");
        let result = read_modules(file.path());
        assert!(matches!(result, Err(Error::ManifestParse { .. })));
    }

    #[test]
    fn test_requirement_without_configs_is_rejected() {
        let file = manifest_file(
            r"
requires:
  - configs: [frontend]
  - path: ./orphan
",
        );

        match read_modules(file.path()) {
            Err(Error::IncompleteRequirement { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected IncompleteRequirement, got {other:?}"),
        }
    }

    #[test]
    fn test_manifest_without_requirements_is_empty() {
        let file = manifest_file("apiVersion: skaffold/v4beta6\nkind: Config\n");
        let result = read_modules(file.path());
        assert!(matches!(result, Err(Error::EmptyManifest { .. })));
    }
}
