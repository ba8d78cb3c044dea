use std::fmt::{Display, Formatter};

/// The external tool every invocation runs.
pub const SKAFFOLD: &str = "skaffold";
pub const PROFILE_FLAG: &str = "-p";
pub const MODULE_FLAG: &str = "-m";

/// Assembles `[mode, -p, profile, -m, modules, flags...]`.
///
/// Modules are always passed as a single comma-joined value, which is empty
/// when no modules were chosen.
#[must_use]
pub fn build(mode: &str, profile: &str, modules: &[String], flags: &[String]) -> Vec<String> {
    let mut arguments = Vec::with_capacity(5 + flags.len());
    arguments.push(mode.to_string());
    arguments.extend([PROFILE_FLAG.to_string(), profile.to_string()]);
    arguments.extend([MODULE_FLAG.to_string(), modules.join(",")]);
    arguments.extend(flags.iter().cloned());
    arguments
}

/// Everything the user picked for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: String,
    pub profile: String,
    pub modules: Vec<String>,
    pub flags: Vec<String>,
}

impl Invocation {
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        build(&self.mode, &self.profile, &self.modules, &self.flags)
    }
}

impl Display for Invocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(SKAFFOLD)?;
        for argument in self.arguments() {
            if argument.is_empty() {
                formatter.write_str(" \"\"")?;
            } else {
                write!(formatter, " {argument}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_build_with_modules_and_flags() {
        let arguments = build("dev", "local", &strings(&["svcA", "svcB"]), &strings(&["--tail"]));
        assert_eq!(arguments, vec!["dev", "-p", "local", "-m", "svcA,svcB", "--tail"]);
    }

    #[test]
    fn test_build_without_modules_keeps_empty_module_value() {
        let arguments = build("run", "local", &[], &[]);
        assert_eq!(arguments, vec!["run", "-p", "local", "-m", ""]);
    }

    #[test]
    fn test_build_keeps_flag_selection_order() {
        let arguments = build(
            "dev",
            "staging",
            &strings(&["api"]),
            &strings(&["--tail", "--port-forward"]),
        );
        assert_eq!(
            arguments,
            vec!["dev", "-p", "staging", "-m", "api", "--tail", "--port-forward"]
        );
    }

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation {
            mode: "dev".to_string(),
            profile: "local".to_string(),
            modules: strings(&["web", "api"]),
            flags: strings(&["--port-forward"]),
        };
        assert_eq!(
            invocation.to_string(),
            "skaffold dev -p local -m web,api --port-forward"
        );

        let no_modules = Invocation {
            modules: Vec::new(),
            flags: Vec::new(),
            ..invocation
        };
        assert_eq!(no_modules.to_string(), "skaffold dev -p local -m \"\"");
    }
}
