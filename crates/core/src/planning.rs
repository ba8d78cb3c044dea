use log::info;

use crate::arguments::Invocation;
use crate::config::RunnerConfig;
use crate::error::Result;
use crate::selection::{Prompter, SelectionEngine};

pub const MODE_LABEL: &str = "Which mode would you like to run in?";
pub const PROFILE_LABEL: &str = "Which profile would you like to run against?";
pub const FLAGS_LABEL: &str = "Select the optional flags you'd like to use";
pub const MODULES_LABEL: &str = "Select the modules you'd like to run";

/// Prompts for mode, profile, flags and (when a module list exists) modules.
///
/// `modules` of `None` skips the module prompt and runs every module.
///
/// # Errors
///
/// Any selection failure stops planning before anything is launched.
pub fn plan_invocation<P: Prompter>(
    engine: &mut SelectionEngine<P>,
    config: &RunnerConfig,
    modules: Option<Vec<String>>,
) -> Result<Invocation> {
    let mode = engine.single_select(MODE_LABEL, &config.modes)?;
    let profile = engine.single_select(PROFILE_LABEL, &config.profiles)?;
    let flags = engine.multi_select(FLAGS_LABEL, config.flags.clone())?;

    let modules = match modules {
        Some(modules) => engine.multi_select(MODULES_LABEL, modules)?,
        None => Vec::new(),
    };

    let invocation = Invocation {
        mode,
        profile,
        modules,
        flags,
    };
    info!("Planned invocation: {invocation}");
    Ok(invocation)
}
