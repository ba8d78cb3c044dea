use std::process::ExitCode;

use clap::Parser;
use log::debug;
use skaffold_runner_cli::cli_args::Args;
use skaffold_runner_cli::prompt::TerminalPrompter;
use skaffold_runner_core::arguments::SKAFFOLD;
use skaffold_runner_core::config::RunnerConfig;
use skaffold_runner_core::error::{Error, Result};
use skaffold_runner_core::planning::plan_invocation;
use skaffold_runner_core::selection::SelectionEngine;
use skaffold_runner_core::supervisor::{
    interruption_notice, InterruptListener, Outcome, ProcessSupervisor,
};

fn print_run_context(config: &RunnerConfig, has_modules: bool) {
    if !has_modules {
        println!("assuming you want to run all modules, as no --file flag was provided");
    }

    match &config.working_directory {
        Some(working_directory) => {
            println!("Working directory set to: {}", working_directory.display());
        }
        None => println!("running {SKAFFOLD} from current location as no --workdir specified"),
    }
}

fn supervise(config: &RunnerConfig, arguments: &[String]) -> Result<Outcome> {
    let supervisor =
        ProcessSupervisor::new(SKAFFOLD).with_working_directory(config.working_directory.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;

    runtime.block_on(async {
        let interrupts = InterruptListener::install()?;
        supervisor.run(arguments, interrupts.recv()).await
    })
}

fn execute() -> Result<()> {
    let config = Args::parse().into_config();
    debug!("Config: {config:?}");

    let modules = config.resolve_modules()?;
    print_run_context(&config, modules.is_some());

    let mut engine = SelectionEngine::new(TerminalPrompter);
    let invocation = plan_invocation(&mut engine, &config, modules)?;

    println!("Executing command:\n{invocation}");
    if config.dry_run {
        println!("Dry run is specified, exiting without executing.");
        return Ok(());
    }

    match supervise(&config, &invocation.arguments())? {
        Outcome::Exited => {}
        Outcome::Interrupted(signal) => {
            debug!("Stopped by {signal}");
            println!("{}", interruption_notice(SKAFFOLD));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
