//! Running the external tool and stopping it on interrupt.
//!
//! The child is moved into its own task, which waits for it to exit or for a
//! shared [`CancellationToken`] to fire. The caller races that task against an
//! interrupt future; when the interrupt wins, the token is cancelled and the
//! task kills and reaps the child before the supervisor returns.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::process::{Child, Command};
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// How long a failed exit waits for the interrupt that may have caused it.
pub const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

#[cfg(unix)]
const SIGINT: i32 = 2;
#[cfg(unix)]
const SIGTERM: i32 = 15;

/// The OS notification that asked the supervisor to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Interrupt,
    Terminate,
}

impl Display for Interrupt {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Interrupt::Interrupt => formatter.write_str("SIGINT"),
            Interrupt::Terminate => formatter.write_str("SIGTERM"),
        }
    }
}

/// How a supervised run ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The child exited successfully on its own.
    Exited,
    /// An interrupt stopped the child, either through this supervisor or
    /// by reaching the child directly.
    Interrupted(Interrupt),
}

/// Line printed once an interrupt has stopped `program`.
#[must_use]
pub fn interruption_notice(program: &str) -> String {
    format!("Interrupt signal received, terminated {program}")
}

enum ChildState {
    Exited(ExitStatus),
    Killed,
}

pub struct ProcessSupervisor {
    program: String,
    working_directory: Option<PathBuf>,
}

impl ProcessSupervisor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_directory: None,
        }
    }

    /// Runs the child from `working_directory`, or the current directory when `None`.
    #[must_use]
    pub fn with_working_directory(mut self, working_directory: Option<PathBuf>) -> Self {
        self.working_directory = working_directory;
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, arguments: &[String]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(arguments)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if let Some(working_directory) = &self.working_directory {
            debug!("Running from `{}`", working_directory.display());
            command.current_dir(working_directory);
        }
        command
    }

    /// Starts the program with `arguments` and supervises it until it exits
    /// or `interrupt` resolves, whichever happens first.
    ///
    /// A child that has already exited successfully always wins over a
    /// simultaneous interrupt. A terminal Ctrl-C reaches the child and this
    /// process together, so a child that died from SIGINT/SIGTERM, or failed
    /// within [`INTERRUPT_GRACE`] of an interrupt, counts as interrupted.
    ///
    /// # Errors
    ///
    /// [`Error::Launch`] if the child cannot be started, [`Error::ChildExit`]
    /// if it exits unsuccessfully on its own, [`Error::Supervision`] if
    /// waiting on it fails.
    pub async fn run<F>(&self, arguments: &[String], interrupt: F) -> Result<Outcome>
    where
        F: Future<Output = Interrupt>,
    {
        let cancellation = CancellationToken::new();
        let child = self
            .command(arguments)
            .spawn()
            .map_err(|original| Error::launch(&self.program, original))?;
        info!("Started `{}` (pid {:?})", self.program, child.id());

        let mut child_wait = tokio::spawn(wait_or_kill(child, cancellation.clone()));
        tokio::pin!(interrupt);

        let (state, received) = tokio::select! {
            biased;
            joined = &mut child_wait => (self.settle(joined)?, None),
            signal = &mut interrupt => {
                warn!("Received {signal}, stopping `{}`", self.program);
                cancellation.cancel();
                (self.settle(child_wait.await)?, Some(signal))
            }
        };

        match (state, received) {
            (ChildState::Killed, Some(signal)) => Ok(Outcome::Interrupted(signal)),
            (ChildState::Killed, None) => Err(Error::supervision(
                &self.program,
                "child was killed without an interrupt",
            )),
            (ChildState::Exited(status), _) if status.success() => {
                info!("`{}` finished", self.program);
                Ok(Outcome::Exited)
            }
            (ChildState::Exited(status), Some(signal)) => {
                debug!("`{}` stopped with {status} after {signal}", self.program);
                Ok(Outcome::Interrupted(signal))
            }
            (ChildState::Exited(status), None) => {
                if let Some(signal) = interrupt_from_status(status) {
                    warn!("`{}` was stopped by {signal}", self.program);
                    return Ok(Outcome::Interrupted(signal));
                }
                match tokio::time::timeout(INTERRUPT_GRACE, &mut interrupt).await {
                    Ok(signal) => {
                        warn!("Received {signal} as `{}` stopped with {status}", self.program);
                        Ok(Outcome::Interrupted(signal))
                    }
                    Err(_) => Err(Error::child_exit(&self.program, status)),
                }
            }
        }
    }

    fn settle(
        &self,
        joined: std::result::Result<std::io::Result<ChildState>, JoinError>,
    ) -> Result<ChildState> {
        match joined {
            Ok(Ok(state)) => Ok(state),
            Ok(Err(e)) => Err(Error::supervision(&self.program, e)),
            Err(e) => Err(Error::supervision(&self.program, e)),
        }
    }
}

#[cfg(unix)]
fn interrupt_from_status(status: ExitStatus) -> Option<Interrupt> {
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(SIGINT) => Some(Interrupt::Interrupt),
        Some(SIGTERM) => Some(Interrupt::Terminate),
        _ => None,
    }
}

#[cfg(not(unix))]
fn interrupt_from_status(_status: ExitStatus) -> Option<Interrupt> {
    None
}

async fn wait_or_kill(
    mut child: Child,
    cancellation: CancellationToken,
) -> std::io::Result<ChildState> {
    tokio::select! {
        biased;
        status = child.wait() => status.map(ChildState::Exited),
        () = cancellation.cancelled() => {
            if let Some(status) = child.try_wait()? {
                return Ok(ChildState::Exited(status));
            }
            debug!("Killing child (pid {:?})", child.id());
            child.start_kill()?;
            child.wait().await?;
            Ok(ChildState::Killed)
        }
    }
}

/// SIGINT/SIGTERM listener, registered up front so no signal is missed
/// between spawning the child and waiting on it.
pub struct InterruptListener {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl InterruptListener {
    /// Registers the handlers. Must be called from inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`Error::Runtime`] if a handler cannot be registered.
    pub fn install() -> Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            Ok(Self {
                interrupt: signal(SignalKind::interrupt()).map_err(Error::Runtime)?,
                terminate: signal(SignalKind::terminate()).map_err(Error::Runtime)?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Resolves with the first interrupt delivered to this process.
    #[cfg(unix)]
    pub async fn recv(mut self) -> Interrupt {
        tokio::select! {
            Some(()) = self.interrupt.recv() => Interrupt::Interrupt,
            Some(()) = self.terminate.recv() => Interrupt::Terminate,
            else => std::future::pending().await,
        }
    }

    /// Resolves with the first interrupt delivered to this process.
    #[cfg(not(unix))]
    pub async fn recv(self) -> Interrupt {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Interrupt::Interrupt,
            Err(e) => {
                warn!("Could not listen for Ctrl-C: {e}");
                std::future::pending().await
            }
        }
    }
}
