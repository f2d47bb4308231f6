//! Compiler process launch
//!
//! The child runs without a shell and inherits stdin/stdout/stderr, so its
//! output reaches the build system untouched.

use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use crate::error::{Result, ShimError};
use crate::invocation::ResolvedCommand;

/// Exit code used when the child has no code of its own
pub const FALLBACK_EXIT_CODE: i32 = 1;

/// Run the command to completion and return the code the shim should exit with
pub fn run(command: &ResolvedCommand) -> Result<i32> {
    debug!(command = %command, "spawning compiler");

    let status = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ShimError::Spawn {
            program: command.program.to_string_lossy().into_owned(),
            source,
        })?;

    let code = exit_code(status);
    debug!(code, "compiler exited");
    Ok(code)
}

/// Map a child's status to the shim's own exit code
///
/// Signal termination maps to `128 + signo`, like a shell reports it.
#[cfg(unix)]
pub fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    if let Some(code) = status.code() {
        return code;
    }

    match status.signal() {
        Some(signo) => {
            match nix::sys::signal::Signal::try_from(signo) {
                Ok(sig) => warn!(signal = ?sig, "compiler terminated by signal"),
                Err(_) => warn!(signo, "compiler terminated by unknown signal"),
            }
            128 + signo
        }
        None => FALLBACK_EXIT_CODE,
    }
}

#[cfg(not(unix))]
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| {
        warn!("compiler exited without a status code");
        FALLBACK_EXIT_CODE
    })
}
