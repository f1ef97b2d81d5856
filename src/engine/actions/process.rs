//! Process spawn-and-kill action

use crate::context::InvocationContext;
use crate::engine::actions::{now_timestamp, SuccessRecord};
use crate::error::{CanaryError, Result};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::io;
use std::process::{Child, Command, Stdio};

/// Start `path` with `args`, terminate it straight away and wait for it.
///
/// The record describes the spawned process, not the caller. Termination
/// racing the child's own exit is not an error.
pub fn spawn_and_kill(path: &str, args: &[String], ctx: &InvocationContext) -> Result<SuccessRecord> {
    let started = now_timestamp();

    let mut child = Command::new(path)
        .args(args)
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| classify_spawn_error(e, path))?;

    let pid = child.id();
    log::debug!("Spawned {} (PID {})", path, pid);

    terminate(&child)?;
    let status = child.wait()?;
    log::debug!("PID {} exited: {}", pid, status);

    Ok(SuccessRecord {
        timestamp: started,
        username: ctx.username.clone(),
        process_name: path.to_string(),
        process_command: command_line(path, args),
        process_id: pid,
        details: None,
    })
}

fn command_line(path: &str, args: &[String]) -> String {
    std::iter::once(path)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn classify_spawn_error(err: io::Error, path: &str) -> CanaryError {
    match err.kind() {
        io::ErrorKind::NotFound => CanaryError::ExecutableNotFound(path.to_string()),
        io::ErrorKind::PermissionDenied => CanaryError::ExecutePermissionDenied(path.to_string()),
        _ => CanaryError::IoError(err),
    }
}

/// Ask the child to exit with SIGTERM.
fn terminate(child: &Child) -> Result<()> {
    // The child has not been reaped yet, so its pid cannot have been reused.
    match kill(Pid::from_raw(child.id() as i32), Signal::SIGTERM) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(CanaryError::IoError(errno.into())),
    }
}
