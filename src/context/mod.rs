//! Invocation context for Canary
//!
//! Handlers that report on the running tool itself (file and network actions)
//! read the caller's identity from here instead of looking at process-global
//! state, so the same handler can be driven from the CLI, a batch file or a
//! test with a fixed identity.

use std::ffi::OsString;

/// Identity of the process that is emitting canary events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Program name as invoked (argv[0])
    pub program_name: String,

    /// Full argument vector, including the program name
    pub arguments: Vec<String>,

    /// OS process id of the caller
    pub process_id: u32,

    /// Name of the invoking OS user
    pub username: String,
}

impl InvocationContext {
    /// Capture the identity of the current process
    pub fn from_env() -> Self {
        Self::from_args_os(std::env::args_os(), std::process::id(), whoami::username())
    }

    /// Build a context from raw OS arguments; entries that are not valid
    /// UTF-8 are converted lossily
    pub fn from_args_os<I>(arguments: I, process_id: u32, username: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let arguments = arguments
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Self::new(arguments, process_id, username)
    }

    pub fn new(arguments: Vec<String>, process_id: u32, username: impl Into<String>) -> Self {
        Self {
            program_name: arguments.first().cloned().unwrap_or_default(),
            arguments,
            process_id,
            username: username.into(),
        }
    }

    /// The full command line, space-joined
    pub fn command_line(&self) -> String {
        self.arguments.join(" ")
    }
}
