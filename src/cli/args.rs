//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;

use crate::engine::actions::{FileAction, Protocol};
use crate::engine::{Action, Invocation};

#[derive(Parser, Debug)]
#[command(name = "canary")]
#[command(author, version, about = "OS Event Emitter", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Log level for diagnostics written to stderr
    #[arg(long, global = true, env = "CANARY_LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Execute a series of commands from a JSON file.
    Batch {
        /// Path to a JSON file with one or more commands to execute.
        path: PathBuf,

        /// Do not print a record for each entry
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run an executable and immediately terminate it.
    Process {
        /// Full path to the executable.
        path: String,

        /// Optional arguments to pass to the executable.
        #[arg(short, long, num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Perform actions on a file.
    File {
        /// Action to take on the file.
        action: FileAction,

        /// Path to the file.
        path: String,
    },

    /// Connect to an endpoint and send a request.
    Network {
        /// Hostname of the request recipient.
        host: String,

        /// Port of the request recipient.
        port: u16,

        /// Data to send to the recipient.
        #[arg(short, long)]
        data: Option<String>,

        /// Protocol used to send the request.
        #[arg(short, long, value_enum, default_value_t = Protocol::Tcp)]
        protocol: Protocol,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Args {
    /// Effective log filter, with --verbose raising it to at least debug
    pub fn level_filter(&self) -> LevelFilter {
        let level = LevelFilter::from(self.log_level);
        if self.verbose {
            level.max(LevelFilter::Debug)
        } else {
            level
        }
    }

    pub fn invocation(&self) -> Invocation {
        match &self.command {
            SubCommand::Batch { path, quiet } => Invocation::Batch {
                path: path.clone(),
                quiet: *quiet,
            },
            SubCommand::Process { path, args } => Invocation::Action(Action::Process {
                path: path.clone(),
                args: args.clone(),
            }),
            SubCommand::File { action, path } => Invocation::Action(Action::File {
                action: *action,
                path: path.clone(),
            }),
            SubCommand::Network { host, port, data, protocol } => Invocation::Action(Action::Network {
                host: host.clone(),
                port: *port,
                protocol: *protocol,
                data: data.clone(),
            }),
        }
    }
}
