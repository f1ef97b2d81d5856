//! Action implementations (canary events)

pub mod files;
pub mod network;
pub mod process;

pub use files::{run_file_action, FileAction};
pub use network::{send_packet, Protocol};
pub use process::spawn_and_kill;

use crate::context::InvocationContext;
use serde::Serialize;

/// Outcome of a single canary action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultRecord {
    Success(SuccessRecord),
    Failure { reason: String },
}

impl ResultRecord {
    pub fn failure(reason: impl Into<String>) -> Self {
        ResultRecord::Failure { reason: reason.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultRecord::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessRecord {
    pub timestamp: i64,
    pub username: String,
    pub process_name: String,
    pub process_command: String,
    pub process_id: u32,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<ActivityDetails>,
}

impl SuccessRecord {
    /// A record that reports the invoking tool as the acting process
    pub fn from_context(timestamp: i64, ctx: &InvocationContext, details: ActivityDetails) -> Self {
        Self {
            timestamp,
            username: ctx.username.clone(),
            process_name: ctx.program_name.clone(),
            process_command: ctx.command_line(),
            process_id: ctx.process_id,
            details: Some(details),
        }
    }
}

/// Action-specific fields appended to a success record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActivityDetails {
    File(FileDetails),
    Network(NetworkDetails),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDetails {
    pub path: String,
    pub activity: FileAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDetails {
    pub destination: String,
    pub source: String,
    pub size: usize,
    pub protocol: Protocol,
}

/// Seconds since the epoch, taken when an action starts
pub(crate) fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
