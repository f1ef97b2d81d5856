//! Canary - emit benign, observable OS events
//!
//! Canary spawns and kills processes, touches files and sends packets so that
//! a monitoring pipeline has something to detect, and describes each event as
//! a JSON result record.
//!
//! # Example
//!
//! ```no_run
//! use canary::{execute, Action, FileAction, Invocation, InvocationContext, JsonLines};
//!
//! let ctx = InvocationContext::from_env();
//! let invocation = Invocation::Action(Action::File {
//!     action: FileAction::Create,
//!     path: "/tmp/canary.txt".to_string(),
//! });
//! let mut sink = JsonLines::new(std::io::stdout());
//! execute(&invocation, &ctx, &mut sink).unwrap();
//! ```

pub mod batch;
pub mod cli;
pub mod context;
pub mod engine;
pub mod error;
pub mod output;

pub use batch::{BatchResult, BatchRunner};
pub use context::InvocationContext;
pub use engine::actions::{FileAction, Protocol};
pub use engine::{execute, execute_action, Action, Invocation, ResultRecord, SuccessRecord};
pub use error::{CanaryError, Result};
pub use output::{format_json, JsonLines, RecordSink};
