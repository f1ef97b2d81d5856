//! Execution engine for Canary actions

pub mod actions;
pub mod executor;

pub use actions::{ResultRecord, SuccessRecord};
pub use executor::{execute, execute_action, Action, Invocation};
