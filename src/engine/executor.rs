//! Invocation dispatcher

use crate::batch::BatchRunner;
use crate::context::InvocationContext;
use crate::engine::actions::*;
use crate::error::Result;
use crate::output::RecordSink;
use std::path::PathBuf;

/// A single parsed request to the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Action(Action),
    Batch { path: PathBuf, quiet: bool },
}

/// One canary action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Process {
        path: String,
        args: Vec<String>,
    },
    File {
        action: FileAction,
        path: String,
    },
    Network {
        host: String,
        port: u16,
        protocol: Protocol,
        data: Option<String>,
    },
}

/// Execute an invocation, handing every record it produces to `sink`.
///
/// Returns the number of actions that ran.
pub fn execute<S: RecordSink>(invocation: &Invocation, ctx: &InvocationContext, sink: &mut S) -> Result<usize> {
    match invocation {
        Invocation::Batch { path, quiet } => {
            let result = BatchRunner::new(ctx.clone()).quiet(*quiet).run_file(path, sink)?;
            Ok(result.actions_executed)
        }
        Invocation::Action(action) => {
            let record = execute_action(action, ctx)?;
            sink.emit(&record)?;
            Ok(1)
        }
    }
}

/// Run one canary action and turn expected failures into failure records.
///
/// Errors outside the reportable set are returned as-is and abort the caller.
pub fn execute_action(action: &Action, ctx: &InvocationContext) -> Result<ResultRecord> {
    let outcome = match action {
        Action::Process { path, args } => spawn_and_kill(path, args, ctx),
        Action::File { action, path } => run_file_action(*action, path, ctx),
        Action::Network { host, port, protocol, data } => {
            send_packet(host, *port, *protocol, data.as_deref(), ctx)
        }
    };

    match outcome {
        Ok(record) => Ok(ResultRecord::Success(record)),
        Err(e) if e.is_reportable() => {
            log::warn!("{}", e);
            Ok(ResultRecord::failure(e.to_string()))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx() -> InvocationContext {
        InvocationContext::new(vec!["canary".into()], 5, "tester")
    }

    #[test]
    fn test_reportable_failure_becomes_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.txt").to_string_lossy().to_string();

        let record = execute_action(&Action::File { action: FileAction::Delete, path: path.clone() }, &ctx()).unwrap();

        assert_eq!(record, ResultRecord::failure(format!("file not found at {}", path)));
    }

    #[test]
    fn test_fatal_error_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no").join("parent.txt").to_string_lossy().to_string();

        let result = execute_action(&Action::File { action: FileAction::Create, path }, &ctx());
        assert!(result.is_err());
    }

    #[test]
    fn test_create_then_delete_emits_two_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x.txt").to_string_lossy().to_string();
        let mut records: Vec<ResultRecord> = Vec::new();

        for action in [FileAction::Create, FileAction::Delete] {
            execute(&Invocation::Action(Action::File { action, path: path.clone() }), &ctx(), &mut records).unwrap();
        }

        let activities: Vec<FileAction> = records
            .iter()
            .map(|r| match r {
                ResultRecord::Success(SuccessRecord { details: Some(ActivityDetails::File(d)), .. }) => d.activity,
                other => panic!("unexpected record {:?}", other),
            })
            .collect();
        assert_eq!(activities, [FileAction::Create, FileAction::Delete]);
        assert!(!std::path::Path::new(&path).exists());
    }

    #[test]
    fn test_missing_executable_is_failure_record() {
        let action = Action::Process { path: "/nonexistent/canary".into(), args: vec![] };
        let record = execute_action(&action, &ctx()).unwrap();
        assert!(!record.is_success());
    }
}
