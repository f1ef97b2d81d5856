//! File create / modify / delete actions

use crate::context::InvocationContext;
use crate::engine::actions::{now_timestamp, ActivityDetails, FileDetails, SuccessRecord};
use crate::error::{CanaryError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Create,
    Delete,
    Modify,
}

impl FileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileAction::Create => "create",
            FileAction::Delete => "delete",
            FileAction::Modify => "modify",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            FileAction::Create => "creating",
            FileAction::Delete => "deleting",
            FileAction::Modify => "modifying",
        }
    }
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perform one file action and describe it as the invoking process
pub fn run_file_action(action: FileAction, path: &str, ctx: &InvocationContext) -> Result<SuccessRecord> {
    let started = now_timestamp();

    match action {
        FileAction::Create => {
            File::create(path).map_err(|e| classify(e, action, path))?;
        }
        FileAction::Modify => {
            let file = OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(|e| classify(e, action, path))?;
            let now = SystemTime::now();
            file.set_times(FileTimes::new().set_accessed(now).set_modified(now))
                .map_err(|e| classify(e, action, path))?;
        }
        FileAction::Delete => {
            fs::remove_file(path).map_err(|e| classify(e, action, path))?;
        }
    }

    log::debug!("{} {}", action.verb(), path);

    Ok(SuccessRecord::from_context(
        started,
        ctx,
        ActivityDetails::File(FileDetails {
            path: path.to_string(),
            activity: action,
        }),
    ))
}

fn classify(err: io::Error, action: FileAction, path: &str) -> CanaryError {
    match err.kind() {
        // A missing parent on create is not an expected outcome
        io::ErrorKind::NotFound if action != FileAction::Create => CanaryError::FileNotFound(path.to_string()),
        io::ErrorKind::PermissionDenied => CanaryError::FilePermissionDenied {
            verb: action.verb(),
            path: path.to_string(),
        },
        _ => CanaryError::IoError(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::{NamedTempFile, TempDir};

    fn ctx() -> InvocationContext {
        InvocationContext::new(vec!["canary".into(), "file".into()], 1234, "tester")
    }

    #[test]
    fn test_create_leaves_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test_canary_create.txt");
        let path_str = path.to_str().unwrap();

        let record = run_file_action(FileAction::Create, path_str, &ctx()).unwrap();

        assert!(path.is_file());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(
            record.details,
            Some(ActivityDetails::File(FileDetails { path: path_str.to_string(), activity: FileAction::Create }))
        );
        assert_eq!(record.process_id, 1234);
        assert_eq!(record.process_command, "canary file");
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "existing content").unwrap();

        run_file_action(FileAction::Create, file.path().to_str().unwrap(), &ctx()).unwrap();

        assert_eq!(fs::metadata(file.path()).unwrap().len(), 0);
    }

    #[test]
    fn test_create_with_missing_parent_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("x.txt");

        let err = run_file_action(FileAction::Create, path.to_str().unwrap(), &ctx()).unwrap_err();
        assert!(!err.is_reportable());
    }

    #[test]
    fn test_modify_advances_mtime() {
        let file = NamedTempFile::new().unwrap();
        let old = fs::metadata(file.path()).unwrap().modified().unwrap();
        std::thread::sleep(Duration::from_millis(100));

        run_file_action(FileAction::Modify, file.path().to_str().unwrap(), &ctx()).unwrap();

        let new = fs::metadata(file.path()).unwrap().modified().unwrap();
        assert!(new > old);
    }

    #[test]
    fn test_modify_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.txt");
        let path_str = path.to_str().unwrap();

        let err = run_file_action(FileAction::Modify, path_str, &ctx()).unwrap_err();

        assert!(err.is_reportable());
        assert_eq!(err.to_string(), format!("file not found at {}", path_str));
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_removes_file() {
        let file = NamedTempFile::new().unwrap();
        let (_, path) = file.keep().unwrap();

        let record = run_file_action(FileAction::Delete, path.to_str().unwrap(), &ctx()).unwrap();

        assert!(!path.exists());
        assert!(matches!(
            record.details,
            Some(ActivityDetails::File(FileDetails { activity: FileAction::Delete, .. }))
        ));
    }

    #[test]
    fn test_delete_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.txt");

        let err = run_file_action(FileAction::Delete, path.to_str().unwrap(), &ctx()).unwrap_err();
        assert!(matches!(err, CanaryError::FileNotFound(_)));
    }

    #[test]
    fn test_permission_denied_uses_action_verb() {
        let denied = || io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(
            classify(denied(), FileAction::Create, "/root/x").to_string(),
            "Permission denied creating file at /root/x"
        );
        assert_eq!(
            classify(denied(), FileAction::Modify, "/root/x").to_string(),
            "Permission denied modifying file at /root/x"
        );
        assert_eq!(
            classify(denied(), FileAction::Delete, "/root/x").to_string(),
            "Permission denied deleting file at /root/x"
        );
    }

    #[test]
    fn test_create_never_reports_not_found() {
        let err = classify(io::Error::from(io::ErrorKind::NotFound), FileAction::Create, "/a/b");
        assert!(matches!(err, CanaryError::IoError(_)));
    }
}
