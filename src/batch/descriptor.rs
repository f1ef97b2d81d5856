//! Batch file descriptors

use crate::engine::actions::{FileAction, Protocol};
use crate::engine::Action;
use crate::error::{CanaryError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One entry of a batch file, keyed by `command`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum BatchDescriptor {
    Process {
        path: String,
        #[serde(default)]
        args: Option<Vec<String>>,
    },
    File {
        action: FileAction,
        path: String,
    },
    Network {
        host: String,
        port: u16,
        #[serde(default)]
        protocol: Option<Protocol>,
        #[serde(default)]
        data: Option<String>,
    },
}

impl From<BatchDescriptor> for Action {
    fn from(descriptor: BatchDescriptor) -> Self {
        match descriptor {
            BatchDescriptor::Process { path, args } => Action::Process {
                path,
                args: args.unwrap_or_default(),
            },
            BatchDescriptor::File { action, path } => Action::File { action, path },
            BatchDescriptor::Network { host, port, protocol, data } => Action::Network {
                host,
                port,
                protocol: protocol.unwrap_or_default(),
                // An empty string means no payload, same as leaving it out
                data: data.filter(|d| !d.is_empty()),
            },
        }
    }
}

/// Parse the contents of a batch file
pub fn parse_descriptors(content: &str) -> serde_json::Result<Vec<BatchDescriptor>> {
    serde_json::from_str(content)
}

/// Read and parse a batch file in full
pub fn load_descriptors(path: &Path) -> Result<Vec<BatchDescriptor>> {
    let content = fs::read_to_string(path)?;
    parse_descriptors(&content).map_err(|source| CanaryError::BatchParse {
        path: path.to_path_buf(),
        source,
    })
}
