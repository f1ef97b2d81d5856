//! Batch runner for executing descriptor files

use std::path::Path;

use crate::batch::descriptor::{load_descriptors, BatchDescriptor};
use crate::context::InvocationContext;
use crate::engine::executor::{execute_action, Action};
use crate::engine::ResultRecord;
use crate::error::Result;
use crate::output::RecordSink;

/// Result of batch execution
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Records from every executed entry, in file order
    pub records: Vec<ResultRecord>,
    /// Total entries executed
    pub actions_executed: usize,
}

impl BatchResult {
    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| !r.is_success()).count()
    }
}

/// Runs batch entries one after another
pub struct BatchRunner {
    /// Identity reported by file and network entries
    ctx: InvocationContext,
    /// Keep records out of the sink
    quiet: bool,
}

impl BatchRunner {
    pub fn new(ctx: InvocationContext) -> Self {
        Self { ctx, quiet: false }
    }

    /// Suppress per-entry output
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Load and run a batch file
    pub fn run_file<S: RecordSink>(&self, path: &Path, sink: &mut S) -> Result<BatchResult> {
        let descriptors = load_descriptors(path)?;
        log::info!("Loaded {} entries from {}", descriptors.len(), path.display());
        self.run(descriptors, sink)
    }

    /// Run parsed descriptors in order.
    ///
    /// A failure record does not stop the batch; a fatal error does.
    pub fn run<S: RecordSink>(&self, descriptors: Vec<BatchDescriptor>, sink: &mut S) -> Result<BatchResult> {
        let total = descriptors.len();
        let mut result = BatchResult::default();

        for (i, descriptor) in descriptors.into_iter().enumerate() {
            let action = Action::from(descriptor);
            log::info!("[{}/{}] {:?}", i + 1, total, action);

            let record = execute_action(&action, &self.ctx)?;
            result.actions_executed += 1;

            if !self.quiet {
                sink.emit(&record)?;
            }
            result.records.push(record);
        }

        log::info!(
            "Batch complete: {} executed, {} failed",
            result.actions_executed,
            result.failures()
        );
        Ok(result)
    }
}
