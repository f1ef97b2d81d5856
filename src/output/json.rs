//! JSON output formatting

use crate::engine::ResultRecord;
use crate::error::Result;
use std::io::Write;

/// Render a record as a single line of JSON
pub fn format_json(record: &ResultRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Destination for result records as they are produced
pub trait RecordSink {
    fn emit(&mut self, record: &ResultRecord) -> Result<()>;
}

/// Writes one JSON document per line
pub struct JsonLines<W: Write> {
    writer: W,
}

impl<W: Write> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLines<W> {
    fn emit(&mut self, record: &ResultRecord) -> Result<()> {
        writeln!(self.writer, "{}", format_json(record)?)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects records in memory
impl RecordSink for Vec<ResultRecord> {
    fn emit(&mut self, record: &ResultRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}
