use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};

use crate::models::DeviceGroupRecord;

pub const CSV_HEADER: [&str; 7] = [
    "assetName",
    "serialNumber",
    "primaryUser",
    "groupNameProvisioning",
    "groupNameDept",
    "groupNameBuilding",
    "groupNameCombo",
];

/// CSV sink for the derived records. The header row is written and flushed when the
/// writer is constructed, so a run that aborts before producing data still leaves a
/// header-only file on disk.
pub struct CsvReport<W: Write> {
    writer: Writer<W>,
}

impl CsvReport<BufWriter<File>> {
    /// Creates (truncating) the output file. Called before any network activity.
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("create output {}", path.display()))?;
        Self::from_writer(BufWriter::new(file))
    }
}

impl<W: Write> CsvReport<W> {
    pub fn from_writer(sink: W) -> Result<Self> {
        // Header is written explicitly so it exists on every failure path; the
        // serializer must not emit a second one.
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
        writer.write_record(CSV_HEADER).context("write CSV header")?;
        writer.flush().context("flush CSV header")?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, record: &DeviceGroupRecord) -> Result<()> {
        self.writer.serialize(record).context("write CSV row")
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().context("flush CSV output")
    }
}
