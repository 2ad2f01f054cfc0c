use crate::error::{Result, Tmy2Error};
use crate::extractor::header::StationRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Column names of the summary CSV.
pub const CSV_HEADER: [&str; 3] = ["file_id", "lat", "lon"];

/// Writes station rows to the summary CSV.
///
/// The header row is written on creation so that a run over an empty
/// directory still produces a valid file.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl SummaryWriter<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Self::from_writer(file)
    }
}

impl<W: Write> SummaryWriter<W> {
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);

        writer.write_record(CSV_HEADER)?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn write_record(&mut self, record: &StationRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| Tmy2Error::Io(e.into_error()))
    }
}

/// A file left out of the CSV because its header could not be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub input_directory: PathBuf,
    pub output_file: PathBuf,
    pub files_found: usize,
    pub rows_written: usize,
    pub skipped: Vec<SkippedFile>,
    pub duration: Duration,
    pub generated_at: DateTime<Utc>,
}

impl SummaryReport {
    pub fn new(input_directory: PathBuf, output_file: PathBuf, files_found: usize) -> Self {
        Self {
            input_directory,
            output_file,
            files_found,
            rows_written: 0,
            skipped: Vec::new(),
            duration: Duration::ZERO,
            generated_at: Utc::now(),
        }
    }

    pub fn add_skipped<F: Into<String>, R: Into<String>>(&mut self, filename: F, reason: R) {
        self.skipped.push(SkippedFile {
            filename: filename.into(),
            reason: reason.into(),
        });
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
