use crate::{MergeError, MergeResult, MergedRow};
use std::io::Write;
use std::path::Path;

pub const OUTPUT_HEADER: [&str; 4] = ["Date", "VeryActiveMinutes", "WeightKg", "User_ID"];

/// Append-only accumulator of merged rows across users.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingTable {
    rows: Vec<MergedRow>,
}

impl TrainingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one user's rows after every previously appended user.
    pub fn append_user(&mut self, rows: Vec<MergedRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV with a header row and no index column.
    pub fn write_csv<W: Write>(&self, writer: W) -> MergeResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        // An empty table still gets its header; serialize only emits it with a row.
        if self.rows.is_empty() {
            wtr.write_record(OUTPUT_HEADER).map_err(csv_write_error)?;
        }
        for row in &self.rows {
            wtr.serialize(row).map_err(csv_write_error)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the table to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> MergeResult<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))?;
        tracing::info!(path = %path.display(), rows = self.len(), "saved training table");
        Ok(())
    }
}

fn csv_write_error(e: csv::Error) -> MergeError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => MergeError::Io(io),
        other => MergeError::Io(std::io::Error::other(format!("csv write failed: {other:?}"))),
    }
}
