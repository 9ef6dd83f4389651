pub mod csv;

use std::path::{Path, PathBuf};

use vendsynth_core::TableId;

use crate::errors::GenerationError;
use crate::value::GeneratedValue;

/// Sink for finished tables.
pub trait TableWriter {
    /// Write one table and return the bytes written.
    fn write(
        &mut self,
        table: TableId,
        columns: &[&str],
        rows: &[Vec<GeneratedValue>],
    ) -> Result<u64, GenerationError>;
}

/// Writes one CSV file per table into a directory.
#[derive(Debug, Clone)]
pub struct CsvDirectoryWriter {
    dir: PathBuf,
    null_marker: String,
}

impl CsvDirectoryWriter {
    pub fn new(dir: &Path, null_marker: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            null_marker: null_marker.to_string(),
        }
    }

    pub fn path_for(&self, table: TableId) -> PathBuf {
        self.dir.join(table.file_name())
    }
}

impl TableWriter for CsvDirectoryWriter {
    fn write(
        &mut self,
        table: TableId,
        columns: &[&str],
        rows: &[Vec<GeneratedValue>],
    ) -> Result<u64, GenerationError> {
        self::csv::write_table_csv(&self.path_for(table), columns, rows, &self.null_marker)
    }
}
