use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use vendsynth_core::TableId;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where run directories are created.
    pub out_dir: PathBuf,
    /// Maximum draws for one unique value before the run fails.
    pub max_attempts_per_id: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            max_attempts_per_id: 100_000,
        }
    }
}

/// Summary of a generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableId,
    pub file: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub retries: u64,
    #[serde(default)]
    pub bytes_written: u64,
    pub duration_ms: u64,
}

/// Report for a generation run, written next to the CSV files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub retries_total: u64,
    /// Identifier of the employee promoted to supervisor, if any.
    pub supervisor: Option<String>,
    /// Records that belong to no sub-record table.
    pub unassigned_records: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            retries_total: 0,
            supervisor: None,
            unassigned_records: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn table_mut(&mut self, table: TableId) -> Option<&mut TableReport> {
        self.tables.iter_mut().find(|report| report.table == table)
    }
}
