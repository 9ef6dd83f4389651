use thiserror::Error;

use vendsynth_core::{ConfigError, TableId};

/// Errors emitted by the generation engine. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Resampling gave up before finding an unused value.
    #[error("{table}: no unused {what} after {attempts} attempts")]
    RetriesExhausted {
        table: TableId,
        what: &'static str,
        attempts: u32,
    },
    /// A dependent table referenced a parent value that does not exist.
    #[error("referential violation in {table}: {message}")]
    ReferentialViolation { table: TableId, message: String },
    /// An employee's attributes do not satisfy its role's category rule.
    #[error("role rule violated for '{role}': {message}")]
    RoleRule { role: String, message: String },
    /// A row's width does not match the table's declared columns.
    #[error("{table}: row has {found} fields, expected {expected}")]
    RowShape {
        table: String,
        expected: usize,
        found: usize,
    },
    /// The text provider failed to produce a value.
    #[error("text provider error: {0}")]
    Provider(String),
    /// The table dependency graph could not be ordered.
    #[error("cyclic table dependencies: {0:?}")]
    Graph(Vec<TableId>),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
