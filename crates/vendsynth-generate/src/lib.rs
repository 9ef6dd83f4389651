//! Generation engine for vendsynth.
//!
//! Consumes a [`vendsynth_core::DatasetConfig`] and produces a
//! referentially consistent vending-machine dataset: unique identifiers per
//! entity, role-conditioned employees, a disjoint partition of the record
//! pool, and one CSV file per table.

pub mod binder;
pub mod dataset;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod factory;
pub mod ids;
pub mod model;
pub mod output;
pub mod partition;
pub mod text;
pub mod value;

pub use dataset::Dataset;
pub use engine::{GenerationEngine, GenerationOutput, GenerationResult};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, TableReport};
pub use text::{FakeTextProvider, TextProvider};
pub use value::GeneratedValue;

/// Generate a dataset in memory with default engine options.
pub fn generate(config: &vendsynth_core::DatasetConfig) -> Result<Dataset, GenerationError> {
    GenerationEngine::new(GenerateOptions::default())
        .generate(config)
        .map(|output| output.dataset)
}
