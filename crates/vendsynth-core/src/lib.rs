//! Core contracts for vendsynth.
//!
//! This crate defines the canonical dataset configuration, identifier format
//! rules, the table catalog with its dependency graph, and the configuration
//! errors shared by the generator and the CLI.

pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod range;
pub mod table;
pub mod validation;

pub use config::{
    CustomerConfig, DatasetConfig, EmployeeConfig, EmployeeStatusConfig, MachineConfig,
    MaintenanceRecordConfig, ManufacturerConfig, ModelConfig, PaymentRecordConfig, RecordConfig,
    RestockRecordConfig, RoleCategory, RoleConfig, StockConfig, SubRecordSize,
};
pub use error::{ConfigError, Result};
pub use format::IdFormat;
pub use graph::{DependencyReport, DependencySummary, build_dependency_report, toposort};
pub use range::{DateWindow, IntRange, MoneyRange};
pub use table::TableId;
pub use validation::{RolePlan, validate_config};

/// Current contract version for dataset configuration files.
pub const CONFIG_VERSION: &str = "1";
