use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use vendsynth_core::{DatasetConfig, TableId, build_dependency_report, validate_config};

use crate::binder::{ForeignContext, InMemoryForeignContext, route_employees};
use crate::dataset::Dataset;
use crate::errors::GenerationError;
use crate::factory::FactoryContext;
use crate::factory::catalog::{build_manufacturers, build_models, build_stock};
use crate::factory::customers::build_customers;
use crate::factory::fleet::build_machines;
use crate::factory::records::{
    build_maintenance_records, build_payment_records, build_records, build_restock_records,
};
use crate::factory::staff::{build_employees, elevate_supervisor};
use crate::model::{GenerateOptions, GenerationReport, TableReport};
use crate::output::{CsvDirectoryWriter, TableWriter};
use crate::partition::partition;
use crate::text::{FakeTextProvider, TextProvider};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub run_dir: PathBuf,
    pub report: GenerationReport,
}

/// In-memory dataset with per-table statistics.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub dataset: Dataset,
    pub tables: Vec<TableReport>,
    pub supervisor: Option<String>,
    pub unassigned_records: u64,
}

/// Entry point for generating datasets from a [`DatasetConfig`].
pub struct GenerationEngine {
    options: GenerateOptions,
    text: Box<dyn TextProvider>,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            text: Box::new(FakeTextProvider),
        }
    }

    /// Replace the text provider, e.g. with a stub in tests.
    pub fn with_text_provider(mut self, text: Box<dyn TextProvider>) -> Self {
        self.text = text;
        self
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Validate `config` and build every table in dependency order. Nothing
    /// is written to disk.
    pub fn generate(&self, config: &DatasetConfig) -> Result<GenerationOutput, GenerationError> {
        validate_config(config)?;

        let graph = build_dependency_report(&TableId::ALL);
        let order = match graph.topo_order {
            Some(order) => order,
            None => return Err(GenerationError::Graph(graph.cycle.unwrap_or_default())),
        };

        let mut state = BuildState::default();
        let mut tables = Vec::with_capacity(order.len());

        for table in order {
            let table_start = Instant::now();
            info!(table = %table, "generating table");

            let mut ctx = FactoryContext::new(
                table,
                hash_seed(config.seed, table.as_str()),
                self.text.as_ref(),
                self.options.max_attempts_per_id,
            );
            let rows_requested = state.build_table(table, config, &mut ctx)?;
            let rows_generated = state.dataset.row_count(table) as u64;

            if has_dependents(table) {
                state
                    .foreign
                    .ingest_table(table, state.dataset.keys(table));
            }

            let report = TableReport {
                table,
                file: table.file_name().to_string(),
                rows_requested,
                rows_generated,
                retries: ctx.retries,
                bytes_written: 0,
                duration_ms: table_start.elapsed().as_millis() as u64,
            };
            info!(
                table = %table,
                rows_generated = report.rows_generated,
                retries = report.retries,
                duration_ms = report.duration_ms,
                "table generated"
            );
            tables.push(report);
        }

        Ok(GenerationOutput {
            dataset: state.dataset,
            tables,
            supervisor: state.supervisor,
            unassigned_records: state.unassigned_records,
        })
    }

    /// Generate and export a complete run directory.
    ///
    /// Files are staged in a hidden directory that is renamed to
    /// `{out_dir}/{timestamp}__run_{run_id}` only once every file is written.
    /// On failure the staging directory is removed.
    pub fn run(&self, config: &DatasetConfig) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string();
        let run_dir = self
            .options
            .out_dir
            .join(format!("{timestamp}__run_{run_id}"));
        let staging_dir = self.options.out_dir.join(format!(".staging__run_{run_id}"));

        info!(
            run_id = %run_id,
            seed = config.seed,
            tables = TableId::ALL.len(),
            "generation started"
        );

        let output = match self.generate(config) {
            Ok(output) => output,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                return Err(err);
            }
        };

        let mut report = GenerationReport::new(run_id.clone(), config.seed);
        report.retries_total = output.tables.iter().map(|table| table.retries).sum();
        report.supervisor = output.supervisor.clone();
        report.unassigned_records = output.unassigned_records;
        report.tables = output.tables.clone();

        let exported = export(config, &output.dataset, &staging_dir, &mut report, start)
            .and_then(|()| std::fs::rename(&staging_dir, &run_dir).map_err(GenerationError::from));

        match exported {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    tables = report.tables.len(),
                    duration_ms = report.duration_ms,
                    bytes_written = report.bytes_written,
                    "generation completed"
                );
                Ok(GenerationResult { run_dir, report })
            }
            Err(err) => {
                if staging_dir.exists() {
                    if let Err(cleanup) = std::fs::remove_dir_all(&staging_dir) {
                        warn!(
                            path = %staging_dir.display(),
                            error = %cleanup,
                            "staging cleanup failed"
                        );
                    }
                }
                warn!(run_id = %run_id, error = %err, "export failed");
                Err(err)
            }
        }
    }
}

/// Write every table plus the resolved config and the run report into
/// `dir`.
fn export(
    config: &DatasetConfig,
    dataset: &Dataset,
    dir: &Path,
    report: &mut GenerationReport,
    start: Instant,
) -> Result<(), GenerationError> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(
        dir.join("resolved_config.json"),
        serde_json::to_vec_pretty(config)?,
    )?;

    let mut writer = CsvDirectoryWriter::new(dir, &config.null_marker);
    for table in TableId::ALL {
        let rows = dataset.rows(table);
        let bytes = writer.write(table, table.columns(), &rows)?;
        report.bytes_written += bytes;
        if let Some(entry) = report.table_mut(table) {
            entry.bytes_written = bytes;
        }
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    std::fs::write(
        dir.join("generation_report.json"),
        serde_json::to_vec_pretty(report)?,
    )?;
    Ok(())
}

#[derive(Default)]
struct BuildState {
    dataset: Dataset,
    foreign: InMemoryForeignContext,
    /// Payment, maintenance and restock key sets, in that order.
    partitions: Option<Vec<Vec<String>>>,
    supervisor: Option<String>,
    unassigned_records: u64,
}

impl BuildState {
    /// Build one table into the dataset, returning the requested row count.
    fn build_table(
        &mut self,
        table: TableId,
        config: &DatasetConfig,
        ctx: &mut FactoryContext<'_>,
    ) -> Result<u64, GenerationError> {
        let requested = match table {
            TableId::Model => {
                self.dataset.models = build_models(&config.models, ctx)?;
                config.models.count
            }
            TableId::Manufacturer => {
                self.dataset.manufacturers =
                    build_manufacturers(&config.manufacturers, &self.foreign, ctx)?;
                config.manufacturers.count
            }
            TableId::Employee => {
                let employees = &config.employees;
                self.dataset.employees = build_employees(employees, ctx)?;
                if employees.elevate_supervisor {
                    self.supervisor = elevate_supervisor(
                        &mut self.dataset.employees,
                        &employees.status.supervisor,
                        &mut ctx.rng,
                    );
                    if self.supervisor.is_none() && employees.count > 0 {
                        warn!("no technician-category employee to elevate");
                    }
                }
                employees.count
            }
            TableId::Management => {
                let (management, _) = route_employees(&self.dataset.employees);
                let keys: Vec<String> = management
                    .iter()
                    .map(|row| row.employee_id.clone())
                    .collect();
                self.foreign
                    .ensure_all(TableId::Management, TableId::Employee, &keys)?;
                self.dataset.management = management;
                keys.len() as u64
            }
            TableId::Maintenance => {
                let (_, maintenance) = route_employees(&self.dataset.employees);
                let keys: Vec<String> = maintenance
                    .iter()
                    .map(|row| row.employee_id.clone())
                    .collect();
                self.foreign
                    .ensure_all(TableId::Maintenance, TableId::Employee, &keys)?;
                self.dataset.maintenance = maintenance;
                keys.len() as u64
            }
            TableId::Customer => {
                self.dataset.customers = build_customers(&config.customers, ctx)?;
                config.customers.count
            }
            TableId::VendingMachine => {
                self.dataset.machines = build_machines(&config.machines, ctx)?;
                config.machines.count
            }
            TableId::Stock => {
                self.dataset.stock = build_stock(&config.stock, ctx)?;
                config.stock.count
            }
            TableId::Record => {
                let records = &config.records;
                self.dataset.records = build_records(records, ctx)?;
                let pool: Vec<String> = self
                    .dataset
                    .records
                    .iter()
                    .map(|record| record.record_id.clone())
                    .collect();
                let sizes = [
                    records.payment.size.resolve(records.count),
                    records.maintenance.size.resolve(records.count),
                    records.restock.size.resolve(records.count),
                ];
                let subsets = partition(&pool, &sizes, &mut ctx.rng)?;
                let assigned: usize = subsets.iter().map(Vec::len).sum();
                self.unassigned_records = (pool.len() - assigned) as u64;
                self.partitions = Some(subsets);
                records.count
            }
            TableId::PaymentRecord => {
                let keys = partition_keys(&self.partitions, table, 0)?;
                self.dataset.payment_records =
                    build_payment_records(&config.records.payment, keys, &self.foreign, ctx)?;
                keys.len() as u64
            }
            TableId::MaintenanceRecord => {
                let keys = partition_keys(&self.partitions, table, 1)?;
                self.dataset.maintenance_records = build_maintenance_records(
                    &config.records.maintenance,
                    keys,
                    &self.foreign,
                    ctx,
                )?;
                keys.len() as u64
            }
            TableId::RestockRecord => {
                let keys = partition_keys(&self.partitions, table, 2)?;
                self.dataset.restock_records =
                    build_restock_records(&config.records.restock, keys, &self.foreign, ctx)?;
                keys.len() as u64
            }
        };
        Ok(requested)
    }
}

fn partition_keys(
    partitions: &Option<Vec<Vec<String>>>,
    table: TableId,
    index: usize,
) -> Result<&[String], GenerationError> {
    partitions
        .as_ref()
        .and_then(|subsets| subsets.get(index))
        .map(Vec::as_slice)
        .ok_or_else(|| GenerationError::ReferentialViolation {
            table,
            message: "record pool has not been partitioned".to_string(),
        })
}

fn has_dependents(table: TableId) -> bool {
    TableId::ALL
        .iter()
        .any(|child| child.parents().contains(&table))
}

/// Derive a per-table seed so each table's draws are independent of the
/// others'.
fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
