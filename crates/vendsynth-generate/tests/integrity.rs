use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::RngCore;
use regex::Regex;
use vendsynth_core::{
    ConfigError, DatasetConfig, IdFormat, IntRange, RoleCategory, SubRecordSize, TableId,
};
use vendsynth_generate::entities::Employee;
use vendsynth_generate::{
    Dataset, GenerateOptions, GenerationEngine, GenerationError, TextProvider,
};

fn config_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs")
        .join(name)
}

/// Default record pool and sub-record sizes with the other tables scaled
/// down.
fn record_heavy_config() -> DatasetConfig {
    let mut config = DatasetConfig::default();
    config.manufacturers.count = 20;
    config.employees.count = 50;
    config.customers.count = 50;
    config.machines.count = 50;
    config.stock.count = 50;
    config
}

fn generate(config: &DatasetConfig) -> Dataset {
    vendsynth_generate::generate(config).expect("generate dataset")
}

fn assert_unique_keys(dataset: &Dataset, table: TableId) {
    let keys = dataset.keys(table);
    let distinct: HashSet<&String> = keys.iter().collect();
    assert_eq!(distinct.len(), keys.len(), "duplicate keys in {table}");
}

#[test]
fn identifiers_are_unique_in_every_table() {
    let dataset = generate(&record_heavy_config());
    for table in TableId::ALL {
        assert_unique_keys(&dataset, table);
    }
}

#[test]
fn record_pool_splits_into_disjoint_sub_tables() {
    let dataset = generate(&record_heavy_config());
    assert_eq!(dataset.records.len(), 5000);
    assert_eq!(dataset.payment_records.len(), 1500);
    assert_eq!(dataset.maintenance_records.len(), 1500);
    assert_eq!(dataset.restock_records.len(), 2000);

    let pool: HashSet<String> = dataset.keys(TableId::Record).into_iter().collect();
    let payment: HashSet<String> = dataset.keys(TableId::PaymentRecord).into_iter().collect();
    let maintenance: HashSet<String> = dataset
        .keys(TableId::MaintenanceRecord)
        .into_iter()
        .collect();
    let restock: HashSet<String> = dataset.keys(TableId::RestockRecord).into_iter().collect();

    for subset in [&payment, &maintenance, &restock] {
        assert!(subset.is_subset(&pool));
    }
    assert!(payment.is_disjoint(&maintenance));
    assert!(payment.is_disjoint(&restock));
    assert!(maintenance.is_disjoint(&restock));

    let covered: HashSet<String> = payment
        .iter()
        .chain(&maintenance)
        .chain(&restock)
        .cloned()
        .collect();
    assert_eq!(covered, pool);
}

#[test]
fn completion_dates_follow_request_dates() {
    let dataset = generate(&record_heavy_config());
    let mut completed = 0;
    for record in &dataset.records {
        if let Some(date_completed) = record.date_completed {
            assert!(date_completed >= record.date_requested);
            completed += 1;
        }
    }
    assert!(completed > 0);
    assert!(completed < dataset.records.len());
}

#[test]
fn manufacturers_supply_generated_models() {
    let dataset = generate(&record_heavy_config());
    let models: HashSet<String> = dataset.keys(TableId::Model).into_iter().collect();
    for manufacturer in &dataset.manufacturers {
        assert!(models.contains(&manufacturer.supply_type));
    }
}

#[test]
fn split_roles_fixture_assigns_exact_role_counts() {
    let config = DatasetConfig::from_path(&config_path("split_roles.toml")).expect("fixture");
    let dataset = generate(&config);
    assert_eq!(dataset.employees.len(), 500);

    let (managers, technicians): (Vec<&Employee>, Vec<&Employee>) = dataset
        .employees
        .iter()
        .partition(|employee| employee.category() == RoleCategory::Management);
    assert_eq!(managers.len(), 200);
    assert_eq!(technicians.len(), 300);

    let manager_license = Regex::new(r"^MGR-\d{4}$").expect("regex");
    let technician_license = Regex::new(r"^TEC-\d{5}$").expect("regex");
    let mut licenses = HashSet::new();
    for employee in &managers {
        let license = employee.attributes.license_number().expect("manager license");
        assert!(manager_license.is_match(license), "{license}");
        assert!(licenses.insert(license.to_string()));
    }
    for employee in &technicians {
        let license = employee.attributes.license_number().expect("technician license");
        assert!(technician_license.is_match(license), "{license}");
        assert!(licenses.insert(license.to_string()));
    }

    assert_eq!(dataset.management.len(), 200);
    assert_eq!(dataset.maintenance.len(), 300);

    let supervisors: Vec<&&Employee> = technicians
        .iter()
        .filter(|employee| employee.status == "supervisor")
        .collect();
    assert_eq!(supervisors.len(), 1);
    assert!(
        managers
            .iter()
            .all(|employee| employee.status == config.employees.status.default)
    );
    let staff = technicians
        .iter()
        .filter(|employee| employee.status == "staff")
        .count();
    assert_eq!(staff, 299);
}

#[test]
fn split_roles_fixture_sizes_payment_by_share() {
    let config = DatasetConfig::from_path(&config_path("split_roles.toml")).expect("fixture");
    let dataset = generate(&config);
    assert_eq!(dataset.payment_records.len(), 1500);
    assert_eq!(dataset.maintenance_records.len(), 1500);
    assert_eq!(dataset.restock_records.len(), 2000);
}

#[test]
fn exactly_one_technician_is_supervisor() {
    let config = record_heavy_config();
    let supervisor_status = config.employees.status.supervisor.clone();
    let output = GenerationEngine::new(GenerateOptions::default())
        .generate(&config)
        .expect("generate");

    let supervisors: Vec<&Employee> = output
        .dataset
        .employees
        .iter()
        .filter(|employee| employee.status == supervisor_status)
        .collect();
    assert_eq!(supervisors.len(), 1);
    assert_eq!(supervisors[0].category(), RoleCategory::Technician);
    assert_eq!(output.supervisor.as_deref(), Some(supervisors[0].employee_id.as_str()));
}

#[test]
fn default_roles_keep_category_attributes_apart() {
    let dataset = generate(&record_heavy_config());
    let license = Regex::new(r"^LIC-\d{5}$").expect("regex");

    let employee_ids: HashSet<&str> = dataset
        .employees
        .iter()
        .map(|employee| employee.employee_id.as_str())
        .collect();
    let management: HashSet<&str> = dataset
        .management
        .iter()
        .map(|row| row.employee_id.as_str())
        .collect();
    let maintenance: HashSet<&str> = dataset
        .maintenance
        .iter()
        .map(|row| row.employee_id.as_str())
        .collect();

    assert!(management.is_disjoint(&maintenance));
    assert_eq!(management.len() + maintenance.len(), employee_ids.len());
    for row in &dataset.maintenance {
        assert!(license.is_match(&row.license_number), "{}", row.license_number);
    }
    for employee in &dataset.employees {
        match employee.category() {
            RoleCategory::Management => {
                assert!(management.contains(employee.employee_id.as_str()));
                assert!(employee.attributes.license_number().is_none());
            }
            RoleCategory::Technician => {
                assert!(maintenance.contains(employee.employee_id.as_str()));
                assert!(employee.attributes.seniority_level().is_none());
            }
        }
    }
}

struct FailingText;

impl TextProvider for FailingText {
    fn first_name(&self, _rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        Err(GenerationError::Provider("names unavailable".to_string()))
    }

    fn last_name(&self, _rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        Err(GenerationError::Provider("names unavailable".to_string()))
    }

    fn email(
        &self,
        _domain: Option<&str>,
        _rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        Ok("someone@example.com".to_string())
    }

    fn street_address(&self, _rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        Ok("1 Main Street".to_string())
    }

    fn address(&self, _rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        Ok("1 Main Street, Springfield".to_string())
    }

    fn sentence(
        &self,
        _word_count: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        Ok("Refill".to_string())
    }

    fn catch_phrase(&self, _rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        Ok("Crunchy".to_string())
    }
}

#[test]
fn text_provider_failures_abort_generation() {
    let engine = GenerationEngine::new(GenerateOptions::default())
        .with_text_provider(Box::new(FailingText));
    let err = engine
        .generate(&record_heavy_config())
        .expect_err("provider failure");
    assert!(matches!(err, GenerationError::Provider(_)));
}

#[test]
fn overlapping_role_id_formats_fail_before_generation() {
    let mut config = record_heavy_config();
    config.employees.count = 10;
    config.employees.roles[0].count = Some(5);
    config.employees.roles[0].id = Some(IdFormat::Numeric { min: 1, max: 10 });
    config.employees.roles[1].count = Some(5);
    config.employees.roles[1].id = Some(IdFormat::Numeric { min: 1, max: 5 });

    for seed in 0..5 {
        config.seed = seed;
        let err = GenerationEngine::new(GenerateOptions::default())
            .generate(&config)
            .expect_err("overlapping id formats");
        assert!(
            matches!(err, GenerationError::Config(ConfigError::RoleRule(_))),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn unreachable_completion_dates_fail_validation() {
    let mut config = record_heavy_config();
    config.records.count = 10;
    config.records.payment.size = SubRecordSize::Count(3);
    config.records.maintenance.size = SubRecordSize::Count(3);
    config.records.restock.size = SubRecordSize::Count(3);
    config.records.completion_days =
        IntRange::new(1_000_000_000_000_000, 1_000_000_000_000_000);

    let err = GenerationEngine::new(GenerateOptions::default())
        .generate(&config)
        .expect_err("completion overflows");
    assert!(matches!(
        err,
        GenerationError::Config(ConfigError::InvalidRange { .. })
    ));
}
