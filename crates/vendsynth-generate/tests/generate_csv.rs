use std::fs;
use std::path::{Path, PathBuf};

use vendsynth_core::{ConfigError, DatasetConfig, IdFormat, SubRecordSize, TableId};
use vendsynth_generate::{GenerateOptions, GenerationEngine, GenerationError, GenerationReport};

fn small_config(seed: u64) -> DatasetConfig {
    let mut config = DatasetConfig::default();
    config.seed = seed;
    config.manufacturers.count = 20;
    config.employees.count = 40;
    config.customers.count = 30;
    config.machines.count = 25;
    config.stock.count = 30;
    config.records.count = 100;
    config.records.payment.size = SubRecordSize::Count(30);
    config.records.maintenance.size = SubRecordSize::Count(30);
    config.records.restock.size = SubRecordSize::Count(40);
    config
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "vendsynth_generate_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn engine(out_dir: &Path) -> GenerationEngine {
    GenerationEngine::new(GenerateOptions {
        out_dir: out_dir.to_path_buf(),
        ..GenerateOptions::default()
    })
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let headers = reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (headers, rows)
}

#[test]
fn run_writes_every_table_with_declared_headers() {
    let out_dir = temp_out_dir("headers");
    let config = small_config(7);
    let result = engine(&out_dir).run(&config).expect("run");

    assert!(result.run_dir.starts_with(&out_dir));
    for table in TableId::ALL {
        let path = result.run_dir.join(table.file_name());
        assert!(path.exists(), "missing {}", table.file_name());
        let (headers, rows) = read_csv(&path);
        assert_eq!(headers, table.columns(), "header of {table}");
        for row in &rows {
            assert_eq!(row.len(), table.columns().len());
        }
    }

    let (_, records) = read_csv(&result.run_dir.join(TableId::Record.file_name()));
    assert_eq!(records.len(), 100);
    assert!(result.run_dir.join("resolved_config.json").exists());

    let report_bytes =
        fs::read(result.run_dir.join("generation_report.json")).expect("read report");
    let report: GenerationReport = serde_json::from_slice(&report_bytes).expect("parse report");
    assert_eq!(report.seed, 7);
    assert_eq!(report.tables.len(), TableId::ALL.len());
    assert!(report.supervisor.is_some());
    assert!(report.bytes_written > 0);

    let leftovers: Vec<_> = fs::read_dir(&out_dir)
        .expect("list out dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".staging"))
        .collect();
    assert!(leftovers.is_empty(), "staging directory left behind");

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn fixed_catalog_models_are_referenced_by_manufacturers() {
    let out_dir = temp_out_dir("catalog");
    let mut config = small_config(11);
    config.manufacturers.count = 100;
    let names = vec![
        "VM-100".to_string(),
        "VM-200".to_string(),
        "VM-300".to_string(),
        "BeveragePro".to_string(),
        "SnackMaster X".to_string(),
        "QuickCan 2000".to_string(),
    ];
    config.models.id = IdFormat::Catalog {
        values: names.clone(),
        suffix: None,
    };

    let result = engine(&out_dir).run(&config).expect("run");

    let (_, models) = read_csv(&result.run_dir.join(TableId::Model.file_name()));
    let mut model_types: Vec<String> = models.iter().map(|row| row[0].clone()).collect();
    model_types.sort();
    let mut expected = names.clone();
    expected.sort();
    assert_eq!(model_types, expected);

    let (headers, manufacturers) =
        read_csv(&result.run_dir.join(TableId::Manufacturer.file_name()));
    assert_eq!(manufacturers.len(), 100);
    let supply_type = headers
        .iter()
        .position(|h| h == "supply_Type")
        .expect("supply_Type column");
    for row in &manufacturers {
        assert!(names.contains(&row[supply_type]), "{}", row[supply_type]);
    }

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn exhausted_identifier_space_fails_before_any_output() {
    let out_dir = temp_out_dir("exhausted");
    let mut config = small_config(3);
    config.customers.count = 20;
    config.customers.id = IdFormat::Numeric { min: 1, max: 10 };

    let err = engine(&out_dir).run(&config).expect_err("space exhausted");
    match err {
        GenerationError::Config(ConfigError::IdentifierSpaceExhausted {
            requested,
            available,
            ..
        }) => {
            assert_eq!(requested, 20);
            assert_eq!(available, 10);
        }
        other => panic!("unexpected error: {other}"),
    }

    let entries = fs::read_dir(&out_dir).expect("list out dir").count();
    assert_eq!(entries, 0, "no run or staging directory expected");

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn over_allocated_partition_is_rejected() {
    let out_dir = temp_out_dir("over_allocated");
    let mut config = small_config(5);
    config.records.restock.size = SubRecordSize::Count(60);

    let err = engine(&out_dir).run(&config).expect_err("over-allocated");
    assert!(matches!(
        err,
        GenerationError::Config(ConfigError::PartitionOverAllocated { .. })
    ));

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn custom_null_marker_is_written_for_missing_values() {
    let out_dir = temp_out_dir("null_marker");
    let mut config = small_config(9);
    config.null_marker = "NULL".to_string();
    config.records.completed_share = 0.0;

    let result = engine(&out_dir).run(&config).expect("run");
    let (_, records) = read_csv(&result.run_dir.join(TableId::Record.file_name()));
    assert!(records.iter().all(|row| row[2] == "NULL"));

    let _ = fs::remove_dir_all(&out_dir);
}
