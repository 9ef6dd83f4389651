use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use vendsynth_core::{DatasetConfig, SubRecordSize, TableId};
use vendsynth_generate::{GenerateOptions, GenerationEngine};

fn small_config(seed: u64) -> DatasetConfig {
    let mut config = DatasetConfig::default();
    config.seed = seed;
    config.manufacturers.count = 15;
    config.employees.count = 30;
    config.customers.count = 20;
    config.machines.count = 20;
    config.stock.count = 20;
    config.records.count = 60;
    config.records.payment.size = SubRecordSize::Count(20);
    config.records.maintenance.size = SubRecordSize::Count(20);
    config.records.restock.size = SubRecordSize::Share(0.25);
    config
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("vendsynth_golden_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn run_hashes(config: &DatasetConfig, label: &str) -> Vec<(String, String)> {
    let out_dir = temp_out_dir(label);
    let result = GenerationEngine::new(GenerateOptions {
        out_dir: out_dir.clone(),
        ..GenerateOptions::default()
    })
    .run(config)
    .expect("run generation");

    let hashes = TableId::ALL
        .iter()
        .map(|table| {
            let path = result.run_dir.join(table.file_name());
            (table.file_name().to_string(), hash_file(&path))
        })
        .collect();
    let _ = fs::remove_dir_all(&out_dir);
    hashes
}

fn hash_file(path: &Path) -> String {
    let bytes = fs::read(path).expect("read file");
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[test]
fn same_seed_produces_identical_files() {
    let config = small_config(1234);
    let first = run_hashes(&config, "first");
    let second = run_hashes(&config, "second");
    assert_eq!(first, second);
}

#[test]
fn different_seeds_produce_different_files() {
    let first = run_hashes(&small_config(1), "seed_one");
    let second = run_hashes(&small_config(2), "seed_two");
    let record_file = TableId::Record.file_name();
    let lookup = |hashes: &[(String, String)]| {
        hashes
            .iter()
            .find(|(name, _)| name == record_file)
            .map(|(_, hash)| hash.clone())
            .expect("record hash")
    };
    assert_ne!(lookup(&first), lookup(&second));
}

#[test]
fn table_output_is_independent_of_other_table_sizes() {
    let base = small_config(77);
    let mut larger_stock = base.clone();
    larger_stock.stock.count = 45;

    let first = run_hashes(&base, "base");
    let second = run_hashes(&larger_stock, "larger_stock");
    let hash_of = |hashes: &[(String, String)], table: TableId| {
        hashes
            .iter()
            .find(|(name, _)| name == table.file_name())
            .map(|(_, hash)| hash.clone())
            .expect("table hash")
    };
    assert_eq!(
        hash_of(&first, TableId::Customer),
        hash_of(&second, TableId::Customer)
    );
    assert_ne!(hash_of(&first, TableId::Stock), hash_of(&second, TableId::Stock));
}
