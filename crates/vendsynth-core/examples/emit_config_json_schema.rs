use schemars::schema_for;
use vendsynth_core::DatasetConfig;

fn main() {
    let schema = schema_for!(DatasetConfig);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
