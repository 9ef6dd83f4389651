//! Canonical, versioned dataset configuration.
//!
//! One [`DatasetConfig`] parameterises the whole generation engine: table
//! sizes, identifier formats, value domains, role rules and sub-record
//! sizing. [`DatasetConfig::default`] reproduces the reference vending
//! dataset (Canadian provinces and cities, six model families, 5000 service
//! records split 1500/1500/2000).

use std::path::Path;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::CONFIG_VERSION;
use crate::error::Result;
use crate::format::IdFormat;
use crate::range::{DateWindow, IntRange, MoneyRange};

/// Top-level generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DatasetConfig {
    /// Configuration contract version.
    pub config_version: String,
    /// Seed for the run; identical seeds reproduce identical datasets.
    pub seed: u64,
    /// Token written for absent values, distinct from an empty string.
    pub null_marker: String,
    pub models: ModelConfig,
    pub manufacturers: ManufacturerConfig,
    pub employees: EmployeeConfig,
    pub customers: CustomerConfig,
    pub machines: MachineConfig,
    pub stock: StockConfig,
    pub records: RecordConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION.to_string(),
            seed: 42,
            null_marker: "\\N".to_string(),
            models: ModelConfig::default(),
            manufacturers: ManufacturerConfig::default(),
            employees: EmployeeConfig::default(),
            customers: CustomerConfig::default(),
            machines: MachineConfig::default(),
            stock: StockConfig::default(),
            records: RecordConfig::default(),
        }
    }
}

impl DatasetConfig {
    /// Load a configuration file; `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ModelConfig {
    pub count: u64,
    /// Format of `model_Type`, the key referenced by manufacturers.
    pub id: IdFormat,
    pub price: MoneyRange,
    pub capacity: IntRange,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            count: 6,
            id: IdFormat::Catalog {
                values: strings(&[
                    "VM-100",
                    "VM-200",
                    "VM-300",
                    "BeveragePro",
                    "SnackMaster X",
                    "QuickCan 2000",
                ]),
                suffix: Some(IntRange::new(100, 999)),
            },
            price: MoneyRange::new(1800.0, 4500.0),
            capacity: IntRange::new(80, 450),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ManufacturerConfig {
    pub count: u64,
    pub id: IdFormat,
    pub brands: Vec<String>,
    /// Top-level domain of contact emails; the host part is derived from the
    /// brand name.
    pub email_tld: String,
    pub price: MoneyRange,
}

impl Default for ManufacturerConfig {
    fn default() -> Self {
        Self {
            count: 100,
            id: IdFormat::Letters { len: 10 },
            brands: strings(&[
                "VendTech Inc.",
                "QuickSnack Co.",
                "AutoBrew Ltd.",
                "SnackMaster Pro",
                "MegaVend Systems",
                "CoolCan Machines",
                "SnackWave Innovations",
                "FastFood Automate",
                "FreshBite Vends",
                "BeveragePro Systems",
                "VendCore Solutions",
                "SnackSync Co.",
                "EcoVend Tech",
                "QuickBite Machines",
                "AutoSnack Systems",
                "VendGenius Pro",
                "CoolDrink Vends",
                "SnackMaster Plus",
                "MegaSnack Systems",
                "BrewMaster Vends",
            ]),
            email_tld: "com".to_string(),
            price: MoneyRange::new(1500.0, 5000.0),
        }
    }
}

/// Employee category; selects which optional attribute is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Requires a seniority level; rows feed the Management table.
    Management,
    /// Requires a license number; rows feed the Maintenance table.
    Technician,
}

impl RoleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleCategory::Management => "management",
            RoleCategory::Technician => "technician",
        }
    }
}

/// A named employee role and its attribute rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoleConfig {
    /// Value written to the `Role` column.
    pub name: String,
    pub category: RoleCategory,
    /// Exact number of employees with this role; roles without a count share
    /// the remainder uniformly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Seniority levels; `None` leaves the column null for this role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<Vec<String>>,
    /// License number scheme; `None` leaves the column null for this role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<IdFormat>,
    /// Identifier format override for this role's employees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdFormat>,
}

/// Values of the employee `Status` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EmployeeStatusConfig {
    pub default: String,
    pub supervisor: String,
}

impl Default for EmployeeStatusConfig {
    fn default() -> Self {
        Self {
            default: "staff".to_string(),
            supervisor: "supervisor".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EmployeeConfig {
    pub count: u64,
    /// Default identifier format; roles may override it.
    pub id: IdFormat,
    pub team_id: IntRange,
    pub roles: Vec<RoleConfig>,
    pub status: EmployeeStatusConfig,
    /// Promote one technician-category employee to supervisor status.
    pub elevate_supervisor: bool,
}

impl Default for EmployeeConfig {
    fn default() -> Self {
        Self {
            count: 500,
            id: IdFormat::Numeric {
                min: 10000,
                max: 99999,
            },
            team_id: IntRange::new(1, 100),
            roles: vec![
                RoleConfig {
                    name: "Manager".to_string(),
                    category: RoleCategory::Management,
                    count: None,
                    seniority: Some(strings(&["Junior", "Mid", "Senior", "Lead"])),
                    license: None,
                    id: None,
                },
                RoleConfig {
                    name: "Technician".to_string(),
                    category: RoleCategory::Technician,
                    count: None,
                    seniority: None,
                    license: Some(IdFormat::Prefixed {
                        prefix: "LIC-".to_string(),
                        min: 10000,
                        max: 99999,
                    }),
                    id: None,
                },
            ],
            status: EmployeeStatusConfig::default(),
            elevate_supervisor: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CustomerConfig {
    pub count: u64,
    pub id: IdFormat,
    pub account_types: Vec<String>,
    pub provinces: Vec<String>,
    pub cities: Vec<String>,
    /// Reject duplicate customer emails by resampling.
    pub unique_emails: bool,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            count: 500,
            id: IdFormat::Shuffled {
                letters: 4,
                digits: 4,
            },
            account_types: strings(&["Standard", "Premium"]),
            provinces: strings(&[
                "ON", "QC", "BC", "AB", "MB", "NS", "SK", "NB", "NL", "PE", "NT", "NU", "YT",
            ]),
            cities: strings(&[
                "Toronto",
                "Montreal",
                "Vancouver",
                "Calgary",
                "Ottawa",
                "Edmonton",
                "Winnipeg",
                "Quebec City",
                "Halifax",
                "Victoria",
                "Saskatoon",
                "Regina",
                "Charlottetown",
                "Yellowknife",
                "Iqaluit",
                "St. John's",
                "Fredericton",
                "Whitehorse",
                "London",
                "Kitchener",
                "Windsor",
                "Oshawa",
                "Hamilton",
                "Kingston",
                "Sudbury",
                "Thunder Bay",
                "Kelowna",
                "Nanaimo",
                "Kamloops",
                "Abbotsford",
            ]),
            unique_emails: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MachineConfig {
    pub count: u64,
    pub id: IdFormat,
    pub statuses: Vec<String>,
    pub purchase_window: DateWindow,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            id: IdFormat::Shuffled {
                letters: 3,
                digits: 4,
            },
            statuses: strings(&["Active", "Inactive", "Under Maintenance"]),
            purchase_window: default_window(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StockConfig {
    pub count: u64,
    pub id: IdFormat,
    pub categories: Vec<String>,
    pub warehouses: Vec<String>,
    /// Packaging word appended to each item name.
    pub packaging: Vec<String>,
    /// Maximum characters kept from the generated product phrase.
    pub name_max_len: usize,
    pub wholesale_cost: MoneyRange,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            id: IdFormat::Digits { len: 12 },
            categories: strings(&[
                "Snack",
                "Beverage",
                "Candy",
                "Health Food",
                "Chips",
                "Cookies",
                "Energy Drinks",
                "Water",
                "Soda",
                "Juice",
            ]),
            warehouses: (1..=20).map(|index| format!("WH-{index:02}")).collect(),
            packaging: strings(&["Bar", "Can", "Pack", "Bottle", "Box"]),
            name_max_len: 30,
            wholesale_cost: MoneyRange::new(0.5, 5.0),
        }
    }
}

/// Size of a sub-record table: an absolute count or a share of the record
/// pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SubRecordSize {
    Count(u64),
    Share(f64),
}

impl SubRecordSize {
    /// Resolve against the pool size. Shares round down.
    pub fn resolve(&self, pool: u64) -> u64 {
        match self {
            SubRecordSize::Count(count) => *count,
            SubRecordSize::Share(share) => {
                if !share.is_finite() || *share <= 0.0 {
                    0
                } else {
                    (share * pool as f64).floor() as u64
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PaymentRecordConfig {
    pub size: SubRecordSize,
    pub payment_types: Vec<String>,
    pub amount: MoneyRange,
}

impl Default for PaymentRecordConfig {
    fn default() -> Self {
        Self {
            size: SubRecordSize::Count(1500),
            payment_types: strings(&[
                "Credit Card",
                "Cash",
                "Mobile Pay",
                "Debit Card",
                "Apple Pay",
                "Google Pay",
            ]),
            amount: MoneyRange::new(1.5, 12.99),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MaintenanceRecordConfig {
    pub size: SubRecordSize,
    pub team_id: IntRange,
    pub statuses: Vec<String>,
    pub description_words: usize,
    /// Word appended to every description.
    pub description_suffix: String,
}

impl Default for MaintenanceRecordConfig {
    fn default() -> Self {
        Self {
            size: SubRecordSize::Count(1500),
            team_id: IntRange::new(1, 100),
            statuses: strings(&["Completed", "Pending", "In Progress", "Cancelled"]),
            description_words: 6,
            description_suffix: "maintenance".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RestockRecordConfig {
    pub size: SubRecordSize,
    pub quantity: IntRange,
    /// Per-unit cost; the exported cost is unit cost times quantity.
    pub unit_cost: MoneyRange,
}

impl Default for RestockRecordConfig {
    fn default() -> Self {
        Self {
            size: SubRecordSize::Count(2000),
            quantity: IntRange::new(10, 150),
            unit_cost: MoneyRange::new(0.5, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RecordConfig {
    pub count: u64,
    pub id: IdFormat,
    pub requested_window: DateWindow,
    /// Days between request and completion.
    pub completion_days: IntRange,
    /// Probability that a record has a completion date.
    pub completed_share: f64,
    pub payment: PaymentRecordConfig,
    pub maintenance: MaintenanceRecordConfig,
    pub restock: RestockRecordConfig,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            id: IdFormat::Shuffled {
                letters: 5,
                digits: 5,
            },
            requested_window: default_window(),
            completion_days: IntRange::new(0, 7),
            completed_share: 0.9,
            payment: PaymentRecordConfig::default(),
            maintenance: MaintenanceRecordConfig::default(),
            restock: RestockRecordConfig::default(),
        }
    }
}

fn default_window() -> DateWindow {
    DateWindow::new(date(2020, 1, 1), date(2025, 11, 21))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
