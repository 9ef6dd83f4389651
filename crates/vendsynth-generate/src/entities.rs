//! Entity records produced by the factories.

use chrono::NaiveDate;

use vendsynth_core::{RoleCategory, RoleConfig, TableId};

use crate::errors::GenerationError;
use crate::value::GeneratedValue;

/// A record that exports as one row of a fixed table.
pub trait TableRow {
    const TABLE: TableId;

    /// Field values in the table's declared column order.
    fn values(&self) -> Vec<GeneratedValue>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub model_type: String,
    pub price: f64,
    pub capacity: i64,
}

impl TableRow for Model {
    const TABLE: TableId = TableId::Model;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.model_type.as_str().into(),
            GeneratedValue::Money(self.price),
            self.capacity.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Manufacturer {
    pub supplier_id: String,
    pub brand: String,
    pub contact_info: String,
    /// Key of the supplied [`Model`].
    pub supply_type: String,
    pub price: f64,
}

impl TableRow for Manufacturer {
    const TABLE: TableId = TableId::Manufacturer;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.supplier_id.as_str().into(),
            self.brand.as_str().into(),
            self.contact_info.as_str().into(),
            self.supply_type.as_str().into(),
            GeneratedValue::Money(self.price),
        ]
    }
}

/// Role-conditioned optional attributes of an employee.
///
/// The variant is the role category; its required field is never absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleAttributes {
    Management {
        seniority_level: String,
        license_number: Option<String>,
    },
    Technician {
        license_number: String,
        seniority_level: Option<String>,
    },
}

impl RoleAttributes {
    /// Build the attribute set for `role`, rejecting values that do not fit
    /// its category rule: the required field must be present and an optional
    /// field may only be present when the role configures it.
    pub fn for_role(
        role: &RoleConfig,
        seniority_level: Option<String>,
        license_number: Option<String>,
    ) -> Result<Self, GenerationError> {
        let rule_error = |message: &str| GenerationError::RoleRule {
            role: role.name.clone(),
            message: message.to_string(),
        };
        if seniority_level.is_some() && role.seniority.is_none() {
            return Err(rule_error("seniority level set for a role without levels"));
        }
        if license_number.is_some() && role.license.is_none() {
            return Err(rule_error("license number set for a role without a scheme"));
        }
        match role.category {
            RoleCategory::Management => Ok(RoleAttributes::Management {
                seniority_level: seniority_level
                    .ok_or_else(|| rule_error("management role needs a seniority level"))?,
                license_number,
            }),
            RoleCategory::Technician => Ok(RoleAttributes::Technician {
                license_number: license_number
                    .ok_or_else(|| rule_error("technician role needs a license number"))?,
                seniority_level,
            }),
        }
    }

    pub fn category(&self) -> RoleCategory {
        match self {
            RoleAttributes::Management { .. } => RoleCategory::Management,
            RoleAttributes::Technician { .. } => RoleCategory::Technician,
        }
    }

    pub fn seniority_level(&self) -> Option<&str> {
        match self {
            RoleAttributes::Management {
                seniority_level, ..
            } => Some(seniority_level.as_str()),
            RoleAttributes::Technician {
                seniority_level, ..
            } => seniority_level.as_deref(),
        }
    }

    pub fn license_number(&self) -> Option<&str> {
        match self {
            RoleAttributes::Management { license_number, .. } => license_number.as_deref(),
            RoleAttributes::Technician { license_number, .. } => Some(license_number.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub team_id: i64,
    pub contact: String,
    pub status: String,
    pub attributes: RoleAttributes,
}

impl Employee {
    pub fn category(&self) -> RoleCategory {
        self.attributes.category()
    }
}

impl TableRow for Employee {
    const TABLE: TableId = TableId::Employee;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.employee_id.as_str().into(),
            self.first_name.as_str().into(),
            self.last_name.as_str().into(),
            self.role.as_str().into(),
            self.team_id.into(),
            self.contact.as_str().into(),
            self.status.as_str().into(),
            self.attributes.seniority_level().into(),
            self.attributes.license_number().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementRow {
    pub employee_id: String,
    pub seniority_level: String,
}

impl TableRow for ManagementRow {
    const TABLE: TableId = TableId::Management;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.employee_id.as_str().into(),
            self.seniority_level.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRow {
    pub employee_id: String,
    pub license_number: String,
}

impl TableRow for MaintenanceRow {
    const TABLE: TableId = TableId::Maintenance;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.employee_id.as_str().into(),
            self.license_number.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: String,
    pub email: String,
    pub account_type: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub province: String,
    pub city: String,
    pub street_address: String,
}

impl TableRow for Customer {
    const TABLE: TableId = TableId::Customer;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.customer_id.as_str().into(),
            self.email.as_str().into(),
            self.account_type.as_str().into(),
            self.name.as_str().into(),
            self.first_name.as_str().into(),
            self.last_name.as_str().into(),
            self.address.as_str().into(),
            self.province.as_str().into(),
            self.city.as_str().into(),
            self.street_address.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendingMachine {
    pub machine_id: String,
    pub status: String,
    pub purchase_date: NaiveDate,
}

impl TableRow for VendingMachine {
    const TABLE: TableId = TableId::VendingMachine;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.machine_id.as_str().into(),
            self.status.as_str().into(),
            self.purchase_date.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub wholesale_cost: f64,
    pub warehouse: String,
}

impl TableRow for StockItem {
    const TABLE: TableId = TableId::Stock;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.item_id.as_str().into(),
            self.name.as_str().into(),
            self.category.as_str().into(),
            GeneratedValue::Money(self.wholesale_cost),
            self.warehouse.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub record_id: String,
    pub date_requested: NaiveDate,
    pub date_completed: Option<NaiveDate>,
}

impl TableRow for Record {
    const TABLE: TableId = TableId::Record;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.record_id.as_str().into(),
            self.date_requested.into(),
            self.date_completed.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub record_id: String,
    pub payment_type: String,
    pub amount: f64,
}

impl TableRow for PaymentRecord {
    const TABLE: TableId = TableId::PaymentRecord;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.record_id.as_str().into(),
            self.payment_type.as_str().into(),
            GeneratedValue::Money(self.amount),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRecord {
    pub record_id: String,
    pub team_id: i64,
    pub description: String,
    pub status: String,
}

impl TableRow for MaintenanceRecord {
    const TABLE: TableId = TableId::MaintenanceRecord;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.record_id.as_str().into(),
            self.team_id.into(),
            self.description.as_str().into(),
            self.status.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestockRecord {
    pub record_id: String,
    pub quantity: i64,
    pub cost: f64,
}

impl TableRow for RestockRecord {
    const TABLE: TableId = TableId::RestockRecord;

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.record_id.as_str().into(),
            self.quantity.into(),
            GeneratedValue::Money(self.cost),
        ]
    }
}
