use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Every table the generator emits, in declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
    Model,
    Manufacturer,
    Employee,
    Management,
    Maintenance,
    Customer,
    VendingMachine,
    Stock,
    Record,
    PaymentRecord,
    MaintenanceRecord,
    RestockRecord,
}

impl TableId {
    pub const ALL: [TableId; 12] = [
        TableId::Model,
        TableId::Manufacturer,
        TableId::Employee,
        TableId::Management,
        TableId::Maintenance,
        TableId::Customer,
        TableId::VendingMachine,
        TableId::Stock,
        TableId::Record,
        TableId::PaymentRecord,
        TableId::MaintenanceRecord,
        TableId::RestockRecord,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableId::Model => "model",
            TableId::Manufacturer => "manufacturer",
            TableId::Employee => "employee",
            TableId::Management => "management",
            TableId::Maintenance => "maintenance",
            TableId::Customer => "customer",
            TableId::VendingMachine => "vending_machine",
            TableId::Stock => "stock",
            TableId::Record => "record",
            TableId::PaymentRecord => "payment_record",
            TableId::MaintenanceRecord => "maintenance_record",
            TableId::RestockRecord => "restock_record",
        }
    }

    /// File name used by the CSV export.
    pub fn file_name(self) -> &'static str {
        match self {
            TableId::Model => "Model.csv",
            TableId::Manufacturer => "Manufacturer.csv",
            TableId::Employee => "Employee.csv",
            TableId::Management => "Management.csv",
            TableId::Maintenance => "Maintenance.csv",
            TableId::Customer => "Customer.csv",
            TableId::VendingMachine => "Vending_Machine.csv",
            TableId::Stock => "Stock.csv",
            TableId::Record => "Record.csv",
            TableId::PaymentRecord => "Payment_Record.csv",
            TableId::MaintenanceRecord => "Maintenance_Record.csv",
            TableId::RestockRecord => "Restock_Record.csv",
        }
    }

    /// Declared column order of the exported file.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableId::Model => &["model_Type", "price", "capacity"],
            TableId::Manufacturer => &[
                "supplier_ID",
                "manufact_Brand",
                "contactInfo",
                "supply_Type",
                "Price",
            ],
            TableId::Employee => &[
                "employee_ID",
                "f_Name",
                "L_Name",
                "Role",
                "team_ID",
                "Contact",
                "Status",
                "seniority_level",
                "license_number",
            ],
            TableId::Management => &["employee_ID", "seniority_level"],
            TableId::Maintenance => &["employee_ID", "license_number"],
            TableId::Customer => &[
                "customer_ID",
                "Email",
                "account_Type",
                "Name",
                "f_Name",
                "L_Name",
                "Address",
                "Province",
                "City",
                "street_Address",
            ],
            TableId::VendingMachine => &["machine_ID", "Status", "purchase_Date"],
            TableId::Stock => &[
                "Item_ID",
                "Name",
                "Category",
                "wholesale_Cost",
                "warehouse_Loc",
            ],
            TableId::Record => &["record_ID", "date_Requested", "date_Completed"],
            TableId::PaymentRecord => &["record_ID", "payment_Type", "Amount"],
            TableId::MaintenanceRecord => &["record_ID", "team_ID", "Description", "Status"],
            TableId::RestockRecord => &["record_ID", "Quantity", "Cost"],
        }
    }

    /// Tables whose keys this table references.
    pub fn parents(self) -> &'static [TableId] {
        match self {
            TableId::Manufacturer => &[TableId::Model],
            TableId::Management | TableId::Maintenance => &[TableId::Employee],
            TableId::PaymentRecord | TableId::MaintenanceRecord | TableId::RestockRecord => {
                &[TableId::Record]
            }
            TableId::Model
            | TableId::Employee
            | TableId::Customer
            | TableId::VendingMachine
            | TableId::Stock
            | TableId::Record => &[],
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_distinct() {
        let mut names: Vec<_> = TableId::ALL.iter().map(|table| table.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TableId::ALL.len());
    }

    #[test]
    fn keys_lead_every_column_list() {
        for table in TableId::ALL {
            assert!(!table.columns().is_empty(), "{table} has no columns");
        }
        assert_eq!(TableId::PaymentRecord.columns()[0], "record_ID");
        assert_eq!(TableId::Management.columns()[0], "employee_ID");
    }
}
