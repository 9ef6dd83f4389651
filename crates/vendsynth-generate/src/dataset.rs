use vendsynth_core::TableId;

use crate::entities::{
    Customer, Employee, MaintenanceRecord, MaintenanceRow, ManagementRow, Manufacturer, Model,
    PaymentRecord, Record, RestockRecord, StockItem, TableRow, VendingMachine,
};
use crate::value::GeneratedValue;

/// Every table of one run, held in memory until export.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub models: Vec<Model>,
    pub manufacturers: Vec<Manufacturer>,
    pub employees: Vec<Employee>,
    pub management: Vec<ManagementRow>,
    pub maintenance: Vec<MaintenanceRow>,
    pub customers: Vec<Customer>,
    pub machines: Vec<VendingMachine>,
    pub stock: Vec<StockItem>,
    pub records: Vec<Record>,
    pub payment_records: Vec<PaymentRecord>,
    pub maintenance_records: Vec<MaintenanceRecord>,
    pub restock_records: Vec<RestockRecord>,
}

impl Dataset {
    pub fn row_count(&self, table: TableId) -> usize {
        match table {
            TableId::Model => self.models.len(),
            TableId::Manufacturer => self.manufacturers.len(),
            TableId::Employee => self.employees.len(),
            TableId::Management => self.management.len(),
            TableId::Maintenance => self.maintenance.len(),
            TableId::Customer => self.customers.len(),
            TableId::VendingMachine => self.machines.len(),
            TableId::Stock => self.stock.len(),
            TableId::Record => self.records.len(),
            TableId::PaymentRecord => self.payment_records.len(),
            TableId::MaintenanceRecord => self.maintenance_records.len(),
            TableId::RestockRecord => self.restock_records.len(),
        }
    }

    /// Rows of `table` as field values in declared column order.
    pub fn rows(&self, table: TableId) -> Vec<Vec<GeneratedValue>> {
        match table {
            TableId::Model => values_of(&self.models),
            TableId::Manufacturer => values_of(&self.manufacturers),
            TableId::Employee => values_of(&self.employees),
            TableId::Management => values_of(&self.management),
            TableId::Maintenance => values_of(&self.maintenance),
            TableId::Customer => values_of(&self.customers),
            TableId::VendingMachine => values_of(&self.machines),
            TableId::Stock => values_of(&self.stock),
            TableId::Record => values_of(&self.records),
            TableId::PaymentRecord => values_of(&self.payment_records),
            TableId::MaintenanceRecord => values_of(&self.maintenance_records),
            TableId::RestockRecord => values_of(&self.restock_records),
        }
    }

    /// Key column values of `table`, in generation order.
    pub fn keys(&self, table: TableId) -> Vec<String> {
        self.rows(table)
            .into_iter()
            .filter_map(|row| row.first().and_then(|key| key.as_str().map(str::to_string)))
            .collect()
    }
}

fn values_of<T: TableRow>(rows: &[T]) -> Vec<Vec<GeneratedValue>> {
    rows.iter().map(TableRow::values).collect()
}
