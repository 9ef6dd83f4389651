//! Referential binding between parent pools and dependent tables.

use std::collections::{BTreeMap, HashSet};

use rand::RngCore;
use rand::seq::IndexedRandom;

use crate::entities::{Employee, MaintenanceRow, ManagementRow, RoleAttributes};
use crate::errors::GenerationError;
use vendsynth_core::TableId;

/// Read-only lookup of parent keys for dependent factories.
pub trait ForeignContext {
    /// Pick a parent key of `parent` uniformly at random for `child`.
    fn pick_fk(
        &self,
        child: TableId,
        parent: TableId,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError>;

    fn contains(&self, parent: TableId, key: &str) -> bool;

    /// Fail when any of `keys` is missing from the `parent` pool.
    fn ensure_all(
        &self,
        child: TableId,
        parent: TableId,
        keys: &[String],
    ) -> Result<(), GenerationError> {
        for key in keys {
            if !self.contains(parent, key) {
                return Err(GenerationError::ReferentialViolation {
                    table: child,
                    message: format!("key '{key}' not found in {parent}"),
                });
            }
        }
        Ok(())
    }
}

/// Materialised key set of one parent table.
#[derive(Debug, Clone, Default)]
pub struct ParentPool {
    keys: Vec<String>,
    index: HashSet<String>,
}

impl ParentPool {
    pub fn from_keys(keys: Vec<String>) -> Self {
        let index = keys.iter().cloned().collect();
        Self { keys, index }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Uniform choice from the pool; `None` when it is empty.
    pub fn bind(&self, rng: &mut dyn RngCore) -> Option<&str> {
        self.keys.choose(rng).map(String::as_str)
    }
}

/// Parent pools of every table generated so far.
#[derive(Debug, Default)]
pub struct InMemoryForeignContext {
    pools: BTreeMap<TableId, ParentPool>,
}

impl InMemoryForeignContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the keys of a finished table. Pools never change afterwards.
    pub fn ingest_table(&mut self, table: TableId, keys: Vec<String>) {
        self.pools.insert(table, ParentPool::from_keys(keys));
    }
}

impl ForeignContext for InMemoryForeignContext {
    fn pick_fk(
        &self,
        child: TableId,
        parent: TableId,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        let pool = self
            .pools
            .get(&parent)
            .ok_or_else(|| GenerationError::ReferentialViolation {
                table: child,
                message: format!("{parent} has not been generated"),
            })?;
        pool.bind(rng)
            .map(str::to_string)
            .ok_or_else(|| GenerationError::ReferentialViolation {
                table: child,
                message: format!("no parent rows in {parent}"),
            })
    }

    fn contains(&self, parent: TableId, key: &str) -> bool {
        self.pools
            .get(&parent)
            .is_some_and(|pool| pool.contains(key))
    }
}

/// Route every employee to exactly one category sub-table.
pub fn route_employees(employees: &[Employee]) -> (Vec<ManagementRow>, Vec<MaintenanceRow>) {
    let mut management = Vec::new();
    let mut maintenance = Vec::new();
    for employee in employees {
        match &employee.attributes {
            RoleAttributes::Management {
                seniority_level, ..
            } => management.push(ManagementRow {
                employee_id: employee.employee_id.clone(),
                seniority_level: seniority_level.clone(),
            }),
            RoleAttributes::Technician { license_number, .. } => {
                maintenance.push(MaintenanceRow {
                    employee_id: employee.employee_id.clone(),
                    license_number: license_number.clone(),
                })
            }
        }
    }
    (management, maintenance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn employee(id: &str, attributes: RoleAttributes) -> Employee {
        Employee {
            employee_id: id.to_string(),
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            role: "any".to_string(),
            team_id: 1,
            contact: "jo@example.com".to_string(),
            status: "staff".to_string(),
            attributes,
        }
    }

    #[test]
    fn pick_fk_stays_inside_parent_pool() {
        let mut context = InMemoryForeignContext::new();
        let models = vec!["VM-100".to_string(), "VM-200".to_string()];
        context.ingest_table(TableId::Model, models.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let value = context
                .pick_fk(TableId::Manufacturer, TableId::Model, &mut rng)
                .expect("bind");
            assert!(models.contains(&value));
        }
    }

    #[test]
    fn empty_or_missing_pool_is_a_violation() {
        let mut context = InMemoryForeignContext::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = context
            .pick_fk(TableId::Manufacturer, TableId::Model, &mut rng)
            .expect_err("missing pool");
        assert!(matches!(err, GenerationError::ReferentialViolation { .. }));

        context.ingest_table(TableId::Model, Vec::new());
        let err = context
            .pick_fk(TableId::Manufacturer, TableId::Model, &mut rng)
            .expect_err("empty pool");
        assert!(matches!(err, GenerationError::ReferentialViolation { .. }));
    }

    #[test]
    fn ensure_all_reports_unknown_keys() {
        let mut context = InMemoryForeignContext::new();
        let keys = vec!["A1".to_string(), "B2".to_string()];
        context.ingest_table(TableId::Record, keys.clone());
        context
            .ensure_all(TableId::PaymentRecord, TableId::Record, &keys)
            .expect("known keys");
        let err = context
            .ensure_all(TableId::PaymentRecord, TableId::Record, &["C3".to_string()])
            .expect_err("unknown key");
        assert!(matches!(
            err,
            GenerationError::ReferentialViolation {
                table: TableId::PaymentRecord,
                ..
            }
        ));
    }

    #[test]
    fn employees_route_by_category() {
        let employees = vec![
            employee(
                "1",
                RoleAttributes::Management {
                    seniority_level: "Lead".to_string(),
                    license_number: Some("MGR-1000".to_string()),
                },
            ),
            employee(
                "2",
                RoleAttributes::Technician {
                    license_number: "LIC-20000".to_string(),
                    seniority_level: None,
                },
            ),
        ];
        let (management, maintenance) = route_employees(&employees);
        assert_eq!(
            management,
            vec![ManagementRow {
                employee_id: "1".to_string(),
                seniority_level: "Lead".to_string(),
            }]
        );
        assert_eq!(
            maintenance,
            vec![MaintenanceRow {
                employee_id: "2".to_string(),
                license_number: "LIC-20000".to_string(),
            }]
        );
    }
}
