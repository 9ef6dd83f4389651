use std::collections::{BTreeSet, HashSet};

use crate::CONFIG_VERSION;
use crate::config::{DatasetConfig, EmployeeConfig, RoleCategory, RoleConfig};
use crate::error::{ConfigError, Result};
use crate::format::IdFormat;
use crate::table::TableId;

/// Resolved role allocation for the employee pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePlan {
    /// Roles with an explicit count, as `(role index, count)`.
    pub fixed: Vec<(usize, u64)>,
    /// Roles sharing the remainder by uniform choice.
    pub shared: Vec<usize>,
    /// Employees left after fixed counts are served.
    pub remainder: u64,
}

impl RolePlan {
    pub fn from_config(config: &EmployeeConfig) -> Result<Self> {
        if config.roles.is_empty() {
            if config.count == 0 {
                return Ok(Self {
                    fixed: Vec::new(),
                    shared: Vec::new(),
                    remainder: 0,
                });
            }
            return Err(ConfigError::EmptyDomain("employees.roles".to_string()));
        }

        let mut fixed = Vec::new();
        let mut shared = Vec::new();
        let mut fixed_total: u64 = 0;
        for (index, role) in config.roles.iter().enumerate() {
            match role.count {
                Some(count) => {
                    fixed_total = fixed_total.saturating_add(count);
                    fixed.push((index, count));
                }
                None => shared.push(index),
            }
        }

        if fixed_total > config.count {
            return Err(ConfigError::RoleAllocation(format!(
                "role counts sum to {fixed_total} but only {} employees are requested",
                config.count
            )));
        }
        let remainder = config.count - fixed_total;
        if shared.is_empty() && remainder > 0 {
            return Err(ConfigError::RoleAllocation(format!(
                "role counts sum to {fixed_total} but {} employees are requested",
                config.count
            )));
        }

        Ok(Self {
            fixed,
            shared,
            remainder,
        })
    }

    /// Upper bound on employees a role can receive.
    pub fn max_for(&self, role_index: usize) -> u64 {
        self.fixed
            .iter()
            .find(|(index, _)| *index == role_index)
            .map(|(_, count)| *count)
            .unwrap_or_else(|| {
                if self.shared.contains(&role_index) {
                    self.remainder
                } else {
                    0
                }
            })
    }
}

/// Run every fatal configuration check before generation starts.
pub fn validate_config(config: &DatasetConfig) -> Result<()> {
    if config.config_version != CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: config.config_version.clone(),
            expected: CONFIG_VERSION.to_string(),
        });
    }
    if config.null_marker.is_empty() {
        return Err(ConfigError::EmptyDomain("null_marker".to_string()));
    }

    validate_models(config)?;
    validate_manufacturers(config)?;
    validate_employees(&config.employees)?;
    validate_customers(config)?;
    validate_machines(config)?;
    validate_stock(config)?;
    validate_records(config)?;

    Ok(())
}

fn validate_identifier(table: TableId, format: &IdFormat, count: u64) -> Result<()> {
    format.validate(&format!("{table}.id"))?;
    format.ensure_capacity(table.as_str(), count)
}

fn require_values(field: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(ConfigError::EmptyDomain(field.to_string()));
    }
    Ok(())
}

fn validate_models(config: &DatasetConfig) -> Result<()> {
    let models = &config.models;
    validate_identifier(TableId::Model, &models.id, models.count)?;
    models.price.validate("models.price")?;
    models.capacity.validate_non_negative("models.capacity")
}

fn validate_manufacturers(config: &DatasetConfig) -> Result<()> {
    let manufacturers = &config.manufacturers;
    validate_identifier(TableId::Manufacturer, &manufacturers.id, manufacturers.count)?;
    require_values("manufacturers.brands", &manufacturers.brands)?;
    if manufacturers.email_tld.trim().is_empty() {
        return Err(ConfigError::EmptyDomain("manufacturers.email_tld".to_string()));
    }
    manufacturers.price.validate("manufacturers.price")?;
    if manufacturers.count > 0 && config.models.count == 0 {
        return Err(ConfigError::MissingParent {
            table: TableId::Manufacturer.to_string(),
            parent: TableId::Model.to_string(),
        });
    }
    Ok(())
}

fn validate_employees(employees: &EmployeeConfig) -> Result<()> {
    employees.id.validate("employee.id")?;
    employees.team_id.validate("employees.team_id")?;
    if employees.status.default.is_empty() || employees.status.supervisor.is_empty() {
        return Err(ConfigError::EmptyDomain("employees.status".to_string()));
    }
    if employees.status.default == employees.status.supervisor {
        return Err(ConfigError::RoleRule(
            "supervisor status must differ from the default status".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for role in &employees.roles {
        validate_role(role)?;
        if !names.insert(role.name.as_str()) {
            return Err(ConfigError::RoleRule(format!(
                "role '{}' is declared twice",
                role.name
            )));
        }
    }
    validate_category_separation(&employees.roles)?;
    validate_disjoint_formats("employee id", &employees.roles, |role| {
        Some(role.id.as_ref().unwrap_or(&employees.id))
    })?;
    validate_disjoint_formats("license", &employees.roles, |role| role.license.as_ref())?;

    let plan = RolePlan::from_config(employees)?;

    // Identifier capacity per distinct format, assuming the whole shared
    // remainder could land on any role drawing from it.
    let mut id_demand = FormatDemand::default();
    let mut license_demand = FormatDemand::default();
    for (index, role) in employees.roles.iter().enumerate() {
        let shared = plan.shared.contains(&index);
        let fixed = if shared { 0 } else { plan.max_for(index) };
        id_demand.add(role.id.as_ref().unwrap_or(&employees.id), fixed, shared);
        if let Some(license) = &role.license {
            license_demand.add(license, fixed, shared);
        }
    }
    for (format, demand) in id_demand.resolve(plan.remainder) {
        format.ensure_capacity(TableId::Employee.as_str(), demand.min(employees.count))?;
    }
    for (format, demand) in license_demand.resolve(plan.remainder) {
        format.ensure_capacity("employee.license_number", demand.min(employees.count))?;
    }

    if employees.elevate_supervisor
        && employees.count > 0
        && !employees
            .roles
            .iter()
            .any(|role| role.category == RoleCategory::Technician && role.count != Some(0))
    {
        return Err(ConfigError::RoleAllocation(
            "supervisor elevation needs a technician-category role".to_string(),
        ));
    }

    Ok(())
}

/// Identifier demand grouped by format.
#[derive(Default)]
struct FormatDemand<'a> {
    entries: Vec<(&'a IdFormat, u64, bool)>,
}

impl<'a> FormatDemand<'a> {
    fn add(&mut self, format: &'a IdFormat, fixed: u64, shared: bool) {
        match self
            .entries
            .iter_mut()
            .find(|(existing, _, _)| *existing == format)
        {
            Some((_, total, has_shared)) => {
                *total = total.saturating_add(fixed);
                *has_shared |= shared;
            }
            None => self.entries.push((format, fixed, shared)),
        }
    }

    fn resolve(self, remainder: u64) -> Vec<(&'a IdFormat, u64)> {
        self.entries
            .into_iter()
            .map(|(format, fixed, shared)| {
                let demand = if shared {
                    fixed.saturating_add(remainder)
                } else {
                    fixed
                };
                (format, demand)
            })
            .collect()
    }
}

fn validate_role(role: &RoleConfig) -> Result<()> {
    if role.name.trim().is_empty() {
        return Err(ConfigError::RoleRule("role name must not be empty".to_string()));
    }
    if let Some(levels) = &role.seniority {
        require_values(&format!("employees.roles[{}].seniority", role.name), levels)?;
    }
    if let Some(license) = &role.license {
        license.validate(&format!("employees.roles[{}].license", role.name))?;
    }
    if let Some(id) = &role.id {
        id.validate(&format!("employees.roles[{}].id", role.name))?;
    }

    match role.category {
        RoleCategory::Management if role.seniority.is_none() => Err(ConfigError::RoleRule(
            format!("management role '{}' needs seniority levels", role.name),
        )),
        RoleCategory::Technician if role.license.is_none() => Err(ConfigError::RoleRule(
            format!("technician role '{}' needs a license scheme", role.name),
        )),
        _ => Ok(()),
    }
}

/// Management and technician roles must never populate the optional fields
/// identically: shared seniority sets or overlapping license schemes would
/// make the category unrecoverable from the row.
fn validate_category_separation(roles: &[RoleConfig]) -> Result<()> {
    let managers = roles
        .iter()
        .filter(|role| role.category == RoleCategory::Management);
    for manager in managers {
        let technicians = roles
            .iter()
            .filter(|role| role.category == RoleCategory::Technician);
        for technician in technicians {
            if let (Some(left), Some(right)) = (&manager.seniority, &technician.seniority) {
                let left: BTreeSet<&String> = left.iter().collect();
                let right: BTreeSet<&String> = right.iter().collect();
                if left == right {
                    return Err(ConfigError::RoleRule(format!(
                        "roles '{}' and '{}' share the same seniority levels",
                        manager.name, technician.name
                    )));
                }
            }
            if let (Some(left), Some(right)) = (&manager.license, &technician.license) {
                if left.overlaps(right) {
                    return Err(ConfigError::RoleRule(format!(
                        "roles '{}' and '{}' share a license scheme",
                        manager.name, technician.name
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Roles drawing from different formats share one uniqueness set, so the
/// formats must not be able to produce the same value; capacity is then
/// checked per format.
fn validate_disjoint_formats<'a, F>(
    field: &str,
    roles: &'a [RoleConfig],
    format_of: F,
) -> Result<()>
where
    F: Fn(&'a RoleConfig) -> Option<&'a IdFormat>,
{
    let formats: Vec<(&str, &IdFormat)> = roles
        .iter()
        .filter_map(|role| format_of(role).map(|format| (role.name.as_str(), format)))
        .collect();
    for (index, (left_role, left)) in formats.iter().enumerate() {
        for (right_role, right) in &formats[index + 1..] {
            if left != right && left.overlaps(right) {
                return Err(ConfigError::RoleRule(format!(
                    "{field} formats of roles '{left_role}' and '{right_role}' overlap"
                )));
            }
        }
    }
    Ok(())
}

fn validate_customers(config: &DatasetConfig) -> Result<()> {
    let customers = &config.customers;
    validate_identifier(TableId::Customer, &customers.id, customers.count)?;
    require_values("customers.account_types", &customers.account_types)?;
    require_values("customers.provinces", &customers.provinces)?;
    require_values("customers.cities", &customers.cities)
}

fn validate_machines(config: &DatasetConfig) -> Result<()> {
    let machines = &config.machines;
    validate_identifier(TableId::VendingMachine, &machines.id, machines.count)?;
    require_values("machines.statuses", &machines.statuses)?;
    machines.purchase_window.validate("machines.purchase_window")
}

fn validate_stock(config: &DatasetConfig) -> Result<()> {
    let stock = &config.stock;
    validate_identifier(TableId::Stock, &stock.id, stock.count)?;
    require_values("stock.categories", &stock.categories)?;
    require_values("stock.warehouses", &stock.warehouses)?;
    require_values("stock.packaging", &stock.packaging)?;
    if stock.name_max_len == 0 {
        return Err(ConfigError::InvalidRange {
            field: "stock.name_max_len".to_string(),
            message: "must be > 0".to_string(),
        });
    }
    stock.wholesale_cost.validate("stock.wholesale_cost")
}

fn validate_records(config: &DatasetConfig) -> Result<()> {
    let records = &config.records;
    validate_identifier(TableId::Record, &records.id, records.count)?;
    records.requested_window.validate("records.requested_window")?;
    records
        .completion_days
        .validate_non_negative("records.completion_days")?;
    let latest = chrono::TimeDelta::try_days(records.completion_days.max)
        .and_then(|delta| records.requested_window.end.checked_add_signed(delta));
    if latest.is_none() {
        return Err(ConfigError::InvalidRange {
            field: "records.completion_days".to_string(),
            message: format!(
                "{} days after {} is outside the supported date range",
                records.completion_days.max, records.requested_window.end
            ),
        });
    }
    if !(0.0..=1.0).contains(&records.completed_share) {
        return Err(ConfigError::InvalidRange {
            field: "records.completed_share".to_string(),
            message: format!("{} must be within [0, 1]", records.completed_share),
        });
    }

    require_values("records.payment.payment_types", &records.payment.payment_types)?;
    records.payment.amount.validate("records.payment.amount")?;
    require_values("records.maintenance.statuses", &records.maintenance.statuses)?;
    records
        .maintenance
        .team_id
        .validate("records.maintenance.team_id")?;
    records
        .restock
        .quantity
        .validate_non_negative("records.restock.quantity")?;
    records.restock.unit_cost.validate("records.restock.unit_cost")?;

    let requested = [
        records.payment.size,
        records.maintenance.size,
        records.restock.size,
    ]
    .iter()
    .map(|size| size.resolve(records.count))
    .fold(0_u64, u64::saturating_add);
    if requested > records.count {
        return Err(ConfigError::PartitionOverAllocated {
            requested,
            pool: records.count,
        });
    }

    Ok(())
}
