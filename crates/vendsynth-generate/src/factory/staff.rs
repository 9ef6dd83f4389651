//! Employee pool with role-conditioned attributes.

use rand::RngCore;
use rand::seq::{IndexedRandom, SliceRandom};

use vendsynth_core::{EmployeeConfig, IdFormat, RoleCategory, RolePlan, TableId};

use crate::entities::{Employee, RoleAttributes};
use crate::errors::GenerationError;
use crate::factory::FactoryContext;
use crate::ids::{UniqueSet, generate};

pub fn build_employees(
    config: &EmployeeConfig,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<Employee>, GenerationError> {
    let assignments = assign_roles(config, &mut ctx.rng)?;

    let id_formats: Vec<&IdFormat> = config
        .roles
        .iter()
        .map(|role| role.id.as_ref().unwrap_or(&config.id))
        .collect();
    ensure_demand(TableId::Employee.as_str(), &assignments, |index| {
        Some(id_formats[index])
    })?;
    ensure_demand("employee.license_number", &assignments, |index| {
        config.roles[index].license.as_ref()
    })?;

    let mut ids = UniqueSet::new(TableId::Employee, "employee_ID", ctx.max_attempts);
    let mut licenses = UniqueSet::new(TableId::Employee, "license_number", ctx.max_attempts);
    let mut employees = Vec::with_capacity(assignments.len());

    for role_index in assignments {
        let role = &config.roles[role_index];
        let id_format = id_formats[role_index];
        let employee_id = ids.draw_unique(&mut ctx.rng, |rng| Ok(generate(id_format, rng)))?;
        let first_name = ctx.text.first_name(&mut ctx.rng)?;
        let last_name = ctx.text.last_name(&mut ctx.rng)?;
        let team_id = ctx.int(config.team_id);
        let contact = ctx.text.email(None, &mut ctx.rng)?;

        let seniority_level = match &role.seniority {
            Some(levels) => Some(ctx.pick(&format!("roles[{}].seniority", role.name), levels)?),
            None => None,
        };
        let license_number = match &role.license {
            Some(scheme) => Some(licenses.draw_unique(&mut ctx.rng, |rng| {
                Ok(generate(scheme, rng))
            })?),
            None => None,
        };

        employees.push(Employee {
            employee_id,
            first_name,
            last_name,
            role: role.name.clone(),
            team_id,
            contact,
            status: config.status.default.clone(),
            attributes: RoleAttributes::for_role(role, seniority_level, license_number)?,
        });
    }

    ctx.retries += ids.retries() + licenses.retries();
    Ok(employees)
}

/// Role index per employee: explicit counts first, the remainder drawn
/// uniformly among roles without a count, then shuffled.
fn assign_roles(
    config: &EmployeeConfig,
    rng: &mut dyn RngCore,
) -> Result<Vec<usize>, GenerationError> {
    let plan = RolePlan::from_config(config)?;
    let mut assignments = Vec::with_capacity(config.count as usize);
    for (index, count) in &plan.fixed {
        assignments.extend(std::iter::repeat_n(*index, *count as usize));
    }
    for _ in 0..plan.remainder {
        if let Some(index) = plan.shared.choose(rng) {
            assignments.push(*index);
        }
    }
    assignments.shuffle(rng);
    Ok(assignments)
}

/// Check each distinct format against the number of employees drawing from
/// it.
fn ensure_demand<'a, F>(
    field: &str,
    assignments: &[usize],
    format_of: F,
) -> Result<(), GenerationError>
where
    F: Fn(usize) -> Option<&'a IdFormat>,
{
    let mut demand: Vec<(&IdFormat, u64)> = Vec::new();
    for index in assignments {
        let Some(format) = format_of(*index) else {
            continue;
        };
        match demand.iter_mut().find(|(existing, _)| *existing == format) {
            Some((_, count)) => *count += 1,
            None => demand.push((format, 1)),
        }
    }
    for (format, count) in demand {
        format.ensure_capacity(field, count)?;
    }
    Ok(())
}

/// Promote one technician-category employee, chosen uniformly, to the
/// supervisor status. Returns the promoted employee's identifier.
pub fn elevate_supervisor(
    employees: &mut [Employee],
    supervisor_status: &str,
    rng: &mut dyn RngCore,
) -> Option<String> {
    let candidates: Vec<usize> = employees
        .iter()
        .enumerate()
        .filter(|(_, employee)| employee.category() == RoleCategory::Technician)
        .map(|(index, _)| index)
        .collect();
    let index = *candidates.choose(rng)?;
    let employee = employees.get_mut(index)?;
    employee.status = supervisor_status.to_string();
    Some(employee.employee_id.clone())
}
