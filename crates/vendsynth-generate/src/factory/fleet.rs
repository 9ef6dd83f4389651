use vendsynth_core::MachineConfig;

use crate::entities::VendingMachine;
use crate::errors::GenerationError;
use crate::factory::FactoryContext;

pub fn build_machines(
    config: &MachineConfig,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<VendingMachine>, GenerationError> {
    let mut ids = ctx.registry(&config.id, config.count)?;
    let mut machines = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        machines.push(VendingMachine {
            machine_id: ids.allocate(&mut ctx.rng)?,
            status: ctx.pick("machines.statuses", &config.statuses)?,
            purchase_date: ctx.date(config.purchase_window),
        });
    }
    ctx.retries += ids.retries();
    Ok(machines)
}
