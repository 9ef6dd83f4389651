use vendsynth_core::{CustomerConfig, TableId};

use crate::entities::Customer;
use crate::errors::GenerationError;
use crate::factory::FactoryContext;
use crate::ids::UniqueSet;

pub fn build_customers(
    config: &CustomerConfig,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<Customer>, GenerationError> {
    let mut ids = ctx.registry(&config.id, config.count)?;
    let mut emails = UniqueSet::new(TableId::Customer, "Email", ctx.max_attempts);
    let mut customers = Vec::with_capacity(config.count as usize);

    for _ in 0..config.count {
        let customer_id = ids.allocate(&mut ctx.rng)?;
        let email = if config.unique_emails {
            let text = ctx.text;
            emails.draw_unique(&mut ctx.rng, |rng| text.email(None, rng))?
        } else {
            ctx.text.email(None, &mut ctx.rng)?
        };
        let account_type = ctx.pick("customers.account_types", &config.account_types)?;
        let first_name = ctx.text.first_name(&mut ctx.rng)?;
        let last_name = ctx.text.last_name(&mut ctx.rng)?;
        let province = ctx.pick("customers.provinces", &config.provinces)?;
        let city = ctx.pick("customers.cities", &config.cities)?;
        let street_address = ctx.text.street_address(&mut ctx.rng)?;

        customers.push(Customer {
            customer_id,
            email,
            account_type,
            name: format!("{first_name} {last_name}"),
            first_name,
            last_name,
            address: format!("{street_address}, {city}, {province}"),
            province,
            city,
            street_address,
        });
    }

    ctx.retries += ids.retries() + emails.retries();
    Ok(customers)
}
