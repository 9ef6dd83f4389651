//! Product-side tables: models, manufacturers and stock items.

use vendsynth_core::{ManufacturerConfig, ModelConfig, StockConfig, TableId};

use crate::binder::ForeignContext;
use crate::entities::{Manufacturer, Model, StockItem};
use crate::errors::GenerationError;
use crate::factory::FactoryContext;

pub fn build_models(
    config: &ModelConfig,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<Model>, GenerationError> {
    let mut ids = ctx.registry(&config.id, config.count)?;
    let mut models = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        models.push(Model {
            model_type: ids.allocate(&mut ctx.rng)?,
            price: ctx.money(config.price),
            capacity: ctx.int(config.capacity),
        });
    }
    ctx.retries += ids.retries();
    Ok(models)
}

/// Manufacturers supply one model each; `supply_Type` is bound from the
/// model pool.
pub fn build_manufacturers(
    config: &ManufacturerConfig,
    foreign: &dyn ForeignContext,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<Manufacturer>, GenerationError> {
    let mut ids = ctx.registry(&config.id, config.count)?;
    let mut manufacturers = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        let supplier_id = ids.allocate(&mut ctx.rng)?;
        let brand = ctx.pick("manufacturers.brands", &config.brands)?;
        let domain = brand_domain(&brand, &config.email_tld);
        let contact_info = ctx.text.email(Some(&domain), &mut ctx.rng)?;
        let supply_type = foreign.pick_fk(TableId::Manufacturer, TableId::Model, &mut ctx.rng)?;
        manufacturers.push(Manufacturer {
            supplier_id,
            brand,
            contact_info,
            supply_type,
            price: ctx.money(config.price),
        });
    }
    ctx.retries += ids.retries();
    Ok(manufacturers)
}

/// `VendTech Inc.` -> `vendtechinc.com`.
fn brand_domain(brand: &str, tld: &str) -> String {
    let host: String = brand
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    let host = if host.is_empty() { "vendor" } else { &host };
    format!("{host}.{}", tld.trim_start_matches('.'))
}

pub fn build_stock(
    config: &StockConfig,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<StockItem>, GenerationError> {
    let mut ids = ctx.registry(&config.id, config.count)?;
    let mut items = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        let item_id = ids.allocate(&mut ctx.rng)?;
        let phrase = ctx.text.catch_phrase(&mut ctx.rng)?;
        let phrase: String = phrase.chars().take(config.name_max_len).collect();
        let packaging = ctx.pick("stock.packaging", &config.packaging)?;
        items.push(StockItem {
            item_id,
            name: format!("{} {packaging}", phrase.trim_end()),
            category: ctx.pick("stock.categories", &config.categories)?,
            wholesale_cost: ctx.money(config.wholesale_cost),
            warehouse: ctx.pick("stock.warehouses", &config.warehouses)?,
        });
    }
    ctx.retries += ids.retries();
    Ok(items)
}
