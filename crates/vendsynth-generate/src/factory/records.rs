//! Service records and the three sub-record tables carved from them.

use chrono::TimeDelta;

use vendsynth_core::{
    ConfigError, MaintenanceRecordConfig, PaymentRecordConfig, RecordConfig, RestockRecordConfig,
    TableId,
};

use crate::binder::ForeignContext;
use crate::entities::{MaintenanceRecord, PaymentRecord, Record, RestockRecord};
use crate::errors::GenerationError;
use crate::factory::{FactoryContext, round_cents};

pub fn build_records(
    config: &RecordConfig,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<Record>, GenerationError> {
    let mut ids = ctx.registry(&config.id, config.count)?;
    let mut records = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        let record_id = ids.allocate(&mut ctx.rng)?;
        let date_requested = ctx.date(config.requested_window);
        let date_completed = if ctx.chance(config.completed_share) {
            let days = ctx.int(config.completion_days).max(0);
            let completed = TimeDelta::try_days(days)
                .and_then(|delta| date_requested.checked_add_signed(delta))
                .ok_or_else(|| ConfigError::InvalidRange {
                    field: "records.completion_days".to_string(),
                    message: format!("{date_requested} + {days} days is out of range"),
                })?;
            Some(completed)
        } else {
            None
        };
        records.push(Record {
            record_id,
            date_requested,
            date_completed,
        });
    }
    ctx.retries += ids.retries();
    Ok(records)
}

pub fn build_payment_records(
    config: &PaymentRecordConfig,
    keys: &[String],
    foreign: &dyn ForeignContext,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<PaymentRecord>, GenerationError> {
    foreign.ensure_all(TableId::PaymentRecord, TableId::Record, keys)?;
    keys.iter()
        .map(|record_id| {
            Ok(PaymentRecord {
                record_id: record_id.clone(),
                payment_type: ctx.pick("records.payment.payment_types", &config.payment_types)?,
                amount: ctx.money(config.amount),
            })
        })
        .collect()
}

pub fn build_maintenance_records(
    config: &MaintenanceRecordConfig,
    keys: &[String],
    foreign: &dyn ForeignContext,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<MaintenanceRecord>, GenerationError> {
    foreign.ensure_all(TableId::MaintenanceRecord, TableId::Record, keys)?;
    keys.iter()
        .map(|record_id| {
            let team_id = ctx.int(config.team_id);
            let sentence = ctx.text.sentence(config.description_words, &mut ctx.rng)?;
            let description = match config.description_suffix.as_str() {
                "" => sentence,
                suffix => format!("{sentence} {suffix}"),
            };
            Ok(MaintenanceRecord {
                record_id: record_id.clone(),
                team_id,
                description,
                status: ctx.pick("records.maintenance.statuses", &config.statuses)?,
            })
        })
        .collect()
}

/// Restock cost is a per-unit draw times the quantity, rounded to cents.
pub fn build_restock_records(
    config: &RestockRecordConfig,
    keys: &[String],
    foreign: &dyn ForeignContext,
    ctx: &mut FactoryContext<'_>,
) -> Result<Vec<RestockRecord>, GenerationError> {
    foreign.ensure_all(TableId::RestockRecord, TableId::Record, keys)?;
    keys.iter()
        .map(|record_id| {
            let quantity = ctx.int(config.quantity);
            let unit_cost = ctx.money(config.unit_cost);
            Ok(RestockRecord {
                record_id: record_id.clone(),
                quantity,
                cost: round_cents(unit_cost * quantity as f64),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendsynth_core::IntRange;

    use crate::binder::InMemoryForeignContext;
    use crate::text::FakeTextProvider;

    fn records(count: u64, completed_share: f64) -> Vec<Record> {
        let text = FakeTextProvider;
        let config = RecordConfig {
            count,
            completed_share,
            ..RecordConfig::default()
        };
        let mut ctx = FactoryContext::new(TableId::Record, 21, &text, 100_000);
        build_records(&config, &mut ctx).expect("records")
    }

    #[test]
    fn completion_never_precedes_request() {
        let config = RecordConfig::default();
        for record in records(1_000, 0.9) {
            if let Some(completed) = record.date_completed {
                let offset = (completed - record.date_requested).num_days();
                assert!(config.completion_days.contains(offset), "offset {offset}");
            }
        }
    }

    #[test]
    fn oversized_completion_lag_is_an_error() {
        let text = FakeTextProvider;
        let config = RecordConfig {
            count: 10,
            completed_share: 1.0,
            completion_days: IntRange::new(1_000_000_000_000_000, 1_000_000_000_000_000),
            ..RecordConfig::default()
        };
        let mut ctx = FactoryContext::new(TableId::Record, 21, &text, 100_000);
        let err = build_records(&config, &mut ctx).expect_err("date overflow");
        assert!(matches!(
            err,
            GenerationError::Config(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn completed_share_controls_nulls() {
        assert!(records(200, 0.0).iter().all(|r| r.date_completed.is_none()));
        assert!(records(200, 1.0).iter().all(|r| r.date_completed.is_some()));
    }

    #[test]
    fn sub_records_reject_unknown_parents() {
        let text = FakeTextProvider;
        let mut foreign = InMemoryForeignContext::new();
        foreign.ingest_table(TableId::Record, vec!["AB123CD456".to_string()]);
        let mut ctx = FactoryContext::new(TableId::PaymentRecord, 1, &text, 10);
        let err = build_payment_records(
            &PaymentRecordConfig::default(),
            &["ZZ999ZZ999".to_string()],
            &foreign,
            &mut ctx,
        )
        .expect_err("unknown record");
        assert!(matches!(err, GenerationError::ReferentialViolation { .. }));
    }

    #[test]
    fn restock_cost_scales_with_quantity() {
        let text = FakeTextProvider;
        let keys: Vec<String> = (0..50).map(|i| format!("R{i}")).collect();
        let mut foreign = InMemoryForeignContext::new();
        foreign.ingest_table(TableId::Record, keys.clone());
        let config = RestockRecordConfig::default();
        let mut ctx = FactoryContext::new(TableId::RestockRecord, 2, &text, 10);
        let rows = build_restock_records(&config, &keys, &foreign, &mut ctx).expect("restock");
        assert_eq!(rows.len(), 50);
        for row in &rows {
            assert!(config.quantity.contains(row.quantity));
            let per_unit = row.cost / row.quantity as f64;
            assert!(per_unit >= config.unit_cost.min - 0.01);
            assert!(per_unit <= config.unit_cost.max + 0.01);
        }
    }

    #[test]
    fn maintenance_descriptions_carry_suffix() {
        let text = FakeTextProvider;
        let keys = vec!["R1".to_string(), "R2".to_string()];
        let mut foreign = InMemoryForeignContext::new();
        foreign.ingest_table(TableId::Record, keys.clone());
        let config = MaintenanceRecordConfig::default();
        let mut ctx = FactoryContext::new(TableId::MaintenanceRecord, 3, &text, 10);
        let rows =
            build_maintenance_records(&config, &keys, &foreign, &mut ctx).expect("maintenance");
        for row in &rows {
            assert!(row.description.ends_with(" maintenance"));
            assert_eq!(
                row.description.split_whitespace().count(),
                config.description_words + 1
            );
        }
    }
}
