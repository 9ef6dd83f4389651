//! Entity factories. Each builds one table's records from its configuration,
//! a dedicated RNG and, for dependent tables, the parent pools.

pub mod catalog;
pub mod customers;
pub mod fleet;
pub mod records;
pub mod staff;

use chrono::{Duration, NaiveDate};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use vendsynth_core::{ConfigError, DateWindow, IdFormat, IntRange, MoneyRange, TableId};

use crate::errors::GenerationError;
use crate::ids::IdRegistry;
use crate::text::TextProvider;

/// Per-table build context.
pub struct FactoryContext<'a> {
    pub table: TableId,
    pub rng: ChaCha8Rng,
    pub text: &'a dyn TextProvider,
    pub max_attempts: u32,
    /// Uniqueness collisions resolved by resampling.
    pub retries: u64,
}

impl<'a> FactoryContext<'a> {
    pub fn new(table: TableId, seed: u64, text: &'a dyn TextProvider, max_attempts: u32) -> Self {
        Self {
            table,
            rng: ChaCha8Rng::seed_from_u64(seed),
            text,
            max_attempts,
            retries: 0,
        }
    }

    /// Identifier registry for this table, checked against `requested`.
    pub fn registry(
        &self,
        format: &IdFormat,
        requested: u64,
    ) -> Result<IdRegistry, GenerationError> {
        IdRegistry::new(self.table, format, requested, self.max_attempts)
    }

    /// Uniform choice from a value domain.
    pub fn pick(&mut self, field: &str, values: &[String]) -> Result<String, GenerationError> {
        values
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| ConfigError::EmptyDomain(field.to_string()).into())
    }

    pub fn int(&mut self, range: IntRange) -> i64 {
        self.rng.random_range(range.min..=range.max)
    }

    /// Uniform amount rounded to cents.
    pub fn money(&mut self, range: MoneyRange) -> f64 {
        let value = if range.max > range.min {
            self.rng.random_range(range.min..=range.max)
        } else {
            range.min
        };
        round_cents(value)
    }

    pub fn date(&mut self, window: DateWindow) -> NaiveDate {
        let offset = self.rng.random_range(0..=window.days().max(0));
        window.start + Duration::days(offset)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
