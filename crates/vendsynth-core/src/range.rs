use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Number of distinct values in the range.
    pub fn span(&self) -> u128 {
        if self.max < self.min {
            return 0;
        }
        (i128::from(self.max) - i128::from(self.min) + 1) as u128
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn validate(&self, field: &str) -> Result<()> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field: field.to_string(),
                message: format!("min {} must be <= max {}", self.min, self.max),
            });
        }
        Ok(())
    }

    /// Like [`IntRange::validate`], additionally rejecting negative bounds.
    pub fn validate_non_negative(&self, field: &str) -> Result<()> {
        self.validate(field)?;
        if self.min < 0 {
            return Err(ConfigError::InvalidRange {
                field: field.to_string(),
                message: format!("min {} must not be negative", self.min),
            });
        }
        Ok(())
    }
}

/// Inclusive monetary range; generated amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MoneyRange {
    pub min: f64,
    pub max: f64,
}

impl MoneyRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, field: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::InvalidRange {
                field: field.to_string(),
                message: "bounds must be finite".to_string(),
            });
        }
        if self.min < 0.0 {
            return Err(ConfigError::InvalidRange {
                field: field.to_string(),
                message: format!("min {} must not be negative", self.min),
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field: field.to_string(),
                message: format!("min {} must be <= max {}", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whole days between start and end.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn validate(&self, field: &str) -> Result<()> {
        if self.start > self.end {
            return Err(ConfigError::InvalidRange {
                field: field.to_string(),
                message: format!("start {} must be <= end {}", self.start, self.end),
            });
        }
        Ok(())
    }
}
