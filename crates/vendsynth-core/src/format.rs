use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::range::IntRange;

/// Rule describing the shape of an entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdFormat {
    /// Fixed-length string of uppercase ASCII letters.
    Letters { len: u32 },
    /// Uppercase letters and decimal digits in shuffled positions.
    Shuffled { letters: u32, digits: u32 },
    /// Fixed-length decimal string; leading zeros allowed.
    Digits { len: u32 },
    /// Integer drawn from an inclusive range.
    Numeric { min: i64, max: i64 },
    /// Literal prefix followed by an integer from an inclusive band.
    Prefixed { prefix: String, min: u64, max: u64 },
    /// One of a named list, optionally suffixed with `-<n>` from a band.
    Catalog {
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suffix: Option<IntRange>,
    },
}

impl IdFormat {
    /// Number of distinct identifiers this format can produce, saturating at
    /// `u128::MAX`.
    pub fn space_size(&self) -> u128 {
        match self {
            IdFormat::Letters { len } => 26_u128.saturating_pow(*len),
            IdFormat::Shuffled { letters, digits } => {
                binomial(u128::from(*letters) + u128::from(*digits), u128::from(*letters))
                    .saturating_mul(26_u128.saturating_pow(*letters))
                    .saturating_mul(10_u128.saturating_pow(*digits))
            }
            IdFormat::Digits { len } => 10_u128.saturating_pow(*len),
            IdFormat::Numeric { min, max } => IntRange::new(*min, *max).span(),
            IdFormat::Prefixed { min, max, .. } => {
                if max < min {
                    0
                } else {
                    u128::from(max - min) + 1
                }
            }
            IdFormat::Catalog { values, suffix } => {
                let distinct = values.iter().collect::<BTreeSet<_>>().len() as u128;
                match suffix {
                    Some(range) => distinct.saturating_mul(range.span()),
                    None => distinct,
                }
            }
        }
    }

    /// Fail fast when `requested` unique identifiers cannot fit the format.
    pub fn ensure_capacity(&self, table: &str, requested: u64) -> Result<()> {
        let available = self.space_size();
        if available < u128::from(requested) {
            return Err(ConfigError::IdentifierSpaceExhausted {
                table: table.to_string(),
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Whether `candidate` could have been produced by this format.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            IdFormat::Letters { len } => {
                candidate.len() == *len as usize && candidate.bytes().all(|b| b.is_ascii_uppercase())
            }
            IdFormat::Shuffled { letters, digits } => {
                let letter_count = candidate.bytes().filter(|b| b.is_ascii_uppercase()).count();
                let digit_count = candidate.bytes().filter(|b| b.is_ascii_digit()).count();
                letter_count == *letters as usize
                    && digit_count == *digits as usize
                    && candidate.len() == letter_count + digit_count
            }
            IdFormat::Digits { len } => {
                candidate.len() == *len as usize && candidate.bytes().all(|b| b.is_ascii_digit())
            }
            IdFormat::Numeric { min, max } => candidate
                .parse::<i64>()
                .is_ok_and(|value| value >= *min && value <= *max && value.to_string() == candidate),
            IdFormat::Prefixed { prefix, min, max } => candidate
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.parse::<u64>().ok().filter(|value| value.to_string() == rest))
                .is_some_and(|value| value >= *min && value <= *max),
            IdFormat::Catalog { values, suffix } => match suffix {
                None => values.iter().any(|value| value == candidate),
                Some(range) => values.iter().any(|value| {
                    candidate
                        .strip_prefix(value.as_str())
                        .and_then(|rest| rest.strip_prefix('-'))
                        .and_then(|rest| rest.parse::<i64>().ok().filter(|n| n.to_string() == rest))
                        .is_some_and(|number| range.contains(number))
                }),
            },
        }
    }

    /// Whether this format and `other` can produce the same identifier.
    ///
    /// Exact for the numeric, fixed-length and plain catalog shapes; pairs
    /// whose intersection is not cheap to decide are reported as
    /// overlapping.
    pub fn overlaps(&self, other: &IdFormat) -> bool {
        use IdFormat::*;

        if self == other {
            return self.space_size() > 0;
        }
        match (self, other) {
            (Catalog { values, suffix: None }, other) | (other, Catalog { values, suffix: None }) => {
                values.iter().any(|value| other.matches(value))
            }
            (Catalog { .. }, _) | (_, Catalog { .. }) => true,

            (Numeric { min: a_min, max: a_max }, Numeric { min: b_min, max: b_max }) => {
                a_min <= b_max && b_min <= a_max
            }
            (Digits { len: a }, Digits { len: b }) | (Letters { len: a }, Letters { len: b }) => {
                a == b
            }
            (
                Shuffled { letters: a_letters, digits: a_digits },
                Shuffled { letters: b_letters, digits: b_digits },
            ) => a_letters == b_letters && a_digits == b_digits,
            (Letters { len }, Shuffled { letters, digits })
            | (Shuffled { letters, digits }, Letters { len }) => *digits == 0 && letters == len,
            (Digits { len }, Shuffled { letters, digits })
            | (Shuffled { letters, digits }, Digits { len }) => *letters == 0 && digits == len,
            (Digits { len }, Numeric { min, max }) | (Numeric { min, max }, Digits { len }) => {
                digits_overlap_numeric(*len, *min, *max)
            }
            (Shuffled { letters: 0, digits }, Numeric { min, max })
            | (Numeric { min, max }, Shuffled { letters: 0, digits }) => {
                digits_overlap_numeric(*digits, *min, *max)
            }
            (Letters { .. }, Digits { .. } | Numeric { .. } | Prefixed { .. })
            | (Digits { .. } | Numeric { .. } | Prefixed { .. }, Letters { .. })
            | (Shuffled { .. }, Numeric { .. })
            | (Numeric { .. }, Shuffled { .. }) => false,

            (
                Prefixed { prefix: a_prefix, min: a_min, max: a_max },
                Prefixed { prefix: b_prefix, min: b_min, max: b_max },
            ) => {
                if a_prefix == b_prefix {
                    a_min <= b_max && b_min <= a_max
                } else {
                    a_prefix.starts_with(b_prefix.as_str()) || b_prefix.starts_with(a_prefix.as_str())
                }
            }
            (Prefixed { prefix, .. }, Numeric { .. }) | (Numeric { .. }, Prefixed { prefix, .. }) => {
                prefix.bytes().all(|b| b.is_ascii_digit() || b == b'-')
            }
            (Prefixed { prefix, .. }, Digits { .. }) | (Digits { .. }, Prefixed { prefix, .. }) => {
                prefix.bytes().all(|b| b.is_ascii_digit())
            }
            (Prefixed { prefix, .. }, Shuffled { .. }) | (Shuffled { .. }, Prefixed { prefix, .. }) => {
                prefix.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            }
        }
    }

    pub fn validate(&self, field: &str) -> Result<()> {
        let invalid = |message: &str| {
            Err(ConfigError::InvalidFormat {
                field: field.to_string(),
                message: message.to_string(),
            })
        };
        match self {
            IdFormat::Letters { len } | IdFormat::Digits { len } => {
                if *len == 0 {
                    return invalid("len must be > 0");
                }
            }
            IdFormat::Shuffled { letters, digits } => {
                if *letters == 0 && *digits == 0 {
                    return invalid("letters + digits must be > 0");
                }
            }
            IdFormat::Numeric { min, max } => {
                if min > max {
                    return invalid("min must be <= max");
                }
            }
            IdFormat::Prefixed { prefix, min, max } => {
                if prefix.is_empty() {
                    return invalid("prefix must not be empty");
                }
                if min > max {
                    return invalid("min must be <= max");
                }
            }
            IdFormat::Catalog { values, suffix } => {
                if values.is_empty() {
                    return invalid("catalog values must not be empty");
                }
                if values.iter().any(|value| value.trim().is_empty()) {
                    return invalid("catalog values must not be blank");
                }
                if let Some(range) = suffix {
                    range.validate_non_negative(field)?;
                }
            }
        }
        Ok(())
    }
}

/// Whether a `len`-digit string (leading zeros allowed) can equal the decimal
/// rendering of some integer in `min..=max`.
fn digits_overlap_numeric(len: u32, min: i64, max: i64) -> bool {
    if len == 0 {
        return false;
    }
    let low: i128 = if len == 1 { 0 } else { 10_i128.saturating_pow(len - 1) };
    let high: i128 = 10_i128.checked_pow(len).map_or(i128::MAX, |bound| bound - 1);
    i128::from(min) <= high && low <= i128::from(max)
}

fn binomial(n: u128, k: u128) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 1..=k {
        // result * (n - k + i) is always divisible by i.
        result = match result.checked_mul(n - k + i) {
            Some(value) => value / i,
            None => return u128::MAX,
        };
    }
    result
}
