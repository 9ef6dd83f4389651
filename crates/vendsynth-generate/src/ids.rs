//! Identifier synthesis and per-entity uniqueness tracking.

use std::collections::HashSet;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngCore};

use vendsynth_core::{IdFormat, TableId};

use crate::errors::GenerationError;

/// Draw one identifier in the given format. Uniqueness is not checked here.
pub fn generate(format: &IdFormat, rng: &mut dyn RngCore) -> String {
    match format {
        IdFormat::Letters { len } => (0..*len).map(|_| random_letter(rng)).collect(),
        IdFormat::Shuffled { letters, digits } => {
            let mut chars: Vec<char> = (0..*letters).map(|_| random_letter(rng)).collect();
            chars.extend((0..*digits).map(|_| random_digit(rng)));
            chars.shuffle(rng);
            chars.into_iter().collect()
        }
        IdFormat::Digits { len } => (0..*len).map(|_| random_digit(rng)).collect(),
        IdFormat::Numeric { min, max } => rng.random_range(*min..=*max).to_string(),
        IdFormat::Prefixed { prefix, min, max } => {
            format!("{prefix}{}", rng.random_range(*min..=*max))
        }
        IdFormat::Catalog { values, suffix } => {
            let value = values.choose(rng).map(String::as_str).unwrap_or_default();
            match suffix {
                Some(range) => format!("{value}-{}", rng.random_range(range.min..=range.max)),
                None => value.to_string(),
            }
        }
    }
}

/// Whether `candidate` could have been produced by `format`.
pub fn matches(format: &IdFormat, candidate: &str) -> bool {
    format.matches(candidate)
}

fn random_letter(rng: &mut dyn RngCore) -> char {
    char::from(rng.random_range(b'A'..=b'Z'))
}

fn random_digit(rng: &mut dyn RngCore) -> char {
    char::from(rng.random_range(b'0'..=b'9'))
}

/// Set of values already handed out for one column of one entity type.
#[derive(Debug)]
pub struct UniqueSet {
    table: TableId,
    what: &'static str,
    used: HashSet<String>,
    max_attempts: u32,
    retries: u64,
}

impl UniqueSet {
    pub fn new(table: TableId, what: &'static str, max_attempts: u32) -> Self {
        Self {
            table,
            what,
            used: HashSet::new(),
            max_attempts: max_attempts.max(1),
            retries: 0,
        }
    }

    /// Record `candidate` as used; false when it was already taken.
    pub fn reserve(&mut self, candidate: &str) -> bool {
        if self.used.contains(candidate) {
            return false;
        }
        self.used.insert(candidate.to_string())
    }

    pub fn is_unique(&self, candidate: &str) -> bool {
        !self.used.contains(candidate)
    }

    /// Draw until an unused value comes up, then reserve it.
    pub fn draw_unique<F>(
        &mut self,
        rng: &mut dyn RngCore,
        mut draw: F,
    ) -> Result<String, GenerationError>
    where
        F: FnMut(&mut dyn RngCore) -> Result<String, GenerationError>,
    {
        for attempt in 0..self.max_attempts {
            let candidate = draw(rng)?;
            if self.reserve(&candidate) {
                return Ok(candidate);
            }
            if attempt + 1 < self.max_attempts {
                self.retries += 1;
            }
        }
        Err(GenerationError::RetriesExhausted {
            table: self.table,
            what: self.what,
            attempts: self.max_attempts,
        })
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Collisions resolved by resampling so far.
    pub fn retries(&self) -> u64 {
        self.retries
    }
}

/// Allocated-identifier registry owned by one entity factory.
#[derive(Debug)]
pub struct IdRegistry {
    format: IdFormat,
    used: UniqueSet,
}

impl IdRegistry {
    /// Create a registry for `requested` identifiers, failing fast when the
    /// format cannot hold that many.
    pub fn new(
        table: TableId,
        format: &IdFormat,
        requested: u64,
        max_attempts: u32,
    ) -> Result<Self, GenerationError> {
        format.ensure_capacity(table.as_str(), requested)?;
        Ok(Self {
            format: format.clone(),
            used: UniqueSet::new(table, "identifier", max_attempts),
        })
    }

    pub fn reserve(&mut self, candidate: &str) -> bool {
        self.used.reserve(candidate)
    }

    pub fn is_unique(&self, candidate: &str) -> bool {
        self.used.is_unique(candidate)
    }

    /// Mint a fresh identifier and record it.
    pub fn allocate(&mut self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        let format = &self.format;
        self.used.draw_unique(rng, |rng| Ok(generate(format, rng)))
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn retries(&self) -> u64 {
        self.used.retries()
    }
}
