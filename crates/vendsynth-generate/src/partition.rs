//! Disjoint split of the shared record pool into sub-record key sets.

use rand::RngCore;
use rand::seq::SliceRandom;

use vendsynth_core::ConfigError;

use crate::errors::GenerationError;

/// Shuffle `pool` and slice it into contiguous runs of `sizes`, returned in
/// request order. Keys past the last run stay unassigned.
pub fn partition(
    pool: &[String],
    sizes: &[u64],
    rng: &mut dyn RngCore,
) -> Result<Vec<Vec<String>>, GenerationError> {
    let requested = sizes.iter().copied().fold(0_u64, u64::saturating_add);
    let available = pool.len() as u64;
    if requested > available {
        return Err(ConfigError::PartitionOverAllocated {
            requested,
            pool: available,
        }
        .into());
    }

    let mut shuffled: Vec<&String> = pool.iter().collect();
    shuffled.shuffle(rng);

    let mut subsets = Vec::with_capacity(sizes.len());
    let mut start = 0_usize;
    for size in sizes {
        let end = start + *size as usize;
        subsets.push(shuffled[start..end].iter().map(|key| (*key).clone()).collect());
        start = end;
    }
    Ok(subsets)
}
