//! First-fit assignment of units to fixed-capacity chunks

use crate::plan::Chunk;
use crate::unit::Unit;
use crate::{PackingError, PackingResult};

/// Pack `units` into chunks of `capacity` tokens, first fit, in input order
///
/// Each unit goes into the earliest chunk with room for it; a new chunk is
/// opened only when none has. Units are never split and chunk order is
/// creation order, so the same input always yields the same chunks.
///
/// # Errors
/// - `PackingError::InvalidCapacity` when `capacity` is zero
/// - `PackingError::OversizedUnit` for the first unit (in input order) whose
///   token count exceeds `capacity`; nothing is packed in that case
pub fn pack_first_fit(capacity: usize, units: Vec<Unit>) -> PackingResult<Vec<Chunk>> {
    if capacity == 0 {
        return Err(PackingError::InvalidCapacity(capacity));
    }

    if let Some((index, unit)) = units
        .iter()
        .enumerate()
        .find(|(_, unit)| unit.token_count() > capacity)
    {
        return Err(PackingError::OversizedUnit {
            id: unit.id().to_string(),
            index,
            token_count: unit.token_count(),
            capacity,
        });
    }

    let unit_count = units.len();
    let mut chunks: Vec<Chunk> = Vec::new();

    for unit in units {
        let cost = unit.token_count();
        match chunks.iter_mut().find(|chunk| chunk.remaining(capacity) >= cost) {
            Some(chunk) => chunk.push(unit, capacity),
            None => chunks.push(Chunk::with_unit(unit)),
        }
    }

    tracing::debug!(
        capacity,
        units = unit_count,
        chunks = chunks.len(),
        "Packed units first-fit"
    );
    Ok(chunks)
}
