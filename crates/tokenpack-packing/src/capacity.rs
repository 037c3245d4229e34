//! Power-of-two chunk capacity selection
//!
//! The capacity must hold the largest unit, so the search starts at the
//! smallest power of two that does. Each doubling is scored by padding, the
//! unused budget left when `total` tokens are spread over
//! `ceil(total / capacity)` full chunks, and the search stops at the first
//! candidate that does not improve on the best so far.
//!
//! Padding for capacity `c` is `(-total) mod c`, and doubling `c` can only
//! keep that remainder or add `c` to it, so the first non-improving step
//! also bounds every later one. The early exit therefore matches a full scan;
//! the tests check this against an exhaustive search.

use crate::{PackingError, PackingResult};
use serde::Serialize;

/// Outcome of capacity selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityChoice {
    /// Chosen chunk capacity (a power of two)
    pub capacity: usize,
    /// Smallest power of two that fits the largest unit
    pub base_capacity: usize,
    /// `ceil(total / capacity)`; first-fit may need more chunks than this
    pub chunk_count_estimate: usize,
    /// `chunk_count_estimate * capacity - total`
    pub padding: usize,
}

/// Smallest power of two `>= max_tokens`, with `1` for a zero maximum
fn base_capacity(max_tokens: usize) -> PackingResult<usize> {
    max_tokens
        .max(1)
        .checked_next_power_of_two()
        .ok_or(PackingError::CapacityOverflow)
}

/// Chunks needed and padding left when `total_tokens` fill `capacity`-sized chunks
fn score(capacity: usize, total_tokens: usize) -> PackingResult<(usize, usize)> {
    let chunks_needed = total_tokens.div_ceil(capacity);
    let padding = chunks_needed
        .checked_mul(capacity)
        .and_then(|allocated| allocated.checked_sub(total_tokens))
        .ok_or(PackingError::CapacityOverflow)?;
    Ok((chunks_needed, padding))
}

/// Choose a power-of-two capacity for the given per-unit token counts
///
/// Zero counts add nothing to the total and never raise the lower bound,
/// but they still belong to the set being sized.
///
/// # Errors
/// - `PackingError::EmptyInput` when `token_counts` is empty
/// - `PackingError::CapacityOverflow` when the totals do not fit in `usize`
pub fn select_capacity(token_counts: &[usize]) -> PackingResult<CapacityChoice> {
    let max_tokens = token_counts
        .iter()
        .copied()
        .max()
        .ok_or(PackingError::EmptyInput)?;
    let total_tokens = token_counts
        .iter()
        .try_fold(0usize, |acc, &count| acc.checked_add(count))
        .ok_or(PackingError::CapacityOverflow)?;
    let base_capacity = base_capacity(max_tokens)?;

    let mut best: Option<CapacityChoice> = None;
    let mut candidate = base_capacity;

    while candidate <= total_tokens {
        let (chunks_needed, padding) = score(candidate, total_tokens)?;
        tracing::trace!(candidate, chunks_needed, padding, "Scored chunk capacity");

        if best.is_some_and(|b| padding >= b.padding) {
            break;
        }
        best = Some(CapacityChoice {
            capacity: candidate,
            base_capacity,
            chunk_count_estimate: chunks_needed,
            padding,
        });
        if padding == 0 {
            break;
        }

        match candidate.checked_mul(2) {
            Some(next) => candidate = next,
            None => break,
        }
    }

    // The loop never runs when the base already exceeds the total
    // (a single unit, or all-zero counts); score the base on its own.
    let choice = match best {
        Some(choice) => choice,
        None => {
            let (chunks_needed, padding) = score(base_capacity, total_tokens)?;
            CapacityChoice {
                capacity: base_capacity,
                base_capacity,
                chunk_count_estimate: chunks_needed,
                padding,
            }
        }
    };

    tracing::debug!(
        units = token_counts.len(),
        total_tokens,
        max_tokens,
        capacity = choice.capacity,
        padding = choice.padding,
        "Selected chunk capacity"
    );
    Ok(choice)
}

#[cfg(test)]
pub(crate) fn select_capacity_exhaustive(token_counts: &[usize]) -> PackingResult<CapacityChoice> {
    let max_tokens = token_counts
        .iter()
        .copied()
        .max()
        .ok_or(PackingError::EmptyInput)?;
    let total_tokens: usize = token_counts.iter().sum();
    let base_capacity = base_capacity(max_tokens)?;

    let (chunks_needed, padding) = score(base_capacity, total_tokens)?;
    let mut best = CapacityChoice {
        capacity: base_capacity,
        base_capacity,
        chunk_count_estimate: chunks_needed,
        padding,
    };

    let mut candidate = base_capacity * 2;
    while candidate <= total_tokens {
        let (chunks_needed, padding) = score(candidate, total_tokens)?;
        if padding < best.padding {
            best = CapacityChoice {
                capacity: candidate,
                base_capacity,
                chunk_count_estimate: chunks_needed,
                padding,
            };
        }
        candidate *= 2;
    }
    Ok(best)
}
