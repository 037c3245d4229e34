//! Chunks and the packing plan handed to reporting

use crate::capacity::{CapacityChoice, select_capacity};
use crate::packer::pack_first_fit;
use crate::unit::Unit;
use crate::{PackingError, PackingResult};
use serde::Serialize;

/// An ordered group of units whose token total never exceeds capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    units: Vec<Unit>,
    total_tokens: usize,
}

impl Chunk {
    /// Open a chunk with its first unit
    pub(crate) fn with_unit(unit: Unit) -> Self {
        Self {
            total_tokens: unit.token_count(),
            units: vec![unit],
        }
    }

    /// Tokens still free under `capacity`
    pub(crate) const fn remaining(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.total_tokens)
    }

    /// Append a unit the caller has checked against [`Chunk::remaining`]
    pub(crate) fn push(&mut self, unit: Unit, capacity: usize) {
        debug_assert!(unit.token_count() <= self.remaining(capacity));
        self.total_tokens = self.total_tokens.saturating_add(unit.token_count());
        self.units.push(unit);
    }

    /// Units in assignment order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub const fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Final output of a run: the capacity, the chunks, and their statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingPlan {
    /// Token budget of every chunk
    pub capacity: usize,
    /// Chunks in creation order
    pub chunks: Vec<Chunk>,
    /// Sum of all unit token counts
    pub total_tokens: usize,
    /// Largest single unit
    pub max_unit_tokens: usize,
    /// `capacity * chunks.len() - total_tokens`
    pub padding: usize,
    /// Selector output, absent when the capacity was supplied or nothing was packed
    pub selection: Option<CapacityChoice>,
}

impl PackingPlan {
    /// The plan for a run that found nothing to pack
    pub const fn empty() -> Self {
        Self {
            capacity: 0,
            chunks: Vec::new(),
            total_tokens: 0,
            max_unit_tokens: 0,
            padding: 0,
            selection: None,
        }
    }

    /// Size and pack `units`
    ///
    /// With `capacity_override` the selector is skipped and the given
    /// capacity is used as is (it need not be a power of two).
    ///
    /// # Errors
    /// - `PackingError::EmptyInput` when `units` is empty and no capacity was supplied
    /// - `PackingError::OversizedUnit` when a supplied capacity is below the largest unit
    /// - `PackingError::InvalidCapacity` when a supplied capacity is zero
    /// - `PackingError::CapacityOverflow` when totals do not fit in `usize`
    pub fn build(units: Vec<Unit>, capacity_override: Option<usize>) -> PackingResult<Self> {
        let counts: Vec<usize> = units.iter().map(Unit::token_count).collect();
        let total_tokens = counts
            .iter()
            .try_fold(0usize, |acc, &count| acc.checked_add(count))
            .ok_or(PackingError::CapacityOverflow)?;
        let max_unit_tokens = counts.iter().copied().max().unwrap_or(0);

        let (capacity, selection) = match capacity_override {
            Some(capacity) => (capacity, None),
            None => {
                let choice = select_capacity(&counts)?;
                (choice.capacity, Some(choice))
            }
        };

        let chunks = pack_first_fit(capacity, units)?;
        let padding = capacity
            .checked_mul(chunks.len())
            .and_then(|allocated| allocated.checked_sub(total_tokens))
            .ok_or(PackingError::CapacityOverflow)?;

        Ok(Self {
            capacity,
            chunks,
            total_tokens,
            max_unit_tokens,
            padding,
            selection,
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn unit_count(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl Default for PackingPlan {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(counts: &[usize]) -> Vec<Unit> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Unit::new(format!("fn_{i}"), "a.cpp", i + 1, i + 1, count).unwrap())
            .collect()
    }

    #[test]
    fn test_build_selects_and_packs() {
        let plan = PackingPlan::build(units(&[5, 3, 4, 2, 6]), None).unwrap();

        assert_eq!(plan.capacity, 8);
        assert_eq!(plan.chunk_count(), 3);
        assert_eq!(plan.total_tokens, 20);
        assert_eq!(plan.max_unit_tokens, 6);
        assert_eq!(plan.padding, 4);
        assert_eq!(plan.selection.map(|s| s.capacity), Some(8));
    }

    #[test]
    fn test_padding_uses_actual_chunk_count() {
        // selector estimates ceil(20/8) = 3 chunks; first-fit needs 4 here
        let plan = PackingPlan::build(units(&[5, 5, 5, 5]), None).unwrap();
        assert_eq!(plan.capacity, 8);
        assert_eq!(plan.chunk_count(), 4);
        assert_eq!(plan.selection.map(|s| s.chunk_count_estimate), Some(3));
        assert_eq!(plan.padding, 12);
    }

    #[test]
    fn test_build_rejects_empty_without_override() {
        assert_eq!(
            PackingPlan::build(Vec::new(), None),
            Err(PackingError::EmptyInput)
        );
    }

    #[test]
    fn test_override_skips_selection() {
        let plan = PackingPlan::build(units(&[5, 3, 4]), Some(100)).unwrap();
        assert_eq!(plan.capacity, 100);
        assert_eq!(plan.chunk_count(), 1);
        assert_eq!(plan.padding, 88);
        assert!(plan.selection.is_none());
    }

    #[test]
    fn test_override_below_largest_unit_fails() {
        let err = PackingPlan::build(units(&[2, 5, 1]), Some(4)).unwrap_err();
        assert!(matches!(err, PackingError::OversizedUnit { token_count: 5, .. }));
    }

    #[test]
    fn test_empty_plan() {
        let plan = PackingPlan::empty();
        assert!(plan.is_empty());
        assert_eq!(plan.padding, 0);
        assert_eq!(plan.unit_count(), 0);
    }

    #[test]
    fn test_plan_serializes_as_plain_data() {
        let plan = PackingPlan::build(units(&[3, 3]), None).unwrap();
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["capacity"], 4);
        assert_eq!(json["chunks"][0]["total_tokens"], 3);
        assert_eq!(json["chunks"][0]["units"][0]["id"], "fn_0");
    }
}
