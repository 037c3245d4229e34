//! Plan-level guarantees checked over generated unit sets

use proptest::prelude::*;
use tokenpack_packing::{PackingError, PackingPlan, Unit, select_capacity};

fn units_from(counts: &[usize]) -> Vec<Unit> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &tokens)| {
            let start = 1 + i * 10;
            Unit::new(format!("fn_{i}"), "gen.cpp", start, start + 5, tokens).unwrap()
        })
        .collect()
}

fn token_counts() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..2_000, 1..60)
}

proptest! {
    #[test]
    fn test_every_unit_lands_in_exactly_one_chunk(counts in token_counts()) {
        let units = units_from(&counts);
        let mut expected: Vec<String> = units.iter().map(|u| u.id().to_string()).collect();

        let plan = PackingPlan::build(units, None).unwrap();
        let mut placed: Vec<String> = plan
            .chunks
            .iter()
            .flat_map(|chunk| chunk.units().iter().map(|u| u.id().to_string()))
            .collect();
        placed.sort();
        expected.sort();

        prop_assert_eq!(placed, expected);
    }

    #[test]
    fn test_chunks_respect_capacity_and_totals(counts in token_counts()) {
        let plan = PackingPlan::build(units_from(&counts), None).unwrap();

        prop_assert!(plan.capacity.is_power_of_two());
        prop_assert!(plan.capacity >= plan.max_unit_tokens);

        let mut sum = 0;
        for chunk in &plan.chunks {
            prop_assert!(!chunk.is_empty());
            let recomputed: usize = chunk.units().iter().map(Unit::token_count).sum();
            prop_assert_eq!(recomputed, chunk.total_tokens());
            prop_assert!(chunk.total_tokens() <= plan.capacity);
            sum += recomputed;
        }

        prop_assert_eq!(sum, plan.total_tokens);
        prop_assert_eq!(
            plan.padding,
            plan.capacity * plan.chunk_count() - plan.total_tokens
        );
    }

    #[test]
    fn test_chunk_order_follows_first_placement(counts in token_counts()) {
        let units = units_from(&counts);
        let positions: Vec<String> = units.iter().map(|u| u.id().to_string()).collect();
        let plan = PackingPlan::build(units, None).unwrap();

        // the first unit of each chunk appears in input order
        let openers: Vec<usize> = plan
            .chunks
            .iter()
            .filter_map(|chunk| chunk.units().first())
            .filter_map(|unit| positions.iter().position(|id| id == unit.id()))
            .collect();
        prop_assert!(openers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_builds_are_reproducible(counts in token_counts()) {
        let first = PackingPlan::build(units_from(&counts), None).unwrap();
        let second = PackingPlan::build(units_from(&counts), None).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_selected_capacity_matches_plan(counts in token_counts()) {
        let choice = select_capacity(&counts).unwrap();

        let plan = PackingPlan::build(units_from(&counts), None).unwrap();
        prop_assert_eq!(plan.selection, Some(choice));
        prop_assert!(plan.chunk_count() >= choice.chunk_count_estimate);
    }
}

#[test]
fn test_fixed_capacity_reports_first_oversized_unit() {
    let units = vec![
        Unit::new("small", "a.cpp", 1, 2, 10).unwrap(),
        Unit::new("big", "a.cpp", 3, 90, 700).unwrap(),
        Unit::new("bigger", "a.cpp", 91, 200, 900).unwrap(),
    ];

    match PackingPlan::build(units, Some(512)) {
        Err(PackingError::OversizedUnit {
            id,
            index,
            token_count,
            capacity,
        }) => {
            assert_eq!(id, "big");
            assert_eq!(index, 1);
            assert_eq!(token_count, 700);
            assert_eq!(capacity, 512);
        }
        other => panic!("expected an oversized unit error, got {other:?}"),
    }
}
