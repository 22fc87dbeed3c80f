use tracing::debug;

use crate::budget::tables::AllocationTables;
use crate::budget::{BudgetBreakdown, BudgetCategory};
use crate::trip::TripParameters;

pub fn category_multiplier(
    params: &TripParameters,
    tables: &AllocationTables,
    category: BudgetCategory,
) -> f64 {
    let destination = tables.destination_multipliers(&params.destination);
    let style = tables.style_multipliers(params.travel_style);
    let group = tables.group_multipliers(params.group_size);
    destination.for_category(category) * style.for_category(category) * group.for_category(category)
}

pub fn category_weight(
    params: &TripParameters,
    tables: &AllocationTables,
    category: BudgetCategory,
) -> f64 {
    tables.base_ratio(category) * category_multiplier(params, tables, category)
}

// `duration_days` has no effect on the split.
pub fn compute_initial_breakdown(
    params: &TripParameters,
    tables: &AllocationTables,
) -> BudgetBreakdown {
    let weights = BudgetBreakdown::from_fn(|category| category_weight(params, tables, category));
    debug!(
        destination = %params.destination,
        style = %params.travel_style,
        group_size = params.group_size,
        weight_total = weights.total(),
        "computed category weights"
    );
    renormalize(&weights, params.total_budget)
}

/// Scales every category so the breakdown sums to `total`. Infinite entries
/// split `total` evenly; an all-zero breakdown stays zero.
pub fn renormalize(breakdown: &BudgetBreakdown, total: f64) -> BudgetBreakdown {
    if total.is_nan() || total <= 0.0 {
        return BudgetBreakdown::zero();
    }
    let peak = breakdown
        .iter()
        .map(|(_, amount)| amount)
        .fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return BudgetBreakdown::zero();
    }
    if peak.is_infinite() {
        let unbounded = breakdown
            .iter()
            .filter(|(_, amount)| *amount == f64::INFINITY)
            .count() as f64;
        return breakdown.map(|_, amount| {
            if amount == f64::INFINITY {
                total / unbounded
            } else {
                0.0
            }
        });
    }

    // Divide by the peak first so the sum cannot overflow.
    let scaled = breakdown.map(|_, amount| (amount / peak).max(0.0));
    let sum = scaled.total();
    let normalized = scaled.map(|_, share| share / sum * total);
    debug_assert!(
        normalized.is_conserved(total),
        "renormalized breakdown drifted from {total}: {}",
        normalized.total()
    );
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::TravelStyle;

    fn params(destination: &str, style: TravelStyle, group_size: u32, budget: f64) -> TripParameters {
        TripParameters {
            destination: destination.to_string(),
            duration_days: 5,
            total_budget: budget,
            interests: Vec::new(),
            travel_style: style,
            group_size,
        }
    }

    #[test]
    fn neutral_trip_keeps_base_ratios() {
        let tables = AllocationTables::standard();
        let breakdown =
            compute_initial_breakdown(&params("Reykjavik", TravelStyle::Balanced, 1, 1000.0), &tables);
        assert!((breakdown.get(BudgetCategory::Accommodation) - 400.0).abs() < 1e-9);
        assert!((breakdown.get(BudgetCategory::Activities) - 250.0).abs() < 1e-9);
        assert!((breakdown.get(BudgetCategory::Food) - 200.0).abs() < 1e-9);
        assert!((breakdown.get(BudgetCategory::Transportation) - 100.0).abs() < 1e-9);
        assert!((breakdown.get(BudgetCategory::Entertainment) - 30.0).abs() < 1e-9);
        assert!((breakdown.get(BudgetCategory::Miscellaneous) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn bali_budget_trip_reduces_accommodation_and_food() {
        let tables = AllocationTables::standard();
        let breakdown =
            compute_initial_breakdown(&params("Bali", TravelStyle::Budget, 1, 1000.0), &tables);
        assert!(breakdown.get(BudgetCategory::Accommodation) < 400.0);
        assert!(breakdown.get(BudgetCategory::Food) < 200.0);
        assert!((breakdown.total() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn conserves_total_across_inputs() {
        let tables = AllocationTables::standard();
        for destination in ["London", "Bali", "Tokyo", "Nowhere", "Mexico City"] {
            for style in TravelStyle::ALL {
                for group_size in [1, 2, 3, 5, 6, 12] {
                    for budget in [0.0, 1.0, 999.99, 25_000.0] {
                        let p = params(destination, style, group_size, budget);
                        let breakdown = compute_initial_breakdown(&p, &tables);
                        assert!(
                            breakdown.is_conserved(budget),
                            "{destination}/{style}/{group_size}/{budget}: {}",
                            breakdown.total()
                        );
                        assert!(breakdown.iter().all(|(_, amount)| amount >= 0.0));
                    }
                }
            }
        }
    }

    #[test]
    fn zero_budget_yields_zero_breakdown() {
        let tables = AllocationTables::standard();
        let breakdown =
            compute_initial_breakdown(&params("Paris", TravelStyle::Luxury, 4, 0.0), &tables);
        assert_eq!(breakdown, BudgetBreakdown::zero());
    }

    #[test]
    fn duration_does_not_change_breakdown() {
        let tables = AllocationTables::standard();
        let mut short = params("Paris", TravelStyle::Adventure, 2, 3000.0);
        short.duration_days = 2;
        let mut long = short.clone();
        long.duration_days = 21;
        assert_eq!(
            compute_initial_breakdown(&short, &tables),
            compute_initial_breakdown(&long, &tables)
        );
    }

    #[test]
    fn large_groups_shift_share_away_from_accommodation() {
        let tables = AllocationTables::standard();
        let solo = compute_initial_breakdown(&params("Paris", TravelStyle::Balanced, 1, 1000.0), &tables);
        let group = compute_initial_breakdown(&params("Paris", TravelStyle::Balanced, 8, 1000.0), &tables);
        assert!(
            group.get(BudgetCategory::Accommodation) < solo.get(BudgetCategory::Accommodation)
        );
        assert!(group.get(BudgetCategory::Entertainment) > solo.get(BudgetCategory::Entertainment));
    }

    #[test]
    fn substituted_tables_drive_allocation() {
        let mut tables = AllocationTables::standard();
        tables.destinations.clear();
        let breakdown = compute_initial_breakdown(&params("Bali", TravelStyle::Balanced, 1, 1000.0), &tables);
        assert!((breakdown.get(BudgetCategory::Accommodation) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn renormalize_is_idempotent() {
        let tables = AllocationTables::standard();
        let once =
            compute_initial_breakdown(&params("Tokyo", TravelStyle::Luxury, 3, 4200.0), &tables);
        let twice = renormalize(&once, 4200.0);
        for (category, amount) in once.iter() {
            assert!((twice.get(category) - amount).abs() < 1e-9);
        }
    }

    #[test]
    fn huge_finite_budget_is_conserved() {
        let tables = AllocationTables::standard();
        for budget in [1e300, 1.5e308, f64::MAX] {
            let breakdown =
                compute_initial_breakdown(&params("London", TravelStyle::Luxury, 1, budget), &tables);
            assert!(breakdown.is_conserved(budget), "{budget}: {}", breakdown.total());
            assert!(breakdown.get(BudgetCategory::Accommodation) > 0.0);
        }
    }

    #[test]
    fn renormalize_handles_amounts_whose_sum_overflows() {
        let huge = BudgetBreakdown::from_fn(|c| match c {
            BudgetCategory::Accommodation | BudgetCategory::Food => 1e308,
            _ => 0.0,
        });
        let normalized = renormalize(&huge, 1000.0);
        assert!((normalized.get(BudgetCategory::Accommodation) - 500.0).abs() < 1e-9);
        assert!((normalized.get(BudgetCategory::Food) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn renormalize_gives_infinite_entries_the_total() {
        let mut breakdown = BudgetBreakdown::zero();
        breakdown.set(BudgetCategory::Food, f64::INFINITY);
        breakdown.set(BudgetCategory::Activities, 40.0);
        let normalized = renormalize(&breakdown, 300.0);
        assert_eq!(normalized.get(BudgetCategory::Food), 300.0);
        assert_eq!(normalized.get(BudgetCategory::Activities), 0.0);
    }

    #[test]
    fn renormalize_zero_sum_stays_zero() {
        assert_eq!(
            renormalize(&BudgetBreakdown::zero(), 500.0),
            BudgetBreakdown::zero()
        );
    }
}
