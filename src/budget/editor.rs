use tracing::debug;

use crate::budget::allocator::renormalize;
use crate::budget::{BudgetBreakdown, BudgetCategory};

/// Sets one category, floored at zero. When the sum then exceeds
/// `total_budget`, every category is scaled down proportionally to fit.
pub fn update_category(
    breakdown: &BudgetBreakdown,
    total_budget: f64,
    category: BudgetCategory,
    new_value: f64,
) -> BudgetBreakdown {
    let value = if new_value.is_nan() {
        0.0
    } else {
        new_value.max(0.0)
    };
    let mut updated = breakdown.map(|_, amount| amount.max(0.0));
    updated.set(category, value);

    let sum = updated.total();
    let budget = total_budget.max(0.0);
    if sum <= budget {
        return updated;
    }

    debug!(
        %category,
        requested = value,
        sum,
        budget,
        "category edit exceeds budget, scaling down"
    );
    renormalize(&updated, budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BudgetBreakdown {
        BudgetBreakdown::from_fn(|c| match c {
            BudgetCategory::Accommodation => 400.0,
            BudgetCategory::Activities => 250.0,
            BudgetCategory::Food => 200.0,
            BudgetCategory::Transportation => 100.0,
            BudgetCategory::Entertainment => 30.0,
            BudgetCategory::Miscellaneous => 20.0,
        })
    }

    #[test]
    fn lowering_a_category_leaves_others_untouched() {
        let updated = update_category(&base(), 1000.0, BudgetCategory::Food, 120.0);
        assert_eq!(updated.get(BudgetCategory::Food), 120.0);
        assert_eq!(updated.get(BudgetCategory::Accommodation), 400.0);
        assert!((updated.total() - 920.0).abs() < 1e-9);
    }

    #[test]
    fn oversize_value_is_scaled_back_to_budget() {
        let updated = update_category(&base(), 1000.0, BudgetCategory::Accommodation, 2000.0);
        assert!((updated.total() - 1000.0).abs() < 1e-6);
        let accommodation = updated.get(BudgetCategory::Accommodation);
        assert!(accommodation < 2000.0);
        // 2000 / (2000 + 600) of the budget
        assert!((accommodation - 2000.0 * 1000.0 / 2600.0).abs() < 1e-9);
    }

    #[test]
    fn negative_and_nan_values_floor_at_zero() {
        let updated = update_category(&base(), 1000.0, BudgetCategory::Food, -50.0);
        assert_eq!(updated.get(BudgetCategory::Food), 0.0);
        let updated = update_category(&base(), 1000.0, BudgetCategory::Food, f64::NAN);
        assert_eq!(updated.get(BudgetCategory::Food), 0.0);
    }

    #[test]
    fn never_exceeds_budget() {
        let values = [0.0, 1.0, 99.5, 600.0, 1000.0, 1e6, f64::INFINITY];
        for category in BudgetCategory::ALL {
            for value in values {
                let updated = update_category(&base(), 1000.0, category, value);
                assert!(
                    updated.total() <= 1000.0 + 1e-6,
                    "{category} = {value} gave {}",
                    updated.total()
                );
                assert!(updated.iter().all(|(_, amount)| amount >= 0.0));
            }
        }
    }

    #[test]
    fn overflowing_sum_still_scales_proportionally() {
        let huge = BudgetBreakdown::from_fn(|c| match c {
            BudgetCategory::Accommodation | BudgetCategory::Food => 1e308,
            _ => 0.0,
        });
        let updated = update_category(&huge, 1000.0, BudgetCategory::Miscellaneous, 5.0);
        assert!((updated.get(BudgetCategory::Accommodation) - 500.0).abs() < 1e-6);
        assert!((updated.get(BudgetCategory::Food) - 500.0).abs() < 1e-6);
        assert!(updated.get(BudgetCategory::Miscellaneous) < 1e-6);
        assert!(updated.is_conserved(1000.0));
    }

    #[test]
    fn infinite_request_takes_the_whole_budget() {
        let updated = update_category(&base(), 1000.0, BudgetCategory::Food, f64::INFINITY);
        assert_eq!(updated.get(BudgetCategory::Food), 1000.0);
        assert_eq!(updated.get(BudgetCategory::Accommodation), 0.0);
    }

    #[test]
    fn input_breakdown_is_not_mutated() {
        let original = base();
        let _ = update_category(&original, 1000.0, BudgetCategory::Food, 5000.0);
        assert_eq!(original, base());
    }
}
