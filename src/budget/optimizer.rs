use tracing::debug;

use crate::budget::allocator::renormalize;
use crate::budget::tables::AllocationTables;
use crate::budget::{BudgetBreakdown, BudgetCategory};

pub fn apply_rules(
    initial: &BudgetBreakdown,
    total_budget: f64,
    tables: &AllocationTables,
) -> BudgetBreakdown {
    initial.map(|category, amount| {
        let rule = tables.optimization_rule(category);
        let min = rule.minimum * total_budget;
        let max = rule.maximum * total_budget;
        (amount * rule.multiplier).max(min).min(max)
    })
}

// Renormalizing after the clamp can land a category outside its bounds again.
// That is accepted and not re-clamped.
pub fn optimize_breakdown(
    initial: &BudgetBreakdown,
    total_budget: f64,
    tables: &AllocationTables,
) -> BudgetBreakdown {
    let clamped = apply_rules(initial, total_budget, tables);
    debug!(clamped_total = clamped.total(), total_budget, "applied optimization rules");
    let optimized = renormalize(&clamped, total_budget);
    let violations = bound_violations(&optimized, total_budget, tables);
    if !violations.is_empty() {
        debug!(?violations, "renormalization moved categories outside their bounds");
    }
    optimized
}

pub fn bound_violations(
    optimized: &BudgetBreakdown,
    total_budget: f64,
    tables: &AllocationTables,
) -> Vec<BudgetCategory> {
    if total_budget <= 0.0 {
        return Vec::new();
    }
    optimized
        .iter()
        .filter(|(category, amount)| {
            let rule = tables.optimization_rule(*category);
            let share = amount / total_budget;
            share < rule.minimum - 1e-9 || share > rule.maximum + 1e-9
        })
        .map(|(category, _)| category)
        .collect()
}
