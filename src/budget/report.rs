use tracing::debug;

use crate::budget::allocator::compute_initial_breakdown;
use crate::budget::optimizer::optimize_breakdown;
use crate::budget::recommendations::generate_recommendations;
use crate::budget::savings::derive_savings_opportunities;
use crate::budget::tables::AllocationTables;
use crate::budget::{AllocationReport, BudgetSummary, Recommendation};
use crate::trip::TripParameters;

pub fn build_allocation_report(
    params: &TripParameters,
    tables: &AllocationTables,
) -> AllocationReport {
    let initial = compute_initial_breakdown(params, tables);
    let optimized = optimize_breakdown(&initial, params.total_budget, tables);
    let savings = derive_savings_opportunities(&initial, &optimized, tables);
    let recommendations = generate_recommendations(params, &optimized);
    let summary = summarize(params, &recommendations);
    debug!(
        destination = %params.destination,
        savings = savings.len(),
        "built allocation report"
    );

    AllocationReport {
        initial,
        optimized,
        savings,
        recommendations,
        summary,
    }
}

pub fn summarize(params: &TripParameters, recommendations: &[Recommendation]) -> BudgetSummary {
    let days = f64::from(params.duration_days.max(1));
    let people = f64::from(params.group_size.max(1));
    BudgetSummary {
        total_budget: params.total_budget,
        per_day: params.total_budget / days,
        per_person: params.total_budget / people,
        per_person_per_day: params.total_budget / (days * people),
        total_potential_savings: recommendations.iter().map(|r| r.potential_savings).sum(),
    }
}
