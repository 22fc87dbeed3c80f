use crate::budget::tables::AllocationTables;
use crate::budget::{BudgetBreakdown, SavingsOpportunity};

pub fn derive_savings_opportunities(
    initial: &BudgetBreakdown,
    optimized: &BudgetBreakdown,
    tables: &AllocationTables,
) -> Vec<SavingsOpportunity> {
    let mut opportunities = Vec::new();
    for (category, original_amount) in initial.iter() {
        let optimized_amount = optimized.get(category);
        let savings_amount = original_amount - optimized_amount;
        if savings_amount <= 0.0 {
            continue;
        }
        let savings_percent = (savings_amount / original_amount * 100.0).round() as u32;
        opportunities.push(SavingsOpportunity {
            category,
            original_amount,
            optimized_amount,
            savings_amount,
            savings_percent,
            recommendations: tables.tips_for(category).to_vec(),
        });
    }

    opportunities.sort_by(|a, b| b.savings_amount.total_cmp(&a.savings_amount));
    opportunities
}

pub fn total_savings(opportunities: &[SavingsOpportunity]) -> f64 {
    opportunities.iter().map(|o| o.savings_amount).sum()
}
