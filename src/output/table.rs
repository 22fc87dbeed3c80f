use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::budget::savings::total_savings;
use crate::budget::{
    AllocationReport, BudgetBreakdown, BudgetSummary, Recommendation, SavingsOpportunity,
};
use crate::itinerary::{DayPlan, Level};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_report(report: &AllocationReport) -> String {
    let mut out = String::new();
    out.push_str(&render_allocation_table(report));
    out.push('\n');
    out.push_str(&render_savings_table(&report.savings));
    out.push('\n');
    out.push_str(&render_recommendations_table(&report.recommendations));
    out.push('\n');
    out.push_str(&render_summary(&report.summary));
    out
}

pub fn render_allocation_table(report: &AllocationReport) -> String {
    let mut table = new_table();
    table.set_header(vec!["Category", "Initial", "Optimized", "Change"]);

    for (category, initial) in report.initial.iter() {
        let optimized = report.optimized.get(category);
        let delta = optimized - initial;
        let delta_cell = if delta < 0.0 {
            Cell::new(format!("{delta:+.2}")).fg(Color::Green)
        } else if delta > 0.0 {
            Cell::new(format!("{delta:+.2}")).fg(Color::Yellow)
        } else {
            Cell::new("-")
        };
        table.add_row(Row::from(vec![
            Cell::new(category.to_string()),
            Cell::new(format!("{initial:.2}")),
            Cell::new(format!("{optimized:.2}")),
            delta_cell,
        ]));
    }
    table.add_row(vec![
        "total".to_string(),
        format!("{:.2}", report.initial.total()),
        format!("{:.2}", report.optimized.total()),
        String::new(),
    ]);
    table.to_string()
}

pub fn render_breakdown_table(breakdown: &BudgetBreakdown) -> String {
    let mut table = new_table();
    table.set_header(vec!["Category", "Amount"]);
    for (category, amount) in breakdown.iter() {
        table.add_row(vec![category.to_string(), format!("{amount:.2}")]);
    }
    table.add_row(vec!["total".to_string(), format!("{:.2}", breakdown.total())]);
    table.to_string()
}

pub fn render_savings_table(items: &[SavingsOpportunity]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Category", "Original", "Optimized", "Savings", "Tips"]);
    for item in items {
        table.add_row(vec![
            item.category.to_string(),
            format!("{:.2}", item.original_amount),
            format!("{:.2}", item.optimized_amount),
            format!("{:.2} ({}%)", item.savings_amount, item.savings_percent),
            item.recommendations.join("\n"),
        ]);
    }
    format!("{table}\nOptimizer savings: {:.2}", total_savings(items))
}

pub fn render_recommendations_table(items: &[Recommendation]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Priority", "Title", "Potential Savings", "Details"]);
    for (idx, item) in items.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            item.title.clone(),
            format!("{:.2}", item.potential_savings),
            item.description.clone(),
        ]);
    }
    table.to_string()
}

pub fn render_summary(summary: &BudgetSummary) -> String {
    format!(
        "Total budget: {:.2}\nPer day: {:.2}\nPer person: {:.2}\nPer person per day: {:.2}\nPotential savings: {:.2}",
        summary.total_budget,
        summary.per_day,
        summary.per_person,
        summary.per_person_per_day,
        summary.total_potential_savings
    )
}

pub fn render_itinerary_table(days: &[DayPlan]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Day", "Activities", "Meals", "Stay / Transport", "Timing", "Energy", "Flex"]);
    for day in days {
        let activities = day
            .activities
            .iter()
            .map(|a| format!("{} ({})", a.name, a.duration_label))
            .collect::<Vec<_>>()
            .join("\n");
        let meals = format!(
            "{}\n{}\n{}",
            day.meals.breakfast, day.meals.lunch, day.meals.dinner
        );
        table.add_row(Row::from(vec![
            Cell::new(day.day_number.to_string()),
            Cell::new(activities),
            Cell::new(meals),
            Cell::new(format!("{}\n{}", day.accommodation, day.transportation)),
            Cell::new(&day.timing_window),
            level_cell(day.energy_level),
            level_cell(day.flexibility),
        ]));
    }
    table.to_string()
}

fn level_cell(level: Level) -> Cell {
    let label = format!("{level:?}").to_uppercase();
    match level {
        Level::High => Cell::new(label).fg(Color::Green),
        Level::Medium => Cell::new(label).fg(Color::Yellow),
        Level::Low => Cell::new(label).fg(Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::report::build_allocation_report;
    use crate::budget::tables::AllocationTables;
    use crate::itinerary::pipeline::generate_itinerary;
    use crate::trip::{TravelStyle, TripParameters};

    fn params() -> TripParameters {
        TripParameters {
            destination: "Zurich".to_string(),
            duration_days: 2,
            total_budget: 3000.0,
            interests: vec!["nature".to_string()],
            travel_style: TravelStyle::Luxury,
            group_size: 2,
        }
    }

    #[test]
    fn report_lists_every_category() {
        let report = build_allocation_report(&params(), &AllocationTables::standard());
        let rendered = render_report(&report);
        for category in crate::budget::BudgetCategory::ALL {
            assert!(rendered.contains(category.as_slug()));
        }
        assert!(rendered.contains("Per person per day"));
    }

    #[test]
    fn itinerary_table_shows_each_day() {
        let rendered = render_itinerary_table(&generate_itinerary(&params()));
        assert!(rendered.contains("City Tour of Zurich"));
        assert!(rendered.contains("HIGH"));
    }
}
