use anyhow::Result;

use crate::budget::{AllocationReport, BudgetBreakdown};
use crate::itinerary::DayPlan;

pub fn report_to_csv(report: &AllocationReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "category",
        "initial",
        "optimized",
        "savings",
        "savings_percent",
    ])?;
    for (category, initial) in report.initial.iter() {
        let savings = report.savings.iter().find(|s| s.category == category);
        writer.write_record([
            category.to_string(),
            format!("{initial:.2}"),
            format!("{:.2}", report.optimized.get(category)),
            savings
                .map(|s| format!("{:.2}", s.savings_amount))
                .unwrap_or_default(),
            savings
                .map(|s| s.savings_percent.to_string())
                .unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn breakdown_to_csv(breakdown: &BudgetBreakdown) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["category", "amount"])?;
    for (category, amount) in breakdown.iter() {
        writer.write_record([category.to_string(), format!("{amount:.2}")])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn itinerary_to_csv(days: &[DayPlan]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "day",
        "activity_id",
        "activity",
        "duration",
        "location",
        "category",
        "timing",
        "energy",
        "flexibility",
    ])?;
    for day in days {
        for activity in &day.activities {
            writer.write_record([
                day.day_number.to_string(),
                activity.id.clone(),
                activity.name.clone(),
                activity.duration_label.clone(),
                activity.location.clone(),
                activity.category.clone(),
                day.timing_window.clone(),
                format!("{:?}", day.energy_level).to_lowercase(),
                format!("{:?}", day.flexibility).to_lowercase(),
            ])?;
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
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
            destination: "Hanoi, Vietnam".to_string(),
            duration_days: 2,
            total_budget: 800.0,
            interests: Vec::new(),
            travel_style: TravelStyle::Budget,
            group_size: 1,
        }
    }

    #[test]
    fn report_csv_has_row_per_category() {
        let report = build_allocation_report(&params(), &AllocationTables::standard());
        let csv = report_to_csv(&report).expect("failed to render csv");
        assert_eq!(csv.lines().count(), 7);
        assert!(csv.starts_with("category,initial,optimized"));
    }

    #[test]
    fn itinerary_csv_has_row_per_activity() {
        let days = generate_itinerary(&params());
        let csv = itinerary_to_csv(&days).expect("failed to render csv");
        // quoted because the destination contains a comma
        assert!(csv.contains("\"City Tour of Hanoi, Vietnam\""));
        assert_eq!(csv.lines().count(), 1 + 2 * 3);
    }
}
