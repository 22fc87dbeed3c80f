use crate::budget::{BudgetBreakdown, BudgetCategory, Recommendation, RecommendationKind};
use crate::trip::TripParameters;

pub const BOOKING_LEAD_TIME_SHARE: f64 = 0.08;
pub const GROUP_DISCOUNT_SHARE: f64 = 0.05;
pub const INTEREST_ALIGNMENT_SHARE: f64 = 0.03;

pub fn generate_recommendations(
    params: &TripParameters,
    optimized: &BudgetBreakdown,
) -> Vec<Recommendation> {
    vec![
        booking_lead_time(params, optimized),
        group_discount(params, optimized),
        interest_alignment(params, optimized),
    ]
}

fn booking_lead_time(params: &TripParameters, optimized: &BudgetBreakdown) -> Recommendation {
    let accommodation = optimized.get(BudgetCategory::Accommodation);
    let description = if params.duration_days >= 7 {
        format!(
            "For a {}-day stay in {}, book 2-3 months ahead and ask for weekly rates; \
             your accommodation budget is {:.0}.",
            params.duration_days, params.destination, accommodation
        )
    } else {
        format!(
            "Book your {}-day trip to {} 3-4 weeks in advance to lock in lower fares; \
             your accommodation budget is {:.0}.",
            params.duration_days, params.destination, accommodation
        )
    };
    Recommendation {
        kind: RecommendationKind::BookingLeadTime,
        title: "Book early".to_string(),
        description,
        potential_savings: params.total_budget * BOOKING_LEAD_TIME_SHARE,
    }
}

fn group_discount(params: &TripParameters, optimized: &BudgetBreakdown) -> Recommendation {
    let transportation = optimized.get(BudgetCategory::Transportation);
    let description = if params.group_size > 1 {
        format!(
            "Travelling as a group of {}, ask for group rates on tours and share transfers; \
             your transportation budget is {:.0}.",
            params.group_size, transportation
        )
    } else {
        format!(
            "Solo travellers can join small-group tours and shared shuttles to split costs; \
             your transportation budget is {:.0}.",
            transportation
        )
    };
    Recommendation {
        kind: RecommendationKind::GroupDiscount,
        title: "Use group pricing".to_string(),
        description,
        potential_savings: params.total_budget * GROUP_DISCOUNT_SHARE,
    }
}

fn interest_alignment(params: &TripParameters, optimized: &BudgetBreakdown) -> Recommendation {
    let activities = optimized.get(BudgetCategory::Activities);
    let description = if params.interests.is_empty() {
        format!(
            "Pick two or three priority interests so the {:.0} activities budget goes to \
             what matters most in {}.",
            activities, params.destination
        )
    } else {
        format!(
            "Focus the {:.0} activities budget on {} and skip generic tourist packages in {}.",
            activities,
            params.interests.join(", "),
            params.destination
        )
    };
    Recommendation {
        kind: RecommendationKind::InterestAlignment,
        title: "Spend on what you love".to_string(),
        description,
        potential_savings: params.total_budget * INTEREST_ALIGNMENT_SHARE,
    }
}
