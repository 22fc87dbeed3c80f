use tracing::debug;

use crate::itinerary::generators::{
    energy_level, flexibility, generate_accommodation, generate_activities_for_day,
    generate_meals, generate_transportation, timing_window,
};
use crate::itinerary::DayPlan;
use crate::trip::TripParameters;

pub fn generate_itinerary(params: &TripParameters) -> Vec<DayPlan> {
    let days = (1..=params.duration_days)
        .map(|day_number| DayPlan {
            day_number,
            activities: generate_activities_for_day(
                &params.destination,
                &params.interests,
                day_number,
                params.duration_days,
            ),
            meals: generate_meals(&params.destination),
            accommodation: generate_accommodation(&params.destination),
            transportation: generate_transportation(&params.destination),
            timing_window: timing_window(day_number, params.duration_days, params.travel_style),
            energy_level: energy_level(
                day_number,
                params.duration_days,
                &params.interests,
                params.travel_style,
            ),
            flexibility: flexibility(params.travel_style),
        })
        .collect::<Vec<_>>();
    debug!(
        destination = %params.destination,
        days = days.len(),
        "generated itinerary"
    );
    days
}
