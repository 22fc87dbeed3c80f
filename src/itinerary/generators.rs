use crate::itinerary::{Activity, Level, Meals, MAX_ACTIVITIES_PER_DAY};
use crate::trip::TravelStyle;

pub const DEFAULT_TIMING_WINDOW: &str = "9:00 AM - 6:00 PM";

struct InterestActivity {
    tag: &'static str,
    name: &'static str,
    duration: &'static str,
    category: &'static str,
}

const INTEREST_ACTIVITIES: [InterestActivity; 4] = [
    InterestActivity {
        tag: "food",
        name: "Food Tasting",
        duration: "2 hours",
        category: "food",
    },
    InterestActivity {
        tag: "culture",
        name: "Museum Visit",
        duration: "2-3 hours",
        category: "culture",
    },
    InterestActivity {
        tag: "nature",
        name: "Park Walk",
        duration: "1-2 hours",
        category: "nature",
    },
    InterestActivity {
        tag: "adventure",
        name: "Adventure Activity",
        duration: "3-4 hours",
        category: "adventure",
    },
];

pub fn activity_id(day_number: u32, index: usize) -> String {
    format!("day-{day_number}-activity-{}", index + 1)
}

/// Base activities first, then interest matches, truncated to
/// [`MAX_ACTIVITIES_PER_DAY`]. The base three already fill the cap.
pub fn generate_activities_for_day(
    destination: &str,
    interests: &[String],
    day_number: u32,
    _duration_days: u32,
) -> Vec<Activity> {
    let mut drafts: Vec<(String, &str, String, &str)> = vec![
        (
            format!("City Tour of {destination}"),
            "3 hours",
            format!("{destination} City Center"),
            "sightseeing",
        ),
        (
            format!("{destination} Local Market Visit"),
            "2 hours",
            format!("{destination} Central Market"),
            "shopping",
        ),
        (
            format!("{destination} Cultural Experience"),
            "2-3 hours",
            format!("{destination} Old Town"),
            "culture",
        ),
    ];

    for extra in &INTEREST_ACTIVITIES {
        if interests.iter().any(|i| i.eq_ignore_ascii_case(extra.tag)) {
            drafts.push((
                format!("{destination} {}", extra.name),
                extra.duration,
                destination.to_string(),
                extra.category,
            ));
        }
    }

    drafts
        .into_iter()
        .take(MAX_ACTIVITIES_PER_DAY)
        .enumerate()
        .map(|(index, (name, duration, location, category))| Activity {
            id: activity_id(day_number, index),
            name,
            duration_label: duration.to_string(),
            location,
            category: category.to_string(),
        })
        .collect()
}

pub fn generate_meals(destination: &str) -> Meals {
    Meals {
        breakfast: "Breakfast at the hotel".to_string(),
        lunch: format!("Lunch at a local {destination} eatery"),
        dinner: format!("Dinner at a recommended {destination} restaurant"),
    }
}

pub fn generate_accommodation(destination: &str) -> String {
    format!("Centrally located hotel in {destination}")
}

pub fn generate_transportation(destination: &str) -> String {
    format!("Public transit and walking around {destination}")
}

pub fn timing_window(_day_number: u32, _duration_days: u32, _style: TravelStyle) -> String {
    DEFAULT_TIMING_WINDOW.to_string()
}

pub fn energy_level(
    day_number: u32,
    duration_days: u32,
    _interests: &[String],
    _style: TravelStyle,
) -> Level {
    if duration_days > 1 && day_number == duration_days {
        Level::Medium
    } else {
        Level::High
    }
}

pub fn flexibility(style: TravelStyle) -> Level {
    match style {
        TravelStyle::Budget => Level::Low,
        TravelStyle::Luxury => Level::High,
        TravelStyle::Balanced | TravelStyle::Adventure => Level::Medium,
    }
}
