pub mod editor;
pub mod generators;
pub mod pipeline;

use serde::{Deserialize, Serialize};

pub const MAX_ACTIVITIES_PER_DAY: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub duration_label: String,
    pub location: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day_number: u32,
    pub activities: Vec<Activity>,
    pub meals: Meals,
    pub accommodation: String,
    pub transportation: String,
    pub timing_window: String,
    pub energy_level: Level,
    pub flexibility: Level,
}
