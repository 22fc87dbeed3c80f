use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    Budget,
    #[default]
    Balanced,
    Luxury,
    Adventure,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 4] = [
        TravelStyle::Budget,
        TravelStyle::Balanced,
        TravelStyle::Luxury,
        TravelStyle::Adventure,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Balanced => "balanced",
            Self::Luxury => "luxury",
            Self::Adventure => "adventure",
        }
    }

    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Balanced;
        };
        match Self::from_str(raw) {
            Ok(style) => style,
            Err(err) => {
                warn!("{err}, falling back to balanced");
                Self::Balanced
            }
        }
    }
}

impl Display for TravelStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown travel style: {0}")]
pub struct TravelStyleParseError(pub String);

impl FromStr for TravelStyle {
    type Err = TravelStyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "budget" => Ok(Self::Budget),
            "balanced" => Ok(Self::Balanced),
            "luxury" => Ok(Self::Luxury),
            "adventure" => Ok(Self::Adventure),
            _ => Err(TravelStyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("total budget is required")]
    MissingBudget,
    #[error("total budget must be a finite number, got {0}")]
    NonFiniteBudget(f64),
    #[error("total budget must be >= 0, got {0}")]
    NegativeBudget(f64),
    #[error("duration must be at least 1 day, got {0}")]
    InvalidDuration(i64),
    #[error("group size must be at least 1, got {0}")]
    InvalidGroupSize(i64),
}

// Signed so negative counts reach validation instead of failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    #[serde(default = "default_duration_days")]
    pub duration_days: i64,
    #[serde(default)]
    pub total_budget: Option<f64>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub travel_style: Option<String>,
    #[serde(default = "default_group_size")]
    pub group_size: i64,
}

impl Default for TripRequest {
    fn default() -> Self {
        Self {
            destination: String::new(),
            duration_days: default_duration_days(),
            total_budget: None,
            interests: Vec::new(),
            travel_style: None,
            group_size: default_group_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripParameters {
    pub destination: String,
    pub duration_days: u32,
    pub total_budget: f64,
    pub interests: Vec<String>,
    pub travel_style: TravelStyle,
    pub group_size: u32,
}

impl TripParameters {
    pub fn has_interest(&self, tag: &str) -> bool {
        self.interests.iter().any(|i| i == tag)
    }
}

impl TryFrom<TripRequest> for TripParameters {
    type Error = TripError;

    fn try_from(request: TripRequest) -> Result<Self, Self::Error> {
        let destination = request.destination.trim().to_string();
        if destination.is_empty() {
            return Err(TripError::EmptyDestination);
        }
        let total_budget = request.total_budget.ok_or(TripError::MissingBudget)?;
        if !total_budget.is_finite() {
            return Err(TripError::NonFiniteBudget(total_budget));
        }
        if total_budget < 0.0 {
            return Err(TripError::NegativeBudget(total_budget));
        }
        let duration_days = u32::try_from(request.duration_days)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or(TripError::InvalidDuration(request.duration_days))?;
        let group_size = u32::try_from(request.group_size)
            .ok()
            .filter(|g| *g >= 1)
            .ok_or(TripError::InvalidGroupSize(request.group_size))?;

        Ok(Self {
            destination,
            duration_days,
            total_budget,
            interests: normalize_interests(&request.interests),
            travel_style: TravelStyle::parse_lenient(request.travel_style.as_deref()),
            group_size,
        })
    }
}

pub fn normalize_interests(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let normalized = tag.trim().to_ascii_lowercase();
        if normalized.is_empty() || out.contains(&normalized) {
            continue;
        }
        out.push(normalized);
    }
    out
}

fn default_duration_days() -> i64 {
    1
}

fn default_group_size() -> i64 {
    1
}
