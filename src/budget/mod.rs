pub mod allocator;
pub mod editor;
pub mod optimizer;
pub mod recommendations;
pub mod report;
pub mod savings;
pub mod tables;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONSERVATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Accommodation,
    Activities,
    Food,
    Transportation,
    Entertainment,
    Miscellaneous,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Accommodation,
        BudgetCategory::Activities,
        BudgetCategory::Food,
        BudgetCategory::Transportation,
        BudgetCategory::Entertainment,
        BudgetCategory::Miscellaneous,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Activities => "activities",
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Miscellaneous => "miscellaneous",
        }
    }
}

impl Display for BudgetCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown budget category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for BudgetCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "accommodation" => Ok(Self::Accommodation),
            "activities" | "activity" => Ok(Self::Activities),
            "food" => Ok(Self::Food),
            "transportation" | "transport" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "miscellaneous" | "misc" => Ok(Self::Miscellaneous),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BudgetBreakdown {
    amounts: BTreeMap<BudgetCategory, f64>,
}

impl BudgetBreakdown {
    pub fn zero() -> Self {
        Self::from_fn(|_| 0.0)
    }

    pub fn from_fn(mut f: impl FnMut(BudgetCategory) -> f64) -> Self {
        let amounts = BudgetCategory::ALL
            .iter()
            .map(|category| (*category, f(*category)))
            .collect();
        Self { amounts }
    }

    pub fn get(&self, category: BudgetCategory) -> f64 {
        self.amounts.get(&category).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, category: BudgetCategory, amount: f64) {
        self.amounts.insert(category, amount);
    }

    pub fn total(&self) -> f64 {
        BudgetCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BudgetCategory, f64)> + '_ {
        BudgetCategory::ALL.iter().map(|c| (*c, self.get(*c)))
    }

    pub fn map(&self, mut f: impl FnMut(BudgetCategory, f64) -> f64) -> Self {
        Self::from_fn(|category| f(category, self.get(category)))
    }

    // Summed in units of `total` so near-max budgets cannot overflow.
    pub fn is_conserved(&self, total: f64) -> bool {
        let scale = total.abs().max(1.0);
        let scaled_sum: f64 = self.iter().map(|(_, amount)| amount / scale).sum();
        (scaled_sum - total / scale).abs() <= CONSERVATION_TOLERANCE
    }
}

impl Default for BudgetBreakdown {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsOpportunity {
    pub category: BudgetCategory,
    pub original_amount: f64,
    pub optimized_amount: f64,
    pub savings_amount: f64,
    pub savings_percent: u32,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationKind {
    BookingLeadTime,
    GroupDiscount,
    InterestAlignment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub potential_savings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub per_day: f64,
    pub per_person: f64,
    pub per_person_per_day: f64,
    pub total_potential_savings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationReport {
    pub initial: BudgetBreakdown,
    pub optimized: BudgetBreakdown,
    pub savings: Vec<SavingsOpportunity>,
    pub recommendations: Vec<Recommendation>,
    pub summary: BudgetSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_always_has_all_categories() {
        let breakdown = BudgetBreakdown::zero();
        assert_eq!(breakdown.iter().count(), 6);
        assert_eq!(breakdown.total(), 0.0);
    }

    #[test]
    fn breakdown_serializes_as_category_map() {
        let breakdown = BudgetBreakdown::from_fn(|c| match c {
            BudgetCategory::Accommodation => 400.0,
            _ => 0.0,
        });
        let value = serde_json::to_value(&breakdown).expect("failed to serialize");
        assert_eq!(value["accommodation"], 400.0);
        assert_eq!(value["miscellaneous"], 0.0);

        let parsed: BudgetBreakdown = serde_json::from_value(value).expect("failed to parse");
        assert_eq!(parsed, breakdown);
    }

    #[test]
    fn parses_category_aliases() {
        assert_eq!(
            BudgetCategory::from_str("Transport").expect("alias"),
            BudgetCategory::Transportation
        );
        assert_eq!(
            BudgetCategory::from_str("misc").expect("alias"),
            BudgetCategory::Miscellaneous
        );
        assert!(BudgetCategory::from_str("souvenirs").is_err());
        assert!(BudgetCategory::from_str("hotel").is_err());
    }

    #[test]
    fn conservation_check_uses_relative_tolerance() {
        let breakdown = BudgetBreakdown::from_fn(|_| 1_000_000.0 / 6.0);
        assert!(breakdown.is_conserved(1_000_000.0));
        assert!(!breakdown.is_conserved(1_000_010.0));
    }

    #[test]
    fn conservation_check_survives_near_max_totals() {
        let breakdown = BudgetBreakdown::from_fn(|_| f64::MAX / 6.0);
        assert!(breakdown.is_conserved(f64::MAX));
    }
}
