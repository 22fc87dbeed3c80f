//! Lookup tables driving the allocation heuristics.
//!
//! The engine never reads these from global state; callers pass an
//! [`AllocationTables`] so tests can substitute their own values.

use serde::{Deserialize, Serialize};

use crate::budget::BudgetCategory;
use crate::trip::TravelStyle;

// Entertainment and miscellaneous are never adjusted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryMultipliers {
    pub accommodation: f64,
    pub food: f64,
    pub activities: f64,
    pub transportation: f64,
}

impl CategoryMultipliers {
    pub const NEUTRAL: CategoryMultipliers = CategoryMultipliers::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(accommodation: f64, food: f64, activities: f64, transportation: f64) -> Self {
        Self {
            accommodation,
            food,
            activities,
            transportation,
        }
    }

    pub fn for_category(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Accommodation => self.accommodation,
            BudgetCategory::Food => self.food,
            BudgetCategory::Activities => self.activities,
            BudgetCategory::Transportation => self.transportation,
            BudgetCategory::Entertainment | BudgetCategory::Miscellaneous => 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationAdjustment {
    pub key: String,
    pub multipliers: CategoryMultipliers,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupSizeTable {
    pub large_group_min: u32,
    pub large_group: CategoryMultipliers,
    pub small_group_min: u32,
    pub small_group: CategoryMultipliers,
}

impl GroupSizeTable {
    pub fn multipliers(&self, group_size: u32) -> CategoryMultipliers {
        if group_size >= self.large_group_min {
            self.large_group
        } else if group_size >= self.small_group_min {
            self.small_group
        } else {
            CategoryMultipliers::NEUTRAL
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptimizationRule {
    pub multiplier: f64,
    pub minimum: f64,
    pub maximum: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsTips {
    pub category: BudgetCategory,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationTables {
    pub base_ratios: Vec<(BudgetCategory, f64)>,
    pub destinations: Vec<DestinationAdjustment>,
    pub styles: Vec<(TravelStyle, CategoryMultipliers)>,
    pub group_sizes: GroupSizeTable,
    pub optimization_rules: Vec<(BudgetCategory, OptimizationRule)>,
    pub savings_tips: Vec<SavingsTips>,
    pub generic_tips: Vec<String>,
}

impl AllocationTables {
    pub fn standard() -> Self {
        Self {
            base_ratios: vec![
                (BudgetCategory::Accommodation, 0.40),
                (BudgetCategory::Activities, 0.25),
                (BudgetCategory::Food, 0.20),
                (BudgetCategory::Transportation, 0.10),
                (BudgetCategory::Entertainment, 0.03),
                (BudgetCategory::Miscellaneous, 0.02),
            ],
            destinations: vec![
                destination("london", 1.4, 1.3, 1.2, 1.2),
                destination("new york", 1.4, 1.3, 1.2, 1.1),
                destination("paris", 1.3, 1.2, 1.2, 1.1),
                destination("tokyo", 1.2, 1.1, 1.2, 1.3),
                destination("zurich", 1.4, 1.4, 1.3, 1.2),
                destination("bali", 0.6, 0.7, 0.8, 0.7),
                destination("thailand", 0.7, 0.6, 0.8, 0.7),
                destination("vietnam", 0.6, 0.6, 0.8, 0.7),
                destination("india", 0.6, 0.6, 0.7, 0.7),
                destination("mexico", 0.8, 0.8, 0.9, 0.8),
            ],
            styles: vec![
                (
                    TravelStyle::Luxury,
                    CategoryMultipliers::new(1.5, 1.3, 1.2, 1.4),
                ),
                (
                    TravelStyle::Budget,
                    CategoryMultipliers::new(0.6, 0.7, 0.8, 0.7),
                ),
                (
                    TravelStyle::Adventure,
                    CategoryMultipliers::new(0.8, 0.9, 1.4, 1.1),
                ),
                (TravelStyle::Balanced, CategoryMultipliers::NEUTRAL),
            ],
            group_sizes: GroupSizeTable {
                large_group_min: 6,
                large_group: CategoryMultipliers::new(0.75, 0.95, 0.9, 0.7),
                small_group_min: 3,
                small_group: CategoryMultipliers::new(0.85, 1.0, 0.95, 0.8),
            },
            optimization_rules: vec![
                (BudgetCategory::Accommodation, rule(0.95, 0.25, 0.45)),
                (BudgetCategory::Activities, rule(1.05, 0.15, 0.35)),
                (BudgetCategory::Food, rule(0.90, 0.15, 0.30)),
                (BudgetCategory::Transportation, rule(0.85, 0.05, 0.20)),
                (BudgetCategory::Entertainment, rule(1.10, 0.02, 0.10)),
                (BudgetCategory::Miscellaneous, rule(1.00, 0.01, 0.05)),
            ],
            savings_tips: vec![
                tips(
                    BudgetCategory::Accommodation,
                    [
                        "Book accommodation at least 6-8 weeks in advance",
                        "Consider vacation rentals for stays longer than 4 nights",
                        "Stay slightly outside the city center near public transit",
                        "Look for properties with free breakfast included",
                    ],
                ),
                tips(
                    BudgetCategory::Activities,
                    [
                        "Buy a city pass that bundles major attractions",
                        "Check for free museum days and walking tours",
                        "Book popular tours online for early-bird discounts",
                        "Mix paid attractions with free parks and viewpoints",
                    ],
                ),
                tips(
                    BudgetCategory::Food,
                    [
                        "Eat where locals eat, away from tourist hotspots",
                        "Make lunch your main meal to use set-menu prices",
                        "Shop at local markets for breakfast and snacks",
                        "Choose accommodation with a kitchenette",
                    ],
                ),
                tips(
                    BudgetCategory::Transportation,
                    [
                        "Buy multi-day public transit passes",
                        "Walk or rent bikes for short distances",
                        "Book intercity trains or buses in advance",
                        "Share airport transfers when travelling in a group",
                    ],
                ),
            ],
            generic_tips: vec![
                "Set a daily spending limit and track expenses".to_string(),
                "Compare prices across several booking platforms".to_string(),
                "Look for bundled deals and loyalty discounts".to_string(),
                "Keep a small contingency reserve for surprises".to_string(),
            ],
        }
    }

    pub fn base_ratio(&self, category: BudgetCategory) -> f64 {
        self.base_ratios
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, ratio)| *ratio)
            .unwrap_or(0.0)
    }

    pub fn destination_multipliers(&self, destination: &str) -> CategoryMultipliers {
        let normalized = destination.to_lowercase();
        self.destinations
            .iter()
            .find(|entry| normalized.contains(&entry.key.to_lowercase()))
            .map(|entry| entry.multipliers)
            .unwrap_or(CategoryMultipliers::NEUTRAL)
    }

    pub fn style_multipliers(&self, style: TravelStyle) -> CategoryMultipliers {
        self.styles
            .iter()
            .find(|(s, _)| *s == style)
            .map(|(_, multipliers)| *multipliers)
            .unwrap_or(CategoryMultipliers::NEUTRAL)
    }

    pub fn group_multipliers(&self, group_size: u32) -> CategoryMultipliers {
        self.group_sizes.multipliers(group_size)
    }

    pub fn optimization_rule(&self, category: BudgetCategory) -> OptimizationRule {
        self.optimization_rules
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rule)| *rule)
            .unwrap_or(OptimizationRule {
                multiplier: 1.0,
                minimum: 0.0,
                maximum: 1.0,
            })
    }

    pub fn tips_for(&self, category: BudgetCategory) -> &[String] {
        self.savings_tips
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.tips.as_slice())
            .unwrap_or(self.generic_tips.as_slice())
    }
}

impl Default for AllocationTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn destination(
    key: &str,
    accommodation: f64,
    food: f64,
    activities: f64,
    transportation: f64,
) -> DestinationAdjustment {
    DestinationAdjustment {
        key: key.to_string(),
        multipliers: CategoryMultipliers::new(accommodation, food, activities, transportation),
    }
}

fn rule(multiplier: f64, minimum: f64, maximum: f64) -> OptimizationRule {
    OptimizationRule {
        multiplier,
        minimum,
        maximum,
    }
}

fn tips(category: BudgetCategory, items: [&str; 4]) -> SavingsTips {
    SavingsTips {
        category,
        tips: items.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_ratios_sum_to_one() {
        let tables = AllocationTables::standard();
        let sum: f64 = BudgetCategory::ALL
            .iter()
            .map(|c| tables.base_ratio(*c))
            .sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn destination_match_is_case_insensitive_substring() {
        let tables = AllocationTables::standard();
        let bali = tables.destination_multipliers("Ubud, BALI, Indonesia");
        assert_eq!(bali.accommodation, 0.6);
        let nyc = tables.destination_multipliers("New York City");
        assert_eq!(nyc.accommodation, 1.4);
        let unknown = tables.destination_multipliers("Reykjavik");
        assert_eq!(unknown, CategoryMultipliers::NEUTRAL);
    }

    #[test]
    fn untouched_categories_are_never_adjusted() {
        let luxury = AllocationTables::standard().style_multipliers(TravelStyle::Luxury);
        assert_eq!(luxury.for_category(BudgetCategory::Entertainment), 1.0);
        assert_eq!(luxury.for_category(BudgetCategory::Miscellaneous), 1.0);
    }

    #[test]
    fn group_size_bands() {
        let tables = AllocationTables::standard();
        assert_eq!(tables.group_multipliers(1), CategoryMultipliers::NEUTRAL);
        assert_eq!(tables.group_multipliers(2), CategoryMultipliers::NEUTRAL);
        assert_eq!(tables.group_multipliers(3), tables.group_sizes.small_group);
        assert_eq!(tables.group_multipliers(5), tables.group_sizes.small_group);
        assert_eq!(tables.group_multipliers(6), tables.group_sizes.large_group);
        assert_eq!(tables.group_multipliers(40), tables.group_sizes.large_group);
    }

    #[test]
    fn optimization_bounds_are_ordered() {
        let tables = AllocationTables::standard();
        for category in BudgetCategory::ALL {
            let rule = tables.optimization_rule(category);
            assert!(rule.multiplier > 0.0);
            assert!(rule.minimum >= 0.0);
            assert!(rule.minimum <= rule.maximum, "bad bounds for {category}");
        }
    }

    #[test]
    fn tips_fall_back_to_generic_list() {
        let tables = AllocationTables::standard();
        assert_eq!(tables.tips_for(BudgetCategory::Food).len(), 4);
        assert_eq!(
            tables.tips_for(BudgetCategory::Entertainment),
            tables.generic_tips.as_slice()
        );
    }
}
