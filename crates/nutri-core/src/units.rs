//! Unit-to-gram conversion.
//!
//! Resolution order for a `(food, quantity, unit)` triple:
//! 1. direct gram markers pass the quantity through unchanged
//! 2. a known unit uses its food-specific override, else its default weight,
//!    multiplied by quantity
//! 3. a qualitative size word maps to a fixed weight, ignoring quantity
//! 4. anything else counts as 100 g per unit
//!
//! Conversion never fails: an unrecognized unit degrades to a neutral default
//! instead of rejecting the item.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Gram weight assigned when nothing more specific is known about a unit.
pub const FALLBACK_GRAMS_PER_UNIT: f64 = 100.0;

/// Static mapping from a unit token to gram weights.
#[derive(Debug, Clone, Copy)]
pub struct UnitRule {
    /// Gram weight of one unit for foods without an override.
    pub default_grams: f64,
    /// Per-food gram weights taking precedence over the default.
    pub overrides: &'static [(&'static str, f64)],
}

impl UnitRule {
    const fn flat(default_grams: f64) -> Self {
        Self {
            default_grams,
            overrides: &[],
        }
    }

    const fn with_overrides(default_grams: f64, overrides: &'static [(&'static str, f64)]) -> Self {
        Self {
            default_grams,
            overrides,
        }
    }

    /// Gram weight of one unit of the given food.
    #[must_use]
    pub fn grams_for(&self, food: &str) -> f64 {
        self.overrides
            .iter()
            .find(|(name, _)| *name == food)
            .map_or(self.default_grams, |(_, grams)| *grams)
    }
}

static UNIT_RULE_TABLE: &[(&str, UnitRule)] = &[
    ("공기", UnitRule::with_overrides(150.0, &[("밥", 150.0), ("흰밥", 150.0), ("현미밥", 150.0)])),
    ("그릇", UnitRule::with_overrides(200.0, &[("라면", 300.0), ("냉면", 350.0), ("칼국수", 300.0)])),
    ("개", UnitRule::with_overrides(50.0, &[("계란", 60.0), ("계란후라이", 60.0)])),
    ("장", UnitRule::with_overrides(30.0, &[("식빵", 30.0), ("토스트", 30.0)])),
    ("조각", UnitRule::with_overrides(50.0, &[("피자", 150.0), ("치킨", 100.0)])),
    ("컵", UnitRule::flat(200.0)),
    ("숟가락", UnitRule::flat(15.0)),
    ("큰술", UnitRule::flat(15.0)),
    ("작은술", UnitRule::flat(5.0)),
];

static UNIT_RULES: LazyLock<HashMap<&'static str, &'static UnitRule>> =
    LazyLock::new(|| UNIT_RULE_TABLE.iter().map(|(name, rule)| (*name, rule)).collect());

/// Looks up the conversion rule for a unit token.
#[must_use]
pub fn unit_rule(unit: &str) -> Option<&'static UnitRule> {
    UNIT_RULES.get(unit).copied()
}

/// Qualitative size words. These describe an amount rather than a count, so
/// the quantity multiplier does not apply to them.
fn size_word_grams(unit: &str) -> Option<f64> {
    let grams = match unit {
        "기본" => 100.0,
        "조금" => 50.0,
        "많이" => 200.0,
        "큰" => 150.0,
        "작은" => 80.0,
        _ => return None,
    };
    Some(grams)
}

/// Converts a quantified unit of food to grams.
#[must_use]
pub fn convert_to_grams(food: &str, quantity: f64, unit: &str) -> f64 {
    if unit == "g" || unit == "그램" {
        return quantity;
    }

    if let Some(rule) = unit_rule(unit) {
        return quantity * rule.grams_for(food);
    }

    if let Some(grams) = size_word_grams(unit) {
        return grams;
    }

    quantity * FALLBACK_GRAMS_PER_UNIT
}
