//! Parsed meals: evaluated food items and their aggregate.

use serde::{Deserialize, Serialize};

use crate::classify::classify_meal_type;
use crate::extract::extract_mentions;
use crate::facts::food_fact;
use crate::quantity::QuantityToken;
use crate::types::MealType;
use crate::units::convert_to_grams;

/// One recognized, quantified, nutrition-scored food mention.
///
/// Optional macro fields are present exactly when the reference table knows
/// them; absence means "unknown", not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name, a key of the reference table.
    pub name: String,
    /// Quantity multiplier, 1 when none was given.
    pub quantity: f64,
    /// Unit token as written, "기본" when defaulted.
    pub unit: String,
    /// Resolved weight, rounded to whole grams.
    pub grams: u32,
    /// Calories, rounded to a whole number.
    pub kcal: u32,
    /// Carbohydrate grams, rounded to one decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carb_g: Option<f64>,
    /// Protein grams, rounded to one decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Fat grams, rounded to one decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    /// Sodium milligrams, rounded to a whole number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<u32>,
}

/// The aggregate result of parsing one input string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMeal {
    /// Items in extraction order.
    pub items: Vec<FoodItem>,
    /// Sum of item calories.
    pub total_kcal: u32,
    /// Sum of item gram weights.
    pub total_grams: u32,
    /// Time-of-day classification, `None` when unclassified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    /// The original input, verbatim.
    pub note: String,
}

impl ParsedMeal {
    /// Aggregates evaluated items into a meal.
    ///
    /// An empty item list is valid and yields zero totals.
    #[must_use]
    pub fn aggregate(items: Vec<FoodItem>, meal_type: Option<MealType>, note: String) -> Self {
        let total_kcal = items.iter().map(|item| item.kcal).sum();
        let total_grams = items.iter().map(|item| item.grams).sum();
        Self {
            items,
            total_kcal,
            total_grams,
            meal_type,
            note,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "inputs are small non-negative meal weights and calorie counts"
)]
fn round_whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Evaluates one food mention into a nutrition-scored item.
///
/// Returns `None` only when the food name is not a reference-table key; the
/// extractor filters by membership, so callers on the parse path never see
/// that case.
#[must_use]
pub fn evaluate_item(name: &str, quantity: f64, unit: &str) -> Option<FoodItem> {
    let fact = food_fact(name)?;
    let grams = convert_to_grams(name, quantity, unit);
    let scale = grams / 100.0;

    Some(FoodItem {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        grams: round_whole(grams),
        kcal: round_whole(fact.kcal_per_100g * scale),
        carb_g: fact.carb_per_100g.map(|per| round_tenth(per * scale)),
        protein_g: fact.protein_per_100g.map(|per| round_tenth(per * scale)),
        fat_g: fact.fat_per_100g.map(|per| round_tenth(per * scale)),
        sodium_mg: fact.sodium_per_100g.map(|per| round_whole(per * scale)),
    })
}

/// Parses a free-form meal description into a structured meal.
///
/// Total over all inputs: an empty or unrecognized string yields a meal with
/// no items and zero totals, never an error.
#[must_use]
pub fn parse_meal(input: &str) -> ParsedMeal {
    let meal_type = classify_meal_type(input);
    let mentions = extract_mentions(input);

    let items: Vec<FoodItem> = mentions
        .iter()
        .filter_map(|mention| {
            let quantity = QuantityToken::parse(&mention.quantity).value();
            evaluate_item(&mention.name, quantity, &mention.unit)
        })
        .collect();

    tracing::debug!(
        items = items.len(),
        meal_type = meal_type.map(MealType::as_str),
        "parsed meal"
    );
    ParsedMeal::aggregate(items, meal_type, input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakfast_scenario_with_two_items() {
        let meal = parse_meal("아침에 토스트 2장이랑 계란후라이 1개 먹었어");

        assert_eq!(meal.meal_type, Some(MealType::Breakfast));
        assert_eq!(meal.items.len(), 2);

        let toast = &meal.items[0];
        assert_eq!(toast.name, "토스트");
        assert!((toast.quantity - 2.0).abs() < f64::EPSILON);
        assert_eq!(toast.unit, "장");
        assert_eq!(toast.grams, 60);
        assert_eq!(toast.kcal, 174);

        let egg = &meal.items[1];
        assert_eq!(egg.name, "계란후라이");
        assert_eq!(egg.unit, "개");
        assert_eq!(egg.grams, 60);
        assert_eq!(egg.kcal, 118);

        assert_eq!(meal.total_kcal, 292);
        assert_eq!(meal.total_grams, 120);
    }

    #[test]
    fn bare_food_name_gets_default_unit_and_quantity() {
        let meal = parse_meal("라면");

        assert_eq!(meal.items.len(), 1);
        let item = &meal.items[0];
        assert!((item.quantity - 1.0).abs() < f64::EPSILON);
        assert_eq!(item.unit, "기본");
        assert_eq!(item.grams, 100);
        assert_eq!(item.kcal, 380);
        assert_eq!(meal.meal_type, None);
    }

    #[test]
    fn every_known_food_alone_yields_exactly_one_item() {
        for (name, fact) in crate::facts::FOOD_FACT_TABLE {
            let meal = parse_meal(name);
            assert_eq!(meal.items.len(), 1, "input {name:?}");

            let item = &meal.items[0];
            assert_eq!(item.name, *name);
            assert_eq!(item.grams, 100);
            assert_eq!(item.kcal, round_whole(fact.kcal_per_100g));
        }
    }

    #[test]
    fn empty_input_yields_empty_meal() {
        let meal = parse_meal("");
        assert!(meal.items.is_empty());
        assert_eq!(meal.total_kcal, 0);
        assert_eq!(meal.total_grams, 0);
        assert_eq!(meal.meal_type, None);
        assert_eq!(meal.note, "");
    }

    #[test]
    fn unrecognized_food_is_silently_dropped() {
        let meal = parse_meal("저녁에 우동 1그릇이랑 김치찌개 1그릇");
        assert_eq!(meal.items.len(), 1);
        assert_eq!(meal.items[0].name, "김치찌개");
        assert_eq!(meal.meal_type, Some(MealType::Dinner));
    }

    #[test]
    fn note_retains_input_verbatim() {
        let input = "점심에 밥 한 공기  ";
        assert_eq!(parse_meal(input).note, input);
    }

    #[test]
    fn totals_equal_item_sums() {
        for input in ["", "라면", "밥 한 공기랑 계란 2개", "김치 샐러드 피자"] {
            let meal = parse_meal(input);
            let kcal: u32 = meal.items.iter().map(|item| item.kcal).sum();
            let grams: u32 = meal.items.iter().map(|item| item.grams).sum();
            assert_eq!(meal.total_kcal, kcal, "input {input:?}");
            assert_eq!(meal.total_grams, grams, "input {input:?}");
        }
    }

    #[test]
    fn explicit_gram_weight_scales_linearly() {
        let meal = parse_meal("삼겹살 200g");
        assert_eq!(meal.items.len(), 1);
        assert_eq!(meal.items[0].grams, 200);
        assert_eq!(meal.items[0].kcal, 1036);
        // A true zero in the reference data stays present.
        assert_eq!(meal.items[0].carb_g, Some(0.0));
    }

    #[test]
    fn macro_fields_track_reference_presence() {
        let item = evaluate_item("라면", 1.0, "그릇").unwrap();
        assert_eq!(item.grams, 300);
        assert_eq!(item.sodium_mg, Some(5400));

        let item = evaluate_item("토스트", 1.0, "장").unwrap();
        assert_eq!(item.sodium_mg, None);
        assert_eq!(item.carb_g, Some(14.4));
    }

    #[test]
    fn evaluate_rejects_unknown_food() {
        assert!(evaluate_item("우동", 1.0, "그릇").is_none());
    }

    #[test]
    fn half_quantity_korean_numeral() {
        let meal = parse_meal("밥 반 공기");
        assert_eq!(meal.items.len(), 1);
        assert_eq!(meal.items[0].grams, 75);
        assert_eq!(meal.items[0].kcal, 98);
    }

    #[test]
    fn parsed_meal_serde_roundtrip() {
        let meal = parse_meal("점심에 밥 한 공기");
        let json = serde_json::to_string(&meal).unwrap();
        let parsed: ParsedMeal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meal);
    }
}
