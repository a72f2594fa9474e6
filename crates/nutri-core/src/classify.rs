//! Meal-type classification from time-of-day keywords.

use crate::types::MealType;

const BREAKFAST_KEYWORDS: &[&str] = &["아침", "조식", "breakfast"];
const LUNCH_KEYWORDS: &[&str] = &["점심", "중식", "lunch"];
const DINNER_KEYWORDS: &[&str] = &["저녁", "석식", "dinner"];
const SNACK_KEYWORDS: &[&str] = &["간식", "snack"];

/// Classifies the meal described by the input.
///
/// Checks breakfast, lunch, dinner, then snack keywords; the first group with
/// a hit wins. `None` means unclassified, which is a valid outcome rather
/// than an error.
#[must_use]
pub fn classify_meal_type(input: &str) -> Option<MealType> {
    let groups = [
        (MealType::Breakfast, BREAKFAST_KEYWORDS),
        (MealType::Lunch, LUNCH_KEYWORDS),
        (MealType::Dinner, DINNER_KEYWORDS),
        (MealType::Snack, SNACK_KEYWORDS),
    ];

    groups
        .into_iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| input.contains(keyword)))
        .map(|(meal_type, _)| meal_type)
}
