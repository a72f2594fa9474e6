//! Static per-100g nutrition reference data.
//!
//! The food vocabulary is closed: extraction only ever accepts names that are
//! exact keys in this table. Absent macro fields mean "unknown", not zero.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Per-100g nutrition facts for one food name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodFact {
    /// Calories per 100 g. Always known.
    pub kcal_per_100g: f64,
    /// Carbohydrate grams per 100 g, if known.
    pub carb_per_100g: Option<f64>,
    /// Protein grams per 100 g, if known.
    pub protein_per_100g: Option<f64>,
    /// Fat grams per 100 g, if known.
    pub fat_per_100g: Option<f64>,
    /// Sodium milligrams per 100 g, if known.
    pub sodium_per_100g: Option<f64>,
}

impl FoodFact {
    /// Fact with calories and the three macros.
    const fn macros(kcal_per_100g: f64, carb: f64, protein: f64, fat: f64) -> Self {
        Self {
            kcal_per_100g,
            carb_per_100g: Some(carb),
            protein_per_100g: Some(protein),
            fat_per_100g: Some(fat),
            sodium_per_100g: None,
        }
    }

    /// Fact with calories, macros, and sodium.
    const fn with_sodium(self, sodium_mg: f64) -> Self {
        Self {
            sodium_per_100g: Some(sodium_mg),
            ..self
        }
    }
}

/// Reference table in a fixed order.
///
/// The slice order is the scan order of the fallback extractor, so it also
/// fixes item order when several foods are found by plain substring search.
pub(crate) static FOOD_FACT_TABLE: &[(&str, FoodFact)] = &[
    // 밥류
    ("밥", FoodFact::macros(130.0, 23.0, 2.6, 0.3)),
    ("흰밥", FoodFact::macros(130.0, 23.0, 2.6, 0.3)),
    ("현미밥", FoodFact::macros(120.0, 22.0, 2.8, 0.8)),
    // 국/찌개류
    ("김치찌개", FoodFact::macros(80.0, 4.0, 6.0, 5.0).with_sodium(800.0)),
    ("된장찌개", FoodFact::macros(60.0, 3.0, 4.0, 3.0).with_sodium(700.0)),
    ("된장국", FoodFact::macros(30.0, 2.0, 2.0, 1.0).with_sodium(600.0)),
    ("미역국", FoodFact::macros(20.0, 1.0, 1.5, 0.5).with_sodium(500.0)),
    // 반찬류
    ("김치", FoodFact::macros(23.0, 4.0, 2.0, 0.4).with_sodium(900.0)),
    ("계란후라이", FoodFact::macros(196.0, 0.8, 13.0, 15.0)),
    ("계란", FoodFact::macros(155.0, 1.1, 13.0, 11.0)),
    // 면류
    ("라면", FoodFact::macros(380.0, 56.0, 9.0, 14.0).with_sodium(1800.0)),
    ("냉면", FoodFact::macros(130.0, 25.0, 4.0, 1.0)),
    ("칼국수", FoodFact::macros(120.0, 24.0, 4.0, 1.0)),
    // 빵류
    ("식빵", FoodFact::macros(280.0, 50.0, 8.0, 4.0)),
    ("토스트", FoodFact::macros(290.0, 48.0, 8.0, 6.0)),
    // 육류
    ("삼겹살", FoodFact::macros(518.0, 0.0, 17.0, 49.0)),
    ("닭가슴살", FoodFact::macros(165.0, 0.0, 31.0, 3.6)),
    // 기타
    ("치킨", FoodFact::macros(250.0, 0.0, 25.0, 15.0)),
    ("피자", FoodFact::macros(266.0, 33.0, 11.0, 10.0)),
    ("햄버거", FoodFact::macros(295.0, 31.0, 15.0, 14.0)),
    ("샐러드", FoodFact::macros(20.0, 4.0, 1.0, 0.2)),
];

static FOOD_FACTS: LazyLock<HashMap<&'static str, &'static FoodFact>> =
    LazyLock::new(|| FOOD_FACT_TABLE.iter().map(|(name, fact)| (*name, fact)).collect());

/// Looks up the nutrition facts for an exact food name.
#[must_use]
pub fn food_fact(name: &str) -> Option<&'static FoodFact> {
    FOOD_FACTS.get(name).copied()
}

/// Returns `true` if the name is part of the closed food vocabulary.
#[must_use]
pub fn is_known_food(name: &str) -> bool {
    FOOD_FACTS.contains_key(name)
}
