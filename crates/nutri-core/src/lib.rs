//! Natural-language meal parsing and nutrition calculation.
//!
//! This crate turns a free-form Korean or English meal description into a
//! structured, quantified list of food items with computed nutrition values:
//! - Classification: tagging the meal as breakfast/lunch/dinner/snack
//! - Extraction: ordered text patterns over a closed food vocabulary
//! - Conversion: quantities and units resolved to gram weights
//! - Evaluation: calories and macros scaled from per-100g reference facts
//!
//! Every function here is total: unrecognized input degrades to defaults
//! (quantity 1, unit-default grams, empty item list) instead of failing.

pub mod classify;
pub mod extract;
pub mod facts;
pub mod format;
pub mod meal;
pub mod quantity;
pub mod types;
pub mod units;

pub use classify::classify_meal_type;
pub use facts::{FoodFact, food_fact};
pub use format::{FormattedRecord, MealEvent, SheetRow, format_meal_record, kst_now};
pub use meal::{FoodItem, ParsedMeal, evaluate_item, parse_meal};
pub use quantity::QuantityToken;
pub use types::MealType;
pub use units::convert_to_grams;
