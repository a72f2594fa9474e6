//! Export-ready projection of a parsed meal.
//!
//! Produces the tabular rows handed to the spreadsheet collaborator and the
//! summary event handed to the calendar collaborator. This is the one place
//! where an unknown macro value becomes a zero: tabular export has no way to
//! express absence, so the conversion is deliberately lossy.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::meal::{FoodItem, ParsedMeal};
use crate::types::MealType;

/// Source tag written into every exported row.
pub const SOURCE_TAG: &str = "nutri v0.1";

/// Column order of the exported sheet.
pub const SHEET_HEADER: [&str; 13] = [
    "DateTime",
    "Meal",
    "Item",
    "Qty",
    "Unit",
    "Grams",
    "Kcal",
    "Carb(g)",
    "Protein(g)",
    "Fat(g)",
    "Sodium(mg)",
    "Note",
    "Source",
];

/// One exported row, thirteen fixed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub date_time: String,
    /// Localized meal label, "식사" when unclassified.
    pub meal: String,
    pub item: String,
    pub qty: f64,
    pub unit: String,
    pub grams: u32,
    pub kcal: u32,
    /// Zero when the reference table has no carbohydrate value.
    pub carb: f64,
    /// Zero when the reference table has no protein value.
    pub protein: f64,
    /// Zero when the reference table has no fat value.
    pub fat: f64,
    /// Zero when the reference table has no sodium value.
    pub sodium: u32,
    pub note: String,
    pub source: String,
}

/// Calendar-style summary of one meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEvent {
    pub title: String,
    pub description: String,
}

/// The export-ready projection of a `ParsedMeal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedRecord {
    /// One row per food item.
    pub rows: Vec<SheetRow>,
    /// Summary event for the whole meal.
    pub event: MealEvent,
}

/// The current time in KST (UTC+9), the fixed time zone of the log.
#[must_use]
pub fn kst_now() -> DateTime<FixedOffset> {
    let kst = FixedOffset::east_opt(9 * 3600).expect("KST offset is in range");
    Utc::now().with_timezone(&kst)
}

/// Formats a parsed meal for export at the given record time.
///
/// Borrows the meal and never mutates it; calling twice with the same
/// timestamp yields identical output.
#[must_use]
pub fn format_meal_record(meal: &ParsedMeal, recorded_at: DateTime<FixedOffset>) -> FormattedRecord {
    let label = MealType::label_ko_or_default(meal.meal_type);
    let date_time = recorded_at.to_rfc3339();

    let rows = meal
        .items
        .iter()
        .map(|item| SheetRow {
            date_time: date_time.clone(),
            meal: label.to_string(),
            item: item.name.clone(),
            qty: item.quantity,
            unit: item.unit.clone(),
            grams: item.grams,
            kcal: item.kcal,
            carb: item.carb_g.unwrap_or(0.0),
            protein: item.protein_g.unwrap_or(0.0),
            fat: item.fat_g.unwrap_or(0.0),
            sodium: item.sodium_mg.unwrap_or(0),
            note: meal.note.clone(),
            source: SOURCE_TAG.to_string(),
        })
        .collect();

    FormattedRecord {
        rows,
        event: MealEvent {
            title: event_title(meal, label),
            description: event_description(meal, recorded_at),
        },
    }
}

/// Event title embedding the top-2 items by calories and the total.
///
/// The ranking sort is stable, so items with equal calories keep their
/// extraction order.
fn event_title(meal: &ParsedMeal, label: &str) -> String {
    let mut ranked: Vec<&FoodItem> = meal.items.iter().collect();
    ranked.sort_by(|a, b| b.kcal.cmp(&a.kcal));

    let top_foods = ranked
        .iter()
        .take(2)
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    if top_foods.is_empty() {
        format!("🍽️ [{label}] (≈ {} kcal)", meal.total_kcal)
    } else {
        format!("🍽️ [{label}] {top_foods} (≈ {} kcal)", meal.total_kcal)
    }
}

/// Multi-line description enumerating every item plus the totals.
fn event_description(meal: &ParsedMeal, recorded_at: DateTime<FixedOffset>) -> String {
    let mut lines = vec!["영양 정보:".to_string()];
    for item in &meal.items {
        lines.push(format!(
            "• {} {}{} ({}g, {}kcal)",
            item.name, item.quantity, item.unit, item.grams, item.kcal
        ));
    }
    lines.push(String::new());
    lines.push(format!("총 칼로리: {}kcal", meal.total_kcal));
    lines.push(format!("총 중량: {}g", meal.total_grams));
    lines.push(String::new());
    lines.push(format!(
        "기록 시각: {}",
        recorded_at.format("%Y년 %m월 %d일 %H:%M")
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal::parse_meal;

    use chrono::TimeZone;
    use insta::assert_snapshot;

    fn fixed_record_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 1, 12, 30, 0)
            .unwrap()
    }

    #[test]
    fn one_row_per_item_with_thirteen_columns() {
        let meal = parse_meal("아침에 토스트 2장이랑 계란후라이 1개 먹었어");
        let record = format_meal_record(&meal, fixed_record_time());

        assert_eq!(record.rows.len(), 2);
        let row = &record.rows[0];
        assert_eq!(row.meal, "아침");
        assert_eq!(row.item, "토스트");
        assert_eq!(row.grams, 60);
        assert_eq!(row.kcal, 174);
        assert_eq!(row.note, meal.note);
        assert_eq!(row.source, SOURCE_TAG);
        assert_eq!(row.date_time, "2025-03-01T12:30:00+09:00");
    }

    #[test]
    fn absent_macros_become_zero_in_rows() {
        let meal = parse_meal("토스트");
        let record = format_meal_record(&meal, fixed_record_time());
        // 토스트 has no sodium reference value.
        assert_eq!(meal.items[0].sodium_mg, None);
        assert_eq!(record.rows[0].sodium, 0);
    }

    #[test]
    fn title_embeds_top_two_items_by_calories() {
        let meal = parse_meal("아침에 토스트 2장이랑 계란후라이 1개 먹었어");
        let record = format_meal_record(&meal, fixed_record_time());
        assert_snapshot!(record.event.title, @"🍽️ [아침] 토스트, 계란후라이 (≈ 292 kcal)");
    }

    #[test]
    fn title_tie_break_keeps_extraction_order() {
        // Both fallback items weigh 100 g; 라면 has more calories per 100 g,
        // equal-calorie ties elsewhere keep input order.
        let meal = parse_meal("김치 라면 샐러드");
        let record = format_meal_record(&meal, fixed_record_time());
        assert!(record.event.title.contains("라면, 김치"));
    }

    #[test]
    fn description_lists_items_and_totals() {
        let meal = parse_meal("아침에 토스트 2장이랑 계란후라이 1개 먹었어");
        let record = format_meal_record(&meal, fixed_record_time());

        let expected = "영양 정보:\n\
                        • 토스트 2장 (60g, 174kcal)\n\
                        • 계란후라이 1개 (60g, 118kcal)\n\
                        \n\
                        총 칼로리: 292kcal\n\
                        총 중량: 120g\n\
                        \n\
                        기록 시각: 2025년 03월 01일 12:30";
        assert_eq!(record.event.description, expected);
    }

    #[test]
    fn empty_meal_still_formats() {
        let meal = parse_meal("");
        let record = format_meal_record(&meal, fixed_record_time());
        assert!(record.rows.is_empty());
        assert_snapshot!(record.event.title, @"🍽️ [식사] (≈ 0 kcal)");
    }

    #[test]
    fn formatting_is_pure_and_repeatable() {
        let meal = parse_meal("점심에 밥 한 공기");
        let before = meal.clone();

        let first = format_meal_record(&meal, fixed_record_time());
        let second = format_meal_record(&meal, fixed_record_time());

        assert_eq!(meal, before);
        assert_eq!(first, second);
    }
}
