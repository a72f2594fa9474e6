//! Parse command: print the structured meal for an input sentence.

use std::io::Write;

use anyhow::Result;

use nutri_core::{MealType, ParsedMeal, parse_meal};

pub fn run<W: Write>(writer: &mut W, input: &str, json: bool) -> Result<()> {
    let meal = parse_meal(input);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&meal)?)?;
    } else {
        write_human(writer, &meal)?;
    }
    Ok(())
}

fn write_human<W: Write>(writer: &mut W, meal: &ParsedMeal) -> Result<()> {
    writeln!(writer, "식사 분류: {}", MealType::label_ko_or_default(meal.meal_type))?;

    if meal.items.is_empty() {
        writeln!(writer, "인식된 음식이 없습니다.")?;
        return Ok(());
    }

    for item in &meal.items {
        writeln!(
            writer,
            "- {} {}{}: {}g, {}kcal",
            item.name, item.quantity, item.unit, item.grams, item.kcal
        )?;
    }
    writeln!(writer, "합계: {}kcal, {}g", meal.total_kcal, meal.total_grams)?;
    Ok(())
}
