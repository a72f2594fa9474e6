//! Core type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse time-of-day classification for a meal.
///
/// An unclassified meal is represented as `Option::<MealType>::None` rather
/// than a dedicated variant, so the type only ever names a real time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// String representation for JSON output and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Korean label used in exported records.
    #[must_use]
    pub const fn label_ko(self) -> &'static str {
        match self {
            Self::Breakfast => "아침",
            Self::Lunch => "점심",
            Self::Dinner => "저녁",
            Self::Snack => "간식",
        }
    }

    /// Korean label for an optionally classified meal.
    ///
    /// Unclassified meals fall back to the generic "식사" (meal).
    #[must_use]
    pub const fn label_ko_or_default(meal_type: Option<Self>) -> &'static str {
        match meal_type {
            Some(meal_type) => meal_type.label_ko(),
            None => "식사",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown meal-type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMealType(pub String);

impl fmt::Display for UnknownMealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown meal type: {}", self.0)
    }
}

impl std::error::Error for UnknownMealType {}

impl std::str::FromStr for MealType {
    type Err = UnknownMealType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            _ => Err(UnknownMealType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_from_str() {
        assert_eq!("breakfast".parse::<MealType>().unwrap(), MealType::Breakfast);
        assert_eq!("snack".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn meal_type_serde_roundtrip() {
        let json = serde_json::to_string(&MealType::Lunch).unwrap();
        assert_eq!(json, "\"lunch\"");
        let parsed: MealType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MealType::Lunch);
    }

    #[test]
    fn meal_type_korean_labels() {
        assert_eq!(MealType::Breakfast.label_ko(), "아침");
        assert_eq!(MealType::Dinner.label_ko(), "저녁");
        assert_eq!(MealType::label_ko_or_default(Some(MealType::Snack)), "간식");
        assert_eq!(MealType::label_ko_or_default(None), "식사");
    }
}
