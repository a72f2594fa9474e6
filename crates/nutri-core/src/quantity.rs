//! Quantity token resolution.
//!
//! A quantity token from the extractor is one of three shapes: a Korean
//! numeral word, an Arabic decimal string, or nothing at all. Resolution is
//! total: unrecognized tokens mean one unit.

/// A classified quantity token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityToken {
    /// A Korean numeral word such as "한", "다섯", or "반".
    Korean(f64),
    /// An Arabic decimal string such as "2" or "0.5".
    Decimal(f64),
    /// Empty or unrecognized, treated as one unit.
    Implicit,
}

impl QuantityToken {
    /// Classifies a raw token.
    ///
    /// The Korean numeral table is consulted first, then a decimal parse.
    /// Non-finite and non-positive numbers are rejected as implicit.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            return Self::Implicit;
        }
        if let Some(value) = korean_numeral(token) {
            return Self::Korean(value);
        }
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Self::Decimal(value),
            _ => Self::Implicit,
        }
    }

    /// The numeric multiplier this token stands for.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Korean(value) | Self::Decimal(value) => value,
            Self::Implicit => 1.0,
        }
    }
}

/// Resolves a quantity token to a positive multiplier. Never fails.
#[must_use]
pub fn resolve_quantity(token: &str) -> f64 {
    QuantityToken::parse(token).value()
}

/// Korean numeral words for 1-10 plus 반 (half), with native and Sino-Korean
/// synonyms.
fn korean_numeral(word: &str) -> Option<f64> {
    let value = match word {
        "한" | "하나" | "일" => 1.0,
        "두" | "둘" | "이" => 2.0,
        "세" | "셋" | "삼" => 3.0,
        "네" | "넷" | "사" => 4.0,
        "다섯" | "오" => 5.0,
        "여섯" | "육" => 6.0,
        "일곱" | "칠" => 7.0,
        "여덟" | "팔" => 8.0,
        "아홉" | "구" => 9.0,
        "열" | "십" => 10.0,
        "반" => 0.5,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_resolves(token: &str, expected: f64) {
        let actual = resolve_quantity(token);
        assert!(
            (actual - expected).abs() < f64::EPSILON,
            "token {token:?}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn synonyms_for_one_agree() {
        assert_resolves("한", 1.0);
        assert_resolves("하나", 1.0);
        assert_resolves("일", 1.0);
    }

    #[test]
    fn half_resolves_to_point_five() {
        assert_resolves("반", 0.5);
    }

    #[test]
    fn full_numeral_range() {
        assert_resolves("두", 2.0);
        assert_resolves("다섯", 5.0);
        assert_resolves("여덟", 8.0);
        assert_resolves("열", 10.0);
        assert_resolves("십", 10.0);
    }

    #[test]
    fn decimal_strings_parse() {
        assert_resolves("2", 2.0);
        assert_resolves("0.5", 0.5);
        assert_resolves("1.25", 1.25);
    }

    #[test]
    fn garbage_defaults_to_one() {
        assert_resolves("", 1.0);
        assert_resolves("   ", 1.0);
        assert_resolves("많이많이", 1.0);
        assert_resolves("abc", 1.0);
        assert_resolves("-3", 1.0);
        assert_resolves("0", 1.0);
        assert_resolves("NaN", 1.0);
    }

    #[test]
    fn token_classification() {
        assert_eq!(QuantityToken::parse("세"), QuantityToken::Korean(3.0));
        assert_eq!(QuantityToken::parse("3"), QuantityToken::Decimal(3.0));
        assert_eq!(QuantityToken::parse(""), QuantityToken::Implicit);
        assert_eq!(QuantityToken::parse("???"), QuantityToken::Implicit);
    }
}
