//! Food-mention extraction from free-form text.
//!
//! An ordered list of matchers runs over the input, each covering one word
//! order in which food mentions appear ("밥 한 공기", "한 그릇 라면",
//! "삼겹살 200g"). Matchers deliberately over-produce: a candidate whose food
//! token is not in the reference table is dropped afterwards, so recall is
//! traded for precision and the closed vocabulary does the filtering.
//!
//! When the matchers combined accept nothing, a fallback scan looks for any
//! known food name as a plain substring, longest name first and
//! non-overlapping, so a bare "라면" still yields one item.

use std::sync::LazyLock;

use regex::Regex;

use crate::facts::{FOOD_FACT_TABLE, is_known_food};

/// A candidate food mention before quantity and unit resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// Food name token. Guaranteed to be a reference-table key once accepted.
    pub name: String,
    /// Raw quantity token, possibly empty.
    pub quantity: String,
    /// Raw unit token, "기본" for fallback mentions.
    pub unit: String,
}

/// Characters that make up Korean numeral words (1-10, synonyms, and 반).
const KOREAN_NUMERAL_CHARS: &str = "한두세네다섯여일곱덟아홉열반하나둘셋넷이삼사오육칠팔구십";

/// Decimal quantity such as "2" or "0.5".
const DECIMAL: &str = r"[0-9]+(?:\.[0-9]+)?";

/// Count units recognized in pattern position. Gram markers are handled by a
/// separate matcher so the two never double-report the same mention.
const COUNT_UNITS: &str = "공기|그릇|숟가락|큰술|작은술|조각|컵|개|장";

// "밥 한 공기", "토스트 2장": food, then quantity, then a count unit.
static FOOD_QUANTITY_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(\p{{Hangul}}+?)\s*({DECIMAL}|[{KOREAN_NUMERAL_CHARS}]{{1,3}})\s*({COUNT_UNITS})"
    ))
    .expect("mention pattern must compile")
});

// "한 그릇 라면": quantity, then a count unit, then food.
static QUANTITY_UNIT_FOOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"({DECIMAL}|[{KOREAN_NUMERAL_CHARS}]{{1,3}})\s*({COUNT_UNITS})\s*(\p{{Hangul}}+)"
    ))
    .expect("mention pattern must compile")
});

// "삼겹살 200g": food with an explicit gram weight.
static FOOD_GRAM_WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(\p{{Hangul}}+?)\s*({DECIMAL})\s*(그램|g)"))
        .expect("mention pattern must compile")
});

fn match_food_quantity_unit(input: &str) -> Vec<Mention> {
    FOOD_QUANTITY_UNIT
        .captures_iter(input)
        .map(|caps| Mention {
            name: caps[1].to_string(),
            quantity: caps[2].to_string(),
            unit: caps[3].to_string(),
        })
        .collect()
}

fn match_quantity_unit_food(input: &str) -> Vec<Mention> {
    QUANTITY_UNIT_FOOD
        .captures_iter(input)
        .map(|caps| Mention {
            name: caps[3].to_string(),
            quantity: caps[1].to_string(),
            unit: caps[2].to_string(),
        })
        .collect()
}

fn match_food_gram_weight(input: &str) -> Vec<Mention> {
    FOOD_GRAM_WEIGHT
        .captures_iter(input)
        .map(|caps| Mention {
            name: caps[1].to_string(),
            quantity: caps[2].to_string(),
            unit: caps[3].to_string(),
        })
        .collect()
}

/// Matchers in application order. Earlier matchers do not suppress later
/// ones; acceptance is decided per candidate by vocabulary membership.
static MATCHERS: &[fn(&str) -> Vec<Mention>] = &[
    match_food_quantity_unit,
    match_quantity_unit_food,
    match_food_gram_weight,
];

/// Extracts accepted food mentions from the input.
///
/// Runs every matcher, keeps candidates whose food token is a reference-table
/// key, and falls back to a substring scan only when nothing was accepted.
#[must_use]
pub fn extract_mentions(input: &str) -> Vec<Mention> {
    let mut accepted = Vec::new();
    for matcher in MATCHERS {
        for candidate in matcher(input) {
            if is_known_food(&candidate.name) {
                tracing::debug!(?candidate, "accepted mention");
                accepted.push(candidate);
            } else {
                tracing::trace!(?candidate, "rejected candidate, unknown food");
            }
        }
    }

    if accepted.is_empty() {
        accepted = fallback_scan(input);
    }
    accepted
}

/// Substring scan over the closed vocabulary.
///
/// Names are tried longest first and occurrences may not overlap, so an input
/// that is exactly one food name yields exactly one mention even when another
/// name ("밥") is a substring of it ("현미밥"). Mentions come back in input
/// order with quantity 1 and the default unit.
fn fallback_scan(input: &str) -> Vec<Mention> {
    let mut names: Vec<&str> = FOOD_FACT_TABLE.iter().map(|(name, _)| *name).collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut found: Vec<(usize, Mention)> = Vec::new();
    for name in names {
        for (start, matched) in input.match_indices(name) {
            let end = start + matched.len();
            if claimed.iter().any(|&(s, e)| start < e && s < end) {
                continue;
            }
            claimed.push((start, end));
            found.push((
                start,
                Mention {
                    name: name.to_string(),
                    quantity: String::new(),
                    unit: "기본".to_string(),
                },
            ));
        }
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, mention)| mention).collect()
}
