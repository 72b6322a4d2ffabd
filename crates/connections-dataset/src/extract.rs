//! Pure text extraction for a single date-group or category block.
//!
//! These functions never see the DOM; the parser hands them already
//! flattened text so each rule can be tested in isolation.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Month name, day with optional ordinal suffix, optional comma, 4-digit year.
const DATE_PATTERN: &str = r"\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})";

/// Format the normalised match is parsed with.
const DATE_FORMAT: &str = "%B %d, %Y";

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_PATTERN).expect("date regex is valid"))
}

/// Find the first "Month Day[suffix], Year" run in `text` and parse it.
///
/// Returns `None` when no such run exists. A run that names an impossible
/// calendar day ("February 30th, 2024") is also `None`, with a warning.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let caps = date_regex().captures(text)?;
    let cleaned = format!("{} {}, {}", &caps[1], &caps[2], &caps[3]);

    match NaiveDate::parse_from_str(&cleaned, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(matched = &caps[0], "unparseable archive date: {e}");
            None
        }
    }
}

/// Normalise a bold label into a category name. Blank labels yield `None`.
pub fn extract_category(label: &str) -> Option<String> {
    let category = label.trim().to_lowercase();
    if category.is_empty() {
        None
    } else {
        Some(category)
    }
}

/// Pull the answer words out of a category item's text.
///
/// Everything up to the first occurrence of `label` is dropped, then
/// everything up to the first `-`. The rest is split on `", "`.
/// If `label` repeats before the separator only its first occurrence counts.
pub fn extract_words(item_text: &str, label: &str) -> Vec<String> {
    let after_label = if label.is_empty() {
        item_text
    } else {
        item_text
            .split_once(label)
            .map_or(item_text, |(_, rest)| rest)
    };
    let candidates = after_label
        .split_once('-')
        .map_or(after_label, |(_, rest)| rest)
        .trim()
        .to_lowercase();

    if candidates.is_empty() {
        return Vec::new();
    }
    candidates.split(", ").map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_with_ordinal() {
        assert_eq!(extract_date("June 3rd, 2024"), Some(ymd(2024, 6, 3)));
        assert_eq!(extract_date("Connections January 5th, 2024 answers"), Some(ymd(2024, 1, 5)));
        assert_eq!(extract_date("August 22nd, 2023"), Some(ymd(2023, 8, 22)));
        assert_eq!(extract_date("May 1st, 2024"), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn test_date_ordinal_insensitive() {
        for (with, without) in [
            ("June 3rd, 2024", "June 3, 2024"),
            ("March 21st, 2024", "March 21, 2024"),
            ("December 12th, 2023", "December 12, 2023"),
        ] {
            assert_eq!(extract_date(with), extract_date(without));
            assert!(extract_date(with).is_some());
        }
    }

    #[test]
    fn test_date_without_comma() {
        assert_eq!(extract_date("October 9th 2023"), Some(ymd(2023, 10, 9)));
    }

    #[test]
    fn test_date_first_match_wins() {
        let text = "Puzzle #300 April 14th, 2024 (replaces April 13th, 2024)";
        assert_eq!(extract_date(text), Some(ymd(2024, 4, 14)));
    }

    #[test]
    fn test_no_date_is_none() {
        assert_eq!(extract_date(""), None);
        assert_eq!(extract_date("No puzzle today"), None);
        assert_eq!(extract_date("2024-06-03"), None);
        assert_eq!(extract_date("Juneteenth 3rd, 2024"), None);
        assert_eq!(extract_date("june 3rd, 2024"), None);
    }

    #[test]
    fn test_impossible_day_is_none() {
        assert_eq!(extract_date("February 30th, 2024"), None);
        assert_eq!(extract_date("April 31st, 2024"), None);
    }

    #[test]
    fn test_category_normalised() {
        assert_eq!(
            extract_category("  CATEGORY LABEL "),
            Some("category label".to_string())
        );
        assert_eq!(extract_category(" \n "), None);
    }

    #[test]
    fn test_words_scenario() {
        let words = extract_words("CATEGORY LABEL - apple, banana, cherry", "CATEGORY LABEL");
        assert_eq!(words, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_words_lowercased_and_keep_inner_hyphens() {
        let words = extract_words("Clothing: - T-SHIRT, Scarf, HAT, Glove", "Clothing:");
        assert_eq!(words, vec!["t-shirt", "scarf", "hat", "glove"]);
    }

    #[test]
    fn test_words_label_with_hyphen() {
        let words = extract_words("X-RAY THINGS - bone, film", "X-RAY THINGS");
        assert_eq!(words, vec!["bone", "film"]);
    }

    #[test]
    fn test_words_without_separator_uses_remainder() {
        let words = extract_words("Fruit apple, pear", "Fruit");
        assert_eq!(words, vec!["apple", "pear"]);
    }

    #[test]
    fn test_words_empty_remainder() {
        assert!(extract_words("Fruit - ", "Fruit").is_empty());
        assert!(extract_words("Fruit", "Fruit").is_empty());
    }

    #[test]
    fn test_words_split_matches_manual_strip() {
        let cases = [
            ("Yellow: ", "Yellow: - one, two, three, four"),
            ("GREEN", "GREEN—ish - a, b"),
            ("Blue", "Blue -sky, sea"),
        ];
        for (label, text) in cases {
            let rest = &text[text.find(label).unwrap() + label.len()..];
            let manual = rest[rest.find('-').unwrap() + 1..].trim().to_lowercase();
            let manual: Vec<String> = manual.split(", ").map(str::to_owned).collect();
            assert_eq!(extract_words(text, label), manual, "case {text:?}");
        }
    }

    #[test]
    fn test_words_repeated_label_uses_first_occurrence() {
        // "AB" occurs in the label region and again in the words; only the
        // first occurrence is stripped.
        let words = extract_words("AB - abc, AB", "AB");
        assert_eq!(words, vec!["abc", "ab"]);
    }
}
