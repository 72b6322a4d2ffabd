//! Walk the rendered archive page and turn its nested lists into records.
//!
//! Expected shape:
//!
//! ```html
//! <div class="entry-content">
//!   <ul>
//!     <li>Connections #300 April 14th, 2024
//!       <ul>
//!         <li><strong>Yellow</strong> - one, two, three, four</li>
//!         ...
//!       </ul>
//!     </li>
//!     ...
//!   </ul>
//! </div>
//! ```
//!
//! Anything that deviates from this shape is a structural error, not a
//! silently skipped item.

use crate::extract::{extract_category, extract_date, extract_words};
use crate::types::{AnswerRecord, ExtractError};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Extract every category of every date-group on the page, in document order.
pub fn extract_answers(html: &str) -> Result<Vec<AnswerRecord>, ExtractError> {
    let document = Html::parse_document(html);

    let container = document
        .select(&selector("div.entry-content"))
        .next()
        .ok_or(ExtractError::MissingContainer)?;
    let list = container
        .select(&selector("ul"))
        .next()
        .ok_or(ExtractError::MissingList)?;

    let li_sel = selector("li");
    let strong_sel = selector("strong");
    let b_sel = selector("b");
    let mut records = Vec::new();

    let groups = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li");

    for (group_idx, group) in groups.enumerate() {
        let date = extract_date(&text_of(&group));
        let before = records.len();

        let items = group.select(&li_sel).filter(|el| el.id() != group.id());
        for (item_idx, item) in items.enumerate() {
            let bold = item
                .select(&strong_sel)
                .next()
                .or_else(|| item.select(&b_sel).next())
                .ok_or(ExtractError::MissingCategoryLabel {
                    group: group_idx,
                    item: item_idx,
                })?;
            let label = text_of(&bold);
            let category = extract_category(&label).ok_or(ExtractError::MissingCategoryLabel {
                group: group_idx,
                item: item_idx,
            })?;

            let words = extract_words(&text_of(&item), &label);
            if words.is_empty() {
                return Err(ExtractError::EmptyWords {
                    group: group_idx,
                    item: item_idx,
                    category,
                });
            }

            records.push(AnswerRecord::new(date, category, words));
        }

        debug!(
            group = group_idx,
            date = ?date,
            categories = records.len() - before,
            "parsed date-group"
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn page(body: &str) -> String {
        format!("<html><body><div class=\"entry-content\">{body}</div></body></html>")
    }

    #[test]
    fn test_single_group_scenario() {
        let html = page(
            "<ul><li>January 5th, 2024<ul>\
             <li><strong>CATEGORY LABEL</strong> - apple, banana, cherry</li>\
             </ul></li></ul>",
        );
        let records = extract_answers(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(records[0].category, "category label");
        assert_eq!(records[0].words, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_document_order_preserved() {
        let html = page(
            "<ul>\
             <li>June 3rd, 2024<ul>\
               <li><strong>A</strong> - a1, a2</li>\
               <li><strong>B</strong> - b1, b2</li>\
             </ul></li>\
             <li>June 2nd, 2024<ul>\
               <li><strong>C</strong> - c1, c2</li>\
             </ul></li>\
             </ul>",
        );
        let records = extract_answers(&html).unwrap();
        let cats: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(cats, vec!["a", "b", "c"]);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 6, 3));
        assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2024, 6, 2));
    }

    #[test]
    fn test_missing_date_is_none() {
        let html = page("<ul><li>Bonus puzzle<ul><li><b>Odd</b> - x, y</li></ul></li></ul>");
        let records = extract_answers(&html).unwrap();
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].category, "odd");
    }

    #[test]
    fn test_strong_label_preferred_over_earlier_b() {
        let html = page(
            "<ul><li>May 1st, 2024<ul>\
             <li><b>NEW</b> <strong>Fish</strong> - bass, cod</li>\
             </ul></li></ul>",
        );
        let records = extract_answers(&html).unwrap();
        assert_eq!(records[0].category, "fish");
        assert_eq!(records[0].words, vec!["bass", "cod"]);
    }

    #[test]
    fn test_deeply_nested_items_are_found() {
        let html = page(
            "<ul><li>May 1st, 2024<div><ul><li><span><strong>Deep</strong></span> - w, z</li></ul></div></li></ul>",
        );
        let records = extract_answers(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].words, vec!["w", "z"]);
    }

    #[test]
    fn test_only_first_list_is_used() {
        let html = page(
            "<p>intro</p>\
             <ul><li>May 1st, 2024<ul><li><strong>First</strong> - a, b</li></ul></li></ul>\
             <ul><li>May 2nd, 2024<ul><li><strong>Second</strong> - c, d</li></ul></li></ul>",
        );
        let records = extract_answers(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "first");
    }

    #[test]
    fn test_missing_container() {
        let html = "<html><body><ul><li>x</li></ul></body></html>";
        assert_eq!(extract_answers(html), Err(ExtractError::MissingContainer));
    }

    #[test]
    fn test_missing_list() {
        let html = page("<p>No answers yet</p>");
        assert_eq!(extract_answers(&html), Err(ExtractError::MissingList));
    }

    #[test]
    fn test_missing_bold_is_structural_error() {
        let html = page(
            "<ul><li>May 1st, 2024<ul>\
             <li><strong>Fine</strong> - a, b</li>\
             <li>Broken - c, d</li>\
             </ul></li></ul>",
        );
        assert_eq!(
            extract_answers(&html),
            Err(ExtractError::MissingCategoryLabel { group: 0, item: 1 })
        );
    }

    #[test]
    fn test_empty_words_is_structural_error() {
        let html = page("<ul><li>May 1st, 2024<ul><li><strong>Blank</strong> - </li></ul></li></ul>");
        assert!(matches!(
            extract_answers(&html),
            Err(ExtractError::EmptyWords { group: 0, item: 0, .. })
        ));
    }

    #[test]
    fn test_group_without_items_yields_nothing() {
        let html = page("<ul><li>May 1st, 2024</li></ul>");
        assert!(extract_answers(&html).unwrap().is_empty());
    }
}
