//! The fixed rule set that turns fetched records into output rows.
//!
//! Steps run in this order and the order matters:
//!
//! 1. keep records whose `userId` is 1
//! 2. project `id`, `title`, `body`
//! 3. `body_word_count` from the raw body
//! 4. `post_length` from the raw body
//! 5. `contains_lorem` from the raw body
//! 6. rename to `post_id`, `post_title`, `post_body`
//! 7. trim `post_title`
//! 8. fill default title and body
//!
//! Derivations see the body before default fill, so a missing body counts
//! as the empty string rather than as the placeholder text.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Record, TransformedRow, TransformedTable};

/// Only posts by this user survive the filter.
pub const RETAINED_USER_ID: i64 = 1;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_BODY: &str = "No content available";

// ASCII whitespace only; U+00A0 and other Unicode spaces stay inside a word.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\s)+").expect("whitespace pattern is valid"));

static LOREM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("lorem").expect("lorem pattern is valid"));

/// Apply every step to `records`, preserving the order of retained records.
pub fn transform(records: &[Record]) -> TransformedTable {
    records
        .iter()
        .filter(|record| retained(record))
        .map(project)
        .map(derive)
        .map(rename)
        .map(trim_title)
        .map(fill_defaults)
        .collect()
}

struct Projected {
    id: Option<i64>,
    title: Option<String>,
    body: Option<String>,
}

struct Derived {
    projected: Projected,
    body_word_count: usize,
    post_length: usize,
    contains_lorem: bool,
}

/// Renamed columns; title and body may still be missing.
struct Renamed {
    post_id: Option<i64>,
    post_title: Option<String>,
    post_body: Option<String>,
    body_word_count: usize,
    post_length: usize,
    contains_lorem: bool,
}

fn retained(record: &Record) -> bool {
    record.user_id() == Some(RETAINED_USER_ID)
}

fn project(record: &Record) -> Projected {
    Projected {
        id: record.id(),
        title: record.text("title"),
        body: record.text("body"),
    }
}

fn derive(projected: Projected) -> Derived {
    let body = projected.body.as_deref().unwrap_or_default();
    Derived {
        body_word_count: word_count(body),
        post_length: body.chars().count(),
        contains_lorem: LOREM.is_match(body),
        projected,
    }
}

fn rename(derived: Derived) -> Renamed {
    let Derived {
        projected,
        body_word_count,
        post_length,
        contains_lorem,
    } = derived;
    Renamed {
        post_id: projected.id,
        post_title: projected.title,
        post_body: projected.body,
        body_word_count,
        post_length,
        contains_lorem,
    }
}

fn trim_title(mut row: Renamed) -> Renamed {
    row.post_title = row
        .post_title
        .map(|title| title.trim_matches(|c: char| c.is_ascii_whitespace()).to_string());
    row
}

// A blank value is filled the same as a missing one.
fn fill_defaults(row: Renamed) -> TransformedRow {
    TransformedRow {
        post_id: row.post_id,
        post_title: or_default(row.post_title, DEFAULT_TITLE),
        post_body: or_default(row.post_body, DEFAULT_BODY),
        body_word_count: row.body_word_count,
        post_length: row.post_length,
        contains_lorem: row.contains_lorem,
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Count the non-empty tokens between whitespace runs.
pub fn word_count(text: &str) -> usize {
    WHITESPACE_RUN
        .split(text)
        .filter(|token| !token.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_retained_post_is_transformed() {
        let input = records(json!([
            {"userId": 1, "id": 1, "title": " Hi ", "body": "lorem ipsum  dolor"}
        ]));

        let table = transform(&input);

        assert_eq!(
            table.rows(),
            &[TransformedRow {
                post_id: Some(1),
                post_title: "Hi".to_string(),
                post_body: "lorem ipsum  dolor".to_string(),
                body_word_count: 3,
                post_length: 18,
                contains_lorem: true,
            }]
        );
    }

    #[test]
    fn test_other_users_are_dropped() {
        let input = records(json!([
            {"userId": 2, "id": 2, "title": "X", "body": "y"},
            {"id": 4, "title": "no owner", "body": "z"},
            {"userId": null, "id": 5, "title": "null owner", "body": "z"},
        ]));

        assert!(transform(&input).is_empty());
    }

    #[test]
    fn test_null_title_and_body_get_defaults() {
        let input = records(json!([
            {"userId": 1, "id": 3, "title": null, "body": null}
        ]));

        let table = transform(&input);

        assert_eq!(
            table.rows(),
            &[TransformedRow {
                post_id: Some(3),
                post_title: DEFAULT_TITLE.to_string(),
                post_body: DEFAULT_BODY.to_string(),
                body_word_count: 0,
                post_length: 0,
                contains_lorem: false,
            }]
        );
    }

    #[test]
    fn test_missing_fields_follow_null_policy() {
        let input = records(json!([{"userId": 1}]));

        let table = transform(&input);
        let row = &table.rows()[0];

        assert_eq!(row.post_id, None);
        assert_eq!(row.post_title, DEFAULT_TITLE);
        assert_eq!(row.post_body, DEFAULT_BODY);
        assert_eq!(row.body_word_count, 0);
        assert_eq!(row.post_length, 0);
    }

    #[test]
    fn test_derived_columns_ignore_default_text() {
        // "No content available" would count 3 words and 20 characters.
        let input = records(json!([{"userId": 1, "id": 1, "title": "t"}]));

        let table = transform(&input);
        let row = &table.rows()[0];

        assert_eq!(row.post_body, DEFAULT_BODY);
        assert_eq!(row.body_word_count, 0);
        assert_eq!(row.post_length, 0);
    }

    #[test]
    fn test_blank_title_becomes_untitled() {
        let input = records(json!([
            {"userId": 1, "id": 1, "title": "   \t", "body": ""}
        ]));

        let table = transform(&input);
        let row = &table.rows()[0];

        assert_eq!(row.post_title, DEFAULT_TITLE);
        assert_eq!(row.post_body, DEFAULT_BODY);
        assert_eq!(row.post_length, 0);
    }

    #[test]
    fn test_word_count_collapses_whitespace_runs() {
        assert_eq!(word_count("one two"), 2);
        assert_eq!(word_count("one \t\n  two\nthree"), 3);
        assert_eq!(word_count("  leading and trailing  "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count(" \n\t "), 0);
    }

    #[test]
    fn test_unicode_spaces_are_not_separators() {
        assert_eq!(word_count("a\u{a0}b"), 1);
        assert_eq!(word_count("a\u{2003}b c"), 2);

        let input = records(json!([
            {"userId": 1, "id": 1, "title": "\u{a0}Hi \t", "body": "x"}
        ]));

        let table = transform(&input);
        assert_eq!(table.rows()[0].post_title, "\u{a0}Hi");
    }

    #[test]
    fn test_body_is_not_trimmed_and_length_counts_chars() {
        let input = records(json!([
            {"userId": 1, "id": 9, "title": "t", "body": " héllo wörld "}
        ]));

        let table = transform(&input);
        let row = &table.rows()[0];

        assert_eq!(row.post_body, " héllo wörld ");
        assert_eq!(row.post_length, 13);
        assert_eq!(row.body_word_count, 2);
    }

    #[test]
    fn test_lorem_match_is_case_sensitive_substring() {
        let input = records(json!([
            {"userId": 1, "id": 1, "title": "a", "body": "dolorem est"},
            {"userId": 1, "id": 2, "title": "b", "body": "Lorem ipsum"},
            {"userId": 1, "id": 3, "title": "c", "body": "LOREM"},
        ]));

        let flags: Vec<bool> = transform(&input)
            .rows()
            .iter()
            .map(|row| row.contains_lorem)
            .collect();

        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_order_and_duplicates_are_preserved() {
        let input = records(json!([
            {"userId": 1, "id": 5, "title": "e", "body": "x"},
            {"userId": 2, "id": 6, "title": "f", "body": "x"},
            {"userId": 1, "id": 1, "title": "a", "body": "x"},
            {"userId": 1, "id": 5, "title": "e again", "body": "x"},
        ]));

        let ids: Vec<Option<i64>> = transform(&input)
            .rows()
            .iter()
            .map(|row| row.post_id)
            .collect();

        assert_eq!(ids, vec![Some(5), Some(1), Some(5)]);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let input = records(json!([
            {"userId": 1.0, "id": 1, "title": "t", "body": "b", "tags": ["x"], "draft": true}
        ]));

        let table = transform(&input);
        let value = serde_json::to_value(&table).unwrap();

        assert_eq!(
            value,
            json!([{
                "post_id": 1,
                "post_title": "t",
                "post_body": "b",
                "body_word_count": 1,
                "post_length": 1,
                "contains_lorem": false,
            }])
        );
    }
}
