//! Token parsing for lifecycle operation inputs.
//!
//! # Responsibility
//! - Split flat token lists into boards, priority, due date and description.
//! - Resolve `@id` targets and calendar-date tokens.
//!
//! # Invariants
//! - First match wins for priority and due-date tokens; later ones drop.
//! - Board tokens are `@`-prefixed and longer than the prefix alone.

use crate::model::item::Priority;
use crate::service::{BookError, BookResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Optional prefix marking an explicit due-date token.
pub const DUE_PREFIX: &str = "due:";

static CALENDAR_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/(?:\d{2})?\d{2}$").expect("valid date regex"));

/// Parsed creation input for one task or note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Raw `@`-prefixed board labels in input order, duplicates included;
    /// the item constructor owns dedup and the sentinel default.
    pub boards: Vec<String>,
    pub description: String,
    pub priority: Priority,
    /// Raw date text with any `due:` prefix stripped.
    pub due_date: Option<String>,
}

/// Maps a `p:1|p:2|p:3` token to a priority.
pub fn parse_priority_token(token: &str) -> Option<Priority> {
    match token {
        "p:1" => Some(Priority::Normal),
        "p:2" => Some(Priority::Medium),
        "p:3" => Some(Priority::High),
        _ => None,
    }
}

/// Parses an `MM/DD/YY[YY]` token (with optional `due:` prefix) into a date.
pub fn parse_calendar_date(token: &str) -> Option<NaiveDate> {
    let text = token.strip_prefix(DUE_PREFIX).unwrap_or(token);
    if !CALENDAR_DATE_RE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%y"))
        .ok()
}

/// Splits a token list on literal `|` tokens into independent segments.
pub fn split_segments(tokens: &[String]) -> Vec<Vec<String>> {
    let mut segments: Vec<Vec<String>> = vec![Vec::new()];
    for token in tokens {
        if token == "|" {
            segments.push(Vec::new());
        } else if let Some(last) = segments.last_mut() {
            last.push(token.clone());
        }
    }
    segments
}

/// Parses one creation segment into boards, description, priority and due
/// date.
///
/// # Errors
/// - `MissingDescription` when no description tokens remain.
pub fn parse_create_options(tokens: &[String]) -> BookResult<CreateOptions> {
    let mut boards: Vec<String> = Vec::new();
    let mut description: Vec<&str> = Vec::new();
    let mut priority: Option<Priority> = None;
    let mut due_date: Option<String> = None;

    for token in tokens {
        if let Some(level) = parse_priority_token(token) {
            priority.get_or_insert(level);
            continue;
        }
        if token.starts_with('@') && token.len() > 1 {
            boards.push(token.clone());
            continue;
        }
        let date_text = token.strip_prefix(DUE_PREFIX).unwrap_or(token);
        if due_date.is_none() && CALENDAR_DATE_RE.is_match(date_text) {
            due_date = Some(date_text.to_string());
            continue;
        }
        description.push(token);
    }

    let description = description.join(" ");
    if description.is_empty() {
        return Err(BookError::MissingDescription);
    }

    Ok(CreateOptions {
        boards,
        description,
        priority: priority.unwrap_or_default(),
        due_date,
    })
}

/// Resolves exactly one `@id` target token.
///
/// Returns the target token and the remaining tokens (every copy of the
/// target removed).
///
/// # Errors
/// - `MissingId` when no `@` token is present.
/// - `InvalidIdCount` when more than one is.
pub fn parse_single_target(tokens: &[String]) -> BookResult<(String, Vec<String>)> {
    let targets: Vec<&String> = tokens.iter().filter(|t| t.starts_with('@')).collect();
    match targets.as_slice() {
        [] => Err(BookError::MissingId),
        [target] => {
            let target = (*target).clone();
            let rest = tokens
                .iter()
                .filter(|t| **t != target)
                .cloned()
                .collect();
            Ok((target, rest))
        }
        _ => Err(BookError::InvalidIdCount),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        parse_calendar_date, parse_create_options, parse_priority_token, parse_single_target,
        split_segments,
    };
    use crate::model::item::Priority;
    use crate::service::BookError;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn priority_tokens_map_to_levels() {
        assert_eq!(parse_priority_token("p:1"), Some(Priority::Normal));
        assert_eq!(parse_priority_token("p:2"), Some(Priority::Medium));
        assert_eq!(parse_priority_token("p:3"), Some(Priority::High));
        assert_eq!(parse_priority_token("p:4"), None);
        assert_eq!(parse_priority_token("p2"), None);
    }

    #[test]
    fn calendar_dates_accept_two_and_four_digit_years() {
        assert!(parse_calendar_date("12/25/25").is_some());
        assert!(parse_calendar_date("1/2/2026").is_some());
        assert!(parse_calendar_date("due:12/25/25").is_some());
        assert!(parse_calendar_date("12-25-25").is_none());
        assert!(parse_calendar_date("25/12/25").is_none());
    }

    #[test]
    fn create_options_extract_every_token_class() {
        let parsed = parse_create_options(&tokens(&[
            "@work",
            "Ship",
            "release",
            "p:3",
            "due:12/25/25",
        ]))
        .unwrap();
        assert_eq!(parsed.boards, vec!["@work"]);
        assert_eq!(parsed.description, "Ship release");
        assert_eq!(parsed.priority, Priority::High);
        assert_eq!(parsed.due_date.as_deref(), Some("12/25/25"));
    }

    #[test]
    fn first_priority_and_due_date_win() {
        let parsed =
            parse_create_options(&tokens(&["fix", "p:2", "p:3", "1/1/26", "2/2/26"])).unwrap();
        assert_eq!(parsed.priority, Priority::Medium);
        assert_eq!(parsed.due_date.as_deref(), Some("1/1/26"));
        // the second date token falls through to the description
        assert_eq!(parsed.description, "fix 2/2/26");
    }

    #[test]
    fn bare_at_token_is_description_not_board() {
        let parsed = parse_create_options(&tokens(&["@", "ping", "ops"])).unwrap();
        assert!(parsed.boards.is_empty());
        assert_eq!(parsed.description, "@ ping ops");
    }

    #[test]
    fn empty_description_is_fatal() {
        let err = parse_create_options(&tokens(&["@work", "p:2"])).unwrap_err();
        assert!(matches!(err, BookError::MissingDescription));
        let err = parse_create_options(&[]).unwrap_err();
        assert!(matches!(err, BookError::MissingDescription));
    }

    #[test]
    fn segments_split_on_pipe_tokens() {
        let segments = split_segments(&tokens(&["a", "b", "|", "c"]));
        assert_eq!(segments, vec![tokens(&["a", "b"]), tokens(&["c"])]);
        assert_eq!(split_segments(&tokens(&["a"])), vec![tokens(&["a"])]);
    }

    #[test]
    fn single_target_resolution() {
        let (target, rest) = parse_single_target(&tokens(&["@3", "new", "text"])).unwrap();
        assert_eq!(target, "@3");
        assert_eq!(rest, tokens(&["new", "text"]));

        let err = parse_single_target(&tokens(&["no", "target"])).unwrap_err();
        assert!(matches!(err, BookError::MissingId));

        let err = parse_single_target(&tokens(&["@1", "@2"])).unwrap_err();
        assert!(matches!(err, BookError::InvalidIdCount));
    }
}
