//! Extraction of a numeric path and a free-text description from the
//! remainder of an input line
//!
//! `"1.2 Walk daily"` yields the path `[0, 1]` and the description
//! `"Walk daily"`. Users count from 1; paths are stored 0-based.

use crate::core::error::{PlanError, Result};

/// Characters that close a number token
const DELIMITERS: [char; 8] = [' ', '.', '#', ',', '/', '|', ';', ':'];

const QUOTES: [char; 2] = ['"', '\''];

/// A parsed remainder
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPath {
    pub path: Vec<usize>,
    pub description: String,
}

/// Parse a remainder into a validated 0-based path and a description
pub fn parse(input: &str) -> Result<ParsedPath> {
    let (raw, rest) = scan(input);

    let mut path = Vec::with_capacity(raw.len());
    for value in raw {
        match value {
            -1 => return Err(PlanError::ZeroId),
            v if v < -1 => return Err(PlanError::NegativeId(v + 1)),
            v => path.push(usize::try_from(v).unwrap_or(usize::MAX)),
        }
    }

    Ok(ParsedPath {
        path,
        description: clean_description(rest),
    })
}

/// Split `input` into decremented number tokens and the unscanned tail
fn scan(input: &str) -> (Vec<i64>, &str) {
    let mut values = Vec::new();
    let mut token = String::new();
    let mut token_start = 0;

    for (pos, ch) in input.char_indices() {
        if ch.is_ascii_digit() {
            if token.is_empty() {
                token_start = pos;
            }
            token.push(ch);
        } else if ch == '-' && token.is_empty() {
            token_start = pos;
            token.push(ch);
        } else if DELIMITERS.contains(&ch) {
            if !token.is_empty() {
                match to_index(&token) {
                    Some(value) => values.push(value),
                    None => return (values, &input[token_start..]),
                }
                token.clear();
            }
        } else {
            // a signed token stays an index so that "-3rd" is rejected
            if token.starts_with('-') {
                if let Some(value) = to_index(&token) {
                    values.push(value);
                    return (values, &input[pos..]);
                }
            }
            // a half-read token such as "3rd" belongs to the description
            let start = if token.is_empty() { pos } else { token_start };
            return (values, &input[start..]);
        }
    }

    if !token.is_empty() {
        match to_index(&token) {
            Some(value) => values.push(value),
            None => return (values, &input[token_start..]),
        }
    }
    (values, "")
}

/// Convert a 1-based literal to a 0-based value; `None` for a bare sign
fn to_index(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let value = if token.starts_with('-') {
        -magnitude
    } else {
        magnitude
    };
    Some(value.saturating_sub(1))
}

/// Trim whitespace and surrounding quotes from free text
pub fn clean_description(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| QUOTES.contains(&c))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ok(input: &str) -> (Vec<usize>, String) {
        let parsed = parse(input).unwrap();
        (parsed.path, parsed.description)
    }

    #[test]
    fn test_empty_remainder() {
        assert_eq!(ok(""), (vec![], String::new()));
        assert_eq!(ok("   "), (vec![], String::new()));
    }

    #[test]
    fn test_single_index_and_description() {
        assert_eq!(ok("1 Diet"), (vec![0], "Diet".to_string()));
    }

    #[test]
    fn test_every_delimiter_separates() {
        assert_eq!(ok("1.2#3,4"), (vec![0, 1, 2, 3], String::new()));
        assert_eq!(ok("1/2|3;4:5"), (vec![0, 1, 2, 3, 4], String::new()));
        assert_eq!(ok("2 . 3  Walk"), (vec![1, 2], "Walk".to_string()));
    }

    #[test]
    fn test_description_only() {
        assert_eq!(ok("Lose weight"), (vec![], "Lose weight".to_string()));
    }

    #[test]
    fn test_quotes_are_stripped() {
        assert_eq!(ok("\"Lose weight\""), (vec![], "Lose weight".to_string()));
        assert_eq!(ok("1 'Diet'"), (vec![0], "Diet".to_string()));
        // unbalanced quoting is tolerated
        assert_eq!(ok("1 \"Diet"), (vec![0], "Diet".to_string()));
    }

    #[test]
    fn test_half_read_number_starts_description() {
        assert_eq!(ok("1 3rd attempt"), (vec![0], "3rd attempt".to_string()));
    }

    #[test]
    fn test_zero_is_rejected() {
        assert!(matches!(parse("0"), Err(PlanError::ZeroId)));
        assert!(matches!(parse("1.0 x"), Err(PlanError::ZeroId)));
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!(matches!(parse("-3"), Err(PlanError::NegativeId(-3))));
        assert!(matches!(parse("2 -1"), Err(PlanError::NegativeId(-1))));
    }

    #[test]
    fn test_negative_with_suffix_is_rejected() {
        assert!(matches!(parse("-3rd"), Err(PlanError::NegativeId(-3))));
        assert!(matches!(parse("-5kg target"), Err(PlanError::NegativeId(-5))));
        assert!(matches!(parse("1 -2x"), Err(PlanError::NegativeId(-2))));
    }

    #[test]
    fn test_second_minus_ends_numbers() {
        assert_eq!(ok("--3"), (vec![], "--3".to_string()));
        assert_eq!(ok("1 - buy milk"), (vec![0], "- buy milk".to_string()));
    }

    #[test]
    fn test_minus_after_digits_ends_numbers() {
        assert_eq!(ok("1-2"), (vec![], "1-2".to_string()));
    }

    #[test]
    fn test_huge_index_saturates() {
        let (path, _) = ok("99999999999999999999999");
        assert_eq!(path.len(), 1);
        assert!(path[0] > 1_000_000);
    }

    proptest! {
        #[test]
        fn prop_one_based_becomes_zero_based(n in 1usize..100_000) {
            let parsed = parse(&n.to_string()).unwrap();
            prop_assert_eq!(parsed.path, vec![n - 1]);
        }

        #[test]
        fn prop_negative_always_rejected(n in 1u32..100_000, tail in "[a-z ]{0,10}") {
            let input = format!("-{}{}", n, tail);
            prop_assert!(matches!(parse(&input), Err(PlanError::NegativeId(_))));
        }

        #[test]
        fn prop_path_then_text(parts in proptest::collection::vec(1usize..50, 0..5)) {
            let joined = parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".");
            let parsed = parse(&format!("{} notes", joined)).unwrap();
            let expected: Vec<usize> = parts.iter().map(|p| p - 1).collect();
            prop_assert_eq!(parsed.path, expected);
            prop_assert_eq!(parsed.description, "notes");
        }
    }
}
