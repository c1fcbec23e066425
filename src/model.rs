//! Parsing and generation of the input array.

use rand::Rng;
use thiserror::Error;

/// Randomly generated arrays have between 5 and 14 elements.
pub const MIN_RANDOM_LEN: usize = 5;
pub const MAX_RANDOM_LEN: usize = 14;

/// Randomly generated values are between 1 and 100.
pub const MIN_RANDOM_VALUE: i64 = 1;
pub const MAX_RANDOM_VALUE: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("enter at least one number")]
    Empty,
    #[error("'{0}' is not a valid integer")]
    InvalidToken(String),
}

/// Parse comma-separated integers. Either every token parses or the whole
/// input is rejected; no partial arrays.
pub fn parse_input(text: &str) -> Result<Vec<i64>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut values = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        match token.parse::<i64>() {
            Ok(v) => values.push(v),
            Err(_) => return Err(ParseError::InvalidToken(token.to_string())),
        }
    }
    Ok(values)
}

/// Generate a random array: length in [5,14], values in [1,100].
pub fn generate_random() -> Vec<i64> {
    let mut rng = rand::rng();
    let len = rng.random_range(MIN_RANDOM_LEN..=MAX_RANDOM_LEN);
    (0..len)
        .map(|_| rng.random_range(MIN_RANDOM_VALUE..=MAX_RANDOM_VALUE))
        .collect()
}

/// Render an array back into the comma-joined form the input field holds.
pub fn join_array(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_input() {
        assert_eq!(parse_input("5,3,8,1").unwrap(), vec![5, 3, 8, 1]);
        assert_eq!(parse_input(" 10 , -2 ,0 ").unwrap(), vec![10, -2, 0]);
        assert_eq!(parse_input("42").unwrap(), vec![42]);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_input(""), Err(ParseError::Empty));
        assert_eq!(parse_input("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert_eq!(
            parse_input("1,two,3"),
            Err(ParseError::InvalidToken("two".to_string()))
        );
        assert_eq!(
            parse_input("1,,3"),
            Err(ParseError::InvalidToken(String::new()))
        );
        assert_eq!(
            parse_input("1.5,2"),
            Err(ParseError::InvalidToken("1.5".to_string()))
        );
    }

    #[test]
    fn test_generate_random_ranges() {
        for _ in 0..100 {
            let array = generate_random();
            assert!((MIN_RANDOM_LEN..=MAX_RANDOM_LEN).contains(&array.len()));
            for v in array {
                assert!((MIN_RANDOM_VALUE..=MAX_RANDOM_VALUE).contains(&v));
            }
        }
    }

    #[test]
    fn test_join_round_trips() {
        let array = vec![5, 3, 8, 1];
        assert_eq!(parse_input(&join_array(&array)).unwrap(), array);
    }
}
