use anyhow::Context as _;
use thiserror::Error;

/// Per-record failure while turning a raw game into a `ParsedGame`.
///
/// Both variants are recoverable: the batch caller records a skip and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Malformed game record: {0}")]
    MalformedGame(String),

    #[error("Player {0} did not play in this game")]
    UnknownPlayer(String),
}

impl ParseError {
    pub fn missing(field: &str) -> Self {
        ParseError::MalformedGame(format!("missing field `{}`", field))
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}

/// Wrap result with fetch context
pub fn with_fetch_context<T, E>(result: Result<T, E>, url: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(fetch_context(url))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = ParseError::missing("pgn");
        assert_eq!(err.to_string(), "Malformed game record: missing field `pgn`");
    }

    #[test]
    fn test_with_parse_context_wraps_error() {
        let result: Result<i32, std::num::ParseIntError> = "abc".parse::<i32>();
        let err = with_parse_context(result, "rating").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse rating");
    }
}
