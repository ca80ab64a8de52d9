use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Signed decimal number; the fractional part is mandatory.
pub const COORD_PATTERN: &str = r"-?\d+\.\d+";

static COORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COORD_PATTERN).expect("coordinate pattern is valid"));

#[derive(Debug, Error, Clone, PartialEq)]
#[error("'{token}' is not a valid number")]
pub struct InvalidNumber {
    pub token: String,
}

/// Pull every decimal number out of `text`, left to right.
///
/// The numbers are returned as found; deciding what they mean is up to the
/// caller. One unparseable match fails the whole extraction.
pub fn extract(text: &str) -> Result<Vec<f64>, InvalidNumber> {
    COORD_RE
        .find_iter(text)
        .map(|m| {
            m.as_str().parse::<f64>().map_err(|_| InvalidNumber {
                token: m.as_str().to_string(),
            })
        })
        .collect()
}
