//! Parsing of the space-separated integer argument string.

use wrun_error::{kinds, Result};

/// Parse a string of whitespace-separated base-10 integers.
///
/// Tokens that are not integers are rejected with a parameter error naming
/// the token and its zero-based position. A blank string yields no
/// arguments.
pub fn parse_int_args(input: &str) -> Result<Vec<i64>> {
    input
        .split_ascii_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token
                .parse::<i64>()
                .map_err(|_| kinds::invalid_argument(position, token))
        })
        .collect()
}
