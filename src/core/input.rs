use crate::domain::model::ValidatedRequest;
use crate::utils::error::{HayyaError, Result};
use crate::utils::validation::is_date_shaped;

pub const DEFAULT_LOOKBACK: i64 = 6;

/// Five roughly monthly starts, handy for trying the predictor out.
pub const SAMPLE_DATES: &str = "2025-07-01\n2025-07-29\n2025-08-27\n2025-09-25\n2025-10-23";

/// Turns the raw form fields into a request payload.
///
/// Dates may be separated by any mix of newlines and commas. Validation is
/// all-or-nothing: one malformed entry rejects the whole submission, and the
/// error lists every malformed entry in input order.
pub fn parse_input(raw_dates: &str, raw_lookback: &str) -> Result<ValidatedRequest> {
    let past_starts = split_dates(raw_dates);

    if past_starts.is_empty() {
        return Err(HayyaError::EmptyInput);
    }

    let invalid: Vec<String> = past_starts
        .iter()
        .filter(|entry| !is_date_shaped(entry))
        .cloned()
        .collect();

    if !invalid.is_empty() {
        tracing::debug!("Rejected {} malformed date entries", invalid.len());
        return Err(HayyaError::InvalidDateFormat { entries: invalid });
    }

    Ok(ValidatedRequest {
        past_starts,
        lookback: parse_lookback(raw_lookback),
    })
}

fn split_dates(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Leading-integer parse: `"8 cycles"` is 8, `"3.9"` is 3.
/// Unparsable input and zero fall back to [`DEFAULT_LOOKBACK`]; negatives are kept.
pub fn parse_lookback(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => DEFAULT_LOOKBACK,
        Ok(value) => sign * value,
    }
}
