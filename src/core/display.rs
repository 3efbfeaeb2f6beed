use crate::domain::model::{DisplayModel, PredictionResult};
use crate::utils::error::{HayyaError, Result};
use chrono::NaiveDate;

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_wire_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT).map_err(|e| HayyaError::MalformedResponse {
        message: format!("field '{}' is not a calendar date ('{}'): {}", field, value, e),
    })
}

/// `2025-11-28` -> `November 28, 2025`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `2025-11-25` -> `Nov 25`
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Half-up rounding, matching how the confidence phrase has always been shown.
fn round_days(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn intro_text(predicted: NaiveDate, std_dev: f64) -> String {
    format!(
        "You might expect your next period around {} (±{} days). 💖",
        format_date_long(predicted),
        round_days(std_dev)
    )
}

pub fn format_result_for_display(result: &PredictionResult) -> Result<DisplayModel> {
    let predicted = parse_wire_date("predicted_date", &result.predicted_date)?;
    let ci_lower = parse_wire_date("ci_lower", &result.ci_lower)?;
    let ci_upper = parse_wire_date("ci_upper", &result.ci_upper)?;
    let fertile_start = parse_wire_date("fertile_window_start", &result.fertile_window_start)?;
    let fertile_end = parse_wire_date("fertile_window_end", &result.fertile_window_end)?;

    Ok(DisplayModel {
        intro: intro_text(predicted, result.std_dev),
        predicted_date: format_date_long(predicted),
        mean_cycle: format!("{} days", result.mean_cycle),
        std_dev: format!("±{} days", result.std_dev),
        confidence_range: format!(
            "{} - {}",
            format_date_short(ci_lower),
            format_date_short(ci_upper)
        ),
        fertile_window: format!(
            "{} - {}",
            format_date_short(fertile_start),
            format_date_short(fertile_end)
        ),
        note: result.note.clone().filter(|note| !note.is_empty()),
    })
}
