use crate::utils::error::{OfferLetterError, Result};
use chrono::{Local, NaiveDate, SecondsFormat, Utc};

/// Letters print dates as DD/MM/YYYY.
pub const LETTER_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn format_letter_date(date: NaiveDate) -> String {
    date.format(LETTER_DATE_FORMAT).to_string()
}

/// Accepts `today`, `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_issue_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, LETTER_DATE_FORMAT))
        .map_err(|e| OfferLetterError::InvalidValue {
            field: "issue_date".to_string(),
            value: input.to_string(),
            reason: format!("Expected YYYY-MM-DD, DD/MM/YYYY or 'today' ({})", e),
        })
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn generated_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
