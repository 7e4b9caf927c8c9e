//! Time parsing and formatting utilities

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::errors::TimestampError;

/// `[hours:]minutes:seconds`, minutes and seconds one or two digits
fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(\d+):)?(\d{1,2}):(\d{1,2})$").expect("timestamp pattern is valid")
    })
}

/// Parse user input such as `1:15:00`, `02:00` or `9:5` into whole seconds
pub fn parse_seconds(text: &str) -> Result<u64, TimestampError> {
    let trimmed = text.trim();
    let invalid = || TimestampError::InvalidFormat(trimmed.to_string());

    let caps = timestamp_pattern().captures(trimmed).ok_or_else(invalid)?;

    let component = |index: usize| -> Result<u64, TimestampError> {
        match caps.get(index) {
            Some(m) => m.as_str().parse::<u64>().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    if seconds >= 60 {
        return Err(TimestampError::SecondsOutOfRange(seconds));
    }
    if minutes >= 60 {
        return Err(TimestampError::MinutesOutOfRange(minutes));
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)
}

/// Format whole seconds as `hh:mm:ss`; hours grow past two digits as needed
pub fn format_timestamp(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
