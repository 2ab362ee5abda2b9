//! Minute-of-day clock arithmetic and the "H:MM" display form.

use crate::error::{SimError, SimResult};
use crate::types::Minute;

pub const MINUTES_PER_DAY: Minute = 24 * 60;

/// Format a minute counter as "H:MM", wrapping past midnight.
/// Hours carry no leading zero; minutes are always two digits.
pub fn display(minutes: Minute) -> String {
    let m = minutes % MINUTES_PER_DAY;
    format!("{}:{:02}", m / 60, m % 60)
}

/// Checked variant of [`display`] for externally supplied counts,
/// which may be negative.
pub fn format_time(minutes: i64) -> SimResult<String> {
    if minutes < 0 {
        return Err(SimError::NegativeMinutes(minutes));
    }
    Ok(display((minutes % i64::from(MINUTES_PER_DAY)) as Minute))
}

/// Parse "HH:MM" (surrounding whitespace tolerated) into minutes since
/// midnight. Hours must lie in 0..=23 and minutes in 0..=59.
pub fn parse_time(text: &str) -> SimResult<Minute> {
    let fail = |reason: &str| SimError::TimeFormat {
        input: text.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = text.trim().split(':');
    let (hour_part, minute_part) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => (h, m),
        _ => return Err(fail("expected exactly one ':' separator")),
    };

    let hour: u32 = hour_part
        .parse()
        .map_err(|_| fail("hours are not an integer"))?;
    let minute: u32 = minute_part
        .parse()
        .map_err(|_| fail("minutes are not an integer"))?;

    if hour > 23 {
        return Err(fail("hours out of range 0..=23"));
    }
    if minute > 59 {
        return Err(fail("minutes out of range 0..=59"));
    }
    Ok(hour * 60 + minute)
}
