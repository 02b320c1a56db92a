//! Label formatting for histogram bins and summary values.
//!
//! These functions produce the strings stored in labeled and compare
//! histograms, so single-dataset and compare output label bins identically.
//!
//! # Examples
//!
//! ```rust
//! use tabscope::formatters::{format_bytes, format_numeric_bin_label};
//!
//! assert_eq!(format_numeric_bin_label(1.0, 4.0, true), "1 - 4");
//! assert_eq!(format_numeric_bin_label(0.5, 0.5, false), "0.5000");
//! assert_eq!(format_bytes(1536), "1.5K");
//! ```

use chrono::{Days, NaiveDate, NaiveTime};

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Formats a float with five significant leading digits worth of decimals:
/// `max(0, 5 - integer_digits)` places.
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let abs_value = value.abs();
    let integer_digits = if abs_value >= 1.0 {
        format!("{}", abs_value.trunc()).len()
    } else {
        1
    };
    let decimals = 5usize.saturating_sub(integer_digits);
    let formatted = format!("{abs_value:.decimals$}");
    if value < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Whole numbers print without decimals on integer columns; everything else
/// goes through [`format_float`].
pub fn format_number_label(value: f64, is_integer: bool) -> String {
    if is_integer && value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format_float(value)
    }
}

/// `"a"` when both ends format the same, otherwise `"a - b"`.
pub fn format_numeric_bin_label(lower: f64, upper: f64, is_integer: bool) -> String {
    join_range(
        format_number_label(lower, is_integer),
        format_number_label(upper, is_integer),
    )
}

/// Human-readable byte size: `"512 B"`, `"2M"`, `"1.5K"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(&str, u64); 3] = [("G", 1 << 30), ("M", 1 << 20), ("K", 1 << 10)];
    for (suffix, size) in UNITS {
        if bytes >= size {
            if bytes % size == 0 {
                return format!("{}{suffix}", bytes / size);
            }
            return format!("{:.1}{suffix}", bytes as f64 / size as f64);
        }
    }
    format!("{bytes} B")
}

/// Calendar date for a day offset from 1970-01-01, rounded to the nearest day.
pub fn format_date_label(days: f64) -> String {
    let offset = days.round() as i64;
    // NaiveDate's default is the Unix epoch
    let epoch = NaiveDate::default();
    let date = if offset >= 0 {
        epoch.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        epoch.checked_sub_days(Days::new(offset.unsigned_abs()))
    };
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => format_float(days),
    }
}

/// Clock time for seconds since midnight; microseconds only when non-zero.
pub fn format_time_label(seconds: f64) -> String {
    if !seconds.is_finite() {
        return format_float(seconds);
    }
    let micros = ((seconds * 1e6).round() as i64).rem_euclid(MICROS_PER_DAY);
    let whole_seconds = (micros / 1_000_000) as u32;
    let fraction = (micros % 1_000_000) as u32;
    match NaiveTime::from_num_seconds_from_midnight_opt(whole_seconds, fraction * 1_000) {
        Some(time) if fraction != 0 => time.format("%H:%M:%S%.6f").to_string(),
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => format_float(seconds),
    }
}

/// Label of a datetime bin in either encoding.
pub fn format_datetime_bin(lower: f64, upper: f64, is_time: bool) -> String {
    let label = if is_time {
        format_time_label
    } else {
        format_date_label
    };
    join_range(label(lower), label(upper))
}

fn join_range(lower: String, upper: String) -> String {
    if lower == upper {
        lower
    } else {
        format!("{lower} - {upper}")
    }
}
