//! Number and date formatting for axes and tooltips

use chrono::DateTime;
use num_format::{Locale, ToFormattedString};

/// Format a y-axis tick with a T/G/M/k suffix.
///
/// Each tick is scaled on its own, so neighbouring ticks may use different
/// suffixes.
pub fn format_tick(value: f64) -> String {
    if value >= 1e12 {
        format!("{}T", value / 1e12)
    } else if value >= 1e9 {
        format!("{}G", value / 1e9)
    } else if value >= 1e6 {
        format!("{}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{}k", value / 1e3)
    } else {
        format!("{}", value)
    }
}

/// Format a sample for display: digit grouping, at most three decimals
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let grouped = int_part
        .parse::<u128>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Format a commit timestamp (seconds since the epoch) as `M/D/YY h:mm:ss AM`
pub fn format_timestamp(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.format("%-m/%-d/%y %-I:%M:%S %p").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

/// First ten characters of a commit id
pub fn short_commit(id: &str) -> &str {
    match id.char_indices().nth(10) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(1500.0), "1.5k");
        assert_eq!(format_tick(2_500_000.0), "2.5M");
        assert_eq!(format_tick(999.0), "999");
        assert_eq!(format_tick(3e9), "3G");
        assert_eq!(format_tick(1.25e12), "1.25T");
        assert_eq!(format_tick(0.5), "0.5");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(12.3456), "12.346");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-1500.25), "-1,500.25");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_format_number_groups_large_values() {
        assert_eq!(format_number(12_345_678_901_234.5), "12,345,678,901,234.5");
        assert_eq!(format_number(999.9999), "1,000");
        assert_eq!(format_number(1e20), "100,000,000,000,000,000,000");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1/1/70 12:00:00 AM");
        // 2021-03-04 15:05:09 UTC
        assert_eq!(format_timestamp(1_614_870_309), "3/4/21 3:05:09 PM");
    }

    #[test]
    fn test_short_commit() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456789");
        assert_eq!(short_commit("abc"), "abc");
    }
}
