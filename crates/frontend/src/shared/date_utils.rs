/// Date formatting for timestamps coming from the API.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an API timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 (`2024-03-15T14:02:26.123Z`, `...+03:00`), naive
/// datetimes and bare dates; anything else is returned unchanged.
pub fn format_datetime(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    value.to_string()
}

/// `format_datetime` for optional values, `-` when absent.
pub fn format_datetime_opt(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59+03:00"), "2024-12-31 23:59");
        assert_eq!(format_datetime("2024-12-31T23:59:59"), "2024-12-31 23:59");
        assert_eq!(format_datetime("2024-03-15"), "2024-03-15");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_datetime_opt(None), "-");
        assert_eq!(format_datetime_opt(Some("")), "-");
    }
}
