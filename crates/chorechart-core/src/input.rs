//! Parsing of raw form and command-line input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{CoreError, CoreResult};

/// Trimmed text, or `None` when blank.
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trimmed text that must be present.
pub fn required(field: &str, raw: &str) -> CoreResult<String> {
    non_blank(raw).ok_or_else(|| CoreError::validation(format!("{} is required", field)))
}

/// A whole number, e.g. a point value or an id.
pub fn integer(field: &str, raw: &str) -> CoreResult<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{} is required", field)));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| CoreError::validation(format!("{} must be a whole number, got '{}'", field, trimmed)))
}

/// A completion time.
///
/// Accepts a bare date (`2024-03-05`, midnight UTC), an HTML `datetime-local`
/// value (`2024-03-05T18:30`, read as UTC) or a full RFC 3339 timestamp.
pub fn completed_at(raw: &str) -> CoreResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("completed at is required"));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(CoreError::validation(format!(
        "completed at must be a date like 2024-03-05, got '{}'",
        trimmed
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  mop  "), Some("mop".to_string()));
        assert_eq!(non_blank("   "), None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer("value", " 12 ").unwrap(), 12);
        assert!(matches!(integer("value", ""), Err(CoreError::Validation(_))));
        assert!(matches!(integer("value", "ten"), Err(CoreError::Validation(_))));
        assert!(matches!(integer("value", "2.5"), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_completed_at_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 5, 18, 30, 0).unwrap();

        assert_eq!(completed_at("2024-03-05").unwrap(), midnight);
        assert_eq!(completed_at("2024-03-05T18:30").unwrap(), evening);
        assert_eq!(completed_at("2024-03-05T18:30:00Z").unwrap(), evening);
        assert_eq!(completed_at("2024-03-05T19:30:00+01:00").unwrap(), evening);
    }

    #[test]
    fn test_completed_at_rejects_garbage() {
        assert!(matches!(completed_at("last tuesday"), Err(CoreError::Validation(_))));
        assert!(matches!(completed_at(""), Err(CoreError::Validation(_))));
    }
}
