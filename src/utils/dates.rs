use chrono::{DateTime, NaiveDate, Utc};

/// Parse une date envoyée par le front : RFC 3339 ("2025-01-31T08:00:00Z")
/// ou date seule ("2025-01-31", minuit UTC)
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-31"),
            Some(Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_date("2025-01-31T10:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2025, 1, 31, 8, 30, 0).unwrap())
        );
        assert_eq!(parse_date("31/01/2025"), None);
        assert_eq!(parse_date(""), None);
    }
}
