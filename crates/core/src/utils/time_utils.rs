use chrono::{DateTime, Utc};

/// Short month label used on the growth chart axis (`Oct`).
pub fn short_month_label(instant: DateTime<Utc>) -> String {
    instant.format("%b").to_string()
}

/// Month and year label used for entry headers (`October 2025`).
pub fn month_year_label(instant: DateTime<Utc>) -> String {
    instant.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_labels() {
        let instant = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        assert_eq!(short_month_label(instant), "Oct");
        assert_eq!(month_year_label(instant), "October 2025");
    }
}
