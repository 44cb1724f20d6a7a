use chrono::NaiveDateTime;

use crate::processing::dates::parse_canonical;

pub struct ExpiryValidator;

impl ExpiryValidator {
    /// Whether a canonical expiry date lies strictly after `now`.
    ///
    /// The date is taken at midnight, so a document expiring today is already
    /// expired once the day has started. A value that does not parse is
    /// treated as expired.
    pub fn validate(date_of_expiry: &str, now: NaiveDateTime) -> Result<(), String> {
        let date = parse_canonical(date_of_expiry)
            .ok_or_else(|| format!("Invalid expiry date format: {}", date_of_expiry))?;

        match date.and_hms_opt(0, 0, 0) {
            Some(expiry) if expiry > now => Ok(()),
            _ => Err(format!("Document expired on {}", date_of_expiry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_future_expiry() {
        assert!(ExpiryValidator::validate("2099-01-01", at(2024, 6, 1, 12)).is_ok());
    }

    #[test]
    fn test_past_expiry() {
        assert!(ExpiryValidator::validate("2000-01-01", at(2024, 6, 1, 12)).is_err());
    }

    #[test]
    fn test_expiring_today() {
        assert!(ExpiryValidator::validate("2024-06-01", at(2024, 6, 1, 12)).is_err());
        assert!(ExpiryValidator::validate("2024-06-02", at(2024, 6, 1, 23)).is_ok());
    }

    #[test]
    fn test_unparseable_expiry() {
        let err = ExpiryValidator::validate("01/01/2099", at(2024, 6, 1, 12)).unwrap_err();
        assert!(err.contains("Invalid expiry date format"));
    }
}
