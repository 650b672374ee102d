//! Pure field validators shared by record creation and update paths.
//!
//! These hold no state and touch no storage; a failure aborts the write
//! before anything is persisted.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Fails when a monetary or decimal value is negative.
pub fn check_non_negative(value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(validation_error("non_negative", "value must not be negative"));
    }
    Ok(())
}

/// Fails when an integer count (page volume) is negative.
pub fn check_non_negative_int(value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(validation_error("non_negative", "value must not be negative"));
    }
    Ok(())
}

/// Fails when a timestamp lies in the future.
pub fn check_not_future(ts: DateTime<Utc>) -> Result<(), ValidationError> {
    if ts > Utc::now() {
        return Err(validation_error(
            "not_future",
            "timestamp must not be in the future",
        ));
    }
    Ok(())
}

/// Fails when a publication year exceeds the current calendar year.
pub fn check_year_not_future(year: i32) -> Result<(), ValidationError> {
    if year > Utc::now().year() {
        return Err(validation_error(
            "year_not_future",
            "year must not exceed the current year",
        ));
    }
    Ok(())
}

/// Fails when a value is outside a fixed enumeration.
pub fn check_known_type(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        return Err(validation_error("known_type", "value is not a known type"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    #[test]
    fn test_non_negative() {
        assert!(check_non_negative(Decimal::ZERO).is_ok());
        assert!(check_non_negative(Decimal::new(100, 2)).is_ok());
        assert!(check_non_negative(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_non_negative_int() {
        assert!(check_non_negative_int(0).is_ok());
        assert!(check_non_negative_int(500).is_ok());
        assert!(check_non_negative_int(-1).is_err());
    }

    #[test]
    fn test_not_future() {
        assert!(check_not_future(Utc::now() - Duration::seconds(5)).is_ok());
        assert!(check_not_future(Utc::now() + Duration::hours(1)).is_err());
    }

    #[test]
    fn test_year_not_future() {
        let this_year = Utc::now().year();
        assert!(check_year_not_future(this_year).is_ok());
        assert!(check_year_not_future(1984).is_ok());
        assert!(check_year_not_future(this_year + 1).is_err());
    }

    #[test]
    fn test_known_type() {
        let allowed = ["book", "magazine"];
        assert!(check_known_type("book", &allowed).is_ok());
        assert!(check_known_type("magazine", &allowed).is_ok());
        assert!(check_known_type("vinyl", &allowed).is_err());
        assert!(check_known_type("", &allowed).is_err());
    }
}
