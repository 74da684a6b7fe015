use chrono::{NaiveDate, Utc};
use validator::ValidationError;

const SPECIAL_CHARACTERS: &[char] = &[
    '!', '@', '$', '%', '^', '&', '*', '(', ')', '[', ']', '{', '}',
];

/// Today (UTC) or later.
pub fn validate_future_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value < Utc::now().date_naive() {
        let mut err = ValidationError::new("past_date");
        err.message = Some("Deadline cannot be in the past".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_no_special_characters(value: &str) -> Result<(), ValidationError> {
    if value.contains(SPECIAL_CHARACTERS) {
        let mut err = ValidationError::new("special_characters");
        err.message = Some("Name cannot contain special characters".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("This field is required.".into());
        return Err(err);
    }
    Ok(())
}

/// Entity names: required and free of special characters.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    validate_no_special_characters(value)
}

#[cfg(test)]
mod tests {
    use chrono::{Days, Utc};

    use super::*;

    #[test]
    fn future_date_accepts_today_and_later() {
        let today = Utc::now().date_naive();
        assert!(validate_future_date(&today).is_ok());
        assert!(validate_future_date(&today.checked_add_days(Days::new(30)).unwrap()).is_ok());
    }

    #[test]
    fn future_date_rejects_the_past() {
        let yesterday = Utc::now()
            .date_naive()
            .checked_sub_days(Days::new(1))
            .unwrap();
        let err = validate_future_date(&yesterday).unwrap_err();
        assert_eq!(err.message.unwrap(), "Deadline cannot be in the past");
    }

    #[test]
    fn special_characters_are_rejected() {
        for name in ["Team!", "a@b", "50%", "x{y}", "(draft)", "[wip]", "r&d", "a*", "^up", "$$"] {
            assert!(validate_no_special_characters(name).is_err(), "{name}");
        }
    }

    #[test]
    fn plain_and_empty_names_pass() {
        assert!(validate_no_special_characters("").is_ok());
        assert!(validate_no_special_characters("Backend Team #2 - Kyiv").is_ok());
    }

    #[test]
    fn names_combine_both_rules() {
        assert_eq!(validate_name("").unwrap_err().code, "required");
        assert_eq!(validate_name("Ops!").unwrap_err().code, "special_characters");
        assert!(validate_name("Ops").is_ok());
    }

    #[test]
    fn blank_is_required() {
        assert!(validate_required("  ").is_err());
        assert!(validate_required("Ops").is_ok());
    }
}
