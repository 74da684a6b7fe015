use validator::ValidationErrors;

/// Failures surfaced to API clients.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Submitted form is invalid")]
    Validation(ValidationErrors),
    #[error("{0}")]
    InternalServerError(String),
}

impl Error {
    pub fn internal<T: ToString>(err: T) -> Self {
        Self::InternalServerError(err.to_string())
    }

    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[test]
    fn validation_errors_keep_their_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("required"));

        let err = Error::from(errors);

        assert_eq!(err.to_string(), "Submitted form is invalid");
        assert!(err.field_errors().unwrap().errors().contains_key("name"));
    }

    #[test]
    fn internal_wraps_any_display() {
        let err = Error::internal("pool timed out");
        assert!(matches!(err, Error::InternalServerError(ref msg) if msg == "pool timed out"));
        assert!(err.field_errors().is_none());
    }
}
