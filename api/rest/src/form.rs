use std::borrow::Cow;

use sd_error::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod position;
pub mod project;
pub mod project_type;
pub mod team;
pub mod worker;

pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn required() -> ValidationError {
    field_error("required", "This field is required.")
}

pub fn invalid_choice(id: &Uuid) -> ValidationError {
    field_error(
        "invalid_choice",
        format!("Select a valid choice. {id} is not one of the available choices."),
    )
}

/// Field errors from the derived rules, to be extended with lookups against the database.
pub fn derived_errors<T: Validate>(data: &T) -> ValidationErrors {
    match data.validate() {
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    }
}

pub fn finish(errors: ValidationErrors) -> Result<(), Error> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}
