use actix_web::{
    http::{header, StatusCode},
    HttpResponse, HttpResponseBuilder,
};
use ahash::{HashMap, HashMapExt};
use sd_error::Error;
use serde::Serialize;
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

pub mod index;
pub mod position;
pub mod project;
pub mod project_type;
pub mod team;
pub mod worker;

#[derive(Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Response {
    pub fn data<T: Serialize>(status_code: &StatusCode, data: T) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(data) => HttpResponseBuilder::new(*status_code).json(Self {
                error: None,
                data: Some(data),
            }),
            Err(err) => Self::error(&Error::internal(err)),
        }
    }

    /// `303 See Other` pointing at `location`.
    pub fn redirect<T: Serialize>(location: &str, data: T) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(data) => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .json(Self {
                    error: None,
                    data: Some(data),
                }),
            Err(err) => Self::error(&Error::internal(err)),
        }
    }

    pub fn error(err: &Error) -> HttpResponse {
        let status_code = match err {
            Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::build_error(
            &status_code,
            &err.to_string(),
            err.field_errors().map(field_messages),
        )
    }

    pub fn error_raw(status_code: &StatusCode, message: &str) -> HttpResponse {
        Self::build_error(status_code, message, None)
    }

    fn build_error(
        status_code: &StatusCode,
        message: &str,
        fields: Option<HashMap<String, Vec<String>>>,
    ) -> HttpResponse {
        if status_code.is_server_error() {
            sd_log::error(None, message);
        } else {
            sd_log::debug(None, message);
        }

        HttpResponseBuilder::new(*status_code).json(Self {
            error: Some(ErrorRes {
                status: match status_code.canonical_reason() {
                    Some(status_code) => status_code.to_owned(),
                    None => "Unknown".to_owned(),
                },
                message: message.to_owned(),
                fields,
            }),
            data: None,
        })
    }
}

#[derive(Serialize)]
pub struct ErrorRes {
    status: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<HashMap<String, Vec<String>>>,
}

/// Body of a create/update redirect.
#[derive(Serialize)]
pub struct IdResJson {
    id: Uuid,
}

impl IdResJson {
    pub fn new(id: &Uuid) -> Self {
        Self { id: *id }
    }
}

fn field_messages(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    let mut fields = HashMap::with_capacity(errors.errors().len());
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(errors) = kind {
            let messages = errors
                .iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => err.code.to_string(),
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
    }
    fields
}
