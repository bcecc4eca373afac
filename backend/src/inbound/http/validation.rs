//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors are turned into `invalid_request` envelopes with
//! `details.field` and `details.code` so clients can highlight the offending
//! input.

use serde_json::json;

use crate::domain::{
    EmailAddress, Error, LoginValidationError, RegistrationValidationError,
    StudentValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidValue,
    InvalidEmail,
    EmptyPassword,
    DuplicateSemester,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::DuplicateSemester => "duplicate_semester",
        }
    }
}

pub(crate) fn field_error(
    field: &str,
    code: ValidationCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn map_registration_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::MissingField { field } => field_error(
            field,
            ValidationCode::MissingField,
            format!("missing required field: {field}"),
        ),
        RegistrationValidationError::InvalidField { field, source } => {
            let code = match source {
                StudentValidationError::InvalidEmail => ValidationCode::InvalidEmail,
                StudentValidationError::DuplicateSemester { .. } => {
                    ValidationCode::DuplicateSemester
                }
                _ => ValidationCode::InvalidValue,
            };
            field_error(field, code, source.to_string())
        }
    }
}

pub(crate) fn map_login_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => {
            field_error("email", ValidationCode::InvalidEmail, err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", ValidationCode::EmptyPassword, err.to_string())
        }
    }
}

/// Parse an email taken from a path segment.
pub(crate) fn parse_email(raw: &str) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw)
        .map_err(|err| field_error("email", ValidationCode::InvalidEmail, err.to_string()))
}
