use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use itertools::Itertools;
use validator::ValidationErrors;

use crate::store::StoreError;

/// A common error type that can be used throughout the API.
///
/// Can be returned in a `Result` from an API handler function.
///
/// For convenience, this represents both API errors as well as internal recoverable errors,
/// and maps them to appropriate status codes along with a `{success: false, error}` body.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Return `400 Bad Request` with the message as the envelope's `error`.
    #[error("{0}")]
    Validation(String),

    /// Return `404 Not Found`
    #[error("User not found")]
    NotFound,

    /// Return `500 Internal Server Error` on a store failure.
    ///
    /// The underlying error is logged, the client only sees a generic message.
    #[error("an error occurred with the database")]
    Store(#[from] StoreError),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client; internal failures never leak their details.
    fn public_message(&self) -> String {
        match self {
            Self::Validation(_) | Self::NotFound => self.to_string(),
            Self::Store(_) => "Internal server error".to_owned(),
        }
    }
}

/// Axum allows you to return `Result` from handler functions, but the error type
/// also must be some sort of response type.
///
/// Client errors use the generated `Display` impl as the message, internal ones are
/// logged and replaced with a generic message.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if let Self::Store(e) = &self {
            log::error!("store error: {e:?}");
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.public_message(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        // Field errors live in a HashMap, so pick a stable one to report.
        let message = errors
            .field_errors()
            .into_iter()
            .sorted_by_key(|(field, _)| *field)
            .find_map(|(field, errs)| {
                errs.first().map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .unwrap_or_else(|| "Invalid user data".to_owned());

        Self::Validation(message)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::user::NewUser;
    use validator::Validate;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            Error::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::Store(StoreError::Unavailable("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_are_sanitized() {
        let error = Error::Store(StoreError::Unavailable("10.0.0.3:5432 refused".into()));
        assert_eq!(error.public_message(), "Internal server error");
    }

    #[test]
    fn validation_reports_first_field_alphabetically() {
        let errors = NewUser {
            email: "bad".into(),
            username: "ab".into(),
            password: "123".into(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            Error::from(errors).public_message(),
            "Invalid email format"
        );
    }
}
