use crate::errors::{
    error::{ErrorResponse, FieldError, ValidationErrorResponse},
    repository::RepositoryError,
    service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const NOT_FOUND_MESSAGE: &str = "Producto no encontrado";
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

#[derive(Debug)]
pub enum HttpError {
    Validation(Vec<FieldError>),
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::Validation(errors),
            ServiceError::NotFound(msg) => HttpError::NotFound(msg),
            ServiceError::Repo(RepositoryError::NotFound) => {
                HttpError::NotFound(NOT_FOUND_MESSAGE.to_string())
            }
            // store faults never leak driver details to the client
            ServiceError::Repo(_) | ServiceError::Internal(_) => {
                HttpError::Internal(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::Validation(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response();
            }
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: msg })).into_response()
    }
}
