use axum::{
    extract::{Request, State},
    http::{HeaderValue, header::ORIGIN},
    middleware::Next,
    response::Response,
};
use shared::errors::HttpError;
use tracing::warn;

pub const CORS_ERROR_MESSAGE: &str = "Error de Cors";

/// Rejects any request whose `Origin` differs from the configured front end.
/// Requests without an `Origin` header pass through untouched.
pub async fn origin_guard(
    State(allowed_origin): State<HeaderValue>,
    req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    if let Some(origin) = req
        .headers()
        .get(ORIGIN)
        .filter(|origin| **origin != allowed_origin)
    {
        warn!("Blocked request from origin {:?}", origin);
        return Err(HttpError::Forbidden(CORS_ERROR_MESSAGE.to_string()));
    }

    Ok(next.run(req).await)
}
