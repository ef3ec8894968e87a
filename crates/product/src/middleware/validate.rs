use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use shared::errors::{FieldError, FieldLocation, HttpError, INTERNAL_ERROR_MESSAGE};
use std::collections::HashMap;
use tracing::error;
use validator::Validate;

pub const INVALID_JSON_MESSAGE: &str = "El cuerpo de la solicitud no es JSON valido";

/// Raw request material the rule tables are evaluated against.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: Map<String, Value>,
}

impl RequestInput {
    fn lookup(&self, location: FieldLocation, field: &str) -> Option<Value> {
        match location {
            FieldLocation::Params => self.params.get(field).cloned().map(Value::String),
            FieldLocation::Body => self.body.get(field).cloned(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub predicate: fn(Option<&Value>) -> bool,
    pub message: &'static str,
}

#[derive(Clone)]
pub struct FieldCheck {
    pub field: &'static str,
    pub location: FieldLocation,
    pub rules: Vec<Rule>,
}

impl FieldCheck {
    pub fn new(field: &'static str, location: FieldLocation) -> Self {
        Self {
            field,
            location,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, predicate: fn(Option<&Value>) -> bool, message: &'static str) -> Self {
        self.rules.push(Rule { predicate, message });
        self
    }
}

/// A typed request guarded by an ordered rule table.
pub trait RuleSet: Sized {
    fn checks() -> Vec<FieldCheck>;

    /// Builds the typed request once every check has passed.
    fn from_input(input: &RequestInput) -> Option<Self>;
}

/// Runs every rule of every check, keeping table order and rule order.
pub fn evaluate(checks: &[FieldCheck], input: &RequestInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for check in checks {
        let value = input.lookup(check.location, check.field);

        for rule in &check.rules {
            if !(rule.predicate)(value.as_ref()) {
                errors.push(FieldError::new(
                    check.field,
                    check.location,
                    value.clone(),
                    rule.message,
                ));
            }
        }
    }

    errors
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, HttpError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(_) => Err(HttpError::BadRequest(INVALID_JSON_MESSAGE.to_string())),
    }
}

/// Extractor that evaluates `T`'s rule table against the path parameters and
/// JSON body, then the `validator` constraints on the typed value. Rejections
/// carry every violation found.
pub struct ValidatedRequest<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedRequest<T>
where
    T: RuleSet + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = RawPathParams::from_request_parts(&mut parts, state)
            .await
            .map(|raw| {
                raw.iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let checks = T::checks();
        let reads_body = checks
            .iter()
            .any(|check| check.location == FieldLocation::Body);

        let body = if reads_body && is_json_content(&parts.headers) {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(IntoResponse::into_response)?;
            parse_body(&bytes).map_err(IntoResponse::into_response)?
        } else {
            Map::new()
        };

        let input = RequestInput { params, body };

        let errors = evaluate(&checks, &input);
        if !errors.is_empty() {
            return Err(HttpError::Validation(errors).into_response());
        }

        let value = T::from_input(&input).ok_or_else(|| {
            error!("Validated input could not be converted into a typed request");
            HttpError::Internal(INTERNAL_ERROR_MESSAGE.to_string()).into_response()
        })?;

        value.validate().map_err(|violations| {
            let source = Value::Object(input.body.clone());
            HttpError::Validation(FieldError::from_validation(
                &violations,
                FieldLocation::Body,
                &source,
            ))
            .into_response()
        })?;

        Ok(Self(value))
    }
}
