use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Producto no encontrado")]
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Params,
    Body,
}

/// One violated rule, shaped the way API clients already consume it:
/// `{type, value, msg, path, location}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: FieldLocation,
}

impl FieldError {
    pub fn new(
        path: impl Into<String>,
        location: FieldLocation,
        value: Option<Value>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            kind: "field".to_string(),
            value,
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }

    /// Flattens derive-level violations into entries, echoing the submitted
    /// value for each offending field from `source`.
    pub fn from_validation(
        errors: &ValidationErrors,
        location: FieldLocation,
        source: &Value,
    ) -> Vec<Self> {
        let mut entries: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, violations)| {
                violations.iter().map(move |violation| {
                    let msg = violation
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"));
                    Self::new(field.to_string(), location, source.get(&*field).cloned(), msg)
                })
            })
            .collect();

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(max = 3, message = "demasiado largo"))]
        name: String,
    }

    #[test]
    fn serializes_with_type_tag_and_skips_missing_value() {
        let entry = FieldError::new("price", FieldLocation::Body, None, "Precio no valido");
        let encoded = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            encoded,
            json!({
                "type": "field",
                "msg": "Precio no valido",
                "path": "price",
                "location": "body"
            })
        );
    }

    #[test]
    fn keeps_submitted_value_when_present() {
        let entry = FieldError::new("id", FieldLocation::Params, Some(json!("abc")), "Id no valido");
        let encoded = serde_json::to_value(&entry).unwrap();

        assert_eq!(encoded["value"], json!("abc"));
        assert_eq!(encoded["location"], json!("params"));
    }

    #[test]
    fn flattens_validator_errors() {
        let input = Named {
            name: "Monitor".into(),
        };
        let errors = input.validate().unwrap_err();
        let body = json!({ "name": "Monitor" });

        let entries = FieldError::from_validation(&errors, FieldLocation::Body, &body);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "name");
        assert_eq!(entries[0].msg, "demasiado largo");
        assert_eq!(entries[0].value, Some(json!("Monitor")));
    }
}
