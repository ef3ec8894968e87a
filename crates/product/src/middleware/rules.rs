//! Rule tables for the product routes.
//!
//! Every value is judged on its text form: strings as-is, numbers and
//! booleans stringified, `null` or a missing field as the empty string.
//! Arrays and objects have no text form and fail every rule.

use crate::domain::requests::product::{
    CreateProductRequest, ProductIdParam, UpdateProductRequest,
};
use crate::middleware::validate::{FieldCheck, RequestInput, RuleSet};
use serde_json::Value;
use shared::errors::FieldLocation;

pub const INVALID_ID: &str = "Id no valido";
pub const EMPTY_NAME: &str = "El nombre del producto no puede ir vacio";
pub const NOT_NUMERIC: &str = "valor no valido";
pub const EMPTY_PRICE: &str = "El precio del producto no puede ir vacio";
pub const INVALID_PRICE: &str = "Precio no valido";
pub const INVALID_AVAILABILITY: &str = "Valor para disponibilidad no valido";

fn text_form(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_int(value: Option<&Value>) -> bool {
    let Some(text) = text_form(value) else {
        return false;
    };
    let digits = strip_sign(&text);

    !digits.is_empty() && all_digits(digits) && text.parse::<i32>().is_ok()
}

pub fn not_empty(value: Option<&Value>) -> bool {
    text_form(value).is_some_and(|text| !text.is_empty())
}

pub fn is_numeric(value: Option<&Value>) -> bool {
    let Some(text) = text_form(value) else {
        return false;
    };
    let unsigned = strip_sign(&text);

    match unsigned.split_once('.') {
        Some((int_part, fraction)) => {
            all_digits(int_part) && !fraction.is_empty() && all_digits(fraction)
        }
        None => !unsigned.is_empty() && all_digits(unsigned),
    }
}

/// Loose numeric coercion: numeric strings parse, `""` and `null` are zero,
/// booleans are 0 or 1, anything else is not a number.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

pub fn is_positive(value: Option<&Value>) -> bool {
    let number = coerce_number(value);
    number.is_finite() && number > 0.0
}

pub fn is_boolean(value: Option<&Value>) -> bool {
    text_form(value).is_some_and(|text| matches!(text.as_str(), "true" | "false" | "1" | "0"))
}

pub(crate) fn parse_id(input: &RequestInput) -> Option<i32> {
    input.params.get("id")?.parse().ok()
}

fn parse_name(input: &RequestInput) -> Option<String> {
    text_form(input.body.get("name"))
}

fn parse_price(input: &RequestInput) -> Option<f64> {
    let price = coerce_number(input.body.get("price"));
    price.is_finite().then_some(price)
}

fn parse_availability(input: &RequestInput) -> Option<bool> {
    match text_form(input.body.get("availability"))?.as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn id_check() -> FieldCheck {
    FieldCheck::new("id", FieldLocation::Params).rule(is_int, INVALID_ID)
}

fn name_check() -> FieldCheck {
    FieldCheck::new("name", FieldLocation::Body).rule(not_empty, EMPTY_NAME)
}

fn price_check() -> FieldCheck {
    FieldCheck::new("price", FieldLocation::Body)
        .rule(is_numeric, NOT_NUMERIC)
        .rule(not_empty, EMPTY_PRICE)
        .rule(is_positive, INVALID_PRICE)
}

fn availability_check() -> FieldCheck {
    FieldCheck::new("availability", FieldLocation::Body).rule(is_boolean, INVALID_AVAILABILITY)
}

impl RuleSet for ProductIdParam {
    fn checks() -> Vec<FieldCheck> {
        vec![id_check()]
    }

    fn from_input(input: &RequestInput) -> Option<Self> {
        Some(Self {
            id: parse_id(input)?,
        })
    }
}

impl RuleSet for CreateProductRequest {
    fn checks() -> Vec<FieldCheck> {
        vec![name_check(), price_check()]
    }

    fn from_input(input: &RequestInput) -> Option<Self> {
        Some(Self {
            name: parse_name(input)?,
            price: parse_price(input)?,
        })
    }
}

impl RuleSet for UpdateProductRequest {
    fn checks() -> Vec<FieldCheck> {
        vec![id_check(), name_check(), price_check(), availability_check()]
    }

    fn from_input(input: &RequestInput) -> Option<Self> {
        Some(Self {
            id: parse_id(input)?,
            name: parse_name(input)?,
            price: parse_price(input)?,
            availability: parse_availability(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_accept_padding_and_reject_overflow() {
        let int = |v: Value| is_int(Some(&v));

        assert!(int(json!("42")));
        assert!(int(json!("-7")));
        assert!(int(json!("+3")));
        assert!(int(json!("0")));
        assert!(int(json!(15)));
        assert!(int(json!("007")));
        assert!(int(json!("-0012")));

        assert!(!int(json!("+")));
        assert!(!int(json!("1.5")));
        assert!(!int(json!("abc")));
        assert!(!int(json!("")));
        assert!(!int(json!("99999999999")));
        assert!(!is_int(None));
    }

    #[test]
    fn not_empty_uses_text_form() {
        assert!(not_empty(Some(&json!(0))));
        assert!(not_empty(Some(&json!(false))));
        assert!(not_empty(Some(&json!("x"))));

        assert!(!not_empty(None));
        assert!(!not_empty(Some(&Value::Null)));
        assert!(!not_empty(Some(&json!(""))));
        assert!(!not_empty(Some(&json!(["x"]))));
    }

    #[test]
    fn numeric_accepts_decimal_forms() {
        for ok in [json!("10"), json!("-2.5"), json!(".5"), json!(300), json!(0.75)] {
            assert!(is_numeric(Some(&ok)), "{ok} should be numeric");
        }
        for bad in [json!("hola"), json!("1."), json!("1,5"), json!(""), json!(true)] {
            assert!(!is_numeric(Some(&bad)), "{bad} should not be numeric");
        }
    }

    #[test]
    fn positive_coerces_loosely() {
        assert!(is_positive(Some(&json!(300))));
        assert!(is_positive(Some(&json!("12.5"))));
        assert!(is_positive(Some(&json!(true))));

        assert!(!is_positive(Some(&json!(0))));
        assert!(!is_positive(Some(&json!(-1))));
        assert!(!is_positive(Some(&json!("hola"))));
        assert!(!is_positive(Some(&json!(""))));
        assert!(!is_positive(Some(&Value::Null)));
        assert!(!is_positive(Some(&json!("inf"))));
        assert!(!is_positive(None));
    }

    #[test]
    fn boolean_accepts_four_spellings() {
        for ok in [json!(true), json!(false), json!("true"), json!("0"), json!(1)] {
            assert!(is_boolean(Some(&ok)), "{ok} should be boolean");
        }
        for bad in [json!("yes"), json!("TRUE"), json!(2), json!("")] {
            assert!(!is_boolean(Some(&bad)), "{bad} should not be boolean");
        }
        assert!(!is_boolean(None));
    }

    #[test]
    fn update_builds_typed_request_from_loose_input() {
        let input = RequestInput {
            params: [("id".to_string(), "4".to_string())].into_iter().collect(),
            body: json!({ "name": "Silla", "price": "25.5", "availability": "0" })
                .as_object()
                .cloned()
                .unwrap(),
        };

        let req = UpdateProductRequest::from_input(&input).unwrap();

        assert_eq!(req.id, 4);
        assert_eq!(req.name, "Silla");
        assert_eq!(req.price, 25.5);
        assert!(!req.availability);
    }
}
