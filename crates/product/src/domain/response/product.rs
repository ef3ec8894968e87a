use crate::model::product::Product as ProductModel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PRODUCT_DELETED_MESSAGE: &str = "Producto Eliminado";

fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub created_at: Option<String>,
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub updated_at: Option<String>,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            price: value.price,
            availability: value.availability,
            created_at: value.created_at.map(format_timestamp),
            updated_at: value.updated_at.map(format_timestamp),
        }
    }
}

// list rows carry no bookkeeping timestamps
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductSummaryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

impl From<ProductModel> for ProductSummaryResponse {
    fn from(value: ProductModel) -> Self {
        ProductSummaryResponse {
            id: value.id,
            name: value.name,
            price: value.price,
            availability: value.availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> ProductModel {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_milli_opt(8, 15, 30, 250))
            .unwrap();

        ProductModel {
            id: 7,
            name: "Teclado".into(),
            price: 49.9,
            availability: true,
            created_at: Some(ts),
            updated_at: Some(ts),
        }
    }

    #[test]
    fn single_record_exposes_iso_timestamps() {
        let json = serde_json::to_value(ProductResponse::from(sample())).unwrap();

        assert_eq!(json["createdAt"], "2024-03-05T08:15:30.250Z");
        assert_eq!(json["updatedAt"], "2024-03-05T08:15:30.250Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn summary_drops_timestamps() {
        let json = serde_json::to_value(ProductSummaryResponse::from(sample())).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(keys.len(), 4);
        assert!(!keys.contains(&"createdAt"));
    }
}
