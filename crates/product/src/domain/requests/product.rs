use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct ProductIdParam {
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "El nombre del producto no puede superar 100 caracteres"
    ))]
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,

    #[schema(example = 300)]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(length(
        min = 1,
        max = 100,
        message = "El nombre del producto no puede superar 100 caracteres"
    ))]
    #[schema(example = "Monitor Curvo de 49 Pulgadas - Actualizado")]
    pub name: String,

    #[schema(example = 399)]
    pub price: f64,

    #[schema(example = true)]
    pub availability: bool,
}
