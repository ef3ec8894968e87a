use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{CreateProductRequest, ProductIdParam, UpdateProductRequest},
        response::{
            api::ApiResponse,
            product::{ProductResponse, ProductSummaryResponse},
        },
    },
    middleware::validate::ValidatedRequest,
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError, ValidationErrorResponse};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<Vec<ProductSummaryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request - invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    ValidatedRequest(req): ValidatedRequest<ProductIdParam>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(req.id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request - invalid input", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    ValidatedRequest(body): ValidatedRequest<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to update")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request - invalid ID or invalid input", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    ValidatedRequest(body): ValidatedRequest<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to toggle")),
    responses(
        (status = 200, description = "Availability toggled", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request - invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn toggle_product_availability(
    Extension(service): Extension<DynProductCommandService>,
    ValidatedRequest(req): ValidatedRequest<ProductIdParam>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.toggle_availability(req.id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<String>, example = json!({"data": "Producto Eliminado"})),
        (status = 400, description = "Bad request - invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    ValidatedRequest(req): ValidatedRequest<ProductIdParam>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_product(req.id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products", get(get_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(toggle_product_availability)
                .delete(delete_product),
        )
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
