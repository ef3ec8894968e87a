mod product;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use serde_json::json;
use shared::{
    errors::{
        ErrorResponse, FieldError, FieldLocation, HttpError, INTERNAL_ERROR_MESSAGE,
        ValidationErrorResponse,
    },
    utils::shutdown_signal,
};
use std::{any::Any, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::product::product_routes;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Rust / Axum / SQLx",
        version = "1.0.0",
        description = "API Docs for Products"
    ),
    paths(
        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::toggle_product_availability,
        product::delete_product,
    ),
    components(schemas(ErrorResponse, ValidationErrorResponse, FieldError, FieldLocation)),
    tags(
        (name = "Products", description = "API operations related to products"),
    )
)]
pub struct ApiDoc;

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        error!("Failed to encode metrics: {e}");
        return HttpError::Internal(INTERNAL_ERROR_MESSAGE.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        Body::from(buffer),
    )
        .into_response()
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("Handler panicked; answering with 500");
    HttpError::Internal(INTERNAL_ERROR_MESSAGE.to_string()).into_response()
}

fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::exact(allowed_origin))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
}

pub struct AppRouter;

impl AppRouter {
    /// Assembles the full application: product routes, health, metrics and
    /// Swagger UI, wrapped by the origin guard and the tower-http stack.
    pub fn build(app_state: Arc<AppState>) -> Router {
        let (api_router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .merge(product_routes(app_state.clone()))
            .split_for_parts();

        let metrics_router = Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(app_state.clone());

        api_router
            .route("/health", get(health_handler))
            .merge(metrics_router)
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(cors_layer(app_state.allowed_origin.clone()))
            .layer(middleware::from_fn_with_state(
                app_state.allowed_origin.clone(),
                crate::middleware::origin::origin_guard,
            ))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/docs");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
