use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::{
        api::ApiResponse,
        product::{ProductResponse, ProductSummaryResponse},
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{NOT_FOUND_MESSAGE, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self {
            query,
            tracer: OperationTracer::new("product-query-service", metrics),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductSummaryResponse>>, ServiceError> {
        info!("🔍 Finding all products");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let products = match self.query.find_all().await {
            Ok(products) => {
                self.tracer.success(&tracing_ctx, method, "Products retrieved");
                products
            }
            Err(e) => {
                let msg = format!("❌ Failed to fetch all products: {e:?}");
                error!("{msg}");
                self.tracer.failure(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductSummaryResponse> = products
            .into_iter()
            .map(ProductSummaryResponse::from)
            .collect();

        info!("✅ Found {} products", data.len());

        Ok(ApiResponse::new(data))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product = match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.tracer.success(&tracing_ctx, method, "Product retrieved");
                product
            }
            Ok(None) => {
                info!("ℹ️ Product not found with ID: {id}");
                self.tracer.miss(&tracing_ctx, method, "Product not found");
                return Err(ServiceError::NotFound(NOT_FOUND_MESSAGE.to_string()));
            }
            Err(e) => {
                let msg = format!("❌ Database error while finding product ID {id}: {e:?}");
                error!("{msg}");
                self.tracer.failure(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(e));
            }
        };

        Ok(ApiResponse::new(ProductResponse::from(product)))
    }
}
