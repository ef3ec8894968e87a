use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{
            api::ApiResponse,
            product::{PRODUCT_DELETED_MESSAGE, ProductResponse},
        },
    },
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{NOT_FOUND_MESSAGE, RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer, TracingContext},
};
use tracing::{error, info};

/// Mutating side of the catalogue. Every id-addressed operation looks the
/// record up first and answers not-found before touching the store.
#[derive(Clone)]
pub struct ProductCommandService {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self {
            query,
            command,
            tracer: OperationTracer::new("product-command-service", metrics),
        }
    }

    async fn find_existing(
        &self,
        id: i32,
        tracing_ctx: &TracingContext,
        method: Method,
    ) -> Result<ProductModel, ServiceError> {
        match self.query.find_by_id(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => {
                info!("ℹ️ Product not found with ID: {id}");
                self.tracer.miss(tracing_ctx, method, "Product not found");
                Err(ServiceError::NotFound(NOT_FOUND_MESSAGE.to_string()))
            }
            Err(e) => {
                let msg = format!("❌ Database error while looking up product ID {id}: {e:?}");
                error!("{msg}");
                self.tracer.failure(tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(e))
            }
        }
    }

    fn persist_failed(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        id: i32,
        err: RepositoryError,
    ) -> ServiceError {
        if matches!(err, RepositoryError::NotFound) {
            info!("ℹ️ Product ID {id} disappeared before the write");
            self.tracer.miss(tracing_ctx, method, "Product not found");
        } else {
            let msg = format!("❌ Failed to persist product ID {id}: {err:?}");
            error!("{msg}");
            self.tracer.failure(tracing_ctx, method, &msg);
        }
        ServiceError::Repo(err)
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆕 Creating product: {}", req.name);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "product_create",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        let product = match self.command.create_product(req).await {
            Ok(product) => {
                self.tracer.success(&tracing_ctx, method, "Product created");
                product
            }
            Err(e) => {
                let msg = format!("❌ Failed to create product '{}': {e:?}", req.name);
                error!("{msg}");
                self.tracer.failure(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        info!("✅ Product created with ID: {}", product.id);

        Ok(ApiResponse::new(ProductResponse::from(product)))
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product ID: {}", req.id);

        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "product_update",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", req.id.to_string()),
            ],
        );

        let mut product = self
            .find_existing(req.id, &tracing_ctx, method.clone())
            .await?;

        product.name = req.name.clone();
        product.price = req.price;
        product.availability = req.availability;

        let updated = match self.command.update_product(&product).await {
            Ok(updated) => {
                self.tracer.success(&tracing_ctx, method, "Product updated");
                updated
            }
            Err(e) => return Err(self.persist_failed(&tracing_ctx, method, req.id, e)),
        };

        Ok(ApiResponse::new(ProductResponse::from(updated)))
    }

    async fn toggle_availability(
        &self,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔁 Toggling availability for product ID: {id}");

        let method = Method::Patch;
        let tracing_ctx = self.tracer.start(
            "product_toggle_availability",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "toggle_availability"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let mut product = self.find_existing(id, &tracing_ctx, method.clone()).await?;
        product.availability = !product.availability;

        let updated = match self.command.update_product(&product).await {
            Ok(updated) => {
                self.tracer
                    .success(&tracing_ctx, method, "Product availability toggled");
                updated
            }
            Err(e) => return Err(self.persist_failed(&tracing_ctx, method, id, e)),
        };

        info!(
            "✅ Product ID {id} availability is now {}",
            updated.availability
        );

        Ok(ApiResponse::new(ProductResponse::from(updated)))
    }

    async fn delete_product(&self, id: i32) -> Result<ApiResponse<String>, ServiceError> {
        info!("🧨 Deleting product ID: {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "product_delete",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        self.find_existing(id, &tracing_ctx, method.clone()).await?;

        if let Err(e) = self.command.delete_product(id).await {
            return Err(self.persist_failed(&tracing_ctx, method, id, e));
        }

        self.tracer.success(&tracing_ctx, method, "Product deleted");

        Ok(ApiResponse::new(PRODUCT_DELETED_MESSAGE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryProductRepository;
    use std::sync::Arc;

    fn service(repo: &InMemoryProductRepository) -> ProductCommandService {
        let mut registry = Registry::default();
        ProductCommandService::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            &mut registry,
        )
    }

    #[tokio::test]
    async fn toggle_flips_stored_availability() {
        let repo = InMemoryProductRepository::new();
        let svc = service(&repo);
        let created = svc
            .create_product(&CreateProductRequest {
                name: "Audifonos".into(),
                price: 80.0,
            })
            .await
            .unwrap();
        assert!(created.data.availability);

        let first = svc.toggle_availability(created.data.id).await.unwrap();
        let second = svc.toggle_availability(created.data.id).await.unwrap();

        assert!(!first.data.availability);
        assert!(second.data.availability);
    }

    #[tokio::test]
    async fn missing_record_is_reported_before_any_write() {
        let repo = InMemoryProductRepository::new();
        let svc = service(&repo);

        let err = svc
            .update_product(&UpdateProductRequest {
                id: 2000,
                name: "Nada".into(),
                price: 1.0,
                availability: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == NOT_FOUND_MESSAGE));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn delete_answers_with_confirmation_text() {
        let repo = InMemoryProductRepository::new();
        let svc = service(&repo);
        let created = svc
            .create_product(&CreateProductRequest {
                name: "Mesa".into(),
                price: 120.5,
            })
            .await
            .unwrap();

        let response = svc.delete_product(created.data.id).await.unwrap();

        assert_eq!(response.data, PRODUCT_DELETED_MESSAGE);
        assert!(repo.is_empty().await);
    }
}
