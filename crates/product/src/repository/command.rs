use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::CreateProductRequest, model::product::Product as ProductModel,
    repository::PRODUCT_COLUMNS,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Creating product: {}", req.name);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let sql = format!(
            "INSERT INTO products (name, price, availability, created_at, updated_at)
             VALUES ($1, $2, TRUE, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
             RETURNING {PRODUCT_COLUMNS}"
        );

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(&req.name)
            .bind(req.price)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to create product '{}': {:?}", req.name, e);
                RepositoryError::from(e)
            })?;

        info!("✅ Product created with ID: {}", product.id);

        Ok(product)
    }

    async fn update_product(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError> {
        info!("✏️ Updating product ID: {}", product.id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let sql = format!(
            "UPDATE products
             SET name = $2, price = $3, availability = $4, updated_at = CURRENT_TIMESTAMP
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to update product ID {}: {:?}", product.id, e);
                RepositoryError::from(e)
            })?;

        match updated {
            Some(updated) => {
                info!("✅ Product updated: ID {}", updated.id);
                Ok(updated)
            }
            None => {
                info!("ℹ️ Product ID {} vanished before update", product.id);
                Err(RepositoryError::NotFound)
            }
        }
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🧨 Deleting product ID: {id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product ID {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            info!("ℹ️ Product ID {id} vanished before delete");
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Product ID {id} deleted");

        Ok(())
    }
}
