use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    domain::requests::product::CreateProductRequest,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i32, ProductModel>,
    next_id: i32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Process-local product table with the same contract as the PostgreSQL
/// repositories. Clones share one table, so a single instance can serve as
/// both the query and the command side.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }

    pub async fn clear(&self) {
        *self.table.write().await = Table::default();
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Custom("product id sequence exhausted".into()))?;

        let now = Utc::now().naive_utc();
        let product = ProductModel {
            id,
            name: req.name.clone(),
            price: req.price,
            availability: true,
            created_at: Some(now),
            updated_at: Some(now),
        };

        table.rows.insert(id, product.clone());

        Ok(product)
    }

    async fn update_product(&self, product: &ProductModel) -> Result<ProductModel, RepositoryError> {
        let mut table = self.table.write().await;
        let stored = table
            .rows
            .get_mut(&product.id)
            .ok_or(RepositoryError::NotFound)?;

        stored.name = product.name.clone();
        stored.price = product.price;
        stored.availability = product.availability;
        stored.updated_at = Some(Utc::now().naive_utc());

        Ok(stored.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
