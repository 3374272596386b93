use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::models::{Product, ProductInput};
use super::store::{ProductStore, SortOrder, StoreError};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
}

/// Process-local product table, used by tests and `PRODUCTS_STORE=memory`
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: RwLock<Table>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_all(&self, order: SortOrder) -> Result<Vec<Product>, StoreError> {
        let table = self.table.read().await;
        let rows = table.rows.values().cloned();
        Ok(match order {
            SortOrder::Ascending => rows.collect(),
            SortOrder::Descending => rows.rev().collect(),
        })
    }

    async fn get_by_key(&self, id: i32) -> Result<Option<Product>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: ProductInput) -> Result<Product, StoreError> {
        let mut table = self.table.write().await;
        let id = table.last_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let now = Utc::now();
        let product = Product {
            id,
            status: input.initial_status(),
            name: input.name,
            price: input.price,
            created_at: now,
            updated_at: now,
        };
        table.last_id = id;
        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn persist(&self, product: &mut Product) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&product.id).ok_or(StoreError::Missing(product.id))?;
        product.updated_at = Utc::now();
        row.name = product.name.clone();
        row.price = product.price;
        row.status = product.status;
        row.updated_at = product.updated_at;
        Ok(())
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        self.table.write().await.rows.remove(&product.id);
        Ok(())
    }

    async fn sync(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        // Recreating a SERIAL table restarts ids at 1
        *self.table.write().await = Table::default();
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
