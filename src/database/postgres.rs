use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info};

use super::models::{Product, ProductInput};
use super::store::{ProductStore, SortOrder, StoreError};

const TABLE: &str = "products";

const COLUMNS: &str = "id, name, price, status, created_at, updated_at";

/// Product table on PostgreSQL
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn create_table_sql() -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TABLE} (
                id SERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                status BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#
        )
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_all(&self, order: SortOrder) -> Result<Vec<Product>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY id {}", order.as_sql());
        let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
        debug!("Listed {} products", rows.len());
        Ok(rows)
    }

    async fn get_by_key(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: ProductInput) -> Result<Product, StoreError> {
        let sql = format!(
            "INSERT INTO {TABLE} (name, price, status) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let status = input.initial_status();
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(input.name)
            .bind(input.price)
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        debug!("Created product {}", product.id);
        Ok(product)
    }

    async fn persist(&self, product: &mut Product) -> Result<(), StoreError> {
        let sql = format!(
            "UPDATE {TABLE} SET name = $2, price = $3, status = $4, updated_at = now() WHERE id = $1 RETURNING updated_at"
        );
        let updated_at: Option<DateTime<Utc>> = sqlx::query_scalar(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.status)
            .fetch_optional(&self.pool)
            .await?;

        product.updated_at = updated_at.ok_or(StoreError::Missing(product.id))?;
        Ok(())
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {TABLE} WHERE id = $1");
        sqlx::query(&sql).bind(product.id).execute(&self.pool).await?;
        debug!("Deleted product {}", product.id);
        Ok(())
    }

    async fn sync(&self) -> Result<(), StoreError> {
        sqlx::query(&Self::create_table_sql()).execute(&self.pool).await?;
        info!("Table '{}' is in sync", TABLE);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("DROP TABLE IF EXISTS {TABLE}")).execute(&mut *tx).await?;
        sqlx::query(&Self::create_table_sql()).execute(&mut *tx).await?;
        tx.commit().await?;
        info!("Table '{}' dropped and recreated", TABLE);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
