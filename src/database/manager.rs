use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use crate::config::{DatabaseConfig, StoreBackend};

use super::memory::MemoryProductStore;
use super::postgres::PgProductStore;
use super::store::ProductStore;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the connection pool and the record store handle from config
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build the store selected by `config.backend`.
    ///
    /// The PostgreSQL pool connects lazily, so a database that is down at
    /// startup is logged and the server still comes up.
    pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn ProductStore>, DatabaseError> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory product store");
                Ok(Arc::new(MemoryProductStore::new()))
            }
            StoreBackend::Postgres => {
                let store = PgProductStore::new(Self::pool(config)?);
                if config.sync_on_startup {
                    match store.sync().await {
                        Ok(()) => info!("Database connection established"),
                        Err(e) => error!("Hubo un error al conectar a la BD: {}", e),
                    }
                }
                Ok(Arc::new(store))
            }
        }
    }

    /// Create a lazily connecting pool for DATABASE_URL
    pub fn pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let base = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let connection_string = Self::build_connection_string(&base, config.database_name.as_deref())?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(&connection_string)?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }

    /// Validate the URL and optionally swap the database name in its path
    fn build_connection_string(base: &str, database_name: Option<&str>) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(base).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(DatabaseError::InvalidDatabaseUrl);
        }

        if let Some(name) = database_name {
            if !Self::is_valid_db_name(name) {
                return Err(DatabaseError::InvalidDatabaseName(name.to_string()));
            }
            // Replace the path to the database name (ensure leading slash)
            url.set_path(&format!("/{}", name));
        }
        Ok(url.into())
    }

    /// Database names are restricted to [a-zA-Z0-9_], not starting with a digit
    fn is_valid_db_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }
}
