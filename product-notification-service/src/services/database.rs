//! Database service for product-notification-service.

use crate::models::{Product, ProductNotification};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::source::ProductSource;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Newest products first. The timestamp is the query time; the table stores none.
/// `id` is cast so tables created with a 32-bit key still decode.
const RECENT_PRODUCTS_QUERY: &str = r#"
    SELECT
        id::bigint AS id,
        title,
        COALESCE(category, '') AS category,
        COALESCE(description, '') AS description,
        CURRENT_TIMESTAMP AS created_at
    FROM product
    ORDER BY id DESC
    LIMIT $1
"#;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "product-notification-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    /// Create the `product` table or add missing columns, then check that
    /// every column of [`Product`] exists.
    ///
    /// Only column names are checked. Existing column types are left alone,
    /// since only id, title, category and description are ever read back.
    #[instrument(skip(self))]
    pub async fn sync_schema(&self) -> Result<(), AppError> {
        info!(table = Product::TABLE, "Syncing product schema");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;

        let missing = self.missing_columns().await?;
        if !missing.is_empty() {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Table {} is missing columns: {}",
                Product::TABLE,
                missing.join(", ")
            )));
        }

        info!(table = Product::TABLE, "Product schema in sync");
        Ok(())
    }

    /// Columns of [`Product`] absent from the table in the current schema.
    #[instrument(skip(self))]
    pub async fn missing_columns(&self) -> Result<Vec<String>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["missing_columns"])
            .start_timer();

        let existing: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT column_name::text
            FROM information_schema.columns
            WHERE table_schema = current_schema() AND table_name = $1
            "#,
        )
        .bind(Product::TABLE)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to inspect product table: {}", e))
        })?;

        timer.observe_duration();

        Ok(Product::COLUMNS
            .iter()
            .filter(|column| !existing.iter().any(|e| e == *column))
            .map(|column| column.to_string())
            .collect())
    }

    /// Project the newest products for notifications.
    #[instrument(skip(self))]
    pub async fn recent_products(&self, limit: i64) -> Result<Vec<ProductNotification>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["recent_products"])
            .start_timer();

        let products = sqlx::query_as::<_, ProductNotification>(RECENT_PRODUCTS_QUERY)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to load recent products: {}", e))
            })?;

        timer.observe_duration();

        info!(count = products.len(), "Loaded recent products");
        Ok(products)
    }
}

#[async_trait]
impl ProductSource for Database {
    async fn recent_products(&self, limit: i64) -> Result<Vec<ProductNotification>, AppError> {
        Database::recent_products(self, limit).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Database::health_check(self).await
    }
}
