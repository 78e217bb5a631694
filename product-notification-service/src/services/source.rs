//! Where product projections come from.

use crate::models::ProductNotification;
use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// How many of the newest products become notifications.
pub const RECENT_PRODUCTS_LIMIT: i64 = 5;

/// Read access to the newest catalog products.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Up to `limit` products with the highest ids, highest first.
    async fn recent_products(&self, limit: i64) -> Result<Vec<ProductNotification>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

#[derive(Debug, Clone)]
struct StoredProduct {
    id: i64,
    title: String,
    description: String,
    category: String,
}

/// Product source kept in process memory, for tests and local runs without
/// PostgreSQL.
pub struct InMemoryProductSource {
    products: RwLock<Vec<StoredProduct>>,
    failing: AtomicBool,
}

impl InMemoryProductSource {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Insert a product, replacing any existing one with the same id.
    pub async fn add(&self, id: i64, title: &str, description: &str, category: &str) {
        let mut products = self.products.write().await;
        products.retain(|p| p.id != id);
        products.push(StoredProduct {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
        });
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "In-memory product source is failing"
            )));
        }
        Ok(())
    }
}

impl Default for InMemoryProductSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductSource for InMemoryProductSource {
    async fn recent_products(&self, limit: i64) -> Result<Vec<ProductNotification>, AppError> {
        self.check_available()?;

        let mut products = self.products.read().await.clone();
        products.sort_by(|a, b| b.id.cmp(&a.id));

        // One timestamp for the whole result, like CURRENT_TIMESTAMP.
        let now = Utc::now();
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(products
            .into_iter()
            .take(limit)
            .map(|p| ProductNotification {
                id: p.id,
                title: p.title,
                category: p.category,
                description: p.description,
                created_at: now,
            })
            .collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check_available()
    }
}
