//! Services module for product-notification-service.

pub mod database;
pub mod metrics;
pub mod source;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics, record_error, record_notifications_served};
pub use source::{InMemoryProductSource, ProductSource, RECENT_PRODUCTS_LIMIT};
