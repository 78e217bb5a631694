//! HTTP handlers for product-notification-service.

pub mod health;
pub mod notifications;

pub use health::{health_check, metrics_handler, not_found, readiness_check, root};
pub use notifications::{list_notifications, NotificationError};
