//! Notification payload served to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProductNotification;

const PRODUCT_TITLE_PREFIX: &str = "New Product: ";

/// Origin of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Product,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ProductNotification> for Notification {
    fn from(product: ProductNotification) -> Self {
        Self {
            notification_type: NotificationType::Product,
            title: format!("{}{}", PRODUCT_TITLE_PREFIX, product.title),
            message: format!("{} ({})", product.description, product.category),
            timestamp: product.created_at,
        }
    }
}

/// Turn product projections into notifications, one for one, keeping order.
pub fn derive_notifications(products: Vec<ProductNotification>) -> Vec<Notification> {
    products.into_iter().map(Notification::from).collect()
}
