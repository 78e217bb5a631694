//! Domain models for product-notification-service.

mod notification;
mod product;

pub use notification::{derive_notifications, Notification, NotificationType};
pub use product::{Product, ProductNotification};
