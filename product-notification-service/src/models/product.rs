//! Catalog product record and the narrowed view used for notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog product as stored in the `product` table.
///
/// Semi-structured attributes (`tags`, `dimensions`, `meta`, `images`) are kept
/// as opaque JSON; this service never looks inside them. Rows are never read
/// back whole, so existing tables may use other numeric types for these columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub rating: Option<f64>,
    pub stock: Option<i64>,
    pub tags: Option<serde_json::Value>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<serde_json::Value>,
    pub availability_status: Option<String>,
    pub minimum_order_quantity: Option<i64>,
    pub meta: Option<serde_json::Value>,
    pub images: Option<serde_json::Value>,
    pub thumbnail: Option<String>,
}

impl Product {
    /// Table the record maps onto.
    pub const TABLE: &'static str = "product";

    /// Every column of the record, in declaration order.
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "category",
        "price",
        "discount_percentage",
        "rating",
        "stock",
        "tags",
        "brand",
        "sku",
        "weight",
        "dimensions",
        "availability_status",
        "minimum_order_quantity",
        "meta",
        "images",
        "thumbnail",
    ];
}

/// Read-only projection of a product used to build a notification.
///
/// `created_at` is the time the query ran, not when the product was stored:
/// the table keeps no creation timestamp.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProductNotification {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
