use crate::models::{derive_notifications, Notification};
use crate::services::{record_error, record_notifications_served, RECENT_PRODUCTS_LIMIT};
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service_core::error::AppError;
use thiserror::Error;
use tracing::{error, info, instrument};

/// Failure of `GET /notifications`.
///
/// The cause is logged; clients only ever see the fixed message.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Failed to load product notifications")]
    LoadFailed(#[source] AppError),
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        match &self {
            NotificationError::LoadFailed(cause) => {
                error!(error = %cause, "Failed to load product notifications");
                record_error("load_notifications");
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[instrument(name = "handler::list_notifications", skip_all)]
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, NotificationError> {
    let products = state
        .source
        .recent_products(RECENT_PRODUCTS_LIMIT)
        .await
        .map_err(NotificationError::LoadFailed)?;

    let notifications = derive_notifications(products);
    record_notifications_served(notifications.len());
    info!(count = notifications.len(), "Serving product notifications");

    Ok(Json(notifications))
}
