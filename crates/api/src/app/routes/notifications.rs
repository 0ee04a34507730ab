use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::Value;

use notify_auth::Principal;
use notify_core::{Entity, Notification, NotificationId, notification::FIELD_USER};
use notify_infra::Stores;

use crate::app::dto::{self, CreateNotificationRequest};
use crate::app::errors::ApiError;

/// POST /notifications (admin)
pub async fn create(
    Extension(stores): Extension<Stores>,
    CreateNotificationRequest(draft): CreateNotificationRequest,
) -> Result<impl IntoResponse, ApiError> {
    let notification = Notification::create(&draft, Utc::now())?;
    stores.notifications.save(&notification).await?;

    tracing::info!(
        notification_id = %notification.id(),
        user = %notification.user(),
        "notification created"
    );

    Ok((StatusCode::CREATED, Json(dto::notification_to_json(&notification))))
}

/// GET /notifications (user): the caller's own notifications, oldest first.
pub async fn list(
    Extension(stores): Extension<Stores>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let user = principal.require_user()?;
    let owned = stores
        .notifications
        .find_by(FIELD_USER, user.as_str())
        .await?;

    Ok(Json(owned.iter().map(dto::notification_to_json).collect()))
}

/// GET /notifications/:id (user)
///
/// Another user's notification is reported as not found.
pub async fn get_one(
    Extension(stores): Extension<Stores>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user = principal.require_user()?;
    let Ok(id) = id.parse::<NotificationId>() else {
        return Err(ApiError::NotFound("notification"));
    };

    match stores.notifications.get(&id.to_string()).await? {
        Some(n) if n.is_owned_by(user) => Ok(Json(dto::notification_to_json(&n))),
        _ => Err(ApiError::NotFound("notification")),
    }
}

/// DELETE /notifications/:id (user + ownership)
///
/// Not found and not owned are both `403`, so callers cannot probe for ids.
/// Of several concurrent deletes only the one that actually removed the
/// document gets `204`.
pub async fn delete(
    Extension(stores): Extension<Stores>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    principal.require_user()?;
    let Ok(id) = id.parse::<NotificationId>() else {
        return Err(ApiError::Forbidden);
    };
    let key = id.to_string();

    let Some(notification) = stores.notifications.get(&key).await? else {
        return Err(ApiError::Forbidden);
    };
    notify_auth::require_owner(&principal, notification.user())?;

    if !stores.notifications.delete(&key).await? {
        return Err(ApiError::Forbidden);
    }

    tracing::info!(notification_id = %key, "notification deleted");
    Ok(StatusCode::NO_CONTENT)
}
