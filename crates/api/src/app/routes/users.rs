use axum::{
    Json,
    extract::{Extension, Path},
};
use serde_json::Value;

use notify_core::UserId;
use notify_infra::Stores;

use crate::app::dto;
use crate::app::errors::ApiError;

/// GET /users (admin)
pub async fn list(Extension(stores): Extension<Stores>) -> Result<Json<Vec<Value>>, ApiError> {
    let users = stores.users.list().await?;
    Ok(Json(users.iter().map(dto::user_to_json).collect()))
}

/// GET /users/:id (admin)
pub async fn get_one(
    Extension(stores): Extension<Stores>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let Ok(id) = UserId::parse(&id) else {
        return Err(ApiError::NotFound("user"));
    };

    match stores.users.get(id.as_str()).await? {
        Some(user) => Ok(Json(dto::user_to_json(&user))),
        None => Err(ApiError::NotFound("user")),
    }
}
