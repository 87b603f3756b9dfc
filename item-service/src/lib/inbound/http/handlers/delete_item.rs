use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::item::errors::ItemError;

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(item_id): Path<String>,
) -> Result<ApiSuccess<DeleteItemResponseData>, ApiError> {
    let item_id = ItemId::from_string(&item_id).map_err(ItemError::from)?;

    state
        .item_service
        .delete_item(principal.user.id, item_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteItemResponseData {
            message: "Item deleted".to_string(),
            item_id: item_id.0,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteItemResponseData {
    pub message: String,
    pub item_id: i64,
}
