use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::create_item::ItemRequest;
use super::ApiError;
use super::ApiSuccess;
use super::ItemData;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::item::errors::ItemError;

/// Replace every editable field of one of the caller's items.
pub async fn update_item(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(item_id): Path<String>,
    Json(body): Json<ItemRequest>,
) -> Result<ApiSuccess<ItemData>, ApiError> {
    let item_id = ItemId::from_string(&item_id).map_err(ItemError::from)?;
    let fields = body.try_into_fields().map_err(ItemError::from)?;

    state
        .item_service
        .update_item(principal.user.id, item_id, fields)
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::OK, item.into()))
}
