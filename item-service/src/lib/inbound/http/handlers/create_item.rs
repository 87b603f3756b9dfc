use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ItemData;
use crate::domain::item::errors::ItemFieldsError;
use crate::domain::item::models::ItemFields;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::item::errors::ItemError;

pub async fn create_item(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Json(body): Json<ItemRequest>,
) -> Result<ApiSuccess<ItemData>, ApiError> {
    let fields = body.try_into_fields().map_err(ItemError::from)?;

    state
        .item_service
        .create_item(principal.user.id, fields)
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::CREATED, item.into()))
}

/// HTTP request body carrying every editable item field (raw JSON).
///
/// Shared by create and full update.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl ItemRequest {
    pub fn try_into_fields(self) -> Result<ItemFields, ItemFieldsError> {
        ItemFields::new(self.name, self.description, self.price, self.in_stock)
    }
}
