use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ItemData;
use crate::domain::item::models::ItemSearch;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn search_items(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Query(params): Query<SearchParams>,
) -> Result<ApiSuccess<Vec<ItemData>>, ApiError> {
    state
        .item_service
        .search_items(principal.user.id, params.into())
        .await
        .map_err(ApiError::from)
        .map(|items| ApiSuccess::new(StatusCode::OK, items.iter().map(ItemData::from).collect()))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub min_price: Option<f64>,
}

impl From<SearchParams> for ItemSearch {
    fn from(params: SearchParams) -> Self {
        ItemSearch {
            name: params.name.filter(|name| !name.is_empty()),
            min_price: params.min_price,
        }
    }
}
