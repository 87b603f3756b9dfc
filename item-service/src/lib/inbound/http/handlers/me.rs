use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn me(Extension(principal): Extension<AuthenticatedUser>) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&principal.user).into())
}
