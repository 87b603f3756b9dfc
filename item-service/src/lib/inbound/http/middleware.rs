use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthFailure;

/// Extension type carrying the principal resolved for the current request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Middleware that resolves the bearer token to an existing user and adds
/// it to request extensions.
///
/// Runs on every request; nothing is cached between requests.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).map(str::to_string);

    let user = state
        .user_service
        .authenticate(token.as_deref())
        .await
        .map_err(|failure| match failure {
            AuthFailure::Repository(e) => {
                ApiError::InternalServerError(format!("Principal lookup failed: {}", e))
                    .into_response()
            }
            failure => {
                tracing::warn!(
                    reason = %failure,
                    method = %req.method(),
                    uri = %req.uri(),
                    "Authentication failed"
                );
                ApiError::not_authenticated().into_response()
            }
        })?;

    tracing::debug!(user_id = %user.id, "Request authenticated");
    req.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header. Any other shape
/// counts as no token at all.
fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
