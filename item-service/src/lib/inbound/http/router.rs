use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_item::create_item;
use super::handlers::delete_item::delete_item;
use super::handlers::get_item::get_item;
use super::handlers::health::health;
use super::handlers::list_items::list_items;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::search_items::search_items;
use super::handlers::update_item::update_item;
use super::middleware::authenticate as auth_middleware;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub item_service: Arc<dyn ItemServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    item_service: Arc<dyn ItemServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        item_service,
    };

    let public_routes = Router::new()
        .route("/", get(health))
        .route("/users/register", post(register))
        .route("/users/login", post(login));

    let protected_routes = Router::new()
        .route("/users/me", get(me))
        .route("/items", post(create_item).get(list_items))
        .route("/items/search", get(search_items))
        .route(
            "/items/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
