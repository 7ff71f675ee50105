use crate::models::config::ServerConfig;
use crate::routes;
use crate::state::AppState;
use axum::Router;

/// Builds the router around a fresh session.
pub fn create_app(config: &ServerConfig) -> Router {
    create_app_with_state(AppState::from_config(config))
}

pub fn create_app_with_state(state: AppState) -> Router {
    routes::create_routes(state)
}
