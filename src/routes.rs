use crate::state::AppState;
use axum::Router;

mod players;

pub fn create_routes(state: AppState) -> Router {
    Router::new().nest("/api/players", players::routes(state))
}
