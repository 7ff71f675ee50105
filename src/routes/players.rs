use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

use crate::error::GameError;
use crate::models::player::{PlayerRecord, TargetRequest};
use crate::services::player_service;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        // curl http://localhost:8080/api/players
        .route("/", get(get_players).post(create_player))
        // curl -X PUT http://localhost:8080/api/players/clearVotes
        .route("/clearVotes", put(clear_votes))
        // curl -X POST http://localhost:8080/api/players/tally
        .route("/tally", post(tally))
        .route("/round", get(round_status))
        .route(
            "/:id",
            get(get_player).put(update_player).delete(remove_player),
        )
        // curl -X POST -H 'Content-Type: application/json' -d '{"targetId":3}' \
        //   http://localhost:8080/api/players/1/vote
        .route("/:id/vote", post(cast_vote))
        .route("/:id/kill", post(kill))
        .with_state(state)
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = match self {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::InvalidArgument(_) | GameError::InvalidOperation(_) => {
                StatusCode::BAD_REQUEST
            }
        };

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

async fn get_players(State(state): State<AppState>) -> Response {
    let players = player_service::get_players(&state).await;
    if players.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::OK, Json(players)).into_response()
    }
}

async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<u32>,
) -> Result<impl IntoResponse, GameError> {
    let player = player_service::get_player(&state, player_id).await?;
    Ok((StatusCode::OK, Json(player)))
}

async fn create_player(
    State(state): State<AppState>,
    Json(record): Json<PlayerRecord>,
) -> Result<impl IntoResponse, GameError> {
    let player = player_service::create_player(&state, record).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<u32>,
    Json(record): Json<Option<PlayerRecord>>,
) -> Result<impl IntoResponse, GameError> {
    let player = player_service::update_player(&state, player_id, record).await?;
    Ok((StatusCode::OK, Json(player)))
}

async fn remove_player(
    State(state): State<AppState>,
    Path(player_id): Path<u32>,
) -> Result<impl IntoResponse, GameError> {
    let player = player_service::remove_player(&state, player_id).await?;
    Ok((StatusCode::OK, Json(player)))
}

async fn cast_vote(
    State(state): State<AppState>,
    Path(voter_id): Path<u32>,
    Json(req): Json<TargetRequest>,
) -> Result<impl IntoResponse, GameError> {
    let outcome = player_service::cast_vote(&state, voter_id, req.target_id).await?;
    Ok((StatusCode::OK, Json(outcome)))
}

async fn kill(
    State(state): State<AppState>,
    Path(killer_id): Path<u32>,
    Json(req): Json<TargetRequest>,
) -> Result<impl IntoResponse, GameError> {
    let target = player_service::kill(&state, killer_id, req.target_id).await?;
    Ok((StatusCode::OK, Json(target)))
}

async fn tally(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(player_service::tally(&state).await))
}

async fn clear_votes(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(player_service::clear_votes(&state).await))
}

async fn round_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(player_service::round_status(&state).await))
}
