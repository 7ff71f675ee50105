use crate::{
    error::GameResult,
    models::{
        player::{Player, PlayerRecord},
        round::{RoundStatus, TallyReport},
    },
    services::resolution::{Applied, VoteOutcome},
    state::AppState,
};

pub async fn get_players(state: &AppState) -> Vec<Player> {
    state.session.read().await.players().to_vec()
}

pub async fn get_player(state: &AppState, player_id: u32) -> GameResult<Player> {
    state.session.read().await.player(player_id)
}

pub async fn create_player(state: &AppState, record: PlayerRecord) -> GameResult<Player> {
    let player = state.session.write().await.add_player(record)?;
    log::info!("player {} ({}) joined", player.id, player.name);
    Ok(player)
}

pub async fn update_player(
    state: &AppState,
    player_id: u32,
    record: Option<PlayerRecord>,
) -> GameResult<Player> {
    state.session.write().await.update_player(player_id, record)
}

pub async fn remove_player(state: &AppState, player_id: u32) -> GameResult<Player> {
    let player = state.session.write().await.remove_player(player_id)?;
    log::info!("player {} ({}) removed", player.id, player.name);
    Ok(player)
}

pub async fn cast_vote(state: &AppState, voter_id: u32, target_id: u32) -> GameResult<VoteOutcome> {
    let applied = state.session.write().await.vote(voter_id, target_id)?;
    Ok(publish(state, applied))
}

pub async fn kill(state: &AppState, killer_id: u32, target_id: u32) -> GameResult<Player> {
    let applied = state.session.write().await.kill(killer_id, target_id)?;
    Ok(publish(state, applied))
}

pub async fn tally(state: &AppState) -> TallyReport {
    let applied = state.session.write().await.tally();
    publish(state, applied)
}

pub async fn clear_votes(state: &AppState) -> Vec<Player> {
    let applied = state.session.write().await.clear_votes();
    publish(state, applied)
}

pub async fn round_status(state: &AppState) -> RoundStatus {
    state.session.read().await.status()
}

// The session guard is already released here; sending never holds the lock.
fn publish<T>(state: &AppState, applied: Applied<T>) -> T {
    state.notifier.dispatch(applied.events);
    applied.value
}
