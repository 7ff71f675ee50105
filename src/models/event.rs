use super::player::Player;

/// Terminal events that carry a roster snapshot for live-view clients.
#[derive(Clone, Debug)]
pub enum GameEvent {
    RoundResolved {
        round: u32,
        eliminated: Vec<u32>,
        roster: Vec<Player>,
    },
    PlayerKilled {
        killer_id: u32,
        target_id: u32,
        roster: Vec<Player>,
    },
}

impl GameEvent {
    pub fn roster(&self) -> &[Player] {
        match self {
            GameEvent::RoundResolved { roster, .. } => roster,
            GameEvent::PlayerKilled { roster, .. } => roster,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::RoundResolved { .. } => "round_resolved",
            GameEvent::PlayerKilled { .. } => "player_killed",
        }
    }
}
