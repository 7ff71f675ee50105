use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Open,     // ballots accepted
    Resolved, // tally applied, next ballot opens a new round
    Cleared,  // ballots wiped without elimination
}

/// Result of resolving one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyReport {
    pub round: u32,
    pub top_votes: u32,
    pub eliminated: Vec<u32>,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStatus {
    pub round: u32,
    pub phase: RoundPhase,
    pub ballots_cast: usize,
    pub alive_players: usize,
    pub last_tally: Option<TallyReport>,
}
