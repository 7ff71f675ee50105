use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::models::player::Player;
use crate::models::round::{RoundPhase, TallyReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    pub voter_id: u32,
    pub target_id: u32,
}

/// Ballot book-keeping for the current round.
///
/// Per-player counters (`has_voted`, `votes_received`) live on the players themselves so
/// the roster snapshot carries them; the ledger owns the round lifecycle and the list of
/// ballots cast since the round opened.
#[derive(Debug, Clone)]
pub struct VoteLedger {
    round: u32,
    phase: RoundPhase,
    ballots: Vec<Ballot>,
    last_tally: Option<TallyReport>,
}

impl Default for VoteLedger {
    fn default() -> Self {
        Self {
            round: 1,
            phase: RoundPhase::Open,
            ballots: Vec::new(),
            last_tally: None,
        }
    }
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn last_tally(&self) -> Option<&TallyReport> {
        self.last_tally.as_ref()
    }

    /// Applies one ballot. Both counters change together or not at all.
    ///
    /// Callers validate the rules (alive voter, no double vote); this only guards
    /// against ids that are not on the roster.
    pub fn record(&mut self, players: &mut [Player], voter_id: u32, target_id: u32) -> GameResult<()> {
        let voter = index_of(players, voter_id)?;
        let target = index_of(players, target_id)?;

        self.open_round();
        players[target].votes_received += 1;
        players[voter].has_voted = true;
        self.ballots.push(Ballot {
            voter_id,
            target_id,
        });
        Ok(())
    }

    /// True once every alive player has cast a ballot this round.
    pub fn everyone_voted(&self, players: &[Player]) -> bool {
        let mut alive = players.iter().filter(|p| p.is_alive).peekable();
        alive.peek().is_some() && alive.all(|p| p.has_voted)
    }

    /// Resolves the round: the alive players tied at the highest non-zero count are
    /// eliminated, then every ballot counter is reset.
    pub fn tally(&mut self, players: &mut [Player]) -> TallyReport {
        self.open_round();
        let mut groups: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for player in players.iter().filter(|p| p.is_alive) {
            groups
                .entry(player.votes_received)
                .or_default()
                .push(player.id);
        }

        let (top_votes, eliminated) = match groups.into_iter().next_back() {
            Some((count, ids)) if count > 0 => (count, ids),
            Some((count, _)) => (count, Vec::new()),
            None => (0, Vec::new()),
        };

        for player in players.iter_mut() {
            if eliminated.contains(&player.id) {
                player.is_alive = false;
            }
            player.reset_ballot();
        }

        let report = TallyReport {
            round: self.round,
            top_votes,
            eliminated,
            resolved_at: Utc::now(),
        };
        self.ballots.clear();
        self.phase = RoundPhase::Resolved;
        self.last_tally = Some(report.clone());
        report
    }

    /// Takes back every ballot involving a player who is leaving the session.
    ///
    /// Ballots cast by the player no longer count for their target. Ballots cast for the
    /// player are dropped and their voters may vote again.
    pub fn withdraw(&mut self, players: &mut [Player], player_id: u32) {
        let (involved, kept): (Vec<Ballot>, Vec<Ballot>) = self
            .ballots
            .drain(..)
            .partition(|b| b.voter_id == player_id || b.target_id == player_id);
        self.ballots = kept;

        for ballot in involved {
            for player in players.iter_mut() {
                if player.id == ballot.target_id && ballot.voter_id == player_id {
                    player.votes_received = player.votes_received.saturating_sub(1);
                }
                if player.id == ballot.voter_id && ballot.target_id == player_id {
                    player.has_voted = false;
                }
            }
        }
    }

    /// Wipes the ballot without eliminating anyone.
    pub fn clear(&mut self, players: &mut [Player]) {
        for player in players.iter_mut() {
            player.reset_ballot();
        }
        self.ballots.clear();
        self.phase = RoundPhase::Cleared;
    }

    fn open_round(&mut self) {
        match self.phase {
            RoundPhase::Open => {}
            RoundPhase::Resolved => {
                self.round += 1;
                self.phase = RoundPhase::Open;
            }
            RoundPhase::Cleared => self.phase = RoundPhase::Open,
        }
    }
}

fn index_of(players: &[Player], id: u32) -> GameResult<usize> {
    players
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| GameError::InvalidArgument(format!("player {} does not exist", id)))
}
