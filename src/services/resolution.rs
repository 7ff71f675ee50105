use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::models::event::GameEvent;
use crate::models::player::{Player, PlayerRecord};
use crate::models::round::{RoundStatus, TallyReport};
use crate::services::ledger::VoteLedger;
use crate::services::registry::PlayerRegistry;

/// Value produced by a mutating operation, plus the events it raised.
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub events: Vec<GameEvent>,
}

impl<T> Applied<T> {
    fn quiet(value: T) -> Self {
        Self {
            value,
            events: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub voter: Player,
    pub tally: Option<TallyReport>,
}

/// One game instance: the roster and its ballot.
///
/// Every method runs to completion without I/O, so holding the session lock across a
/// call makes the whole lookup-validate-mutate sequence a single step.
#[derive(Debug, Default)]
pub struct Session {
    registry: PlayerRegistry,
    ledger: VoteLedger,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        self.registry.get_all()
    }

    pub fn player(&self, id: u32) -> GameResult<Player> {
        self.registry.get_by_id(id).cloned()
    }

    pub fn add_player(&mut self, record: PlayerRecord) -> GameResult<Player> {
        self.registry.add(record)
    }

    pub fn update_player(&mut self, id: u32, record: Option<PlayerRecord>) -> GameResult<Player> {
        self.registry.update(id, record)
    }

    pub fn remove_player(&mut self, id: u32) -> GameResult<Player> {
        self.registry.get_by_id(id)?;
        self.ledger.withdraw(self.registry.players_mut(), id);
        self.registry.remove(id)
    }

    pub fn vote(&mut self, voter_id: u32, target_id: u32) -> GameResult<Applied<VoteOutcome>> {
        let voter = self.participant(voter_id, "voter")?;
        let target = self.participant(target_id, "target")?;

        if !voter.is_alive {
            return Err(GameError::InvalidOperation(format!(
                "{} is dead and cannot vote",
                voter.name
            )));
        }
        if voter.has_voted {
            return Err(GameError::InvalidOperation(format!(
                "{} has already voted this round",
                voter.name
            )));
        }
        if !target.is_alive {
            return Err(GameError::InvalidOperation(format!(
                "{} is dead and cannot be voted for",
                target.name
            )));
        }

        self.ledger
            .record(self.registry.players_mut(), voter_id, target_id)?;
        log::debug!(
            "round {}: player {} voted for player {}",
            self.ledger.round(),
            voter_id,
            target_id
        );

        let mut events = Vec::new();
        let tally = if self.ledger.everyone_voted(self.registry.get_all()) {
            let applied = self.tally();
            events = applied.events;
            Some(applied.value)
        } else {
            None
        };

        Ok(Applied {
            value: VoteOutcome {
                voter: self.player(voter_id)?,
                tally,
            },
            events,
        })
    }

    /// Resolves the current round with whatever ballots have been cast.
    pub fn tally(&mut self) -> Applied<TallyReport> {
        let report = self.ledger.tally(self.registry.players_mut());
        log::info!(
            "round {} resolved: top votes {}, eliminated {:?}",
            report.round,
            report.top_votes,
            report.eliminated
        );

        let event = GameEvent::RoundResolved {
            round: report.round,
            eliminated: report.eliminated.clone(),
            roster: self.registry.get_all().to_vec(),
        };
        Applied {
            value: report,
            events: vec![event],
        }
    }

    /// Out-of-band elimination by a living murderer. The ballot is left alone.
    pub fn kill(&mut self, killer_id: u32, target_id: u32) -> GameResult<Applied<Player>> {
        let killer = self.participant(killer_id, "killer")?;
        let target = self.participant(target_id, "target")?;

        if !killer.is_murderer {
            return Err(GameError::InvalidOperation(format!(
                "{} is not a murderer",
                killer.name
            )));
        }
        if !killer.is_alive {
            return Err(GameError::InvalidOperation(format!(
                "{} is dead and cannot kill",
                killer.name
            )));
        }
        if killer_id == target_id {
            return Err(GameError::InvalidOperation(
                "a murderer cannot kill themselves".to_string(),
            ));
        }
        if !target.is_alive {
            return Err(GameError::InvalidOperation(format!(
                "{} is already dead",
                target.name
            )));
        }

        let victim = self.registry.get_mut(target_id)?;
        victim.is_alive = false;
        let victim = victim.clone();
        log::info!("player {} was killed by player {}", target_id, killer_id);

        Ok(Applied {
            value: victim,
            events: vec![GameEvent::PlayerKilled {
                killer_id,
                target_id,
                roster: self.registry.get_all().to_vec(),
            }],
        })
    }

    pub fn clear_votes(&mut self) -> Applied<Vec<Player>> {
        self.ledger.clear(self.registry.players_mut());
        log::info!("round {} ballot cleared", self.ledger.round());
        Applied::quiet(self.registry.get_all().to_vec())
    }

    pub fn status(&self) -> RoundStatus {
        RoundStatus {
            round: self.ledger.round(),
            phase: self.ledger.phase(),
            ballots_cast: self.ledger.ballots().len(),
            alive_players: self.registry.alive_count(),
            last_tally: self.ledger.last_tally().cloned(),
        }
    }

    fn participant(&self, id: u32, role: &str) -> GameResult<Player> {
        self.registry
            .get_by_id(id)
            .cloned()
            .map_err(|_| GameError::InvalidArgument(format!("{} {} does not exist", role, id)))
    }
}
