use crate::error::{GameError, GameResult};
use crate::models::player::{Player, PlayerRecord};

/// Canonical roster of one session, kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_all(&self) -> &[Player] {
        &self.players
    }

    pub fn get_by_id(&self, id: u32) -> GameResult<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(GameError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: u32) -> GameResult<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::NotFound(id))
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn add(&mut self, record: PlayerRecord) -> GameResult<Player> {
        let id = match record.id {
            Some(id) if self.contains(id) => {
                return Err(GameError::InvalidArgument(format!(
                    "player id {} is already taken",
                    id
                )))
            }
            Some(id) => id,
            None => self.next_id()?,
        };

        let player = record.into_player(id)?;
        self.players.push(player.clone());
        Ok(player)
    }

    /// Replaces the descriptive fields of a player. Ballot and life state stay as they are.
    pub fn update(&mut self, id: u32, record: Option<PlayerRecord>) -> GameResult<Player> {
        let record = record
            .ok_or_else(|| GameError::InvalidArgument("player state is required".to_string()))?;
        let name = record.required_name()?;
        if let Some(other) = record.id.filter(|other| *other != id) {
            return Err(GameError::InvalidArgument(format!(
                "player id cannot change from {} to {}",
                id, other
            )));
        }

        let player = self.get_mut(id)?;
        player.name = name;
        player.avatar = record.avatar;
        player.is_murderer = record.is_murderer;
        Ok(player.clone())
    }

    pub fn remove(&mut self, id: u32) -> GameResult<Player> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::NotFound(id))?;
        Ok(self.players.remove(index))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive).count()
    }

    fn next_id(&self) -> GameResult<u32> {
        match self.players.iter().map(|p| p.id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| GameError::InvalidArgument("player id space exhausted".to_string())),
        }
    }
}
