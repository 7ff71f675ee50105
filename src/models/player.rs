use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub avatar: Option<String>,
    pub is_murderer: bool,
    pub is_alive: bool,
    pub has_voted: bool,
    pub votes_received: u32,
}

impl Player {
    pub fn new(id: u32, name: String, avatar: Option<String>, is_murderer: bool) -> Self {
        Self {
            id,
            name,
            avatar,
            is_murderer,
            is_alive: true,
            has_voted: false,
            votes_received: 0,
        }
    }

    /// Clears the per-round ballot counters.
    pub fn reset_ballot(&mut self) {
        self.has_voted = false;
        self.votes_received = 0;
    }
}

/// Request body for creating or updating a player.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_murderer: bool,
}

impl PlayerRecord {
    pub fn new(name: &str, is_murderer: bool) -> Self {
        Self {
            id: None,
            name: Some(name.to_string()),
            avatar: None,
            is_murderer,
        }
    }

    /// Validated name, or `InvalidArgument` when it is missing or blank.
    pub fn required_name(&self) -> GameResult<String> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(GameError::InvalidArgument("name is required".to_string())),
        }
    }

    /// Builds a fresh player under the given id.
    pub fn into_player(self, id: u32) -> GameResult<Player> {
        let name = self.required_name()?;
        Ok(Player::new(id, name, self.avatar, self.is_murderer))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRequest {
    pub target_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_without_name_is_rejected() {
        let record = PlayerRecord {
            name: None,
            ..PlayerRecord::default()
        };
        assert!(matches!(
            record.into_player(1),
            Err(GameError::InvalidArgument(_))
        ));

        let blank = PlayerRecord::new("   ", false);
        assert!(blank.into_player(1).is_err());
    }

    #[test]
    fn new_player_starts_alive_with_clean_ballot() {
        let player = PlayerRecord::new("Ann", false).into_player(7).unwrap();
        assert_eq!(player.id, 7);
        assert_eq!(player.name, "Ann");
        assert!(player.is_alive);
        assert!(!player.has_voted);
        assert_eq!(player.votes_received, 0);
    }

    #[test]
    fn serializes_in_camel_case() {
        let player = Player::new(1, "Ann".to_string(), None, true);
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["isMurderer"], true);
        assert_eq!(json["isAlive"], true);
        assert_eq!(json["votesReceived"], 0);

        let record: PlayerRecord =
            serde_json::from_str(r#"{"name":"Bo","isMurderer":true}"#).unwrap();
        assert_eq!(record.id, None);
        assert!(record.is_murderer);
    }
}
