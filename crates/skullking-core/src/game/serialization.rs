use super::state::GameState;
use crate::model::player::MIN_PLAYERS;
use crate::model::round::Round;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// JSON shape of a game in progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<String>,
    pub total_rounds: u32,
    pub current_round: u32,
    #[serde(default)]
    pub rounds: BTreeMap<u32, Round>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse game JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("game needs at least {MIN_PLAYERS} players, found {0}")]
    TooFewPlayers(usize),
    #[error("player '{0}' appears more than once")]
    DuplicatePlayer(String),
    #[error("game must have at least one round")]
    NoRounds,
    #[error("current round {current_round} is outside 1..={total_rounds}")]
    CurrentRoundOutOfRange {
        current_round: u32,
        total_rounds: u32,
    },
    #[error("round {round} is outside 1..={total_rounds}")]
    RoundOutOfRange { round: u32, total_rounds: u32 },
    #[error("round {round} scores '{player}' without a bid")]
    ScoreWithoutBid { round: u32, player: String },
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        GameSnapshot {
            players: state.players().to_vec(),
            total_rounds: state.total_rounds(),
            current_round: state.current_round(),
            rounds: state.rounds().clone(),
        }
    }

    /// Rebuild the game, rejecting shapes the engine could never have produced.
    pub fn restore(self) -> Result<GameState, SnapshotError> {
        self.validate()?;
        Ok(GameState::from_parts(
            self.players,
            self.total_rounds,
            self.current_round,
            self.rounds,
        ))
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(SnapshotError::TooFewPlayers(self.players.len()));
        }
        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.as_str()) {
                return Err(SnapshotError::DuplicatePlayer(player.clone()));
            }
        }

        if self.total_rounds == 0 {
            return Err(SnapshotError::NoRounds);
        }
        if !(1..=self.total_rounds).contains(&self.current_round) {
            return Err(SnapshotError::CurrentRoundOutOfRange {
                current_round: self.current_round,
                total_rounds: self.total_rounds,
            });
        }

        for (&round, data) in &self.rounds {
            if !(1..=self.total_rounds).contains(&round) {
                return Err(SnapshotError::RoundOutOfRange {
                    round,
                    total_rounds: self.total_rounds,
                });
            }
            if let Some(player) = data
                .scores()
                .keys()
                .find(|player| data.bid(player).is_none())
            {
                return Err(SnapshotError::ScoreWithoutBid {
                    round,
                    player: player.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse and validate in one step.
    pub fn load(json: &str) -> Result<GameState, SnapshotError> {
        Self::from_json(json)?.restore()
    }
}
