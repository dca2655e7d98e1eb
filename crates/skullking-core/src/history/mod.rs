//! Finished-game log, per-player statistics and remembered names, kept as
//! JSON documents in a [`KeyValueStore`].

pub mod records;
pub mod store;

pub use records::{GameStamp, GameSummary, PlayerStats, PlayerStatsView};
pub use store::{KeyValueStore, MemoryStore, StoreError};

use crate::game::engine::PlayerTotalScore;
use crate::game::state::GameState;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, info};

pub const GAME_LOG_KEY: &str = "skullKingGameLog";
pub const STATS_KEY: &str = "skullKingStats";
pub const SAVED_NAMES_KEY: &str = "savedNames";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{key}: {source}")]
    Store {
        key: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("{key}: stored JSON is malformed: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{key}: failed to encode JSON: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of recording a finished game. The log and the stats are saved
/// independently, so one can fail while the other lands.
#[derive(Debug)]
pub struct RecordReport {
    pub summary: GameSummary,
    pub failures: Vec<HistoryError>,
}

impl RecordReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct History<S> {
    store: S,
}

impl<S: KeyValueStore> History<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Append the game to the log and fold it into every player's stats.
    ///
    /// Never touches `state`; failures are logged and returned in the report.
    pub fn record_game(
        &mut self,
        state: &GameState,
        standings: &[PlayerTotalScore],
        stamp: GameStamp,
    ) -> RecordReport {
        let summary = GameSummary::new(state, standings, stamp);
        let mut failures = Vec::new();

        if let Err(err) = self.append_log(&summary) {
            error!(game_id = %summary.id, error = %err, "failed to save game log");
            failures.push(err);
        }
        if let Err(err) = self.update_stats(state, standings, &summary.winner) {
            error!(game_id = %summary.id, error = %err, "failed to update player stats");
            failures.push(err);
        }

        info!(
            game_id = %summary.id,
            winner = %summary.winner,
            winner_score = summary.winner_score,
            rounds = summary.rounds_played,
            "game recorded"
        );
        RecordReport { summary, failures }
    }

    /// Logged games, newest first. Games with unparseable dates come last,
    /// in reverse string order.
    pub fn game_log(&self) -> Result<Vec<GameSummary>, HistoryError> {
        let mut games: Vec<GameSummary> = self.read_json(GAME_LOG_KEY)?.unwrap_or_default();
        games.sort_by_cached_key(|game| {
            let timestamp = game.timestamp();
            Reverse((timestamp.is_some(), timestamp, game.date.clone()))
        });
        Ok(games)
    }

    pub fn clear_game_log(&mut self) -> Result<(), HistoryError> {
        self.write_json(GAME_LOG_KEY, &Vec::<GameSummary>::new())
    }

    pub fn stats(&self) -> Result<BTreeMap<String, PlayerStats>, HistoryError> {
        Ok(self.read_json(STATS_KEY)?.unwrap_or_default())
    }

    /// Stats table rows, best win rate first.
    pub fn player_stats(&self) -> Result<Vec<PlayerStatsView>, HistoryError> {
        let mut rows: Vec<PlayerStatsView> =
            self.stats()?.values().map(PlayerStats::view).collect();
        rows.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
        Ok(rows)
    }

    pub fn clear_stats(&mut self) -> Result<(), HistoryError> {
        self.store
            .remove(STATS_KEY)
            .map_err(|source| HistoryError::Store {
                key: STATS_KEY,
                source,
            })
    }

    pub fn saved_names(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.read_json(SAVED_NAMES_KEY)?.unwrap_or_default())
    }

    /// Remember a name for quick entry next time. Already-known names are
    /// left where they are.
    pub fn remember_name(&mut self, name: &str) -> Result<(), HistoryError> {
        let mut names = self.saved_names()?;
        if names.iter().any(|known| known == name) {
            return Ok(());
        }
        names.push(name.to_string());
        self.write_json(SAVED_NAMES_KEY, &names)
    }

    pub fn clear_saved_names(&mut self) -> Result<(), HistoryError> {
        self.store
            .remove(SAVED_NAMES_KEY)
            .map_err(|source| HistoryError::Store {
                key: SAVED_NAMES_KEY,
                source,
            })
    }

    fn append_log(&mut self, summary: &GameSummary) -> Result<(), HistoryError> {
        let mut games: Vec<GameSummary> = self.read_json(GAME_LOG_KEY)?.unwrap_or_default();
        games.push(summary.clone());
        self.write_json(GAME_LOG_KEY, &games)
    }

    fn update_stats(
        &mut self,
        state: &GameState,
        standings: &[PlayerTotalScore],
        winner: &str,
    ) -> Result<(), HistoryError> {
        let mut stats = self.stats()?;
        for player in state.players() {
            let entry = stats
                .entry(player.clone())
                .or_insert_with(|| PlayerStats::new(player.clone()));
            if let Some(result) = standings.iter().find(|s| &s.name == player) {
                entry.record(result.total_score, player == winner);
            }
        }
        self.write_json(STATS_KEY, &stats)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, HistoryError> {
        let Some(raw) = self
            .store
            .get(key)
            .map_err(|source| HistoryError::Store { key, source })?
        else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| HistoryError::Decode { key, source })
    }

    fn write_json<T: Serialize>(&mut self, key: &'static str, value: &T) -> Result<(), HistoryError> {
        let raw =
            serde_json::to_string(value).map_err(|source| HistoryError::Encode { key, source })?;
        self.store
            .set(key, &raw)
            .map_err(|source| HistoryError::Store { key, source })
    }
}
