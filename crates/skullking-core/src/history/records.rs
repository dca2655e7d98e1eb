use crate::game::engine::PlayerTotalScore;
use crate::game::state::GameState;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Identity and timestamp given to a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStamp {
    pub id: String,
    /// RFC 3339 / ISO-8601.
    pub date: String,
}

impl GameStamp {
    pub fn new(id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
        }
    }

    /// Stamp for "now": a millisecond id with a random suffix and a UTC date.
    pub fn now() -> Result<Self, time::error::Format> {
        let now = OffsetDateTime::now_utc();
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        let suffix: u16 = rand::random();
        Ok(Self {
            id: format!("{millis}-{suffix:04x}"),
            date: now.format(&Rfc3339)?,
        })
    }
}

/// One line of the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: String,
    pub date: String,
    pub players: Vec<String>,
    pub winner: String,
    pub winner_score: i32,
    pub rounds_played: u32,
}

impl GameSummary {
    pub fn new(state: &GameState, standings: &[PlayerTotalScore], stamp: GameStamp) -> Self {
        let (winner, winner_score) = standings
            .first()
            .map(|top| (top.name.clone(), top.total_score))
            .unwrap_or_else(|| ("Unknown".to_string(), 0));
        Self {
            id: stamp.id,
            date: stamp.date,
            players: state.players().to_vec(),
            winner,
            winner_score,
            rounds_played: state.total_rounds(),
        }
    }

    pub(crate) fn timestamp(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.date, &Rfc3339).ok()
    }
}

/// Lifetime record for one player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
    pub total_score: i64,
}

impl PlayerStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            losses: 0,
            games_played: 0,
            total_score: 0,
        }
    }

    /// Fold in exactly one finished game.
    pub fn record(&mut self, score: i32, won: bool) {
        self.games_played += 1;
        self.total_score += i64::from(score);
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn view(&self) -> PlayerStatsView {
        let win_rate = if self.games_played > 0 {
            f64::from(self.wins) / f64::from(self.games_played) * 100.0
        } else {
            0.0
        };
        let average_score = if self.wins > 0 {
            self.total_score as f64 / f64::from(self.wins)
        } else {
            0.0
        };
        PlayerStatsView {
            stats: self.clone(),
            win_rate,
            average_score,
        }
    }
}

/// Stats plus the figures the stats table shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsView {
    #[serde(flatten)]
    pub stats: PlayerStats,
    /// Percentage of played games that were won.
    pub win_rate: f64,
    /// Total score divided by games won.
    pub average_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::engine::summarize;

    #[test]
    fn summary_takes_winner_from_standings() {
        let state = GameState::new(vec!["A".into(), "B".into()], 4);
        let standings = summarize(&state);
        let summary = GameSummary::new(&state, &standings, GameStamp::new("1", "2024-01-01T00:00:00Z"));
        assert_eq!(summary.winner, "A");
        assert_eq!(summary.winner_score, 0);
        assert_eq!(summary.rounds_played, 4);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"winnerScore\":0"));
        assert!(json.contains("\"roundsPlayed\":4"));
    }

    #[test]
    fn summary_without_standings_names_unknown_winner() {
        let state = GameState::new(vec![], 1);
        let summary = GameSummary::new(&state, &[], GameStamp::new("1", "x"));
        assert_eq!(summary.winner, "Unknown");
        assert!(summary.timestamp().is_none());
    }

    #[test]
    fn stats_record_one_game_at_a_time() {
        let mut stats = PlayerStats::new("A");
        stats.record(120, true);
        stats.record(-30, false);
        stats.record(60, true);
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.total_score, 150);

        let view = stats.view();
        assert!((view.win_rate - 200.0 / 3.0).abs() < 1e-9);
        assert!((view.average_score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn stats_view_handles_no_games() {
        let view = PlayerStats::new("A").view();
        assert_eq!(view.win_rate, 0.0);
        assert_eq!(view.average_score, 0.0);
    }

    #[test]
    fn generated_stamp_is_rfc3339() {
        let stamp = GameStamp::now().unwrap();
        assert!(OffsetDateTime::parse(&stamp.date, &Rfc3339).is_ok());
        assert!(stamp.id.contains('-'));
    }
}
