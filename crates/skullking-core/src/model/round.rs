use crate::model::score::ScoreEntry;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bids and scores recorded for one round, keyed by player name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    #[serde(default)]
    bids: BTreeMap<String, u32>,
    #[serde(default)]
    scores: BTreeMap<String, ScoreEntry>,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bids(&self) -> &BTreeMap<String, u32> {
        &self.bids
    }

    pub fn scores(&self) -> &BTreeMap<String, ScoreEntry> {
        &self.scores
    }

    pub fn bid(&self, player: &str) -> Option<u32> {
        self.bids.get(player).copied()
    }

    pub fn score(&self, player: &str) -> Option<&ScoreEntry> {
        self.scores.get(player)
    }

    /// Resolved points for `player`, if this round has scored them.
    pub fn total_points(&self, player: &str) -> Option<i32> {
        self.scores.get(player).and_then(|entry| entry.total_points)
    }

    pub fn set_bid(&mut self, player: &str, bid: u32) {
        self.bids.insert(player.to_string(), bid);
    }

    /// Store a score entry. Scores depend on the bid, so the write is refused
    /// (and `false` returned) while `player` has no bid in this round.
    pub fn record_score(&mut self, player: &str, entry: ScoreEntry) -> bool {
        if !self.bids.contains_key(player) {
            return false;
        }
        self.scores.insert(player.to_string(), entry);
        true
    }

    /// Every listed player holds a resolved total.
    pub fn is_scored_for(&self, players: &[String]) -> bool {
        players
            .iter()
            .all(|player| self.total_points(player).is_some())
    }
}

/// Progress of a round, derived from how many bids and scores it holds.
///
/// Never stored: recomputing it from the counts keeps it in step with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundStatus {
    NotStarted,
    Bidding,
    Scoring,
    Completed,
}

impl RoundStatus {
    pub fn of(round: Option<&Round>, player_count: usize) -> Self {
        let Some(round) = round else {
            return RoundStatus::NotStarted;
        };
        if round.scores.len() >= player_count {
            RoundStatus::Completed
        } else if round.bids.len() >= player_count {
            RoundStatus::Scoring
        } else {
            RoundStatus::Bidding
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RoundStatus::NotStarted => "not-started",
            RoundStatus::Bidding => "bidding",
            RoundStatus::Scoring => "scoring",
            RoundStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the score table shows for one player in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundCell {
    Empty,
    Bid(u32),
    Points(i32),
}

impl RoundCell {
    pub fn of(round: Option<&Round>, player: &str, player_count: usize) -> Self {
        let Some(round) = round else {
            return RoundCell::Empty;
        };
        match RoundStatus::of(Some(round), player_count) {
            RoundStatus::Completed => {
                if let Some(points) = round.total_points(player) {
                    return RoundCell::Points(points);
                }
            }
            RoundStatus::Bidding | RoundStatus::Scoring => {
                if let Some(bid) = round.bid(player) {
                    return RoundCell::Bid(bid);
                }
            }
            RoundStatus::NotStarted => {}
        }
        RoundCell::Empty
    }
}

impl fmt::Display for RoundCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundCell::Empty => f.write_str("-"),
            RoundCell::Bid(bid) => write!(f, "B:{bid}"),
            RoundCell::Points(points) => write!(f, "{points}"),
        }
    }
}
