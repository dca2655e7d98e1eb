//! In-progress entry forms for a single round.
//!
//! A sheet is rehydrated from a [`GameState`], edited through the clamping
//! helpers in [`crate::model::score`], and written back into a fresh copy of
//! the state. Unknown player names are ignored.

use crate::game::state::GameState;
use crate::model::score::{self, ScoreEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBid {
    pub name: String,
    pub bid: u32,
}

/// Bids being entered for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidSheet {
    round_number: u32,
    rows: Vec<PlayerBid>,
}

impl BidSheet {
    /// Rows in player order, showing already-entered bids and zero elsewhere.
    pub fn for_round(state: &GameState, round_number: u32) -> Self {
        let round = state.round(round_number);
        let rows = state
            .players()
            .iter()
            .map(|name| PlayerBid {
                name: name.clone(),
                bid: round.and_then(|r| r.bid(name)).unwrap_or(0),
            })
            .collect();
        Self { round_number, rows }
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn rows(&self) -> &[PlayerBid] {
        &self.rows
    }

    pub fn bid(&self, player: &str) -> Option<u32> {
        self.rows.iter().find(|row| row.name == player).map(|row| row.bid)
    }

    pub fn adjust(&mut self, player: &str, delta: i32) {
        if let Some(row) = self.row_mut(player) {
            row.bid = score::adjust_bid(row.bid, delta);
        }
    }

    pub fn set(&mut self, player: &str, bid: u32) {
        if let Some(row) = self.row_mut(player) {
            row.bid = bid;
        }
    }

    /// Copy of `state` with this sheet's bids stored in its round.
    pub fn apply(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        let round = next.ensure_round(self.round_number);
        for row in &self.rows {
            round.set_bid(&row.name, row.bid);
        }
        next
    }

    /// Save this sheet and move to `target`, returning the new state and the
    /// sheet for the target round.
    pub fn navigate(&self, state: &GameState, target: u32) -> (GameState, BidSheet) {
        let saved = self.apply(state);
        let moved = crate::game::engine::goto_round(&saved, target);
        let sheet = BidSheet::for_round(&moved, target);
        (moved, sheet)
    }

    fn row_mut(&mut self, player: &str) -> Option<&mut PlayerBid> {
        self.rows.iter_mut().find(|row| row.name == player)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    #[serde(flatten)]
    pub entry: ScoreEntry,
}

/// Made-bid / tricks / bonus inputs being entered for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSheet {
    round_number: u32,
    rows: Vec<PlayerScore>,
}

impl ScoreSheet {
    /// Rows in player order. Bids come from the round's bids; earlier score
    /// inputs are kept so re-opening a scored round shows what was entered.
    pub fn for_round(state: &GameState, round_number: u32) -> Self {
        let round = state.round(round_number);
        let rows = state
            .players()
            .iter()
            .map(|name| {
                let bid = round.and_then(|r| r.bid(name)).unwrap_or(0);
                let entry = match round.and_then(|r| r.score(name)) {
                    Some(existing) => ScoreEntry {
                        bid,
                        total_points: None,
                        ..*existing
                    },
                    None => ScoreEntry::new(bid),
                };
                PlayerScore {
                    name: name.clone(),
                    entry,
                }
            })
            .collect();
        Self { round_number, rows }
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn rows(&self) -> &[PlayerScore] {
        &self.rows
    }

    pub fn entry(&self, player: &str) -> Option<&ScoreEntry> {
        self.rows
            .iter()
            .find(|row| row.name == player)
            .map(|row| &row.entry)
    }

    /// Live point value of a row as currently entered.
    pub fn preview(&self, player: &str) -> Option<i32> {
        self.entry(player)
            .map(|entry| entry.points(self.round_number))
    }

    pub fn adjust_bid(&mut self, player: &str, delta: i32) {
        self.update(player, |entry| entry.bid = score::adjust_bid(entry.bid, delta));
    }

    pub fn adjust_tricks_won(&mut self, player: &str, delta: i32) {
        self.update(player, |entry| {
            entry.tricks_won = score::adjust_tricks_won(entry.tricks_won, delta)
        });
    }

    /// Typed-in trick count.
    pub fn set_tricks_won(&mut self, player: &str, tricks_won: u32) {
        self.update(player, |entry| entry.tricks_won = tricks_won);
    }

    pub fn adjust_bonus(&mut self, player: &str, delta: i32) {
        self.update(player, |entry| {
            entry.bonus_points = score::adjust_bonus(entry.bonus_points, delta)
        });
    }

    pub fn set_bonus(&mut self, player: &str, bonus_points: i32) {
        self.update(player, |entry| entry.bonus_points = bonus_points);
    }

    pub fn toggle_made_bid(&mut self, player: &str) {
        self.update(player, |entry| *entry = entry.toggle_made_bid());
    }

    /// Copy of `state` whose round holds this sheet's bids and inputs, scored.
    pub fn apply(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        let round = next.ensure_round(self.round_number);
        for row in &self.rows {
            round.set_bid(&row.name, row.entry.bid);
            round.record_score(&row.name, row.entry);
        }
        let scored = crate::game::engine::finalize_round(round, self.round_number);
        next.replace_round(self.round_number, scored);
        next
    }

    fn update(&mut self, player: &str, edit: impl FnOnce(&mut ScoreEntry)) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.name == player) {
            edit(&mut row.entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BidSheet, ScoreSheet};
    use crate::game::state::GameState;
    use crate::model::round::RoundStatus;
    use crate::model::score::BONUS_STEP;

    fn game() -> GameState {
        GameState::new(vec!["Alice".into(), "Bob".into(), "Cara".into()], 4)
    }

    #[test]
    fn bid_sheet_starts_at_zero_and_never_goes_negative() {
        let mut sheet = BidSheet::for_round(&game(), 1);
        assert!(sheet.rows().iter().all(|row| row.bid == 0));
        sheet.adjust("Alice", -1);
        assert_eq!(sheet.bid("Alice"), Some(0));
        sheet.adjust("Alice", 1);
        sheet.adjust("Alice", 1);
        assert_eq!(sheet.bid("Alice"), Some(2));
    }

    #[test]
    fn bid_sheet_rehydrates_saved_bids() {
        let state = game();
        let mut sheet = BidSheet::for_round(&state, 2);
        sheet.set("Bob", 3);
        let state = sheet.apply(&state);
        assert_eq!(BidSheet::for_round(&state, 2).bid("Bob"), Some(3));
        assert_eq!(state.round_status(2), RoundStatus::Scoring);
    }

    #[test]
    fn unknown_players_are_ignored() {
        let mut sheet = BidSheet::for_round(&game(), 1);
        let before = sheet.clone();
        sheet.adjust("Zed", 1);
        assert_eq!(sheet, before);
    }

    #[test]
    fn score_sheet_pulls_bids_and_prior_inputs() {
        let mut state = game();
        {
            let round = state.ensure_round(1);
            round.set_bid("Alice", 2);
            round.set_bid("Bob", 1);
            round.set_bid("Cara", 0);
        }
        let mut sheet = ScoreSheet::for_round(&state, 1);
        assert_eq!(sheet.entry("Alice").map(|e| e.bid), Some(2));
        sheet.toggle_made_bid("Alice");
        sheet.adjust_bonus("Alice", BONUS_STEP);
        sheet.set_tricks_won("Bob", 3);
        let state = sheet.apply(&state);

        let reopened = ScoreSheet::for_round(&state, 1);
        let alice = reopened.entry("Alice").unwrap();
        assert!(alice.made_bid);
        assert_eq!(alice.tricks_won, 2);
        assert_eq!(alice.bonus_points, 10);
        assert_eq!(alice.total_points, None);
        assert_eq!(reopened.preview("Alice"), Some(50));
        assert_eq!(reopened.preview("Bob"), Some(-20));
    }

    #[test]
    fn score_sheet_edits_clamp() {
        let mut sheet = ScoreSheet::for_round(&game(), 1);
        sheet.adjust_tricks_won("Cara", -1);
        sheet.adjust_bid("Cara", -1);
        sheet.adjust_bonus("Cara", -BONUS_STEP);
        let cara = sheet.entry("Cara").unwrap();
        assert_eq!(cara.tricks_won, 0);
        assert_eq!(cara.bid, 0);
        assert_eq!(cara.bonus_points, -10);
    }

    #[test]
    fn applying_a_score_sheet_completes_the_round() {
        let state = game();
        let mut sheet = ScoreSheet::for_round(&state, 1);
        sheet.adjust_bid("Alice", 1);
        sheet.toggle_made_bid("Alice");
        let state = sheet.apply(&state);
        assert_eq!(state.round_status(1), RoundStatus::Completed);
        let round = state.round(1).unwrap();
        assert_eq!(round.bid("Alice"), Some(1));
        assert_eq!(round.total_points("Alice"), Some(20));
        assert_eq!(round.total_points("Bob"), Some(-10));
    }
}
