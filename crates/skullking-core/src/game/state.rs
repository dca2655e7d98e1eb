use crate::model::round::{Round, RoundCell, RoundStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything known about one game in progress.
///
/// Engine operations never mutate a state that other code might still be
/// reading: they clone, change the clone and hand it back.
///
/// Only serialized here; decoding goes through
/// [`crate::game::serialization::GameSnapshot`] so the invariants get checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    players: Vec<String>,
    total_rounds: u32,
    current_round: u32,
    rounds: BTreeMap<u32, Round>,
}

impl GameState {
    /// Start a game. `players` is expected to have been vetted by
    /// [`crate::model::player::Roster`].
    pub fn new(players: Vec<String>, total_rounds: u32) -> Self {
        Self {
            players,
            total_rounds: total_rounds.max(1),
            current_round: 1,
            rounds: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        players: Vec<String>,
        total_rounds: u32,
        current_round: u32,
        rounds: BTreeMap<u32, Round>,
    ) -> Self {
        Self {
            players,
            total_rounds,
            current_round,
            rounds,
        }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn rounds(&self) -> &BTreeMap<u32, Round> {
        &self.rounds
    }

    pub fn round(&self, round_number: u32) -> Option<&Round> {
        self.rounds.get(&round_number)
    }

    /// Round record for `round_number`, inserting an empty one if the round
    /// has not been started.
    pub fn ensure_round(&mut self, round_number: u32) -> &mut Round {
        self.rounds.entry(round_number).or_default()
    }

    pub(crate) fn replace_round(&mut self, round_number: u32, round: Round) {
        self.rounds.insert(round_number, round);
    }

    pub(crate) fn set_current_round(&mut self, round_number: u32) {
        self.current_round = round_number;
    }

    /// Copy of this game with one more round on the schedule. The current
    /// round is left alone.
    pub fn extend_rounds(&self) -> GameState {
        let mut next = self.clone();
        next.total_rounds += 1;
        next
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round == self.total_rounds
    }

    pub fn round_status(&self, round_number: u32) -> RoundStatus {
        RoundStatus::of(self.round(round_number), self.players.len())
    }

    pub fn cell(&self, player: &str, round_number: u32) -> RoundCell {
        RoundCell::of(self.round(round_number), player, self.players.len())
    }

    /// All scheduled rounds hold a resolved score for every player.
    pub fn is_complete(&self) -> bool {
        self.unscored_rounds().is_empty()
    }

    /// Scheduled rounds still missing a resolved score for some player.
    pub fn unscored_rounds(&self) -> Vec<u32> {
        (1..=self.total_rounds)
            .filter(|&round_number| {
                !self
                    .round(round_number)
                    .is_some_and(|round| round.is_scored_for(&self.players))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::model::round::RoundStatus;
    use crate::model::score::ScoreEntry;

    fn two_player_game(rounds: u32) -> GameState {
        GameState::new(vec!["Alice".into(), "Bob".into()], rounds)
    }

    #[test]
    fn new_game_starts_at_round_one_with_no_rounds() {
        let state = two_player_game(5);
        assert_eq!(state.current_round(), 1);
        assert_eq!(state.total_rounds(), 5);
        assert!(state.rounds().is_empty());
        assert_eq!(state.round_status(1), RoundStatus::NotStarted);
    }

    #[test]
    fn total_rounds_is_at_least_one() {
        assert_eq!(two_player_game(0).total_rounds(), 1);
    }

    #[test]
    fn ensure_round_inserts_once() {
        let mut state = two_player_game(3);
        state.ensure_round(2).set_bid("Alice", 4);
        assert_eq!(state.ensure_round(2).bid("Alice"), Some(4));
        assert_eq!(state.rounds().len(), 1);
        assert_eq!(state.round_status(2), RoundStatus::Bidding);
    }

    #[test]
    fn extend_rounds_leaves_original_and_current_round() {
        let state = two_player_game(3);
        let extended = state.extend_rounds();
        assert_eq!(state.total_rounds(), 3);
        assert_eq!(extended.total_rounds(), 4);
        assert_eq!(extended.current_round(), 1);
    }

    #[test]
    fn completion_requires_every_round_scored() {
        let mut state = two_player_game(1);
        assert!(!state.is_complete());
        let round = state.ensure_round(1);
        round.set_bid("Alice", 0);
        round.set_bid("Bob", 0);
        round.record_score("Alice", ScoreEntry::new(0).scored(1));
        assert!(!state.is_complete());
        state
            .ensure_round(1)
            .record_score("Bob", ScoreEntry::new(0).scored(1));
        assert!(state.is_complete());
    }

    #[test]
    fn state_json_uses_camel_case_and_string_round_keys() {
        let mut state = two_player_game(2);
        state.ensure_round(1).set_bid("Alice", 1);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"totalRounds\":2"));
        assert!(json.contains("\"currentRound\":1"));
        assert!(json.contains("\"rounds\":{\"1\":{\"bids\":{\"Alice\":1}"));
    }
}
