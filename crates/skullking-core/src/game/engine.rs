use crate::game::sheet::ScoreSheet;
use crate::game::state::GameState;
use crate::model::round::Round;
use crate::model::score::{ScoreEntry, saturate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A player's standing across the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTotalScore {
    pub name: String,
    pub total_score: i32,
    /// One value per scheduled round, zero where nothing was scored.
    pub round_scores: Vec<i32>,
}

/// Where the game goes after a round's scores are submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Next { state: GameState, round: u32 },
    /// The last round is scored but earlier rounds are not; the game stays
    /// on the last round.
    Unfinished { state: GameState, unscored: Vec<u32> },
    Finished {
        state: GameState,
        standings: Vec<PlayerTotalScore>,
    },
}

impl RoundOutcome {
    pub fn state(&self) -> &GameState {
        match self {
            RoundOutcome::Next { state, .. }
            | RoundOutcome::Unfinished { state, .. }
            | RoundOutcome::Finished { state, .. } => state,
        }
    }

    pub fn into_state(self) -> GameState {
        match self {
            RoundOutcome::Next { state, .. }
            | RoundOutcome::Unfinished { state, .. }
            | RoundOutcome::Finished { state, .. } => state,
        }
    }
}

/// Score every player who has bid in `round`. Inputs already entered for a
/// player are kept (with the bid taken from the round's bids); everyone else
/// is scored as a missed bid with no tricks and no bonus.
pub fn finalize_round(round: &Round, round_number: u32) -> Round {
    let mut scored = round.clone();
    for (player, &bid) in round.bids() {
        let entry = match round.score(player) {
            Some(existing) => ScoreEntry { bid, ..*existing },
            None => ScoreEntry::new(bid),
        };
        scored.record_score(player, entry.scored(round_number));
    }
    scored
}

/// Copy of `state` pointing at `target`. Round data is untouched, and a
/// target outside `1..=total_rounds` leaves the current round as it was.
pub fn goto_round(state: &GameState, target: u32) -> GameState {
    let mut next = state.clone();
    if !(1..=state.total_rounds()).contains(&target) {
        return next;
    }
    debug!(from = state.current_round(), to = target, "navigating rounds");
    next.set_current_round(target);
    next
}

/// Store the sheet's scores and move on: to the next round if one remains,
/// otherwise to the final standings once every round is scored.
pub fn submit_scores(state: &GameState, sheet: &ScoreSheet) -> RoundOutcome {
    let round_number = sheet.round_number();
    let scored = sheet.apply(state);
    if round_number < scored.total_rounds() {
        let next_round = round_number + 1;
        debug!(round = round_number, next_round, "round scored");
        RoundOutcome::Next {
            state: goto_round(&scored, next_round),
            round: next_round,
        }
    } else if !scored.is_complete() {
        let unscored = scored.unscored_rounds();
        debug!(round = round_number, ?unscored, "final round scored early");
        RoundOutcome::Unfinished {
            state: scored,
            unscored,
        }
    } else {
        let standings = summarize(&scored);
        debug!(
            round = round_number,
            winner = ?standings.first().map(|s| s.name.as_str()),
            "final round scored"
        );
        RoundOutcome::Finished {
            state: scored,
            standings,
        }
    }
}

/// "Play another round" from the last scheduled round: score what the sheet
/// holds, add a round and move onto it. Returns `None` anywhere else.
pub fn extend_game(state: &GameState, sheet: &ScoreSheet) -> Option<GameState> {
    if !state.is_final_round() || sheet.round_number() != state.current_round() {
        return None;
    }
    let mut extended = sheet.apply(state).extend_rounds();
    let new_last = extended.total_rounds();
    extended.set_current_round(new_last);
    debug!(total_rounds = new_last, "game extended");
    Some(extended)
}

/// Points `player` has accumulated over rounds `1..=up_to_round`.
pub fn running_total(state: &GameState, player: &str, up_to_round: u32) -> i32 {
    let total = (1..=up_to_round)
        .filter_map(|n| state.round(n).and_then(|round| round.total_points(player)))
        .map(i64::from)
        .sum::<i64>();
    saturate(total)
}

/// Standings, best first. Equal totals keep player order.
pub fn summarize(state: &GameState) -> Vec<PlayerTotalScore> {
    let mut standings: Vec<PlayerTotalScore> = state
        .players()
        .iter()
        .map(|name| {
            let round_scores: Vec<i32> = (1..=state.total_rounds())
                .map(|n| {
                    state
                        .round(n)
                        .and_then(|round| round.total_points(name))
                        .unwrap_or(0)
                })
                .collect();
            PlayerTotalScore {
                name: name.clone(),
                total_score: saturate(round_scores.iter().copied().map(i64::from).sum()),
                round_scores,
            }
        })
        .collect();
    standings.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    standings
}

pub fn winner(standings: &[PlayerTotalScore]) -> Option<&PlayerTotalScore> {
    standings.first()
}
