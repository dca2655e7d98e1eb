use skullking_core::game::engine::{
    RoundOutcome, extend_game, goto_round, running_total, submit_scores, summarize,
};
use skullking_core::game::serialization::GameSnapshot;
use skullking_core::game::sheet::{BidSheet, ScoreSheet};
use skullking_core::game::state::GameState;
use skullking_core::history::{GameStamp, History, MemoryStore};
use skullking_core::model::player::{Roster, parse_round_count};
use skullking_core::model::round::RoundStatus;

fn new_game(names: &[&str], rounds: &str) -> GameState {
    let players = Roster::from_names(names)
        .expect("valid names")
        .into_players()
        .expect("enough players");
    GameState::new(players, parse_round_count(rounds))
}

fn enter_bids(state: &GameState, bids: &[(&str, u32)]) -> GameState {
    let mut sheet = BidSheet::for_round(state, state.current_round());
    for (name, bid) in bids {
        sheet.set(name, *bid);
    }
    sheet.apply(state)
}

#[test]
fn two_player_single_round_game() {
    let state = new_game(&["Alice", "Bob"], "1");
    let state = enter_bids(&state, &[("Alice", 2), ("Bob", 0)]);
    assert_eq!(state.round_status(1), RoundStatus::Scoring);

    let mut sheet = ScoreSheet::for_round(&state, 1);
    sheet.toggle_made_bid("Alice");
    let outcome = submit_scores(&state, &sheet);

    let RoundOutcome::Finished { state, standings } = outcome else {
        panic!("one-round game finishes after round 1");
    };
    assert!(state.is_complete());
    assert_eq!(state.cell("Alice", 1).to_string(), "40");
    assert_eq!(state.cell("Bob", 1).to_string(), "-10");
    assert_eq!(standings[0].name, "Alice");
    assert_eq!(standings[0].total_score, 40);
    assert_eq!(standings[1].total_score, -10);
}

#[test]
fn extending_at_the_final_round_adds_exactly_one_round() {
    let mut state = new_game(&["Alice", "Bob", "Cara"], "2");
    for round in 1..=2 {
        state = enter_bids(&state, &[("Alice", round), ("Bob", 0), ("Cara", 1)]);
        let mut sheet = ScoreSheet::for_round(&state, round);
        sheet.toggle_made_bid("Alice");
        if round == 1 {
            state = submit_scores(&state, &sheet).into_state();
        } else {
            let round_one = state.round(1).cloned();
            assert!(round_one.is_some());
            let extended = extend_game(&state, &sheet).expect("at final round");
            assert_eq!(extended.total_rounds(), state.total_rounds() + 1);
            assert_eq!(extended.current_round(), 3);
            assert_eq!(extended.round(1), round_one.as_ref());
            assert_eq!(extended.round_status(2), RoundStatus::Completed);
            assert_eq!(extended.round_status(3), RoundStatus::NotStarted);
            state = extended;
        }
    }
    assert_eq!(running_total(&state, "Alice", state.total_rounds()), 20 + 40);
    assert!(!state.is_complete());
}

#[test]
fn navigating_away_and_back_preserves_round_data() {
    let mut state = new_game(&["Alice", "Bob"], "5");
    for round in 1..=3 {
        state = goto_round(&state, round);
        state = enter_bids(&state, &[("Alice", 1), ("Bob", round)]);
        let mut sheet = ScoreSheet::for_round(&state, round);
        sheet.adjust_bonus("Bob", 10);
        state = sheet.apply(&state);
    }
    state = goto_round(&state, 3);
    let round_three = state.round(3).cloned();
    let before = serde_json::to_string(&round_three).unwrap();

    let sheet = BidSheet::for_round(&state, 3);
    let (state, sheet) = sheet.navigate(&state, 1);
    assert_eq!(state.current_round(), 1);
    assert_eq!(sheet.bid("Bob"), Some(1));

    let (state, sheet) = sheet.navigate(&state, 3);
    assert_eq!(state.current_round(), 3);
    assert_eq!(sheet.bid("Bob"), Some(3));
    let after = serde_json::to_string(&state.round(3).cloned()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn navigating_to_an_unplayed_round_shows_zero_bids() {
    let state = new_game(&["Alice", "Bob"], "4");
    let mut sheet = BidSheet::for_round(&state, 1);
    sheet.adjust("Alice", 1);
    let (state, sheet) = sheet.navigate(&state, 4);
    assert!(sheet.rows().iter().all(|row| row.bid == 0));
    assert_eq!(state.round(1).and_then(|r| r.bid("Alice")), Some(1));
    assert_eq!(state.round_status(4), RoundStatus::NotStarted);
}

#[test]
fn full_game_is_recorded_and_survives_snapshot() {
    let mut state = new_game(&["Alice", "Bob"], "3");
    let standings = loop {
        let round = state.current_round();
        state = enter_bids(&state, &[("Alice", 1), ("Bob", 0)]);
        let mut sheet = ScoreSheet::for_round(&state, round);
        sheet.toggle_made_bid("Bob");
        match submit_scores(&state, &sheet) {
            RoundOutcome::Next { state: next, round: next_round } => {
                assert_eq!(next_round, round + 1);
                state = next;
            }
            RoundOutcome::Finished { state: last, standings } => {
                state = last;
                break standings;
            }
            RoundOutcome::Unfinished { unscored, .. } => {
                panic!("rounds played in order, yet {unscored:?} unscored")
            }
        }
    };

    assert_eq!(standings, summarize(&state));
    assert_eq!(standings[0].name, "Bob");
    assert_eq!(standings[0].round_scores, [10, 20, 30]);
    assert_eq!(standings[1].round_scores, [-10, -10, -10]);

    let json = GameSnapshot::to_json(&state).unwrap();
    assert_eq!(GameSnapshot::load(&json).unwrap(), state);

    let mut history = History::new(MemoryStore::new());
    let report = history.record_game(
        &state,
        &standings,
        GameStamp::new("42", "2024-03-01T20:15:00Z"),
    );
    assert!(report.is_clean());
    assert_eq!(report.summary.winner, "Bob");
    assert_eq!(report.summary.winner_score, 60);
    assert_eq!(report.summary.rounds_played, 3);
    assert_eq!(history.stats().unwrap()["Alice"].total_score, -30);
}
