use anyhow::{Context, Result, bail, ensure};
use skullking_core::game::engine::{RoundOutcome, extend_game, goto_round, submit_scores, summarize};
use skullking_core::game::sheet::{BidSheet, ScoreSheet};
use skullking_core::game::state::GameState;
use skullking_core::history::{GameStamp, History, KeyValueStore};
use skullking_core::model::player::{Roster, parse_round_count};
use tracing::{info, warn};

use crate::cli::{BidEntry, Command, ResultEntry, Tricks};
use crate::render;
use crate::session;

/// Execute one command against `store` and return what should be printed.
pub fn run<S: KeyValueStore>(command: Command, store: &mut S, default_rounds: u32) -> Result<String> {
    match command {
        Command::New {
            players,
            rounds,
            force,
        } => new_game(store, players, rounds.as_deref(), force, default_rounds),
        Command::Bid { bids } => enter_bids(store, &bids),
        Command::Score { results } => score_round(store, &results),
        Command::Goto { round } => goto(store, round),
        Command::Extend { results } => extend(store, &results),
        Command::Table => {
            let state = session::require(store)?;
            Ok(format!(
                "{}\n{}",
                render::table(&state),
                render::standings(&summarize(&state))
            ))
        }
        Command::Stats => Ok(render::stats(&History::new(store).player_stats()?)),
        Command::Log => Ok(render::game_log(&History::new(store).game_log()?)),
        Command::Names => Ok(render::names(&History::new(store).saved_names()?)),
        Command::ClearLog => {
            History::new(store).clear_game_log()?;
            Ok("Game log cleared.\n".to_string())
        }
        Command::ClearStats => {
            History::new(store).clear_stats()?;
            Ok("Player statistics cleared.\n".to_string())
        }
        Command::ClearNames => {
            History::new(store).clear_saved_names()?;
            Ok("Saved names cleared.\n".to_string())
        }
    }
}

fn new_game<S: KeyValueStore>(
    store: &mut S,
    players: Vec<String>,
    rounds: Option<&str>,
    force: bool,
    default_rounds: u32,
) -> Result<String> {
    if !force && session::load(store)?.is_some() {
        bail!("a game is already in progress; pass --force to replace it");
    }
    let players = Roster::from_names(players)?.into_players()?;
    let total_rounds = rounds.map(parse_round_count).unwrap_or(default_rounds);

    let mut history = History::new(&mut *store);
    for name in &players {
        if let Err(err) = history.remember_name(name) {
            warn!(player = %name, error = %err, "could not remember player name");
        }
    }

    let state = GameState::new(players, total_rounds);
    session::save(store, &state)?;
    info!(
        players = state.players().len(),
        total_rounds = state.total_rounds(),
        "game started"
    );
    Ok(render::table(&state))
}

fn check_player(state: &GameState, name: &str) -> Result<()> {
    ensure!(
        state.players().iter().any(|player| player == name),
        "'{name}' is not playing; players are {}",
        state.players().join(", ")
    );
    Ok(())
}

fn enter_bids<S: KeyValueStore>(store: &mut S, bids: &[BidEntry]) -> Result<String> {
    let state = session::require(store)?;
    let mut sheet = BidSheet::for_round(&state, state.current_round());
    for entry in bids {
        check_player(&state, &entry.name)?;
        sheet.set(&entry.name, entry.bid);
    }
    let state = sheet.apply(&state);
    session::save(store, &state)?;
    Ok(render::table(&state))
}

/// Sheet for the current round with `results` entered. A trick count equal
/// to the bid counts as a made bid.
fn fill_score_sheet(state: &GameState, results: &[ResultEntry]) -> Result<ScoreSheet> {
    let mut sheet = ScoreSheet::for_round(state, state.current_round());
    for result in results {
        check_player(state, &result.name)?;
        let Some(entry) = sheet.entry(&result.name).copied() else {
            continue;
        };
        let made = match result.tricks {
            Tricks::Made => true,
            Tricks::Won(tricks) => {
                sheet.set_tricks_won(&result.name, tricks);
                tricks == entry.bid
            }
        };
        if made != entry.made_bid {
            sheet.toggle_made_bid(&result.name);
        }
        sheet.set_bonus(&result.name, result.bonus);
    }
    Ok(sheet)
}

fn score_round<S: KeyValueStore>(store: &mut S, results: &[ResultEntry]) -> Result<String> {
    let state = session::require(store)?;
    let round = state.current_round();
    let sheet = fill_score_sheet(&state, results)?;

    match submit_scores(&state, &sheet) {
        RoundOutcome::Next {
            state,
            round: next_round,
        } => {
            session::save(store, &state)?;
            Ok(format!(
                "Round {round} scored. Now bidding round {next_round}.\n\n{}",
                render::table(&state)
            ))
        }
        RoundOutcome::Unfinished { state, unscored } => {
            session::save(store, &state)?;
            let rounds: Vec<String> = unscored.iter().map(u32::to_string).collect();
            Ok(format!(
                "Round {round} scored, but round(s) {} still need scores. \
                 Use `goto` to score them, then score round {round} again to finish.\n\n{}",
                rounds.join(", "),
                render::table(&state)
            ))
        }
        RoundOutcome::Finished { state, standings } => {
            let stamp = GameStamp::now().context("stamping finished game")?;
            let report = History::new(&mut *store).record_game(&state, &standings, stamp);
            let mut out = format!("Game over after {} rounds.\n\n", state.total_rounds());
            out.push_str(&render::table(&state));
            out.push('\n');
            out.push_str(&render::standings(&standings));
            out.push_str(&format!(
                "\n{} wins with {} points.\n",
                report.summary.winner, report.summary.winner_score
            ));
            for failure in &report.failures {
                out.push_str(&format!("warning: history not fully saved: {failure}\n"));
            }
            session::clear(store)?;
            Ok(out)
        }
    }
}

fn goto<S: KeyValueStore>(store: &mut S, round: u32) -> Result<String> {
    let state = session::require(store)?;
    ensure!(
        (1..=state.total_rounds()).contains(&round),
        "round {round} does not exist; this game has rounds 1..={}",
        state.total_rounds()
    );
    let state = goto_round(&state, round);
    session::save(store, &state)?;
    Ok(format!(
        "Now on round {round} ({}).\n\n{}",
        state.round_status(round),
        render::table(&state)
    ))
}

fn extend<S: KeyValueStore>(store: &mut S, results: &[ResultEntry]) -> Result<String> {
    let state = session::require(store)?;
    let sheet = fill_score_sheet(&state, results)?;
    let Some(extended) = extend_game(&state, &sheet) else {
        bail!(
            "only the final round ({}) can be extended; this is round {}",
            state.total_rounds(),
            state.current_round()
        );
    };
    session::save(store, &extended)?;
    Ok(format!(
        "Added round {}.\n\n{}",
        extended.total_rounds(),
        render::table(&extended)
    ))
}
