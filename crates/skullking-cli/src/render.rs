//! Plain-text views printed by the commands.

use skullking_core::game::engine::{PlayerTotalScore, running_total};
use skullking_core::game::state::GameState;
use skullking_core::history::{GameSummary, PlayerStatsView};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

const ROUND_WIDTH: usize = 7;
const MIN_COLUMN: usize = 6;

fn column_widths(state: &GameState) -> Vec<usize> {
    state
        .players()
        .iter()
        .map(|name| name.chars().count().max(MIN_COLUMN))
        .collect()
}

/// One row per round with bids or points per player, then the totals.
pub fn table(state: &GameState) -> String {
    let widths = column_widths(state);
    let mut out = String::new();

    out.push_str(&format!("{:<ROUND_WIDTH$}", "Round"));
    for (name, width) in state.players().iter().zip(widths.iter().copied()) {
        out.push_str(&format!(" {name:>width$}"));
    }
    out.push_str("  Status\n");

    for round in 1..=state.total_rounds() {
        let marker = if round == state.current_round() { ">" } else { " " };
        out.push_str(&format!("{:<ROUND_WIDTH$}", format!("{marker}{round}")));
        for (name, width) in state.players().iter().zip(widths.iter().copied()) {
            let cell = state.cell(name, round).to_string();
            out.push_str(&format!(" {cell:>width$}"));
        }
        out.push_str(&format!("  {}\n", state.round_status(round)));
    }

    out.push_str(&format!("{:<ROUND_WIDTH$}", "Total"));
    for (name, width) in state.players().iter().zip(widths.iter().copied()) {
        let total = running_total(state, name, state.total_rounds());
        out.push_str(&format!(" {total:>width$}"));
    }
    out.push('\n');
    out
}

pub fn standings(standings: &[PlayerTotalScore]) -> String {
    let mut out = String::new();
    for (place, row) in standings.iter().enumerate() {
        let rounds: Vec<String> = row.round_scores.iter().map(i32::to_string).collect();
        out.push_str(&format!(
            "{}. {} {} ({})\n",
            place + 1,
            row.name,
            row.total_score,
            rounds.join(", ")
        ));
    }
    out
}

pub fn stats(rows: &[PlayerStatsView]) -> String {
    if rows.is_empty() {
        return "No statistics yet.\n".to_string();
    }
    let name_width = rows
        .iter()
        .map(|row| row.stats.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN);
    let mut out = format!(
        "{:<name_width$} {:>5} {:>5} {:>6} {:>7} {:>8}\n",
        "Player", "Games", "Wins", "Losses", "Win %", "Avg"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<name_width$} {:>5} {:>5} {:>6} {:>6.1}% {:>8.1}\n",
            row.stats.name,
            row.stats.games_played,
            row.stats.wins,
            row.stats.losses,
            row.win_rate,
            row.average_score
        ));
    }
    out
}

/// Short form of a stored RFC 3339 stamp; unparseable dates are
/// shown as stored.
pub fn display_date(date: &str) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    OffsetDateTime::parse(date, &Rfc3339)
        .ok()
        .and_then(|parsed| parsed.format(&format).ok())
        .unwrap_or_else(|| date.to_string())
}

pub fn game_log(games: &[GameSummary]) -> String {
    if games.is_empty() {
        return "No games played yet.\n".to_string();
    }
    let mut out = String::new();
    for game in games {
        out.push_str(&format!(
            "{}  {} won with {} after {} rounds ({})\n",
            display_date(&game.date),
            game.winner,
            game.winner_score,
            game.rounds_played,
            game.players.join(", ")
        ));
    }
    out
}

pub fn names(names: &[String]) -> String {
    if names.is_empty() {
        return "No saved names.\n".to_string();
    }
    let mut out = names.join("\n");
    out.push('\n');
    out
}
