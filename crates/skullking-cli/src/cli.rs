use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

/// Score keeper for Skull King card games.
#[derive(Debug, Parser)]
#[command(name = "skullking", author, version, about = "Skull King score keeper")]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the active game and history (overrides config).
    #[arg(short, long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a new game with the given players.
    New {
        #[arg(required = true, value_name = "NAME")]
        players: Vec<String>,
        /// Number of rounds; non-digits are ignored, blank or zero means the default.
        #[arg(short, long, value_name = "TEXT")]
        rounds: Option<String>,
        /// Replace a game that is still in progress.
        #[arg(long)]
        force: bool,
    },
    /// Set bids for the current round.
    Bid {
        #[arg(required = true, value_name = "NAME=BID", value_parser = parse_bid_entry)]
        bids: Vec<BidEntry>,
    },
    /// Submit results for the current round and move on.
    Score {
        #[arg(value_name = "NAME=RESULT", value_parser = parse_result_entry)]
        results: Vec<ResultEntry>,
    },
    /// Jump to another round.
    Goto {
        #[arg(value_name = "ROUND")]
        round: u32,
    },
    /// Save results for the final round and add one more round.
    Extend {
        #[arg(value_name = "NAME=RESULT", value_parser = parse_result_entry)]
        results: Vec<ResultEntry>,
    },
    /// Show the score table of the game in progress.
    Table,
    /// Show lifetime player statistics.
    Stats,
    /// Show finished games, newest first.
    Log,
    /// Show remembered player names.
    Names,
    ClearLog,
    ClearStats,
    ClearNames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidEntry {
    pub name: String,
    pub bid: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tricks {
    /// Exactly the bid.
    Made,
    Won(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub name: String,
    pub tricks: Tricks,
    pub bonus: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("expected NAME=VALUE, got '{0}'")]
    MissingSeparator(String),
    #[error("player name is empty in '{0}'")]
    EmptyName(String),
    #[error("'{0}' is not a non-negative whole number")]
    BadNumber(String),
    #[error("'{0}' is not a result; use made, made+B, T, or T-B")]
    BadResult(String),
}

fn split_entry(text: &str) -> Result<(String, &str), EntryError> {
    let (name, value) = text
        .rsplit_once('=')
        .ok_or_else(|| EntryError::MissingSeparator(text.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(EntryError::EmptyName(text.to_string()));
    }
    Ok((name.to_string(), value.trim()))
}

fn parse_count(text: &str) -> Result<u32, EntryError> {
    text.parse()
        .map_err(|_| EntryError::BadNumber(text.to_string()))
}

pub fn parse_bid_entry(text: &str) -> Result<BidEntry, EntryError> {
    let (name, value) = split_entry(text)?;
    Ok(BidEntry {
        name,
        bid: parse_count(value)?,
    })
}

pub fn parse_result_entry(text: &str) -> Result<ResultEntry, EntryError> {
    let (name, value) = split_entry(text)?;
    let (head, bonus) = match value.find(['+', '-']) {
        Some(0) => return Err(EntryError::BadResult(value.to_string())),
        Some(at) => {
            let bonus = value[at..]
                .parse::<i32>()
                .map_err(|_| EntryError::BadResult(value.to_string()))?;
            (&value[..at], bonus)
        }
        None => (value, 0),
    };
    let tricks = if head.eq_ignore_ascii_case("made") {
        Tricks::Made
    } else {
        Tricks::Won(parse_count(head)?)
    };
    Ok(ResultEntry {
        name,
        tricks,
        bonus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bid_entries() {
        assert_eq!(
            parse_bid_entry("Alice=3"),
            Ok(BidEntry {
                name: "Alice".into(),
                bid: 3
            })
        );
        assert_eq!(parse_bid_entry("Bob = 0").map(|e| e.bid), Ok(0));
        assert!(matches!(
            parse_bid_entry("Alice"),
            Err(EntryError::MissingSeparator(_))
        ));
        assert!(matches!(parse_bid_entry("=2"), Err(EntryError::EmptyName(_))));
        assert!(matches!(
            parse_bid_entry("Alice=-1"),
            Err(EntryError::BadNumber(_))
        ));
    }

    #[test]
    fn parses_result_shapes() {
        let made = parse_result_entry("Alice=made").unwrap();
        assert_eq!((made.tricks, made.bonus), (Tricks::Made, 0));

        let bonus = parse_result_entry("Alice=MADE+30").unwrap();
        assert_eq!((bonus.tricks, bonus.bonus), (Tricks::Made, 30));

        let missed = parse_result_entry("Bob=2-10").unwrap();
        assert_eq!((missed.tricks, missed.bonus), (Tricks::Won(2), -10));

        let plain = parse_result_entry("Cara=0").unwrap();
        assert_eq!((plain.tricks, plain.bonus), (Tricks::Won(0), 0));
    }

    #[test]
    fn rejects_malformed_results() {
        assert!(matches!(
            parse_result_entry("Alice=+10"),
            Err(EntryError::BadResult(_))
        ));
        assert!(matches!(
            parse_result_entry("Alice=made+x"),
            Err(EntryError::BadResult(_))
        ));
        assert!(matches!(
            parse_result_entry("Alice=lots"),
            Err(EntryError::BadNumber(_))
        ));
    }

    #[test]
    fn names_may_contain_equals_signs() {
        let entry = parse_bid_entry("A=B=1").unwrap();
        assert_eq!(entry.name, "A=B");
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_score_command() {
        let cli = Cli::try_parse_from(["skullking", "score", "Alice=made+20", "Bob=1"]).unwrap();
        let Command::Score { results } = cli.command else {
            panic!("expected score");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].bonus, 20);
    }
}
