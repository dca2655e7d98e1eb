use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;
pub const DEFAULT_TOTAL_ROUNDS: u32 = 10;

/// Errors raised while assembling the player list for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("player '{0}' has already been added")]
    DuplicateName(String),
    #[error("at least {MIN_PLAYERS} players are required, got {0}")]
    TooFewPlayers(usize),
}

/// Ordered list of players being set up before a game starts.
///
/// This is the only place names are checked; the game model takes whatever
/// list it is handed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a full list, stopping at the first bad name.
    pub fn from_names<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(name.as_ref())?;
        }
        Ok(roster)
    }

    pub fn add(&mut self, name: &str) -> Result<(), RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.contains(name) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Returns `true` if the name was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn can_start(&self) -> bool {
        self.names.len() >= MIN_PLAYERS
    }

    /// Hand the names over for game creation.
    pub fn into_players(self) -> Result<Vec<String>, RosterError> {
        if !self.can_start() {
            return Err(RosterError::TooFewPlayers(self.names.len()));
        }
        Ok(self.names)
    }
}

/// Interpret free-form round-count text. Non-digits are dropped; anything
/// that does not leave a positive number falls back to the default.
pub fn parse_round_count(text: &str) -> u32 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(count) if count > 0 => count,
        _ => DEFAULT_TOTAL_ROUNDS,
    }
}
