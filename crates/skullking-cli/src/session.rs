//! The game in progress, persisted between invocations.

use anyhow::{Context, Result};
use skullking_core::game::serialization::GameSnapshot;
use skullking_core::game::state::GameState;
use skullking_core::history::KeyValueStore;
use tracing::debug;

pub const ACTIVE_GAME_KEY: &str = "activeGame";

pub fn load<S: KeyValueStore>(store: &S) -> Result<Option<GameState>> {
    let Some(raw) = store.get(ACTIVE_GAME_KEY)? else {
        return Ok(None);
    };
    let state = GameSnapshot::load(&raw).context("active game is unreadable")?;
    Ok(Some(state))
}

/// Like [`load`] but a missing game is an error.
pub fn require<S: KeyValueStore>(store: &S) -> Result<GameState> {
    load(store)?.context("no game in progress; start one with `skullking new`")
}

pub fn save<S: KeyValueStore>(store: &mut S, state: &GameState) -> Result<()> {
    let json = GameSnapshot::to_json(state)?;
    store.set(ACTIVE_GAME_KEY, &json)?;
    debug!(
        round = state.current_round(),
        total = state.total_rounds(),
        "active game saved"
    );
    Ok(())
}

pub fn clear<S: KeyValueStore>(store: &mut S) -> Result<()> {
    store.remove(ACTIVE_GAME_KEY)?;
    Ok(())
}
