use serde::{Deserialize, Serialize};

/// Step applied by the bonus buttons.
pub const BONUS_STEP: i32 = 10;

/// Points for a single player in a single round.
///
/// A zero bid is worth a flat `10 * round_number` when made and costs the same
/// when missed. A nonzero bid is worth `20` per trick when made; when missed it
/// costs `10` per trick of deviation. Bonus points are added last.
///
/// `tricks_won` is trusted as stored: a made bid is expected to carry
/// `tricks_won == bid`, but that is the job of [`ScoreEntry::toggle_made_bid`].
pub fn compute_score(
    bid: u32,
    made_bid: bool,
    tricks_won: u32,
    bonus_points: i32,
    round_number: u32,
) -> i32 {
    let round = i64::from(round_number);
    let base = match (made_bid, bid) {
        (true, 0) => 10 * round,
        (true, bid) => i64::from(bid) * 20,
        (false, 0) => -10 * round,
        (false, bid) => -(i64::from(bid.abs_diff(tricks_won)) * 10),
    };
    saturate(base + i64::from(bonus_points))
}

/// Narrow to `i32`, pinning out-of-range values to the nearest bound.
pub(crate) fn saturate(points: i64) -> i32 {
    points.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Bid after a `+1`/`-1` press. Never drops below zero.
pub fn adjust_bid(current: u32, delta: i32) -> u32 {
    current.saturating_add_signed(delta)
}

/// Tricks won after a `+1`/`-1` press. Never drops below zero.
pub fn adjust_tricks_won(current: u32, delta: i32) -> u32 {
    current.saturating_add_signed(delta)
}

/// Bonus after a `+10`/`-10` press. Saturates at the `i32` bounds.
pub fn adjust_bonus(current: i32, delta: i32) -> i32 {
    current.saturating_add(delta)
}

/// One player's scoring inputs for a round, plus the resolved total once the
/// round has been scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub bid: u32,
    pub made_bid: bool,
    pub tricks_won: u32,
    pub bonus_points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<i32>,
}

impl ScoreEntry {
    /// Fresh, unscored entry for the given bid.
    pub const fn new(bid: u32) -> Self {
        Self {
            bid,
            made_bid: false,
            tricks_won: 0,
            bonus_points: 0,
            total_points: None,
        }
    }

    /// Flip the made-bid flag. Making the bid means winning exactly as many
    /// tricks as were bid, so the false -> true transition pins `tricks_won`.
    pub fn toggle_made_bid(&self) -> Self {
        let made_bid = !self.made_bid;
        Self {
            made_bid,
            tricks_won: if made_bid { self.bid } else { self.tricks_won },
            ..*self
        }
    }

    /// Points these inputs are worth in `round_number`, ignoring any stored total.
    pub fn points(&self, round_number: u32) -> i32 {
        compute_score(
            self.bid,
            self.made_bid,
            self.tricks_won,
            self.bonus_points,
            round_number,
        )
    }

    /// Copy of this entry with `total_points` resolved for `round_number`.
    pub fn scored(&self, round_number: u32) -> Self {
        Self {
            total_points: Some(self.points(round_number)),
            ..*self
        }
    }

    pub fn is_scored(&self) -> bool {
        self.total_points.is_some()
    }
}
