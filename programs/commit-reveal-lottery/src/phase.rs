use crate::constants::{BPS_DENOMINATOR, SALE_WINDOW_BPS};

/// Lifecycle window a lottery is in at a given time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Tickets may be bought.
    Sale,
    /// Buyers may disclose the number behind their commitment.
    Reveal,
    /// `draw_at` has passed; the lottery can be finalized.
    Settled,
}

/// First second of the reveal window.
pub fn reveal_start(created_at: i64, draw_at: i64) -> i64 {
    let span = i128::from(draw_at) - i128::from(created_at);
    let sale = span * i128::from(SALE_WINDOW_BPS) / i128::from(BPS_DENOMINATOR);
    // Lies within [created_at, draw_at], so it fits back into an i64.
    (i128::from(created_at) + sale) as i64
}

/// Maps a lottery's timestamps and the current time to its phase.
///
/// Sale is `[created_at, m)`, Reveal is `[m, draw_at)` and Settled is
/// `[draw_at, ∞)`, where `m` is [`reveal_start`].
pub fn phase(created_at: i64, draw_at: i64, now: i64) -> Phase {
    if now >= draw_at {
        Phase::Settled
    } else if now >= reveal_start(created_at, draw_at) {
        Phase::Reveal
    } else {
        Phase::Sale
    }
}
