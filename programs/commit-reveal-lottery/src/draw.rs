//! Commitment hashing and the winner draw.
//!
//! Everything here is a pure function of public data: the revealed numbers,
//! the number of tickets sold and the configured winner count. Anyone can
//! recompute a lottery's result from its `NumberRevealed` events.

use std::collections::BTreeMap;

use solana_program::keccak;

/// Encodes a number as a 32-byte big-endian word.
pub fn number_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Commitment a buyer submits at purchase time for the number they reveal
/// later: `keccak256` of the number as a 32-byte big-endian word.
pub fn commitment_of(value: &[u8; 32]) -> [u8; 32] {
    keccak::hash(value).to_bytes()
}

/// Folds a revealed number into the running seed. XOR is commutative, so the
/// seed does not depend on reveal order.
pub fn fold_entropy(seed: &mut [u8; 32], value: &[u8; 32]) {
    for (s, v) in seed.iter_mut().zip(value) {
        *s ^= v;
    }
}

/// Whether `floor(sold * 100 / capacity)` reaches the minimum percentage.
pub fn meets_threshold(sold_count: u32, capacity: u32, min_percentage: u8) -> bool {
    let sold_percentage = (u64::from(sold_count) * 100)
        .checked_div(u64::from(capacity))
        .unwrap_or(0);
    sold_percentage >= u64::from(min_percentage)
}

/// Draws `min(winner_count, sold_count)` distinct tickets from
/// `[1, sold_count]` with a partial Fisher-Yates shuffle.
///
/// Round `r` hashes `seed ‖ r_word` and picks position
/// `r + low128(digest) mod (sold_count - r)` of the not-yet-drawn tail.
/// Exactly one hash per winner. Only displaced positions are stored, so
/// memory is bounded by the winner count rather than by `sold_count`.
/// Winners are returned in draw order.
pub fn draw_winners(seed: &[u8; 32], sold_count: u32, winner_count: u32) -> Vec<u32> {
    let wanted = winner_count.min(sold_count);

    // position -> ticket, for positions whose ticket is not `position + 1`
    let mut displaced: BTreeMap<u32, u32> = BTreeMap::new();
    let mut winners = Vec::with_capacity(wanted as usize);

    for round in 0..wanted {
        let round_word = number_word(u64::from(round));
        let digest = keccak::hashv(&[seed.as_ref(), round_word.as_ref()]).to_bytes();

        let pick = round + offset_from_digest(&digest, sold_count - round);
        let ticket = displaced.get(&pick).copied().unwrap_or(pick + 1);
        let head = displaced.get(&round).copied().unwrap_or(round + 1);
        displaced.insert(pick, head);
        winners.push(ticket);
    }

    winners
}

fn offset_from_digest(digest: &[u8; 32], remaining: u32) -> u32 {
    let mut low = [0u8; 16];
    low.copy_from_slice(&digest[16..]);
    (u128::from_be_bytes(low) % u128::from(remaining)) as u32
}
