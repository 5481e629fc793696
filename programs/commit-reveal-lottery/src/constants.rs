/// Seed for the program-wide registry PDA.
pub const REGISTRY_SEED: &[u8] = b"registry";

/// Seed for a lottery PDA, followed by the little-endian lottery id.
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Seed for the token account holding a lottery's ticket proceeds.
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for a purchase record, keyed by `(lottery_id, start_ticket, quantity)`.
pub const PURCHASE_SEED: &[u8] = b"purchase";

/// Seed for the ordered purchase index, keyed by `(lottery_id, index)`.
pub const PURCHASE_SLOT_SEED: &[u8] = b"purchase_slot";

/// Upper bound on the number of tickets bought in a single purchase.
pub const MAX_PURCHASE_QUANTITY: u32 = 30;

/// Largest `winner_count` whose lottery account, sized by
/// `Lottery::space_for`, still fits in the 10 KiB an instruction may allocate
/// (`MAX_PERMITTED_DATA_INCREASE`).
pub const MAX_WINNER_COUNT: u32 = 2_460;

/// Maximum length in bytes of the result page URL.
pub const MAX_URL_LEN: usize = 200;

/// Share of `[created_at, draw_at)` given to the sale window, in basis points.
/// The remainder is the reveal window.
pub const SALE_WINDOW_BPS: i64 = 5_000;

pub const BPS_DENOMINATOR: i64 = 10_000;
