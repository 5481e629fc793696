use anchor_lang::prelude::*;

#[event]
pub struct LotteryCreated {
    pub lottery_id: u64,
    pub draw_at: i64,
    pub capacity: u32,
    pub winner_count: u32,
    pub min_percentage: u8,
    pub unit_price: u64,
    pub html_hash: [u8; 32],
    pub url: String,
    pub payment_mint: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct TicketsPurchased {
    pub lottery_id: u64,
    pub buyer: Pubkey,
    pub start_ticket: u32,
    pub quantity: u32,
}

#[event]
pub struct NumberRevealed {
    pub lottery_id: u64,
    pub buyer: Pubkey,
    pub start_ticket: u32,
    pub quantity: u32,
    /// Revealed number as a 32-byte big-endian word.
    pub value: [u8; 32],
}

#[event]
pub struct LotteryFinalized {
    pub lottery_id: u64,
    pub winning_tickets: Vec<u32>,
}

#[event]
pub struct LotteryCanceled {
    pub lottery_id: u64,
}

/// Emitted when the operator rebinds the payment mint. `lottery_id` is the
/// most recently created lottery at the time of the change.
#[event]
pub struct PaymentMediumSet {
    pub lottery_id: u64,
    pub payment_mint: Pubkey,
}
