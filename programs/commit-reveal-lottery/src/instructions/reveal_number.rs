use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, PURCHASE_SEED};
use crate::events::NumberRevealed;
use crate::state::{Lottery, PurchaseRecord};

/// Accounts required to reveal the number behind a purchase's commitment.
///
/// The purchase is looked up by the exact `(start_ticket, quantity)` pair
/// returned at purchase time.
#[derive(Accounts)]
#[instruction(lottery_id: u64, start_ticket: u32, quantity: u32)]
pub struct RevealNumber<'info> {
    /// Must be the buyer recorded on the purchase.
    pub buyer: Signer<'info>,

    /// Lottery receiving the revealed entropy.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Purchase covering exactly `start_ticket..start_ticket + quantity`.
    #[account(
        mut,
        seeds = [
            PURCHASE_SEED,
            lottery_id.to_le_bytes().as_ref(),
            start_ticket.to_le_bytes().as_ref(),
            quantity.to_le_bytes().as_ref(),
        ],
        bump = purchase.bump,
    )]
    pub purchase: Box<Account<'info, PurchaseRecord>>,
}

pub fn process_reveal_number(
    ctx: Context<RevealNumber>,
    lottery_id: u64,
    start_ticket: u32,
    quantity: u32,
    value: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let caller = ctx.accounts.buyer.key();
    let lottery = &mut ctx.accounts.lottery;
    let purchase = &mut ctx.accounts.purchase;

    lottery.reveal(purchase, caller, start_ticket, quantity, value, now)?;

    emit!(NumberRevealed {
        lottery_id,
        buyer: caller,
        start_ticket,
        quantity,
        value,
    });

    msg!(
        "Lottery {}: revealed tickets {}..={} ({} of {} purchases)",
        lottery_id,
        start_ticket,
        start_ticket + quantity - 1,
        lottery.revealed_count,
        lottery.purchase_count
    );
    Ok(())
}
