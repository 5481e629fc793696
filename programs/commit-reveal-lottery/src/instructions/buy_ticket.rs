use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::{LOTTERY_SEED, PURCHASE_SEED, PURCHASE_SLOT_SEED};
use crate::events::TicketsPurchased;
use crate::state::{Lottery, PurchaseRecord, PurchaseSlot};

/// Accounts required to buy a range of tickets.
///
/// The purchase record is addressed by the range it will cover, so the
/// client derives it from the lottery's current `sold_count`. If another
/// purchase lands first the address no longer matches and the transaction
/// fails; the client re-reads the lottery and resubmits.
#[derive(Accounts)]
#[instruction(lottery_id: u64, quantity: u32)]
pub struct BuyTickets<'info> {
    /// Pays for the tickets and the new accounts.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Lottery the tickets are taken from.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
        has_one = payment_mint,
        has_one = vault,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// New record for tickets `sold_count + 1 ..= sold_count + quantity`.
    #[account(
        init,
        payer = buyer,
        space = 8 + PurchaseRecord::INIT_SPACE,
        seeds = [
            PURCHASE_SEED,
            lottery_id.to_le_bytes().as_ref(),
            (lottery.sold_count + 1).to_le_bytes().as_ref(),
            quantity.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub purchase: Box<Account<'info, PurchaseRecord>>,

    /// Next entry of the ordered purchase index.
    #[account(
        init,
        payer = buyer,
        space = 8 + PurchaseSlot::INIT_SPACE,
        seeds = [
            PURCHASE_SLOT_SEED,
            lottery_id.to_le_bytes().as_ref(),
            (lottery.purchase_count + 1).to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub purchase_slot: Account<'info, PurchaseSlot>,

    /// Mint the lottery was created with.
    pub payment_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token program owning `payment_mint`.
    pub token_program: Interface<'info, TokenInterface>,

    /// Buyer's token account the ticket price is taken from.
    #[account(
        mut,
        token::mint = payment_mint,
        token::authority = buyer,
        token::token_program = token_program,
    )]
    pub buyer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Lottery vault receiving the ticket price.
    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,
}

/// Buys `quantity` consecutive tickets under one commitment and returns the
/// first ticket number.
///
/// Steps performed:
/// 1. Check the sale window, quantity, remaining capacity and commitment.
/// 2. Transfer `quantity * unit_price` from the buyer to the lottery vault.
/// 3. Write the purchase record and its slot in the ordered index.
pub fn process_buy_tickets(
    ctx: Context<BuyTickets>,
    lottery_id: u64,
    quantity: u32,
    commitment: [u8; 32],
) -> Result<u32> {
    let now = Clock::get()?.unix_timestamp;
    let allocation = ctx.accounts.lottery.allocate(now, quantity, &commitment)?;
    let amount = ctx.accounts.lottery.ticket_cost(quantity)?;

    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.buyer_token_account.to_account_info(),
                mint: ctx.accounts.payment_mint.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.buyer.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.payment_mint.decimals,
    )?;

    let buyer = ctx.accounts.buyer.key();
    ctx.accounts.purchase.set_inner(PurchaseRecord::new(
        lottery_id,
        allocation,
        buyer,
        quantity,
        commitment,
        ctx.bumps.purchase,
    ));
    let record = ctx.accounts.purchase.key();
    ctx.accounts.purchase_slot.set_inner(PurchaseSlot {
        lottery_id,
        index: allocation.index,
        record,
        bump: ctx.bumps.purchase_slot,
    });

    emit!(TicketsPurchased {
        lottery_id,
        buyer,
        start_ticket: allocation.start_ticket,
        quantity,
    });

    msg!(
        "Lottery {}: tickets {}..={} sold to {} for {}",
        lottery_id,
        allocation.start_ticket,
        allocation.start_ticket + quantity - 1,
        buyer,
        amount
    );
    Ok(allocation.start_ticket)
}
