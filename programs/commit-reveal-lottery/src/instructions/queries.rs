use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, PURCHASE_SLOT_SEED, REGISTRY_SEED};
use crate::error::LotteryError;
use crate::state::{
    Lottery, LotteryInfo, LotteryMetadata, PurchaseRecord, PurchaseSlot, PurchaseView, Registry,
};

// Read-only instructions. Results are returned through the transaction's
// return data and are meant to be read with a simulated transaction.

#[derive(Accounts)]
pub struct ReadRegistry<'info> {
    /// Program-wide registry.
    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,
}

#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct ReadLottery<'info> {
    /// Lottery being read.
    #[account(
        seeds = [LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

#[derive(Accounts)]
#[instruction(lottery_id: u64, index: u32)]
pub struct PurchaseAt<'info> {
    /// Lottery whose purchase index is read.
    #[account(
        seeds = [LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// CHECK: Does not exist for an out-of-range index, so it is deserialized
    /// in the handler after the bound check.
    #[account(
        seeds = [
            PURCHASE_SLOT_SEED,
            lottery_id.to_le_bytes().as_ref(),
            index.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub purchase_slot: UncheckedAccount<'info>,

    /// CHECK: Must be the record the slot points at; validated in the handler.
    pub purchase: UncheckedAccount<'info>,
}

/// Accounts required for a buyer to check one of their own tickets.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct OwnsWinningTicket<'info> {
    /// Must be the buyer of `purchase`.
    pub caller: Signer<'info>,

    /// Lottery the ticket belongs to.
    #[account(
        seeds = [LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The purchase whose range contains the ticket.
    pub purchase: Box<Account<'info, PurchaseRecord>>,
}

/// Accounts required to check a ticket on behalf of any address.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct AddressOwnsWinningTicket<'info> {
    /// Lottery the ticket belongs to.
    #[account(
        seeds = [LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The purchase whose range contains the ticket.
    pub purchase: Box<Account<'info, PurchaseRecord>>,
}

/// Deserializes a program-owned account that could not be typed in the
/// accounts struct.
fn load<T: AccountDeserialize>(info: &AccountInfo) -> Result<T> {
    require_keys_eq!(
        *info.owner,
        crate::ID,
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..])
}

pub fn process_current_lottery_id(ctx: Context<ReadRegistry>) -> Result<u64> {
    Ok(ctx.accounts.registry.current_lottery_id)
}

pub fn process_sales_count(ctx: Context<ReadLottery>) -> Result<u32> {
    Ok(ctx.accounts.lottery.sold_count)
}

pub fn process_lottery_info(ctx: Context<ReadLottery>) -> Result<LotteryInfo> {
    Ok(ctx.accounts.lottery.info())
}

pub fn process_url_and_hash(ctx: Context<ReadLottery>) -> Result<LotteryMetadata> {
    Ok(ctx.accounts.lottery.metadata())
}

pub fn process_payment_medium(ctx: Context<ReadLottery>) -> Result<Pubkey> {
    Ok(ctx.accounts.lottery.payment_mint)
}

/// Returns the `index`-th purchase of the lottery, 1-based.
pub fn process_purchase_at(ctx: Context<PurchaseAt>, index: u32) -> Result<PurchaseView> {
    ctx.accounts.lottery.check_purchase_index(index)?;

    let slot: PurchaseSlot = load(&ctx.accounts.purchase_slot)?;
    require_keys_eq!(
        ctx.accounts.purchase.key(),
        slot.record,
        LotteryError::PurchaseNotFound
    );
    let record: PurchaseRecord = load(&ctx.accounts.purchase)?;

    Ok(record.view())
}

/// Returns the winning ticket at 1-based `rank` in draw order.
pub fn process_winning_ticket_at(ctx: Context<ReadLottery>, rank: u32) -> Result<u32> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.lottery.winning_ticket_at(rank, now)
}

/// Whether the signer's `ticket_no` is among the winners.
pub fn process_owns_winning_ticket(
    ctx: Context<OwnsWinningTicket>,
    ticket_no: u32,
) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    let won = ctx.accounts.lottery.owns_winning_ticket(
        &ctx.accounts.purchase,
        ctx.accounts.caller.key(),
        ticket_no,
        now,
    )?;

    msg!("Ticket {} won: {}", ticket_no, won);
    Ok(won)
}

/// Whether `owner` holds `ticket_no` and it is among the winners.
pub fn process_owns_winning_ticket_as_address(
    ctx: Context<AddressOwnsWinningTicket>,
    owner: Pubkey,
    ticket_no: u32,
) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    let won = ctx
        .accounts
        .lottery
        .address_owns_winning_ticket(&ctx.accounts.purchase, owner, ticket_no, now)?;

    msg!("Ticket {} held by {} won: {}", ticket_no, owner, won);
    Ok(won)
}
