use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, REGISTRY_SEED};
use crate::error::LotteryError;
use crate::events::{LotteryCanceled, LotteryFinalized};
use crate::state::{DrawOutcome, Lottery, Registry};

/// Accounts required to settle a lottery.
///
/// This ensures that:
/// 1. Only the registry authority can settle.
/// 2. The lottery is past its draw time and still open.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct FinalizeLottery<'info> {
    /// Registry operator.
    pub authority: Signer<'info>,

    /// Registry holding the operator key.
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        has_one = authority @ LotteryError::NotAuthorized,
    )]
    pub registry: Account<'info, Registry>,

    /// Lottery to settle.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Cancels the lottery if too few tickets sold, otherwise draws the winners
/// from the revealed numbers.
pub fn process_finalize_lottery(ctx: Context<FinalizeLottery>, lottery_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let lottery = &mut ctx.accounts.lottery;

    msg!(
        "Lottery {}: {} of {} tickets sold, {} purchases revealed",
        lottery_id,
        lottery.sold_count,
        lottery.capacity,
        lottery.revealed_count
    );

    match lottery.finalize(now)? {
        DrawOutcome::Canceled => {
            msg!(
                "Lottery {} canceled, below {}% participation",
                lottery_id,
                lottery.min_percentage
            );
            emit!(LotteryCanceled { lottery_id });
        }
        DrawOutcome::Finalized(winning_tickets) => {
            msg!("Lottery {} winners: {:?}", lottery_id, winning_tickets);
            emit!(LotteryFinalized {
                lottery_id,
                winning_tickets,
            });
        }
    }

    Ok(())
}
