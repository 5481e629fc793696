use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{LOTTERY_SEED, MAX_WINNER_COUNT, REGISTRY_SEED, VAULT_SEED};
use crate::error::LotteryError;
use crate::events::{LotteryCreated, PaymentMediumSet};
use crate::state::{Lottery, LotteryParams, Registry};

/// Accounts required to set up the program-wide registry.
#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    /// Becomes the operator of every lottery created through this registry.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Program-wide configuration, created once.
    #[account(
        init,
        payer = authority,
        space = 8 + Registry::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, Registry>,

    /// Mint the first lotteries will be paid in.
    pub payment_mint: InterfaceAccount<'info, Mint>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,
}

/// Accounts required to open a new lottery.
///
/// The lottery account is sized for `winner_count` winning tickets.
#[derive(Accounts)]
#[instruction(draw_at: i64, capacity: u32, winner_count: u32)]
pub struct CreateLottery<'info> {
    /// Registry operator; pays for the lottery and vault accounts.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Assigns the next lottery id.
    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        has_one = authority @ LotteryError::NotAuthorized,
        has_one = payment_mint,
    )]
    pub registry: Account<'info, Registry>,

    /// Oversized requests are clamped here so they reach validation and fail
    /// with `TooManyWinners`.
    #[account(
        init,
        payer = authority,
        space = Lottery::space_for(winner_count.min(MAX_WINNER_COUNT)),
        seeds = [LOTTERY_SEED, (registry.current_lottery_id + 1).to_le_bytes().as_ref()],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The registry's current payment mint, captured by the new lottery.
    pub payment_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token program owning `payment_mint`.
    pub token_program: Interface<'info, TokenInterface>,

    /// Holds ticket proceeds, owned by the lottery PDA.
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = lottery,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,
}

/// Accounts required to change the payment mint of future lotteries.
#[derive(Accounts)]
pub struct SetPaymentMedium<'info> {
    /// Registry operator.
    pub authority: Signer<'info>,

    /// Registry whose payment mint is rebound.
    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        has_one = authority @ LotteryError::NotAuthorized,
    )]
    pub registry: Account<'info, Registry>,

    /// Must deserialize as a mint owned by a token program.
    pub new_payment_mint: InterfaceAccount<'info, Mint>,
}

/// Creates the registry with the signer as operator and no lotteries.
pub fn process_initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
    ctx.accounts.registry.set_inner(Registry {
        authority: ctx.accounts.authority.key(),
        current_lottery_id: 0,
        payment_mint: ctx.accounts.payment_mint.key(),
        bump: ctx.bumps.registry,
    });

    msg!(
        "Registry initialized, authority {}, payment mint {}",
        ctx.accounts.authority.key(),
        ctx.accounts.payment_mint.key()
    );
    Ok(())
}

/// Opens a lottery and returns its id.
///
/// # Arguments
/// * `draw_at` - UNIX timestamp after which the lottery can be finalized
/// * `capacity` - Number of tickets on sale
/// * `winner_count` - Number of tickets to draw
/// * `min_percentage` - Share of `capacity` that must sell for a draw
/// * `unit_price` - Ticket price in base units of the payment mint
/// * `html_hash` - Hash of the result page
/// * `url` - Location of the result page
#[allow(clippy::too_many_arguments)]
pub fn process_create_lottery(
    ctx: Context<CreateLottery>,
    draw_at: i64,
    capacity: u32,
    winner_count: u32,
    min_percentage: u8,
    unit_price: u64,
    html_hash: [u8; 32],
    url: String,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let params = LotteryParams {
        draw_at,
        capacity,
        winner_count,
        min_percentage,
        unit_price,
        html_hash,
        url: url.clone(),
    };
    params.validate(now)?;

    let registry = &mut ctx.accounts.registry;
    let lottery_id = registry.next_lottery_id()?;
    registry.current_lottery_id = lottery_id;

    let payment_mint = ctx.accounts.payment_mint.key();
    ctx.accounts.lottery.set_inner(Lottery::new(
        lottery_id,
        params,
        now,
        payment_mint,
        ctx.accounts.vault.key(),
        ctx.bumps.lottery,
    ));

    emit!(LotteryCreated {
        lottery_id,
        draw_at,
        capacity,
        winner_count,
        min_percentage,
        unit_price,
        html_hash,
        url,
        payment_mint,
        authority: ctx.accounts.authority.key(),
    });

    msg!(
        "Created lottery {}: {} tickets, {} winners, draw at {}",
        lottery_id,
        capacity,
        winner_count,
        draw_at
    );
    Ok(lottery_id)
}

/// Rebinds the payment mint for lotteries created after this call.
pub fn process_set_payment_medium(ctx: Context<SetPaymentMedium>) -> Result<()> {
    let new_mint = ctx.accounts.new_payment_mint.key();
    let registry = &mut ctx.accounts.registry;
    registry.set_payment_medium(new_mint)?;

    emit!(PaymentMediumSet {
        lottery_id: registry.current_lottery_id,
        payment_mint: new_mint,
    });

    msg!("Payment mint set to {}", new_mint);
    Ok(())
}
