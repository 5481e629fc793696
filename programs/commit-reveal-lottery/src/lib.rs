#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod draw;
pub mod error;
pub mod events;
pub mod instructions;
pub mod phase;
pub mod state;

use state::{LotteryInfo, LotteryMetadata, PurchaseView};

declare_id!("F1nSP7qyaqTk75ccK3gfnsaB2ZPrkHwZmWhcURuDfe4A");

#[program]
pub mod commit_reveal_lottery {
    use super::*;

    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        process_initialize_registry(ctx)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_lottery(
        ctx: Context<CreateLottery>,
        draw_at: i64,
        capacity: u32,
        winner_count: u32,
        min_percentage: u8,
        unit_price: u64,
        html_hash: [u8; 32],
        url: String,
    ) -> Result<u64> {
        process_create_lottery(
            ctx,
            draw_at,
            capacity,
            winner_count,
            min_percentage,
            unit_price,
            html_hash,
            url,
        )
    }

    pub fn set_payment_medium(ctx: Context<SetPaymentMedium>) -> Result<()> {
        process_set_payment_medium(ctx)
    }

    pub fn buy_tickets(
        ctx: Context<BuyTickets>,
        lottery_id: u64,
        quantity: u32,
        commitment: [u8; 32],
    ) -> Result<u32> {
        process_buy_tickets(ctx, lottery_id, quantity, commitment)
    }

    pub fn reveal_number(
        ctx: Context<RevealNumber>,
        lottery_id: u64,
        start_ticket: u32,
        quantity: u32,
        value: [u8; 32],
    ) -> Result<()> {
        process_reveal_number(ctx, lottery_id, start_ticket, quantity, value)
    }

    pub fn finalize_lottery(ctx: Context<FinalizeLottery>, lottery_id: u64) -> Result<()> {
        process_finalize_lottery(ctx, lottery_id)
    }

    pub fn current_lottery_id(ctx: Context<ReadRegistry>) -> Result<u64> {
        process_current_lottery_id(ctx)
    }

    pub fn sales_count(ctx: Context<ReadLottery>, _lottery_id: u64) -> Result<u32> {
        process_sales_count(ctx)
    }

    pub fn lottery_info(ctx: Context<ReadLottery>, _lottery_id: u64) -> Result<LotteryInfo> {
        process_lottery_info(ctx)
    }

    pub fn url_and_hash(ctx: Context<ReadLottery>, _lottery_id: u64) -> Result<LotteryMetadata> {
        process_url_and_hash(ctx)
    }

    pub fn payment_medium(ctx: Context<ReadLottery>, _lottery_id: u64) -> Result<Pubkey> {
        process_payment_medium(ctx)
    }

    pub fn purchase_at(
        ctx: Context<PurchaseAt>,
        _lottery_id: u64,
        index: u32,
    ) -> Result<PurchaseView> {
        process_purchase_at(ctx, index)
    }

    pub fn winning_ticket_at(
        ctx: Context<ReadLottery>,
        _lottery_id: u64,
        rank: u32,
    ) -> Result<u32> {
        process_winning_ticket_at(ctx, rank)
    }

    pub fn owns_winning_ticket(
        ctx: Context<OwnsWinningTicket>,
        _lottery_id: u64,
        ticket_no: u32,
    ) -> Result<bool> {
        process_owns_winning_ticket(ctx, ticket_no)
    }

    pub fn owns_winning_ticket_as_address(
        ctx: Context<AddressOwnsWinningTicket>,
        _lottery_id: u64,
        owner: Pubkey,
        ticket_no: u32,
    ) -> Result<bool> {
        process_owns_winning_ticket_as_address(ctx, owner, ticket_no)
    }
}
