use anchor_lang::prelude::*;

use crate::constants::{MAX_PURCHASE_QUANTITY, MAX_URL_LEN, MAX_WINNER_COUNT};
use crate::draw;
use crate::error::LotteryError;
use crate::phase::{self, Phase};

/// Program-wide configuration and the lottery id counter.
#[account]
#[derive(InitSpace)]
pub struct Registry {
    /// Operator allowed to create and finalize lotteries and to change the
    /// payment mint.
    pub authority: Pubkey,

    /// Id of the most recently created lottery, `0` before the first one.
    pub current_lottery_id: u64,

    /// Mint captured by lotteries created from now on.
    pub payment_mint: Pubkey,

    /// Bump of the registry PDA.
    pub bump: u8,
}

impl Registry {
    pub fn next_lottery_id(&self) -> Result<u64> {
        Ok(self
            .current_lottery_id
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?)
    }

    /// Rebinds the payment mint for lotteries created after this call.
    /// Existing lotteries keep the mint they were created with.
    pub fn set_payment_medium(&mut self, new_mint: Pubkey) -> Result<()> {
        require_keys_neq!(new_mint, Pubkey::default(), LotteryError::InvalidPaymentMedium);
        require_keys_neq!(new_mint, self.payment_mint, LotteryError::SamePaymentMedium);
        self.payment_mint = new_mint;
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum LotteryStatus {
    Open,
    Finalized,
    Canceled,
}

/// Operator-supplied configuration of a new lottery.
#[derive(Clone, Debug)]
pub struct LotteryParams {
    pub draw_at: i64,
    pub capacity: u32,
    pub winner_count: u32,
    pub min_percentage: u8,
    pub unit_price: u64,
    pub html_hash: [u8; 32],
    pub url: String,
}

impl LotteryParams {
    pub fn validate(&self, now: i64) -> Result<()> {
        require!(self.draw_at > now, LotteryError::InvalidDrawTime);
        require!(self.capacity > 0, LotteryError::InvalidTicketCount);
        require!(
            self.winner_count > 0 && self.winner_count <= self.capacity,
            LotteryError::InvalidWinnerCount
        );
        require!(
            self.winner_count <= MAX_WINNER_COUNT,
            LotteryError::TooManyWinners
        );
        require!(
            self.min_percentage > 0 && self.min_percentage <= 100,
            LotteryError::InvalidMinPercentage
        );
        require!(self.unit_price > 0, LotteryError::InvalidTicketPrice);
        require!(self.url.len() <= MAX_URL_LEN, LotteryError::UrlTooLong);
        Ok(())
    }
}

/// A single ticket sale event.
#[account]
#[derive(InitSpace)]
pub struct Lottery {
    /// Registry-assigned id, starting at 1.
    pub id: u64,

    /// UNIX timestamp at creation; the sale window opens here.
    pub created_at: i64,

    /// UNIX timestamp after which the lottery can be finalized.
    pub draw_at: i64,

    /// Total tickets offered.
    pub capacity: u32,

    /// Tickets to draw; at most `capacity`.
    pub winner_count: u32,

    /// Share of `capacity` that must be sold for a draw to happen.
    pub min_percentage: u8,

    /// Price of one ticket in base units of `payment_mint`.
    pub unit_price: u64,

    /// Hash of the result page, stored verbatim.
    pub html_hash: [u8; 32],

    /// Result page location, stored verbatim. Capped at `MAX_URL_LEN`.
    #[max_len(200)]
    pub url: String,

    /// Mint tickets are paid in, captured at creation.
    pub payment_mint: Pubkey,

    /// Token account holding ticket proceeds.
    pub vault: Pubkey,

    /// Open until finalized or canceled.
    pub status: LotteryStatus,

    /// Tickets sold so far. Tickets `1..=sold_count` are allocated.
    pub sold_count: u32,

    /// Number of purchase records.
    pub purchase_count: u32,

    /// Purchases whose number has been revealed.
    pub revealed_count: u32,

    /// XOR of every revealed number.
    pub entropy: [u8; 32],

    /// Winning tickets in draw order. Storage for `winner_count` entries is
    /// added on top of `INIT_SPACE` by [`Lottery::space_for`].
    #[max_len(0)]
    pub winning_tickets: Vec<u32>,

    /// Bump of the lottery PDA.
    pub bump: u8,
}

/// Position of a freshly allocated purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// 1-based position among the lottery's purchases.
    pub index: u32,
    pub start_ticket: u32,
}

/// Result of finalizing a lottery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Participation was below the threshold; nobody wins.
    Canceled,
    Finalized(Vec<u32>),
}

impl Lottery {
    /// Account size, discriminator included, for a lottery drawing
    /// `winner_count` tickets.
    pub fn space_for(winner_count: u32) -> usize {
        8 + Lottery::INIT_SPACE + winner_count as usize * std::mem::size_of::<u32>()
    }

    pub fn new(
        id: u64,
        params: LotteryParams,
        now: i64,
        payment_mint: Pubkey,
        vault: Pubkey,
        bump: u8,
    ) -> Self {
        Self {
            id,
            created_at: now,
            draw_at: params.draw_at,
            capacity: params.capacity,
            winner_count: params.winner_count,
            min_percentage: params.min_percentage,
            unit_price: params.unit_price,
            html_hash: params.html_hash,
            url: params.url,
            payment_mint,
            vault,
            status: LotteryStatus::Open,
            sold_count: 0,
            purchase_count: 0,
            revealed_count: 0,
            entropy: [0u8; 32],
            winning_tickets: Vec::new(),
            bump,
        }
    }

    pub fn phase(&self, now: i64) -> Phase {
        phase::phase(self.created_at, self.draw_at, now)
    }

    /// Price of `quantity` tickets.
    pub fn ticket_cost(&self, quantity: u32) -> Result<u64> {
        Ok(self
            .unit_price
            .checked_mul(u64::from(quantity))
            .ok_or(LotteryError::MathOverflow)?)
    }

    /// Allocates the next `quantity` tickets to a purchase.
    ///
    /// Checks run in a fixed order: sale phase, quantity bounds, remaining
    /// capacity, non-zero commitment. Nothing is mutated unless all pass.
    pub fn allocate(
        &mut self,
        now: i64,
        quantity: u32,
        commitment: &[u8; 32],
    ) -> Result<Allocation> {
        require!(self.phase(now) == Phase::Sale, LotteryError::PurchasePhaseEnded);
        require!(
            quantity > 0 && quantity <= MAX_PURCHASE_QUANTITY,
            LotteryError::InvalidQuantity
        );
        let sold_after = self
            .sold_count
            .checked_add(quantity)
            .ok_or(LotteryError::MathOverflow)?;
        require!(sold_after <= self.capacity, LotteryError::NotEnoughTickets);
        require!(
            commitment.iter().any(|b| *b != 0),
            LotteryError::ZeroCommitment
        );

        let start_ticket = self.sold_count + 1;
        self.sold_count = sold_after;
        self.purchase_count += 1;

        Ok(Allocation {
            index: self.purchase_count,
            start_ticket,
        })
    }

    /// Records `value` as the number behind `record`'s commitment and folds
    /// it into the lottery's entropy.
    pub fn reveal(
        &mut self,
        record: &mut PurchaseRecord,
        caller: Pubkey,
        start_ticket: u32,
        quantity: u32,
        value: [u8; 32],
        now: i64,
    ) -> Result<()> {
        require!(
            record.lottery_id == self.id
                && record.start_ticket == start_ticket
                && record.quantity == quantity,
            LotteryError::PurchaseNotFound
        );
        match self.phase(now) {
            Phase::Sale => return err!(LotteryError::RevealPhaseNotStarted),
            Phase::Settled => return err!(LotteryError::RevealPhaseEnded),
            Phase::Reveal => {}
        }
        require_keys_eq!(caller, record.buyer, LotteryError::NotTicketBuyer);
        require!(
            quantity > 0 && quantity <= MAX_PURCHASE_QUANTITY,
            LotteryError::InvalidQuantity
        );
        require!(record.revealed.is_none(), LotteryError::AlreadyRevealed);
        require!(
            draw::commitment_of(&value) == record.commitment,
            LotteryError::CommitmentMismatch
        );

        record.revealed = Some(value);
        draw::fold_entropy(&mut self.entropy, &value);
        self.revealed_count += 1;
        Ok(())
    }

    /// Settles the lottery: cancels it when participation is below the
    /// threshold, otherwise draws the winners.
    pub fn finalize(&mut self, now: i64) -> Result<DrawOutcome> {
        require!(self.phase(now) == Phase::Settled, LotteryError::RevealPhaseNotEnded);
        require!(
            self.status == LotteryStatus::Open,
            LotteryError::LotteryAlreadySettled
        );

        if !draw::meets_threshold(self.sold_count, self.capacity, self.min_percentage) {
            self.status = LotteryStatus::Canceled;
            return Ok(DrawOutcome::Canceled);
        }

        let winners = draw::draw_winners(&self.entropy, self.sold_count, self.winner_count);
        self.winning_tickets = winners.clone();
        self.status = LotteryStatus::Finalized;
        Ok(DrawOutcome::Finalized(winners))
    }

    pub fn check_purchase_index(&self, index: u32) -> Result<()> {
        require!(
            index >= 1 && index <= self.purchase_count,
            LotteryError::IndexOutOfBounds
        );
        Ok(())
    }

    fn ensure_drawn(&self, now: i64) -> Result<()> {
        require!(self.phase(now) == Phase::Settled, LotteryError::RevealPhaseNotEnded);
        require!(
            self.status == LotteryStatus::Finalized,
            LotteryError::LotteryNotFinalized
        );
        Ok(())
    }

    /// Winning ticket at 1-based `rank` in draw order.
    pub fn winning_ticket_at(&self, rank: u32, now: i64) -> Result<u32> {
        self.ensure_drawn(now)?;
        let position = (rank as usize)
            .checked_sub(1)
            .ok_or(LotteryError::IndexOutOfBounds)?;
        Ok(*self
            .winning_tickets
            .get(position)
            .ok_or(LotteryError::IndexOutOfBounds)?)
    }

    /// Whether `ticket_no`, held by `caller` through `record`, won.
    pub fn owns_winning_ticket(
        &self,
        record: &PurchaseRecord,
        caller: Pubkey,
        ticket_no: u32,
        now: i64,
    ) -> Result<bool> {
        self.resolve_ticket(record, ticket_no, now)?;
        require_keys_eq!(record.buyer, caller, LotteryError::NotTicketOwner);
        Ok(self.winning_tickets.contains(&ticket_no))
    }

    /// Same as [`Lottery::owns_winning_ticket`] for an arbitrary owner; a
    /// ticket not held by `owner` reads as unowned.
    pub fn address_owns_winning_ticket(
        &self,
        record: &PurchaseRecord,
        owner: Pubkey,
        ticket_no: u32,
        now: i64,
    ) -> Result<bool> {
        self.resolve_ticket(record, ticket_no, now)?;
        require_keys_eq!(record.buyer, owner, LotteryError::TicketNotOwned);
        Ok(self.winning_tickets.contains(&ticket_no))
    }

    fn resolve_ticket(&self, record: &PurchaseRecord, ticket_no: u32, now: i64) -> Result<()> {
        self.ensure_drawn(now)?;
        require!(
            record.lottery_id == self.id
                && ticket_no <= self.sold_count
                && record.contains(ticket_no),
            LotteryError::TicketNotOwned
        );
        Ok(())
    }

    pub fn info(&self) -> LotteryInfo {
        LotteryInfo {
            id: self.id,
            created_at: self.created_at,
            draw_at: self.draw_at,
            capacity: self.capacity,
            winner_count: self.winner_count,
            min_percentage: self.min_percentage,
            unit_price: self.unit_price,
            status: self.status,
            sold_count: self.sold_count,
        }
    }

    pub fn metadata(&self) -> LotteryMetadata {
        LotteryMetadata {
            html_hash: self.html_hash,
            url: self.url.clone(),
        }
    }
}

/// One purchase: a contiguous ticket range bound to a commitment.
///
/// Addressed by `["purchase", lottery_id, start_ticket, quantity]`.
#[account]
#[derive(InitSpace)]
pub struct PurchaseRecord {
    /// Lottery the tickets belong to.
    pub lottery_id: u64,

    /// 1-based position among the lottery's purchases.
    pub index: u32,

    /// Paid for the range; the only signer allowed to reveal it.
    pub buyer: Pubkey,

    /// First ticket of the range.
    pub start_ticket: u32,

    /// Number of consecutive tickets in the range.
    pub quantity: u32,

    /// `keccak256` of the number the buyer will reveal.
    pub commitment: [u8; 32],

    /// Set once, during the reveal window.
    pub revealed: Option<[u8; 32]>,

    /// Bump of the purchase PDA.
    pub bump: u8,
}

impl PurchaseRecord {
    pub fn new(
        lottery_id: u64,
        allocation: Allocation,
        buyer: Pubkey,
        quantity: u32,
        commitment: [u8; 32],
        bump: u8,
    ) -> Self {
        Self {
            lottery_id,
            index: allocation.index,
            buyer,
            start_ticket: allocation.start_ticket,
            quantity,
            commitment,
            revealed: None,
            bump,
        }
    }

    pub fn contains(&self, ticket_no: u32) -> bool {
        ticket_no >= self.start_ticket && ticket_no - self.start_ticket < self.quantity
    }

    pub fn view(&self) -> PurchaseView {
        PurchaseView {
            buyer: self.buyer,
            start_ticket: self.start_ticket,
            quantity: self.quantity,
            commitment: self.commitment,
            revealed: self.revealed,
        }
    }
}

/// Ordered index over a lottery's purchases.
///
/// Addressed by `["purchase_slot", lottery_id, index]`.
#[account]
#[derive(InitSpace)]
pub struct PurchaseSlot {
    /// Lottery the purchase belongs to.
    pub lottery_id: u64,
    /// 1-based position, matching the record's `index`.
    pub index: u32,
    /// Address of the purchase record at this position.
    pub record: Pubkey,
    /// Bump of the slot PDA.
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LotteryInfo {
    pub id: u64,
    pub created_at: i64,
    pub draw_at: i64,
    pub capacity: u32,
    pub winner_count: u32,
    pub min_percentage: u8,
    pub unit_price: u64,
    pub status: LotteryStatus,
    pub sold_count: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LotteryMetadata {
    pub html_hash: [u8; 32],
    pub url: String,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PurchaseView {
    pub buyer: Pubkey,
    pub start_ticket: u32,
    pub quantity: u32,
    pub commitment: [u8; 32],
    pub revealed: Option<[u8; 32]>,
}
