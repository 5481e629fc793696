// Lifecycle scenarios driven through the same state methods the instruction
// handlers call, with explicit timestamps instead of the Clock sysvar.

use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use commit_reveal_lottery::draw::{commitment_of, draw_winners, number_word};
use commit_reveal_lottery::error::LotteryError;
use commit_reveal_lottery::phase::{reveal_start, Phase};
use commit_reveal_lottery::state::{
    DrawOutcome, Lottery, LotteryParams, LotteryStatus, PurchaseRecord, Registry,
};

const NOW: i64 = 1_732_000_000;
const DRAW_AT: i64 = NOW + 3_600;

fn assert_lottery_err<T: std::fmt::Debug>(result: Result<T>, expected: LotteryError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, u32::from(expected), "{}", err.error_msg)
        }
        other => panic!("expected {}, got {:?}", expected, other),
    }
}

/// Minimal stand-in for the registry plus the accounts it creates.
struct Harness {
    registry: Registry,
    lotteries: Vec<Lottery>,
    purchases: Vec<Vec<PurchaseRecord>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            registry: Registry {
                authority: Pubkey::new_unique(),
                current_lottery_id: 0,
                payment_mint: Pubkey::new_unique(),
                bump: 255,
            },
            lotteries: Vec::new(),
            purchases: Vec::new(),
        }
    }

    fn create(
        &mut self,
        capacity: u32,
        winner_count: u32,
        min_percentage: u8,
        unit_price: u64,
    ) -> u64 {
        let params = LotteryParams {
            draw_at: DRAW_AT,
            capacity,
            winner_count,
            min_percentage,
            unit_price,
            html_hash: [1u8; 32],
            url: "node101.io".to_string(),
        };
        params.validate(NOW).unwrap();

        let id = self.registry.next_lottery_id().unwrap();
        self.registry.current_lottery_id = id;
        self.lotteries.push(Lottery::new(
            id,
            params,
            NOW,
            self.registry.payment_mint,
            Pubkey::new_unique(),
            255,
        ));
        self.purchases.push(Vec::new());
        id
    }

    fn lottery(&self, id: u64) -> &Lottery {
        &self.lotteries[(id - 1) as usize]
    }

    fn lottery_mut(&mut self, id: u64) -> &mut Lottery {
        &mut self.lotteries[(id - 1) as usize]
    }

    fn records(&self, id: u64) -> &[PurchaseRecord] {
        &self.purchases[(id - 1) as usize]
    }

    fn buy(&mut self, id: u64, buyer: Pubkey, quantity: u32, value: u64, now: i64) -> Result<u32> {
        let commitment = commitment_of(&number_word(value));
        let allocation = self.lottery_mut(id).allocate(now, quantity, &commitment)?;
        self.purchases[(id - 1) as usize].push(PurchaseRecord::new(
            id, allocation, buyer, quantity, commitment, 255,
        ));
        Ok(allocation.start_ticket)
    }

    fn reveal(
        &mut self,
        id: u64,
        caller: Pubkey,
        start: u32,
        quantity: u32,
        value: u64,
        now: i64,
    ) -> Result<()> {
        let lottery = &mut self.lotteries[(id - 1) as usize];
        let record = self.purchases[(id - 1) as usize]
            .iter_mut()
            .find(|r| r.start_ticket == start && r.quantity == quantity)
            .ok_or(LotteryError::PurchaseNotFound)?;
        lottery.reveal(record, caller, start, quantity, number_word(value), now)
    }

    fn record_for(&self, id: u64, ticket_no: u32) -> PurchaseRecord {
        self.records(id)
            .iter()
            .find(|r| r.contains(ticket_no))
            .cloned()
            .unwrap()
    }
}

#[test]
fn test_zero_purchases_cancels() {
    let mut h = Harness::new();
    let id = h.create(100, 5, 20, 10);

    let outcome = h.lottery_mut(id).finalize(DRAW_AT).unwrap();
    assert_eq!(outcome, DrawOutcome::Canceled);
    assert_eq!(h.lottery(id).status, LotteryStatus::Canceled);
    assert!(h.lottery(id).winning_tickets.is_empty());
}

#[test]
fn test_two_buyers_reveal_and_draw() {
    let mut h = Harness::new();
    let id = h.create(30, 5, 20, 10);
    let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());

    assert_eq!(h.buy(id, a, 3, 101, NOW + 5).unwrap(), 1);
    assert_eq!(h.buy(id, b, 3, 100, NOW + 6).unwrap(), 4);
    assert_eq!(h.lottery(id).sold_count, 6);
    assert_eq!(h.lottery(id).ticket_cost(3).unwrap(), 30);

    let reveal_at = reveal_start(NOW, DRAW_AT);
    assert_eq!(h.lottery(id).phase(reveal_at), Phase::Reveal);
    h.reveal(id, a, 1, 3, 101, reveal_at).unwrap();
    h.reveal(id, b, 4, 3, 100, reveal_at + 1).unwrap();

    match h.lottery_mut(id).finalize(DRAW_AT).unwrap() {
        DrawOutcome::Finalized(winners) => {
            assert_eq!(winners.len(), 5);
            let unique: BTreeSet<u32> = winners.iter().copied().collect();
            assert_eq!(unique.len(), 5);
            assert!(winners.iter().all(|t| (1..=6).contains(t)));
            assert_eq!(winners, vec![4, 5, 3, 1, 6]);
        }
        DrawOutcome::Canceled => panic!("threshold of 6 tickets was met"),
    }

    assert_lottery_err(
        h.lottery_mut(id).finalize(DRAW_AT + 10),
        LotteryError::LotteryAlreadySettled,
    );
}

#[test]
fn test_unrevealed_purchases_contribute_no_entropy() {
    let mut h = Harness::new();
    let id = h.create(30, 5, 20, 10);
    let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
    h.buy(id, a, 3, 101, NOW).unwrap();
    h.buy(id, b, 3, 100, NOW).unwrap();
    h.reveal(id, a, 1, 3, 101, reveal_start(NOW, DRAW_AT)).unwrap();

    let outcome = h.lottery_mut(id).finalize(DRAW_AT).unwrap();
    assert_eq!(
        outcome,
        DrawOutcome::Finalized(draw_winners(&number_word(101), 6, 5))
    );
}

#[test]
fn test_quantity_limits_hold_regardless_of_capacity() {
    let mut h = Harness::new();
    let id = h.create(1_000, 5, 20, 10);
    let buyer = Pubkey::new_unique();

    assert_lottery_err(h.buy(id, buyer, 31, 101, NOW), LotteryError::InvalidQuantity);
    assert_lottery_err(h.buy(id, buyer, 0, 101, NOW), LotteryError::InvalidQuantity);
    assert_eq!(h.buy(id, buyer, 30, 101, NOW).unwrap(), 1);
}

#[test]
fn test_purchases_outside_sale_fail() {
    let mut h = Harness::new();
    let id = h.create(100, 5, 20, 10);
    let buyer = Pubkey::new_unique();

    assert_lottery_err(
        h.buy(id, buyer, 1, 101, reveal_start(NOW, DRAW_AT)),
        LotteryError::PurchasePhaseEnded,
    );
    assert_lottery_err(h.buy(id, buyer, 1, 101, DRAW_AT), LotteryError::PurchasePhaseEnded);
    assert_eq!(h.lottery(id).sold_count, 0);
}

#[test]
fn test_reveal_only_by_buyer_during_reveal() {
    let mut h = Harness::new();
    let id = h.create(100, 10, 50, 10);
    let (buyer, other) = (Pubkey::new_unique(), Pubkey::new_unique());
    h.buy(id, buyer, 1, 101, NOW).unwrap();

    assert_lottery_err(
        h.reveal(id, buyer, 1, 1, 101, NOW + 1),
        LotteryError::RevealPhaseNotStarted,
    );

    let reveal_at = NOW + 1_801;
    assert_lottery_err(
        h.reveal(id, other, 1, 1, 101, reveal_at),
        LotteryError::NotTicketBuyer,
    );
    assert_lottery_err(
        h.reveal(id, buyer, 1, 2, 101, reveal_at),
        LotteryError::PurchaseNotFound,
    );
    h.reveal(id, buyer, 1, 1, 101, reveal_at).unwrap();

    assert_lottery_err(
        h.reveal(id, buyer, 1, 1, 101, DRAW_AT),
        LotteryError::RevealPhaseEnded,
    );
}

#[test]
fn test_ranges_tile_sold_tickets() {
    let mut h = Harness::new();
    let id = h.create(500, 10, 1, 3);

    let mut expected_start = 1;
    for i in 0..40u32 {
        let quantity = i % 30 + 1;
        let value = u64::from(i) + 1;
        if h.lottery(id).sold_count + quantity > 500 {
            assert_lottery_err(
                h.buy(id, Pubkey::new_unique(), quantity, value, NOW),
                LotteryError::NotEnoughTickets,
            );
            continue;
        }
        let start = h.buy(id, Pubkey::new_unique(), quantity, value, NOW).unwrap();
        assert_eq!(start, expected_start);
        expected_start += quantity;
    }

    let sold = h.lottery(id).sold_count;
    let purchase_count = h.lottery(id).purchase_count;
    let records = h.records(id);
    assert_eq!(records.iter().map(|r| r.quantity).sum::<u32>(), sold);
    assert_eq!(records.len() as u32, purchase_count);
    for ticket in 1..=sold {
        assert_eq!(records.iter().filter(|r| r.contains(ticket)).count(), 1);
    }
    assert!(sold <= 500);
}

#[test]
fn test_purchase_index_lookup() {
    let mut h = Harness::new();
    let id = h.create(100, 10, 50, 10);
    h.buy(id, Pubkey::new_unique(), 4, 101, NOW).unwrap();
    h.buy(id, Pubkey::new_unique(), 3, 100, NOW).unwrap();

    h.lottery(id).check_purchase_index(2).unwrap();
    let view = h.records(id)[1].view();
    assert_eq!((view.start_ticket, view.quantity), (5, 3));
    assert_eq!(view.commitment, commitment_of(&number_word(100)));
    assert_eq!(view.revealed, None);

    assert_lottery_err(h.lottery(id).check_purchase_index(3), LotteryError::IndexOutOfBounds);
}

#[test]
fn test_winning_ticket_queries_after_finalize() {
    let mut h = Harness::new();
    let id = h.create(50, 4, 10, 10);
    let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
    h.buy(id, a, 2, 101, NOW).unwrap();
    h.buy(id, b, 4, 100, NOW).unwrap();
    let reveal_at = NOW + 1_801;
    h.reveal(id, a, 1, 2, 101, reveal_at).unwrap();
    h.reveal(id, b, 3, 4, 100, reveal_at).unwrap();

    let record_a = h.record_for(id, 1);
    assert_lottery_err(
        h.lottery(id).owns_winning_ticket(&record_a, a, 1, reveal_at),
        LotteryError::RevealPhaseNotEnded,
    );
    assert_lottery_err(
        h.lottery(id).winning_ticket_at(1, reveal_at),
        LotteryError::RevealPhaseNotEnded,
    );

    h.lottery_mut(id).finalize(DRAW_AT).unwrap();
    let lottery = h.lottery(id);
    let winners = lottery.winning_tickets.clone();
    assert_eq!(winners, vec![4, 5, 3, 1]);

    for (rank, ticket) in winners.iter().enumerate() {
        assert_eq!(lottery.winning_ticket_at(rank as u32 + 1, DRAW_AT).unwrap(), *ticket);
    }
    assert_lottery_err(lottery.winning_ticket_at(10, DRAW_AT), LotteryError::IndexOutOfBounds);

    for ticket in 1..=6u32 {
        let record = h.record_for(id, ticket);
        let owner = record.buyer;
        let won = lottery.owns_winning_ticket(&record, owner, ticket, DRAW_AT).unwrap();
        assert_eq!(won, winners.contains(&ticket));
        let won = lottery
            .address_owns_winning_ticket(&record, owner, ticket, DRAW_AT)
            .unwrap();
        assert_eq!(won, winners.contains(&ticket));
    }

    let record_b = h.record_for(id, 3);
    assert_lottery_err(
        lottery.owns_winning_ticket(&record_b, a, 3, DRAW_AT),
        LotteryError::NotTicketOwner,
    );
    assert_lottery_err(
        lottery.owns_winning_ticket(&record_a, a, 10, DRAW_AT),
        LotteryError::TicketNotOwned,
    );
    assert_lottery_err(
        lottery.address_owns_winning_ticket(&record_b, a, 3, DRAW_AT),
        LotteryError::TicketNotOwned,
    );
}

#[test]
fn test_lottery_ids_and_payment_mint_capture() {
    let mut h = Harness::new();
    assert_eq!(h.registry.current_lottery_id, 0);

    let first_mint = h.registry.payment_mint;
    let first = h.create(100, 10, 50, 10);
    let new_mint = Pubkey::new_unique();
    h.registry.set_payment_medium(new_mint).unwrap();
    let second = h.create(200, 150, 60, 20);

    assert_eq!((first, second), (1, 2));
    assert_eq!(h.registry.current_lottery_id, 2);
    assert_eq!(h.lottery(first).payment_mint, first_mint);
    assert_eq!(h.lottery(second).payment_mint, new_mint);

    let info = h.lottery(second).info();
    assert_eq!(
        (info.capacity, info.winner_count, info.min_percentage, info.unit_price),
        (200, 150, 60, 20)
    );
    assert_eq!(h.lottery(second).metadata().url, "node101.io");
}
