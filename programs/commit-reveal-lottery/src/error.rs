use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    // Lottery configuration
    #[msg("Draw time must be in the future!")]
    InvalidDrawTime,

    #[msg("Number of tickets must be greater than zero!")]
    InvalidTicketCount,

    #[msg("Number of winners must be between one and the number of tickets!")]
    InvalidWinnerCount,

    #[msg("Number of winners exceeds 2460, the most a lottery account can store!")]
    TooManyWinners,

    #[msg("Minimum percentage must be greater than 0 and less than or equal to 100!")]
    InvalidMinPercentage,

    #[msg("Ticket price must be greater than zero!")]
    InvalidTicketPrice,

    #[msg("Result page URL is too long!")]
    UrlTooLong,

    // Purchase
    #[msg("Purchase phase has ended!")]
    PurchasePhaseEnded,

    #[msg("Quantity must be greater than zero and less than or equal to 30!")]
    InvalidQuantity,

    #[msg("Not enough tickets left!")]
    NotEnoughTickets,

    #[msg("Random number must not be zero!")]
    ZeroCommitment,

    // Reveal
    #[msg("No purchase matches the given starting ticket and quantity!")]
    PurchaseNotFound,

    #[msg("Reveal phase has not started yet!")]
    RevealPhaseNotStarted,

    #[msg("Reveal phase has ended!")]
    RevealPhaseEnded,

    #[msg("Only the buyer can reveal the random number!")]
    NotTicketBuyer,

    #[msg("Random number has already been revealed!")]
    AlreadyRevealed,

    #[msg("Revealed number does not match the commitment!")]
    CommitmentMismatch,

    // Settlement
    #[msg("Reveal phase has not ended yet!")]
    RevealPhaseNotEnded,

    #[msg("Lottery has already been finalized or canceled!")]
    LotteryAlreadySettled,

    #[msg("Lottery has not been finalized!")]
    LotteryNotFinalized,

    // Queries
    #[msg("Index out of bounds!")]
    IndexOutOfBounds,

    #[msg("Ticket does not exist or is unowned!")]
    TicketNotOwned,

    #[msg("Ticket does not belong to the caller!")]
    NotTicketOwner,

    // Administration
    #[msg("Not authorized")]
    NotAuthorized,

    #[msg("Invalid token address!")]
    InvalidPaymentMedium,

    #[msg("Token address is the same as the current one!")]
    SamePaymentMedium,

    #[msg("Mathematical operation overflow occurred")]
    MathOverflow,
}
