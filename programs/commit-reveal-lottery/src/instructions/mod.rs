pub mod admin;
pub mod buy_ticket;
pub mod finalize_lottery;
pub mod queries;
pub mod reveal_number;

pub use admin::*;
pub use buy_ticket::*;
pub use finalize_lottery::*;
pub use queries::*;
pub use reveal_number::*;
