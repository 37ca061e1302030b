//! Domain entities - core business objects

mod answer;
mod ledger;
mod notification;
mod question;
mod user;
mod vote;

pub use answer::Answer;
pub use ledger::{LedgerEntry, LedgerKind, NewLedgerEntry, ReferenceType};
pub use notification::{NotificationIntent, NotificationKind};
pub use question::Question;
pub use user::User;
pub use vote::{Vote, VoteDirection, VoteState, VoteTransition};
