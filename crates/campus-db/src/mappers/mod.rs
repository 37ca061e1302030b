//! Entity <-> model mappers

mod answer;
mod ledger;
mod question;
mod user;
mod vote;
