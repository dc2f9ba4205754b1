#![doc = include_str!("../README.md")]
#![deny(
    clippy::nursery,
    clippy::pedantic,
    warnings,
    missing_docs,
    unused_crate_dependencies
)]

pub mod auth;
pub mod channel;
pub mod contract;
pub mod error;
pub mod execute;
pub mod helpers;
pub mod ibc;
pub mod keys;
pub mod msg;
pub mod query;
pub mod reconcile;
pub mod relay;
pub mod state;

#[cfg(test)]
pub mod test;

pub use error::ContractError;
