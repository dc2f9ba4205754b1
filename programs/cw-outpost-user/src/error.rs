//! Defines the [`ContractError`] type.

use cosmwasm_std::StdError;
use thiserror::Error;

/// Errors returned by the outpost user.
#[derive(Error, Debug)]
pub enum ContractError {
    /// Standard `CosmWasm` error
    #[error("{0}")]
    Std(#[from] StdError),

    /// The sender is not the owner
    #[error("unauthorized")]
    Unauthorized,

    /// No outpost address was saved yet
    #[error("the outpost address is not set")]
    OutpostNotSet,
}
