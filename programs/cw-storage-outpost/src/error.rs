//! Defines the [`ContractError`] type.

use cosmwasm_std::StdError;
use storage_outpost_ica::CodecError;
use thiserror::Error;

use crate::state::ChannelState;

/// Errors returned by the outpost entry points.
#[derive(Error, Debug)]
pub enum ContractError {
    /// Standard `CosmWasm` error
    #[error("{0}")]
    Std(#[from] StdError),

    /// The caller supplied an argument the outpost cannot act on
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The sender is neither the owner nor, where allowed, a delegate
    #[error("unauthorized")]
    Unauthorized,

    /// The channel is not open or the interchain account is not registered yet
    #[error("the ica channel is not ready to relay messages")]
    ChannelNotReady,

    /// No interchain account address is bound to the outpost
    #[error("the interchain account is not registered")]
    NotReady,

    /// The packet could not be handed to the IBC module
    #[error("packet submission failed: {0}")]
    SubmissionFailed(String),

    /// The channel event is not allowed in the current channel state
    #[error("invalid channel transition: {event} in state {state}")]
    InvalidChannelTransition {
        /// The state the channel was in
        state: ChannelState,
        /// The rejected event
        event: String,
    },

    /// The channel version or the counterparty is not an ICS-27 host
    #[error("invalid channel metadata: {0}")]
    InvalidChannelMetadata(String),

    /// The outpost only acts as a controller and never accepts `ChanOpenTry`
    #[error("channel open try is not supported by an ica controller")]
    ChannelOpenTryNotSupported,

    /// The migration does not move to a newer version of this contract
    #[error("invalid migration version: expected {expected}, got {actual}")]
    InvalidMigrationVersion {
        /// The expected version or contract name
        expected: String,
        /// The actual version or contract name
        actual: String,
    },

    /// A submessage reply with an id the outpost never used
    #[error("unknown reply id: {0}")]
    UnknownReplyId(u64),

    /// Semver parsing error
    #[error("semver parse error: {0}")]
    Semver(#[from] semver::Error),

    /// Codec error that is neither an argument nor a metadata error
    #[error("{0}")]
    Codec(CodecError),
}

impl From<CodecError> for ContractError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Std(e) => Self::Std(e),
            CodecError::InvalidMetadata(reason) => Self::InvalidChannelMetadata(reason),
            e if e.is_invalid_argument() => Self::InvalidArgument(e.to_string()),
            e => Self::Codec(e),
        }
    }
}
