//! Defines the [`CodecError`] type.

use cosmwasm_std::StdError;
use thiserror::Error;

/// Errors produced while encoding packets or decoding acknowledgements and metadata.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Standard `CosmWasm` error
    #[error("{0}")]
    Std(#[from] StdError),

    /// A relay batch must carry at least one message
    #[error("message batch is empty")]
    EmptyBatch,

    /// The message cannot be executed by an interchain account
    #[error("unsupported message: {0}")]
    UnsupportedMessage(String),

    /// The packet memo is longer than the host accepts
    #[error("packet memo is {len} bytes long, the maximum is {max}")]
    MemoTooLong {
        /// The length of the given memo
        len: usize,
        /// The maximum allowed length
        max: usize,
    },

    /// The host returned a packet-level error acknowledgement
    #[error("remote execution failed: {0}")]
    RemoteExecutionFailed(String),

    /// The acknowledgement bytes could not be interpreted
    #[error("malformed acknowledgement: {0}")]
    MalformedAcknowledgement(String),

    /// The ICS-27 channel version metadata is invalid
    #[error("invalid channel metadata: {0}")]
    InvalidMetadata(String),

    /// Prost decoding error
    #[error("prost decoding error: {0}")]
    ProstDecodeError(#[from] prost::DecodeError),
}

impl CodecError {
    /// Returns true if the error was caused by the caller's input rather than
    /// by the host or by the wire format.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::EmptyBatch | Self::UnsupportedMessage(_) | Self::MemoTooLong { .. }
        )
    }
}
