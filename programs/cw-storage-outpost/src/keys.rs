//! Constants used by the outpost contract.

/// The name of the contract, stored with `cw2`.
pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// The version of the contracts state.
/// It is used to validate migrations.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timeout applied to relayed packets when the caller does not pick one.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 600;

/// The reply id of the `IbcMsg::SendPacket` submessage.
pub const SEND_PACKET_REPLY_ID: u64 = 1;

/// Default page size of batch listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Maximum page size of batch listings.
pub const MAX_PAGE_LIMIT: u32 = 30;

/// Type URL of the response wasmd returns for `IbcMsg::SendPacket`.
pub const MSG_IBC_SEND_RESPONSE_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgIBCSendResponse";

/// Reason recorded for batches whose packet timed out.
pub const TIMEOUT_REASON: &str = "timeout";
