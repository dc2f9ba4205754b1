//! State of the outpost contract.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, IbcOrder};
use cw_storage_plus::{Item, Map};
use storage_outpost_ica::message::ProtoMessage;

use crate::msg::options::ChannelOpenInitOptions;

/// The item used to store the owner of the outpost.
pub const STATE: Item<ContractState> = Item::new("state");
/// The item used to store the tracked ICA channel.
pub const CHANNEL: Item<ChannelInfo> = Item::new("ica_channel");
/// The options of the last channel the outpost opened.
pub const CHANNEL_OPEN_INIT_OPTIONS: Item<ChannelOpenInitOptions> =
    Item::new("channel_open_init_options");
/// The addresses the owner allowed to relay messages.
pub const DELEGATES: Map<&Addr, Empty> = Map::new("delegates");
/// Relayed batches keyed by `(channel_id, sequence)`.
pub const BATCHES: Map<(&str, u64), OutboundBatch> = Map::new("batches");
/// The number of batches still waiting for an acknowledgement or a timeout.
pub const PENDING_BATCHES: Item<u64> = Item::new("pending_batches");

/// The singleton state of the outpost.
#[cw_serde]
pub struct ContractState {
    /// The owner of the outpost, fixed at instantiation.
    pub owner: Addr,
}

impl ContractState {
    /// Creates a new [`ContractState`].
    #[must_use]
    pub const fn new(owner: Addr) -> Self {
        Self { owner }
    }
}

/// The handshake state of the tracked channel.
#[cw_serde]
#[derive(Default, Copy)]
pub enum ChannelState {
    /// No handshake was started yet.
    #[default]
    Uninitialized,
    /// `ChanOpenInit` (or `ChanOpenTry`) went through, the handshake is not finished.
    HandshakeInProgress,
    /// The channel is open.
    Open,
    /// The channel was closed.
    Closed,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            Self::Uninitialized => "uninitialized",
            Self::HandshakeInProgress => "handshake_in_progress",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(state)
    }
}

/// The channel tracked by the outpost and the interchain account bound to it.
#[cw_serde]
#[derive(Default)]
pub struct ChannelInfo {
    /// The handshake state.
    pub state: ChannelState,
    /// The port of the outpost, `wasm.<contract address>`.
    pub port_id: String,
    /// The channel id on this chain.
    pub channel_id: String,
    /// The connection the channel runs over.
    pub connection_id: String,
    /// The ordering of the channel.
    pub ordering: Option<IbcOrder>,
    /// The interchain account address registered by the host.
    pub ica_address: Option<String>,
}

impl ChannelInfo {
    /// Returns true if the channel is open and bound to an interchain account.
    #[must_use]
    pub const fn is_ready_to_relay(&self) -> bool {
        matches!(self.state, ChannelState::Open) && self.ica_address.is_some()
    }

    /// Returns true if `channel_id` is the tracked channel.
    #[must_use]
    pub fn is_tracking(&self, channel_id: &str) -> bool {
        !self.channel_id.is_empty() && self.channel_id == channel_id
    }
}

/// The lifecycle of a relayed batch.
#[cw_serde]
pub enum BatchStatus {
    /// The packet was sent and is waiting for an acknowledgement or a timeout.
    Pending,
    /// The host executed every message.
    Succeeded,
    /// The host rejected the batch, or the packet timed out.
    Failed {
        /// The error reported by the host, or `timeout`
        reason: String,
    },
}

/// One relay request and its outcome.
#[cw_serde]
pub struct OutboundBatch {
    /// The packet sequence assigned by the IBC module.
    pub sequence: u64,
    /// The channel the packet was sent over.
    pub channel_id: String,
    /// The messages sent to the interchain account, in order.
    pub messages: Vec<ProtoMessage>,
    /// The current status.
    pub status: BatchStatus,
    /// The per-message responses of the host, set on success.
    pub responses: Vec<ProtoMessage>,
    /// The sender of the relay request.
    pub submitted_by: Addr,
}

impl OutboundBatch {
    /// Returns true once the batch was acknowledged or timed out.
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        !matches!(self.status, BatchStatus::Pending)
    }
}
