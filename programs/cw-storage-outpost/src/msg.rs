//! # Messages
//!
//! This module defines the messages the outpost receives and the responses it returns.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, CosmosMsg};

use crate::state::{ChannelInfo, ChannelState, OutboundBatch};

/// The message to instantiate the outpost.
#[cw_serde]
pub struct InstantiateMsg {
    /// The owner of the outpost. If not specified, the sender is the owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Addresses allowed to relay messages besides the owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegates: Option<Vec<String>>,
    /// The options to open the ICA channel right away.
    /// If not specified, the owner opens the channel later with [`ExecuteMsg::CreateChannel`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_open_init_options: Option<options::ChannelOpenInitOptions>,
}

/// The messages to execute the outpost.
#[cw_serde]
pub enum ExecuteMsg {
    /// Submits a `MsgChannelOpenInit` for a new ICA channel. Owner only.
    CreateChannel {
        /// The options of the new channel.
        /// If not specified, the options of the last created channel are reused.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel_open_init_options: Option<options::ChannelOpenInitOptions>,
    },
    /// Closes the tracked channel. Owner only.
    CloseChannel {},
    /// Converts the messages into one ICA transaction and sends it to the host.
    /// Allowed for the owner and the delegates.
    SendCosmosMsgs {
        /// The messages to execute on the host, in order.
        messages: Vec<CosmosMsg>,
        /// Optional memo of the ICA packet.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        packet_memo: Option<String>,
        /// Optional packet timeout in seconds,
        /// [`DEFAULT_TIMEOUT_SECONDS`](crate::keys::DEFAULT_TIMEOUT_SECONDS) if not specified.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_seconds: Option<u64>,
    },
    /// Allows `address` to relay messages. Owner only.
    AddDelegate {
        /// The delegate address
        address: String,
    },
    /// Revokes a delegate. Owner only.
    RemoveDelegate {
        /// The delegate address
        address: String,
    },
}

/// The messages to query the outpost.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the owner, the channel and the number of pending batches.
    #[returns(ContractStateResponse)]
    GetContractState {},
    /// Returns the owner of the outpost.
    #[returns(OwnershipResponse)]
    Ownership {},
    /// Returns the tracked channel.
    #[returns(ChannelInfo)]
    GetChannel {},
    /// Returns a relayed batch.
    #[returns(OutboundBatch)]
    GetBatch {
        /// The channel of the batch, the tracked channel if not specified.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel_id: Option<String>,
        /// The packet sequence of the batch.
        sequence: u64,
    },
    /// Lists relayed batches ordered by `(channel_id, sequence)`.
    #[returns(BatchesResponse)]
    ListBatches {
        /// Start after this `(channel_id, sequence)`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_after: Option<(String, u64)>,
        /// The page size, at most [`MAX_PAGE_LIMIT`](crate::keys::MAX_PAGE_LIMIT).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    },
    /// Returns the registered delegates.
    #[returns(DelegatesResponse)]
    Delegates {},
    /// Returns whether `address` may relay messages.
    #[returns(bool)]
    IsAuthorized {
        /// The address to check
        address: String,
    },
}

/// The message to migrate the outpost.
#[cw_serde]
pub struct MigrateMsg {}

/// The data of a successful [`ExecuteMsg::SendCosmosMsgs`].
#[cw_serde]
pub struct SendCosmosMsgsResponse {
    /// The sequence of the sent packet.
    pub sequence: u64,
}

/// The response of [`QueryMsg::GetContractState`].
#[cw_serde]
pub struct ContractStateResponse {
    /// The owner of the outpost.
    pub owner: Addr,
    /// The handshake state of the tracked channel.
    pub channel_state: ChannelState,
    /// The port of the tracked channel.
    pub port_id: String,
    /// The id of the tracked channel.
    pub channel_id: String,
    /// The interchain account address, if registered.
    pub ica_address: Option<String>,
    /// The number of batches waiting for an acknowledgement.
    pub pending_batches: u64,
}

/// The response of [`QueryMsg::Ownership`].
#[cw_serde]
pub struct OwnershipResponse {
    /// The owner of the outpost.
    pub owner: Addr,
}

/// The response of [`QueryMsg::ListBatches`].
#[cw_serde]
pub struct BatchesResponse {
    /// The batches of the page.
    pub batches: Vec<OutboundBatch>,
}

/// The response of [`QueryMsg::Delegates`].
#[cw_serde]
pub struct DelegatesResponse {
    /// The registered delegates.
    pub delegates: Vec<Addr>,
}

/// Option types for other messages.
pub mod options {
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::IbcOrder;
    use storage_outpost_ica::keys::HOST_PORT_ID;

    /// The data the outpost needs to submit a `MsgChannelOpenInit`.
    #[cw_serde]
    pub struct ChannelOpenInitOptions {
        /// The connection id on this chain.
        pub connection_id: String,
        /// The connection id on the host chain.
        pub counterparty_connection_id: String,
        /// The counterparty port id, [`HOST_PORT_ID`] if not specified.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub counterparty_port_id: Option<String>,
        /// The ordering of the channel, [`IbcOrder::Ordered`] if not specified.
        /// [`IbcOrder::Unordered`] requires ibc-go v8.1.0 or later on the host.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub channel_ordering: Option<IbcOrder>,
    }

    impl ChannelOpenInitOptions {
        /// Returns the counterparty port id.
        #[must_use]
        pub fn counterparty_port_id(&self) -> String {
            self.counterparty_port_id
                .clone()
                .unwrap_or_else(|| HOST_PORT_ID.to_string())
        }

        /// Returns the channel ordering.
        #[must_use]
        pub fn channel_ordering(&self) -> IbcOrder {
            self.channel_ordering.clone().unwrap_or(IbcOrder::Ordered)
        }
    }
}
