//! Tracks the handshake of the ICA channel and the interchain account bound to it.
//!
//! IBC callbacks are turned into [`ChannelEvent`]s and applied to the stored
//! [`ChannelInfo`]. A channel instance binds at most one account address, which is
//! dropped again when the channel closes.

use cosmwasm_std::{IbcOrder, StdResult, Storage};

use crate::{
    state::{ChannelInfo, ChannelState, CHANNEL},
    ContractError,
};

/// An inbound event of the channel lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelEvent {
    /// `ChanOpenInit` on this chain.
    OpenInit {
        /// The port of the outpost
        port_id: String,
        /// The new channel id
        channel_id: String,
        /// The connection of the channel
        connection_id: String,
        /// The channel ordering
        ordering: IbcOrder,
    },
    /// `ChanOpenTry` on this chain.
    OpenTry {
        /// The port of the outpost
        port_id: String,
        /// The new channel id
        channel_id: String,
        /// The connection of the channel
        connection_id: String,
        /// The channel ordering
        ordering: IbcOrder,
    },
    /// `ChanOpenAck` for the handshaking channel.
    OpenAck {
        /// The channel id
        channel_id: String,
    },
    /// `ChanOpenConfirm` for the handshaking channel.
    OpenConfirm {
        /// The channel id
        channel_id: String,
    },
    /// The host registered the interchain account.
    AccountRegistered {
        /// The channel id
        channel_id: String,
        /// The interchain account address
        address: String,
    },
    /// The channel was closed.
    Close {
        /// The channel id
        channel_id: String,
    },
}

impl ChannelEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::OpenInit { .. } => "open_init",
            Self::OpenTry { .. } => "open_try",
            Self::OpenAck { .. } => "open_ack",
            Self::OpenConfirm { .. } => "open_confirm",
            Self::AccountRegistered { .. } => "account_registered",
            Self::Close { .. } => "close",
        }
    }
}

impl ChannelInfo {
    /// Applies `event` and returns the resulting channel.
    /// # Errors
    /// Returns [`ContractError::InvalidChannelTransition`] if the event is not allowed in
    /// the current state or names another channel.
    pub fn transition(self, event: ChannelEvent) -> Result<Self, ContractError> {
        let rejected = |info: &Self, event: &ChannelEvent| ContractError::InvalidChannelTransition {
            state: info.state,
            event: event.name().to_string(),
        };

        match event {
            ChannelEvent::OpenInit {
                port_id,
                channel_id,
                connection_id,
                ordering,
            }
            | ChannelEvent::OpenTry {
                port_id,
                channel_id,
                connection_id,
                ordering,
            } if !matches!(self.state, ChannelState::Open) => Ok(Self {
                state: ChannelState::HandshakeInProgress,
                port_id,
                channel_id,
                connection_id,
                ordering: Some(ordering),
                ica_address: None,
            }),
            ChannelEvent::OpenAck { ref channel_id } | ChannelEvent::OpenConfirm { ref channel_id }
                if matches!(self.state, ChannelState::HandshakeInProgress)
                    && self.is_tracking(channel_id) =>
            {
                Ok(Self {
                    state: ChannelState::Open,
                    ..self
                })
            }
            ChannelEvent::AccountRegistered {
                ref channel_id,
                ref address,
            } if matches!(self.state, ChannelState::Open) && self.is_tracking(channel_id) => {
                if self
                    .ica_address
                    .as_ref()
                    .is_some_and(|registered| registered != address)
                {
                    return Err(rejected(&self, &event));
                }
                Ok(Self {
                    ica_address: Some(address.clone()),
                    ..self
                })
            }
            ChannelEvent::Close { ref channel_id } if self.is_tracking(channel_id) => {
                let state = self.state;
                match state {
                    ChannelState::Closed => Ok(self),
                    ChannelState::HandshakeInProgress | ChannelState::Open => Ok(Self {
                        state: ChannelState::Closed,
                        ica_address: None,
                        ..self
                    }),
                    ChannelState::Uninitialized => Err(rejected(&self, &event)),
                }
            }
            event => Err(rejected(&self, &event)),
        }
    }
}

/// Loads the tracked channel, [`ChannelInfo::default`] before the first handshake.
/// # Errors
/// Returns an error if the stored channel cannot be deserialized.
pub fn load(storage: &dyn Storage) -> StdResult<ChannelInfo> {
    Ok(CHANNEL.may_load(storage)?.unwrap_or_default())
}

/// Applies `event` to the stored channel and saves the result.
/// # Errors
/// Returns an error if the transition is rejected or storage fails.
pub fn apply(storage: &mut dyn Storage, event: ChannelEvent) -> Result<ChannelInfo, ContractError> {
    let channel = load(storage)?.transition(event)?;
    CHANNEL.save(storage, &channel)?;
    Ok(channel)
}

/// Returns the interchain account address bound to the outpost.
/// # Errors
/// Returns [`ContractError::NotReady`] if no account is registered.
pub fn current_account_address(storage: &dyn Storage) -> Result<String, ContractError> {
    load(storage)?.ica_address.ok_or(ContractError::NotReady)
}

/// Returns true if the outpost can relay messages.
/// # Errors
/// Returns an error if the stored channel cannot be deserialized.
pub fn is_ready_to_relay(storage: &dyn Storage) -> StdResult<bool> {
    Ok(load(storage)?.is_ready_to_relay())
}
