//! The IBC entry points of the outpost.
//!
//! Handshake callbacks feed the channel tracker, packet callbacks feed the reconciler.

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    DepsMut, Env, Event, Ibc3ChannelOpenResponse, IbcBasicResponse, IbcChannel,
    IbcChannelCloseMsg, IbcChannelConnectMsg, IbcChannelOpenMsg, IbcChannelOpenResponse,
    IbcOrder, IbcPacketAckMsg, IbcPacketReceiveMsg, IbcPacketTimeoutMsg, IbcReceiveResponse,
};
use storage_outpost_ica::{ack::AcknowledgementData, keys::HOST_PORT_ID, metadata::IcaMetadata};

use crate::{
    channel::{self, ChannelEvent},
    reconcile::{self, PacketOutcome},
    ContractError,
};

/// Handles `ChanOpenInit`. `ChanOpenTry` is rejected, the outpost only controls accounts.
/// # Errors
/// Returns an error if the counterparty is not an ICS-27 host or the tracked channel is open.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn ibc_channel_open(
    deps: DepsMut,
    _env: Env,
    msg: IbcChannelOpenMsg,
) -> Result<IbcChannelOpenResponse, ContractError> {
    match msg {
        IbcChannelOpenMsg::OpenInit { channel } => {
            let metadata = validate_host_channel(&channel, &channel.version)?;

            channel::apply(
                deps.storage,
                ChannelEvent::OpenInit {
                    port_id: channel.endpoint.port_id,
                    channel_id: channel.endpoint.channel_id,
                    connection_id: channel.connection_id,
                    ordering: channel.order,
                },
            )?;

            Ok(Some(Ibc3ChannelOpenResponse {
                version: metadata.to_version()?,
            }))
        }
        IbcChannelOpenMsg::OpenTry { .. } => Err(ContractError::ChannelOpenTryNotSupported),
    }
}

/// Handles `ChanOpenAck` and `ChanOpenConfirm`. The acknowledgement carries the address
/// of the interchain account in the counterparty version.
/// # Errors
/// Returns an error if the host metadata is invalid or the channel is not handshaking.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn ibc_channel_connect(
    deps: DepsMut,
    _env: Env,
    msg: IbcChannelConnectMsg,
) -> Result<IbcBasicResponse, ContractError> {
    match msg {
        IbcChannelConnectMsg::OpenAck {
            channel,
            counterparty_version,
        } => {
            let metadata = validate_host_channel(&channel, &counterparty_version)?;
            let address = metadata
                .account_address()
                .ok_or_else(|| {
                    ContractError::InvalidChannelMetadata(
                        "the host did not register an interchain account".to_string(),
                    )
                })?
                .to_string();
            let channel_id = channel.endpoint.channel_id;

            channel::apply(
                deps.storage,
                ChannelEvent::OpenAck {
                    channel_id: channel_id.clone(),
                },
            )?;
            channel::apply(
                deps.storage,
                ChannelEvent::AccountRegistered {
                    channel_id: channel_id.clone(),
                    address: address.clone(),
                },
            )?;

            Ok(IbcBasicResponse::new().add_event(
                Event::new("outpost_channel_open")
                    .add_attribute("channel_id", channel_id)
                    .add_attribute("ica_address", address),
            ))
        }
        IbcChannelConnectMsg::OpenConfirm { channel } => {
            channel::apply(
                deps.storage,
                ChannelEvent::OpenConfirm {
                    channel_id: channel.endpoint.channel_id.clone(),
                },
            )?;

            Ok(IbcBasicResponse::new().add_event(
                Event::new("outpost_channel_open")
                    .add_attribute("channel_id", channel.endpoint.channel_id),
            ))
        }
    }
}

/// Handles `ChanCloseInit` and `ChanCloseConfirm`. Channels the outpost no longer tracks,
/// such as an abandoned handshake, close without touching the tracker.
/// # Errors
/// Returns an error if the tracked channel cannot be closed from its current state.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn ibc_channel_close(
    deps: DepsMut,
    _env: Env,
    msg: IbcChannelCloseMsg,
) -> Result<IbcBasicResponse, ContractError> {
    let channel_id = msg.channel().endpoint.channel_id.clone();
    let event = Event::new("outpost_channel_close").add_attribute("channel_id", &channel_id);

    if !channel::load(deps.storage)?.is_tracking(&channel_id) {
        deps.api.debug(&format!("outpost: close of untracked channel {channel_id}"));
        return Ok(
            IbcBasicResponse::new().add_event(event.add_attribute("anomaly", "untracked_channel"))
        );
    }

    channel::apply(deps.storage, ChannelEvent::Close { channel_id })?;

    Ok(IbcBasicResponse::new().add_event(event))
}

/// The host never sends packets to a controller, every packet is answered with an error.
/// # Errors
/// Returns an error if the acknowledgement cannot be serialized.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn ibc_packet_receive(
    _deps: DepsMut,
    _env: Env,
    _msg: IbcPacketReceiveMsg,
) -> Result<IbcReceiveResponse, ContractError> {
    let ack = AcknowledgementData::Error("ica controllers do not accept packets".to_string())
        .to_json_binary()?;
    Ok(IbcReceiveResponse::new(ack))
}

/// Reconciles the batch of an acknowledged packet.
/// # Errors
/// Returns an error if storage fails.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn ibc_packet_ack(
    deps: DepsMut,
    _env: Env,
    msg: IbcPacketAckMsg,
) -> Result<IbcBasicResponse, ContractError> {
    reconcile::reconcile(
        deps,
        &msg.original_packet.src.channel_id,
        msg.original_packet.sequence,
        PacketOutcome::Acknowledged(msg.acknowledgement.data),
    )
}

/// Fails the batch of a timed out packet. A timeout closes an ordered channel.
/// # Errors
/// Returns an error if storage fails.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn ibc_packet_timeout(
    mut deps: DepsMut,
    _env: Env,
    msg: IbcPacketTimeoutMsg,
) -> Result<IbcBasicResponse, ContractError> {
    let channel_id = msg.packet.src.channel_id;
    let response = reconcile::reconcile(
        deps.branch(),
        &channel_id,
        msg.packet.sequence,
        PacketOutcome::TimedOut,
    )?;

    let tracked = channel::load(deps.storage)?;
    if tracked.is_tracking(&channel_id) && tracked.ordering == Some(IbcOrder::Ordered) {
        channel::apply(deps.storage, ChannelEvent::Close { channel_id: channel_id.clone() })?;
        return Ok(response.add_event(
            Event::new("outpost_channel_close")
                .add_attribute("channel_id", channel_id)
                .add_attribute("reason", "ordered_channel_timeout"),
        ));
    }

    Ok(response)
}

fn validate_host_channel(
    channel: &IbcChannel,
    version: &str,
) -> Result<IcaMetadata, ContractError> {
    if channel.counterparty_endpoint.port_id != HOST_PORT_ID {
        return Err(ContractError::InvalidChannelMetadata(format!(
            "counterparty port must be {HOST_PORT_ID}, got {}",
            channel.counterparty_endpoint.port_id
        )));
    }

    let metadata = IcaMetadata::from_version(version)?;
    metadata.validate(&channel.connection_id)?;
    Ok(metadata)
}
