//! Owner operations: channel management and delegates.

use cosmwasm_std::{
    Addr, AnyMsg, CosmosMsg, DepsMut, Env, Event, IbcMsg, IbcOrder, MessageInfo, Response,
};
use ibc_proto::ibc::core::channel::v1::{
    Channel, Counterparty, MsgChannelOpenInit, Order, State,
};
use prost::{Message, Name};
use storage_outpost_ica::metadata::IcaMetadata;

use crate::{
    auth, channel,
    msg::options::ChannelOpenInitOptions,
    state::{ChannelState, CHANNEL_OPEN_INIT_OPTIONS},
    ContractError,
};

/// Submits a `MsgChannelOpenInit` for a new ICA channel.
/// # Errors
/// Returns [`ContractError::Unauthorized`] if the sender is not the owner,
/// [`ContractError::InvalidChannelTransition`] if a channel is already open and
/// [`ContractError::InvalidArgument`] if no options were ever given.
#[allow(clippy::needless_pass_by_value)]
pub fn create_channel(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    options: Option<ChannelOpenInitOptions>,
) -> Result<Response, ContractError> {
    auth::assert_owner(deps.storage, &info.sender)?;

    let channel = channel::load(deps.storage)?;
    if matches!(channel.state, ChannelState::Open) {
        return Err(ContractError::InvalidChannelTransition {
            state: channel.state,
            event: "create_channel".to_string(),
        });
    }

    let options = match options {
        Some(options) => options,
        None => CHANNEL_OPEN_INIT_OPTIONS
            .may_load(deps.storage)?
            .ok_or_else(|| {
                ContractError::InvalidArgument("no channel open init options".to_string())
            })?,
    };
    let open_init = new_ica_channel_open_init_msg(&env.contract.address, &options)?;
    CHANNEL_OPEN_INIT_OPTIONS.save(deps.storage, &options)?;

    Ok(Response::new()
        .add_message(open_init)
        .add_event(channel_open_init_event(&options))
        .add_attribute("action", "create_channel"))
}

/// Closes the tracked channel. The tracker is updated by the close callback.
/// # Errors
/// Returns [`ContractError::Unauthorized`] if the sender is not the owner and
/// [`ContractError::ChannelNotReady`] if the channel is not open.
pub fn close_channel(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    auth::assert_owner(deps.storage, &info.sender)?;

    let channel = channel::load(deps.storage)?;
    if !matches!(channel.state, ChannelState::Open) {
        return Err(ContractError::ChannelNotReady);
    }

    Ok(Response::new()
        .add_message(IbcMsg::CloseChannel {
            channel_id: channel.channel_id.clone(),
        })
        .add_attribute("action", "close_channel")
        .add_attribute("channel_id", channel.channel_id))
}

/// Allows `address` to relay messages.
/// # Errors
/// Returns [`ContractError::Unauthorized`] if the sender is not the owner, or an error if
/// `address` is invalid.
pub fn add_delegate(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    auth::assert_owner(deps.storage, &info.sender)?;
    let delegate = deps.api.addr_validate(&address)?;
    auth::add_delegate(deps.storage, &delegate)?;

    Ok(Response::new()
        .add_attribute("action", "add_delegate")
        .add_attribute("delegate", delegate))
}

/// Revokes a delegate.
/// # Errors
/// Returns [`ContractError::Unauthorized`] if the sender is not the owner, or an error if
/// `address` is invalid.
pub fn remove_delegate(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    auth::assert_owner(deps.storage, &info.sender)?;
    let delegate = deps.api.addr_validate(&address)?;
    auth::remove_delegate(deps.storage, &delegate);

    Ok(Response::new()
        .add_attribute("action", "remove_delegate")
        .add_attribute("delegate", delegate))
}

/// Builds the `MsgChannelOpenInit` opening an ICA channel from the port of `contract`.
/// # Errors
/// Returns an error if the channel metadata cannot be serialized.
pub fn new_ica_channel_open_init_msg(
    contract: &Addr,
    options: &ChannelOpenInitOptions,
) -> Result<CosmosMsg, ContractError> {
    let version = IcaMetadata::new(
        options.connection_id.clone(),
        options.counterparty_connection_id.clone(),
    )
    .to_version()?;
    let ordering = match options.channel_ordering() {
        IbcOrder::Ordered => Order::Ordered,
        IbcOrder::Unordered => Order::Unordered,
    };

    let msg = MsgChannelOpenInit {
        port_id: format!("wasm.{contract}"),
        channel: Some(Channel {
            state: State::Init.into(),
            ordering: ordering.into(),
            counterparty: Some(Counterparty {
                port_id: options.counterparty_port_id(),
                channel_id: String::new(),
            }),
            connection_hops: vec![options.connection_id.clone()],
            version,
            upgrade_sequence: 0,
        }),
        signer: contract.to_string(),
    };

    Ok(CosmosMsg::Any(AnyMsg {
        type_url: MsgChannelOpenInit::type_url(),
        value: msg.encode_to_vec().into(),
    }))
}

/// The event emitted whenever the outpost starts a handshake.
#[must_use]
pub fn channel_open_init_event(options: &ChannelOpenInitOptions) -> Event {
    Event::new("outpost_channel_open_init")
        .add_attribute("connection_id", &options.connection_id)
        .add_attribute(
            "counterparty_connection_id",
            &options.counterparty_connection_id,
        )
        .add_attribute("counterparty_port_id", options.counterparty_port_id())
}
