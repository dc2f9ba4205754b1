//! This module contains the `CosmWasm` entrypoints of the outpost.

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response};

use crate::{
    auth, execute,
    keys::{CONTRACT_NAME, CONTRACT_VERSION, SEND_PACKET_REPLY_ID},
    msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg},
    query, relay,
    state::{ChannelInfo, ContractState, CHANNEL, CHANNEL_OPEN_INIT_OPTIONS, PENDING_BATCHES, STATE},
    ContractError,
};

/// The instantiate entry point for the outpost.
/// Opens the ICA channel right away if channel options are given.
/// # Errors
/// Will return an error if the owner or a delegate address is invalid.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender.clone(),
    };
    STATE.save(deps.storage, &ContractState::new(owner.clone()))?;
    CHANNEL.save(deps.storage, &ChannelInfo::default())?;
    PENDING_BATCHES.save(deps.storage, &0)?;

    for delegate in msg.delegates.unwrap_or_default() {
        let delegate = deps.api.addr_validate(&delegate)?;
        auth::add_delegate(deps.storage, &delegate)?;
    }

    let event = Event::new("outpost_instantiate")
        .add_attribute("sender", info.sender)
        .add_attribute("owner", owner)
        .add_attribute("outpost_address", env.contract.address.as_str());
    let response = Response::new().add_event(event);

    match msg.channel_open_init_options {
        Some(options) => {
            let open_init = execute::new_ica_channel_open_init_msg(&env.contract.address, &options)?;
            CHANNEL_OPEN_INIT_OPTIONS.save(deps.storage, &options)?;
            Ok(response
                .add_message(open_init)
                .add_event(execute::channel_open_init_event(&options)))
        }
        None => Ok(response),
    }
}

/// The execute entry point for the outpost.
/// It routes the message to the appropriate handler.
/// # Errors
/// Will return an error if the handler returns an error.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateChannel {
            channel_open_init_options,
        } => execute::create_channel(deps, env, info, channel_open_init_options),
        ExecuteMsg::CloseChannel {} => execute::close_channel(deps, info),
        ExecuteMsg::SendCosmosMsgs {
            messages,
            packet_memo,
            timeout_seconds,
        } => relay::send_cosmos_msgs(deps, env, info, messages, packet_memo, timeout_seconds),
        ExecuteMsg::AddDelegate { address } => execute::add_delegate(deps, info, address),
        ExecuteMsg::RemoveDelegate { address } => execute::remove_delegate(deps, info, address),
    }
}

/// The query entry point for the outpost.
/// It routes the message to the appropriate handler.
/// # Errors
/// Will return an error if the handler returns an error.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::GetContractState {} => query::contract_state(deps),
        QueryMsg::Ownership {} => query::ownership(deps),
        QueryMsg::GetChannel {} => query::channel(deps),
        QueryMsg::GetBatch {
            channel_id,
            sequence,
        } => query::batch(deps, channel_id, sequence),
        QueryMsg::ListBatches { start_after, limit } => query::batches(deps, start_after, limit),
        QueryMsg::Delegates {} => query::delegates(deps),
        QueryMsg::IsAuthorized { address } => query::is_authorized(deps, &address),
    }
}

/// The reply entry point for the outpost.
/// # Errors
/// Will return an error if the packet submission failed or the reply id is unknown.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn reply(deps: DepsMut, _env: Env, reply: Reply) -> Result<Response, ContractError> {
    match reply.id {
        SEND_PACKET_REPLY_ID => relay::on_send_packet_reply(deps, reply),
        id => Err(ContractError::UnknownReplyId(id)),
    }
}

/// The migrate entry point for the outpost.
/// # Errors
/// Will return an error if the stored contract is not an outpost or is not older.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    migrate::validate_semver(deps.as_ref())?;

    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::default().add_attribute("version", CONTRACT_VERSION))
}

mod migrate {
    use cosmwasm_std::Deps;

    use crate::{
        keys::{CONTRACT_NAME, CONTRACT_VERSION},
        ContractError,
    };

    /// Validates that the stored contract is an outpost with a strictly older version.
    pub fn validate_semver(deps: Deps) -> Result<(), ContractError> {
        let prev_cw2_version = cw2::get_contract_version(deps.storage)?;
        if prev_cw2_version.contract != CONTRACT_NAME {
            return Err(ContractError::InvalidMigrationVersion {
                expected: CONTRACT_NAME.to_string(),
                actual: prev_cw2_version.contract,
            });
        }

        let version: semver::Version = CONTRACT_VERSION.parse()?;
        let prev_version: semver::Version = prev_cw2_version.version.parse()?;
        if prev_version >= version {
            return Err(ContractError::InvalidMigrationVersion {
                expected: format!("> {prev_version}"),
                actual: CONTRACT_VERSION.to_string(),
            });
        }
        Ok(())
    }
}
