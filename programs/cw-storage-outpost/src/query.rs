//! Query handlers of the outpost.

use cosmwasm_std::{to_json_binary, Binary, Deps, Order};
use cw_storage_plus::Bound;

use crate::{
    auth, channel,
    keys::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT},
    msg::{BatchesResponse, ContractStateResponse, DelegatesResponse, OwnershipResponse},
    state::{BATCHES, PENDING_BATCHES, STATE},
    ContractError,
};

/// Returns the owner, the tracked channel and the number of pending batches.
/// # Errors
/// Returns an error if the state cannot be loaded.
pub fn contract_state(deps: Deps) -> Result<Binary, ContractError> {
    let state = STATE.load(deps.storage)?;
    let channel = channel::load(deps.storage)?;

    Ok(to_json_binary(&ContractStateResponse {
        owner: state.owner,
        channel_state: channel.state,
        port_id: channel.port_id,
        channel_id: channel.channel_id,
        ica_address: channel.ica_address,
        pending_batches: PENDING_BATCHES.may_load(deps.storage)?.unwrap_or_default(),
    })?)
}

/// Returns the owner of the outpost.
/// # Errors
/// Returns an error if the state cannot be loaded.
pub fn ownership(deps: Deps) -> Result<Binary, ContractError> {
    let owner = STATE.load(deps.storage)?.owner;
    Ok(to_json_binary(&OwnershipResponse { owner })?)
}

/// Returns the tracked channel.
/// # Errors
/// Returns an error if the channel cannot be loaded.
pub fn channel(deps: Deps) -> Result<Binary, ContractError> {
    Ok(to_json_binary(&channel::load(deps.storage)?)?)
}

/// Returns the batch sent with `sequence` over `channel_id`, the tracked channel by default.
/// # Errors
/// Returns an error if there is no such batch.
pub fn batch(
    deps: Deps,
    channel_id: Option<String>,
    sequence: u64,
) -> Result<Binary, ContractError> {
    let channel_id = match channel_id {
        Some(channel_id) => channel_id,
        None => channel::load(deps.storage)?.channel_id,
    };
    let batch = BATCHES.load(deps.storage, (channel_id.as_str(), sequence))?;
    Ok(to_json_binary(&batch)?)
}

/// Returns a page of batches ordered by `(channel_id, sequence)`.
/// # Errors
/// Returns an error if a stored batch cannot be deserialized.
pub fn batches(
    deps: Deps,
    start_after: Option<(String, u64)>,
    limit: Option<u32>,
) -> Result<Binary, ContractError> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT) as usize;
    let start = start_after
        .as_ref()
        .map(|(channel_id, sequence)| Bound::exclusive((channel_id.as_str(), *sequence)));

    let batches = BATCHES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, batch)| batch))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(to_json_binary(&BatchesResponse { batches })?)
}

/// Returns the registered delegates.
/// # Errors
/// Returns an error if the delegates cannot be loaded.
pub fn delegates(deps: Deps) -> Result<Binary, ContractError> {
    Ok(to_json_binary(&DelegatesResponse {
        delegates: auth::delegates(deps.storage)?,
    })?)
}

/// Returns whether `address` may relay messages.
/// # Errors
/// Returns an error if `address` is invalid.
pub fn is_authorized(deps: Deps, address: &str) -> Result<Binary, ContractError> {
    let address = deps.api.addr_validate(address)?;
    Ok(to_json_binary(&auth::is_authorized(deps.storage, &address)?)?)
}
